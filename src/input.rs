//! Input translation. Raw window events are turned into a small per-frame batch of [`GridInput`]
//! events, which is all the rest of the game ever looks at. Nothing downstream reads raw device
//! state.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

use crate::movement::Direction;
use crate::state::GameSet;

/// Registers the `GridInput` event stream and the systems that feed and drain it.
pub struct GridInputPlugin;

impl Plugin for GridInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GridInput>().add_systems(
            Update,
            (
                (read_keyboard, read_close_requests).chain(),
                exit_on_quit,
            )
                .chain()
                .in_set(GameSet::Input),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    /// Any other key. Only ever reported on release, since every release re-arms movement.
    Other,
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Self {
        match code {
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Confirm,
            _ => Key::Other,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Confirm | Key::Other => None,
        }
    }
}

/// One discrete input, delivered in arrival order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInput {
    KeyDown(Key),
    KeyUp(Key),
    Quit,
}

impl GridInput {
    /// Maps a raw keyboard event. Presses of keys the game does not use produce nothing.
    pub fn from_keyboard(code: KeyCode, state: ButtonState) -> Option<Self> {
        let key = Key::from_key_code(code);
        match state {
            ButtonState::Pressed if key == Key::Other => None,
            ButtonState::Pressed => Some(GridInput::KeyDown(key)),
            ButtonState::Released => Some(GridInput::KeyUp(key)),
        }
    }
}

fn read_keyboard(mut keyboard: EventReader<KeyboardInput>, mut inputs: EventWriter<GridInput>) {
    for event in keyboard.read() {
        if let Some(input) = GridInput::from_keyboard(event.key_code, event.state) {
            inputs.send(input);
        }
    }
}

fn read_close_requests(
    mut requests: EventReader<WindowCloseRequested>,
    mut inputs: EventWriter<GridInput>,
) {
    if requests.read().next().is_some() {
        inputs.send(GridInput::Quit);
    }
}

fn exit_on_quit(mut inputs: EventReader<GridInput>, mut exit: EventWriter<AppExit>) {
    if inputs.read().any(|input| *input == GridInput::Quit) {
        info!("Quit requested; shutting down.");
        exit.send(AppExit::Success);
    }
}
