//! Start screen UI. Spawns a full-screen overlay with the title and a prompt while the game sits in
//! the `Menu` state, and removes it as soon as play starts.

use bevy::prelude::*;

use crate::state::GameState;

/// Registers start-screen spawn/despawn systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Menu), spawn_start_menu)
            .add_systems(OnExit(GameState::Menu), despawn_start_menu);
    }
}

#[derive(Component)]
struct StartMenu;

fn spawn_start_menu(mut commands: Commands) {
    commands
        .spawn((
            StartMenu,
            Name::new("StartMenu"),
            NodeBundle {
                background_color: BackgroundColor(Color::srgb(0.1, 0.14, 0.3)),
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    row_gap: Val::Px(48.0),
                    ..default()
                },
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "Grid Explorer",
                TextStyle {
                    font_size: 74.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));
            parent.spawn(TextBundle::from_section(
                "Press ENTER to start",
                TextStyle {
                    font_size: 48.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));
        });
}

fn despawn_start_menu(mut commands: Commands, query: Query<Entity, With<StartMenu>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
