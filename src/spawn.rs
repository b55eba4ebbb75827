//! Spawn selection: picks the player's starting cell uniformly from the level's free cells.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::grid::GridPos;
use crate::level::LevelConfig;

/// Random source for spawn rolls. Seeded from `LevelConfig::spawn_seed` when one is configured so
/// runs can be replayed, from OS entropy otherwise.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl FromWorld for SpawnRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<LevelConfig>().and_then(|c| c.spawn_seed);
        Self::from_seed(seed)
    }
}

impl SpawnRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Uniform choice over `free`. With nothing free the player lands on `(0,0)`, passable or not.
pub fn pick_spawn<R: Rng + ?Sized>(free: &[GridPos], rng: &mut R) -> GridPos {
    free.choose(rng).copied().unwrap_or(GridPos::ORIGIN)
}
