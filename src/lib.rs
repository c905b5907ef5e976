//! Gravity Switcher - a one-button gravity-flipping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, particles, game state)
//! - `persistence`: Key-value storage backends
//! - `highscores`: High score bookkeeping on top of the store
//! - `settings`: Cosmetic sprite preference
//! - `platform`: Browser glue (wasm32 only)

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use settings::{Settings, Sprite};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration per tick (multiplied by gravity direction)
    pub const GRAVITY: f32 = 0.12;
    /// Velocity kick applied on flip (multiplied by the new gravity direction)
    pub const FLIP_POWER: f32 = -4.0;

    /// Player box
    pub const PLAYER_X: f32 = 150.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Obstacles scroll left this many pixels per tick
    pub const OBSTACLE_SPEED: f32 = 1.5;
    /// Ticks between obstacle spawns
    pub const OBSTACLE_SPAWN_RATE: u64 = 240;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 200.0;
    /// Minimum distance between a gap and the top/bottom edge
    pub const GAP_MARGIN: f32 = 50.0;

    /// Hard cap on live particles (oldest evicted first)
    pub const MAX_PARTICLES: usize = 500;
    /// Particles falling this far below the screen are culled
    pub const PARTICLE_CULL_MARGIN: f32 = 50.0;

    /// Screen shake magnitude set on crash
    pub const CRASH_SHAKE: f32 = 20.0;
    /// Per-tick shake multiplier
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Shake below this snaps to zero
    pub const SHAKE_CUTOFF: f32 = 0.5;

    /// Default canvas size
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
}

/// Screen dimensions supplied by the host (canvas or headless runner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(consts::DEFAULT_WIDTH, consts::DEFAULT_HEIGHT)
    }
}
