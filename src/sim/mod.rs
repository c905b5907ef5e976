//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per frame, no internal timing
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, check_collision};
pub use obstacle::{Obstacle, ObstacleField, PassedObstacle};
pub use particles::{Particle, ParticleEngine, ParticleKind};
pub use player::{GravityDirection, PlayerBody};
pub use state::{GameEvent, GamePhase, GameSession, RenderSnapshot, TriggerOutcome};
pub use tick::tick;
