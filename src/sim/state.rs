//! Game session state and the trigger-driven state machine
//!
//! The session owns every simulation component by value. It is the only
//! writer; renderers read through accessors or `snapshot()`.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleField};
use super::particles::{ParticleEngine, ParticleKind};
use super::player::{GravityDirection, PlayerBody};
use crate::Viewport;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Title screen, waiting for a trigger
    Start,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// What a trigger did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Start -> Playing, fresh run
    Started,
    /// Gravity flipped mid-run
    Flipped,
    /// GameOver -> Start
    ReturnedToStart,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Player cleared an obstacle; `score` is the new score
    ObstaclePassed { score: u64 },
    /// Score moved past the best known at run start
    NewHighScore { score: u64 },
    /// Run ended at this impact point
    Crashed { wall: bool, x: f32, y: f32 },
    /// Final score was persisted as the new best
    HighScoreSaved { score: u64 },
}

/// PCG stream ids so effects never perturb obstacle placement
pub const OBSTACLE_STREAM: u64 = 1;
pub const PARTICLE_STREAM: u64 = 2;

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// A single live game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) seed: u64,
    pub(crate) viewport: Viewport,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    pub(crate) high_score: u64,
    /// Best score known when this run started, raised as the run beats it
    pub(crate) run_best: u64,
    pub(crate) frame_count: u64,
    pub(crate) screen_shake: f32,
    pub(crate) player: PlayerBody,
    pub(crate) obstacles: ObstacleField,
    pub(crate) particles: ParticleEngine,
    pub(crate) obstacle_rng: Pcg32,
}

impl GameSession {
    /// Create a session on the start screen. `high_score` is the value
    /// loaded from storage (see `highscores::load_high_score`).
    pub fn new(seed: u64, viewport: Viewport, high_score: u64) -> Self {
        log::info!(
            "Session created (seed {seed}, {}x{}, high score {high_score})",
            viewport.width,
            viewport.height
        );
        Self {
            seed,
            viewport,
            phase: GamePhase::Start,
            score: 0,
            high_score,
            run_best: high_score,
            frame_count: 0,
            screen_shake: 0.0,
            player: PlayerBody::new(viewport.height),
            obstacles: ObstacleField::new(),
            particles: ParticleEngine::new(RngState::new(seed, PARTICLE_STREAM).to_rng()),
            obstacle_rng: RngState::new(seed, OBSTACLE_STREAM).to_rng(),
        }
    }

    /// The single input entry point
    pub fn trigger(&mut self) -> TriggerOutcome {
        match self.phase {
            GamePhase::Start => {
                self.phase = GamePhase::Playing;
                self.reset();
                log::info!("Run started (best to beat: {})", self.run_best);
                TriggerOutcome::Started
            }
            GamePhase::Playing => {
                self.player.flip();
                TriggerOutcome::Flipped
            }
            GamePhase::GameOver => {
                self.phase = GamePhase::Start;
                TriggerOutcome::ReturnedToStart
            }
        }
    }

    /// Fresh run state. Does not touch the phase.
    fn reset(&mut self) {
        self.score = 0;
        self.frame_count = 0;
        self.obstacles.clear();
        self.player.reset(self.viewport.height);
        self.run_best = self.high_score;
        self.particles.clear();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Best score the current run must beat to fire confetti again
    pub fn run_best(&self) -> u64 {
        self.run_best
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn screen_shake(&self) -> f32 {
        self.screen_shake
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Host resized the canvas. Takes effect for spawn and collision
    /// bounds immediately; the player is re-centred on the next run.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    /// Scripted scenarios for integration tests. Not part of the host API.
    #[doc(hidden)]
    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player
    }

    #[doc(hidden)]
    pub fn obstacles_mut(&mut self) -> &mut ObstacleField {
        &mut self.obstacles
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            screen_shake: self.screen_shake,
            gravity: self.player.gravity,
            player: BoxSnapshot {
                x: self.player.x,
                y: self.player.y,
                width: self.player.width,
                height: self.player.height,
            },
            obstacles: self.obstacles.obstacles().to_vec(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleSnapshot {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    opacity: p.opacity,
                    color: p.color,
                    rotation: p.rotation(),
                    kind: p.kind,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Degrees
    pub rotation: f32,
    pub kind: ParticleKind,
}

/// Read-only frame view for an external renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub screen_shake: f32,
    pub gravity: GravityDirection,
    pub player: BoxSnapshot,
    pub obstacles: Vec<Obstacle>,
    /// Oldest first (draw order)
    pub particles: Vec<ParticleSnapshot>,
}

/// Screen shake after one tick of decay
#[inline]
pub(crate) fn decay_shake(shake: f32) -> f32 {
    let next = shake * SHAKE_DECAY;
    if next < SHAKE_CUTOFF { 0.0 } else { next }
}
