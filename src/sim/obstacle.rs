//! Scrolling gated obstacles
//!
//! Obstacles are kept in spawn order, which is also the order collision
//! checks walk them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A wall with a vertical opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub gap_top: f32,
    pub gap_size: f32,
    pub width: f32,
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right-hand) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }
}

/// Emitted the tick an obstacle's trailing edge moves behind the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassedObstacle {
    pub gap_center_x: f32,
    pub gap_top: f32,
    pub gap_size: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Insert an obstacle directly (scripted layouts and tests)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn a fresh obstacle at the right edge when the spawn timer is due.
    /// Returns true if one was spawned.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        frame_count: u64,
        screen_width: f32,
        screen_height: f32,
        rng: &mut R,
    ) -> bool {
        if !frame_count.is_multiple_of(OBSTACLE_SPAWN_RATE) {
            return false;
        }
        self.obstacles.push(Obstacle {
            x: screen_width,
            gap_top: sample_gap_top(screen_height, rng),
            gap_size: GAP_SIZE,
            width: OBSTACLE_WIDTH,
            passed: false,
        });
        true
    }

    /// Scroll every obstacle, report newly passed ones, then drop the ones
    /// that left the screen.
    pub fn advance(&mut self, player_x: f32) -> Vec<PassedObstacle> {
        let mut passed = Vec::new();

        for obstacle in &mut self.obstacles {
            obstacle.x -= OBSTACLE_SPEED;

            if !obstacle.passed && obstacle.right() < player_x {
                obstacle.passed = true;
                passed.push(PassedObstacle {
                    gap_center_x: obstacle.x + obstacle.width / 2.0,
                    gap_top: obstacle.gap_top,
                    gap_size: obstacle.gap_size,
                });
            }
        }

        self.obstacles.retain(|o| o.right() >= 0.0);

        passed
    }
}

/// Uniform gap top in `[GAP_MARGIN, height - GAP_SIZE - GAP_MARGIN)`.
/// Screens too short for that range pin the gap to the top margin.
fn sample_gap_top<R: Rng>(screen_height: f32, rng: &mut R) -> f32 {
    let lo = GAP_MARGIN;
    let hi = screen_height - GAP_SIZE - GAP_MARGIN;
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
