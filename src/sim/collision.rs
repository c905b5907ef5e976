//! Collision detection between the player box, the screen edges and obstacles
//!
//! Pure functions; the session applies the consequences.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerBody;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionResult {
    None,
    /// Hit the top (`y = 0`) or bottom (`y = screen height`) edge
    Wall { y: f32 },
    /// Hit an obstacle; `y` is the gap edge that was struck
    Obstacle { x: f32, y: f32 },
}

impl CollisionResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionResult::None)
    }

    /// Impact point for effects, given the player's center x
    pub fn impact_point(&self, player_center_x: f32) -> Option<Vec2> {
        match *self {
            CollisionResult::None => None,
            CollisionResult::Wall { y } => Some(Vec2::new(player_center_x, y)),
            CollisionResult::Obstacle { x, y } => Some(Vec2::new(x, y)),
        }
    }
}

/// Check the player against the top and bottom edges
pub fn wall_collision(player: &PlayerBody, screen_height: f32) -> CollisionResult {
    if player.y < 0.0 {
        CollisionResult::Wall { y: 0.0 }
    } else if player.bottom() > screen_height {
        CollisionResult::Wall { y: screen_height }
    } else {
        CollisionResult::None
    }
}

/// Check the player against a single obstacle
pub fn obstacle_collision(player: &PlayerBody, obstacle: &Obstacle) -> CollisionResult {
    let overlaps_x = player.x + player.width > obstacle.x && player.x < obstacle.right();
    if !overlaps_x {
        return CollisionResult::None;
    }

    let above_gap = player.y < obstacle.gap_top;
    if above_gap || player.bottom() > obstacle.gap_bottom() {
        let y = if above_gap {
            obstacle.gap_top
        } else {
            obstacle.gap_bottom()
        };
        return CollisionResult::Obstacle {
            x: player.center().x,
            y,
        };
    }

    CollisionResult::None
}

/// Walls first, then obstacles in field order; first hit wins
pub fn check_collision(
    player: &PlayerBody,
    obstacles: &[Obstacle],
    screen_height: f32,
) -> CollisionResult {
    let wall = wall_collision(player, screen_height);
    if wall.is_hit() {
        return wall;
    }

    obstacles
        .iter()
        .map(|o| obstacle_collision(player, o))
        .find(CollisionResult::is_hit)
        .unwrap_or(CollisionResult::None)
}
