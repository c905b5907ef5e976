//! The player-controlled body
//!
//! Only `y` moves; `x` stays pinned for the whole run. Out-of-bounds is
//! detected by the collision pass, never clamped here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which way gravity currently pulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityDirection {
    Down,
    Up,
}

impl GravityDirection {
    /// +1 for down, -1 for up (screen coordinates grow downward)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GravityDirection::Down => 1.0,
            GravityDirection::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            GravityDirection::Down => GravityDirection::Up,
            GravityDirection::Up => GravityDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub gravity: GravityDirection,
}

impl PlayerBody {
    pub fn new(screen_height: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: screen_height / 2.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity_y: 0.0,
            gravity: GravityDirection::Down,
        }
    }

    /// One tick of gravity integration
    pub fn integrate(&mut self) {
        self.velocity_y += GRAVITY * self.gravity.sign();
        self.y += self.velocity_y;
    }

    /// Invert gravity and kick the body against the new pull
    pub fn flip(&mut self) {
        self.gravity = self.gravity.flipped();
        self.velocity_y = FLIP_POWER * self.gravity.sign();
    }

    pub fn reset(&mut self, screen_height: f32) {
        self.y = screen_height / 2.0;
        self.velocity_y = 0.0;
        self.gravity = GravityDirection::Down;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
