//! Visual particle effects
//!
//! Particles are not gameplay-affecting. The engine holds at most
//! `MAX_PARTICLES`; every insertion past that evicts the oldest particle
//! first, so bursts always land in full.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PARTICLE_CULL_MARGIN};

/// Accent colors (0xRRGGBB)
pub const PURPLE: u32 = 0x790ECB;
pub const PURPLE_LIGHT: u32 = 0x9D3EF0;
pub const GOLD: u32 = 0xFFD700;
pub const CONFETTI_COLORS: [u32; 7] = [
    0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0xFFA07A, 0x98D8C8, 0xF7DC6F, 0xBB8FCE,
];

const TRAIL_MAX_LIFE: u32 = 40;
const EXPLOSION_MAX_LIFE: u32 = 60;
const SPARKLE_MAX_LIFE: u32 = 40;
const CONFETTI_MAX_LIFE: u32 = 120;

const EXPLOSION_GRAVITY: f32 = 0.15;
const CONFETTI_GRAVITY: f32 = 0.1;
/// Degrees per tick
const CONFETTI_SPIN: f32 = 5.0;

/// Particle archetype with its archetype-only state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticleKind {
    Trail,
    Explosion,
    Sparkle,
    /// Rotation in degrees
    Confetti { rotation: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, remaining life fraction
    pub opacity: f32,
    pub color: u32,
    /// Remaining frames
    pub life: u32,
    pub max_life: u32,
    pub kind: ParticleKind,
}

impl Particle {
    fn new(
        pos: Vec2,
        vel: Vec2,
        size: f32,
        color: u32,
        life: u32,
        max_life: u32,
        kind: ParticleKind,
    ) -> Self {
        Self {
            pos,
            vel,
            size,
            opacity: 1.0,
            color,
            life,
            max_life,
            kind,
        }
    }

    /// Rotation in degrees (0 for everything but confetti)
    pub fn rotation(&self) -> f32 {
        match self.kind {
            ParticleKind::Confetti { rotation } => rotation,
            _ => 0.0,
        }
    }

    /// Advance one frame
    fn step(&mut self) {
        match &mut self.kind {
            ParticleKind::Trail => {}
            ParticleKind::Explosion => self.vel.y += EXPLOSION_GRAVITY,
            ParticleKind::Confetti { rotation } => {
                self.vel.y += CONFETTI_GRAVITY;
                *rotation += CONFETTI_SPIN;
            }
            ParticleKind::Sparkle => {
                // Rescales from the current size, so the twinkle compounds frame over frame
                let life = self.life as f32;
                let twinkle = (life * 0.3).sin() * 0.5 + 0.5;
                self.size = (life / self.max_life as f32) * self.size * (0.5 + twinkle);
            }
        }

        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.opacity = self.life as f32 / self.max_life as f32;
    }

    fn is_dead(&self, floor_y: f32) -> bool {
        self.life == 0 || self.opacity <= 0.0 || self.pos.y > floor_y
    }
}

/// Bounded FIFO collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    particles: VecDeque<Particle>,
    rng: Pcg32,
}

impl ParticleEngine {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            particles: VecDeque::with_capacity(MAX_PARTICLES),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    fn accent(&mut self) -> u32 {
        if self.rng.random_bool(0.5) { PURPLE } else { PURPLE_LIGHT }
    }

    /// One trail mote at the player's center
    pub fn spawn_trail(&mut self, at: Vec2) {
        let vel = Vec2::new(
            self.rng.random_range(-0.25..0.25),
            self.rng.random_range(-0.25..0.25),
        );
        let size = self.rng.random_range(2.0..5.0);
        let life = self.rng.random_range(20..TRAIL_MAX_LIFE);
        let color = self.accent();
        self.push(Particle::new(at, vel, size, color, life, TRAIL_MAX_LIFE, ParticleKind::Trail));
    }

    /// Radial burst at an impact point
    pub fn spawn_explosion(&mut self, at: Vec2) {
        let count = self.rng.random_range(15..=30);

        for i in 0..count {
            let jitter = self.rng.random_range(-0.25..0.25);
            let angle = TAU * i as f32 / count as f32 + jitter;
            let speed = self.rng.random_range(2.0..5.0);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let size = self.rng.random_range(3.0..7.0);
            let life = self.rng.random_range(30..EXPLOSION_MAX_LIFE);
            let color = self.accent();
            self.push(Particle::new(
                at,
                vel,
                size,
                color,
                life,
                EXPLOSION_MAX_LIFE,
                ParticleKind::Explosion,
            ));
        }
    }

    /// Gold glints scattered down a cleared gap
    pub fn spawn_sparkles(&mut self, x: f32, gap_top: f32, gap_size: f32) {
        let count = self.rng.random_range(5..=10);

        for _ in 0..count {
            let pos = Vec2::new(
                x + self.rng.random_range(-20.0..20.0),
                gap_top + self.rng.random::<f32>() * gap_size,
            );
            let vel = Vec2::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );
            let size = self.rng.random_range(2.0..5.0);
            let life = self.rng.random_range(20..SPARKLE_MAX_LIFE);
            self.push(Particle::new(
                pos,
                vel,
                size,
                GOLD,
                life,
                SPARKLE_MAX_LIFE,
                ParticleKind::Sparkle,
            ));
        }
    }

    /// Confetti shower from above the top edge
    pub fn spawn_confetti(&mut self, screen_width: f32) {
        let count = self.rng.random_range(30..=50);

        for _ in 0..count {
            let pos = Vec2::new(self.rng.random::<f32>() * screen_width, -20.0);
            let vel = Vec2::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(1.0..3.0),
            );
            let size = self.rng.random_range(3.0..7.0);
            let life = self.rng.random_range(60..CONFETTI_MAX_LIFE);
            let color = CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())];
            let rotation = self.rng.random_range(0.0..360.0);
            self.push(Particle::new(
                pos,
                vel,
                size,
                color,
                life,
                CONFETTI_MAX_LIFE,
                ParticleKind::Confetti { rotation },
            ));
        }
    }

    /// Age every particle by one frame and cull the dead
    pub fn tick(&mut self, screen_height: f32) {
        for particle in self.particles.iter_mut() {
            particle.step();
        }
        let floor_y = screen_height + PARTICLE_CULL_MARGIN;
        self.particles.retain(|p| !p.is_dead(floor_y));
    }
}
