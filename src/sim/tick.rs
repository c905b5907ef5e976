//! Discrete simulation step
//!
//! One call per displayed frame. The step runs to completion; there is no
//! internal timing.

use super::collision::{CollisionResult, check_collision};
use super::state::{GameEvent, GamePhase, GameSession, decay_shake};
use crate::consts::*;
use crate::highscores;
use crate::persistence::KeyValueStore;

/// Advance the session by one frame.
///
/// Physics, obstacles and collisions only run while `Playing`; screen shake
/// and particles keep animating in every phase. On a crash the final score
/// is offered to `store` as a new high score.
pub fn tick<S: KeyValueStore + ?Sized>(session: &mut GameSession, store: &mut S) -> Vec<GameEvent> {
    let mut events = Vec::new();

    session.screen_shake = decay_shake(session.screen_shake);

    if session.phase == GamePhase::Playing {
        step_run(session, store, &mut events);
    }

    session.particles.tick(session.viewport.height);

    events
}

fn step_run<S: KeyValueStore + ?Sized>(
    session: &mut GameSession,
    store: &mut S,
    events: &mut Vec<GameEvent>,
) {
    let viewport = session.viewport;
    session.frame_count += 1;

    session.player.integrate();
    session.particles.spawn_trail(session.player.center());

    session.obstacles.maybe_spawn(
        session.frame_count,
        viewport.width,
        viewport.height,
        &mut session.obstacle_rng,
    );

    for passed in session.obstacles.advance(session.player.x) {
        session.score += 1;
        log::debug!("Obstacle cleared, score {}", session.score);
        events.push(GameEvent::ObstaclePassed {
            score: session.score,
        });
        session
            .particles
            .spawn_sparkles(passed.gap_center_x, passed.gap_top, passed.gap_size);

        if session.score > session.run_best {
            session.particles.spawn_confetti(viewport.width);
            session.run_best = session.score;
            events.push(GameEvent::NewHighScore {
                score: session.score,
            });
        }
    }

    let collision = check_collision(
        &session.player,
        session.obstacles.obstacles(),
        viewport.height,
    );
    if let Some(impact) = collision.impact_point(session.player.center().x) {
        session.particles.spawn_explosion(impact);
        session.screen_shake = CRASH_SHAKE;
        session.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed {
            wall: matches!(collision, CollisionResult::Wall { .. }),
            x: impact.x,
            y: impact.y,
        });

        let recorded = highscores::record_score(store, session.score);
        session.high_score = recorded.best;
        if recorded.saved {
            events.push(GameEvent::HighScoreSaved {
                score: session.score,
            });
        }
        log::info!(
            "Game over at frame {} with score {} (best {})",
            session.frame_count,
            session.score,
            session.high_score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::particles::ParticleKind;
    use crate::{KeyValueStore, Viewport};

    fn playing(seed: u64, high_score: u64) -> GameSession {
        let mut s = GameSession::new(seed, Viewport::default(), high_score);
        s.trigger();
        s
    }

    /// An obstacle whose trailing edge crosses the player on the next step
    fn about_to_pass(gap_top: f32) -> Obstacle {
        Obstacle {
            x: PLAYER_X - OBSTACLE_WIDTH + 1.0,
            gap_top,
            gap_size: GAP_SIZE,
            width: OBSTACLE_WIDTH,
            passed: false,
        }
    }

    #[test]
    fn test_idle_phases_do_not_simulate() {
        let mut store = MemoryStore::new();
        let mut s = GameSession::new(1, Viewport::default(), 0);
        let y = s.player.y;
        for _ in 0..10 {
            assert!(tick(&mut s, &mut store).is_empty());
        }
        assert_eq!(s.frame_count(), 0);
        assert_eq!(s.player.y, y);
        assert!(s.particles().is_empty());
    }

    #[test]
    fn test_playing_step_integrates_and_trails() {
        let mut store = MemoryStore::new();
        let mut s = playing(1, 0);
        tick(&mut s, &mut store);
        assert_eq!(s.frame_count(), 1);
        assert!((s.player.velocity_y - GRAVITY).abs() < 1e-6);
        assert!((s.player.y - (300.0 + GRAVITY)).abs() < 1e-4);
        assert_eq!(s.particles().len(), 1);
        assert_eq!(s.particles().iter().next().unwrap().kind, ParticleKind::Trail);
    }

    #[test]
    fn test_obstacle_spawns_every_spawn_rate() {
        let mut store = MemoryStore::new();
        let mut s = GameSession::new(3, Viewport::new(800.0, 600.0), 0);
        s.trigger();
        for frame in 1..=(OBSTACLE_SPAWN_RATE * 2) {
            // Hold the player mid-screen
            s.player.y = 280.0;
            s.player.velocity_y = 0.0;
            tick(&mut s, &mut store);
            let expected = (frame / OBSTACLE_SPAWN_RATE) as usize;
            assert_eq!(s.obstacles.len(), expected, "frame {frame}");
        }
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_pass_scores_and_sparkles() {
        let mut store = MemoryStore::new();
        let mut s = playing(5, 10);
        s.obstacles.push(about_to_pass(200.0));

        let events = tick(&mut s, &mut store);
        assert_eq!(s.score(), 1);
        assert_eq!(events, vec![GameEvent::ObstaclePassed { score: 1 }]);
        let sparkles = s
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Sparkle)
            .count();
        assert!((5..=10).contains(&sparkles));
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_confetti_once_per_point_past_best() {
        let mut store = MemoryStore::new();
        let mut s = playing(5, 1);

        let confetti = |s: &GameSession| {
            s.particles()
                .iter()
                .filter(|p| matches!(p.kind, ParticleKind::Confetti { .. }))
                .count()
        };

        // Score 1 ties the best: no confetti
        s.obstacles.push(about_to_pass(200.0));
        let events = tick(&mut s, &mut store);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore { .. })));
        assert_eq!(confetti(&s), 0);

        // Score 2 beats it
        s.obstacles.push(about_to_pass(200.0));
        let events = tick(&mut s, &mut store);
        assert!(events.contains(&GameEvent::NewHighScore { score: 2 }));
        assert!(confetti(&s) >= 30);
        assert_eq!(s.run_best(), 2);

        // No new pass, no new confetti event
        let events = tick(&mut s, &mut store);
        assert!(events.is_empty());

        // Every further point celebrates again, not just the first
        let before = confetti(&s);
        s.obstacles.push(about_to_pass(200.0));
        let events = tick(&mut s, &mut store);
        assert!(events.contains(&GameEvent::NewHighScore { score: 3 }));
        assert_eq!(s.run_best(), 3);
        assert!(confetti(&s) >= before + 30);
    }

    #[test]
    fn test_wall_crash_ends_run_and_saves() {
        let mut store = MemoryStore::new();
        let mut s = playing(8, 0);
        s.score = 4;
        s.player.y = 600.0;

        let events = tick(&mut s, &mut store);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.screen_shake(), CRASH_SHAKE);
        assert!(events.contains(&GameEvent::Crashed {
            wall: true,
            x: PLAYER_X + PLAYER_SIZE / 2.0,
            y: 600.0
        }));
        assert!(events.contains(&GameEvent::HighScoreSaved { score: 4 }));
        assert_eq!(s.high_score(), 4);
        assert_eq!(store.get(highscores::HIGH_SCORE_KEY).unwrap().as_deref(), Some("4"));
        let explosion = s
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Explosion)
            .count();
        assert!((15..=30).contains(&explosion));
    }

    #[test]
    fn test_crash_below_best_keeps_stored_value() {
        let mut store = MemoryStore::new();
        store.set(highscores::HIGH_SCORE_KEY, "9").unwrap();
        let mut s = playing(8, 9);
        s.score = 3;
        s.player.y = -2.0;

        let events = tick(&mut s, &mut store);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::HighScoreSaved { .. })));
        assert_eq!(s.high_score(), 9);
        assert_eq!(store.get(highscores::HIGH_SCORE_KEY).unwrap().as_deref(), Some("9"));
    }

    #[test]
    fn test_obstacle_crash() {
        let mut store = MemoryStore::new();
        let mut s = playing(8, 0);
        s.obstacles.push(Obstacle {
            x: PLAYER_X,
            gap_top: 400.0,
            gap_size: GAP_SIZE,
            width: OBSTACLE_WIDTH,
            passed: false,
        });

        let events = tick(&mut s, &mut store);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Crashed {
            wall: false,
            x: PLAYER_X + PLAYER_SIZE / 2.0,
            y: 400.0
        }));
    }

    #[test]
    fn test_effects_keep_animating_after_game_over() {
        let mut store = MemoryStore::new();
        let mut s = playing(8, 0);
        s.player.y = 700.0;
        tick(&mut s, &mut store);
        assert_eq!(s.phase(), GamePhase::GameOver);

        let frame = s.frame_count();
        let y = s.player.y;
        let shake = s.screen_shake();
        let before = s.particles().len();

        for _ in 0..100 {
            tick(&mut s, &mut store);
        }
        assert_eq!(s.frame_count(), frame);
        assert_eq!(s.player.y, y);
        assert!(s.screen_shake() < shake);
        assert_eq!(s.screen_shake(), 0.0);
        assert!(s.particles().len() < before);
        assert!(s.particles().is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut store_a = MemoryStore::new();
        let mut store_b = MemoryStore::new();
        let mut a = playing(99, 0);
        let mut b = playing(99, 0);

        for frame in 0..600u32 {
            if frame % 40 == 0 {
                a.trigger();
                b.trigger();
            }
            tick(&mut a, &mut store_a);
            tick(&mut b, &mut store_b);
        }

        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.player.y, b.player.y);
        assert_eq!(a.obstacles.obstacles(), b.obstacles.obstacles());
        assert_eq!(a.particles().len(), b.particles().len());
    }
}
