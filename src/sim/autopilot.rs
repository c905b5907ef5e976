//! Idle/demo mode - a simple policy that plays the game through `trigger`

use super::state::{GamePhase, GameSession};
use crate::consts::{FLIP_POWER, GAP_SIZE, GRAVITY};

/// Slack kept between the player and the gap edges
const GAP_PADDING: f32 = 8.0;

/// Distance the body keeps travelling after a flip before turning around.
/// A flip resets speed to |FLIP_POWER| against the new pull, so this is fixed.
fn turnaround() -> f32 {
    FLIP_POWER * FLIP_POWER / (2.0 * GRAVITY)
}

/// Self-running demo: start runs from the title screen, leave game over once
/// the crash shake has died down, and steer in between.
pub fn should_trigger(session: &GameSession) -> bool {
    match session.phase() {
        GamePhase::Start => true,
        GamePhase::Playing => should_flip(session),
        GamePhase::GameOver => session.screen_shake() == 0.0,
    }
}

/// Decide whether to flip this tick.
///
/// Aims the player's box at the next uncleared gap (or a virtual gap in the
/// middle of the screen when none is on its way) and flips as soon as the
/// post-flip turnaround would reach the far edge of that band.
pub fn should_flip(session: &GameSession) -> bool {
    if session.phase() != GamePhase::Playing {
        return false;
    }

    let player = &session.player;
    let (gap_top, gap_bottom) = session
        .obstacles
        .obstacles()
        .iter()
        .find(|o| o.right() >= player.x)
        .map(|o| (o.gap_top, o.gap_bottom()))
        .unwrap_or_else(|| {
            let top = (session.viewport().height - GAP_SIZE) / 2.0;
            (top, top + GAP_SIZE)
        });

    let low = gap_top + GAP_PADDING;
    let high = gap_bottom - player.height - GAP_PADDING;

    if player.gravity.sign() > 0.0 {
        player.y + turnaround() >= high
    } else {
        player.y - turnaround() <= low
    }
}
