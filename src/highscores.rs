//! High score bookkeeping
//!
//! A single best score, stored as a decimal string. Storage problems degrade
//! to "no high score yet" and are only logged.

use crate::persistence::KeyValueStore;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "gravity-switcher-high-score";

/// Outcome of offering a final score to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    /// The score was written as the new best
    pub saved: bool,
    /// Best score as read back from the store
    pub best: u64,
}

/// Load the stored high score; anything unreadable counts as 0
pub fn load_high_score<S: KeyValueStore + ?Sized>(store: &S) -> u64 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(raw)) => match raw.trim().parse::<u64>() {
            Ok(score) => score,
            Err(_) => {
                log::warn!("Ignoring malformed high score {raw:?}");
                0
            }
        },
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Could not read high score: {e}");
            0
        }
    }
}

/// Persist `score` if it beats the stored best, then re-read the best
pub fn record_score<S: KeyValueStore + ?Sized>(store: &mut S, score: u64) -> Recorded {
    let previous = load_high_score(&*store);
    let mut saved = false;

    if score > previous {
        match store.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => {
                log::info!("New high score saved: {score}");
                saved = true;
            }
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
    }

    Recorded {
        saved,
        best: load_high_score(&*store),
    }
}
