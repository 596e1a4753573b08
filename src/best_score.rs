//! Best score persistence
//!
//! A single scalar under `consts::BEST_SCORE_KEY`, read once at startup and
//! written at game over when beaten.

use crate::consts::BEST_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Parse a stored best score. Negative or non-numeric values are rejected.
pub fn parse(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<u64>() {
        return Some(score);
    }
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() && score >= 0.0 => Some(score as u64),
        _ => None,
    }
}

/// Load the persisted best score (0 if missing or malformed)
pub fn load(store: &impl KeyValueStore) -> u64 {
    let Some(raw) = store.get(BEST_SCORE_KEY) else {
        return 0;
    };
    parse(&raw).unwrap_or_else(|| {
        log::warn!("Ignoring malformed best score {:?}", raw);
        0
    })
}

/// Persist `score` if it beats what is stored. Returns true when written.
pub fn save_if_better(store: &mut impl KeyValueStore, score: u64) -> bool {
    if score <= load(&*store) {
        return false;
    }
    store.set(BEST_SCORE_KEY, &score.to_string());
    log::info!("New best score saved: {}", score);
    true
}
