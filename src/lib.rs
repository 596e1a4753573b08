//! Nova Shooter - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, frame tick)
//! - `renderer`: Render surface abstraction (canvas on web, recording elsewhere)
//! - `platform`: Browser scheduling primitives and startup checks
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `config`: Data-driven game balance

pub mod best_score;
pub mod config;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::Config;

use glam::Vec2;

/// Fixed game constants (not player-tunable)
pub mod consts {
    /// Player disc radius
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Alpha lost per `fade_out` call
    pub const FADE_STEP: f32 = 0.01;

    /// Circles collide when the gap between their edges is below this
    pub const COLLISION_TOLERANCE: f32 = 1.0;

    /// Wall-clock cadence of enemy spawns
    pub const SPAWN_INTERVAL_MS: i32 = 1000;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "bestScore";
}

/// Unit vector pointing from `from` toward `to`
///
/// Built from the angle rather than by normalizing, so coincident points
/// still yield a valid direction (+x).
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}
