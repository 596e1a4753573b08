//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a session replays from its seed
//! - Stable iteration order (creation order)
//! - Removals are deferred, never applied mid-iteration
//! - Drawing goes through `renderer::Surface`, no platform dependencies

pub mod circle;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use circle::{Circle, EntityId};
pub use collision::detect_collision;
pub use spawn::{enemy_radius, fire_projectile, generate_enemy, spawn_explosion};
pub use state::{Arena, GamePhase, GameState};
pub use tick::{GameOverReport, TickOutcome, flush_removals, tick};
