//! Game state and entity collections
//!
//! One `GameState` lives for a whole session; there is no in-game restart.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::circle::{Circle, EntityId};
use super::spawn::background_particles;
use crate::config::Config;
use crate::consts::PLAYER_RADIUS;
use crate::platform::FrameHandle;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Frames tick and enemies spawn
    Running,
    /// Player was hit (terminal)
    GameOver,
}

/// Visible canvas area, measured once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score known at startup, raised at game over if beaten
    pub best_score: u64,
    /// Frames ticked so far
    pub time_ticks: u64,
    /// Fixed at the arena center, never moves
    pub player: Circle,
    /// In creation order
    pub projectiles: Vec<Circle>,
    pub enemies: Vec<Circle>,
    pub explosion_particles: Vec<Circle>,
    /// Decorative starfield (never changes after creation)
    pub background_particles: Vec<Circle>,
    /// Entities flagged this turn, removed by `flush_removals` on the next
    pub pending_removals: BTreeSet<EntityId>,
    /// Pending frame callback, cancelled at game over
    pub animation_handle: Option<FrameHandle>,
    pub rng: Pcg32,
    next_id: EntityId,
}

impl GameState {
    /// New session with the starfield laid out and the player centered
    pub fn new(seed: u64, arena: Arena, config: &Config, best_score: u64) -> Self {
        let mut state = Self::empty(seed, arena, config, best_score);
        state.background_particles =
            background_particles(&mut state.rng, &mut state.next_id, arena, config);
        state
    }

    /// Session without a starfield (headless runs, tests)
    pub fn empty(seed: u64, arena: Arena, config: &Config, best_score: u64) -> Self {
        let player = Circle::new(0, arena.center(), PLAYER_RADIUS, config.player.color.clone());
        Self {
            arena,
            phase: GamePhase::Running,
            score: 0,
            best_score,
            time_ticks: 0,
            player,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            explosion_particles: Vec::new(),
            background_particles: Vec::new(),
            pending_removals: BTreeSet::new(),
            animation_handle: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Flag an entity for removal on the next scheduling turn
    pub fn schedule_removal(&mut self, id: EntityId) {
        self.pending_removals.insert(id);
    }

    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removals.contains(&id)
    }

    /// Number of live (possibly pending) entities across mutable collections
    pub fn entity_count(&self) -> usize {
        self.projectiles.len() + self.enemies.len() + self.explosion_particles.len()
    }
}
