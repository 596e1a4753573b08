//! Entity creation: enemies, projectiles, explosions and the starfield

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::circle::{Circle, EntityId};
use super::state::{Arena, GameState};
use crate::config::{Config, EnemyConfig};
use crate::direction_toward;

/// Enemy radius for the current score
///
/// Fixed at the midpoint until the score passes the threshold, then uniform
/// in `[min_radius, max_radius]`.
pub fn enemy_radius(score: u64, enemy: &EnemyConfig, rng: &mut Pcg32) -> f32 {
    if score <= enemy.randomized_size_threshold {
        return enemy.midpoint_radius();
    }
    if enemy.max_radius <= enemy.min_radius {
        return enemy.min_radius;
    }
    rng.random_range(enemy.min_radius..=enemy.max_radius)
}

/// Spawn point just beyond one of the four edges
///
/// Half the time the enemy enters from the left/right at a random height,
/// otherwise from the top/bottom at a random width. It sits exactly one
/// radius outside the visible area.
pub fn spawn_position(rng: &mut Pcg32, arena: Arena, radius: f32) -> Vec2 {
    let rand_x: f32 = rng.random();
    let rand_y: f32 = rng.random();

    let mut x = rand_x * arena.width;
    let mut y = rand_y * arena.height;

    if rng.random_bool(0.5) {
        x = if rand_x < 0.5 { -radius } else { arena.width + radius };
    } else {
        y = if rand_y < 0.5 { -radius } else { arena.height + radius };
    }

    Vec2::new(x, y)
}

/// Append a new enemy drifting toward the center
///
/// Velocity is a unit vector: every enemy drifts at the same speed
/// regardless of size or score. No-op after game over.
pub fn generate_enemy(state: &mut GameState, config: &Config) -> Option<EntityId> {
    if !state.is_running() {
        return None;
    }

    let radius = enemy_radius(state.score, &config.enemy, &mut state.rng);
    let pos = spawn_position(&mut state.rng, state.arena, radius);
    let vel = direction_toward(pos, state.arena.center());
    let hue: f32 = state.rng.random_range(0.0..360.0);

    let id = state.next_entity_id();
    state.enemies.push(
        Circle::new(id, pos, radius, format!("hsl({:.1}, 50%, 50%)", hue)).with_velocity(vel),
    );
    Some(id)
}

/// Fire a projectile from the center toward `target` (screen coordinates)
///
/// Ignored after game over.
pub fn fire_projectile(state: &mut GameState, config: &Config, target: Vec2) -> Option<EntityId> {
    if !state.is_running() {
        return None;
    }

    let origin = state.arena.center();
    let vel = direction_toward(origin, target) * config.projectile.speed;
    let id = state.next_entity_id();
    state.projectiles.push(
        Circle::new(id, origin, config.projectile.radius, config.player.color.clone())
            .with_velocity(vel),
    );
    Some(id)
}

/// Burst of `ceil(2 * enemy_radius)` particles at `at`, in the enemy's color
///
/// Returns how many were spawned.
pub fn spawn_explosion(
    state: &mut GameState,
    config: &Config,
    at: Vec2,
    enemy_radius: f32,
    color: &str,
) -> usize {
    let count = (enemy_radius * 2.0).ceil().max(0.0) as usize;
    let explosion = &config.explosion;

    for _ in 0..count {
        let radius = state.rng.random::<f32>() * explosion.max_radius;
        let vx = (state.rng.random::<f32>() - 0.5)
            * (state.rng.random::<f32>() * explosion.max_explosion_size);
        let vy = (state.rng.random::<f32>() - 0.5)
            * (state.rng.random::<f32>() * explosion.max_explosion_size);

        let id = state.next_entity_id();
        state
            .explosion_particles
            .push(Circle::new(id, at, radius, color).with_velocity(Vec2::new(vx, vy)));
    }

    count
}

/// Static starfield scattered across the arena
pub fn background_particles(
    rng: &mut Pcg32,
    next_id: &mut EntityId,
    arena: Arena,
    config: &Config,
) -> Vec<Circle> {
    let stars = &config.background_particles;
    (0..stars.total)
        .map(|_| {
            let pos = Vec2::new(
                rng.random::<f32>() * arena.width,
                rng.random::<f32>() * arena.height,
            );
            let radius = stars.max_radius * rng.random::<f32>();
            let color = stars
                .colors
                .choose(rng)
                .map(String::as_str)
                .unwrap_or("white");

            let id = *next_id;
            *next_id += 1;
            Circle::new(id, pos, radius, color).with_alpha(stars.initial_alpha)
        })
        .collect()
}
