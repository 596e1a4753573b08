//! Per-frame game loop step
//!
//! A tick scores survival, repaints, advances every entity, resolves
//! collisions and flags removals. Flagged entities stay in their collection
//! until `flush_removals` runs on the next scheduling turn, so every pass in
//! a tick walks a collection whose length does not change under it.

use super::collision::detect_collision;
use super::spawn::spawn_explosion;
use super::state::{GamePhase, GameState};
use crate::config::Config;
use crate::platform::FrameHandle;
use crate::renderer::Surface;

/// Final tally handed to the driver when the player is hit
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub score: u64,
    /// `max(previous best, score)`
    pub best_score: u64,
    /// Score beat the previous best and should be persisted
    pub new_best: bool,
    /// Pending frame callback to cancel (taken from the state, so at most once)
    pub cancel_frame: Option<FrameHandle>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// False when the game was already over and nothing ran
    pub ticked: bool,
    /// Enemies shrunk
    pub hits: u32,
    /// Enemies destroyed
    pub destroyed: u32,
    pub game_over: Option<GameOverReport>,
}

/// Advance the game by one frame and draw it to `surface`
pub fn tick(state: &mut GameState, config: &Config, surface: &mut impl Surface) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if !state.is_running() {
        return outcome;
    }
    outcome.ticked = true;

    state.time_ticks += 1;
    state.score += config.score.survive;

    // Translucent fill fades the previous frame into a motion trail
    surface.set_fill_style(&config.background.color);
    surface.fill_rect(0.0, 0.0, state.arena.width, state.arena.height);

    state.player.draw(surface);

    update_projectiles(state, surface);
    let player_hit = update_enemies(state, config, surface, &mut outcome);
    update_explosions(state, config, surface);

    for star in &state.background_particles {
        star.draw(surface);
    }

    // The rest of the frame still resolves after the fatal collision, so
    // the final score includes it
    if player_hit {
        outcome.game_over = Some(finish(state));
    }

    outcome
}

/// Apply removals flagged during the previous tick. Returns how many
/// entities were dropped.
pub fn flush_removals(state: &mut GameState) -> usize {
    if state.pending_removals.is_empty() {
        return 0;
    }
    let pending = std::mem::take(&mut state.pending_removals);
    let before = state.entity_count();

    state.projectiles.retain(|p| !pending.contains(&p.id));
    state.enemies.retain(|e| !pending.contains(&e.id));
    state.explosion_particles.retain(|p| !pending.contains(&p.id));

    before - state.entity_count()
}

/// Move projectiles; flag the ones fully off screen
fn update_projectiles(state: &mut GameState, surface: &mut impl Surface) {
    let (width, height) = (state.arena.width, state.arena.height);
    let mut exited = Vec::new();

    for projectile in &mut state.projectiles {
        projectile.advance(surface);
        if projectile.is_outside(width, height) {
            exited.push(projectile.id);
        }
    }

    state.pending_removals.extend(exited);
}

/// Move enemies and resolve hits. Returns true if any enemy reached the player.
fn update_enemies(
    state: &mut GameState,
    config: &Config,
    surface: &mut impl Surface,
    outcome: &mut TickOutcome,
) -> bool {
    let mut player_hit = false;

    // Indexed: explosions are pushed to the state while enemies are walked.
    // Neither loop changes the length of the collection it iterates.
    for ei in 0..state.enemies.len() {
        state.enemies[ei].advance(surface);

        if detect_collision(&state.player, &state.enemies[ei]) {
            player_hit = true;
        }

        for pi in 0..state.projectiles.len() {
            if !detect_collision(&state.projectiles[pi], &state.enemies[ei]) {
                continue;
            }

            let projectile_id = state.projectiles[pi].id;
            let impact = state.projectiles[pi].pos;
            let enemy = &state.enemies[ei];
            let (enemy_id, radius, color) = (enemy.id, enemy.radius, enemy.color.clone());

            spawn_explosion(state, config, impact, radius, &color);

            if radius > config.enemy.min_radius {
                state.score += config.score.hit;
                state.enemies[ei].radius -= config.enemy.radius_reduction_per_hit;
                outcome.hits += 1;
            } else {
                state.score += config.score.destroy;
                state.schedule_removal(enemy_id);
                outcome.destroyed += 1;
                log::debug!("Enemy {} destroyed (score {})", enemy_id, state.score);
            }

            state.schedule_removal(projectile_id);
        }
    }

    player_hit
}

/// Fade explosion particles; flag the ones that are fully transparent
fn update_explosions(state: &mut GameState, config: &Config, surface: &mut impl Surface) {
    let decay = config.explosion.velocity_reduction_rate;
    let mut spent = Vec::new();

    for particle in &mut state.explosion_particles {
        if particle.alpha <= 0.0 {
            spent.push(particle.id);
        } else {
            particle.fade_out(surface, decay);
        }
    }

    state.pending_removals.extend(spent);
}

/// Enter the terminal phase and settle the best score
fn finish(state: &mut GameState) -> GameOverReport {
    state.phase = GamePhase::GameOver;

    let new_best = state.score > state.best_score;
    if new_best {
        state.best_score = state.score;
    }

    log::info!(
        "Game over after {} ticks: score {}, best {}",
        state.time_ticks,
        state.score,
        state.best_score
    );

    GameOverReport {
        score: state.score,
        best_score: state.best_score,
        new_best,
        cancel_frame: state.animation_handle.take(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FADE_STEP;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::circle::{Circle, EntityId};
    use crate::sim::spawn::{fire_projectile, generate_enemy};
    use crate::sim::state::Arena;
    use glam::Vec2;

    fn empty_state(best_score: u64) -> GameState {
        GameState::empty(12345, Arena::new(800.0, 600.0), &Config::default(), best_score)
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, radius: f32) -> EntityId {
        let id = state.next_entity_id();
        state.enemies.push(Circle::new(id, pos, radius, "hsl(200.0, 50%, 50%)"));
        id
    }

    fn add_projectile(state: &mut GameState, pos: Vec2) -> EntityId {
        let id = state.next_entity_id();
        state.projectiles.push(Circle::new(id, pos, 3.0, "white"));
        id
    }

    #[test]
    fn test_survival_score() {
        let config = Config::default();
        let mut state = empty_state(0);
        let mut surface = RecordingSurface::new();

        for _ in 0..5 {
            let outcome = tick(&mut state, &config, &mut surface);
            assert!(outcome.ticked);
        }
        assert_eq!(state.score, 5);
        assert_eq!(state.time_ticks, 5);
    }

    #[test]
    fn test_draw_order() {
        let config = Config::default();
        let mut state = empty_state(0);
        add_enemy(&mut state, Vec2::new(50.0, 50.0), 20.0);
        let mut surface = RecordingSurface::new();

        tick(&mut state, &config, &mut surface);

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
                color: "rgba(0, 0, 0, 0.1)".to_string(),
                alpha: 1.0,
            }
        );
        match &commands[1] {
            DrawCommand::Circle { center, radius, color, .. } => {
                assert_eq!(*center, Vec2::new(400.0, 300.0));
                assert_eq!(*radius, 10.0);
                assert_eq!(color, "white");
            }
            other => panic!("expected player, got {:?}", other),
        }
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_hit_shrinks_enemy() {
        let config = Config::default();
        let mut state = empty_state(0);
        let enemy_id = add_enemy(&mut state, Vec2::new(100.0, 100.0), 20.0);
        let projectile_id = add_projectile(&mut state, Vec2::new(105.0, 100.0));
        let mut surface = RecordingSurface::new();

        let outcome = tick(&mut state, &config, &mut surface);

        assert_eq!(outcome.hits, 1);
        assert_eq!(outcome.destroyed, 0);
        assert_eq!(state.score, 1 + 500);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].radius, 10.0);
        assert!(!state.is_pending_removal(enemy_id));
        assert_eq!(state.explosion_particles.len(), 40);

        // Projectile is only flagged this turn
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.is_pending_removal(projectile_id));

        assert_eq!(flush_removals(&mut state), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_hit_destroys_min_radius_enemy() {
        let config = Config::default();
        let mut state = empty_state(0);
        let enemy_id = add_enemy(&mut state, Vec2::new(100.0, 100.0), 10.0);
        let projectile_id = add_projectile(&mut state, Vec2::new(100.0, 108.0));
        let mut surface = RecordingSurface::new();

        let outcome = tick(&mut state, &config, &mut surface);

        assert_eq!(outcome.destroyed, 1);
        assert_eq!(state.score, 1 + 1000);
        assert!(state.is_pending_removal(enemy_id));
        assert!(state.is_pending_removal(projectile_id));
        assert_eq!(state.enemies.len(), 1);

        // Particles spawned this tick already faded once
        assert_eq!(state.explosion_particles.len(), 20);
        for particle in &state.explosion_particles {
            assert_eq!(particle.alpha, 1.0 - FADE_STEP);
        }

        assert_eq!(flush_removals(&mut state), 2);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosion_particles.len(), 20);
    }

    #[test]
    fn test_two_projectiles_same_tick() {
        let config = Config::default();
        let mut state = empty_state(0);
        let enemy_id = add_enemy(&mut state, Vec2::new(100.0, 100.0), 20.0);
        add_projectile(&mut state, Vec2::new(100.0, 100.0));
        add_projectile(&mut state, Vec2::new(104.0, 100.0));
        let mut surface = RecordingSurface::new();

        let outcome = tick(&mut state, &config, &mut surface);

        // First hit shrinks to the minimum, second destroys
        assert_eq!(outcome.hits, 1);
        assert_eq!(outcome.destroyed, 1);
        assert_eq!(state.score, 1 + 500 + 1000);
        assert!(state.is_pending_removal(enemy_id));
        assert_eq!(state.explosion_particles.len(), 40 + 20);
    }

    #[test]
    fn test_offscreen_projectile_removed_next_turn() {
        let config = Config::default();
        let mut state = empty_state(0);
        let gone = add_projectile(&mut state, Vec2::new(-10.0, 100.0));
        let kept = add_projectile(&mut state, Vec2::new(200.0, 100.0));
        let also_gone = add_projectile(&mut state, Vec2::new(200.0, 700.0));
        let mut surface = RecordingSurface::new();

        tick(&mut state, &config, &mut surface);

        assert_eq!(state.projectiles.len(), 3);
        assert!(state.is_pending_removal(gone));
        assert!(!state.is_pending_removal(kept));
        assert!(state.is_pending_removal(also_gone));

        assert_eq!(flush_removals(&mut state), 2);
        let ids: Vec<EntityId> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![kept]);
        assert!(state.pending_removals.is_empty());
    }

    #[test]
    fn test_spent_particle_flagged_not_moved() {
        let config = Config::default();
        let mut state = empty_state(0);
        let id = state.next_entity_id();
        state.explosion_particles.push(
            Circle::new(id, Vec2::new(30.0, 30.0), 2.0, "red")
                .with_velocity(Vec2::new(1.0, 1.0))
                .with_alpha(0.0),
        );
        let mut surface = RecordingSurface::new();

        tick(&mut state, &config, &mut surface);

        assert!(state.is_pending_removal(id));
        assert_eq!(state.explosion_particles[0].pos, Vec2::new(30.0, 30.0));
        assert_eq!(flush_removals(&mut state), 1);
        assert!(state.explosion_particles.is_empty());
    }

    #[test]
    fn test_game_over_sets_new_best() {
        let config = Config::default();
        let mut state = empty_state(0);
        state.animation_handle = Some(FrameHandle(7));
        add_enemy(&mut state, Vec2::new(420.0, 300.0), 15.0);
        let mut surface = RecordingSurface::new();

        let outcome = tick(&mut state, &config, &mut surface);

        let report = outcome.game_over.expect("player should be hit");
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(report.score, 1);
        assert_eq!(report.best_score, 1);
        assert!(report.new_best);
        assert_eq!(report.cancel_frame, Some(FrameHandle(7)));
        assert_eq!(state.animation_handle, None);
    }

    #[test]
    fn test_game_over_keeps_higher_best() {
        let config = Config::default();
        let mut state = empty_state(5000);
        add_enemy(&mut state, Vec2::new(400.0, 310.0), 20.0);
        let mut surface = RecordingSurface::new();

        let report = tick(&mut state, &config, &mut surface).game_over.unwrap();

        assert_eq!(report.score, 1);
        assert_eq!(report.best_score, 5000);
        assert!(!report.new_best);
        assert_eq!(state.best_score, 5000);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let config = Config::default();
        let mut state = empty_state(0);
        state.animation_handle = Some(FrameHandle(3));
        add_enemy(&mut state, Vec2::new(400.0, 300.0), 20.0);
        let mut surface = RecordingSurface::new();

        assert!(tick(&mut state, &config, &mut surface).game_over.is_some());
        state.animation_handle = Some(FrameHandle(4));
        surface.clear();

        let outcome = tick(&mut state, &config, &mut surface);
        assert!(!outcome.ticked);
        assert_eq!(outcome.game_over, None);
        assert_eq!(state.score, 1);
        assert!(surface.commands().is_empty());
        // Nothing new to cancel
        assert_eq!(state.animation_handle, Some(FrameHandle(4)));
    }

    #[test]
    fn test_final_frame_hits_count() {
        let config = Config::default();
        let mut state = empty_state(0);
        add_enemy(&mut state, Vec2::new(400.0, 300.0), 10.0);
        add_projectile(&mut state, Vec2::new(400.0, 300.0));
        let mut surface = RecordingSurface::new();

        let report = tick(&mut state, &config, &mut surface).game_over.unwrap();
        assert_eq!(report.score, 1 + 1000);
        assert_eq!(state.best_score, 1001);
    }

    #[test]
    fn test_background_untouched() {
        let config = Config::default();
        let mut state = GameState::new(99, Arena::new(640.0, 480.0), &config, 0);
        let stars = state.background_particles.clone();
        let mut surface = RecordingSurface::new();

        for _ in 0..10 {
            tick(&mut state, &config, &mut surface);
            flush_removals(&mut state);
        }

        assert_eq!(state.background_particles, stars);
        // Each frame ends with the starfield
        let commands = surface.commands();
        let last = &commands[commands.len() - 1];
        let star = &stars[stars.len() - 1];
        assert_eq!(
            *last,
            DrawCommand::Circle {
                center: star.pos,
                radius: star.radius,
                color: star.color.clone(),
                alpha: star.alpha,
            }
        );
    }

    #[test]
    fn test_projectile_kills_inbound_enemy() {
        let config = Config::default();
        let mut state = empty_state(0);
        let enemy_id = add_enemy(&mut state, Vec2::new(400.0, 150.0), 10.0);
        state.enemies[0].vel = Vec2::new(0.0, 1.0);
        fire_projectile(&mut state, &config, Vec2::new(400.0, 0.0));
        let mut surface = RecordingSurface::discarding();

        let mut destroyed = 0;
        for _ in 0..60 {
            destroyed += tick(&mut state, &config, &mut surface).destroyed;
            flush_removals(&mut state);
        }

        assert_eq!(destroyed, 1);
        assert!(state.enemies.iter().all(|e| e.id != enemy_id));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let config = Config::default();
        let arena = Arena::new(800.0, 600.0);
        let mut state1 = GameState::new(99999, arena, &config, 0);
        let mut state2 = GameState::new(99999, arena, &config, 0);
        let mut surface = RecordingSurface::discarding();

        for frame in 0..240 {
            for state in [&mut state1, &mut state2] {
                if frame % 60 == 0 {
                    generate_enemy(state, &config);
                }
                if frame % 20 == 0 {
                    fire_projectile(state, &config, Vec2::new(0.0, frame as f32 * 2.0));
                }
                tick(state, &config, &mut surface);
                flush_removals(state);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.projectiles, state2.projectiles);
        assert_eq!(state1.explosion_particles, state2.explosion_particles);
    }
}
