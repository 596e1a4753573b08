//! Nova Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, PointerEvent};

    use nova_shooter::Config;
    use nova_shooter::best_score;
    use nova_shooter::consts::SPAWN_INTERVAL_MS;
    use nova_shooter::persistence::LocalStore;
    use nova_shooter::platform::{IntervalHandle, web};
    use nova_shooter::renderer::CanvasSurface;
    use nova_shooter::sim::{
        Arena, GameState, TickOutcome, fire_projectile, flush_removals, generate_enemy, tick,
    };

    /// Game instance holding all state and its browser collaborators
    struct Game {
        state: GameState,
        config: Config,
        surface: CanvasSurface,
        store: LocalStore,
        score_el: Element,
        best_score_el: Element,
        spawn_timer: Option<IntervalHandle>,
    }

    impl Game {
        /// Run one tick and push the score to the page
        fn frame(&mut self) -> TickOutcome {
            let outcome = tick(&mut self.state, &self.config, &mut self.surface);
            if outcome.ticked {
                self.score_el
                    .set_text_content(Some(&self.state.score.to_string()));
            }
            outcome
        }

        fn show_best_score(&self) {
            self.best_score_el
                .set_text_content(Some(&self.state.best_score.to_string()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Nova Shooter starting...");

        let window = web::window()?;
        let document = web::document()?;
        let (canvas, ctx) = web::require_canvas(&document)?;
        let score_el = web::require_element(&document, "#score")?;
        let best_score_el = web::require_element(&document, "#best-score")?;

        // Fill the viewport; measured once, resizes are not tracked
        let width = window.inner_width()?.as_f64().unwrap_or_default();
        let height = window.inner_height()?.as_f64().unwrap_or_default();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let config = Config::load();
        let store = LocalStore::open();
        let best = best_score::load(&store);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, Arena::new(width as f32, height as f32), &config, best);
        log::info!(
            "Game initialized: {}x{}, seed {}, best score {}",
            width,
            height,
            seed,
            best
        );

        let mut surface = CanvasSurface::new(ctx);
        state.player.draw(&mut surface);

        let game = Rc::new(RefCell::new(Game {
            state,
            config,
            surface,
            store,
            score_el,
            best_score_el,
            spawn_timer: None,
        }));
        game.borrow().show_best_score();

        setup_input_handlers(&window, game.clone())?;
        start_spawn_timer(game.clone());

        game_loop(game);

        log::info!("Nova Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let g = &mut *game.borrow_mut();
            let target = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            if fire_projectile(&mut g.state, &g.config, target).is_none() {
                log::debug!("Ignoring pointer input after game over");
            }
        });
        window.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start_spawn_timer(game: Rc<RefCell<Game>>) {
        let timer_game = game.clone();
        let handle = web::set_interval(
            move || {
                let g = &mut *timer_game.borrow_mut();
                generate_enemy(&mut g.state, &g.config);
            },
            SPAWN_INTERVAL_MS,
        );
        game.borrow_mut().spawn_timer = handle;
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        // Schedule the successor first so game over can cancel it
        let next = game.clone();
        let handle = web::request_animation_frame(move |_time: f64| game_loop(next));

        let g = &mut *game.borrow_mut();
        g.state.animation_handle = handle;

        let outcome = g.frame();

        if let Some(report) = outcome.game_over {
            if let Some(frame) = report.cancel_frame {
                web::cancel_animation_frame(frame);
            }
            if let Some(timer) = g.spawn_timer.take() {
                web::clear_interval(timer);
            }
            if report.new_best {
                best_score::save_if_better(&mut g.store, report.score);
                g.show_best_score();
            }
        }

        // Removals flagged this frame apply once the current pass is done
        if !g.state.pending_removals.is_empty() {
            let game = game.clone();
            web::defer(move || {
                flush_removals(&mut game.borrow_mut().state);
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cmp::Ordering;

    use glam::Vec2;

    use nova_shooter::Config;
    use nova_shooter::best_score;
    use nova_shooter::persistence::MemoryStore;
    use nova_shooter::renderer::RecordingSurface;
    use nova_shooter::sim::{
        Arena, GameState, fire_projectile, flush_removals, generate_enemy, tick,
    };

    /// 1000 ms spawn cadence at 60 fps
    const TICKS_PER_SPAWN: u64 = 60;
    /// Auto-fire cadence
    const TICKS_PER_SHOT: u64 = 15;
    pub const DEFAULT_TICKS: u64 = 3600;
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Closest live enemy to the player
    fn nearest_enemy(state: &GameState) -> Option<Vec2> {
        let center = state.arena.center();
        state
            .enemies
            .iter()
            .filter(|e| !state.is_pending_removal(e.id))
            .min_by(|a, b| {
                a.pos
                    .distance(center)
                    .partial_cmp(&b.pos.distance(center))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|e| e.pos)
    }

    /// Scripted session: periodic spawns, auto-aimed shots
    pub fn run(max_ticks: u64, seed: u64) {
        let config = Config::load();
        let mut store = MemoryStore::new();
        let best = best_score::load(&store);

        let mut state = GameState::new(seed, Arena::new(800.0, 600.0), &config, best);
        let mut surface = RecordingSurface::discarding();
        state.player.draw(&mut surface);

        let mut hits = 0;
        let mut destroyed = 0;

        for frame in 0..max_ticks {
            if frame % TICKS_PER_SPAWN == 0 {
                generate_enemy(&mut state, &config);
            }
            if frame % TICKS_PER_SHOT == 0 {
                if let Some(target) = nearest_enemy(&state) {
                    fire_projectile(&mut state, &config, target);
                }
            }

            let outcome = tick(&mut state, &config, &mut surface);
            hits += outcome.hits;
            destroyed += outcome.destroyed;
            flush_removals(&mut state);

            if let Some(report) = outcome.game_over {
                if report.new_best {
                    best_score::save_if_better(&mut store, report.score);
                }
                break;
            }
        }

        log::info!(
            "Session finished after {} ticks ({:?}): {} hits, {} destroyed",
            state.time_ticks,
            state.phase,
            hits,
            destroyed
        );
        println!(
            "ticks: {}  score: {}  best: {}  enemies left: {}",
            state.time_ticks,
            state.score,
            best_score::load(&store).max(state.best_score),
            state.enemies.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let max_ticks = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(headless::DEFAULT_TICKS);
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(headless::DEFAULT_SEED);

    log::info!("Nova Shooter (native) starting headless session...");
    log::info!("Run with `trunk serve` for the playable web version");

    headless::run(max_ticks, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
