//! Flappy Rat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flappy_rat::consts::*;
    use flappy_rat::platform::input::{intent_for_key, intent_for_pointer, should_prevent_default};
    use flappy_rat::platform::storage::LocalStorageStore;
    use flappy_rat::sim::{GamePhase, PlayArea};
    use flappy_rat::{LoopControl, Renderer, Session, Snapshot};

    /// Height of the decorative floor strip
    const FLOOR_HEIGHT: f64 = 48.0;

    /// Canvas2D renderer for snapshots
    struct CanvasRenderer {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        fn new(canvas: HtmlCanvasElement) -> Option<Self> {
            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            Some(Self { canvas, ctx })
        }

        /// Sync the backing store with the CSS size; `None` while layout isn't ready
        fn measure(&self) -> Option<PlayArea> {
            let w = self.canvas.client_width();
            let h = self.canvas.client_height();
            if w <= 0 || h <= 0 {
                return None;
            }
            if self.canvas.width() != w as u32 || self.canvas.height() != h as u32 {
                self.canvas.set_width(w as u32);
                self.canvas.set_height(h as u32);
            }
            PlayArea::new(w as f32, h as f32)
        }

        /// Repeating tent silhouettes, `tile` px wide
        fn draw_tents(&self, offset: f64, tile: f64, peak: f64, color: &str) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            ctx.set_fill_style_str(color);
            let mut x = offset.rem_euclid(tile) - tile;
            while x < w {
                ctx.begin_path();
                ctx.move_to(x, h);
                ctx.line_to(x + tile / 2.0, h - peak);
                ctx.line_to(x + tile, h);
                ctx.close_path();
                ctx.fill();
                x += tile;
            }
        }

        /// Bunting flags along the top
        fn draw_bunting(&self, offset: f64) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let mut x = offset.rem_euclid(100.0) - 100.0;
            let mut red = true;
            while x < w {
                ctx.set_fill_style_str(if red { "#ef4444" } else { "#3b82f6" });
                ctx.begin_path();
                ctx.move_to(x, 60.0);
                ctx.line_to(x + 25.0, 85.0);
                ctx.line_to(x + 50.0, 60.0);
                ctx.close_path();
                ctx.fill();
                x += 50.0;
                red = !red;
            }
        }

        fn draw_obstacle(&self, x: f64, gap_top: f64, gap_bottom: f64) {
            let ctx = &self.ctx;
            let h = self.canvas.height() as f64;
            let body_w = PIPE_WIDTH as f64;
            let cap_w = PIPE_CAP_WIDTH as f64;
            let cap_h = PIPE_CAP_HEIGHT as f64;
            let cap_x = x - (cap_w - body_w) / 2.0;

            ctx.set_fill_style_str("#ef4444");
            ctx.fill_rect(x, 0.0, body_w, (gap_top - cap_h).max(0.0));
            ctx.fill_rect(x, gap_bottom + cap_h, body_w, (h - gap_bottom - cap_h).max(0.0));

            ctx.set_fill_style_str("#facc15");
            ctx.fill_rect(cap_x, gap_top - cap_h, cap_w, cap_h);
            ctx.fill_rect(cap_x, gap_bottom, cap_w, cap_h);
        }

        fn draw_character(&self, y: f64, rotation_deg: f64, phase: u8) {
            let ctx = &self.ctx;
            let size = RAT_SIZE as f64;
            let half = size / 2.0;

            ctx.save();
            if ctx.translate(RAT_X_OFFSET as f64 + half, y + half).is_err()
                || ctx.rotate(rotation_deg * PI / 180.0).is_err()
            {
                ctx.restore();
                return;
            }

            // Body
            ctx.set_fill_style_str("#a1a1aa");
            ctx.fill_rect(-half + 6.0, -half + 10.0, size - 10.0, size - 20.0);
            // Ear
            ctx.set_fill_style_str("#f472b6");
            ctx.fill_rect(4.0, -half + 4.0, 8.0, 8.0);
            // Legs swap between the two run frames
            let (front, back) = if phase == 0 { (6.0, -8.0) } else { (10.0, -12.0) };
            ctx.fill_rect(front, half - 10.0, 3.0, 6.0);
            ctx.fill_rect(back, half - 10.0, 3.0, 6.0);
            // Clown nose
            ctx.set_fill_style_str("#ef4444");
            ctx.fill_rect(half - 6.0, -2.0, 6.0, 6.0);

            ctx.restore();
        }

        fn draw_floor(&self, offset: f64) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            let top = h - FLOOR_HEIGHT;

            ctx.set_fill_style_str("#fde047");
            ctx.fill_rect(0.0, top, w, FLOOR_HEIGHT);
            ctx.set_fill_style_str("#d97706");
            let mut x = offset.rem_euclid(40.0) - 40.0;
            while x < w {
                ctx.fill_rect(x, top, 20.0, 20.0);
                ctx.fill_rect(x + 20.0, top + 20.0, 20.0, 20.0);
                x += 40.0;
            }
        }
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            let [far, mid, floor] = snapshot.parallax_offsets().map(f64::from);

            self.ctx.set_fill_style_str("#312e81");
            self.ctx.fill_rect(0.0, 0.0, w, h);

            self.draw_tents(far, 400.0, 150.0, "#3730a3");
            self.draw_bunting(mid);

            for o in &snapshot.obstacles {
                self.draw_obstacle(o.x as f64, o.gap_top as f64, o.gap_bottom() as f64);
            }

            self.draw_character(
                snapshot.character_y as f64,
                snapshot.character_rotation as f64,
                snapshot.animation_phase,
            );
            self.draw_floor(floor);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: CanvasRenderer,
        /// Pending requestAnimationFrame handle
        raf_handle: Option<i32>,
    }

    /// Show/hide overlays and update the score text
    fn update_hud(document: &Document, snapshot: &Snapshot) {
        let set_visible = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        };
        let set_text = |id: &str, text: &str| {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };

        set_visible("score", snapshot.show_hud());
        set_visible("start-screen", snapshot.phase == GamePhase::Start);
        set_visible("game-over-screen", snapshot.phase == GamePhase::GameOver);

        let score = snapshot.score.to_string();
        set_text("score", &score);
        set_text("final-score", &score);
        set_text("best-score", &snapshot.high_score.to_string());
    }

    fn render(game: &mut Game) {
        let snapshot = game.session.snapshot();
        game.renderer.render(&snapshot);
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            update_hud(&document, &snapshot);
        }
    }

    /// Request the next frame unless one is already pending
    fn schedule(game: &Rc<RefCell<Game>>) {
        if game.borrow().raf_handle.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let g = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(g);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => {
                game.borrow_mut().raf_handle = Some(handle);
                closure.forget();
            }
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Drop any pending frame so nothing ticks after the run is over
    fn cancel(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().raf_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.raf_handle = None;

            let area = g.renderer.measure();
            let control = g.session.frame(area);
            // A skipped tick renders nothing either
            if area.is_some() {
                render(&mut g);
            }
            control == LoopControl::Continue || g.session.wants_frames()
        };

        if keep_going {
            schedule(&game);
        } else {
            cancel(&game);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let Some(intent) = intent_for_key(&code) else {
                    return;
                };
                if should_prevent_default(&code) {
                    event.prevent_default();
                }
                let wants_frames = {
                    let mut g = game.borrow_mut();
                    g.session.push(intent);
                    g.session.wants_frames()
                };
                if wants_frames {
                    schedule(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer / touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().session.push(intent_for_pointer());
                schedule(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start / restart buttons
        let Some(document) = window.document() else {
            return;
        };
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.stop_propagation();
                    game.borrow_mut().session.push(flappy_rat::Intent::Start);
                    schedule(&game);
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy Rat starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas element #canvas not found");
            return;
        };
        let Some(renderer) = CanvasRenderer::new(canvas.clone()) else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, LocalStorageStore::new());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            raf_handle: None,
        }));

        {
            let mut g = game.borrow_mut();
            if g.renderer.measure().is_some() {
                render(&mut g);
            }
        }

        setup_input_handlers(&canvas, game);
        log::info!("Flappy Rat running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_rat::sim::{GamePhase, PlayArea};
    use flappy_rat::{Intent, LoopControl, MemoryStore, Session};

    /// Safety cap so a perfect autopilot run still terminates
    const MAX_FRAMES_PER_RUN: u64 = 100_000;

    env_logger::init();
    log::info!("Flappy Rat (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    // Usage: flappy-rat [seed] [runs]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(3u32);

    let area = PlayArea::new(400.0, 600.0);
    let mut session = Session::new(seed, MemoryStore::new());
    session.push(Intent::ToggleAutopilot);
    log::info!("Seed {}, {} runs", seed, runs);

    for run in 1..=runs {
        let mut frames = 0u64;
        while frames < MAX_FRAMES_PER_RUN && session.frame(area) == LoopControl::Continue {
            frames += 1;
        }

        let snapshot = session.snapshot();
        log::info!(
            "Run {}: score {} after {} frames (best {})",
            run,
            snapshot.score,
            frames,
            snapshot.high_score
        );
        if snapshot.phase == GamePhase::Playing {
            log::info!("Autopilot still flying after {} frames, stopping demo", frames);
            break;
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
    }
}
