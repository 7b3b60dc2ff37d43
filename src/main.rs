//! Sandbag Siege entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build owns input capture, the HUD, and frame scheduling; actual
//! drawing is delegated to a `renderFrame` hook on the host page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use sandbag_siege::consts::*;
    use sandbag_siege::sim::{GameState, MatchPhase, TickInput, drag_to_throw, tick};
    use sandbag_siege::ui::{self, FrameSnapshot};
    use sandbag_siege::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Pointer position where the current drag started, if any
        drag_start: Option<Vec2>,
        /// Pending animation frame, for cancellation on tab-hide
        raf_id: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase for end-of-match bookkeeping
        last_phase: MatchPhase,
        highscores: HighScores,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                drag_start: None,
                raf_id: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: MatchPhase::Menu,
                highscores: HighScores::load(),
                settings: Settings::load(),
            }
        }

        /// Run simulation ticks for this paint
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.ultimate = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            // Record finished matches once, on the transition out of Playing
            let phase = self.state.phase;
            if phase != self.last_phase {
                if self.last_phase == MatchPhase::Playing
                    && matches!(phase, MatchPhase::Victory | MatchPhase::Defeat)
                {
                    let victory = phase == MatchPhase::Victory;
                    if let Some(rank) = self.highscores.record_match(
                        self.state.score,
                        self.state.frames,
                        victory,
                        js_sys::Date::now(),
                    ) {
                        log::info!("Run placed #{} on the leaderboard", rank);
                    }
                    self.highscores.save();
                }
                self.last_phase = phase;
            }
        }

        /// Hand this frame's snapshot to the host renderer, when one exists
        fn dispatch_frame(&self) {
            let snapshot = FrameSnapshot::capture(&self.state);
            let Ok(json) = serde_json::to_string(&snapshot) else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Ok(hook) = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("renderFrame")) {
                if let Some(func) = hook.dyn_ref::<js_sys::Function>() {
                    let _ = func.call1(&JsValue::NULL, &JsValue::from_str(&json));
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let set = |selector: &str, value: String| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(&value));
                }
            };

            set("#hud-health .hud-value", self.state.player_health.to_string());
            set("#hud-enemies .hud-value", self.state.enemies.len().to_string());
            set("#hud-score .hud-value", self.state.score.to_string());
            set("#hud-time .hud-value", ui::format_elapsed(self.state.frames));
            set(
                "#hud-throw .hud-value",
                if self.state.throw_cooldown == 0 {
                    "Ready".to_string()
                } else {
                    format!("{}s", ui::cooldown_secs(self.state.throw_cooldown))
                },
            );
            set(
                "#hud-ultimate .hud-value",
                ui::ultimate_label(self.state.ultimate_charge, self.state.ultimate_cooldown),
            );
            if self.settings.show_fps {
                set("#hud-fps .hud-value", self.fps.to_string());
            }

            // Phase-driven overlay visibility
            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("menu", self.state.phase == MatchPhase::Menu);
            show("hud", self.state.phase == MatchPhase::Playing);
            show(
                "match-over",
                matches!(self.state.phase, MatchPhase::Victory | MatchPhase::Defeat),
            );

            if matches!(self.state.phase, MatchPhase::Victory | MatchPhase::Defeat) {
                if let Some(el) = document.get_element_by_id("match-over-title") {
                    el.set_text_content(Some(if self.state.phase == MatchPhase::Victory {
                        "Victory!"
                    } else {
                        "Defeat!"
                    }));
                }
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }

        /// Finish a drag gesture at the given pointer position
        fn release_drag(&mut self, pointer: Vec2) {
            if self.drag_start.take().is_some() {
                if let Some((dir, power)) = drag_to_throw(self.state.player.center(), pointer) {
                    self.state.throw_sandbag(dir, power);
                }
            }
            self.input.aim = None;
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sandbag Siege starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_visibility_handler(game.clone());

        request_animation_frame(game);

        log::info!("Sandbag Siege running!");
    }

    fn pointer_pos(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - start a throw drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != MatchPhase::Playing {
                    return;
                }
                let pos =
                    pointer_pos(&canvas_clone, event.client_x() as f32, event.client_y() as f32);
                g.drag_start = Some(pos);
                g.input.aim = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - update the aim line while dragging
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.drag_start.is_none() || g.state.phase != MatchPhase::Playing {
                    return;
                }
                let pos =
                    pointer_pos(&canvas_clone, event.client_x() as f32, event.client_y() as f32);
                g.input.aim = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave - release the throw
        for event_name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos =
                    pointer_pos(&canvas_clone, event.client_x() as f32, event.client_y() as f32);
                g.release_drag(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move / end mirror the mouse drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if g.state.phase != MatchPhase::Playing {
                        return;
                    }
                    let pos = pointer_pos(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                    g.drag_start = Some(pos);
                    g.input.aim = Some(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if g.drag_start.is_none() {
                        return;
                    }
                    let pos = pointer_pos(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                    g.input.aim = Some(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                // touchend carries no position; release at the last aim point
                if let Some(pointer) = g.input.aim {
                    g.release_drag(pointer);
                } else {
                    g.drag_start = None;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "u" | "U" => g.input.ultimate = true,
                    "Enter" => {
                        if g.state.phase != MatchPhase::Playing {
                            g.state.start_match();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Start (menu) and play-again (end screens) both launch a fresh match
        for id in ["start-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().state.start_match();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("back-to-menu-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.return_to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("ultimate-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.use_ultimate();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cancel the pending frame while the tab is hidden so no stray step
    /// runs in the background; resume scheduling when it becomes visible.
    fn setup_visibility_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            if hidden {
                let mut g = game.borrow_mut();
                if let Some(id) = g.raf_id.take() {
                    let _ = web_sys::window().unwrap().cancel_animation_frame(id);
                    log::info!("Paused frame scheduling (tab hidden)");
                }
            } else {
                let resume = {
                    let mut g = game.borrow_mut();
                    // Reset the clock so the hidden interval isn't simulated
                    g.last_time = 0.0;
                    g.raf_id.is_none()
                };
                if resume {
                    request_animation_frame(game.clone());
                    log::info!("Resumed frame scheduling");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().raf_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.raf_id = None;

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.dispatch_frame();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sandbag Siege (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a short unattended match to confirm the sim behaves end to end
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use glam::Vec2;
    use sandbag_siege::sim::{GameState, TickInput, tick};

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = GameState::new(seed);
    state.start_match();

    let input = TickInput::default();
    for frame in 0..600u32 {
        if frame % 45 == 0 {
            state.throw_sandbag(Vec2::new(1.0, -0.2), 10.0);
        }
        tick(&mut state, &input);
    }

    println!(
        "600 frames: phase {:?}, {} enemies, score {}, health {}",
        state.phase,
        state.enemies.len(),
        state.score,
        state.player_health
    );
}
