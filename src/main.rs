//! Gold Miner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use gold_miner::audio::WebAudio;
    use gold_miner::renderer::CanvasSurface;
    use gold_miner::sim::{GamePhase, Playfield};
    use gold_miner::{Game, HudSink, HudSnapshot, LoopControl, Settings, Tuning};

    /// Writes HUD values into the page overlay
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl HudSink for DomHud {
        fn show(&mut self, hud: &HudSnapshot) {
            self.set_text("score", &format!("Score: {}", hud.score));
            self.set_text("timer", &format!("Time: {}", hud.time_left));
            self.set_text("level", &format!("Level: {}", hud.level));

            if hud.phase == GamePhase::GameOver {
                self.set_text("finalScore", &format!("Final score: {}", hud.score));
                set_display(&self.document, "gameOver", "flex");
            }
        }
    }

    /// Everything the browser callbacks share
    struct App {
        game: Game<WebAudio>,
        surface: CanvasSurface,
        hud: DomHud,
        /// An animation frame is pending
        looping: bool,
    }

    fn set_display(document: &Document, id: &str, value: &str) {
        let el = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(el) = el {
            let _ = el.style().set_property("display", value);
        }
    }

    fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("missing #gameCanvas"))?
            .dyn_into::<HtmlCanvasElement>()?;

        // Fill the container when there is one
        if let Some(container) = document
            .get_element_by_id("gameContainer")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let (w, h) = (container.offset_width(), container.offset_height());
            if w > 0 && h > 0 {
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
            }
        }
        let playfield = Playfield::new(canvas.width() as f32, canvas.height() as f32);
        log::info!("Canvas: {}x{}", playfield.width, playfield.height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let settings = Settings::load(&canvas);
        let tuning = canvas
            .get_attribute("data-tuning")
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();

        let audio = WebAudio::new(settings.sound, settings.master_volume);
        let seed = seed();
        log::info!("Game seed: {}", seed);

        let mut app = App {
            game: Game::new(seed, playfield, tuning, settings, audio),
            surface: CanvasSurface::new(ctx),
            hud: DomHud {
                document: document.clone(),
            },
            looping: false,
        };
        // Draw the idle field behind the start screen
        app.game.render(&mut app.surface);
        app.game.push_hud(&mut app.hud);
        let app = Rc::new(RefCell::new(app));

        setup_input_handlers(&canvas, app.clone())?;
        setup_buttons(&document, app)?;

        log::info!("Gold Miner ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.activate();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.activate();
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        a.game.activate();
                    }
                    "m" | "M" => {
                        a.game.toggle_sound();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let app = app.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_display(&document, "startScreen", "none");
                if app.borrow_mut().game.start() {
                    schedule_loop(app.clone());
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_display(&document, "gameOver", "none");
                app.borrow_mut().game.restart(seed());
                schedule_loop(app.clone());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Arm the frame loop unless a frame is already pending
    fn schedule_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.looping {
                return;
            }
            a.looping = true;
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            let control = a.game.frame(time, &mut a.surface, &mut a.hud);
            if control == LoopControl::Stop {
                a.looping = false;
            }
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gold_miner::audio::SilentAudio;
    use gold_miner::consts::FRAME_MS;
    use gold_miner::sim::Playfield;
    use gold_miner::{Game, Settings, Tuning};

    // Headless run: one simulated hour at most
    const MAX_FRAMES: u32 = 60 * 60 * 60;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Gold Miner (native) auto-play, seed {}", seed);

    let mut game = Game::new(
        seed,
        Playfield::default(),
        Tuning::default(),
        Settings::default(),
        SilentAudio::default(),
    );
    game.start();

    let mut frames = 0;
    while game.is_running() && frames < MAX_FRAMES {
        game.activate();
        game.update(FRAME_MS);
        frames += 1;
    }

    let session = &game.state().session;
    println!(
        "Final score {} at level {} after {:.1}s",
        session.score,
        session.level,
        frames as f32 * FRAME_MS / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
