//! Drop And Climb entry point
//!
//! Browser: boots WebGPU, wires keyboard and dialog, runs the frame loop.
//! Native: plays a scripted session headlessly and logs how it ended.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use drop_and_climb::platform::{DomDialog, KeyState};
    use drop_and_climb::renderer::{RenderState, scene_vertices};
    use drop_and_climb::{BootError, ConfigError, Game, GameConfig, Variant};

    /// State shared by every browser callback
    struct App {
        game: Game,
        dialog: DomDialog,
        keys: KeyState,
        render_state: RenderState,
        last_time: f64,
    }

    impl App {
        /// Sample the held keys and advance the game by one refresh
        fn update(&mut self, dt: f32) {
            let input = self.keys.tick_input(&self.game.config.keys);
            self.game.frame(dt, &input, &mut self.dialog);
        }

        /// Draw the scene; it stays visible (frozen) behind the dialog
        fn render(&mut self) {
            let vertices = scene_vertices(&self.game.scene);
            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    /// Variant and overrides from the canvas's `data-*` attributes
    fn load_config(canvas: &HtmlCanvasElement) -> Result<GameConfig, ConfigError> {
        let variant = match canvas.get_attribute("data-variant") {
            Some(name) => Variant::parse(&name)?,
            None => Variant::default(),
        };
        log::info!("Canvas variant: {}", variant.as_str());
        let config = GameConfig::for_variant(variant);
        match canvas.get_attribute("data-config") {
            Some(json) if !json.trim().is_empty() => config.with_overrides(&json),
            _ => {
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drop And Climb starting...");

        match boot().await {
            Ok(()) => log::info!("Drop And Climb running!"),
            Err(e) => log::error!("Start-up failed: {}", e),
        }
    }

    async fn boot() -> Result<(), BootError> {
        let window = web_sys::window().ok_or(BootError::NoWindow)?;
        let document = window.document().ok_or(BootError::NoDocument)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(BootError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| BootError::WrongElementType("canvas"))?;

        let config = load_config(&canvas)?;
        let world = Vec2::new(config.width as f32, config.height as f32);

        // Fixed CSS size; the backing store follows the device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {}px; height: {}px;", config.width, config.height),
        );

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world).await?;

        let mut dialog = DomDialog::new(&document)?;
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, seed, &mut dialog);

        let app = Rc::new(RefCell::new(App {
            game,
            dialog,
            keys: KeyState::new(),
            render_state,
            last_time: 0.0,
        }));

        setup_keyboard(&window, app.clone());
        setup_dialog_buttons(app.clone());

        // Start game loop
        request_animation_frame(app);

        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Key down: movement keys are held, the pause key acts once per press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                let code = event.code();
                if KeyState::is_bound(&code, &a.game.config.keys) {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
                if code == a.game.config.keys.pause {
                    if !event.repeat() {
                        a.game.on_pause_key(&mut a.dialog);
                    }
                } else {
                    a.keys.set(&code, true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().keys.set(&event.code(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyups never arrive, so drop everything held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_dialog_buttons(app: Rc<RefCell<App>>) {
        let (action, view_under) = {
            let a = app.borrow();
            (
                a.dialog.action_button().clone(),
                a.dialog.view_under_button().clone(),
            )
        };

        // Primary button: start, resume or play again
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.game.dismiss(&mut a.dialog);
            });
            let _ =
                action.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Peek at the frozen scene
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow().dialog.toggle_view_under();
            });
            let _ = view_under
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone; frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use drop_and_climb::sim::TickInput;
    use drop_and_climb::{Dialog, DialogContent, Game, GameConfig, SessionPhase};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Two minutes at 60 Hz
    const MAX_FRAMES: u32 = 60 * 120;

    /// Dialog stand-in that only logs
    struct LogDialog;

    impl Dialog for LogDialog {
        fn open(&mut self, content: &DialogContent) {
            log::info!("[dialog] {} ({})", content.title, content.button);
        }

        fn close(&mut self) {
            log::debug!("[dialog] closed");
        }
    }

    /// Sweep left and right in three-second legs, hopping twice a second
    fn scripted_input(frame: u32) -> TickInput {
        let leg = frame / 180;
        TickInput {
            left: leg % 2 == 0,
            right: leg % 2 == 1,
            jump: frame % 30 == 0,
        }
    }

    pub fn run(seed: u64) {
        let mut dialog = LogDialog;
        let mut game = Game::new(GameConfig::default(), seed, &mut dialog);
        game.dismiss(&mut dialog);

        let mut frame = 0;
        while frame < MAX_FRAMES && game.phase() == SessionPhase::Running {
            game.frame(FRAME_DT, &scripted_input(frame), &mut dialog);
            frame += 1;
        }

        log::info!(
            "Stopped after {} frames ({:.1}s simulated): {:?}, {} blocks in play",
            frame,
            game.scene.time_ms / 1000.0,
            game.phase(),
            game.scene.block_count()
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Drop And Climb (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
