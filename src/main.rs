//! Moon Shot entry point
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
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlSelectElement,
        MouseEvent, TouchEvent,
    };

    use moon_shot::hud::{self, StatusSink};
    use moon_shot::input::{InputState, client_to_canvas};
    use moon_shot::renderer::{CanvasSink, Color, draw_world};
    use moon_shot::sim::{
        Difficulty, World, retry, run_timers, set_difficulty, tick, toggle_upgrade,
    };
    use moon_shot::{Tuning, Upgrade};

    /// Score/status line backed by page elements
    struct DomStatus {
        document: Document,
    }

    impl DomStatus {
        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(&self, id: &str, display: &str) {
            if let Some(el) = self.element(id) {
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl StatusSink for DomStatus {
        fn set_score(&mut self, score: u64) {
            self.set_text("score", &score.to_string());
        }

        fn set_attempts(&mut self, attempts: u32) {
            self.set_text("attempts", &attempts.to_string());
        }

        fn show_message(&mut self, text: &str, color: Color) {
            if let Some(el) = self.element("message") {
                el.set_text_content(Some(text));
                let _ = el.style().set_property("color", &color.to_css());
            }
        }

        fn show_fact(&mut self, fact: Option<&str>) {
            match fact {
                Some(text) => {
                    self.set_text("fact", text);
                    self.set_display("fact", "block");
                }
                None => self.set_display("fact", "none"),
            }
        }

        fn set_retry_visible(&mut self, visible: bool) {
            self.set_display("retryBtn", if visible { "inline-block" } else { "none" });
        }
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputState,
        sink: CanvasSink,
        status: DomStatus,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Pointer position in canvas pixels
        fn canvas_point(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            client_to_canvas(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32),
            )
        }

        /// Deferred actions, one tick, HUD, paint
        fn frame(&mut self, time: f64) {
            run_timers(&mut self.world, time / 1000.0);
            let input = self.input.take_tick_input();
            tick(&mut self.world, &input);
            self.flush_events();
            draw_world(&self.world, time, &mut self.sink);
        }

        fn flush_events(&mut self) {
            for event in self.world.drain_events() {
                log::debug!("{:?}", event);
                hud::apply_event(&event, &self.world.session, &mut self.status);
            }
        }
    }

    /// Optional JSON from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(text) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Moon Shot starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let tuning = load_tuning(&document);
        canvas.set_width(tuning.screen_width as u32);
        canvas.set_height(tuning.screen_height as u32);

        let seed = js_sys::Date::now() as u64;
        let world = World::new(tuning, seed);
        let mut status = DomStatus {
            document: document.clone(),
        };
        hud::init(&world.session, &mut status);

        let game = Rc::new(RefCell::new(Game {
            world,
            input: InputState::new(),
            sink: CanvasSink::new(ctx),
            status,
            canvas: canvas.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_difficulty_select(&document, game.clone());
        setup_upgrade_buttons(&document, game.clone());
        setup_retry_button(&document, game.clone());

        request_animation_frame(game);

        log::info!("Moon Shot running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - pick a launch point
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_point(event.client_x(), event.client_y());
                g.input.pointer_down(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_point(event.client_x(), event.client_y());
                g.input.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - launch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_point(event.client_x(), event.client_y());
                g.input.pointer_up(Some(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.canvas_point(touch.client_x(), touch.client_y());
                    g.input.pointer_down(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.canvas_point(touch.client_x(), touch.client_y());
                    g.input.pointer_move(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - launch from the last known position
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.pointer_up(None);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_difficulty_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(select) = document
            .get_element_by_id("difficultySelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            log::warn!("No difficulty selector on the page");
            return;
        };

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let value = select_clone.value();
            match value.parse::<Difficulty>() {
                Ok(difficulty) => set_difficulty(&mut game.borrow_mut().world, difficulty),
                Err(e) => log::warn!("{}", e),
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Every `.upgrade-btn` toggles the upgrade named by its id
    fn setup_upgrade_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons = document.get_elements_by_class_name("upgrade-btn");
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i) else {
                continue;
            };
            let upgrade = match btn.id().parse::<Upgrade>() {
                Ok(upgrade) => upgrade,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };
            let game = game.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let active = toggle_upgrade(&mut game.borrow_mut().world, upgrade);
                let _ = btn_clone.class_list().toggle_with_force("active", active);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_retry_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("retryBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                retry(&mut game.borrow_mut().world);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: fires a fan of shots and prints the session summary
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use moon_shot::Tuning;
    use moon_shot::hud::{self, TextStatus};
    use moon_shot::sim::{
        AttemptPhase, Body, Difficulty, TickInput, World, retry, run_timers, set_difficulty, tick,
    };

    env_logger::init();
    log::info!("Moon Shot (native) starting...");
    log::info!("The playable game runs in the browser; this is a headless demo");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Using default tuning: {}", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut world = World::new(tuning, 42);
    set_difficulty(&mut world, Difficulty::Medium);
    let mut status = TextStatus::default();
    hud::init(&world.session, &mut status);

    const FRAME: f64 = 1.0 / 60.0;
    let mut clock = 0.0;

    for shot in 0..12 {
        let planet = world.planet.position();
        let pad = world.default_launch_point();
        // Sweep aims across the upper half
        let angle = -std::f32::consts::PI * (0.15 + 0.06 * shot as f32);
        let aim = pad + Vec2::new(angle.cos(), angle.sin()) * world.tuning.max_drag;

        let press = planet + (pad - planet) * 0.5;
        let inputs = [
            TickInput {
                pointer: press,
                is_down: true,
                pressed_at: Some(press),
                released: false,
            },
            TickInput {
                pointer: aim,
                is_down: false,
                pressed_at: None,
                released: true,
            },
        ];

        for input in &inputs {
            clock += FRAME;
            run_timers(&mut world, clock);
            tick(&mut world, input);
        }

        // Fly until resolved, then wait for the pad
        let mut outcome = None;
        let mut frames = 0;
        while world.phase != AttemptPhase::Aiming && frames < 3000 {
            clock += FRAME;
            run_timers(&mut world, clock);
            tick(&mut world, &TickInput::default());
            if world.phase.is_terminal() && outcome.is_none() {
                outcome = Some(world.phase);
            }
            for event in world.drain_events() {
                hud::apply_event(&event, &world.session, &mut status);
            }
            if status.retry_visible && world.phase == AttemptPhase::Missed {
                retry(&mut world);
            }
            frames += 1;
        }
        for event in world.drain_events() {
            hud::apply_event(&event, &world.session, &mut status);
        }
        log::info!("Shot {}: {:?}", shot + 1, outcome);
    }

    match serde_json::to_string_pretty(&world.session) {
        Ok(summary) => println!("{}", summary),
        Err(e) => log::error!("Failed to serialize session: {}", e),
    }
}
