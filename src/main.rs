//! Draw Wheel entry point
//!
//! Browser build wires the engine to the DOM (wheel canvas, team editor,
//! group panels) and steps it from requestAnimationFrame. The native build
//! runs a full scripted draw in the console and prints the fixture.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement};

    use draw_wheel::audio::SpinSound;
    use draw_wheel::consts::*;
    use draw_wheel::draw::state::group_label;
    use draw_wheel::draw::{DrawEngine, DrawEvent};
    use draw_wheel::fixture;
    use draw_wheel::persistence::LocalStorageStore;
    use draw_wheel::theme::{Theme, ThemePreset};

    use std::f64::consts::TAU;

    /// App instance: engine plus presentation collaborators
    struct App {
        engine: DrawEngine<LocalStorageStore>,
        sound: SpinSound,
        theme: Theme,
        ctx: CanvasRenderingContext2d,
        wheel_px: f64,
    }

    impl App {
        /// One animation frame: advance the engine, react to events, redraw.
        fn frame(&mut self) {
            if let Some(event) = self.engine.tick() {
                match event {
                    DrawEvent::SpinStopped { winner } => {
                        self.sound.stop();
                        log::info!("Wheel stopped on segment {winner}");
                    }
                    DrawEvent::Committed { name, position } => {
                        log::info!("{name} drawn into position {position}");
                    }
                }
            }
            self.render_wheel();
            self.update_panels();
        }

        /// Repaint the wheel from the remaining pool and the live angle.
        fn render_wheel(&self) {
            let ctx = &self.ctx;
            let size = self.wheel_px;
            let radius = size / 2.0;
            let remaining = &self.engine.state().remaining;
            let palette = self.theme.preset.palette();

            ctx.clear_rect(0.0, 0.0, size, size);
            ctx.save();
            let _ = ctx.translate(radius, radius);
            let _ = ctx.rotate(self.engine.angle());

            let segs = remaining.len().max(1);
            let arc = TAU / segs as f64;
            for (i, name) in remaining.iter().enumerate() {
                let start = i as f64 * arc + POINTER_ANGLE;
                let end = start + arc;
                ctx.begin_path();
                ctx.move_to(0.0, 0.0);
                let _ = ctx.arc(0.0, 0.0, radius - 6.0, start, end);
                ctx.close_path();
                ctx.set_fill_style_str(palette[i % palette.len()]);
                ctx.fill();
                ctx.set_stroke_style_str(self.theme.preset.rim_color());
                ctx.set_line_width(6.0);
                ctx.stroke();

                ctx.save();
                let _ = ctx.rotate((start + end) / 2.0);
                ctx.set_text_align("right");
                ctx.set_fill_style_str(self.theme.preset.label_color());
                ctx.set_font("bold 16px system-ui, Arial");
                let _ = ctx.fill_text(name, radius - 20.0, 8.0);
                ctx.restore();
            }
            ctx.restore();
        }

        /// Mirror assignments and button states into the DOM.
        fn update_panels(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.engine.state();

            for g in 0..GROUP_COUNT {
                let label = group_label(g).to_ascii_lowercase();
                for (slot, name) in state.group(g).iter().enumerate() {
                    let id = format!("slot-{label}-{slot}");
                    if let Some(el) = document.get_element_by_id(&id) {
                        el.set_text_content(Some(name.unwrap_or("")));
                    }
                }
            }

            set_disabled(
                &document,
                "spin-btn",
                state.remaining.is_empty() || self.engine.in_cycle(),
            );
            set_disabled(&document, "export-btn", !state.is_full());
        }
    }

    fn set_disabled(document: &Document, id: &str, disabled: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if disabled {
                let _ = el.set_attribute("disabled", "");
            } else {
                let _ = el.remove_attribute("disabled");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Draw Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let theme = Theme::load();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("wheel")
            .expect("no wheel canvas")
            .dyn_into()
            .expect("not a canvas");
        let wheel_px = theme.preset.wheel_px();
        canvas.set_width(wheel_px);
        canvas.set_height(wheel_px);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let engine = DrawEngine::new(LocalStorageStore, seed);
        log::info!("Engine seeded with {seed}");

        let app = Rc::new(RefCell::new(App {
            engine,
            sound: SpinSound::new(),
            theme,
            ctx,
            wheel_px: wheel_px as f64,
        }));

        seed_editor(&document, &app);
        setup_buttons(&document, &app);
        request_animation_frame(app);

        log::info!("Draw Wheel running");
    }

    /// Populate the 9 editor fields and wire their edits back to the engine.
    fn seed_editor(document: &Document, app: &Rc<RefCell<App>>) {
        for i in 0..TEAM_COUNT {
            let Some(el) = document.get_element_by_id(&format!("team-{i}")) else {
                continue;
            };
            let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
                continue;
            };
            input.set_value(&app.borrow().engine.state().inputs[i]);

            let app = app.clone();
            let field = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().engine.set_input(i, &field.value());
            });
            let _ =
                input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        on_click(document, "spin-btn", app, |app| {
            if app.engine.request_spin() {
                if let Some(tone) = app.theme.spin_tone() {
                    app.sound.start(tone);
                }
            }
        });

        on_click(document, "reset-btn", app, |app| app.engine.reset());

        on_click(document, "apply-btn", app, |app| {
            // Re-read every field so edits made before wiring are not lost.
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                for i in 0..TEAM_COUNT {
                    if let Some(el) = document.get_element_by_id(&format!("team-{i}")) {
                        if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                            app.engine.set_input(i, &input.value());
                        }
                    }
                }
            }
            app.engine.apply();
        });

        on_click(document, "shuffle-btn", app, |app| {
            app.engine.shuffle_inputs();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                for (i, name) in app.engine.state().inputs.iter().enumerate() {
                    if let Some(el) = document.get_element_by_id(&format!("team-{i}")) {
                        if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                            input.set_value(name);
                        }
                    }
                }
            }
        });

        on_click(document, "clear-btn", app, |app| app.engine.clear_saved());

        on_click(document, "theme-btn", app, |app| {
            app.theme.preset = match app.theme.preset {
                ThemePreset::Classic => ThemePreset::Midnight,
                ThemePreset::Midnight => ThemePreset::Daylight,
                ThemePreset::Daylight => ThemePreset::Classic,
            };
            app.theme.save();
            log::info!("Theme: {}", app.theme.preset.as_str());
        });

        on_click(document, "export-btn", app, |app| match fixture::build(app.engine.state()) {
            Ok(doc) => {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let Some(document) = window.document() else {
                    return;
                };
                if let Some(el) = document.get_element_by_id("fixture") {
                    el.set_inner_html(&doc.render_html());
                    let _ = el.set_attribute("class", "fixture");
                    let _ = window.print();
                    let _ = el.set_attribute("class", "fixture hidden");
                }
            }
            Err(err) => log::warn!("Export rejected: {err}"),
        });
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: &Rc<RefCell<App>>,
        handler: impl Fn(&mut App) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing control #{id}");
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&mut app.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            app.borrow_mut().frame();
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use draw_wheel::consts::{GROUP_COUNT, TEAM_COUNT};
    use draw_wheel::draw::state::group_label;
    use draw_wheel::draw::{DrawEngine, DrawEvent};
    use draw_wheel::fixture;
    use draw_wheel::persistence::MemoryStore;

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Running a scripted draw (seed {seed})");

    let mut engine = DrawEngine::new(MemoryStore::default(), seed);
    for _ in 0..TEAM_COUNT {
        if !engine.request_spin() {
            break;
        }
        loop {
            match engine.tick() {
                Some(DrawEvent::SpinStopped { winner }) => {
                    println!("Wheel stopped on segment {winner}");
                }
                Some(DrawEvent::Committed { name, position }) => {
                    println!(
                        "  -> {name} drawn into Group {} slot {}",
                        group_label(position % GROUP_COUNT),
                        position / GROUP_COUNT + 1
                    );
                    break;
                }
                None => {}
            }
        }
    }

    match fixture::build(engine.state()) {
        Ok(doc) => {
            println!();
            print!("{}", doc.render_text());
        }
        Err(err) => log::error!("Fixture export failed: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
