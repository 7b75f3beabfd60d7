//! WASM bridge — exposes the drawer + input engine to JavaScript.
//!
//! The host page owns the `<canvas>` element, subscribes to native events
//! and forwards them here in browser emission order, then calls
//! [`DrawerView::tick`] once per frame — from `requestAnimationFrame`, an
//! interval timer, or manually for single-shot rendering; the bridge does
//! not assume a drive mode. Always pass the explicit frame delta: the
//! engine's wall-clock fallback is not available on wasm.

mod surface;

pub use surface::CanvasSurface;

use qd_core::Point;
use qd_draw::Drawer;
use qd_input::{
    DrawerInput, KeyCode, KeyEventData, KeyPhase, MouseEventData, MousePhase, TouchEventData,
    TouchPhase,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The JS-facing controller: one drawer plus one input engine per canvas.
#[wasm_bindgen]
pub struct DrawerView {
    drawer: Drawer<CanvasSurface>,
    input: DrawerInput,
}

#[wasm_bindgen]
impl DrawerView {
    /// Binds a canvas element. Fails when a 2D context is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<DrawerView, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            drawer: Drawer::new(CanvasSurface::new(ctx, canvas)),
            input: DrawerInput::new(),
        })
    }

    /// Binds a canvas whose size is managed externally (e.g. an offscreen
    /// transfer) — resize calls through this view will fail.
    pub fn fragile(canvas: HtmlCanvasElement) -> Result<DrawerView, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            drawer: Drawer::fragile(CanvasSurface::new(ctx, canvas)),
            input: DrawerInput::new(),
        })
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) {
        self.input
            .process_mouse_event(MousePhase::Down, mouse_event(x, y, button));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input
            .process_mouse_event(MousePhase::Move, mouse_event(x, y, -1));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) {
        self.input
            .process_mouse_event(MousePhase::Up, mouse_event(x, y, button));
    }

    pub fn pointer_leave(&mut self) {
        self.input
            .process_mouse_event(MousePhase::Leave, mouse_event(0.0, 0.0, -1));
    }

    pub fn pointer_enter(&mut self, x: f64, y: f64) {
        self.input
            .process_mouse_event(MousePhase::Enter, mouse_event(x, y, -1));
    }

    pub fn context_menu(&mut self, x: f64, y: f64) {
        self.input
            .process_mouse_event(MousePhase::Context, mouse_event(x, y, 2));
    }

    pub fn wheel(&mut self, dx: f64, dy: f64) {
        self.input.process_wheel_event(Point::new(dx, dy));
    }

    // ─── Keyboard events ─────────────────────────────────────────────────

    pub fn key_down(&mut self, code: &str, from_text_input: bool) {
        self.input.process_keyboard_event(
            KeyPhase::Down,
            KeyEventData {
                code: KeyCode::intern(code),
                from_text_input,
            },
        );
    }

    pub fn key_up(&mut self, code: &str, from_text_input: bool) {
        self.input.process_keyboard_event(
            KeyPhase::Up,
            KeyEventData {
                code: KeyCode::intern(code),
                from_text_input,
            },
        );
    }

    // ─── Touch events ────────────────────────────────────────────────────

    pub fn touch_start(&mut self, id: f64, x: f64, y: f64) {
        self.input
            .process_touch_event(TouchPhase::Start, touch_event(id, x, y));
    }

    pub fn touch_move(&mut self, id: f64, x: f64, y: f64) {
        self.input
            .process_touch_event(TouchPhase::Move, touch_event(id, x, y));
    }

    pub fn touch_end(&mut self, id: f64, x: f64, y: f64) {
        self.input
            .process_touch_event(TouchPhase::End, touch_event(id, x, y));
    }

    // ─── Frame driving ───────────────────────────────────────────────────

    /// Runs the draw tick. Call exactly once per rendered frame, after all
    /// of that frame's events, with the frame delta in milliseconds.
    pub fn tick(&mut self, delta_ms: f64) {
        self.input.process_draw_event(Some(delta_ms));
    }

    /// Re-derives the canvas pixel size from its layout box.
    pub fn resize_to_native(&mut self) -> Result<(), JsValue> {
        self.drawer
            .set_native_size()
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn width(&self) -> f64 {
        self.drawer.size().width
    }

    pub fn height(&self) -> f64 {
        self.drawer.size().height
    }
}

impl DrawerView {
    /// The wrapped drawer, for Rust-side embedders.
    pub fn drawer(&mut self) -> &mut Drawer<CanvasSurface> {
        &mut self.drawer
    }

    /// The input engine, for Rust-side embedders.
    pub fn input(&mut self) -> &mut DrawerInput {
        &mut self.input
    }
}

fn mouse_event(x: f64, y: f64, button: i16) -> MouseEventData {
    MouseEventData {
        pos: Point::new(x, y),
        button,
    }
}

fn touch_event(id: f64, x: f64, y: f64) -> TouchEventData {
    TouchEventData {
        id: id as u64,
        pos: Point::new(x, y),
    }
}
