//! The input reconciliation engine.
//!
//! Host shells forward native events into the `process_*` entry points in
//! browser emission order, then call [`DrawerInput::process_draw_event`]
//! exactly once per rendered frame, after all of that frame's events. The
//! draw tick is the only place "previous frame" snapshots advance; calling
//! it zero or multiple times per frame breaks the edge-detectors.

use crate::keyboard::{KeyEvent, Keyboard};
use crate::keycode::KeyCode;
use crate::mouse::{ButtonEvent, DragEvent, Mouse, MouseMoveEvent, WheelEvent};
use crate::signal::Signal;
use crate::touch::{Touch, TouchEvent, TouchId, TouchMoveEvent};
use qd_core::Point;

/// Mouse event type tag, as forwarded by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MousePhase {
    Up,
    Down,
    Move,
    Leave,
    Enter,
    Context,
}

/// Raw mouse event payload in local-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEventData {
    pub pos: Point,
    /// Raw button index (0 = left, 1 = middle, 2 = right). Only meaningful
    /// for `Up`/`Down`.
    pub button: i16,
}

/// Keyboard event type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Up,
    Down,
}

/// Raw keyboard event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEventData {
    pub code: KeyCode,
    /// The event originated from a focused text input; ignored unless
    /// [`DrawerInput::capture_text_input`] is set.
    pub from_text_input: bool,
}

/// Touch event type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Raw touch event payload in local-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEventData {
    pub id: TouchId,
    pub pos: Point,
}

/// Fired once per frame by the draw tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvent {
    /// Milliseconds since the previous frame.
    pub delta_time: f64,
}

/// Frame-based input state for one interactive surface.
pub struct DrawerInput {
    pub mouse: Mouse,
    pub keyboard: Keyboard,
    pub touch: Touch,
    /// Triggers every frame.
    pub on_draw: Signal<FrameEvent>,
    /// Time elapsed over the last frame, milliseconds.
    pub delta_time: f64,
    /// Minimum distance from the down-position before movement counts as
    /// dragging rather than jitter.
    pub drag_threshold: f64,
    /// Process keyboard events even when they originate from a focused
    /// text input.
    pub capture_text_input: bool,
    /// Internal time in milliseconds; `None` until the first draw tick.
    time: Option<f64>,
}

impl DrawerInput {
    pub fn new() -> Self {
        Self::with_threshold(10.0)
    }

    pub fn with_threshold(drag_threshold: f64) -> Self {
        Self {
            mouse: Mouse::new(),
            keyboard: Keyboard::new(),
            touch: Touch::new(),
            on_draw: Signal::new(),
            delta_time: 0.0,
            drag_threshold,
            capture_text_input: false,
            time: None,
        }
    }

    /// Processes one native mouse event.
    ///
    /// Movement runs drag tracking for every held button: crossing the drag
    /// threshold flips `dragging`, fires `on_drag_start` with the *origin*
    /// position and immediately follows with an `on_drag` spanning
    /// origin → current. `Leave` force-releases all buttons and parks the
    /// position at `Point::NAN`.
    pub fn process_mouse_event(&mut self, phase: MousePhase, event: MouseEventData) {
        if phase == MousePhase::Context {
            self.mouse.on_context.emit(&ButtonEvent { pos: event.pos });
            return;
        }

        let pos = if phase == MousePhase::Leave {
            Point::NAN
        } else {
            event.pos
        };
        self.mouse.over = phase != MousePhase::Leave;

        let last_pos = self.mouse.pos;
        self.mouse.pos = pos;
        let delta = pos - last_pos;

        self.mouse.on_move.emit(&MouseMoveEvent {
            pos,
            delta,
            last_pos,
        });

        let threshold = self.drag_threshold;
        for button in self.mouse.buttons_mut() {
            if button.down {
                button.on_move.emit(&DragEvent {
                    pos,
                    delta,
                    last_pos,
                });

                if !button.dragging && button.down_pos.dist(pos) > threshold {
                    button.dragging = true;
                    button.on_drag_start.emit(&ButtonEvent {
                        pos: button.down_pos,
                    });
                    button.on_drag.emit(&DragEvent {
                        pos,
                        delta: pos - button.down_pos,
                        last_pos: button.down_pos,
                    });
                } else if button.dragging {
                    button.on_drag.emit(&DragEvent {
                        pos,
                        delta,
                        last_pos,
                    });
                }
            }

            match phase {
                MousePhase::Down if button.kind.matches(event.button) => {
                    button.down = true;
                    button.down_pos = pos;
                    button.on_down.emit(&ButtonEvent { pos });
                }
                MousePhase::Up if button.kind.matches(event.button) => {
                    button.down = false;
                    button.on_up.emit(&ButtonEvent { pos });
                    if button.dragging {
                        button.on_drag_end.emit(&ButtonEvent { pos });
                    }
                    button.dragging = false;
                }
                MousePhase::Leave if button.down => {
                    button.down = false;
                    button.on_up.emit(&ButtonEvent { pos });
                    if button.dragging {
                        button.on_drag_end.emit(&ButtonEvent { pos });
                    }
                    button.dragging = false;
                }
                _ => {}
            }
        }
    }

    /// Accumulates wheel movement into the per-frame delta (reset at the
    /// end of each draw tick) and fires `mouse.on_wheel`.
    pub fn process_wheel_event(&mut self, delta: Point) {
        self.mouse.wheel_delta = self.mouse.wheel_delta + delta;
        self.mouse.on_wheel.emit(&WheelEvent { delta });
    }

    /// Processes one native keyboard event. Events from text-input targets
    /// are ignored unless `capture_text_input` is set.
    pub fn process_keyboard_event(&mut self, phase: KeyPhase, event: KeyEventData) {
        if event.from_text_input && !self.capture_text_input {
            return;
        }

        let key = self.keyboard.key(event.code);
        match phase {
            KeyPhase::Down => {
                key.down = true;
                key.on_down.emit(&KeyEvent { code: event.code });
            }
            KeyPhase::Up => {
                key.down = false;
                key.on_up.emit(&KeyEvent { code: event.code });
            }
        }
    }

    /// Processes one native touch event. `Move`/`End` for an identifier
    /// that never started are defensive no-ops.
    pub fn process_touch_event(&mut self, phase: TouchPhase, event: TouchEventData) {
        match phase {
            TouchPhase::Start => {
                self.touch.begin(event.id, event.pos);
                self.touch.on_start.emit(&TouchEvent {
                    id: event.id,
                    pos: event.pos,
                });
            }
            TouchPhase::Move => match self.touch.update(event.id, event.pos) {
                Some((delta, last_pos)) => {
                    self.touch.on_move.emit(&TouchMoveEvent {
                        id: event.id,
                        pos: event.pos,
                        delta,
                        last_pos,
                    });
                }
                None => log::debug!("touch move for unknown identifier {}", event.id),
            },
            TouchPhase::End => {
                if self.touch.get(event.id).is_some() {
                    self.touch.on_end.emit(&TouchEvent {
                        id: event.id,
                        pos: event.pos,
                    });
                    self.touch.finish(event.id);
                } else {
                    log::debug!("touch end for unknown identifier {}", event.id);
                }
            }
        }
    }

    /// The frame boundary. Must run exactly once per rendered frame, after
    /// every event for that frame.
    ///
    /// Computes the mouse per-frame delta, fires `on_draw`, then — and only
    /// here — advances every "previous frame" snapshot and resets the wheel
    /// accumulator. With an explicit `delta_time` the internal clock
    /// accumulates it instead of sampling wall-clock time, which makes
    /// frame-exact replay possible in headless tests.
    pub fn process_draw_event(&mut self, delta_time: Option<f64>) {
        let actual_delta_time = match delta_time {
            Some(delta) => {
                self.time = Some(self.time.unwrap_or(0.0) + delta);
                delta
            }
            None => {
                let now = now_ms();
                let delta = match self.time {
                    Some(previous) => now - previous,
                    None => 0.0,
                };
                self.time = Some(now);
                delta
            }
        };
        self.delta_time = actual_delta_time;

        self.mouse.delta = self.mouse.pos - self.mouse.last_pos;

        self.on_draw.emit(&FrameEvent {
            delta_time: actual_delta_time,
        });

        self.mouse.last_pos = self.mouse.pos;
        for button in self.mouse.buttons_mut() {
            button.advance_frame();
        }
        self.keyboard.advance_frame();
        self.touch.advance_frame();
        self.mouse.wheel_delta = Point::ZERO;
    }

    /// Internal clock, milliseconds. `None` until the first draw tick.
    pub fn time(&self) -> Option<f64> {
        self.time
    }
}

impl Default for DrawerInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic wall clock in milliseconds.
///
/// Unavailable on `wasm32-unknown-unknown`; browser hosts pass the explicit
/// animation-frame delta instead.
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
