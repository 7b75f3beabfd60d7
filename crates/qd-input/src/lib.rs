//! Frame-based input reconciliation.
//!
//! Browser-style input events arrive asynchronously and irregularly;
//! consumers want a consistent per-frame snapshot. [`DrawerInput`] owns the
//! mouse/keyboard/touch/wheel state, fires typed [`Signal`]s synchronously
//! as events are processed, and advances all "previous frame" snapshots in
//! exactly one place — the draw tick — which is what makes the derived
//! edge-detectors (`pressed`, `released`, `clicked`, `drag_start`,
//! `drag_end`) well-defined.
//!
//! Everything here is single-threaded: state lives on the UI thread and
//! signals dispatch synchronously in registration order.

pub mod consumer;
pub mod input;
pub mod keyboard;
pub mod keycode;
pub mod mouse;
pub mod signal;
pub mod touch;

pub use consumer::Consumer;
pub use input::{
    DrawerInput, FrameEvent, KeyEventData, KeyPhase, MouseEventData, MousePhase, TouchEventData,
    TouchPhase,
};
pub use keyboard::{Key, KeyEvent, Keyboard};
pub use keycode::KeyCode;
pub use mouse::{
    ButtonEvent, DragEvent, Mouse, MouseButton, MouseButtonKind, MouseMoveEvent, WheelEvent,
};
pub use signal::{OwnerToken, Signal, SubscriptionId};
pub use touch::{Touch, TouchEvent, TouchId, TouchMoveEvent, TouchPoint};
