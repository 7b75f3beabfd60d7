//! Mouse state: position, hover, wheel accumulator and per-button tracking.

use crate::signal::Signal;
use qd_core::Point;

/// Fired on every pointer movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub pos: Point,
    /// Movement since the previous event (not since the previous frame).
    pub delta: Point,
    pub last_pos: Point,
}

/// Fired on button down/up and drag start/end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub pos: Point,
}

/// Fired while a button is held (`on_move`) or dragging (`on_drag`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub pos: Point,
    pub delta: Point,
    pub last_pos: Point,
}

/// Fired on wheel input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: Point,
}

/// Which physical button a tracked button responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Middle,
    Right,
    /// Matches every physical button. Tracked independently of the
    /// specific buttons, so its events fire alongside theirs.
    Any,
}

impl MouseButtonKind {
    /// Whether a raw event button index belongs to this tracked button.
    pub fn matches(self, raw: i16) -> bool {
        match self {
            MouseButtonKind::Left => raw == 0,
            MouseButtonKind::Middle => raw == 1,
            MouseButtonKind::Right => raw == 2,
            MouseButtonKind::Any => true,
        }
    }
}

/// State of one tracked mouse button.
///
/// `last_*` fields advance only in the draw tick; together with the
/// current flags they define the edge-detectors below.
pub struct MouseButton {
    pub kind: MouseButtonKind,
    /// Is this button down.
    pub down: bool,
    /// Was this button down last frame.
    pub last_down: bool,
    /// Where the button went down — the drag origin.
    pub down_pos: Point,
    pub dragging: bool,
    pub last_dragging: bool,
    /// Triggers when this button is pressed.
    pub on_down: Signal<ButtonEvent>,
    /// Triggers when this button is released.
    pub on_up: Signal<ButtonEvent>,
    /// Triggers when dragging starts; carries the drag origin.
    pub on_drag_start: Signal<ButtonEvent>,
    /// Triggers on movement past the drag threshold. The first drag after
    /// the threshold crossing spans origin → current, so no `dragging`
    /// frame lacks a matching drag event.
    pub on_drag: Signal<DragEvent>,
    /// Triggers when dragging stops.
    pub on_drag_end: Signal<ButtonEvent>,
    /// Triggers on any movement while the button is down, threshold or not.
    pub on_move: Signal<DragEvent>,
}

impl MouseButton {
    pub fn new(kind: MouseButtonKind) -> Self {
        Self {
            kind,
            down: false,
            last_down: false,
            down_pos: Point::ZERO,
            dragging: false,
            last_dragging: false,
            on_down: Signal::new(),
            on_up: Signal::new(),
            on_drag_start: Signal::new(),
            on_drag: Signal::new(),
            on_drag_end: Signal::new(),
            on_move: Signal::new(),
        }
    }

    /// Was this button pressed between this and last frame.
    pub fn pressed(&self) -> bool {
        self.down && !self.last_down
    }

    /// Was this button released between this and last frame.
    pub fn released(&self) -> bool {
        !self.down && self.last_down
    }

    /// Was this button released without having dragged — a click.
    pub fn clicked(&self) -> bool {
        self.released() && !self.last_dragging
    }

    /// Did dragging start between this and last frame.
    pub fn drag_start(&self) -> bool {
        self.dragging && !self.last_dragging
    }

    /// Did dragging end between this and last frame.
    pub fn drag_end(&self) -> bool {
        !self.dragging && self.last_dragging
    }

    pub(crate) fn advance_frame(&mut self) {
        self.last_down = self.down;
        self.last_dragging = self.dragging;
    }
}

/// Aggregate mouse state.
pub struct Mouse {
    pub left: MouseButton,
    pub middle: MouseButton,
    pub right: MouseButton,
    /// Tracks every physical button at once; see [`MouseButtonKind::Any`].
    pub any: MouseButton,
    /// Is the pointer over the surface.
    pub over: bool,
    /// Current position; `Point::NAN` while the pointer is off-surface.
    pub pos: Point,
    /// Movement since last frame; computed in the draw tick.
    pub delta: Point,
    /// Position last frame.
    pub last_pos: Point,
    /// Wheel movement accumulated this frame; reset at the end of the draw
    /// tick.
    pub wheel_delta: Point,
    /// Triggers when the mouse moves.
    pub on_move: Signal<MouseMoveEvent>,
    /// Triggers on wheel input.
    pub on_wheel: Signal<WheelEvent>,
    /// Triggers on a context-menu gesture.
    pub on_context: Signal<ButtonEvent>,
}

impl Mouse {
    pub fn new() -> Self {
        Self {
            left: MouseButton::new(MouseButtonKind::Left),
            middle: MouseButton::new(MouseButtonKind::Middle),
            right: MouseButton::new(MouseButtonKind::Right),
            any: MouseButton::new(MouseButtonKind::Any),
            over: false,
            pos: Point::ZERO,
            delta: Point::ZERO,
            last_pos: Point::ZERO,
            wheel_delta: Point::ZERO,
            on_move: Signal::new(),
            on_wheel: Signal::new(),
            on_context: Signal::new(),
        }
    }

    /// All tracked buttons, specific ones first.
    pub fn buttons(&self) -> [&MouseButton; 4] {
        [&self.left, &self.middle, &self.right, &self.any]
    }

    pub(crate) fn buttons_mut(&mut self) -> [&mut MouseButton; 4] {
        [
            &mut self.left,
            &mut self.middle,
            &mut self.right,
            &mut self.any,
        ]
    }
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}
