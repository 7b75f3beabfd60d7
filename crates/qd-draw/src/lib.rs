//! Immediate-mode 2D drawing abstraction.
//!
//! The [`Surface`] trait is the contract every backend implements: path
//! construction, paint, text, transforms, pixel access and resizing.
//! [`Drawer`] wraps a surface with a fluent API and owns the size
//! bookkeeping; [`Camera`] layers pan/zoom on top. [`RecordingSurface`] is
//! the bundled headless backend — it captures the command stream instead of
//! rasterizing, which is what the test suites drive.

pub mod camera;
pub mod drawer;
pub mod pattern;
pub mod recording;
pub mod surface;

pub use camera::Camera;
pub use drawer::{Drawer, DrawerError, FontModifier, TextOptions};
pub use pattern::{TestPattern, make_test_pattern};
pub use recording::{Command, RecordingSurface};
pub use surface::{
    CompositeOp, GradientStop, LineCap, LineJoin, Paint, Pixmap, Surface, TextAlign, TextBaseline,
    TextMetrics,
};
