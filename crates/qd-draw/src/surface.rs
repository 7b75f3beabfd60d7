//! The abstract 2D paint surface.
//!
//! One trait method per device capability, mirroring the common subset of
//! immediate-mode canvas APIs. Backends: [`crate::RecordingSurface`]
//! (headless command stream) and the web canvas surface in `qd-wasm`.

use qd_core::{Color, Matrix, Point, Rect};
use serde::{Deserialize, Serialize};

/// Line end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Canvas keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    /// Canvas keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// Compositing operation for subsequent paint calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositeOp {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl CompositeOp {
    /// Canvas keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeOp::SourceOver => "source-over",
            CompositeOp::SourceIn => "source-in",
            CompositeOp::SourceOut => "source-out",
            CompositeOp::SourceAtop => "source-atop",
            CompositeOp::DestinationOver => "destination-over",
            CompositeOp::DestinationIn => "destination-in",
            CompositeOp::DestinationOut => "destination-out",
            CompositeOp::DestinationAtop => "destination-atop",
            CompositeOp::Lighter => "lighter",
            CompositeOp::Copy => "copy",
            CompositeOp::Xor => "xor",
            CompositeOp::Multiply => "multiply",
            CompositeOp::Screen => "screen",
            CompositeOp::Overlay => "overlay",
            CompositeOp::Darken => "darken",
            CompositeOp::Lighten => "lighten",
            CompositeOp::ColorDodge => "color-dodge",
            CompositeOp::ColorBurn => "color-burn",
            CompositeOp::HardLight => "hard-light",
            CompositeOp::SoftLight => "soft-light",
            CompositeOp::Difference => "difference",
            CompositeOp::Exclusion => "exclusion",
            CompositeOp::Hue => "hue",
            CompositeOp::Saturation => "saturation",
            CompositeOp::Color => "color",
            CompositeOp::Luminosity => "luminosity",
        }
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

impl TextAlign {
    /// Canvas keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Hanging,
    Middle,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    /// Canvas keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 .. 1.0.
    pub offset: f64,
    pub color: Color,
}

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Result of measuring a text run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// A block of RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Pixmap {
    /// Transparent-black pixmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }
}

/// An abstract 2D paint surface.
///
/// Path, paint and transform state is owned by the backend; the trait only
/// transports calls. Coordinates are in surface-local pixels.
pub trait Surface {
    /// Current pixel width.
    fn width(&self) -> u32;
    /// Current pixel height.
    fn height(&self) -> u32;
    /// Pixel size dictated by the host layout box, for backends embedded in
    /// a layout system. `None` when the backend has no such notion.
    fn native_size(&self) -> Option<(u32, u32)> {
        None
    }
    /// Reallocates the pixel store. Discards contents and accumulated state.
    fn resize(&mut self, width: u32, height: u32);
    /// Clears all pixels in place, keeping the allocation.
    fn clear(&mut self);

    fn set_fill_paint(&mut self, paint: &Paint);
    fn set_stroke_paint(&mut self, paint: &Paint);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_line_dash_offset(&mut self, offset: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_composite_op(&mut self, op: CompositeOp);
    fn set_image_smoothing(&mut self, enabled: bool);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, pos: Point);
    fn line_to(&mut self, pos: Point);
    fn bezier_to(&mut self, c1: Point, c2: Point, pos: Point);
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool);
    fn ellipse(
        &mut self,
        center: Point,
        radius: Point,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
    fn rect(&mut self, rect: Rect);

    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Point);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, factor: Point);
    /// Multiplies the current transform by `matrix`.
    fn transform(&mut self, matrix: &Matrix);
    /// Replaces the current transform with `matrix`.
    fn set_transform(&mut self, matrix: &Matrix);

    /// Sets the font from a CSS-style string (`"16px sans-serif"`). Backends
    /// that reject the string keep the previous font; [`Surface::font`]
    /// exposes the outcome.
    fn set_font(&mut self, font: &str);
    /// The font actually in effect.
    fn font(&self) -> String;
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn measure_text(&self, text: &str) -> TextMetrics;
    fn fill_text(&mut self, text: &str, pos: Point);
    fn stroke_text(&mut self, text: &str, pos: Point);

    /// Reads a region back as RGBA8.
    fn read_pixels(&mut self, source: Rect) -> Pixmap;
    /// Writes RGBA8 pixels at `dest`, ignoring the current transform.
    fn write_pixels(&mut self, pixels: &Pixmap, dest: Point);
    /// Draws another surface of the same backend at `pos`, natural size.
    fn blit_at(&mut self, source: &Self, pos: Point)
    where
        Self: Sized;
    /// Draws another surface into `dest`, optionally from a sub-region.
    fn blit_rect(&mut self, source: &Self, dest: Rect, src: Option<Rect>)
    where
        Self: Sized;
}
