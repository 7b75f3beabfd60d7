//! Headless surface backend that records the draw command stream.
//!
//! Nothing is rasterized; every call is appended to a replayable
//! [`Command`] list. Text metrics are synthesized deterministically from
//! the font size so layout-dependent code (multi-line text, alignment) is
//! testable without a rasterizer. Font handling mimics canvas semantics:
//! a string that does not parse is ignored and the previous font stays in
//! effect, which is what the drawer's read-back verification keys on.

use crate::surface::{
    CompositeOp, LineCap, LineJoin, Paint, Pixmap, Surface, TextAlign, TextBaseline, TextMetrics,
};
use qd_core::{Matrix, Point, Rect};
use smallvec::SmallVec;

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    Clear,
    FillPaint(Paint),
    StrokePaint(Paint),
    LineWidth(f64),
    LineDash(SmallVec<[f64; 4]>),
    LineDashOffset(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    CompositeOp(CompositeOp),
    ImageSmoothing(bool),
    BeginPath,
    ClosePath,
    MoveTo(Point),
    LineTo(Point),
    BezierTo(Point, Point, Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Ellipse {
        center: Point,
        radius: Point,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    RectPath(Rect),
    Fill,
    Stroke,
    Clip,
    FillRect(Rect),
    StrokeRect(Rect),
    Save,
    Restore,
    Translate(Point),
    Rotate(f64),
    Scale(Point),
    Transform(Matrix),
    SetTransform(Matrix),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, pos: Point },
    StrokeText { text: String, pos: Point },
    WritePixels { dest: Point, width: u32, height: u32 },
    Blit { dest: Rect, source: Option<Rect> },
}

/// A [`Surface`] that records instead of painting.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    font: String,
    save_depth: usize,
    commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font: "10px sans-serif".to_string(),
            save_depth: 0,
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Current save/restore nesting depth.
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    /// Font size parsed from the current font string.
    fn font_size(&self) -> f64 {
        parse_font(&self.font).map(|(size, _)| size).unwrap_or(10.0)
    }

    fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Parses `[modifier] <size>px <family>`; `None` when the string has no
/// parsable size or no family.
fn parse_font(font: &str) -> Option<(f64, &str)> {
    let mut tokens = font.split_whitespace();
    let size_token = tokens.by_ref().find(|t| t.ends_with("px"))?;
    let size: f64 = size_token.strip_suffix("px")?.parse().ok()?;

    let rest = tokens.next()?;
    if rest.is_empty() {
        return None;
    }
    Some((size, rest))
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.push(Command::Resize { width, height });
    }

    fn clear(&mut self) {
        self.push(Command::Clear);
    }

    fn set_fill_paint(&mut self, paint: &Paint) {
        self.push(Command::FillPaint(paint.clone()));
    }

    fn set_stroke_paint(&mut self, paint: &Paint) {
        self.push(Command::StrokePaint(paint.clone()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(Command::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(Command::LineDash(SmallVec::from_slice(segments)));
    }

    fn set_line_dash_offset(&mut self, offset: f64) {
        self.push(Command::LineDashOffset(offset));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(Command::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(Command::LineJoin(join));
    }

    fn set_composite_op(&mut self, op: CompositeOp) {
        self.push(Command::CompositeOp(op));
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.push(Command::ImageSmoothing(enabled));
    }

    fn begin_path(&mut self) {
        self.push(Command::BeginPath);
    }

    fn close_path(&mut self) {
        self.push(Command::ClosePath);
    }

    fn move_to(&mut self, pos: Point) {
        self.push(Command::MoveTo(pos));
    }

    fn line_to(&mut self, pos: Point) {
        self.push(Command::LineTo(pos));
    }

    fn bezier_to(&mut self, c1: Point, c2: Point, pos: Point) {
        self.push(Command::BezierTo(c1, c2, pos));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.push(Command::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn ellipse(
        &mut self,
        center: Point,
        radius: Point,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.push(Command::Ellipse {
            center,
            radius,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn rect(&mut self, rect: Rect) {
        self.push(Command::RectPath(rect));
    }

    fn fill(&mut self) {
        self.push(Command::Fill);
    }

    fn stroke(&mut self) {
        self.push(Command::Stroke);
    }

    fn clip(&mut self) {
        self.push(Command::Clip);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(Command::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.push(Command::StrokeRect(rect));
    }

    fn save(&mut self) {
        self.save_depth += 1;
        self.push(Command::Save);
    }

    fn restore(&mut self) {
        self.save_depth = self.save_depth.saturating_sub(1);
        self.push(Command::Restore);
    }

    fn translate(&mut self, offset: Point) {
        self.push(Command::Translate(offset));
    }

    fn rotate(&mut self, angle: f64) {
        self.push(Command::Rotate(angle));
    }

    fn scale(&mut self, factor: Point) {
        self.push(Command::Scale(factor));
    }

    fn transform(&mut self, matrix: &Matrix) {
        self.push(Command::Transform(*matrix));
    }

    fn set_transform(&mut self, matrix: &Matrix) {
        self.push(Command::SetTransform(*matrix));
    }

    fn set_font(&mut self, font: &str) {
        // Canvas semantics: an unparsable font string leaves the previous
        // one in effect.
        if parse_font(font).is_some() {
            self.font = font.to_string();
            self.push(Command::Font(self.font.clone()));
        }
    }

    fn font(&self) -> String {
        self.font.clone()
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(Command::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(Command::TextBaseline(baseline));
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        // Deterministic synthetic metrics: ascent + descent equals the font
        // size, glyphs are half an em wide.
        let size = self.font_size();
        TextMetrics {
            width: text.chars().count() as f64 * size * 0.5,
            ascent: size * 0.75,
            descent: size * 0.25,
        }
    }

    fn fill_text(&mut self, text: &str, pos: Point) {
        self.push(Command::FillText {
            text: text.to_string(),
            pos,
        });
    }

    fn stroke_text(&mut self, text: &str, pos: Point) {
        self.push(Command::StrokeText {
            text: text.to_string(),
            pos,
        });
    }

    fn read_pixels(&mut self, source: Rect) -> Pixmap {
        Pixmap::new(source.width.max(0.0) as u32, source.height.max(0.0) as u32)
    }

    fn write_pixels(&mut self, pixels: &Pixmap, dest: Point) {
        self.push(Command::WritePixels {
            dest,
            width: pixels.width,
            height: pixels.height,
        });
    }

    fn blit_at(&mut self, source: &Self, pos: Point) {
        let dest = Rect::new(pos.x, pos.y, source.width as f64, source.height as f64);
        self.push(Command::Blit { dest, source: None });
    }

    fn blit_rect(&mut self, source: &Self, dest: Rect, src: Option<Rect>) {
        let _ = source;
        self.push(Command::Blit { dest, source: src });
    }
}
