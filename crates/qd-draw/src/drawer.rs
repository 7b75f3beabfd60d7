//! Stateful fluent wrapper around a [`Surface`].
//!
//! The drawer owns the logical size of the surface and is the only path
//! that resizes it. Infallible operations chain through `&mut Self`;
//! operations that can reject (resizing a fragile surface, a font the
//! backend refuses) return `Result` instead.

use crate::surface::{
    CompositeOp, GradientStop, LineCap, LineJoin, Paint, Pixmap, Surface, TextAlign, TextBaseline,
};
use qd_core::{Color, Matrix, Point, Rect};
use thiserror::Error;

/// Errors from drawer operations. These are programmer errors — prevent
/// them with valid usage rather than recovering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawerError {
    #[error("cannot set size of a fragile surface")]
    FragileResize,
    #[error("invalid font {requested:?} (surface returned {resolved:?})")]
    InvalidFont { requested: String, resolved: String },
}

/// Weight/style modifier prepended to the font string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontModifier {
    Bold,
    Italic,
    ItalicBold,
}

impl FontModifier {
    fn as_str(self) -> &'static str {
        match self {
            FontModifier::Bold => "bold",
            FontModifier::Italic => "italic",
            FontModifier::ItalicBold => "italic bold",
        }
    }
}

/// Options for [`Drawer::fill_text`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font family. Defaults to `sans-serif`.
    pub font: Option<String>,
    /// Font size in pixels. Defaults to 16.
    pub size: Option<f64>,
    /// Horizontal alignment relative to the position.
    pub align: TextAlign,
    /// Vertical alignment relative to the position.
    pub baseline: TextBaseline,
    /// Stroke each line before filling it.
    pub outline: bool,
    /// Weight/style modifier.
    pub modifier: Option<FontModifier>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: None,
            size: None,
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
            outline: false,
            modifier: None,
        }
    }
}

impl TextOptions {
    /// Just a size, everything else default.
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }
}

/// Stateful wrapper owning one rendering surface.
pub struct Drawer<S: Surface> {
    surface: S,
    size: Rect,
    fragile: bool,
}

impl<S: Surface> Drawer<S> {
    /// Wraps a surface and sizes it to its native layout box (or keeps the
    /// current pixel size when the backend has none).
    pub fn new(surface: S) -> Self {
        let mut drawer = Self {
            surface,
            size: Rect::ZERO,
            fragile: false,
        };
        let (width, height) = drawer
            .surface
            .native_size()
            .unwrap_or((drawer.surface.width(), drawer.surface.height()));
        drawer.resize_surface(Point::new(width as f64, height as f64));
        drawer
    }

    /// Wraps a surface whose pixel dimensions are owned by another party.
    /// Any attempt to resize through this drawer fails with
    /// [`DrawerError::FragileResize`].
    pub fn fragile(surface: S) -> Self {
        let size = Rect::new(0.0, 0.0, surface.width() as f64, surface.height() as f64);
        Self {
            surface,
            size,
            fragile: true,
        }
    }

    /// Current logical size, at the origin.
    pub fn size(&self) -> Rect {
        self.size
    }

    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ─── Size management ─────────────────────────────────────────────────

    fn resize_surface(&mut self, size: Point) {
        let size = Point::new(size.x.max(1.0), size.y.max(1.0));
        self.size = Rect::from_size(size);

        let width = size.x as u32;
        let height = size.y as u32;
        if self.surface.width() == width && self.surface.height() == height {
            // Same pixel dimensions: clear in place instead of reallocating.
            self.surface.clear();
        } else {
            log::trace!("surface resize {width}x{height}");
            self.surface.resize(width, height);
        }
    }

    /// Changes the size of the surface. Dimensions are clamped to at
    /// least 1; resizing to the current pixel size clears in place.
    pub fn set_size(&mut self, size: Point) -> Result<&mut Self, DrawerError> {
        if self.fragile {
            return Err(DrawerError::FragileResize);
        }
        self.resize_surface(size);
        Ok(self)
    }

    /// Re-derives the size from the host layout box.
    pub fn set_native_size(&mut self) -> Result<&mut Self, DrawerError> {
        if self.fragile {
            return Err(DrawerError::FragileResize);
        }
        let (width, height) = self
            .surface
            .native_size()
            .unwrap_or((self.surface.width(), self.surface.height()));
        self.resize_surface(Point::new(width as f64, height as f64));
        Ok(self)
    }

    /// Clears the surface — defined as resizing to the current size, which
    /// takes the same-size clear path.
    pub fn clear(&mut self) -> Result<&mut Self, DrawerError> {
        self.set_size(self.size.size())
    }

    /// Resizes only when the size actually differs.
    pub fn match_size(&mut self, size: Point) -> Result<&mut Self, DrawerError> {
        if self.size.size() != size {
            self.set_size(size)?;
        }
        Ok(self)
    }

    // ─── Styles ──────────────────────────────────────────────────────────

    /// Sets both the fill and stroke style.
    pub fn set_style(&mut self, paint: impl Into<Paint>) -> &mut Self {
        let paint = paint.into();
        self.surface.set_fill_paint(&paint);
        self.surface.set_stroke_paint(&paint);
        self
    }

    /// Sets only the fill style.
    pub fn set_fill_style(&mut self, paint: impl Into<Paint>) -> &mut Self {
        self.surface.set_fill_paint(&paint.into());
        self
    }

    /// Sets only the stroke style.
    pub fn set_stroke_style(&mut self, paint: impl Into<Paint>) -> &mut Self {
        self.surface.set_stroke_paint(&paint.into());
        self
    }

    /// Sets a linear gradient as both fill and stroke style.
    pub fn set_linear_gradient(&mut self, start: Point, end: Point, stops: &[(f64, Color)]) -> &mut Self {
        let paint = Paint::LinearGradient {
            start,
            end,
            stops: collect_stops(stops),
        };
        self.surface.set_fill_paint(&paint);
        self.surface.set_stroke_paint(&paint);
        self
    }

    /// Sets a radial gradient as both fill and stroke style. With no `end`
    /// the gradient is concentric; with no `end_radius` the given radius
    /// becomes the outer one and the inner starts at zero.
    pub fn set_radial_gradient(
        &mut self,
        start: Point,
        start_radius: f64,
        end: Option<Point>,
        end_radius: Option<f64>,
        stops: &[(f64, Color)],
    ) -> &mut Self {
        let end = end.unwrap_or(start);
        let (start_radius, end_radius) = match end_radius {
            Some(end_radius) => (start_radius, end_radius),
            None => (0.0, start_radius),
        };

        let paint = Paint::RadialGradient {
            start,
            start_radius,
            end,
            end_radius,
            stops: collect_stops(stops),
        };
        self.surface.set_fill_paint(&paint);
        self.surface.set_stroke_paint(&paint);
        self
    }

    pub fn set_stroke_width(&mut self, width: f64) -> &mut Self {
        self.surface.set_line_width(width);
        self
    }

    /// Sets the dash pattern; `None` makes strokes solid again.
    pub fn set_line_dash(&mut self, dash: Option<&[f64]>) -> &mut Self {
        self.surface.set_line_dash(dash.unwrap_or(&[]));
        self
    }

    pub fn set_line_dash_offset(&mut self, offset: f64) -> &mut Self {
        self.surface.set_line_dash_offset(offset);
        self
    }

    pub fn set_line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.surface.set_line_cap(cap);
        self
    }

    pub fn set_line_join(&mut self, join: LineJoin) -> &mut Self {
        self.surface.set_line_join(join);
        self
    }

    /// Sets the composite operation; `None` restores source-over.
    pub fn set_composite_op(&mut self, op: Option<CompositeOp>) -> &mut Self {
        self.surface.set_composite_op(op.unwrap_or_default());
        self
    }

    pub fn set_image_smoothing(&mut self, enabled: bool) -> &mut Self {
        self.surface.set_image_smoothing(enabled);
        self
    }

    // ─── Paths ───────────────────────────────────────────────────────────

    pub fn begin_path(&mut self) -> &mut Self {
        self.surface.begin_path();
        self
    }

    /// Closes the path with a line back to its start point.
    pub fn close_path(&mut self) -> &mut Self {
        self.surface.close_path();
        self
    }

    pub fn move_to(&mut self, pos: Point) -> &mut Self {
        self.surface.move_to(pos);
        self
    }

    pub fn line_to(&mut self, pos: Point) -> &mut Self {
        self.surface.line_to(pos);
        self
    }

    /// Cubic bezier from the current point through two control points.
    pub fn bezier_to(&mut self, cp1: Point, cp2: Point, pos: Point) -> &mut Self {
        self.surface.bezier_to(cp1, cp2, pos);
        self
    }

    /// Full circle.
    pub fn arc(&mut self, pos: Point, radius: f64) -> &mut Self {
        self.surface
            .arc(pos, radius, 0.0, std::f64::consts::TAU, false);
        self
    }

    /// Circular arc segment.
    pub fn arc_segment(
        &mut self,
        pos: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> &mut Self {
        self.surface
            .arc(pos, radius, start_angle, end_angle, anticlockwise);
        self
    }

    /// Full ellipse.
    pub fn ellipse(&mut self, pos: Point, radius: Point) -> &mut Self {
        self.surface
            .ellipse(pos, radius, 0.0, 0.0, std::f64::consts::TAU, false);
        self
    }

    /// Elliptic arc segment.
    pub fn ellipse_segment(
        &mut self,
        pos: Point,
        radius: Point,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> &mut Self {
        self.surface
            .ellipse(pos, radius, rotation, start_angle, end_angle, anticlockwise);
        self
    }

    /// Adds a rect to the current path.
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.surface.rect(rect);
        self
    }

    /// Adds a polyline through the given points.
    pub fn shape(&mut self, points: &[Point]) -> &mut Self {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.surface.move_to(*first);
            for point in iter {
                self.surface.line_to(*point);
            }
        }
        self
    }

    // ─── Painting ────────────────────────────────────────────────────────

    pub fn fill(&mut self) -> &mut Self {
        self.surface.fill();
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.surface.stroke();
        self
    }

    /// Uses the current path as a clip region.
    pub fn clip(&mut self) -> &mut Self {
        self.surface.clip();
        self
    }

    pub fn fill_rect(&mut self, rect: Rect) -> &mut Self {
        self.surface.fill_rect(rect);
        self
    }

    /// Fills the whole surface.
    pub fn fill_all(&mut self) -> &mut Self {
        let size = self.size;
        self.surface.fill_rect(size);
        self
    }

    pub fn stroke_rect(&mut self, rect: Rect) -> &mut Self {
        self.surface.stroke_rect(rect);
        self
    }

    /// Prints text at `pos`. Multi-line input is split on `\n` and advanced
    /// by the measured line height. The composed font string is read back
    /// from the surface — a mismatch (backend rejected or normalized it
    /// away) is a hard error rather than drawing with the wrong font.
    pub fn fill_text(
        &mut self,
        text: &str,
        pos: Point,
        options: &TextOptions,
    ) -> Result<&mut Self, DrawerError> {
        let size = options.size.unwrap_or(16.0);
        let family = options.font.as_deref().unwrap_or("sans-serif");
        let mut font = format!("{size}px {family}");
        if let Some(modifier) = options.modifier {
            font = format!("{} {font}", modifier.as_str());
        }

        self.surface.set_font(&font);
        let resolved = self.surface.font();
        if resolved != font {
            return Err(DrawerError::InvalidFont {
                requested: font,
                resolved,
            });
        }

        self.surface.set_text_align(options.align);
        self.surface.set_text_baseline(options.baseline);

        // Line advance from a reference sample covering ascenders and
        // descenders.
        let metrics = self.surface.measure_text(",\u{c1}");
        let line_height = metrics.ascent + metrics.descent;

        for (i, line) in text.split('\n').enumerate() {
            let line_pos = pos + Point::new(0.0, line_height * i as f64);
            if options.outline {
                self.surface.stroke_text(line, line_pos);
            }
            self.surface.fill_text(line, line_pos);
        }

        Ok(self)
    }

    /// Measures a text run under the current font.
    pub fn measure_text(&self, text: &str) -> crate::surface::TextMetrics {
        self.surface.measure_text(text)
    }

    // ─── Transforms ──────────────────────────────────────────────────────

    /// Pushes the current rendering settings; pop with [`Drawer::restore`].
    pub fn save(&mut self) -> &mut Self {
        self.surface.save();
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        self.surface.restore();
        self
    }

    pub fn translate(&mut self, offset: Point) -> &mut Self {
        self.surface.translate(offset);
        self
    }

    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        self.surface.rotate(angle);
        self
    }

    pub fn scale(&mut self, factor: Point) -> &mut Self {
        self.surface.scale(factor);
        self
    }

    /// Multiplies the current transform by `matrix`.
    pub fn transform(&mut self, matrix: &Matrix) -> &mut Self {
        self.surface.transform(matrix);
        self
    }

    /// Replaces the current transform with `matrix`.
    pub fn override_transform(&mut self, matrix: &Matrix) -> &mut Self {
        self.surface.set_transform(matrix);
        self
    }

    // ─── Images & pixels ─────────────────────────────────────────────────

    /// Copies another drawer's surface to the origin at natural size.
    pub fn blit(&mut self, image: &Drawer<S>) -> &mut Self {
        self.surface.blit_at(&image.surface, Point::ZERO);
        self
    }

    /// Copies another drawer's surface to `pos` at natural size.
    pub fn blit_at(&mut self, image: &Drawer<S>, pos: Point) -> &mut Self {
        self.surface.blit_at(&image.surface, pos);
        self
    }

    /// Copies another drawer's surface into `dest`, optionally from a
    /// sub-region.
    pub fn blit_rect(&mut self, image: &Drawer<S>, dest: Rect, source: Option<Rect>) -> &mut Self {
        self.surface.blit_rect(&image.surface, dest, source);
        self
    }

    /// Reads pixels back; `None` reads the whole surface.
    pub fn read_pixels(&mut self, source: Option<Rect>) -> Pixmap {
        let source = source.unwrap_or(self.size);
        self.surface.read_pixels(source)
    }

    /// Writes pixels at `dest` (origin when `None`), bypassing the
    /// transform.
    pub fn write_pixels(&mut self, pixels: &Pixmap, dest: Option<Point>) -> &mut Self {
        self.surface.write_pixels(pixels, dest.unwrap_or(Point::ZERO));
        self
    }

    /// An empty pixmap matching the surface size.
    pub fn make_empty_pixmap(&self) -> Pixmap {
        Pixmap::new(self.size.width as u32, self.size.height as u32)
    }

    /// Applies a closure to this drawer, for slotting helper functions into
    /// a fluent chain.
    pub fn with(&mut self, thunk: impl FnOnce(&mut Self)) -> &mut Self {
        thunk(self);
        self
    }
}

fn collect_stops(stops: &[(f64, Color)]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|&(offset, color)| GradientStop { offset, color })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Command, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn drawer(width: u32, height: u32) -> Drawer<RecordingSurface> {
        Drawer::new(RecordingSurface::new(width, height))
    }

    #[test]
    fn set_size_clamps_to_one() {
        let mut d = drawer(100, 100);
        d.set_size(Point::ZERO).unwrap();
        assert_eq!(d.size(), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(d.surface().width(), 1);
        assert_eq!(d.surface().height(), 1);
    }

    #[test]
    fn same_size_set_size_clears_in_place() {
        let mut d = drawer(64, 48);
        d.surface_mut().take_commands();

        d.set_size(Point::new(64.0, 48.0)).unwrap();
        assert_eq!(d.surface_mut().take_commands(), vec![Command::Clear]);

        d.set_size(Point::new(32.0, 48.0)).unwrap();
        assert_eq!(
            d.surface_mut().take_commands(),
            vec![Command::Resize {
                width: 32,
                height: 48
            }]
        );
    }

    #[test]
    fn clear_is_a_same_size_resize() {
        let mut d = drawer(20, 20);
        d.surface_mut().take_commands();
        d.clear().unwrap();
        assert_eq!(d.surface_mut().take_commands(), vec![Command::Clear]);
    }

    #[test]
    fn fragile_surface_rejects_all_resize_paths() {
        let mut d = Drawer::fragile(RecordingSurface::new(32, 32));
        assert_eq!(
            d.set_size(Point::new(64.0, 64.0)).err(),
            Some(DrawerError::FragileResize)
        );
        assert_eq!(d.set_native_size().err(), Some(DrawerError::FragileResize));
        assert_eq!(d.clear().err(), Some(DrawerError::FragileResize));
        // Size bookkeeping still reflects the externally managed surface.
        assert_eq!(d.size(), Rect::new(0.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn match_size_skips_equal_sizes() {
        let mut d = drawer(64, 48);
        d.surface_mut().take_commands();
        d.match_size(Point::new(64.0, 48.0)).unwrap();
        assert_eq!(d.surface_mut().take_commands(), vec![]);
        d.match_size(Point::new(10.0, 48.0)).unwrap();
        assert_eq!(
            d.surface_mut().take_commands(),
            vec![Command::Resize {
                width: 10,
                height: 48
            }]
        );
    }

    #[test]
    fn multi_line_text_advances_by_line_height() {
        let mut d = drawer(100, 100);
        d.surface_mut().take_commands();
        d.fill_text("ab\ncd", Point::new(5.0, 40.0), &TextOptions::sized(20.0))
            .unwrap();

        let commands = d.surface_mut().take_commands();
        let lines: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                Command::FillText { text, pos } => Some((text.as_str(), *pos)),
                _ => None,
            })
            .collect();

        // Recording metrics: line height == font size.
        assert_eq!(
            lines,
            vec![
                ("ab", Point::new(5.0, 40.0)),
                ("cd", Point::new(5.0, 60.0)),
            ]
        );
    }

    #[test]
    fn outline_strokes_before_fill() {
        let mut d = drawer(100, 100);
        d.surface_mut().take_commands();
        let options = TextOptions {
            outline: true,
            ..TextOptions::sized(10.0)
        };
        d.fill_text("x", Point::ZERO, &options).unwrap();

        let commands = d.surface_mut().take_commands();
        let stroke_idx = commands
            .iter()
            .position(|c| matches!(c, Command::StrokeText { .. }))
            .expect("no stroke");
        let fill_idx = commands
            .iter()
            .position(|c| matches!(c, Command::FillText { .. }))
            .expect("no fill");
        assert!(stroke_idx < fill_idx);
    }

    #[test]
    fn rejected_font_is_an_error() {
        let mut d = drawer(100, 100);
        // The recording surface mimics canvas behavior: an unparsable font
        // string is ignored, so the read-back check must fail.
        let options = TextOptions {
            font: Some(String::new()),
            ..TextOptions::sized(12.0)
        };
        let err = d.fill_text("x", Point::ZERO, &options).err().expect("font accepted");
        assert!(matches!(err, DrawerError::InvalidFont { .. }));
    }

    #[test]
    fn radial_gradient_defaults() {
        let mut d = drawer(10, 10);
        d.surface_mut().take_commands();
        d.set_radial_gradient(Point::new(5.0, 5.0), 4.0, None, None, &[(0.0, Color::BLACK)]);

        let commands = d.surface_mut().take_commands();
        match &commands[0] {
            Command::FillPaint(Paint::RadialGradient {
                start,
                start_radius,
                end,
                end_radius,
                ..
            }) => {
                assert_eq!(*start, Point::new(5.0, 5.0));
                assert_eq!(*end, Point::new(5.0, 5.0));
                assert_eq!(*start_radius, 0.0);
                assert_eq!(*end_radius, 4.0);
            }
            other => panic!("expected radial fill paint, got {other:?}"),
        }
    }

    #[test]
    fn shape_is_move_then_lines() {
        let mut d = drawer(10, 10);
        d.surface_mut().take_commands();
        d.shape(&[Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(
            d.surface_mut().take_commands(),
            vec![
                Command::MoveTo(Point::ZERO),
                Command::LineTo(Point::new(1.0, 0.0)),
                Command::LineTo(Point::new(1.0, 1.0)),
            ]
        );
    }
}
