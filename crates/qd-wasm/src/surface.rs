//! [`Surface`] implementation over an HTML `<canvas>` 2D context.
//!
//! Most context calls return `Result` because JS can throw on non-finite
//! arguments; the context validates its own input, so failures are
//! discarded with `let _ =` rather than propagated.

use qd_core::{Matrix, Point, Rect};
use qd_draw::{
    CompositeOp, LineCap, LineJoin, Paint, Pixmap, Surface, TextAlign, TextBaseline, TextMetrics,
};
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// A paint surface backed by `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, canvas: HtmlCanvasElement) -> Self {
        Self { ctx, canvas }
    }

    pub fn ctx(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_paint(&self, paint: &Paint, stroke: bool) {
        match paint {
            Paint::Solid(color) => {
                let style = color.to_css();
                if stroke {
                    self.ctx.set_stroke_style_str(&style);
                } else {
                    self.ctx.set_fill_style_str(&style);
                }
            }
            Paint::LinearGradient { start, end, stops } => {
                let gradient = self
                    .ctx
                    .create_linear_gradient(start.x, start.y, end.x, end.y);
                for stop in stops {
                    let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
                }
                if stroke {
                    self.ctx.set_stroke_style_canvas_gradient(&gradient);
                } else {
                    self.ctx.set_fill_style_canvas_gradient(&gradient);
                }
            }
            Paint::RadialGradient {
                start,
                start_radius,
                end,
                end_radius,
                stops,
            } => {
                match self.ctx.create_radial_gradient(
                    start.x,
                    start.y,
                    *start_radius,
                    end.x,
                    end.y,
                    *end_radius,
                ) {
                    Ok(gradient) => {
                        for stop in stops {
                            let _ =
                                gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
                        }
                        if stroke {
                            self.ctx.set_stroke_style_canvas_gradient(&gradient);
                        } else {
                            self.ctx.set_fill_style_canvas_gradient(&gradient);
                        }
                    }
                    Err(_) => {
                        // Degenerate radii: fall back to the first stop.
                        let style = stops
                            .first()
                            .map(|s| s.color.to_css())
                            .unwrap_or_else(|| "#000000".to_string());
                        if stroke {
                            self.ctx.set_stroke_style_str(&style);
                        } else {
                            self.ctx.set_fill_style_str(&style);
                        }
                    }
                }
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn native_size(&self) -> Option<(u32, u32)> {
        Some((
            self.canvas.scroll_width().max(0) as u32,
            self.canvas.scroll_height().max(0) as u32,
        ))
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn set_fill_paint(&mut self, paint: &Paint) {
        self.apply_paint(paint, false);
    }

    fn set_stroke_paint(&mut self, paint: &Paint) {
        self.apply_paint(paint, true);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let array = js_sys::Array::new();
        for segment in segments {
            array.push(&JsValue::from_f64(*segment));
        }
        let _ = self.ctx.set_line_dash(&array);
    }

    fn set_line_dash_offset(&mut self, offset: f64) {
        self.ctx.set_line_dash_offset(offset);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join.as_str());
    }

    fn set_composite_op(&mut self, op: CompositeOp) {
        let _ = self.ctx.set_global_composite_operation(op.as_str());
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, pos: Point) {
        self.ctx.move_to(pos.x, pos.y);
    }

    fn line_to(&mut self, pos: Point) {
        self.ctx.line_to(pos.x, pos.y);
    }

    fn bezier_to(&mut self, c1: Point, c2: Point, pos: Point) {
        self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, pos.x, pos.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        let _ = self.ctx.arc_with_anticlockwise(
            center.x,
            center.y,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        );
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
        let _ = self.ctx.ellipse_with_anticlockwise(
            center.x,
            center.y,
            radius.x,
            radius.y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        );
    }

    fn rect(&mut self, rect: Rect) {
        self.ctx.rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Point) {
        let _ = self.ctx.translate(offset.x, offset.y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.ctx.rotate(angle);
    }

    fn scale(&mut self, factor: Point) {
        let _ = self.ctx.scale(factor.x, factor.y);
    }

    fn transform(&mut self, matrix: &Matrix) {
        let _ = self.ctx.transform(
            matrix.m11, matrix.m12, matrix.m21, matrix.m22, matrix.m31, matrix.m32,
        );
    }

    fn set_transform(&mut self, matrix: &Matrix) {
        let _ = self.ctx.set_transform(
            matrix.m11, matrix.m12, matrix.m21, matrix.m22, matrix.m31, matrix.m32,
        );
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn font(&self) -> String {
        self.ctx.font()
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        match self.ctx.measure_text(text) {
            Ok(metrics) => TextMetrics {
                width: metrics.width(),
                ascent: metrics.actual_bounding_box_ascent(),
                descent: metrics.actual_bounding_box_descent(),
            },
            Err(_) => TextMetrics::default(),
        }
    }

    fn fill_text(&mut self, text: &str, pos: Point) {
        let _ = self.ctx.fill_text(text, pos.x, pos.y);
    }

    fn stroke_text(&mut self, text: &str, pos: Point) {
        let _ = self.ctx.stroke_text(text, pos.x, pos.y);
    }

    fn read_pixels(&mut self, source: Rect) -> Pixmap {
        match self
            .ctx
            .get_image_data(source.x, source.y, source.width, source.height)
        {
            Ok(data) => Pixmap {
                width: data.width(),
                height: data.height(),
                data: data.data().0,
            },
            Err(_) => Pixmap::new(source.width.max(0.0) as u32, source.height.max(0.0) as u32),
        }
    }

    fn write_pixels(&mut self, pixels: &Pixmap, dest: Point) {
        let Ok(data) = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(pixels.data.as_slice()),
            pixels.width,
            pixels.height,
        ) else {
            log::debug!("write_pixels: could not build ImageData");
            return;
        };
        let _ = self.ctx.put_image_data(&data, dest.x, dest.y);
    }

    fn blit_at(&mut self, source: &Self, pos: Point) {
        let _ = self
            .ctx
            .draw_image_with_html_canvas_element(&source.canvas, pos.x, pos.y);
    }

    fn blit_rect(&mut self, source: &Self, dest: Rect, src: Option<Rect>) {
        match src {
            None => {
                let _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                    &source.canvas,
                    dest.x,
                    dest.y,
                    dest.width,
                    dest.height,
                );
            }
            Some(src) => {
                let _ = self
                    .ctx
                    .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        &source.canvas,
                        src.x,
                        src.y,
                        src.width,
                        src.height,
                        dest.x,
                        dest.y,
                        dest.width,
                        dest.height,
                    );
            }
        }
    }
}
