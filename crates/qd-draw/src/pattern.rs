//! Built-in test patterns.
//!
//! Handy placeholders while developing: a UV ramp for checking texture
//! coordinates and the classic magenta/black missing-texture checker.

use crate::drawer::Drawer;
use crate::surface::{CompositeOp, Surface};
use qd_core::{Color, Point, Rect};

/// Which pattern to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPattern {
    /// Red/green gradient ramp over x/y.
    Uv,
    /// Two-by-two magenta/black checker.
    MissingTexture,
}

/// Renders a test pattern over the whole target drawer. `color_a` and
/// `color_b` override the pattern's default color pair.
pub fn make_test_pattern<S: Surface>(
    pattern: TestPattern,
    target: &mut Drawer<S>,
    color_a: Option<Color>,
    color_b: Option<Color>,
) {
    let size = target.size();

    match pattern {
        TestPattern::MissingTexture => {
            let a = color_a.unwrap_or(Color::MAGENTA);
            let b = color_b.unwrap_or(Color::BLACK);
            let center = size.center();

            target
                .set_style(b)
                .fill_all()
                .set_style(a)
                .fill_rect(Rect::from_pos_size(Point::ZERO, center).floor())
                .fill_rect(Rect::from_pos_size(center, center).floor());
        }
        TestPattern::Uv => {
            let a = color_a.unwrap_or(Color::RED);
            let b = color_b.unwrap_or(Color::GREEN);

            target
                .set_style(Color::BLACK)
                .fill_all()
                .set_composite_op(Some(CompositeOp::Lighten))
                .set_linear_gradient(
                    Point::ZERO,
                    Point::new(size.width, 0.0),
                    &[(0.0, Color::BLACK), (1.0, a)],
                )
                .fill_all()
                .set_linear_gradient(
                    Point::ZERO,
                    Point::new(0.0, size.height),
                    &[(0.0, Color::BLACK), (1.0, b)],
                )
                .fill_all()
                .set_composite_op(None);
        }
    }
}
