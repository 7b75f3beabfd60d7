//! 3×3 homogeneous affine transform.
//!
//! Stored column-by-row as `m11..m33` where `m31`/`m32` carry the
//! translation. Composition is by `mul`; there is no stored inverse —
//! callers that need one (e.g. the camera) build it from the inverted
//! operation sequence.

use crate::point::Point;
use crate::rect::Rect;
use serde::{Deserialize, Serialize};

/// An immutable 3×3 matrix for 2D affine (and projective) transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m11: f64,
    pub m21: f64,
    pub m31: f64,
    pub m12: f64,
    pub m22: f64,
    pub m32: f64,
    pub m13: f64,
    pub m23: f64,
    pub m33: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        m11: 1.0,
        m21: 0.0,
        m31: 0.0,
        m12: 0.0,
        m22: 1.0,
        m32: 0.0,
        m13: 0.0,
        m23: 0.0,
        m33: 1.0,
    };

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f64,
        m21: f64,
        m31: f64,
        m12: f64,
        m22: f64,
        m32: f64,
        m13: f64,
        m23: f64,
        m33: f64,
    ) -> Self {
        Self {
            m11,
            m21,
            m31,
            m12,
            m22,
            m32,
            m13,
            m23,
            m33,
        }
    }

    /// Adds a translation to the composed transform.
    pub fn translate(self, offset: Point) -> Self {
        Self::new(
            self.m11,
            self.m21,
            self.m31 + offset.x,
            self.m12,
            self.m22,
            self.m32 + offset.y,
            self.m13,
            self.m23,
            self.m33,
        )
    }

    /// Adds a rotation (radians) to the composed transform.
    pub fn rotate(self, angle: f64) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();

        Self::new(
            cos * self.m11 + sin * self.m12,
            cos * self.m21 + sin * self.m22,
            cos * self.m31 + sin * self.m32,
            -sin * self.m11 + cos * self.m12,
            -sin * self.m21 + cos * self.m22,
            -sin * self.m31 + cos * self.m32,
            self.m13,
            self.m23,
            self.m33,
        )
    }

    /// Adds a per-axis scale to the composed transform.
    pub fn scale(self, factor: Point) -> Self {
        Self::new(
            self.m11 * factor.x,
            self.m21 * factor.x,
            self.m31 * factor.x,
            self.m12 * factor.y,
            self.m22 * factor.y,
            self.m32 * factor.y,
            self.m13,
            self.m23,
            self.m33,
        )
    }

    /// Adds a uniform scale to the composed transform.
    pub fn scale_uniform(self, factor: f64) -> Self {
        self.scale(Point::splat(factor))
    }

    pub fn mul(self, value: Matrix) -> Self {
        Self::new(
            self.m11 * value.m11 + self.m21 * value.m12 + self.m31 * value.m13,
            self.m11 * value.m21 + self.m21 * value.m22 + self.m31 * value.m23,
            self.m11 * value.m31 + self.m21 * value.m32 + self.m31 * value.m33,
            self.m12 * value.m11 + self.m22 * value.m12 + self.m32 * value.m13,
            self.m12 * value.m21 + self.m22 * value.m22 + self.m32 * value.m23,
            self.m12 * value.m31 + self.m22 * value.m32 + self.m32 * value.m33,
            self.m13 * value.m11 + self.m23 * value.m12 + self.m33 * value.m13,
            self.m13 * value.m21 + self.m23 * value.m22 + self.m33 * value.m23,
            self.m13 * value.m31 + self.m23 * value.m32 + self.m33 * value.m33,
        )
    }

    pub fn transpose(self) -> Self {
        Self::new(
            self.m11, self.m12, self.m13, self.m21, self.m22, self.m23, self.m31, self.m32,
            self.m33,
        )
    }

    /// Transforms a position (translation applies).
    pub fn transform_point(self, point: Point) -> Point {
        let w = point.x * self.m13 + point.y * self.m23 + self.m33;
        Point::new(
            (point.x * self.m11 + point.y * self.m21 + self.m31) / w,
            (point.x * self.m12 + point.y * self.m22 + self.m32) / w,
        )
    }

    /// Transforms a direction vector (translation ignored).
    pub fn transform_vector(self, vector: Point) -> Point {
        let w = vector.x * self.m13 + vector.y * self.m23 + 1.0;
        Point::new(
            (vector.x * self.m11 + vector.y * self.m21) / w,
            (vector.x * self.m12 + vector.y * self.m22) / w,
        )
    }

    /// Transforms both corners of a rect.
    pub fn transform_rect(self, rect: Rect) -> Rect {
        let start = self.transform_point(rect.pos());
        let end = self.transform_point(rect.end());
        Rect::from_points(start, end)
    }

    /// Transforms a point expressed in the coordinate space of `context`:
    /// the point is normalized by the context size, transformed, and scaled
    /// back.
    pub fn transform_with_context(self, point: Point, context: Rect) -> Point {
        self.transform_point(point.anti_scale(context.size()))
            .scale(context.size())
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Component at `(col, row)`, zero-based; `None` outside the 3×3 range.
    pub fn get(self, col: usize, row: usize) -> Option<f64> {
        match (col, row) {
            (0, 0) => Some(self.m11),
            (0, 1) => Some(self.m12),
            (0, 2) => Some(self.m13),
            (1, 0) => Some(self.m21),
            (1, 1) => Some(self.m22),
            (1, 2) => Some(self.m23),
            (2, 0) => Some(self.m31),
            (2, 1) => Some(self.m32),
            (2, 2) => Some(self.m33),
            _ => None,
        }
    }

    /// CSS `matrix(...)` serialization of the affine part.
    pub fn to_css(self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            self.m11, self.m21, self.m12, self.m22, self.m31, self.m32
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_leaves_points_alone() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(Matrix::IDENTITY.transform_point(p), p);
        assert!(Matrix::IDENTITY.is_identity());
    }

    #[test]
    fn translate_moves_points_but_not_vectors() {
        let m = Matrix::IDENTITY.translate(Point::new(10.0, -5.0));
        assert_eq!(m.transform_point(Point::ZERO), Point::new(10.0, -5.0));
        assert_eq!(m.transform_vector(Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn translate_then_scale_scales_the_offset() {
        // The camera relies on this composition order: the whole transform,
        // translation included, is scaled.
        let m = Matrix::IDENTITY.translate(Point::new(10.0, 0.0)).scale_uniform(2.0);
        assert_eq!(m.transform_point(Point::new(1.0, 0.0)), Point::new(22.0, 0.0));
    }

    #[test]
    fn inverse_operation_sequence_round_trips() {
        let offset = Point::new(17.0, -3.0);
        let scale = 2.5;
        let forward = Matrix::IDENTITY.translate(offset).scale_uniform(scale);
        let inverse = Matrix::IDENTITY.scale_uniform(1.0 / scale).translate(-offset);

        let p = Point::new(12.0, 34.0);
        assert_close(inverse.transform_point(forward.transform_point(p)), p);
        assert_close(forward.transform_point(inverse.transform_point(p)), p);
    }

    #[test]
    fn rotate_quarter_turn() {
        let m = Matrix::IDENTITY.rotate(std::f64::consts::FRAC_PI_2);
        assert_close(m.transform_point(Point::new(1.0, 0.0)), Point::new(0.0, -1.0));
    }

    #[test]
    fn get_is_bounds_checked() {
        assert_eq!(Matrix::IDENTITY.get(0, 0), Some(1.0));
        assert_eq!(Matrix::IDENTITY.get(2, 1), Some(0.0));
        assert_eq!(Matrix::IDENTITY.get(3, 0), None);
    }

    #[test]
    fn css_serialization() {
        let m = Matrix::IDENTITY.translate(Point::new(4.0, 5.0));
        assert_eq!(m.to_css(), "matrix(1, 0, 0, 1, 4, 5)");
    }
}
