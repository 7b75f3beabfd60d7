//! Axis-aligned rectangle.
//!
//! Extents may be negative while a rect is being built from two arbitrary
//! points; `min`/`max`/`contains_point` stay correct in that state. Use
//! `snap_to_grid`/`floor` or `Rect::from_points(min, max)` to normalize.

use crate::point::Point;
use serde::{Deserialize, Serialize};

/// An immutable rectangle: position plus (possibly negative) extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Constraints for [`Rect::align`]. Unset fields impose nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignOptions {
    /// Width of the resulting rectangle.
    pub width: Option<f64>,
    /// Height of the resulting rectangle.
    pub height: Option<f64>,
    /// Distance from the left side of the container.
    pub left: Option<f64>,
    /// Distance from the right side of the container.
    pub right: Option<f64>,
    /// Distance from the top side of the container.
    pub top: Option<f64>,
    /// Distance from the bottom side of the container.
    pub bottom: Option<f64>,
    /// Shorthand for both width and height.
    pub size: Option<f64>,
    /// Shorthand for all four edge distances.
    pub padding: Option<f64>,
}

/// Either a rect or a point, for operations spanning both (see [`Rect::union`]).
#[derive(Debug, Clone, Copy)]
pub enum Extent {
    Rect(Rect),
    Point(Point),
}

impl From<Rect> for Extent {
    fn from(rect: Rect) -> Self {
        Extent::Rect(rect)
    }
}

impl From<Point> for Extent {
    fn from(point: Point) -> Self {
        Extent::Point(point)
    }
}

impl Rect {
    /// Position `[0, 0]`, size `[0, 0]`.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);
    /// Position `[0, 0]`, size `[1, 1]`.
    pub const ONE: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect spanning from `a` to `b`; extents are negative when `b` lies
    /// above or left of `a`.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    pub fn from_pos_size(pos: Point, size: Point) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Rect at the origin with the given size.
    pub fn from_size(size: Point) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    /// Rect centered on `center`.
    pub fn from_center_size(center: Point, size: Point) -> Self {
        Self::from_pos_size(center - size * 0.5, size)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The corner opposite to `pos`.
    pub fn end(self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(self) -> Point {
        self.pos() + self.size() * 0.5
    }

    /// Lowest-component corner, correct for negative extents.
    pub fn min(self) -> Point {
        Point::new(
            self.x.min(self.x + self.width),
            self.y.min(self.y + self.height),
        )
    }

    /// Highest-component corner, correct for negative extents.
    pub fn max(self) -> Point {
        Point::new(
            self.x.max(self.x + self.width),
            self.y.max(self.y + self.height),
        )
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Same size, moved to the origin.
    pub fn origin(self) -> Self {
        Self::new(0.0, 0.0, self.width, self.height)
    }

    // ─── Derived rects ───────────────────────────────────────────────────

    pub fn translate(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Grows (or shrinks) the extent by `delta`, keeping the position.
    pub fn expand(self, delta: Point) -> Self {
        Self::new(self.x, self.y, self.width + delta.x, self.height + delta.y)
    }

    /// Multiplies the extent by a scalar, keeping the position.
    pub fn mul(self, amount: f64) -> Self {
        Self::new(self.x, self.y, self.width * amount, self.height * amount)
    }

    /// Multiplies all four components by a scalar.
    pub fn mul_all(self, amount: f64) -> Self {
        Self::new(
            self.x * amount,
            self.y * amount,
            self.width * amount,
            self.height * amount,
        )
    }

    /// Element-wise multiplication of the extent.
    pub fn scale_size(self, factor: Point) -> Self {
        Self::new(self.x, self.y, self.width * factor.x, self.height * factor.y)
    }

    /// Element-wise division of the extent.
    pub fn anti_scale_size(self, factor: Point) -> Self {
        Self::new(self.x, self.y, self.width / factor.x, self.height / factor.y)
    }

    pub fn floor(self) -> Self {
        Self::new(
            self.x.floor(),
            self.y.floor(),
            self.width.floor(),
            self.height.floor(),
        )
    }

    pub fn ceil_size(self) -> Self {
        Self::new(self.x, self.y, self.width.ceil(), self.height.ceil())
    }

    /// Position on the pixel-center grid, extents floored; strokes of odd
    /// width drawn on the result do not antialias.
    pub fn pixel_perfect(self) -> Self {
        Self::new(
            self.x.floor() + 0.5,
            self.y.floor() + 0.5,
            self.width.floor(),
            self.height.floor(),
        )
    }

    /// Smallest integer-aligned rect covering this one.
    pub fn snap_to_grid(self) -> Self {
        let start = self.pos().floor();
        let end = self.end().ceil();
        Self::from_points(start, end)
    }

    pub fn with_x(self, x: f64) -> Self {
        Self::new(x, self.y, self.width, self.height)
    }

    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y, self.width, self.height)
    }

    pub fn with_width(self, width: f64) -> Self {
        Self::new(self.x, self.y, width, self.height)
    }

    pub fn with_height(self, height: f64) -> Self {
        Self::new(self.x, self.y, self.width, height)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Half-open containment test, correct for negative extents.
    pub fn contains_point(self, point: Point) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        let this_end = self.end();
        let other_end = other.end();
        other_end.x >= self.x && other_end.y >= self.y && other.x <= this_end.x && other.y <= this_end.y
    }

    pub fn size_equals(self, other: Rect) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Clamps a point's components into this rect.
    pub fn clamp_point(self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.x, self.x + self.width),
            point.y.clamp(self.y, self.y + self.height),
        )
    }

    /// Considering a segment from the rect center extending by `vector`,
    /// returns the clipped vector that stays inside the rect boundary.
    pub fn clamp_vector(self, vector: Point) -> Point {
        let half = self.size() * 0.5;

        let length = vector.length();
        let direction = vector * (1.0 / length);

        let right = if direction.x > 0.0 {
            Point::new(half.x, 0.0)
        } else {
            Point::new(-half.x, 0.0)
        };
        let down = if direction.y > 0.0 {
            Point::new(0.0, half.y)
        } else {
            Point::new(0.0, -half.y)
        };

        let (t1, _) = Point::line_intersection_scalars(Point::ZERO, direction, right, Point::DOWN);
        let (t2, _) = Point::line_intersection_scalars(Point::ZERO, direction, down, Point::RIGHT);

        direction * length.min(t1).min(t2)
    }

    /// Point at the given fraction of this rect (`[0,0]` = pos, `[1,1]` = end).
    pub fn frac_point(self, frac: Point) -> Point {
        self.pos() + self.size().scale(frac)
    }

    /// Positions a sub-rectangle inside this rect (treated as a container of
    /// `width × height`) so that every given constraint is satisfied.
    ///
    /// Per axis: an explicit extent anchors to the start edge constraint if
    /// present, else to the end edge, else centers. Without an explicit
    /// extent, the extent is derived from both edge constraints, or extends
    /// to the far side from a single one, and defaults to zero when the axis
    /// is unconstrained.
    pub fn align(self, options: AlignOptions) -> Rect {
        let mut options = options;
        if let Some(size) = options.size {
            options.width = Some(size);
            options.height = Some(size);
        }
        if let Some(padding) = options.padding {
            options.top = Some(padding);
            options.left = Some(padding);
            options.right = Some(padding);
            options.bottom = Some(padding);
        }

        let mut x = 0.0;
        let mut width = 0.0;
        let mut y = 0.0;
        let mut height = 0.0;

        if let Some(w) = options.width {
            width = w;
            if let Some(left) = options.left {
                x = left;
            } else if let Some(right) = options.right {
                x = self.width - right - w;
            } else {
                x = (self.width - width) / 2.0;
            }
        } else if let (Some(left), Some(right)) = (options.left, options.right) {
            x = left;
            width = self.width - x - right;
        } else if let Some(left) = options.left {
            x = left;
            width = self.width - x;
        } else if let Some(right) = options.right {
            width = self.width - right;
            x = 0.0;
        }

        if let Some(h) = options.height {
            height = h;
            if let Some(top) = options.top {
                y = top;
            } else if let Some(bottom) = options.bottom {
                y = self.height - bottom - h;
            } else {
                y = (self.height - height) / 2.0;
            }
        } else if let (Some(top), Some(bottom)) = (options.top, options.bottom) {
            y = top;
            height = self.height - y - bottom;
        } else if let Some(top) = options.top {
            y = top;
            height = self.height - y;
        } else if let Some(bottom) = options.bottom {
            height = self.height - bottom;
            y = 0.0;
        }

        Rect::new(x, y, width, height)
    }

    /// Shrinks this rect's size to match an aspect ratio (height / width);
    /// the result sits at the origin.
    pub fn aspect_ratio(self, ratio: f64) -> Rect {
        if ratio > 1.0 {
            let width = self.height / ratio;
            if width > self.width {
                let width_ratio = self.width / width;
                let height = self.height * width_ratio;
                return Rect::new(0.0, 0.0, width * width_ratio, height);
            }
            Rect::new(0.0, 0.0, width, self.height)
        } else {
            let height = self.width * ratio;
            if height > self.height {
                let width_ratio = self.height / height;
                let width = self.width * width_ratio;
                return Rect::new(0.0, 0.0, width, height * width_ratio);
            }
            Rect::new(0.0, 0.0, self.width, height)
        }
    }

    /// Smallest rect containing every given rect and point.
    pub fn union(targets: impl IntoIterator<Item = Extent>) -> Rect {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for target in targets {
            let (min, max) = match target {
                Extent::Rect(rect) => (rect.min(), rect.max()),
                Extent::Point(point) => (point, point),
            };

            min_x = min_x.min(min.x);
            min_y = min_y.min(min.y);
            max_x = max_x.max(max.x);
            max_y = max_y.max(max.y);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn origin_moves_to_zero_and_keeps_size() {
        let r = Rect::new(4.0, -2.0, 10.0, 20.0);
        assert_eq!(r.origin().pos(), Point::ZERO);
        assert_eq!(r.origin().size(), r.size());
    }

    #[test]
    fn min_max_handle_negative_extents() {
        let r = Rect::from_points(Point::new(10.0, 10.0), Point::new(2.0, 4.0));
        assert_eq!(r.width, -8.0);
        assert_eq!(r.min(), Point::new(2.0, 4.0));
        assert_eq!(r.max(), Point::new(10.0, 10.0));
    }

    #[test]
    fn contains_point_under_negative_extents() {
        let r = Rect::from_points(Point::new(10.0, 10.0), Point::ZERO);
        assert!(r.contains_point(Point::new(5.0, 5.0)));
        assert!(!r.contains_point(Point::new(-1.0, 5.0)));
        // Half-open: the max edge is outside.
        assert!(!r.contains_point(Point::new(10.0, 10.0)));
        assert!(r.contains_point(Point::ZERO));
    }

    #[test]
    fn align_width_with_left_anchor() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            width: Some(10.0),
            left: Some(5.0),
            ..Default::default()
        });
        assert_eq!(aligned.x, 5.0);
        assert_eq!(aligned.width, 10.0);
    }

    #[test]
    fn align_width_with_right_anchor() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            width: Some(10.0),
            right: Some(5.0),
            ..Default::default()
        });
        assert_eq!(aligned.x, 85.0);
        assert_eq!(aligned.width, 10.0);
    }

    #[test]
    fn align_extent_from_both_edges() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            left: Some(5.0),
            right: Some(5.0),
            ..Default::default()
        });
        assert_eq!(aligned.x, 5.0);
        assert_eq!(aligned.width, 90.0);
    }

    #[test]
    fn align_centers_when_only_extent_given() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            width: Some(20.0),
            height: Some(10.0),
            ..Default::default()
        });
        assert_eq!(aligned, Rect::new(40.0, 20.0, 20.0, 10.0));
    }

    #[test]
    fn align_single_edge_extends_to_far_side() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let from_left = container.align(AlignOptions {
            left: Some(30.0),
            ..Default::default()
        });
        assert_eq!(from_left.x, 30.0);
        assert_eq!(from_left.width, 70.0);

        let from_right = container.align(AlignOptions {
            right: Some(30.0),
            ..Default::default()
        });
        assert_eq!(from_right.x, 0.0);
        assert_eq!(from_right.width, 70.0);
    }

    #[test]
    fn align_unconstrained_axis_defaults_to_zero() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            width: Some(10.0),
            ..Default::default()
        });
        assert_eq!(aligned.y, 0.0);
        assert_eq!(aligned.height, 0.0);
    }

    #[test]
    fn align_padding_expands_to_all_edges() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            padding: Some(10.0),
            ..Default::default()
        });
        assert_eq!(aligned, Rect::new(10.0, 10.0, 80.0, 30.0));
    }

    #[test]
    fn align_size_expands_to_both_extents() {
        let container = Rect::new(0.0, 0.0, 100.0, 50.0);
        let aligned = container.align(AlignOptions {
            size: Some(10.0),
            left: Some(0.0),
            top: Some(0.0),
            ..Default::default()
        });
        assert_eq!(aligned, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn union_spans_rects_and_points() {
        let bounds = Rect::union([
            Rect::new(0.0, 0.0, 10.0, 10.0).into(),
            Point::new(-5.0, 3.0).into(),
            Point::new(4.0, 20.0).into(),
        ]);
        assert_eq!(bounds, Rect::new(-5.0, 0.0, 15.0, 20.0));
    }

    #[test]
    fn snap_to_grid_covers_original() {
        let r = Rect::new(0.25, 0.75, 9.5, 3.1);
        assert_eq!(r.snap_to_grid(), Rect::new(0.0, 0.0, 10.0, 4.0));
    }

    #[test]
    fn clamp_vector_stops_at_boundary() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Heading straight right from the center: boundary is 5 away.
        let clipped = r.clamp_vector(Point::new(20.0, 0.0));
        assert!((clipped.x - 5.0).abs() < 1e-12, "got {clipped:?}");
        // Short vectors pass through untouched.
        let free = r.clamp_vector(Point::new(2.0, 0.0));
        assert!((free.x - 2.0).abs() < 1e-12, "got {free:?}");
    }

    #[test]
    fn frac_point_interpolates() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.frac_point(Point::new(0.5, 1.0)), Point::new(60.0, 70.0));
    }
}
