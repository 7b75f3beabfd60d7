//! 2D point / vector type.
//!
//! `Point` is used both as a position and as a direction vector; operations
//! that only make sense for one of the two (e.g. `normalize`, `to_angle`)
//! say so in their docs. Everything returns a new value.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// `[0, 0]`
    pub const ZERO: Point = Point::new(0.0, 0.0);
    /// `[1, 1]`
    pub const ONE: Point = Point::new(1.0, 1.0);
    /// `[0, -1]` — screen coordinates, y grows downward.
    pub const UP: Point = Point::new(0.0, -1.0);
    /// `[0, 1]`
    pub const DOWN: Point = Point::new(0.0, 1.0);
    /// `[-1, 0]`
    pub const LEFT: Point = Point::new(-1.0, 0.0);
    /// `[1, 0]`
    pub const RIGHT: Point = Point::new(1.0, 0.0);
    /// `[NaN, NaN]` — the "nowhere" position (e.g. pointer left the surface).
    pub const NAN: Point = Point::new(f64::NAN, f64::NAN);
    /// The four cardinal directions, clockwise from up.
    pub const DIRECTIONS: [Point; 4] = [Point::UP, Point::RIGHT, Point::DOWN, Point::LEFT];

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Unit vector from an angle in radians.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    // ─── Component-wise maps ─────────────────────────────────────────────

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Snaps to the pixel-center grid so odd-width strokes land on whole
    /// pixels instead of antialiasing across two.
    pub fn pixel_perfect(self) -> Self {
        Self::new(self.x.floor() + 0.5, self.y.floor() + 0.5)
    }

    /// Reciprocal of each component.
    pub fn invert(self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y)
    }

    /// Each component raised to `power`.
    pub fn pow(self, power: f64) -> Self {
        Self::new(self.x.powf(power), self.y.powf(power))
    }

    /// Replaces the x component.
    pub fn with_x(self, x: f64) -> Self {
        Self::new(x, self.y)
    }

    /// Replaces the y component.
    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y)
    }

    // ─── Vector algebra ──────────────────────────────────────────────────

    /// Element-wise product.
    pub fn scale(self, other: Point) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Element-wise quotient.
    pub fn anti_scale(self, other: Point) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Unit-length copy; the zero vector stays zero.
    pub fn normalize(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        self * (1.0 / self.length())
    }

    /// A vector orthogonal to this one (clockwise).
    pub fn tangent(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Angle of this vector in radians.
    pub fn to_angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Shrinks to `max_length` when longer, otherwise unchanged.
    pub fn clamp_length(self, max_length: f64) -> Self {
        if self.length() > max_length {
            self.normalize() * max_length
        } else {
            self
        }
    }

    /// Product of the components.
    pub fn area(self) -> f64 {
        self.x * self.y
    }

    /// Linear interpolation towards `target`.
    pub fn lerp(self, target: Point, frac: f64) -> Self {
        self + (target - self) * frac
    }

    pub fn dot(a: Point, b: Point) -> f64 {
        a.x * b.x + a.y * b.y
    }

    /// Component-wise minimum.
    pub fn min(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y))
    }

    /// Component-wise maximum.
    pub fn max(a: Point, b: Point) -> Self {
        Self::new(a.x.max(b.x), a.y.max(b.y))
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// True when at least one component is NaN.
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Euclidean distance to `other`.
    pub fn dist(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn dist_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Canonical `"x:y"` string for use as a map key.
    pub fn key(self) -> String {
        format!("{}:{}", self.x, self.y)
    }

    /// Deterministic hash of the components in `[0, 1)`, usable as a
    /// position-seeded pseudorandom number.
    pub fn hash01(self) -> f64 {
        let t = self.x * 12.9898 + self.y * 78.233;
        let y = t.sin() * 43758.5453;
        y - y.floor()
    }

    /// Direction from `start` to `end` snapped to the dominant cardinal axis.
    pub fn cardinal_direction(start: Point, end: Point) -> Self {
        let diff = end - start;
        if diff.x.abs() > diff.y.abs() {
            Self::new(diff.x, 0.0)
        } else {
            Self::new(0.0, diff.y)
        }
    }

    /// Scale factor required to fit an object of size `target` into
    /// `container` under the given fit rule.
    pub fn object_fit(target: Point, container: Point, fit: ObjectFit) -> f64 {
        let width_ratio = target.x / container.x;
        let height_ratio = target.y / container.y;

        match fit {
            ObjectFit::Contain => (1.0 / width_ratio).min(1.0 / height_ratio),
            ObjectFit::Cover => (1.0 / width_ratio).max(1.0 / height_ratio),
            // Never upscale: only shrink when the object overflows.
            ObjectFit::Perfect => {
                if width_ratio > 1.0 || height_ratio > 1.0 {
                    (1.0 / width_ratio).min(1.0 / height_ratio)
                } else {
                    1.0
                }
            }
        }
    }

    /// Projects `target` onto the line through `start` with direction
    /// `direction` (expected unit length).
    pub fn project(start: Point, direction: Point, target: Point) -> Projection {
        let length = Self::dot(direction, target - start);
        Projection {
            start,
            direction,
            length,
        }
    }

    /// Scalars `(t1, t2)` such that `pos1 + dir1 * t1 == pos2 + dir2 * t2`.
    /// Both are `INFINITY` for parallel lines — check before use.
    pub fn line_intersection_scalars(pos1: Point, dir1: Point, pos2: Point, dir2: Point) -> (f64, f64) {
        let denom = dir2.y * dir1.x - dir2.x * dir1.y;
        if denom == 0.0 {
            return (f64::INFINITY, f64::INFINITY);
        }

        let t1 = (dir2.x * (pos1.y - pos2.y) - dir2.y * (pos1.x - pos2.x)) / denom;
        let t2 = (dir1.x * (pos1.y - pos2.y) - dir1.y * (pos1.x - pos2.x)) / denom;

        (t1, t2)
    }

    /// Intersection point of two lines; components are infinite when the
    /// lines are parallel.
    pub fn line_intersection(pos1: Point, dir1: Point, pos2: Point, dir2: Point) -> Point {
        let (t1, _) = Self::line_intersection_scalars(pos1, dir1, pos2, dir2);
        pos1 + dir1 * t1
    }
}

/// Fit rule for [`Point::object_fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFit {
    /// Largest scale where the object fits entirely inside the container.
    Contain,
    /// Smallest scale where the object covers the whole container.
    Cover,
    /// Like `Contain` but never scales up.
    Perfect,
}

/// Result of projecting a point onto a line, see [`Point::project`].
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    start: Point,
    direction: Point,
    /// Signed distance from the line start to the projected point.
    pub length: f64,
}

impl Projection {
    /// Position of the projected point.
    pub fn point(&self) -> Point {
        self.start + self.direction * self.length
    }

    /// Projected point clamped to the segment `[start, start + direction * max_length]`.
    pub fn point_clamped(&self, max_length: f64) -> Point {
        self.start + self.direction * self.length.clamp(0.0, max_length)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
