//! Geometric primitives for argument diagram layout and hit testing.
//!
//! This module provides the geometric types used throughout argmap for
//! positioning claim boxes, grouping contexts and clipping relation edges.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//! - [`distance_to_segment`] - Point to line segment distance, used for edge hit testing
//! - [`offset_position`] - Where a center-to-center line crosses a box boundary
//!
//! # Coordinate System
//!
//! argmap uses a screen coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::Deserialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use argmap_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        self.lerp(other, 0.5)
    }

    /// Returns the point at fraction `t` of the way from `self` to `other`.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use argmap_core::geometry::Point;
    /// let from = Point::new(0.0, 0.0);
    /// let to = Point::new(30.0, 60.0);
    ///
    /// let third = from.lerp(to, 1.0 / 3.0);
    /// assert_eq!(third.x(), 10.0);
    /// assert_eq!(third.y(), 20.0);
    /// ```
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Squared euclidean distance to another point
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the top-left corner of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if either dimension is zero
    pub fn is_degenerate(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
///
/// A bounds whose coordinates are all NaN is *empty*: [`Bounds::including`]
/// treats NaN coordinates as absent, so folding boxes into
/// [`Bounds::empty`] yields the box covering all of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Creates bounds from the top-left corner coordinates and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Creates an empty bounds that every [`Bounds::including`] call replaces
    pub fn empty() -> Self {
        Self {
            min_x: f32::NAN,
            min_y: f32::NAN,
            max_x: f32::NAN,
            max_y: f32::NAN,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::new(top_left.x, top_left.y, size.width, size.height)
    }

    /// Returns true when no box has been included yet
    pub fn is_empty(self) -> bool {
        self.min_x.is_nan() || self.min_y.is_nan()
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the smallest bounds covering both `self` and `other`.
    ///
    /// NaN coordinates on either side are ignored, which makes
    /// [`Bounds::empty`] the identity of this operation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use argmap_core::geometry::Bounds;
    /// let header = Bounds::new(0.0, 0.0, 100.0, 30.0);
    /// let content = Bounds::new(10.0, 40.0, 120.0, 80.0);
    ///
    /// let combined = header.including(content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    ///
    /// assert_eq!(Bounds::empty().including(header), header);
    /// ```
    pub fn including(self, other: Self) -> Self {
        // f32::min/max return the non-NaN operand
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `dx` on the left and right and `dy` on the top and bottom
    pub fn pad(self, dx: f32, dy: f32) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns true if `point` lies strictly inside the bounds.
    ///
    /// Points on the border are outside.
    pub fn contains_strict(self, point: Point) -> bool {
        point.x > self.min_x && point.y > self.min_y && point.x < self.max_x && point.y < self.max_y
    }
}

/// Padding on four sides, as used for claim text padding and canvas margins
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates insets from explicit values in CSS order (top, right, bottom, left)
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Mutable access to a single side, addressed by name.
    ///
    /// Used by dotted style paths such as `claim.padding.left`.
    pub(crate) fn side_mut(&mut self, side: &str) -> Option<&mut f32> {
        match side {
            "top" => Some(&mut self.top),
            "right" => Some(&mut self.right),
            "bottom" => Some(&mut self.bottom),
            "left" => Some(&mut self.left),
            _ => None,
        }
    }

    /// Sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// Squared distance from `p` to the closest point of the segment `[v, w]`.
///
/// The projection of `p` onto the line through `v` and `w` is clamped to
/// the segment, so points beyond either end measure to that endpoint. A
/// zero-length segment measures to `v`.
pub fn distance_to_segment_squared(p: Point, v: Point, w: Point) -> f32 {
    let length_squared = v.distance_squared(w);

    if length_squared == 0.0 {
        return p.distance_squared(v);
    }

    let t = ((p.x - v.x) * (w.x - v.x) + (p.y - v.y) * (w.y - v.y)) / length_squared;
    let t = t.clamp(0.0, 1.0);

    p.distance_squared(v.lerp(w, t))
}

/// Distance from `p` to the closest point of the segment `[v, w]`.
///
/// # Examples
///
/// ```
/// # use argmap_core::geometry::{Point, distance_to_segment};
/// let v = Point::new(0.0, 0.0);
/// let w = Point::new(10.0, 0.0);
///
/// assert_eq!(distance_to_segment(Point::new(5.0, 3.0), v, w), 3.0);
/// assert_eq!(distance_to_segment(Point::new(14.0, 3.0), v, w), 5.0);
/// ```
pub fn distance_to_segment(p: Point, v: Point, w: Point) -> f32 {
    distance_to_segment_squared(p, v, w).sqrt()
}

/// Where the line from `source`'s center to `target`'s center enters `target`.
///
/// Arrows are drawn to this point so that they stop at the box edge rather
/// than at its center. The left or right edge is used unless the line is
/// steeper than the box's diagonal, in which case the top or bottom edge is
/// used. A target with zero width or height (a point such as a relation
/// joint) returns its center unchanged, as does a source sharing the
/// target's center.
///
/// Swapping the arguments yields the matching point on the other box, so a
/// clipped edge is `(offset_position(t, s), offset_position(s, t))`.
///
/// # Examples
///
/// ```
/// # use argmap_core::geometry::{Bounds, Point, offset_position};
/// let source = Bounds::new(0.0, 0.0, 20.0, 20.0);
/// let target = Bounds::new(100.0, 0.0, 40.0, 20.0);
///
/// assert_eq!(offset_position(source, target), Point::new(100.0, 10.0));
/// assert_eq!(offset_position(target, source), Point::new(20.0, 10.0));
/// ```
pub fn offset_position(source: Bounds, target: Bounds) -> Point {
    let center = target.center();

    if target.to_size().is_degenerate() {
        return center;
    }

    let delta = source.center().sub_point(center);

    if delta.is_zero() {
        return center;
    }

    let half_width = target.width() / 2.0;
    let half_height = target.height() / 2.0;

    let to_vertical_edge = if delta.x != 0.0 {
        half_width / delta.x.abs()
    } else {
        f32::INFINITY
    };
    let to_horizontal_edge = if delta.y != 0.0 {
        half_height / delta.y.abs()
    } else {
        f32::INFINITY
    };

    center.add_point(delta.scale(to_vertical_edge.min(to_horizontal_edge)))
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    // ===================
    // Property Checks
    // ===================

    /// The clipped point lies on the target's border.
    fn check_offset_on_target_border(source: Bounds, target: Bounds) -> Result<(), TestCaseError> {
        prop_assume!(source.center() != target.center());

        let p = offset_position(source, target);
        let c = target.center();
        let dx = (p.x() - c.x()).abs();
        let dy = (p.y() - c.y()).abs();
        let hw = target.width() / 2.0;
        let hh = target.height() / 2.0;

        let on_vertical_edge = approx_eq!(f32, dx, hw, epsilon = 0.01) && dy <= hh + 0.01;
        let on_horizontal_edge = approx_eq!(f32, dy, hh, epsilon = 0.01) && dx <= hw + 0.01;
        prop_assert!(on_vertical_edge || on_horizontal_edge);
        Ok(())
    }

    /// Both clipped points lie on the line through the two centers.
    fn check_offset_is_collinear(source: Bounds, target: Bounds) -> Result<(), TestCaseError> {
        prop_assume!(source.center() != target.center());

        let s = source.center();
        let t = target.center();
        for p in [offset_position(source, target), offset_position(target, source)] {
            let cross = (t.x() - s.x()) * (p.y() - s.y()) - (t.y() - s.y()) * (p.x() - s.x());
            let scale = s.distance_squared(t).sqrt().max(1.0);
            prop_assert!((cross / scale).abs() < 0.05);
        }
        Ok(())
    }

    /// Distance to a segment never exceeds the distance to either endpoint.
    fn check_segment_distance_bounded(p: Point, v: Point, w: Point) -> Result<(), TestCaseError> {
        let d = distance_to_segment_squared(p, v, w);
        prop_assert!(d <= p.distance_squared(v) + 0.01);
        prop_assert!(d <= p.distance_squared(w) + 0.01);
        prop_assert!(d >= 0.0);
        Ok(())
    }

    /// Including is commutative and covers both inputs.
    fn check_including_covers(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.including(b2);
        prop_assert_eq!(merged, b2.including(b1));
        for b in [b1, b2] {
            prop_assert!(merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= b.max_y());
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn offset_on_target_border(source in bounds_strategy(), target in bounds_strategy()) {
            check_offset_on_target_border(source, target)?;
        }

        #[test]
        fn offset_is_collinear(source in bounds_strategy(), target in bounds_strategy()) {
            check_offset_is_collinear(source, target)?;
        }

        #[test]
        fn segment_distance_bounded(p in point_strategy(), v in point_strategy(), w in point_strategy()) {
            check_segment_distance_bounded(p, v, w)?;
        }

        #[test]
        fn including_covers(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_including_covers(b1, b2)?;
        }
    }
}
