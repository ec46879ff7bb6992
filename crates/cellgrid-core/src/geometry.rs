#![forbid(unsafe_code)]

//! Integer geometry shared by the builder, the engine, and hosts.
//!
//! All values are `i32`. Positions may legitimately be negative (a grid that
//! is wider than its container and centered starts left of the origin), so
//! the types do not use unsigned integers the way terminal cell grids do.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if either axis is zero or negative.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Per-axis maximum of two sizes.
    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// An axis-aligned rectangle in container-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Width and height of this rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the rectangle covers no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True if `other` lies entirely inside `self`.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink the rectangle by the given insets.
    ///
    /// The result never has a negative width or height.
    #[must_use]
    pub fn inner(&self, sides: Sides) -> Self {
        Self::new(
            self.x + sides.left,
            self.y + sides.top,
            (self.width - sides.horizontal()).max(0),
            (self.height - sides.vertical()).max(0),
        )
    }
}

/// Four edge values in `top, left, bottom, right` order.
///
/// Used for padding, spacing, and border insets alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides {
    /// Top edge.
    pub top: i32,
    /// Left edge.
    pub left: i32,
    /// Bottom edge.
    pub bottom: i32,
    /// Right edge.
    pub right: i32,
}

impl Sides {
    /// All edges zero.
    pub const ZERO: Self = Self::all(0);

    /// Create sides in `top, left, bottom, right` order.
    #[inline]
    #[must_use]
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same value on every edge.
    #[inline]
    #[must_use]
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `left + right`.
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Sides {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(-5, 3, 10, 4);
        assert_eq!(r.right(), 5);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.size(), Size::new(10, 4));
        assert!(!r.is_empty());
    }

    #[test]
    fn empty_when_any_axis_non_positive() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(Size::ZERO.is_empty());
    }

    #[test]
    fn contains_rect_is_inclusive_of_edges() {
        let outer = Rect::new(0, 0, 100, 50);
        assert!(outer.contains_rect(&Rect::new(0, 0, 100, 50)));
        assert!(outer.contains_rect(&Rect::new(10, 10, 20, 20)));
        assert!(!outer.contains_rect(&Rect::new(90, 0, 20, 10)));
    }

    #[test]
    fn inner_clamps_to_zero() {
        let r = Rect::new(0, 0, 10, 10).inner(Sides::all(8));
        assert_eq!(r, Rect::new(8, 8, 0, 0));
    }

    #[test]
    fn sides_sum_and_totals() {
        let s = Sides::new(1, 2, 3, 4) + Sides::all(1);
        assert_eq!(s, Sides::new(2, 3, 4, 5));
        assert_eq!(s.horizontal(), 8);
        assert_eq!(s.vertical(), 6);
    }

    #[test]
    fn size_union_takes_per_axis_max() {
        assert_eq!(Size::new(3, 9).union(Size::new(7, 2)), Size::new(7, 9));
    }

    #[test]
    fn geometry_serializes_as_plain_fields() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}
