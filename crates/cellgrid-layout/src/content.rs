#![forbid(unsafe_code)]

//! The contract between a slot and whatever it hosts.

use cellgrid_core::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Something that can be measured and placed by a grid.
///
/// The engine only calls the three size queries, and only for the axes a
/// slot left unpinned. A zero (or negative) component of [`max_size`]
/// means "no maximum" on that axis.
///
/// [`max_size`]: Content::max_size
pub trait Content {
    /// Smallest size the content can be squeezed to.
    fn min_size(&self) -> Size;

    /// Size the content would like to have.
    fn pref_size(&self) -> Size;

    /// Largest useful size. Defaults to unbounded on both axes.
    fn max_size(&self) -> Size {
        Size::ZERO
    }

    /// Receive the rectangle assigned by the last layout pass.
    ///
    /// Only host adapters such as [`Composite`](crate::Composite) call this.
    fn set_bounds(&mut self, _bounds: Rect) {}
}

impl<T: Content + ?Sized> Content for &T {
    fn min_size(&self) -> Size {
        (**self).min_size()
    }

    fn pref_size(&self) -> Size {
        (**self).pref_size()
    }

    fn max_size(&self) -> Size {
        (**self).max_size()
    }
}

impl<T: Content + ?Sized> Content for Box<T> {
    fn min_size(&self) -> Size {
        (**self).min_size()
    }

    fn pref_size(&self) -> Size {
        (**self).pref_size()
    }

    fn max_size(&self) -> Size {
        (**self).max_size()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        (**self).set_bounds(bounds);
    }
}

/// Content with fixed, precomputed intrinsic sizes.
///
/// Records the last bounds it was given so hosts can read placements back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intrinsic {
    /// Minimum size.
    pub min: Size,
    /// Preferred size.
    pub pref: Size,
    /// Maximum size (zero axis = unbounded).
    pub max: Size,
    /// Rectangle from the most recent `set_bounds`.
    #[serde(skip)]
    pub bounds: Rect,
}

impl Intrinsic {
    /// Content whose minimum and preferred sizes are both `pref`.
    #[must_use]
    pub const fn fixed(pref: Size) -> Self {
        Self::new(pref, pref, Size::ZERO)
    }

    /// Content that can shrink to nothing but prefers `pref`.
    #[must_use]
    pub const fn flexible(pref: Size) -> Self {
        Self::new(Size::ZERO, pref, Size::ZERO)
    }

    /// Content with explicit min, preferred, and max sizes.
    #[must_use]
    pub const fn new(min: Size, pref: Size, max: Size) -> Self {
        Self {
            min,
            pref,
            max,
            bounds: Rect::new(0, 0, 0, 0),
        }
    }
}

impl Content for Intrinsic {
    fn min_size(&self) -> Size {
        self.min
    }

    fn pref_size(&self) -> Size {
        self.pref
    }

    fn max_size(&self) -> Size {
        self.max
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsic_constructors() {
        let fixed = Intrinsic::fixed(Size::new(4, 2));
        assert_eq!(fixed.min_size(), Size::new(4, 2));
        assert_eq!(fixed.max_size(), Size::ZERO);

        let flexible = Intrinsic::flexible(Size::new(4, 2));
        assert_eq!(flexible.min_size(), Size::ZERO);
        assert_eq!(flexible.pref_size(), Size::new(4, 2));
    }

    #[test]
    fn boxed_content_forwards_bounds() {
        let mut boxed: Box<Intrinsic> = Box::new(Intrinsic::fixed(Size::new(1, 1)));
        boxed.set_bounds(Rect::new(3, 4, 5, 6));
        assert_eq!(boxed.bounds, Rect::new(3, 4, 5, 6));
    }

    #[test]
    fn references_measure_like_the_target() {
        let c = Intrinsic::new(Size::new(1, 2), Size::new(3, 4), Size::new(5, 6));
        let r = &c;
        assert_eq!(Content::max_size(&r), Size::new(5, 6));
    }
}
