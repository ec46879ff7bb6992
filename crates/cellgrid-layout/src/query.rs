#![forbid(unsafe_code)]

//! Resolved size bounds for one slot during one layout pass.

use cellgrid_core::geometry::Size;
use serde::{Deserialize, Serialize};

/// Minimum, preferred, and maximum size of a slot at a point in time.
///
/// Produced by [`Slot::query`](crate::Slot::query) and consumed by the
/// engine. Never cached beyond a single `compute_size`/`compute_layout`
/// call.
///
/// # Invariants
///
/// After [`normalized`](Self::normalized):
/// - `min <= pref` on both axes.
/// - When an axis of `max` is positive, `min` and `pref` do not exceed it.
/// - A non-positive `max` axis means "no maximum".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeQuery {
    /// Minimum size.
    pub min: Size,
    /// Preferred size.
    pub pref: Size,
    /// Maximum size.
    pub max: Size,
}

impl SizeQuery {
    /// All-zero query, used for spacers.
    pub const EMPTY: Self = Self {
        min: Size::ZERO,
        pref: Size::ZERO,
        max: Size::ZERO,
    };

    /// Clamp `min`/`pref` to a positive `max`, then raise `pref` to `min`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.max.width > 0 {
            self.min.width = self.min.width.min(self.max.width);
            self.pref.width = self.pref.width.min(self.max.width);
        }
        if self.max.height > 0 {
            self.min.height = self.min.height.min(self.max.height);
            self.pref.height = self.pref.height.min(self.max.height);
        }
        self.pref.width = self.pref.width.max(self.min.width);
        self.pref.height = self.pref.height.max(self.min.height);
        self
    }

    /// True if the width axis has a maximum.
    #[inline]
    pub const fn has_max_width(&self) -> bool {
        self.max.width > 0
    }

    /// True if the height axis has a maximum.
    #[inline]
    pub const fn has_max_height(&self) -> bool {
        self.max.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(min: (i32, i32), pref: (i32, i32), max: (i32, i32)) -> SizeQuery {
        SizeQuery {
            min: Size::new(min.0, min.1),
            pref: Size::new(pref.0, pref.1),
            max: Size::new(max.0, max.1),
        }
    }

    #[test]
    fn positive_max_clamps_min_and_pref() {
        let q = query((50, 5), (80, 8), (40, 6)).normalized();
        assert_eq!(q.min, Size::new(40, 5));
        assert_eq!(q.pref, Size::new(40, 6));
    }

    #[test]
    fn non_positive_max_is_unbounded() {
        let q = query((50, 5), (80, 8), (0, -3)).normalized();
        assert_eq!(q.min, Size::new(50, 5));
        assert_eq!(q.pref, Size::new(80, 8));
        assert!(!q.has_max_width());
        assert!(!q.has_max_height());
    }

    #[test]
    fn pref_never_below_min() {
        let q = query((30, 9), (10, 2), (0, 0)).normalized();
        assert_eq!(q.pref, Size::new(30, 9));
    }
}
