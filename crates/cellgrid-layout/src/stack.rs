#![forbid(unsafe_code)]

//! Overlay container: every child occupies the whole area.

use cellgrid_core::geometry::{Rect, Size};

use crate::content::Content;

/// Children drawn on top of each other, each given the full stack area.
///
/// Sizes are the per-axis maxima over the children; the stack itself has
/// no maximum. Useful as slot content when several layers share a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<C> {
    children: Vec<C>,
}

impl<C> Default for Stack<C> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<C> Stack<C> {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child on top.
    pub fn push(&mut self, child: C) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Children, bottom first.
    #[inline]
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Mutable children, bottom first.
    #[inline]
    pub fn children_mut(&mut self) -> &mut [C] {
        &mut self.children
    }

    /// Number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True if the stack has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> FromIterator<C> for Stack<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

impl<C: Content> Content for Stack<C> {
    fn min_size(&self) -> Size {
        self.children
            .iter()
            .fold(Size::ZERO, |acc, c| acc.union(c.min_size()))
    }

    fn pref_size(&self) -> Size {
        self.children
            .iter()
            .fold(Size::ZERO, |acc, c| acc.union(c.pref_size()))
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let local = Rect::from_size(bounds.size());
        for child in &mut self.children {
            child.set_bounds(local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Intrinsic;

    #[test]
    fn sizes_are_per_axis_maxima() {
        let stack: Stack<Intrinsic> = [
            Intrinsic::new(Size::new(10, 1), Size::new(20, 2), Size::new(30, 3)),
            Intrinsic::new(Size::new(2, 8), Size::new(4, 16), Size::ZERO),
        ]
        .into_iter()
        .collect();
        assert_eq!(stack.min_size(), Size::new(10, 8));
        assert_eq!(stack.pref_size(), Size::new(20, 16));
        assert_eq!(stack.max_size(), Size::ZERO);
    }

    #[test]
    fn every_child_gets_the_local_area() {
        let mut stack = Stack::new();
        stack
            .push(Intrinsic::fixed(Size::new(1, 1)))
            .push(Intrinsic::fixed(Size::new(2, 2)));
        stack.set_bounds(Rect::new(40, 50, 7, 9));
        for child in stack.children() {
            assert_eq!(child.bounds, Rect::new(0, 0, 7, 9));
        }
    }

    #[test]
    fn empty_stack_measures_zero() {
        let stack: Stack<Intrinsic> = Stack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pref_size(), Size::ZERO);
    }
}
