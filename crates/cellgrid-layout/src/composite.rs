#![forbid(unsafe_code)]

//! Host-facing container: a grid, its engine, and its border insets.
//!
//! [`Composite`] is the adapter a host toolkit wraps. The host asks it for
//! min/preferred sizes when measuring, then calls [`Composite::layout`]
//! with the area it was given; every hosted value receives its rectangle
//! through [`Content::set_bounds`].
//!
//! A `Composite` is itself [`Content`], so composites nest: an outer grid
//! measures an inner one like any other slot and lays it out when the
//! inner composite receives its bounds.

use cellgrid_core::geometry::{Rect, Sides, Size};

use crate::align::Align;
use crate::builder::GridBuilder;
use crate::content::Content;
use crate::engine::{GridConfig, GridLayout, LayoutEngine, SizeSummary};
use crate::slot::{Slot, SlotStyle};

/// A grid plus the state needed to size and place it.
#[derive(Debug)]
pub struct Composite<C> {
    grid: GridBuilder<C>,
    engine: LayoutEngine,
    insets: Sides,
    bounds: Rect,
}

impl<C> Default for Composite<C> {
    fn default() -> Self {
        Self::with_config(GridConfig::default())
    }
}

impl<C> Composite<C> {
    /// Create an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty composite with grid padding and alignment.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            grid: GridBuilder::new(),
            engine: LayoutEngine::with_config(config),
            insets: Sides::ZERO,
            bounds: Rect::default(),
        }
    }

    /// Append a slot hosting `content`.
    pub fn add_cell(&mut self, content: C) -> &mut Slot<C> {
        self.grid.add(content)
    }

    /// Append an empty spacer slot.
    pub fn add_empty(&mut self) -> &mut Slot<C> {
        self.grid.add_empty()
    }

    /// Append `content`.
    #[deprecated(note = "use `add_cell`, which returns the slot for styling")]
    pub fn push(&mut self, content: C) {
        self.add_cell(content);
    }

    /// End the current row; returns the new row's defaults.
    pub fn row(&mut self) -> &mut SlotStyle {
        self.grid.start_row()
    }

    /// Grid-wide slot defaults.
    pub fn defaults(&mut self) -> &mut SlotStyle {
        self.grid.defaults()
    }

    /// Remove the `content_index`-th content slot (spacers not counted).
    pub fn remove(&mut self, content_index: usize) -> Option<Slot<C>> {
        self.grid.remove_slot(content_index)
    }

    /// Remove the slot hosting a value equal to `content`.
    pub fn remove_content(&mut self, content: &C) -> Option<Slot<C>>
    where
        C: PartialEq,
    {
        self.grid.remove_content(content)
    }

    /// Remove every slot.
    pub fn remove_all(&mut self) {
        self.grid.remove_all();
    }

    /// Slot index of the first value equal to `content`.
    pub fn find(&self, content: &C) -> Option<usize>
    where
        C: PartialEq,
    {
        self.grid.find(content)
    }

    /// Slot hosting a value equal to `content`.
    pub fn slot_of(&self, content: &C) -> Option<&Slot<C>>
    where
        C: PartialEq,
    {
        self.find(content).and_then(|index| self.grid.slot(index))
    }

    /// Mutable slot hosting a value equal to `content`.
    pub fn slot_of_mut(&mut self, content: &C) -> Option<&mut Slot<C>>
    where
        C: PartialEq,
    {
        let index = self.find(content)?;
        self.grid.slot_mut(index)
    }

    /// Pad all four sides of the grid.
    pub fn pad(&mut self, pad: i32) -> &mut Self {
        self.engine.set_pad(Sides::all(pad));
        self
    }

    /// Pad each side of the grid.
    pub fn pad_sides(&mut self, top: i32, left: i32, bottom: i32, right: i32) -> &mut Self {
        self.engine.set_pad(Sides::new(top, left, bottom, right));
        self
    }

    /// Pad the top of the grid.
    pub fn pad_top(&mut self, top: i32) -> &mut Self {
        self.engine.set_pad(Sides {
            top,
            ..self.engine.config().pad
        });
        self
    }

    /// Pad the left of the grid.
    pub fn pad_left(&mut self, left: i32) -> &mut Self {
        self.engine.set_pad(Sides {
            left,
            ..self.engine.config().pad
        });
        self
    }

    /// Pad the bottom of the grid.
    pub fn pad_bottom(&mut self, bottom: i32) -> &mut Self {
        self.engine.set_pad(Sides {
            bottom,
            ..self.engine.config().pad
        });
        self
    }

    /// Pad the right of the grid.
    pub fn pad_right(&mut self, right: i32) -> &mut Self {
        self.engine.set_pad(Sides {
            right,
            ..self.engine.config().pad
        });
        self
    }

    /// Place the grid within the area given to [`layout`](Self::layout).
    pub fn align(&mut self, align: Align) -> &mut Self {
        self.engine.set_align(align);
        self
    }

    /// Border insets, treated exactly like grid padding.
    pub fn insets(&mut self, insets: Sides) -> &mut Self {
        self.insets = insets;
        self
    }

    /// Current grid padding.
    #[inline]
    pub fn padding(&self) -> Sides {
        self.engine.config().pad
    }

    /// Current grid alignment.
    #[inline]
    pub fn alignment(&self) -> Align {
        self.engine.config().align
    }

    /// Current border insets.
    #[inline]
    pub fn border_insets(&self) -> Sides {
        self.insets
    }

    /// Drop cached sizes, for content whose intrinsic size changed in
    /// place.
    pub fn invalidate(&mut self) {
        self.engine.invalidate();
    }

    /// Column count from the last measurement.
    #[inline]
    pub fn columns(&self) -> usize {
        self.engine.columns()
    }

    /// Row count from the last measurement.
    #[inline]
    pub fn rows(&self) -> usize {
        self.engine.rows()
    }

    /// The underlying grid.
    #[inline]
    pub fn grid(&self) -> &GridBuilder<C> {
        &self.grid
    }

    /// The underlying engine.
    #[inline]
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Slots in order.
    pub fn cells(&self) -> &[Slot<C>] {
        self.grid.slots()
    }

    /// Iterate over slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot<C>> {
        self.grid.iter()
    }

    /// Area from the most recent [`layout`](Self::layout) or
    /// [`Content::set_bounds`].
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<C: Content> Composite<C> {
    /// Minimum and preferred size, cached until the next edit.
    ///
    /// [`Content::min_size`] and [`Content::pref_size`] give the same
    /// answers without the cache.
    pub fn size(&mut self) -> SizeSummary {
        self.engine.compute_size(&self.grid, self.insets)
    }

    /// Lay the grid out in `size` and hand every hosted value its
    /// rectangle.
    pub fn layout(&mut self, size: Size) -> GridLayout {
        let layout = self.engine.compute_layout(&self.grid, size, self.insets);
        self.grid.apply_bounds(layout.slots());
        self.bounds = Rect::new(self.bounds.x, self.bounds.y, size.width, size.height);
        layout
    }
}

impl<'a, C> IntoIterator for &'a Composite<C> {
    type Item = &'a Slot<C>;
    type IntoIter = std::slice::Iter<'a, Slot<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.grid.iter()
    }
}

/// Measures through a throwaway engine, since `Content` takes `&self`.
impl<C: Content> Content for Composite<C> {
    fn min_size(&self) -> Size {
        LayoutEngine::with_config(*self.engine.config())
            .compute_size(&self.grid, self.insets)
            .min
    }

    fn pref_size(&self) -> Size {
        LayoutEngine::with_config(*self.engine.config())
            .compute_size(&self.grid, self.insets)
            .pref
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.layout(bounds.size());
        self.bounds = bounds;
    }
}
