#![forbid(unsafe_code)]

//! Ordered slot storage and row/column topology.
//!
//! [`GridBuilder`] is the arena: slots live in one `Vec` in insertion order
//! and every relation between them (row, starting column, the slot directly
//! above) is expressed as an index into that `Vec`, recomputed by
//! [`GridBuilder::derive_topology`]. Nothing holds a pointer into the
//! arena across mutations.
//!
//! Every structural edit draws a fresh [`GridBuilder::generation`] from a
//! process-wide counter, so no two differing grids share one; the engine
//! compares generations to decide whether cached sizes are still valid.
//!
//! # Row rules
//!
//! - Slots accumulate into the current row until one marked row-end.
//! - A trailing run without a row-end still forms a final row.
//! - The column count is the widest row, counting spans.

use std::sync::atomic::{AtomicU64, Ordering};

use cellgrid_core::geometry::Rect;

use crate::content::Content;
use crate::slot::{Slot, SlotStyle};

/// Position of one slot in the derived topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Starting column.
    pub column: usize,
    /// Row index.
    pub row: usize,
    /// Columns spanned (at least 1).
    pub colspan: usize,
    /// Index of the slot in the previous row that starts at the same
    /// column, if any.
    pub above: Option<usize>,
}

/// Row/column partition of a slot sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    columns: usize,
    rows: usize,
    placements: Vec<Placement>,
}

impl Topology {
    /// Number of columns (widest row, spans included).
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Placement of every slot, in slot order.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of one slot.
    #[inline]
    pub fn placement(&self, index: usize) -> Option<&Placement> {
        self.placements.get(index)
    }
}

/// Accumulates slots and row boundaries.
#[derive(Debug, Clone)]
pub struct GridBuilder<C> {
    slots: Vec<Slot<C>>,
    defaults: SlotStyle,
    row_defaults: Option<SlotStyle>,
    generation: u64,
}

impl<C> Default for GridBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GridBuilder<C> {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            defaults: SlotStyle::default(),
            row_defaults: None,
            generation: next_generation(),
        }
    }

    /// Grid-wide defaults copied into slots of rows opened afterwards, and
    /// into slots added before the first [`start_row`](Self::start_row).
    pub fn defaults(&mut self) -> &mut SlotStyle {
        &mut self.defaults
    }

    /// Append a slot with optional content.
    ///
    /// The slot copies the open row's defaults, or the grid defaults if no
    /// row has been started.
    pub fn add_slot(&mut self, content: Option<C>) -> &mut Slot<C> {
        let defaults = self.row_defaults.as_ref().unwrap_or(&self.defaults);
        let slot = Slot::new(content, defaults);
        self.bump();
        self.slots.push(slot);
        let last = self.slots.len() - 1;
        &mut self.slots[last]
    }

    /// Append a slot hosting `content`.
    pub fn add(&mut self, content: C) -> &mut Slot<C> {
        self.add_slot(Some(content))
    }

    /// Append an empty spacer slot.
    pub fn add_empty(&mut self) -> &mut Slot<C> {
        self.add_slot(None)
    }

    /// End the current row and open a new one.
    ///
    /// Returns the new row's defaults, freshly copied from the grid
    /// defaults, for the slots added to this row.
    pub fn start_row(&mut self) -> &mut SlotStyle {
        if let Some(last) = self.slots.last_mut() {
            last.set_row_end(true);
        }
        self.bump();
        self.row_defaults.insert(self.defaults)
    }

    /// Remove the slot at `content_index`, counting only slots that host
    /// content.
    ///
    /// If the removed slot ended its row, the slot before it takes over
    /// that role. Out-of-range indices are a no-op and return `None`.
    pub fn remove_slot(&mut self, content_index: usize) -> Option<Slot<C>> {
        let index = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.has_content())
            .nth(content_index)
            .map(|(index, _)| index)?;
        Some(self.remove_at(index))
    }

    /// Remove the first slot hosting a value equal to `content`.
    pub fn remove_content(&mut self, content: &C) -> Option<Slot<C>>
    where
        C: PartialEq,
    {
        let index = self.find(content)?;
        Some(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> Slot<C> {
        if index > 0 && self.slots[index].is_row_end() {
            self.slots[index - 1].set_row_end(true);
        }
        self.bump();
        self.slots.remove(index)
    }

    /// Remove every slot.
    pub fn remove_all(&mut self) {
        self.slots.clear();
        self.bump();
    }

    /// All slots in order.
    #[inline]
    pub fn slots(&self) -> &[Slot<C>] {
        &self.slots
    }

    /// Slot by sequence index.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot<C>> {
        self.slots.get(index)
    }

    /// Mutable slot by sequence index. Counts as a structural change.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<C>> {
        if index < self.slots.len() {
            self.bump();
        }
        self.slots.get_mut(index)
    }

    /// Iterate over slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot<C>> {
        self.slots.iter()
    }

    /// Mutable iteration. Counts as a structural change.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot<C>> {
        self.bump();
        self.slots.iter_mut()
    }

    /// Number of slots, spacers included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the grid has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Structural generation; changes on every edit and is unique across
    /// builders. A clone shares it until either copy is edited.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the first slot hosting a value equal to `content`.
    pub fn find(&self, content: &C) -> Option<usize>
    where
        C: PartialEq,
    {
        self.slots
            .iter()
            .position(|slot| slot.content() == Some(content))
    }

    /// Assign rows, starting columns, and above-neighbors.
    ///
    /// A slot's column is the running column counter, advanced by its span
    /// after each non-terminal slot and reset after each row-end. A slot's
    /// above-neighbor is the slot of the previous row that starts at exactly
    /// the same column; partial overlaps do not count.
    pub fn derive_topology(&self) -> Topology {
        let mut placements = Vec::with_capacity(self.slots.len());
        // (first slot index, one past last slot index, occupied width)
        let mut row_ranges: Vec<(usize, usize, usize)> = Vec::new();

        let mut column = 0usize;
        let mut row = 0usize;
        let mut row_start = 0usize;
        for (index, slot) in self.slots.iter().enumerate() {
            let colspan = slot.style().span();
            placements.push(Placement {
                column,
                row,
                colspan,
                above: None,
            });
            if slot.is_row_end() {
                row_ranges.push((row_start, index + 1, column + colspan));
                row += 1;
                column = 0;
                row_start = index + 1;
            } else {
                column += colspan;
            }
        }
        if row_start < self.slots.len() {
            row_ranges.push((row_start, self.slots.len(), column));
        }

        for pair in row_ranges.windows(2) {
            let (above_start, above_end, _) = pair[0];
            let (start, end, _) = pair[1];
            for index in start..end {
                let column = placements[index].column;
                placements[index].above = (above_start..above_end)
                    .find(|&candidate| placements[candidate].column == column);
            }
        }

        Topology {
            columns: row_ranges.iter().map(|&(_, _, width)| width).max().unwrap_or(0),
            rows: row_ranges.len(),
            placements,
        }
    }

    /// Hand each content slot its rectangle from a layout pass.
    ///
    /// Not a structural change: bounds never feed back into sizing.
    pub(crate) fn apply_bounds(&mut self, rects: &[Rect])
    where
        C: Content,
    {
        for (slot, &rect) in self.slots.iter_mut().zip(rects) {
            if let Some(content) = slot.content_mut() {
                content.set_bounds(rect);
            }
        }
    }

    fn bump(&mut self) {
        self.generation = next_generation();
    }
}

static GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

impl<'a, C> IntoIterator for &'a GridBuilder<C> {
    type Item = &'a Slot<C>;
    type IntoIter = std::slice::Iter<'a, Slot<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
