#![forbid(unsafe_code)]

//! Two-phase table layout: size aggregation, then layout resolution.
//!
//! # Phases
//!
//! 1. [`LayoutEngine::compute_size`] folds every slot's [`SizeQuery`] and
//!    computed padding into per-column widths and per-row heights (min and
//!    preferred), resolves spans and uniform groups, and sums them into the
//!    grid's min/preferred size. The result is cached per builder
//!    generation and border insets.
//! 2. [`LayoutEngine::compute_layout`] takes the available space, grows
//!    columns/rows from min toward preferred in proportion to their
//!    headroom, hands leftover space to expanding columns/rows, and places
//!    every slot inside its spanned cell.
//!
//! # Spacing collapse
//!
//! Spacing between neighbors does not add up: the larger of the two facing
//! values wins. Grid edges never carry spacing, only padding.
//!
//! # Rounding
//!
//! Ratios are `f32` and truncate toward zero. Leftover pixels from the
//! expand distribution all go to the last expanding column (row), so the
//! columns always sum to the available width when anything expands.
//!
//! # Failure modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No slots | All sizes are the outer padding; layout has no rects |
//! | Available space below min | Columns stay at min; slot sizes clamp at 0 |
//! | Preferred equals min | Weighted sizes are the min sizes directly |
//! | Nothing expands | Leftover space stays outside the grid (alignment) |

use cellgrid_core::geometry::{Rect, Sides, Size};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::align::Align;
use crate::builder::{GridBuilder, Placement, Topology};
use crate::content::Content;
use crate::query::SizeQuery;
use crate::slot::Slot;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Grid-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Padding around the whole grid, added to the host's border insets.
    pub pad: Sides,
    /// Placement of the grid inside the available area.
    pub align: Align,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Aggregate minimum and preferred size of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSummary {
    /// Minimum size, outer padding included.
    pub min: Size,
    /// Preferred size, never smaller than `min`.
    pub pref: Size,
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    slots: Vec<Rect>,
    cells: Vec<Rect>,
    column_widths: Vec<i32>,
    row_heights: Vec<i32>,
    table: Rect,
    min: Size,
    pref: Size,
}

impl GridLayout {
    /// Rectangle assigned to slot `index` (sequence order, spacers included).
    #[inline]
    pub fn slot(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied()
    }

    /// Area of slot `index`'s spanned cell, computed padding removed.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<Rect> {
        self.cells.get(index).copied()
    }

    /// All slot rectangles in sequence order.
    #[inline]
    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// All cell rectangles in sequence order.
    #[inline]
    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }

    /// Resolved column widths.
    #[inline]
    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths
    }

    /// Resolved row heights.
    #[inline]
    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    /// Bounds of the grid itself, outer padding included.
    #[inline]
    pub fn table(&self) -> Rect {
        self.table
    }

    /// Aggregate minimum size.
    #[inline]
    pub fn min_size(&self) -> Size {
        self.min
    }

    /// Aggregate preferred size.
    #[inline]
    pub fn pref_size(&self) -> Size {
        self.pref
    }

    /// Iterate `(slot index, rect)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    /// True if the layout placed no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Per-pass size cache
// ---------------------------------------------------------------------------

/// Slot index → resolved sizes, valid for one engine call only.
#[derive(Debug, Default)]
struct SizeCache {
    sizes: FxHashMap<usize, SizeQuery>,
}

impl SizeCache {
    fn get<C: Content>(&mut self, index: usize, slot: &Slot<C>) -> SizeQuery {
        *self.sizes.entry(index).or_insert_with(|| slot.query())
    }

    fn clear(&mut self) {
        self.sizes.clear();
    }
}

/// Resize `buf` to `len` and zero every element.
fn reset<T: Copy + Default>(buf: &mut Vec<T>, len: usize) {
    buf.clear();
    buf.resize(len, T::default());
}

/// Give `extra` to the flagged entries in equal shares; the rounding
/// remainder goes to the last flagged entry.
fn distribute_expand(sizes: &mut [i32], expand: &[bool], extra: i32) {
    let total = expand.iter().filter(|&&e| e).count();
    if total == 0 {
        return;
    }
    let share = (extra as f32 / total as f32) as i32;
    let mut used = 0;
    let mut last = 0;
    for (i, size) in sizes.iter_mut().enumerate() {
        if !expand[i] {
            continue;
        }
        *size += share;
        used += share;
        last = i;
    }
    sizes[last] += extra - used;
}

/// Grow each entry from min toward pref by its share of the headroom.
fn weighted(min: &[i32], pref: &[i32], total_grow: i32, extra: i32, out: &mut Vec<i32>) {
    out.clear();
    if total_grow == 0 {
        out.extend_from_slice(min);
        return;
    }
    out.extend(min.iter().zip(pref).map(|(&min, &pref)| {
        let ratio = (pref - min) as f32 / total_grow as f32;
        (min as f32 + extra as f32 * ratio) as i32
    }));
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns the derived topology, per-column/per-row sizing state, and scratch
/// buffers for one grid.
///
/// The engine holds no slots and no content. Pass the same
/// [`GridBuilder`] to every call; sizes are recomputed whenever its
/// generation, the border insets, or the outer padding change, or after
/// [`invalidate`](Self::invalidate) (for content whose intrinsic size
/// changed without a structural edit).
#[derive(Debug, Default)]
pub struct LayoutEngine {
    config: GridConfig,
    sized: Option<(u64, Sides)>,
    topology: Topology,
    pads: Vec<Sides>,
    column_min_width: Vec<i32>,
    column_pref_width: Vec<i32>,
    row_min_height: Vec<i32>,
    row_pref_height: Vec<i32>,
    column_width: Vec<i32>,
    row_height: Vec<i32>,
    column_weighted_width: Vec<i32>,
    row_weighted_height: Vec<i32>,
    column_single: Vec<bool>,
    expand_width: Vec<bool>,
    expand_height: Vec<bool>,
    table_min: Size,
    table_pref: Size,
    size_cache: SizeCache,
}

impl LayoutEngine {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration. Cached sizes are dropped if the outer
    /// padding changed.
    pub fn set_config(&mut self, config: GridConfig) {
        if config.pad != self.config.pad {
            self.invalidate();
        }
        self.config = config;
    }

    /// Set the outer padding.
    pub fn set_pad(&mut self, pad: Sides) {
        self.set_config(GridConfig { pad, ..self.config });
    }

    /// Set the placement of the grid inside the available area.
    pub fn set_align(&mut self, align: Align) {
        self.config.align = align;
    }

    /// Drop cached sizes; the next call re-derives everything.
    pub fn invalidate(&mut self) {
        self.sized = None;
    }

    /// True if cached sizes match `grid`'s generation and `insets`.
    pub fn is_valid_for<C>(&self, grid: &GridBuilder<C>, insets: Sides) -> bool {
        self.sized == Some((grid.generation(), insets))
    }

    /// Topology from the last size computation.
    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Column count from the last size computation.
    #[inline]
    pub fn columns(&self) -> usize {
        self.topology.columns()
    }

    /// Row count from the last size computation.
    #[inline]
    pub fn rows(&self) -> usize {
        self.topology.rows()
    }

    /// Computed padding of every slot from the last size computation.
    #[inline]
    pub fn computed_padding(&self) -> &[Sides] {
        &self.pads
    }

    /// Minimum width of each column.
    #[inline]
    pub fn column_min_widths(&self) -> &[i32] {
        &self.column_min_width
    }

    /// Preferred width of each column.
    #[inline]
    pub fn column_pref_widths(&self) -> &[i32] {
        &self.column_pref_width
    }

    /// Minimum height of each row.
    #[inline]
    pub fn row_min_heights(&self) -> &[i32] {
        &self.row_min_height
    }

    /// Preferred height of each row.
    #[inline]
    pub fn row_pref_heights(&self) -> &[i32] {
        &self.row_pref_height
    }

    /// Which columns receive leftover width.
    #[inline]
    pub fn expand_columns(&self) -> &[bool] {
        &self.expand_width
    }

    /// Which rows receive leftover height.
    #[inline]
    pub fn expand_rows(&self) -> &[bool] {
        &self.expand_height
    }

    /// Minimum and preferred size of the grid.
    pub fn compute_size<C: Content>(&mut self, grid: &GridBuilder<C>, insets: Sides) -> SizeSummary {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("grid_compute_size", slots = grid.len()).entered();

        self.ensure_sized(grid, insets);
        self.size_cache.clear();
        SizeSummary {
            min: self.table_min,
            pref: self.table_pref,
        }
    }

    /// Place every slot of `grid` inside `available`.
    pub fn compute_layout<C: Content>(
        &mut self,
        grid: &GridBuilder<C>,
        available: Size,
        insets: Sides,
    ) -> GridLayout {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "grid_compute_layout",
            slots = grid.len(),
            w = available.width,
            h = available.height
        )
        .entered();

        self.ensure_sized(grid, insets);
        let outer = self.config.pad + insets;
        let slots = grid.slots();

        // Size columns and rows between min and pref, weighting extra space
        // by each one's (pref - min) headroom.
        let total_grow_width = self.table_pref.width - self.table_min.width;
        let extra_width = total_grow_width.min((available.width - self.table_min.width).max(0));
        weighted(
            &self.column_min_width,
            &self.column_pref_width,
            total_grow_width,
            extra_width,
            &mut self.column_weighted_width,
        );
        let total_grow_height = self.table_pref.height - self.table_min.height;
        let extra_height = total_grow_height.min((available.height - self.table_min.height).max(0));
        weighted(
            &self.row_min_height,
            &self.row_pref_height,
            total_grow_height,
            extra_height,
            &mut self.row_weighted_height,
        );

        // Slot sizes before expand and fill, capped at preferred.
        reset(&mut self.column_width, self.topology.columns());
        reset(&mut self.row_height, self.topology.rows());
        reset(&mut self.column_single, self.topology.columns());
        let mut sizes = Vec::with_capacity(slots.len());
        for (index, (slot, place)) in slots.iter().zip(self.topology.placements()).enumerate() {
            let spanned_weighted_width: i32 = self.column_weighted_width[columns_of(place)].iter().sum();
            let weighted_height = self.row_weighted_height[place.row];
            let size = self.size_cache.get(index, slot);
            let pad = self.pads[index];
            sizes.push(Size::new(
                (spanned_weighted_width - pad.horizontal()).min(size.pref.width),
                (weighted_height - pad.vertical()).min(size.pref.height),
            ));
            if place.colspan == 1 {
                let width = &mut self.column_width[place.column];
                *width = (*width).max(spanned_weighted_width);
                self.column_single[place.column] = true;
            }
            let height = &mut self.row_height[place.row];
            *height = (*height).max(weighted_height);
        }

        // Columns occupied only by spanning slots take their weighted share
        // now, so expansion sees the width they already use.
        for (column, width) in self.column_width.iter_mut().enumerate() {
            if !self.column_single[column] {
                *width = self.column_weighted_width[column];
            }
        }

        // Hand leftover space to expanding columns and rows.
        let used_width: i32 = self.column_width.iter().sum();
        distribute_expand(
            &mut self.column_width,
            &self.expand_width,
            available.width - outer.horizontal() - used_width,
        );
        let used_height: i32 = self.row_height.iter().sum();
        distribute_expand(
            &mut self.row_height,
            &self.expand_height,
            available.height - outer.vertical() - used_height,
        );

        // Spanning slots push any width they still lack into their columns.
        for (index, place) in self.topology.placements().iter().enumerate() {
            if place.colspan == 1 {
                continue;
            }
            let range = columns_of(place);
            let mut extra: i32 = range
                .clone()
                .map(|c| self.column_weighted_width[c] - self.column_width[c])
                .sum();
            extra -= self.pads[index].horizontal().max(0);
            extra /= place.colspan as i32;
            if extra > 0 {
                for width in &mut self.column_width[range] {
                    *width += extra;
                }
            }
        }

        // Position the grid within the available area.
        let table_width = outer.horizontal() + self.column_width.iter().sum::<i32>();
        let table_height = outer.vertical() + self.row_height.iter().sum::<i32>();
        let align = self.config.align;
        let mut x = outer.left;
        if align.contains(Align::RIGHT) {
            x += available.width - table_width;
        } else if !align.contains(Align::LEFT) {
            x += (available.width - table_width) / 2;
        }
        let mut y = outer.top;
        if align.contains(Align::BOTTOM) {
            y += available.height - table_height;
        } else if !align.contains(Align::TOP) {
            y += (available.height - table_height) / 2;
        }

        // Place slots within their cells.
        let mut slot_rects = Vec::with_capacity(slots.len());
        let mut cell_rects = Vec::with_capacity(slots.len());
        let (mut cursor_x, mut cursor_y) = (x, y);
        for (index, (slot, place)) in slots.iter().zip(self.topology.placements()).enumerate() {
            let style = slot.style();
            let pad = self.pads[index];
            let row_height = self.row_height[place.row];
            let cell_width =
                self.column_width[columns_of(place)].iter().sum::<i32>() - pad.horizontal();
            cursor_x += pad.left;

            let Size { mut width, mut height } = sizes[index];
            if style.fill_x || style.fill_y {
                let size = self.size_cache.get(index, slot);
                if style.fill_x {
                    width = cell_width;
                    if size.has_max_width() {
                        width = width.min(size.max.width);
                    }
                }
                if style.fill_y {
                    height = row_height - pad.vertical();
                    if size.has_max_height() {
                        height = height.min(size.max.height);
                    }
                }
            }
            let width = width.max(0);
            let height = height.max(0);

            let slot_x = if style.align.contains(Align::LEFT) {
                cursor_x
            } else if style.align.contains(Align::RIGHT) {
                cursor_x + cell_width - width
            } else {
                cursor_x + (cell_width - width) / 2
            };
            let slot_y = if style.align.contains(Align::TOP) {
                cursor_y + pad.top
            } else if style.align.contains(Align::BOTTOM) {
                cursor_y + row_height - height - pad.bottom
            } else {
                cursor_y + (row_height - height + pad.top - pad.bottom) / 2
            };
            slot_rects.push(Rect::new(slot_x, slot_y, width, height));
            cell_rects.push(Rect::new(
                cursor_x,
                cursor_y + pad.top,
                cell_width.max(0),
                (row_height - pad.vertical()).max(0),
            ));

            if slot.is_row_end() {
                cursor_x = x;
                cursor_y += row_height;
            } else {
                cursor_x += cell_width + pad.right;
            }
        }
        self.size_cache.clear();

        #[cfg(feature = "tracing")]
        trace!(
            columns = self.topology.columns(),
            rows = self.topology.rows(),
            table_width,
            table_height,
            "grid layout resolved"
        );

        GridLayout {
            slots: slot_rects,
            cells: cell_rects,
            column_widths: self.column_width.clone(),
            row_heights: self.row_height.clone(),
            table: Rect::new(x - outer.left, y - outer.top, table_width, table_height),
            min: self.table_min,
            pref: self.table_pref,
        }
    }

    fn ensure_sized<C: Content>(&mut self, grid: &GridBuilder<C>, insets: Sides) {
        if self.is_valid_for(grid, insets) {
            #[cfg(feature = "tracing")]
            trace!(generation = grid.generation(), "grid sizes cached");
            return;
        }
        self.measure(grid, insets);
        self.sized = Some((grid.generation(), insets));
    }

    /// Bottom-up aggregation of slot sizes into column/row sizes.
    fn measure<C: Content>(&mut self, grid: &GridBuilder<C>, insets: Sides) {
        let topology = grid.derive_topology();
        let (columns, rows) = (topology.columns(), topology.rows());
        let slots = grid.slots();

        reset(&mut self.pads, slots.len());
        reset(&mut self.column_min_width, columns);
        reset(&mut self.column_pref_width, columns);
        reset(&mut self.row_min_height, rows);
        reset(&mut self.row_pref_height, rows);
        reset(&mut self.expand_width, columns);
        reset(&mut self.expand_height, rows);

        let mut space_right_last = 0;
        for (index, (slot, place)) in slots.iter().zip(topology.placements()).enumerate() {
            let style = slot.style();
            if style.expand_y {
                self.expand_height[place.row] = true;
            }
            if place.colspan == 1 && style.expand_x {
                self.expand_width[place.column] = true;
            }

            // Facing spacings collapse to the larger one; edges get none.
            let mut pad = style.pad;
            if place.column != 0 {
                pad.left += (style.space.left - space_right_last).max(0);
            }
            if let Some(above) = place.above {
                pad.top += (style.space.top - slots[above].style().space.bottom).max(0);
            }
            if place.column + place.colspan != columns {
                pad.right += style.space.right;
            }
            if place.row + 1 != rows {
                pad.bottom += style.space.bottom;
            }
            space_right_last = style.space.right;
            self.pads[index] = pad;

            let size = self.size_cache.get(index, slot);
            // Spanned columns get their share later.
            if place.colspan == 1 {
                let h = pad.horizontal();
                let pref = &mut self.column_pref_width[place.column];
                *pref = (*pref).max(size.pref.width + h);
                let min = &mut self.column_min_width[place.column];
                *min = (*min).max(size.min.width + h);
            }
            let v = pad.vertical();
            let pref = &mut self.row_pref_height[place.row];
            *pref = (*pref).max(size.pref.height + v);
            let min = &mut self.row_min_height[place.row];
            *min = (*min).max(size.min.height + v);
        }

        // An expanding span whose columns don't expand makes all of them
        // expand.
        for (slot, place) in slots.iter().zip(topology.placements()) {
            if !slot.style().expand_x {
                continue;
            }
            let spanned = &mut self.expand_width[columns_of(place)];
            if !spanned.iter().any(|&e| e) {
                spanned.fill(true);
            }
        }

        // Spread the width spanning slots need beyond their columns.
        for (index, (slot, place)) in slots.iter().zip(topology.placements()).enumerate() {
            if place.colspan == 1 {
                continue;
            }
            let range = columns_of(place);
            let h = self.pads[index].horizontal();
            let spanned_min = self.column_min_width[range.clone()].iter().sum::<i32>() - h;
            let spanned_pref = self.column_pref_width[range.clone()].iter().sum::<i32>() - h;
            let total_expand = self.expand_width[range.clone()].iter().filter(|&&e| e).count();

            let size = self.size_cache.get(index, slot);
            let extra_min = (size.min.width - spanned_min).max(0);
            let extra_pref = (size.pref.width - spanned_pref).max(0);
            for column in range {
                let ratio = if total_expand == 0 {
                    1.0 / place.colspan as f32
                } else if self.expand_width[column] {
                    1.0 / total_expand as f32
                } else {
                    0.0
                };
                self.column_min_width[column] += (extra_min as f32 * ratio) as i32;
                self.column_pref_width[column] += (extra_pref as f32 * ratio) as i32;
            }
        }

        // Uniform groups share the largest member's size, per axis.
        let mut uniform_min = Size::ZERO;
        let mut uniform_pref = Size::ZERO;
        for (index, (slot, place)) in slots.iter().zip(topology.placements()).enumerate() {
            let style = slot.style();
            let pad = self.pads[index];
            if style.uniform_x && place.colspan == 1 {
                let h = pad.horizontal();
                uniform_min.width = uniform_min.width.max(self.column_min_width[place.column] - h);
                uniform_pref.width = uniform_pref.width.max(self.column_pref_width[place.column] - h);
            }
            if style.uniform_y {
                let v = pad.vertical();
                uniform_min.height = uniform_min.height.max(self.row_min_height[place.row] - v);
                uniform_pref.height = uniform_pref.height.max(self.row_pref_height[place.row] - v);
            }
        }
        if uniform_pref.width > 0 || uniform_pref.height > 0 {
            for (index, (slot, place)) in slots.iter().zip(topology.placements()).enumerate() {
                let style = slot.style();
                let pad = self.pads[index];
                if uniform_pref.width > 0 && style.uniform_x && place.colspan == 1 {
                    let h = pad.horizontal();
                    self.column_min_width[place.column] = uniform_min.width + h;
                    self.column_pref_width[place.column] = uniform_pref.width + h;
                }
                if uniform_pref.height > 0 && style.uniform_y {
                    let v = pad.vertical();
                    self.row_min_height[place.row] = uniform_min.height + v;
                    self.row_pref_height[place.row] = uniform_pref.height + v;
                }
            }
        }

        // Aggregate grid size.
        let outer = self.config.pad + insets;
        let min_width = self.column_min_width.iter().sum::<i32>() + outer.horizontal();
        let pref_width = self.column_pref_width.iter().sum::<i32>() + outer.horizontal();
        let min_height = self.row_min_height.iter().sum::<i32>() + outer.vertical();
        let pref_height = self
            .row_min_height
            .iter()
            .zip(&self.row_pref_height)
            .map(|(&min, &pref)| min.max(pref))
            .sum::<i32>()
            + outer.vertical();
        self.table_min = Size::new(min_width, min_height);
        self.table_pref = Size::new(pref_width.max(min_width), pref_height.max(min_height));
        self.topology = topology;

        #[cfg(feature = "tracing")]
        trace!(
            columns,
            rows,
            min_w = self.table_min.width,
            min_h = self.table_min.height,
            pref_w = self.table_pref.width,
            pref_h = self.table_pref.height,
            "grid sizes measured"
        );
    }
}

#[inline]
fn columns_of(place: &Placement) -> std::ops::Range<usize> {
    place.column..place.column + place.colspan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Intrinsic;
    use crate::slot::Styled;

    fn fixed(width: i32, height: i32) -> Intrinsic {
        Intrinsic::fixed(Size::new(width, height))
    }

    fn flexible(width: i32, height: i32) -> Intrinsic {
        Intrinsic::flexible(Size::new(width, height))
    }

    fn layout(grid: &GridBuilder<Intrinsic>, width: i32, height: i32) -> GridLayout {
        LayoutEngine::new().compute_layout(grid, Size::new(width, height), Sides::ZERO)
    }

    #[test]
    fn two_by_two_fills_exact_area() {
        let mut grid = GridBuilder::new();
        grid.add(flexible(50, 20));
        grid.add(flexible(50, 20));
        grid.start_row();
        grid.add(flexible(50, 20));
        grid.add(flexible(50, 20));

        let out = layout(&grid, 100, 40);
        assert_eq!(
            out.slots(),
            &[
                Rect::new(0, 0, 50, 20),
                Rect::new(50, 0, 50, 20),
                Rect::new(0, 20, 50, 20),
                Rect::new(50, 20, 50, 20),
            ]
        );
    }

    #[test]
    fn horizontal_spacing_collapses_to_larger() {
        for (right_of_first, left_of_second) in [(10, 4), (4, 10)] {
            let mut grid = GridBuilder::new();
            grid.add(fixed(20, 10)).space_right(right_of_first);
            grid.add(fixed(20, 10)).space_left(left_of_second);

            let out = layout(&grid, 50, 10);
            let (a, b) = (out.slots()[0], out.slots()[1]);
            assert_eq!(b.x - a.right(), 10);
        }
    }

    #[test]
    fn vertical_spacing_collapses_against_slot_above() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).space_bottom(6);
        grid.start_row();
        grid.add(fixed(10, 10)).space_top(8);

        let out = layout(&grid, 10, 28);
        assert_eq!(out.row_heights(), &[16, 12]);
        assert_eq!(out.slots()[1].y - out.slots()[0].bottom(), 8);
    }

    #[test]
    fn grid_edges_carry_no_spacing() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).space(7);
        let mut engine = LayoutEngine::new();
        let size = engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(size.min, Size::new(10, 10));
        assert_eq!(engine.computed_padding(), &[Sides::ZERO]);
    }

    #[test]
    fn lone_expanding_column_takes_all_extra_width() {
        let mut grid = GridBuilder::new();
        grid.add(flexible(40, 10)).expand_x();

        let out = layout(&grid, 100, 10);
        assert_eq!(out.column_widths(), &[100]);
        assert_eq!(out.slots()[0], Rect::new(30, 0, 40, 10));

        let mut grid = GridBuilder::new();
        grid.add(flexible(40, 10)).expand_x().fill_x();
        assert_eq!(layout(&grid, 100, 10).slots()[0], Rect::new(0, 0, 100, 10));
    }

    #[test]
    fn expand_remainder_goes_to_last_column() {
        let mut grid: GridBuilder<Intrinsic> = GridBuilder::new();
        for _ in 0..3 {
            grid.add_empty().expand_x();
        }
        let out = layout(&grid, 100, 0);
        assert_eq!(out.column_widths(), &[33, 33, 34]);
        assert_eq!(out.table().width, 100);
    }

    #[test]
    fn uniform_columns_share_largest_width() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(30, 10)).uniform_x();
        grid.add(fixed(70, 10)).uniform_x();

        let mut engine = LayoutEngine::new();
        let size = engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(engine.column_pref_widths(), &[70, 70]);
        assert_eq!(engine.column_min_widths(), &[70, 70]);
        assert_eq!(size.pref.width, 140);
    }

    #[test]
    fn uniform_rows_share_largest_height() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 5)).uniform_y();
        grid.start_row();
        grid.add(fixed(10, 15)).uniform_y();

        let mut engine = LayoutEngine::new();
        engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(engine.row_pref_heights(), &[15, 15]);
    }

    #[test]
    fn span_shortfall_splits_evenly_without_expand() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));
        grid.add(fixed(10, 10));
        grid.start_row();
        grid.add(fixed(50, 10)).colspan(2);

        let mut engine = LayoutEngine::new();
        let size = engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(engine.column_pref_widths(), &[25, 25]);
        assert_eq!(size.pref, Size::new(50, 20));
    }

    #[test]
    fn span_shortfall_goes_to_expanding_columns() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).expand_x();
        grid.add(fixed(10, 10));
        grid.start_row();
        grid.add(fixed(50, 10)).colspan(2);

        let mut engine = LayoutEngine::new();
        engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(engine.column_pref_widths(), &[40, 10]);
    }

    #[test]
    fn expanding_span_infects_its_columns() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));
        grid.add(fixed(10, 10));
        grid.start_row();
        grid.add(fixed(10, 10)).colspan(2).expand_x();

        let mut engine = LayoutEngine::new();
        let out = engine.compute_layout(&grid, Size::new(100, 20), Sides::ZERO);
        assert_eq!(engine.expand_columns(), &[true, true]);
        assert_eq!(out.column_widths(), &[50, 50]);
    }

    #[test]
    fn span_only_columns_count_before_expansion() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).expand_x();
        grid.add(fixed(40, 10)).colspan(2);

        let out = layout(&grid, 100, 10);
        assert_eq!(out.column_widths(), &[60, 20, 20]);
        assert_eq!(out.table(), Rect::new(0, 0, 100, 10));
        assert_eq!(out.slots()[1], Rect::new(60, 0, 40, 10));
    }

    #[test]
    fn weighted_growth_follows_headroom() {
        let mut grid = GridBuilder::new();
        grid.add(flexible(20, 10));
        grid.add(flexible(60, 10));

        let out = layout(&grid, 40, 10);
        assert_eq!(out.slots()[0], Rect::new(0, 0, 10, 10));
        assert_eq!(out.slots()[1], Rect::new(10, 0, 30, 10));
    }

    #[test]
    fn fill_respects_max() {
        let mut grid = GridBuilder::new();
        grid.add(flexible(10, 10)).expand_x().fill_x().max_width(30);

        let out = layout(&grid, 100, 10);
        assert_eq!(out.slots()[0], Rect::new(35, 0, 30, 10));
    }

    #[test]
    fn slot_alignment_within_cell() {
        let cases = [
            (Align::TOP_LEFT, Rect::new(0, 0, 10, 10)),
            (Align::BOTTOM_RIGHT, Rect::new(90, 40, 10, 10)),
            (Align::CENTER, Rect::new(45, 20, 10, 10)),
            (Align::TOP, Rect::new(45, 0, 10, 10)),
        ];
        for (align, expected) in cases {
            let mut grid = GridBuilder::new();
            grid.add(fixed(10, 10)).expand().align(align);
            assert_eq!(layout(&grid, 100, 50).slots()[0], expected, "{align:?}");
        }
    }

    #[test]
    fn grid_alignment_and_padding() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));

        let mut engine = LayoutEngine::new();
        let centered = engine.compute_layout(&grid, Size::new(100, 50), Sides::ZERO);
        assert_eq!(centered.slots()[0], Rect::new(45, 20, 10, 10));

        engine.set_config(GridConfig {
            pad: Sides::all(5),
            align: Align::TOP_LEFT,
        });
        let corner = engine.compute_layout(&grid, Size::new(100, 50), Sides::ZERO);
        assert_eq!(corner.slots()[0], Rect::new(5, 5, 10, 10));
        assert_eq!(corner.table(), Rect::new(0, 0, 20, 20));

        engine.set_align(Align::BOTTOM_RIGHT);
        let far = engine.compute_layout(&grid, Size::new(100, 50), Sides::ZERO);
        assert_eq!(far.slots()[0], Rect::new(85, 35, 10, 10));
    }

    #[test]
    fn insets_count_as_padding() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));
        let mut engine = LayoutEngine::with_config(GridConfig {
            pad: Sides::new(1, 2, 3, 4),
            ..GridConfig::default()
        });
        let size = engine.compute_size(&grid, Sides::all(2));
        assert_eq!(size.min, Size::new(10 + 6 + 4, 10 + 4 + 4));
    }

    #[test]
    fn empty_grid_is_padding_only() {
        let grid: GridBuilder<Intrinsic> = GridBuilder::new();
        let mut engine = LayoutEngine::with_config(GridConfig {
            pad: Sides::all(5),
            ..GridConfig::default()
        });
        let size = engine.compute_size(&grid, Sides::ZERO);
        assert_eq!(size, SizeSummary {
            min: Size::new(10, 10),
            pref: Size::new(10, 10),
        });
        let out = engine.compute_layout(&grid, Size::ZERO, Sides::ZERO);
        assert!(out.is_empty());
        assert_eq!((out.columns(), out.rows()), (0, 0));
    }

    #[test]
    fn zero_available_space_never_yields_negative_sizes() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).expand().fill().pad(3);
        grid.add(flexible(20, 5)).space(4);
        let out = layout(&grid, 0, 0);
        for rect in out.slots() {
            assert!(rect.width >= 0 && rect.height >= 0, "{rect:?}");
        }
    }

    #[test]
    fn relayout_is_idempotent_and_cached() {
        let mut grid = GridBuilder::new();
        grid.add(flexible(30, 10)).expand_x().fill();
        grid.add(fixed(17, 3)).colspan(2);
        grid.start_row();
        grid.add(flexible(11, 9)).uniform();

        let mut engine = LayoutEngine::new();
        let first = engine.compute_layout(&grid, Size::new(97, 41), Sides::ZERO);
        assert!(engine.is_valid_for(&grid, Sides::ZERO));
        let second = engine.compute_layout(&grid, Size::new(97, 41), Sides::ZERO);
        assert_eq!(first, second);
    }

    #[test]
    fn structural_edit_invalidates_sizes() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));
        let mut engine = LayoutEngine::new();
        assert_eq!(engine.compute_size(&grid, Sides::ZERO).pref.width, 10);

        if let Some(slot) = grid.slot_mut(0) {
            slot.width(25);
        }
        assert!(!engine.is_valid_for(&grid, Sides::ZERO));
        assert_eq!(engine.compute_size(&grid, Sides::ZERO).pref.width, 25);
    }

    #[test]
    fn changing_pad_invalidates_but_align_does_not() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10));
        let mut engine = LayoutEngine::new();
        engine.compute_size(&grid, Sides::ZERO);

        engine.set_align(Align::LEFT);
        assert!(engine.is_valid_for(&grid, Sides::ZERO));
        engine.set_pad(Sides::all(1));
        assert!(!engine.is_valid_for(&grid, Sides::ZERO));
        assert_eq!(engine.compute_size(&grid, Sides::ZERO).min, Size::new(12, 12));
    }

    #[test]
    fn scratch_buffers_shrink_with_the_grid() {
        let mut grid = GridBuilder::new();
        for _ in 0..4 {
            grid.add(fixed(5, 5)).expand_x();
        }
        let mut engine = LayoutEngine::new();
        engine.compute_layout(&grid, Size::new(40, 5), Sides::ZERO);

        grid.remove_all();
        grid.add(fixed(5, 5));
        let out = engine.compute_layout(&grid, Size::new(40, 5), Sides::ZERO);
        assert_eq!(out.column_widths(), &[5]);
        assert_eq!(engine.expand_columns(), &[false]);
    }

    #[test]
    fn spacer_occupies_a_column() {
        let mut grid = GridBuilder::new();
        grid.add_empty().width(15);
        grid.add(fixed(10, 10));
        let out = layout(&grid, 25, 10);
        assert_eq!(out.slots()[1], Rect::new(15, 0, 10, 10));
    }

    #[test]
    fn cells_report_padded_cell_area() {
        let mut grid = GridBuilder::new();
        grid.add(fixed(10, 10)).pad(2);
        let out = layout(&grid, 14, 14);
        assert_eq!(out.cell(0), Some(Rect::new(2, 2, 10, 10)));
        assert_eq!(out.slot(0), Some(Rect::new(2, 2, 10, 10)));
    }
}
