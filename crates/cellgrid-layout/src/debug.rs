#![forbid(unsafe_code)]

//! Layout debugging overlay.
//!
//! The engine never draws and never knows it is being observed. After a
//! layout pass, a host hands the grid and its [`GridLayout`] to a
//! [`LayoutDebugger`], which records what each slot asked for and what it
//! got, and strokes outlines through a host-supplied [`DebugPainter`].
//!
//! Which layers are outlined comes from [`DebugStyle::current`], a
//! per-thread value that starts empty and changes only through
//! [`DebugStyle::install`], [`DebugStyle::reset`], or a scoped
//! [`DebugStyle::scoped`] guard.

use std::cell::Cell;
use std::fmt::Write as _;

use bitflags::bitflags;
use cellgrid_core::geometry::Rect;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::builder::GridBuilder;
use crate::content::Content;
use crate::engine::GridLayout;
use crate::query::SizeQuery;

bitflags! {
    /// Layers the overlay outlines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DebugStyle: u8 {
        /// The grid's own bounds, outer padding included.
        const TABLE = 1 << 0;
        /// Each slot's cell area.
        const CELLS = 1 << 1;
        /// Each slot's assigned rectangle.
        const SLOTS = 1 << 2;
    }
}

impl Default for DebugStyle {
    fn default() -> Self {
        Self::empty()
    }
}

thread_local! {
    static DEBUG_STYLE: Cell<DebugStyle> = const { Cell::new(DebugStyle::empty()) };
}

impl DebugStyle {
    /// Layers outlined on this thread.
    #[must_use]
    pub fn current() -> Self {
        DEBUG_STYLE.with(Cell::get)
    }

    /// Outline `self` on this thread until the next install or reset.
    pub fn install(self) {
        DEBUG_STYLE.with(|style| style.set(self));
    }

    /// Stop outlining on this thread.
    pub fn reset() {
        DEBUG_STYLE.with(|style| style.set(Self::empty()));
    }

    /// Outline `self` until the returned guard drops, then restore the
    /// previous style.
    #[must_use = "the previous style is restored when the guard is dropped"]
    pub fn scoped(self) -> DebugStyleGuard {
        let previous = DEBUG_STYLE.with(|style| style.replace(self));
        DebugStyleGuard {
            previous,
            _marker: std::marker::PhantomData,
        }
    }
}

/// Restores the previous [`DebugStyle`] when dropped.
#[must_use]
pub struct DebugStyleGuard {
    previous: DebugStyle,
    // Thread-local state: keep the guard on its thread.
    _marker: std::marker::PhantomData<*const ()>,
}

impl Drop for DebugStyleGuard {
    fn drop(&mut self) {
        DEBUG_STYLE.with(|style| style.set(self.previous));
    }
}

/// One outlined layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugLayer {
    /// Grid bounds.
    Table,
    /// Cell area of one slot.
    Cell,
    /// Rectangle of one slot.
    Slot,
}

/// Drawing backend supplied by the host.
pub trait DebugPainter {
    /// Outline `rect` in the style the host uses for `layer`.
    fn stroke(&mut self, rect: Rect, layer: DebugLayer);
}

/// Painter that records every stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingPainter {
    /// Strokes in paint order.
    pub strokes: Vec<(DebugLayer, Rect)>,
}

impl DebugPainter for RecordingPainter {
    fn stroke(&mut self, rect: Rect, layer: DebugLayer) {
        self.strokes.push((layer, rect));
    }
}

/// What one slot asked for and what it got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Slot index in sequence order.
    pub index: usize,
    /// True for spacers.
    pub spacer: bool,
    /// Cell area, computed padding removed.
    pub cell: Rect,
    /// Assigned rectangle.
    pub slot: Rect,
    /// Resolved sizes at the time of inspection.
    pub query: SizeQuery,
}

impl SlotRecord {
    /// The slot reaches outside its cell or past its maximum.
    pub fn overflow(&self) -> bool {
        let beyond_max = (self.query.has_max_width() && self.slot.width > self.query.max.width)
            || (self.query.has_max_height() && self.slot.height > self.query.max.height);
        beyond_max || !self.cell.contains_rect(&self.slot)
    }

    /// The slot got less than its minimum.
    pub fn underflow(&self) -> bool {
        self.slot.width < self.query.min.width || self.slot.height < self.query.min.height
    }
}

/// Records slot placements and paints the selected debug layers.
#[derive(Debug, Default)]
pub struct LayoutDebugger {
    enabled: bool,
    table: Rect,
    records: Vec<SlotRecord>,
}

impl LayoutDebugger {
    /// Create a disabled debugger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable recording.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether recording is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Forget recorded slots.
    pub fn clear(&mut self) {
        self.records.clear();
        self.table = Rect::default();
    }

    /// Records from the last [`inspect`](Self::inspect).
    pub fn records(&self) -> &[SlotRecord] {
        &self.records
    }

    /// Record every slot of `grid` as placed by `layout`.
    pub fn inspect<C: Content>(&mut self, grid: &GridBuilder<C>, layout: &GridLayout) {
        if !self.enabled {
            return;
        }
        self.clear();
        self.table = layout.table();
        for (index, slot) in grid.iter().enumerate() {
            let (Some(cell), Some(rect)) = (layout.cell(index), layout.slot(index)) else {
                break;
            };
            let record = SlotRecord {
                index,
                spacer: !slot.has_content(),
                cell,
                slot: rect,
                query: slot.query(),
            };
            #[cfg(feature = "tracing")]
            {
                if record.overflow() || record.underflow() {
                    warn!(
                        slot = index,
                        cell = ?record.cell,
                        got = ?record.slot,
                        query = ?record.query,
                        "slot constraint violation"
                    );
                }
                debug!(slot = index, got = ?record.slot, "slot placed");
            }
            self.records.push(record);
        }
    }

    /// Stroke the layers selected by [`DebugStyle::current`].
    pub fn paint(&self, painter: &mut dyn DebugPainter) {
        if !self.enabled {
            return;
        }
        let style = DebugStyle::current();
        if style.contains(DebugStyle::TABLE) {
            painter.stroke(self.table, DebugLayer::Table);
        }
        for record in &self.records {
            if style.contains(DebugStyle::CELLS) {
                painter.stroke(record.cell, DebugLayer::Cell);
            }
            if style.contains(DebugStyle::SLOTS) {
                painter.stroke(record.slot, DebugLayer::Slot);
            }
        }
    }

    /// One line per slot: index, kind, cell, slot, and min/pref/max.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "table {}x{} @ {},{}",
            self.table.width, self.table.height, self.table.x, self.table.y
        );
        for r in &self.records {
            let flag = if r.overflow() {
                " OVERFLOW"
            } else if r.underflow() {
                " UNDERFLOW"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "#{} {} cell={}x{}@{},{} slot={}x{}@{},{} min={}x{} pref={}x{} max={}x{}{}",
                r.index,
                if r.spacer { "spacer" } else { "content" },
                r.cell.width,
                r.cell.height,
                r.cell.x,
                r.cell.y,
                r.slot.width,
                r.slot.height,
                r.slot.x,
                r.slot.y,
                r.query.min.width,
                r.query.min.height,
                r.query.pref.width,
                r.query.pref.height,
                r.query.max.width,
                r.query.max.height,
                flag,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Intrinsic;
    use crate::engine::LayoutEngine;
    use crate::slot::Styled;
    use cellgrid_core::geometry::{Sides, Size};

    fn sample() -> (GridBuilder<Intrinsic>, GridLayout) {
        let mut grid = GridBuilder::new();
        grid.add(Intrinsic::fixed(Size::new(10, 10)));
        grid.add_empty().width(4);
        let layout = LayoutEngine::new().compute_layout(&grid, Size::new(14, 10), Sides::ZERO);
        (grid, layout)
    }

    #[test]
    fn disabled_debugger_records_nothing() {
        let (grid, layout) = sample();
        let mut debugger = LayoutDebugger::new();
        debugger.inspect(&grid, &layout);
        assert!(debugger.records().is_empty());
    }

    #[test]
    fn inspect_records_each_slot() {
        let (grid, layout) = sample();
        let mut debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.inspect(&grid, &layout);

        let records = debugger.records();
        assert_eq!(records.len(), 2);
        assert!(!records[0].spacer && records[1].spacer);
        assert_eq!(records[1].slot, Rect::new(10, 5, 4, 0));
        assert!(records.iter().all(|r| !r.overflow() && !r.underflow()));
    }

    #[test]
    fn grid_never_squeezes_below_min() {
        let mut grid = GridBuilder::new();
        grid.add(Intrinsic::fixed(Size::new(10, 10)));
        let layout = LayoutEngine::new().compute_layout(&grid, Size::new(4, 4), Sides::ZERO);
        let mut debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.inspect(&grid, &layout);
        // The grid does not shrink below min; the slot still gets 10x10.
        assert!(!debugger.records()[0].underflow());
        assert!(debugger.outline().contains("slot=10x10"));
    }

    #[test]
    fn paint_follows_installed_style() {
        let (grid, layout) = sample();
        let mut debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.inspect(&grid, &layout);

        DebugStyle::reset();
        let mut painter = RecordingPainter::default();
        debugger.paint(&mut painter);
        assert!(painter.strokes.is_empty());

        DebugStyle::install(DebugStyle::TABLE | DebugStyle::SLOTS);
        debugger.paint(&mut painter);
        let layers: Vec<DebugLayer> = painter.strokes.iter().map(|&(layer, _)| layer).collect();
        assert_eq!(layers, vec![DebugLayer::Table, DebugLayer::Slot, DebugLayer::Slot]);
        DebugStyle::reset();
    }

    #[test]
    fn scoped_style_restores_previous() {
        DebugStyle::install(DebugStyle::CELLS);
        {
            let _guard = DebugStyle::all().scoped();
            assert_eq!(DebugStyle::current(), DebugStyle::all());
        }
        assert_eq!(DebugStyle::current(), DebugStyle::CELLS);
        DebugStyle::reset();
        assert!(DebugStyle::current().is_empty());
    }

    #[test]
    fn outline_lists_every_slot() {
        let (grid, layout) = sample();
        let mut debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.inspect(&grid, &layout);
        let text = debugger.outline();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("table 14x10 @ 0,0"));
        assert!(text.contains("#1 spacer"));
    }
}
