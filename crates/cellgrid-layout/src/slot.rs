#![forbid(unsafe_code)]

//! Grid entries and their constraint records.
//!
//! A [`Slot`] is one entry of a grid: optional hosted content plus a
//! [`SlotStyle`] describing how it is sized, spaced, aligned, and spanned.
//! The same `SlotStyle` type serves as the grid-wide and per-row defaults;
//! new slots copy the active defaults by value at creation time, so editing
//! defaults later never touches existing slots.
//!
//! Configuration is fluent through the [`Styled`] trait, which both
//! `SlotStyle` and `Slot` implement:
//!
//! ```
//! use cellgrid_layout::{GridBuilder, Intrinsic, Styled};
//! use cellgrid_core::geometry::Size;
//!
//! let mut grid = GridBuilder::new();
//! grid.defaults().space(4);
//! grid.add(Intrinsic::fixed(Size::new(10, 2))).expand_x().fill_x();
//! ```

use cellgrid_core::geometry::{Sides, Size};
use serde::{Deserialize, Serialize};

use crate::align::Align;
use crate::content::Content;
use crate::query::SizeQuery;

/// Scalar sizing, spacing, alignment, and span constraints.
///
/// `None` bounds mean "ask the content". A non-positive `max_*` means
/// "no maximum".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotStyle {
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub pref_width: Option<i32>,
    pub pref_height: Option<i32>,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    /// Spacing toward neighboring slots. Collapses with the neighbor's
    /// facing spacing (larger wins) and never applies at grid edges.
    pub space: Sides,
    /// Fixed padding, always applied.
    pub pad: Sides,
    pub fill_x: bool,
    pub fill_y: bool,
    pub expand_x: bool,
    pub expand_y: bool,
    pub align: Align,
    /// Number of columns spanned. Values below 1 are treated as 1.
    pub colspan: usize,
    pub uniform_x: bool,
    pub uniform_y: bool,
}

impl Default for SlotStyle {
    fn default() -> Self {
        Self {
            min_width: None,
            min_height: None,
            pref_width: None,
            pref_height: None,
            max_width: None,
            max_height: None,
            space: Sides::ZERO,
            pad: Sides::ZERO,
            fill_x: false,
            fill_y: false,
            expand_x: false,
            expand_y: false,
            align: Align::CENTER,
            colspan: 1,
            uniform_x: false,
            uniform_y: false,
        }
    }
}

impl SlotStyle {
    /// Effective column span (at least 1).
    #[inline]
    pub fn span(&self) -> usize {
        self.colspan.max(1)
    }
}

/// Fluent setters shared by [`SlotStyle`] and [`Slot`].
///
/// Size setters accept either a value or `None` (back to "ask the
/// content").
pub trait Styled {
    /// The constraint record being edited.
    fn style_mut(&mut self) -> &mut SlotStyle;

    /// Pin min, preferred, and max size.
    fn size(&mut self, width: impl Into<Option<i32>>, height: impl Into<Option<i32>>) -> &mut Self {
        let (width, height) = (width.into(), height.into());
        let s = self.style_mut();
        s.min_width = width;
        s.pref_width = width;
        s.max_width = width;
        s.min_height = height;
        s.pref_height = height;
        s.max_height = height;
        self
    }

    /// Pin min, preferred, and max width.
    fn width(&mut self, width: impl Into<Option<i32>>) -> &mut Self {
        let width = width.into();
        let s = self.style_mut();
        s.min_width = width;
        s.pref_width = width;
        s.max_width = width;
        self
    }

    /// Pin min, preferred, and max height.
    fn height(&mut self, height: impl Into<Option<i32>>) -> &mut Self {
        let height = height.into();
        let s = self.style_mut();
        s.min_height = height;
        s.pref_height = height;
        s.max_height = height;
        self
    }

    fn min_size(&mut self, width: impl Into<Option<i32>>, height: impl Into<Option<i32>>) -> &mut Self {
        let s = self.style_mut();
        s.min_width = width.into();
        s.min_height = height.into();
        self
    }

    fn min_width(&mut self, width: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().min_width = width.into();
        self
    }

    fn min_height(&mut self, height: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().min_height = height.into();
        self
    }

    fn pref_size(&mut self, width: impl Into<Option<i32>>, height: impl Into<Option<i32>>) -> &mut Self {
        let s = self.style_mut();
        s.pref_width = width.into();
        s.pref_height = height.into();
        self
    }

    fn pref_width(&mut self, width: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().pref_width = width.into();
        self
    }

    fn pref_height(&mut self, height: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().pref_height = height.into();
        self
    }

    fn max_size(&mut self, width: impl Into<Option<i32>>, height: impl Into<Option<i32>>) -> &mut Self {
        let s = self.style_mut();
        s.max_width = width.into();
        s.max_height = height.into();
        self
    }

    fn max_width(&mut self, width: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().max_width = width.into();
        self
    }

    fn max_height(&mut self, height: impl Into<Option<i32>>) -> &mut Self {
        self.style_mut().max_height = height.into();
        self
    }

    /// Same spacing on every side.
    fn space(&mut self, space: i32) -> &mut Self {
        self.style_mut().space = Sides::all(space);
        self
    }

    fn space_sides(&mut self, top: i32, left: i32, bottom: i32, right: i32) -> &mut Self {
        self.style_mut().space = Sides::new(top, left, bottom, right);
        self
    }

    fn space_top(&mut self, space: i32) -> &mut Self {
        self.style_mut().space.top = space;
        self
    }

    fn space_left(&mut self, space: i32) -> &mut Self {
        self.style_mut().space.left = space;
        self
    }

    fn space_bottom(&mut self, space: i32) -> &mut Self {
        self.style_mut().space.bottom = space;
        self
    }

    fn space_right(&mut self, space: i32) -> &mut Self {
        self.style_mut().space.right = space;
        self
    }

    /// Same padding on every side.
    fn pad(&mut self, pad: i32) -> &mut Self {
        self.style_mut().pad = Sides::all(pad);
        self
    }

    fn pad_sides(&mut self, top: i32, left: i32, bottom: i32, right: i32) -> &mut Self {
        self.style_mut().pad = Sides::new(top, left, bottom, right);
        self
    }

    fn pad_top(&mut self, pad: i32) -> &mut Self {
        self.style_mut().pad.top = pad;
        self
    }

    fn pad_left(&mut self, pad: i32) -> &mut Self {
        self.style_mut().pad.left = pad;
        self
    }

    fn pad_bottom(&mut self, pad: i32) -> &mut Self {
        self.style_mut().pad.bottom = pad;
        self
    }

    fn pad_right(&mut self, pad: i32) -> &mut Self {
        self.style_mut().pad.right = pad;
        self
    }

    /// Fill the cell on both axes.
    fn fill(&mut self) -> &mut Self {
        self.set_fill(true, true)
    }

    fn fill_x(&mut self) -> &mut Self {
        self.style_mut().fill_x = true;
        self
    }

    fn fill_y(&mut self) -> &mut Self {
        self.style_mut().fill_y = true;
        self
    }

    fn set_fill(&mut self, x: bool, y: bool) -> &mut Self {
        let s = self.style_mut();
        s.fill_x = x;
        s.fill_y = y;
        self
    }

    /// Let the column and row take leftover space.
    fn expand(&mut self) -> &mut Self {
        self.set_expand(true, true)
    }

    fn expand_x(&mut self) -> &mut Self {
        self.style_mut().expand_x = true;
        self
    }

    fn expand_y(&mut self) -> &mut Self {
        self.style_mut().expand_y = true;
        self
    }

    fn set_expand(&mut self, x: bool, y: bool) -> &mut Self {
        let s = self.style_mut();
        s.expand_x = x;
        s.expand_y = y;
        self
    }

    fn align(&mut self, align: Align) -> &mut Self {
        self.style_mut().align = align;
        self
    }

    /// Span `colspan` columns. Zero is clamped to 1.
    fn colspan(&mut self, colspan: usize) -> &mut Self {
        self.style_mut().colspan = colspan.max(1);
        self
    }

    /// Join the uniform groups of both axes.
    fn uniform(&mut self) -> &mut Self {
        self.set_uniform(true, true)
    }

    fn uniform_x(&mut self) -> &mut Self {
        self.style_mut().uniform_x = true;
        self
    }

    fn uniform_y(&mut self) -> &mut Self {
        self.style_mut().uniform_y = true;
        self
    }

    fn set_uniform(&mut self, x: bool, y: bool) -> &mut Self {
        let s = self.style_mut();
        s.uniform_x = x;
        s.uniform_y = y;
        self
    }

    /// Replace every constraint at once, e.g. with a style loaded from data.
    fn restyle(&mut self, style: SlotStyle) -> &mut Self {
        *self.style_mut() = style;
        self
    }
}

impl Styled for SlotStyle {
    fn style_mut(&mut self) -> &mut SlotStyle {
        self
    }
}

/// One grid entry.
///
/// A slot without content is a spacer: it occupies its columns and row but
/// measures as zero unless its style pins a size.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<C> {
    content: Option<C>,
    style: SlotStyle,
    row_end: bool,
}

impl<C> Slot<C> {
    /// Create a slot that copies `defaults`.
    #[must_use]
    pub fn new(content: Option<C>, defaults: &SlotStyle) -> Self {
        Self {
            content,
            style: *defaults,
            row_end: false,
        }
    }

    /// Hosted content, if any.
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Mutable access to the hosted content.
    pub fn content_mut(&mut self) -> Option<&mut C> {
        self.content.as_mut()
    }

    /// True unless this slot is a spacer.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Take the content out of the slot.
    pub fn into_content(self) -> Option<C> {
        self.content
    }

    /// The slot's constraint record.
    pub fn style(&self) -> &SlotStyle {
        &self.style
    }

    /// True if this slot terminates its row.
    pub fn is_row_end(&self) -> bool {
        self.row_end
    }

    /// Mark or unmark this slot as the last of its row.
    pub fn set_row_end(&mut self, row_end: bool) -> &mut Self {
        self.row_end = row_end;
        self
    }
}

impl<C: Content> Slot<C> {
    /// Resolve min/preferred/max size.
    ///
    /// Explicit bounds win; missing ones fall back to the content's
    /// intrinsic sizes (zero for spacers). Content is asked only for the
    /// kinds of size that are actually missing.
    pub fn query(&self) -> SizeQuery {
        let s = &self.style;
        let content = self.content.as_ref();

        let intrinsic = |pinned_w: Option<i32>, pinned_h: Option<i32>, measure: fn(&C) -> Size| {
            let fallback = match (pinned_w, pinned_h, content) {
                (Some(_), Some(_), _) | (_, _, None) => Size::ZERO,
                (_, _, Some(c)) => measure(c),
            };
            Size::new(
                pinned_w.unwrap_or(fallback.width),
                pinned_h.unwrap_or(fallback.height),
            )
        };

        SizeQuery {
            min: intrinsic(s.min_width, s.min_height, C::min_size),
            pref: intrinsic(s.pref_width, s.pref_height, C::pref_size),
            max: intrinsic(s.max_width, s.max_height, C::max_size),
        }
        .normalized()
    }
}

impl<C> Styled for Slot<C> {
    fn style_mut(&mut self) -> &mut SlotStyle {
        &mut self.style
    }
}
