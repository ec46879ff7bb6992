#![forbid(unsafe_code)]

//! Layout: a constraint-based table engine for rectangular content.
//!
//! # Role in cellgrid
//! `cellgrid-layout` arranges anything that can report a minimum, preferred,
//! and maximum size into rows and columns. Slots may span columns, expand to
//! absorb leftover space, fill their cell, align within it, and join uniform
//! groups that share one width or height. The engine produces rectangles;
//! drawing, events, and widget lifecycles belong to the host.
//!
//! # Primary responsibilities
//! - **GridBuilder**: ordered slots with row boundaries and defaults.
//! - **LayoutEngine**: size aggregation and layout resolution, cached per
//!   structural generation.
//! - **Composite**: host adapter that owns a grid and pushes bounds into
//!   its content.
//! - **Stack**: overlay content whose children share one area.
//! - **debug**: an opt-in observer that records and outlines placements.
//!
//! # Example
//!
//! ```
//! use cellgrid_layout::{Composite, Content, Intrinsic, Styled};
//! use cellgrid_core::{Rect, Size};
//!
//! let mut form = Composite::new();
//! form.add_cell(Intrinsic::fixed(Size::new(8, 1))).align(cellgrid_layout::Align::RIGHT);
//! form.add_cell(Intrinsic::flexible(Size::new(20, 1))).expand_x().fill_x();
//! form.row();
//! form.add_cell(Intrinsic::fixed(Size::new(6, 1))).colspan(2);
//!
//! assert_eq!(form.pref_size(), Size::new(28, 2));
//! let layout = form.layout(Size::new(40, 2));
//! assert_eq!(layout.slot(1), Some(Rect::new(8, 0, 32, 1)));
//! ```

pub mod align;
pub mod builder;
pub mod composite;
pub mod content;
pub mod debug;
pub mod engine;
pub mod query;
pub mod slot;
pub mod stack;

pub use align::{Align, ParseAlignError};
pub use builder::{GridBuilder, Placement, Topology};
pub use composite::Composite;
pub use content::{Content, Intrinsic};
pub use engine::{GridConfig, GridLayout, LayoutEngine, SizeSummary};
pub use query::SizeQuery;
pub use slot::{Slot, SlotStyle, Styled};
pub use stack::Stack;
