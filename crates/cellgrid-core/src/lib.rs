#![forbid(unsafe_code)]

//! Core: geometry and logging shared by every cellgrid crate.
//!
//! # Role in cellgrid
//! `cellgrid-core` holds the value types that cross the boundary between the
//! layout engine and its host: [`geometry::Size`] for measurements,
//! [`geometry::Rect`] for placements, and [`geometry::Sides`] for padding,
//! spacing, and border insets. It has no knowledge of slots or grids.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use geometry::{Rect, Sides, Size};
