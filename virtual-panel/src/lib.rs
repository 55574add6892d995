//! A virtualizing scroll panel core.
//!
//! For adapter-level utilities (controllers, clamped/stepped scrolling), see
//! the `virtual-panel-adapter` crate.
//!
//! This crate implements the hard part of a recycling list panel: mapping an
//! item count and uniform row height to a scrollable extent, resolving the
//! scroll offset to a visible index window, and materializing that window
//! into a small pool of row controls that is rebound in place as the offset
//! moves.
//!
//! It is UI-agnostic. A host framework is expected to provide:
//! - row controls implementing the [`RowControl`] capability trait
//! - a row factory (logical item value → row control)
//! - `measure`/`arrange` calls once per layout cycle, in that order
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod geometry;
mod panel;
mod placement;
mod pool;
mod range;
mod row;
mod state;
mod types;


pub use geometry::ScrollGeometry;
pub use panel::{
    ChildIndexChangedCallback, MeasureInvalidatedCallback, PanelOptions,
    ScrollInvalidatedCallback, VirtualPanel,
};
pub use pool::RowPool;
pub use range::VisibleRange;
pub use row::{RowBuildError, RowControl, RowError, RowFactory};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{NavigationDirection, Rect, Size, Vector};
