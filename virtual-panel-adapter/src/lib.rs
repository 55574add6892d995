//! Host-driving adapter utilities for the `virtual-panel` crate.
//!
//! The `virtual-panel` crate is UI-agnostic and focuses on the core recycling
//! and layout math. This crate provides the small, framework-neutral pieces a
//! host adapter typically needs on top:
//!
//! - Driving the measure → arrange layout cycle in the order the panel
//!   expects
//! - Clamped offset writes, line steps, and page steps per the logical
//!   scroll contract
//! - Scroll-to-index with alignment
//!
//! It is intentionally framework-agnostic (no concrete UI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;

#[cfg(test)]
mod tests;

pub use controller::{Align, Controller};
