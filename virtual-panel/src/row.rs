use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::{Rect, Size};

/// Capability surface the panel needs from a row control.
///
/// Whatever row abstraction the host environment provides (a widget, a
/// retained draw node, a test double) participates in recycling through this
/// trait; the panel never depends on a concrete control hierarchy.
pub trait RowControl {
    type Item;

    /// Rebinds the row to a new item value. Called on every materialization
    /// pass for visible slots; must not allocate a new control.
    fn bind(&mut self, item: &Self::Item);

    /// Toggles whether the row participates in rendering. Hidden rows stay
    /// pooled and keep their last binding.
    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Measures the row against the uniform probe size
    /// `(viewport width, row height)`.
    fn measure(&mut self, available: Size);

    /// Places the row at its final rectangle for this layout cycle.
    fn arrange(&mut self, rect: Rect);
}

/// Error a row factory may fail with.
pub type RowError = Box<dyn core::error::Error + Send + Sync>;

/// Builds one row control for a logical item value.
///
/// Row factories are stored as cheap-to-clone `Arc`s so options structs can
/// be copied around without reallocating closures.
pub type RowFactory<T, R> = Arc<dyn Fn(&T) -> Result<R, RowError> + Send + Sync>;

/// Fatal materialization failure: the row factory could not build a row for a
/// valid item.
///
/// This indicates a misconfigured template rather than a transient condition,
/// so the panel neither retries nor swallows it; the error propagates out of
/// the layout entry points to the host's fault-handling path.
#[derive(Debug)]
pub struct RowBuildError {
    index: usize,
    source: RowError,
}

impl RowBuildError {
    pub(crate) fn new(index: usize, source: RowError) -> Self {
        Self { index, source }
    }

    /// Logical index of the item the factory failed on.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn into_source(self) -> RowError {
        self.source
    }
}

impl fmt::Display for RowBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row factory failed for item at index {}", self.index)
    }
}

impl core::error::Error for RowBuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        let source: &(dyn core::error::Error + 'static) = &*self.source;
        Some(source)
    }
}
