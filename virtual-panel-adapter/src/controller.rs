use core::fmt;

use virtual_panel::{PanelOptions, RowBuildError, RowControl, Size, Vector, VirtualPanel};

/// Where a row should land in the viewport after a scroll-to-index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll the minimum distance that makes the row fully visible; no-op
    /// when it already is.
    Auto,
}

/// A framework-neutral controller that owns a [`VirtualPanel`] and provides
/// the workflows a host adapter usually wires up by hand.
///
/// Adapters drive it by calling:
/// - `layout(available)` whenever the host runs a layout cycle
/// - `scroll_to`/`scroll_by` when scroll input arrives
/// - `line_*`/`page_*` for scrollbar button and keyboard paging input
///
/// Offsets are clamped so the viewport never overruns the extent; the panel's
/// own recycler guards the out-of-range case regardless.
pub struct Controller<T, R> {
    panel: VirtualPanel<T, R>,
}

impl<T, R: RowControl<Item = T>> Controller<T, R> {
    pub fn new(options: PanelOptions<T, R>) -> Self {
        Self {
            panel: VirtualPanel::new(options),
        }
    }

    pub fn from_panel(panel: VirtualPanel<T, R>) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &VirtualPanel<T, R> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut VirtualPanel<T, R> {
        &mut self.panel
    }

    pub fn into_panel(self) -> VirtualPanel<T, R> {
        self.panel
    }

    /// Runs one host layout cycle: measure, then arrange, in that order.
    ///
    /// Returns the arranged size (the extent).
    pub fn layout(&mut self, available: Size) -> Result<Size, RowBuildError> {
        self.panel.measure(available)?;
        self.panel.arrange(available)
    }

    /// Largest offset that still shows a full viewport of content.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.panel.extent().height - self.panel.viewport().height).max(0.0)
    }

    pub fn clamp_offset(&self, y: f64) -> f64 {
        y.max(0.0).min(self.max_scroll_offset())
    }

    /// Applies a clamped offset write. Returns the applied offset.
    pub fn scroll_to(&mut self, y: f64) -> Result<f64, RowBuildError> {
        let y = self.clamp_offset(y);
        let x = self.panel.offset().x;
        self.panel.set_offset(Vector::new(x, y))?;
        Ok(y)
    }

    pub fn scroll_by(&mut self, dy: f64) -> Result<f64, RowBuildError> {
        self.scroll_to(self.panel.offset().y + dy)
    }

    pub fn line_up(&mut self) -> Result<f64, RowBuildError> {
        let step = self.panel.scroll_size().height;
        self.scroll_by(-step)
    }

    pub fn line_down(&mut self) -> Result<f64, RowBuildError> {
        let step = self.panel.scroll_size().height;
        self.scroll_by(step)
    }

    pub fn page_up(&mut self) -> Result<f64, RowBuildError> {
        let step = self.panel.page_scroll_size().height;
        self.scroll_by(-step)
    }

    pub fn page_down(&mut self) -> Result<f64, RowBuildError> {
        let step = self.panel.page_scroll_size().height;
        self.scroll_by(step)
    }

    /// Offset that brings `index` into the requested alignment, clamped to
    /// the scrollable range.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> f64 {
        let count = self.panel.item_count();
        let row_height = self.panel.row_height();
        if count == 0 || !row_height.is_finite() || row_height <= 0.0 {
            return 0.0;
        }

        let index = index.min(count - 1);
        let start = index as f64 * row_height;
        let end = start + row_height;
        let view = self.panel.viewport().height;
        let current = self.panel.offset().y;

        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => start + row_height / 2.0 - view / 2.0,
            Align::Auto => {
                if start >= current && end <= current + view {
                    current
                } else if start < current {
                    start
                } else {
                    end - view
                }
            }
        };

        self.clamp_offset(target)
    }

    /// Computes and applies a scroll-to-index. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<f64, RowBuildError> {
        let y = self.scroll_to_index_offset(index, align);
        self.scroll_to(y)
    }
}

impl<T, R> fmt::Debug for Controller<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("panel", &self.panel)
            .finish()
    }
}
