use crate::Size;

/// Fixed line-step handed to the logical scroll contract, in device units.
const LINE_STEP: f64 = 16.0;

/// Scroll geometry derived from one layout pass: the recorded viewport, the
/// total scrollable extent, and the step sizes the host scroller uses for
/// line and page scrolling.
///
/// The extent height is always `item_count * row_height` exactly (an exact
/// multiple of the row height), saturating at zero for empty or misconfigured
/// inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollGeometry {
    pub viewport: Size,
    pub extent: Size,
    pub scroll_size: Size,
    pub page_scroll_size: Size,
}

impl ScrollGeometry {
    /// Computes the geometry for an available size, item count, and uniform
    /// row height.
    ///
    /// A non-finite row height (the "unset" sentinel is `f64::NAN`) or a zero
    /// item count collapses the extent height to zero. Pure arithmetic, no
    /// failure modes.
    pub fn compute(available: Size, item_count: usize, row_height: f64) -> Self {
        let height = if row_height.is_finite() {
            (item_count as f64 * row_height).max(0.0)
        } else {
            0.0
        };

        Self {
            viewport: available,
            extent: available.with_height(height),
            scroll_size: Size::new(LINE_STEP, LINE_STEP),
            page_scroll_size: available,
        }
    }
}

impl Default for ScrollGeometry {
    /// Idle values used before the first layout pass records a viewport.
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            extent: Size::ZERO,
            scroll_size: Size::new(1.0, 1.0),
            page_scroll_size: Size::new(10.0, 10.0),
        }
    }
}
