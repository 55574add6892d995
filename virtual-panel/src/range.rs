/// The window of logical indices covered by the viewport at a scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    /// First logical index intersecting the viewport.
    pub first_index: usize,
    /// Number of row slots the viewport needs, including the partially
    /// visible trailing row.
    pub visible_count: usize,
    /// Fractional-row remainder of the offset. Rendered rows shift up by this
    /// amount so the top row clips at the viewport edge instead of snapping
    /// by whole-row increments.
    pub sub_offset: f64,
}

impl VisibleRange {
    /// Maps a viewport height and scroll offset onto the visible index window.
    ///
    /// `first_index = floor(offset / row_height)` and
    /// `visible_count = floor(viewport / row_height)`, plus one extra slot for
    /// the fractionally visible trailing row whenever the window is smaller
    /// than the item count. Omitting that row leaves a blank strip at the
    /// bottom during scroll.
    ///
    /// A zero item count or an unset/non-finite/non-positive row height
    /// resolves to an empty range rather than a numeric fault; negative
    /// offsets and viewport heights saturate to zero.
    pub fn resolve(
        viewport_height: f64,
        offset_y: f64,
        row_height: f64,
        item_count: usize,
    ) -> Self {
        if item_count == 0 || !row_height.is_finite() || row_height <= 0.0 {
            return Self::default();
        }

        let offset_y = offset_y.max(0.0);
        let viewport_height = viewport_height.max(0.0);

        let first_index = (offset_y / row_height) as usize;
        let mut visible_count = (viewport_height / row_height) as usize;
        if visible_count < item_count {
            visible_count += 1;
        }
        let sub_offset = offset_y % row_height;

        Self {
            first_index,
            visible_count,
            sub_offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}
