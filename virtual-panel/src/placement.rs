use crate::row::RowControl;
use crate::{Rect, Size};

/// Measures every pooled row, visible or hidden, against the uniform row
/// probe so the host layout pass sees consistent sizing data.
pub(crate) fn measure_rows<R: RowControl>(rows: &mut [R], viewport_width: f64, row_height: f64) {
    let probe = Size::new(viewport_width, row_height);
    for row in rows {
        row.measure(probe);
    }
}

/// Stacks visible rows downward from the corrected top offset.
///
/// The cursor starts at `-sub_offset` so a partially scrolled top row clips
/// at the viewport edge instead of snapping by whole-row increments. Hidden
/// slots receive no rectangle and occupy no stacking position.
pub(crate) fn arrange_rows<R: RowControl>(
    rows: &mut [R],
    viewport_width: f64,
    row_height: f64,
    sub_offset: f64,
) {
    let mut y = if sub_offset == 0.0 { 0.0 } else { -sub_offset };
    for row in rows.iter_mut().filter(|row| row.is_visible()) {
        row.arrange(Rect::new(0.0, y, viewport_width, row_height));
        y += row_height;
    }
}
