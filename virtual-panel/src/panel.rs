use alloc::sync::Arc;
use core::cell::Cell;
use core::fmt;

use crate::placement;
use crate::pool::RowPool;
use crate::row::{RowBuildError, RowControl, RowError, RowFactory};
use crate::state::{FrameState, ScrollState, ViewportState};
use crate::{NavigationDirection, Rect, ScrollGeometry, Size, Vector, VisibleRange};

/// Fired once after every materialization pass, when slot-to-index bindings
/// may have changed. Never fired mid-pass, so observers always read a
/// consistent snapshot.
pub type ChildIndexChangedCallback<T, R> = Arc<dyn Fn(&VirtualPanel<T, R>) + Send + Sync>;

/// Fired when the scroll state (extent, viewport, offset) changes.
pub type ScrollInvalidatedCallback<T, R> = Arc<dyn Fn(&VirtualPanel<T, R>) + Send + Sync>;

/// Fired when a configuration change requires a fresh host layout pass (the
/// `InvalidateMeasure` equivalent).
pub type MeasureInvalidatedCallback<T, R> = Arc<dyn Fn(&VirtualPanel<T, R>) + Send + Sync>;

/// Configuration for [`VirtualPanel`].
///
/// Cheap to clone: the item sequence, the row factory, and the callbacks are
/// stored in `Arc`s, so hosts can copy a few fields and call
/// [`VirtualPanel::set_options`] without reallocating closures.
pub struct PanelOptions<T, R> {
    /// Externally owned item sequence; `None` renders as zero items.
    pub items: Option<Arc<[T]>>,
    /// Uniform row height. `f64::NAN` leaves it unset, which disables
    /// materialization and collapses the extent to zero height.
    pub row_height: f64,
    /// Row factory; `None` disables materialization.
    pub template: Option<RowFactory<T, R>>,
    pub on_child_index_changed: Option<ChildIndexChangedCallback<T, R>>,
    pub on_scroll_invalidated: Option<ScrollInvalidatedCallback<T, R>>,
    pub on_measure_invalidated: Option<MeasureInvalidatedCallback<T, R>>,
}

impl<T, R> PanelOptions<T, R> {
    pub fn new() -> Self {
        Self {
            items: None,
            row_height: f64::NAN,
            template: None,
            on_child_index_changed: None,
            on_scroll_invalidated: None,
            on_measure_invalidated: None,
        }
    }

    pub fn with_items(mut self, items: impl Into<Arc<[T]>>) -> Self {
        self.items = Some(items.into());
        self
    }

    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_template(
        mut self,
        template: impl Fn(&T) -> Result<R, RowError> + Send + Sync + 'static,
    ) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn with_on_child_index_changed(
        mut self,
        f: Option<impl Fn(&VirtualPanel<T, R>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_child_index_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_invalidated(
        mut self,
        f: Option<impl Fn(&VirtualPanel<T, R>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_invalidated = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_measure_invalidated(
        mut self,
        f: Option<impl Fn(&VirtualPanel<T, R>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_measure_invalidated = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, R> Default for PanelOptions<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Clone for PanelOptions<T, R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            row_height: self.row_height,
            template: self.template.clone(),
            on_child_index_changed: self.on_child_index_changed.clone(),
            on_scroll_invalidated: self.on_scroll_invalidated.clone(),
            on_measure_invalidated: self.on_measure_invalidated.clone(),
        }
    }
}

impl<T, R> fmt::Debug for PanelOptions<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelOptions")
            .field("item_count", &self.items.as_ref().map(|items| items.len()))
            .field("row_height", &self.row_height)
            .field("has_template", &self.template.is_some())
            .finish_non_exhaustive()
    }
}

/// A virtualizing scroll panel core.
///
/// The panel presents a logical sequence of N fixed-height rows while only
/// ever constructing the handful of row controls the viewport can show,
/// recycling them as the offset moves. It owns no widgets of its own; the
/// host supplies row controls through [`RowControl`] and a row factory, and
/// drives the panel through the standard `measure`/`arrange` entry points.
///
/// Everything is single-threaded and synchronous: a scroll offset write runs
/// geometry recompute, materialization, and the invalidation notifications to
/// completion before the setter returns.
pub struct VirtualPanel<T, R> {
    options: PanelOptions<T, R>,

    geometry: ScrollGeometry,
    offset: Vector,
    range: VisibleRange,

    can_horizontally_scroll: bool,
    can_vertically_scroll: bool,

    pool: RowPool<R>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T, R: RowControl<Item = T>> VirtualPanel<T, R> {
    pub fn new(options: PanelOptions<T, R>) -> Self {
        pdebug!(
            item_count = options.items.as_ref().map_or(0, |items| items.len()),
            row_height = options.row_height,
            has_template = options.template.is_some(),
            "VirtualPanel::new"
        );
        Self {
            options,
            geometry: ScrollGeometry::default(),
            offset: Vector::ZERO,
            range: VisibleRange::default(),
            can_horizontally_scroll: false,
            can_vertically_scroll: false,
            pool: RowPool::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &PanelOptions<T, R> {
        &self.options
    }

    /// Replaces the configuration wholesale and requests a fresh layout pass.
    pub fn set_options(&mut self, options: PanelOptions<T, R>) {
        self.options = options;
        self.invalidate_measure();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut PanelOptions<T, R>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn items(&self) -> Option<&[T]> {
        self.options.items.as_deref()
    }

    pub fn item_count(&self) -> usize {
        self.options.items.as_ref().map_or(0, |items| items.len())
    }

    pub fn set_items(&mut self, items: Option<Arc<[T]>>) {
        self.options.items = items;
        self.invalidate_measure();
    }

    pub fn row_height(&self) -> f64 {
        self.options.row_height
    }

    pub fn set_row_height(&mut self, row_height: f64) {
        self.options.row_height = row_height;
        self.invalidate_measure();
    }

    pub fn set_template(&mut self, template: Option<RowFactory<T, R>>) {
        self.options.template = template;
        self.invalidate_measure();
    }

    pub fn set_template_fn(
        &mut self,
        template: impl Fn(&T) -> Result<R, RowError> + Send + Sync + 'static,
    ) {
        self.set_template(Some(Arc::new(template)));
    }

    pub fn set_on_child_index_changed(
        &mut self,
        f: Option<impl Fn(&Self) + Send + Sync + 'static>,
    ) {
        self.options.on_child_index_changed = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_scroll_invalidated(&mut self, f: Option<impl Fn(&Self) + Send + Sync + 'static>) {
        self.options.on_scroll_invalidated = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_measure_invalidated(
        &mut self,
        f: Option<impl Fn(&Self) + Send + Sync + 'static>,
    ) {
        self.options.on_measure_invalidated = f.map(|f| Arc::new(f) as _);
    }

    /// Coalesces the measure invalidations of several configuration setters
    /// into a single notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.raise_measure_invalidated();
        }
    }

    // --- logical scroll contract ---

    /// Total scrollable content size: `(viewport width, N * row height)`.
    pub fn extent(&self) -> Size {
        self.geometry.extent
    }

    /// Viewport recorded by the most recent layout pass.
    pub fn viewport(&self) -> Size {
        self.geometry.viewport
    }

    /// Line-scroll step size.
    pub fn scroll_size(&self) -> Size {
        self.geometry.scroll_size
    }

    /// Page-scroll step size (one viewport).
    pub fn page_scroll_size(&self) -> Size {
        self.geometry.page_scroll_size
    }

    pub fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }

    pub fn offset(&self) -> Vector {
        self.offset
    }

    /// Sets the scroll offset.
    ///
    /// Geometry recompute, materialization, the scroll-changed notification,
    /// and the layout invalidation request all complete before this returns;
    /// callers observe a consistent visible set immediately after.
    pub fn set_offset(&mut self, offset: Vector) -> Result<(), RowBuildError> {
        ptrace!(x = offset.x, y = offset.y, "set_offset");
        self.offset = offset;
        self.recalculate(self.geometry.viewport);
        self.materialize()?;
        self.raise_scroll_invalidated();
        self.invalidate_measure();
        Ok(())
    }

    pub fn can_horizontally_scroll(&self) -> bool {
        self.can_horizontally_scroll
    }

    pub fn set_can_horizontally_scroll(&mut self, value: bool) {
        self.can_horizontally_scroll = value;
    }

    pub fn can_vertically_scroll(&self) -> bool {
        self.can_vertically_scroll
    }

    pub fn set_can_vertically_scroll(&mut self, value: bool) {
        self.can_vertically_scroll = value;
    }

    /// Logical scrolling is always on; offsets address device units within
    /// the extent.
    pub fn is_logical_scroll_enabled(&self) -> bool {
        true
    }

    /// Bring-into-view is left to the host scroller.
    pub fn bring_into_view(&self, _target: &R, _target_rect: Rect) -> bool {
        false
    }

    /// Directional navigation is not provided; there is never a control in
    /// the requested direction.
    pub fn control_in_direction(
        &self,
        _direction: NavigationDirection,
        _from: Option<&R>,
    ) -> Option<&R> {
        None
    }

    // --- child index provider ---

    /// Bound logical index of `child`, or `None` when `child` is not a
    /// tracked slot or has never been bound.
    pub fn child_index(&self, child: &R) -> Option<usize> {
        let slot = self.pool.position_of(child)?;
        self.pool.bound_index(slot)
    }

    /// Total logical item count, when an item sequence is present.
    pub fn total_count(&self) -> Option<usize> {
        self.options.items.as_ref().map(|items| items.len())
    }

    // --- read accessors ---

    /// The recycling pool, exposed read-only between materialization passes.
    pub fn pool(&self) -> &RowPool<R> {
        &self.pool
    }

    /// The index window resolved by the most recent materialization pass.
    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    // --- state snapshots ---

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            size: self.geometry.viewport,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores a captured frame: viewport geometry first, then the offset,
    /// with a single materialization pass.
    pub fn restore_frame_state(&mut self, frame: FrameState) -> Result<(), RowBuildError> {
        self.recalculate(frame.viewport.size);
        self.set_offset(frame.scroll.offset)
    }

    // --- layout entry points ---

    /// Measure pass: records the viewport, materializes the visible window,
    /// and measures every pooled row against the uniform probe. Returns the
    /// extent as the desired size.
    pub fn measure(&mut self, available: Size) -> Result<Size, RowBuildError> {
        let size = self.recalculate(available);
        self.materialize()?;
        placement::measure_rows(
            self.pool.rows_mut(),
            self.geometry.viewport.width,
            self.options.row_height,
        );
        Ok(size)
    }

    /// Arrange pass: re-materializes against the final size, raises the
    /// scroll-changed notification, and stacks visible rows from the
    /// corrected top offset. Returns the extent.
    pub fn arrange(&mut self, final_size: Size) -> Result<Size, RowBuildError> {
        let size = self.recalculate(final_size);
        self.materialize()?;
        self.raise_scroll_invalidated();
        placement::arrange_rows(
            self.pool.rows_mut(),
            self.geometry.viewport.width,
            self.options.row_height,
            self.range.sub_offset,
        );
        Ok(size)
    }

    // --- internals ---

    fn recalculate(&mut self, available: Size) -> Size {
        self.geometry = ScrollGeometry::compute(available, self.item_count(), self.options.row_height);
        self.geometry.extent
    }

    /// Reconciles the pool with the current visible range: grows it up to the
    /// needed slot count, rebinds every slot, hides slots whose candidate
    /// index falls past the item count, and fires one batched child-index
    /// notification. O(visible count), independent of N.
    fn materialize(&mut self) -> Result<(), RowBuildError> {
        let item_count = self.item_count();
        self.range = VisibleRange::resolve(
            self.geometry.viewport.height,
            self.offset.y,
            self.options.row_height,
            item_count,
        );

        let (Some(items), Some(template)) =
            (self.options.items.clone(), self.options.template.clone())
        else {
            self.teardown();
            return Ok(());
        };
        if items.is_empty() {
            self.teardown();
            return Ok(());
        }

        let range = self.range;
        ptrace!(
            first_index = range.first_index,
            visible_count = range.visible_count,
            sub_offset = range.sub_offset,
            pool_len = self.pool.len(),
            "materialize"
        );

        // Growth phase: one new slot per still-unassigned visible index. The
        // pool never grows past the peak visible count.
        while self.pool.len() < range.visible_count {
            let index = range.first_index + self.pool.len();
            if index >= item_count {
                break;
            }
            let row =
                template(&items[index]).map_err(|source| RowBuildError::new(index, source))?;
            pdebug!(index, pool_len = self.pool.len(), "materialize: create");
            self.pool.push(row);
        }

        // Rebind phase: slot i takes candidate index first_index + i, or is
        // hidden (not destroyed, not unbound) when the candidate falls past
        // the item count or the slot falls past the window. An unset row
        // height resolves to an empty range and hides the whole pool; only
        // teardown drops rows.
        for slot in 0..self.pool.len() {
            let candidate = range.first_index + slot;
            let row = self.pool.row_mut(slot);
            if candidate >= item_count || slot >= range.visible_count {
                if row.is_visible() {
                    ptrace!(slot, candidate, "materialize: hide");
                    row.set_visible(false);
                }
                continue;
            }
            if !row.is_visible() {
                ptrace!(slot, candidate, "materialize: show");
                row.set_visible(true);
            }
            row.bind(&items[candidate]);
            self.pool.bind(slot, candidate);
        }

        self.raise_child_index_changed();
        Ok(())
    }

    /// Full teardown, the only case that shrinks the pool: every row control
    /// is dropped and one child-index notification fires.
    fn teardown(&mut self) {
        if !self.pool.is_empty() {
            pdebug!(pool_len = self.pool.len(), "materialize: teardown");
        }
        self.pool.clear();
        self.raise_child_index_changed();
    }

    fn invalidate_measure(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.raise_measure_invalidated();
    }

    fn raise_measure_invalidated(&self) {
        if let Some(cb) = &self.options.on_measure_invalidated {
            cb(self);
        }
    }

    fn raise_scroll_invalidated(&self) {
        if let Some(cb) = &self.options.on_scroll_invalidated {
            cb(self);
        }
    }

    fn raise_child_index_changed(&self) {
        if let Some(cb) = &self.options.on_child_index_changed {
            cb(self);
        }
    }
}

impl<T, R: RowControl<Item = T>> Default for VirtualPanel<T, R> {
    fn default() -> Self {
        Self::new(PanelOptions::new())
    }
}

impl<T, R> fmt::Debug for VirtualPanel<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualPanel")
            .field("options", &self.options)
            .field("geometry", &self.geometry)
            .field("offset", &self.offset)
            .field("range", &self.range)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
