use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use virtual_panel::{PanelOptions, Rect, RowControl, Size, VirtualPanel};

#[derive(Debug)]
struct Row {
    label: String,
    visible: bool,
}

impl RowControl for Row {
    type Item = String;

    fn bind(&mut self, item: &String) {
        self.label = item.clone();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn measure(&mut self, _available: Size) {}

    fn arrange(&mut self, _rect: Rect) {}
}

fn items(count: usize) -> Arc<[String]> {
    (0..count)
        .map(|i| format!("Item {i}"))
        .collect::<Vec<_>>()
        .into()
}

fn controller(count: usize, row_height: f64) -> Controller<String, Row> {
    Controller::new(
        PanelOptions::new()
            .with_items(items(count))
            .with_row_height(row_height)
            .with_template(|item: &String| {
                Ok(Row {
                    label: item.clone(),
                    visible: true,
                })
            }),
    )
}

#[test]
fn layout_runs_measure_then_arrange_and_returns_the_extent() {
    let mut c = controller(1000, 30.0);
    let size = c.layout(Size::new(400.0, 240.0)).unwrap();
    assert_eq!(size, Size::new(400.0, 30_000.0));
    // floor(240 / 30) = 8, plus the partial trailing row.
    assert_eq!(c.panel().pool().len(), 9);
    assert_eq!(c.panel().pool().row(0).unwrap().label, "Item 0");
}

#[test]
fn scroll_writes_are_clamped_to_the_extent() {
    let mut c = controller(1000, 30.0);
    c.layout(Size::new(400.0, 240.0)).unwrap();

    assert_eq!(c.max_scroll_offset(), 29_760.0);
    assert_eq!(c.scroll_to(-50.0).unwrap(), 0.0);
    assert_eq!(c.scroll_to(1e9).unwrap(), 29_760.0);

    // Content smaller than the viewport leaves nothing to scroll.
    let mut small = controller(3, 30.0);
    small.layout(Size::new(400.0, 240.0)).unwrap();
    assert_eq!(small.max_scroll_offset(), 0.0);
    assert_eq!(small.scroll_to(10.0).unwrap(), 0.0);
}

#[test]
fn line_and_page_steps_follow_the_scroll_contract() {
    let mut c = controller(1000, 30.0);
    c.layout(Size::new(400.0, 240.0)).unwrap();

    assert_eq!(c.line_down().unwrap(), 16.0);
    assert_eq!(c.line_down().unwrap(), 32.0);
    assert_eq!(c.page_down().unwrap(), 272.0);
    assert_eq!(c.page_up().unwrap(), 32.0);
    assert_eq!(c.line_up().unwrap(), 16.0);
    assert_eq!(c.line_up().unwrap(), 0.0);
    assert_eq!(c.line_up().unwrap(), 0.0);
}

#[test]
fn scroll_to_index_honors_alignment() {
    let mut c = controller(1000, 30.0);
    c.layout(Size::new(400.0, 240.0)).unwrap();

    assert_eq!(c.scroll_to_index(500, Align::Start).unwrap(), 15_000.0);
    assert_eq!(c.panel().visible_range().first_index, 500);

    // Already fully visible: Auto stays put.
    assert_eq!(c.scroll_to_index_offset(503, Align::Auto), 15_000.0);
    // Above the viewport: Auto aligns to start.
    assert_eq!(c.scroll_to_index_offset(100, Align::Auto), 3_000.0);
    // Below the viewport: Auto aligns to end.
    assert_eq!(c.scroll_to_index_offset(900, Align::Auto), 26_790.0);

    assert_eq!(c.scroll_to_index_offset(500, Align::End), 14_790.0);
    assert_eq!(c.scroll_to_index_offset(500, Align::Center), 14_895.0);

    // Out-of-range indexes clamp to the last row, offsets to the extent.
    assert_eq!(c.scroll_to_index(5000, Align::Start).unwrap(), 29_760.0);
}

#[test]
fn scroll_to_index_is_inert_without_configuration() {
    let unlayouted = controller(10, 30.0);
    assert_eq!(unlayouted.scroll_to_index_offset(5, Align::Start), 0.0);

    let unconfigured: Controller<String, Row> = Controller::new(PanelOptions::new());
    assert_eq!(unconfigured.scroll_to_index_offset(5, Align::Start), 0.0);
}

#[test]
fn layout_surfaces_row_factory_failures() {
    let mut c: Controller<String, Row> = Controller::new(
        PanelOptions::new()
            .with_items(items(10))
            .with_row_height(30.0)
            .with_template(|item: &String| {
                if item == "Item 3" {
                    return Err("no row".into());
                }
                Ok(Row {
                    label: item.clone(),
                    visible: true,
                })
            }),
    );

    let err = c.layout(Size::new(100.0, 300.0)).unwrap_err();
    assert_eq!(err.index(), 3);
}

#[test]
fn scrolling_session_keeps_the_window_consistent() {
    let mut c = controller(1000, 30.0);
    c.layout(Size::new(400.0, 240.0)).unwrap();

    c.scroll_to(12_345.0).unwrap();
    c.layout(Size::new(400.0, 240.0)).unwrap();

    let range = c.panel().visible_range();
    assert_eq!(range.first_index, 411); // floor(12345 / 30)
    assert_eq!(range.sub_offset, 15.0);
    assert_eq!(c.panel().pool().len(), 9);
    for slot in 0..c.panel().pool().len() {
        assert_eq!(c.panel().pool().bound_index(slot), Some(411 + slot));
    }
}

#[test]
fn controller_exposes_the_wrapped_panel() {
    let panel: VirtualPanel<String, Row> = VirtualPanel::new(PanelOptions::new());
    let mut c = Controller::from_panel(panel);
    c.panel_mut().set_row_height(20.0);
    assert_eq!(c.panel().row_height(), 20.0);
    let panel = c.into_panel();
    assert_eq!(panel.row_height(), 20.0);
}
