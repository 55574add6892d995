// Example: driving a panel the way a host scroller would, without holding
// any real UI objects.
use std::sync::Arc;

use virtual_panel::{PanelOptions, Rect, RowControl, Size};
use virtual_panel_adapter::{Align, Controller};

struct TextRow {
    text: String,
    visible: bool,
    y: f64,
}

impl RowControl for TextRow {
    type Item = String;

    fn bind(&mut self, item: &String) {
        self.text = item.clone();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn measure(&mut self, _available: Size) {}

    fn arrange(&mut self, rect: Rect) {
        self.y = rect.y;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let items: Arc<[String]> = (0..100)
        .map(|i| format!("Item {i}"))
        .collect::<Vec<_>>()
        .into();
    let mut c = Controller::new(
        PanelOptions::new()
            .with_items(items)
            .with_row_height(25.0)
            .with_template(|item: &String| {
                Ok(TextRow {
                    text: item.clone(),
                    visible: true,
                    y: 0.0,
                })
            }),
    );

    c.layout(Size::new(400.0, 250.0))?;
    println!(
        "extent={:?} pool={}",
        c.panel().extent(),
        c.panel().pool().len()
    );

    for _ in 0..3 {
        c.page_down()?;
    }
    c.line_down()?;
    c.layout(Size::new(400.0, 250.0))?;
    println!(
        "offset={} range={:?}",
        c.panel().offset().y,
        c.panel().visible_range()
    );

    c.scroll_to_index(99, Align::End)?;
    c.layout(Size::new(400.0, 250.0))?;
    println!(
        "offset={} range={:?}",
        c.panel().offset().y,
        c.panel().visible_range()
    );

    for row in c.panel().pool().rows().iter().filter(|row| row.visible) {
        println!("{:>8} y={}", row.text, row.y);
    }
    Ok(())
}
