// Example: a simulated host driving the panel through layout and scrolling.
use std::sync::Arc;

use virtual_panel::{PanelOptions, Rect, RowControl, Size, Vector, VirtualPanel};

struct TextRow {
    text: String,
    visible: bool,
    rect: Option<Rect>,
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
        self.rect = Some(rect);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let items: Arc<[String]> = (0..1_000)
        .map(|i| format!("Item {i}"))
        .collect::<Vec<_>>()
        .into();
    let mut panel = VirtualPanel::new(
        PanelOptions::new()
            .with_items(items)
            .with_row_height(30.0)
            .with_template(|item: &String| {
                Ok(TextRow {
                    text: item.clone(),
                    visible: true,
                    rect: None,
                })
            }),
    );

    let viewport = Size::new(400.0, 240.0);
    panel.measure(viewport)?;
    panel.arrange(viewport)?;
    println!("extent={:?}", panel.extent());
    println!("pool={} rows for 1000 items", panel.pool().len());

    panel.set_offset(Vector::new(0.0, 4_321.0))?;
    panel.measure(viewport)?;
    panel.arrange(viewport)?;

    println!("visible_range={:?}", panel.visible_range());
    for row in panel.pool().rows().iter().filter(|row| row.visible) {
        println!("{:>10} y={}", row.text, row.rect.unwrap().y);
    }
    Ok(())
}
