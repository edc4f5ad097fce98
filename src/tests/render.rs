use super::{fit_viewport, MindMapCanvas};
use crate::layout::{layout, Bounds, LayoutConfig};
use crate::parser::parse;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

fn rendered_text(buf: &Buffer) -> String {
    buf.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_viewport_keeps_cells_square() {
    let bounds = Bounds {
        min_x: -10.0,
        min_y: 0.0,
        max_x: 10.0,
        max_y: 6.0,
    };
    let view = fit_viewport(bounds, 40, 20, (0.0, 0.0), 1.0);

    let x_span = view.x_bounds[1] - view.x_bounds[0];
    let y_span = view.y_bounds[1] - view.y_bounds[0];
    assert!((x_span / 40.0 * 2.0 - y_span / 20.0).abs() < 1e-9);
    assert!(x_span >= 20.0 && y_span >= 6.0);
    // Layout y grows downwards, canvas y upwards.
    assert!((view.y_bounds[0] + view.y_bounds[1] + 6.0).abs() < 1e-9);
}

#[test]
fn test_viewport_zoom_and_pan() {
    let bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 20.0,
        max_y: 20.0,
    };
    let base = fit_viewport(bounds, 20, 10, (0.0, 0.0), 1.0);
    let zoomed = fit_viewport(bounds, 20, 10, (5.0, 0.0), 2.0);

    let base_span = base.x_bounds[1] - base.x_bounds[0];
    let zoomed_span = zoomed.x_bounds[1] - zoomed.x_bounds[0];
    assert!((base_span / 2.0 - zoomed_span).abs() < 1e-9);
    assert!(((zoomed.x_bounds[0] + zoomed.x_bounds[1]) / 2.0 - 15.0).abs() < 1e-9);
}

#[test]
fn test_labels_are_drawn() {
    let map = layout(&parse("Topic:\n\tidea"), &LayoutConfig::default());
    let area = Rect::new(0, 0, 60, 24);
    let mut buf = Buffer::empty(area);

    MindMapCanvas::new(&map).render(area, &mut buf);

    let text = rendered_text(&buf);
    assert!(text.contains("Topic"), "missing section label in {text:?}");
    assert!(text.contains("idea"), "missing leaf label in {text:?}");
}

#[test]
fn test_empty_layout_renders_without_panicking() {
    let map = layout(&parse(""), &LayoutConfig::default());
    let area = Rect::new(0, 0, 10, 5);
    let mut buf = Buffer::empty(area);

    MindMapCanvas::new(&map)
        .zoom(0.0)
        .block(ratatui::widgets::Block::bordered())
        .render(area, &mut buf);

    assert_eq!(buf.area, area);
}

#[test]
fn test_wide_label_is_centered_by_display_width() {
    let map = layout(&parse("漢字漢字:"), &LayoutConfig::default());
    let area = Rect::new(0, 0, 41, 21);
    let mut buf = Buffer::empty(area);

    MindMapCanvas::new(&map).render(area, &mut buf);

    let row = (0..area.height)
        .find(|&y| (0..area.width).any(|x| buf[(x, y)].symbol() == "漢"))
        .expect("label row");
    let cells: Vec<u16> = (0..area.width)
        .filter(|&x| ["漢", "字"].contains(&buf[(x, row)].symbol()))
        .collect();
    assert_eq!(cells.len(), 4);

    let view = fit_viewport(
        map.bounds().unwrap().expand(2.0),
        area.width,
        area.height,
        (0.0, 0.0),
        1.0,
    );
    let span = view.x_bounds[1] - view.x_bounds[0];
    let node_column = (map.nodes[1].x - view.x_bounds[0]) * f64::from(area.width - 1) / span;
    // Four double-width glyphs span eight columns; their midpoint sits at the node.
    let midpoint = (f64::from(cells[0]) + f64::from(cells[3]) + 2.0) / 2.0;
    assert!((midpoint - node_column).abs() <= 1.0, "{cells:?} around {node_column}");
}
