//! Terminal renderer drawing a laid-out mind map on a ratatui canvas.
//!
//! Edges are drawn first, then node outlines, then labels, each on its own canvas layer so
//! that text stays readable over lines. Layout space has `y` growing downwards while the
//! canvas grows upwards, so every `y` is negated on the way in.

use crate::layout::{Bounds, MindMapLayout, Point};
use crate::style::{color_for_class, hexagon_vertices, node_size, Rgb, Shape};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Rectangle},
        Block, Widget,
    },
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Visible window onto layout space.
pub struct Viewport {
    /// Canvas x range.
    pub x_bounds: [f64; 2],
    /// Canvas y range (already flipped to point upwards).
    pub y_bounds: [f64; 2],
    /// Layout units covered by one terminal column.
    pub units_per_column: f64,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Fits `bounds` into a `cols` x `rows` cell area, keeping shapes undistorted.
///
/// `zoom` above 1 magnifies around the center; `pan` shifts the center in layout units.
pub fn fit_viewport(bounds: Bounds, cols: u16, rows: u16, pan: (f64, f64), zoom: f64) -> Viewport {
    let cols = f64::from(cols.max(1));
    let rows = f64::from(rows.max(1));
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };

    let scale = (bounds.width() / cols)
        .max(bounds.height() / (rows * CELL_ASPECT))
        .max(f64::EPSILON)
        / zoom;
    let half_w = scale * cols / 2.0;
    let half_h = scale * rows * CELL_ASPECT / 2.0;
    let cx = (bounds.min_x + bounds.max_x) / 2.0 + pan.0;
    let cy = -((bounds.min_y + bounds.max_y) / 2.0 + pan.1);

    Viewport {
        x_bounds: [cx - half_w, cx + half_w],
        y_bounds: [cy - half_h, cy + half_h],
        units_per_column: scale,
    }
}

/// Widget drawing a [`MindMapLayout`] with the shared style contract.
pub struct MindMapCanvas<'a> {
    layout: &'a MindMapLayout,
    node_size: f64,
    pan: (f64, f64),
    zoom: f64,
    block: Option<Block<'a>>,
}

impl<'a> MindMapCanvas<'a> {
    #[must_use]
    /// Draws `layout` with a base node size of 2 units, unzoomed and centered.
    pub fn new(layout: &'a MindMapLayout) -> Self {
        Self {
            layout,
            node_size: 2.0,
            pan: (0.0, 0.0),
            zoom: 1.0,
            block: None,
        }
    }

    #[must_use]
    /// Base size of section shapes in layout units.
    pub fn node_size(mut self, size: f64) -> Self {
        self.node_size = size;
        self
    }

    #[must_use]
    /// Offset of the view center in layout units.
    pub fn pan(mut self, pan: (f64, f64)) -> Self {
        self.pan = pan;
        self
    }

    #[must_use]
    /// Magnification around the view center.
    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    /// Surrounds the canvas with a block.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn paint(&self, ctx: &mut Context<'_>, units_per_column: f64) {
        for edge in &self.layout.edges {
            ctx.draw(&Line {
                x1: edge.start.x,
                y1: -edge.start.y,
                x2: edge.end.x,
                y2: -edge.end.y,
                color: Color::Gray,
            });
        }
        ctx.layer();

        for node in &self.layout.nodes {
            let color = Color::from(color_for_class(node.color_class));
            let size = node_size(node.kind, self.node_size);
            let (x, y) = (node.x, -node.y);
            match Shape::from_class(node.shape_class) {
                Shape::Square => ctx.draw(&Rectangle {
                    x: x - size / 2.0,
                    y: y - size / 2.0,
                    width: size,
                    height: size,
                    color,
                }),
                Shape::Circle => ctx.draw(&Circle {
                    x,
                    y,
                    radius: size / 2.0,
                    color,
                }),
                Shape::Hexagon => {
                    let corners = hexagon_vertices(Point { x, y: node.y }, size / 2.0);
                    for (i, a) in corners.iter().enumerate() {
                        let b = corners[(i + 1) % corners.len()];
                        ctx.draw(&Line {
                            x1: a.x,
                            y1: -a.y,
                            x2: b.x,
                            y2: -b.y,
                            color,
                        });
                    }
                }
            }
        }
        ctx.layer();

        for node in &self.layout.nodes {
            if node.label.is_empty() {
                continue;
            }
            let label = Span::styled(node.label.clone(), Style::default().fg(Color::White));
            #[allow(clippy::cast_precision_loss)]
            let half_width = label.width() as f64 * units_per_column / 2.0;
            ctx.print(node.x - half_width, -node.y, label);
        }
    }
}

impl Widget for MindMapCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let bounds = self
            .layout
            .bounds()
            .unwrap_or(Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            })
            .expand(self.node_size);
        let view = fit_viewport(bounds, inner.width, inner.height, self.pan, self.zoom);

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(view.x_bounds)
            .y_bounds(view.y_bounds)
            .paint(|ctx| self.paint(ctx, view.units_per_column));
        if let Some(block) = self.block.clone() {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
