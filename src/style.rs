//! Mapping from layout style classes to concrete shapes, colors and sizes.
//!
//! Any renderer drawing a [`MindMapLayout`](crate::layout::MindMapLayout) uses these so that
//! diagrams look the same everywhere: class 0 is a red square, class 1 a blue circle and
//! class 2 a green hexagon. Color classes past the fixed palette get generated colors.

use crate::layout::{NodeKind, Point};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

/// Golden angle in degrees; successive generated hues stay far apart.
const GOLDEN_ANGLE: f64 = 137.507_764;

/// Leaf shapes are this many times smaller than section shapes.
const LEAF_SHRINK: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outline drawn for a node.
pub enum Shape {
    /// Axis-aligned square.
    Square,
    /// Circle.
    Circle,
    /// Regular hexagon with a vertex pointing up.
    Hexagon,
}

impl Shape {
    #[must_use]
    /// Shape for a shape class; classes beyond the last shape reuse it.
    pub fn from_class(class: usize) -> Self {
        match class {
            0 => Self::Square,
            1 => Self::Circle,
            _ => Self::Hexagon,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// 8-bit RGB color.
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    #[must_use]
    /// Builds a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    /// Uppercase `#RRGGBB` notation.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fixed colors for the first color classes.
pub const PALETTE: [Rgb; 3] = [
    Rgb::new(0xFF, 0x99, 0x99),
    Rgb::new(0x99, 0xCC, 0xFF),
    Rgb::new(0x99, 0xFF, 0x99),
];

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Fill color for a color class.
///
/// The first classes come from [`PALETTE`]; later ones rotate the hue by the golden angle
/// at the palette's pastel lightness.
pub fn color_for_class(class: usize) -> Rgb {
    if let Some(color) = PALETTE.get(class) {
        return *color;
    }
    let step = (class - PALETTE.len()) as f64;
    let hue = (30.0 + step * GOLDEN_ANGLE).rem_euclid(360.0);
    hsl_to_rgb(hue, 0.9, 0.8)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector {
        s if s < 1.0 => (chroma, x, 0.0),
        s if s < 2.0 => (x, chroma, 0.0),
        s if s < 3.0 => (0.0, chroma, x),
        s if s < 4.0 => (0.0, x, chroma),
        s if s < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

#[must_use]
/// Side length (or diameter) of a node's shape given the base unit.
pub fn node_size(kind: NodeKind, base: f64) -> f64 {
    match kind {
        NodeKind::Leaf => base / LEAF_SHRINK,
        NodeKind::Root | NodeKind::Section => base,
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Corners of a hexagon centered on `center` with circumradius `radius`.
///
/// The first vertex points towards negative `y`, which is up on screen.
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    std::array::from_fn(|i| {
        let angle = -FRAC_PI_2 + i as f64 * FRAC_PI_3;
        Point {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    })
}

#[cfg(test)]
#[path = "tests/style.rs"]
mod tests;
