//! Layout engine: assigns every outline node and leaf item a position and style class.
//!
//! Depth grows along the primary axis and siblings spread along the secondary axis. Each
//! section reserves a band on the secondary axis sized by its subtree weight, centered on
//! its own coordinate, and hands contiguous sub-bands to its child sections (one unit for
//! the child plus its weight) followed by one unit per leaf.
//!
//! The result is a flat, pre-order list of [`LayoutNode`]s plus the [`Edge`]s between
//! them. The input tree is never modified.

use crate::error::Error;
use crate::outline::OutlineNode;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Gap between depth levels used when no configuration overrides it.
pub const DEFAULT_SPACING_PRIMARY: f64 = 3.0;
/// Gap between neighbouring slots used when no configuration overrides it.
pub const DEFAULT_SPACING_SECONDARY: f64 = 5.0;
/// Number of distinct shape and color classes used when no configuration overrides it.
pub const DEFAULT_CLASS_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Direction in which depth grows.
pub enum Orientation {
    /// Depth grows along `x`; siblings spread along `y`.
    Horizontal,
    /// Depth grows along `y` (downwards); siblings spread along `x`.
    #[default]
    Vertical,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Spacing, orientation and style-class limits for a layout pass.
pub struct LayoutConfig {
    /// Axis along which depth grows.
    pub orientation: Orientation,
    /// Gap between depth levels along the primary axis.
    pub node_spacing_primary: f64,
    /// Gap between neighbouring slots along the secondary axis.
    pub node_spacing_secondary: f64,
    /// Number of distinct shape classes; deeper nodes reuse the last one.
    pub shape_count: usize,
    /// Number of distinct color classes; deeper nodes reuse the last one.
    pub color_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            node_spacing_primary: DEFAULT_SPACING_PRIMARY,
            node_spacing_secondary: DEFAULT_SPACING_SECONDARY,
            shape_count: DEFAULT_CLASS_COUNT,
            color_count: DEFAULT_CLASS_COUNT,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    /// Shape class for a node at `depth`, clamped to the last available class.
    pub fn shape_class(&self, depth: usize) -> usize {
        depth.min(self.shape_count.saturating_sub(1))
    }

    #[must_use]
    /// Color class for a node at `depth`, clamped to the last available class.
    pub fn color_class(&self, depth: usize) -> usize {
        depth.min(self.color_count.saturating_sub(1))
    }

    fn place(&self, primary: f64, secondary: f64) -> Point {
        match self.orientation {
            Orientation::Vertical => Point {
                x: secondary,
                y: primary,
            },
            Orientation::Horizontal => Point {
                x: primary,
                y: secondary,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Position in layout space.
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downwards).
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// What a laid-out node was produced from.
pub enum NodeKind {
    /// The outline root.
    Root,
    /// A section declared with a trailing colon.
    Section,
    /// A leaf item.
    Leaf,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// An outline node or leaf item annotated with its position and style classes.
pub struct LayoutNode {
    /// Display text.
    pub label: String,
    /// Origin of the node in the outline.
    pub kind: NodeKind,
    /// Distance from the root.
    pub depth: usize,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Clamped shape class index.
    pub shape_class: usize,
    /// Clamped color class index.
    pub color_class: usize,
    /// Number of sections and leaves below this node (0 for leaves).
    pub subtree_weight: usize,
    /// Index of the parent in [`MindMapLayout::nodes`].
    pub parent: Option<usize>,
}

impl LayoutNode {
    #[must_use]
    /// Position of the node.
    pub fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Connecting line between a parent and one of its sections or leaves.
pub struct Edge {
    /// Index of the parent node.
    pub from: usize,
    /// Index of the child node.
    pub to: usize,
    /// Parent position.
    pub start: Point,
    /// Child position.
    pub end: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Axis-aligned box enclosing every node position.
pub struct Bounds {
    /// Smallest `x`.
    pub min_x: f64,
    /// Smallest `y`.
    pub min_y: f64,
    /// Largest `x`.
    pub max_x: f64,
    /// Largest `y`.
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    /// Grows the box by `margin` on every side.
    pub fn expand(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Positioned nodes in pre-order and the edges joining them.
pub struct MindMapLayout {
    /// Root first, then each section followed by its subtree, then its leaves.
    pub nodes: Vec<LayoutNode>,
    /// One edge per parent-to-section and parent-to-leaf relation.
    pub edges: Vec<Edge>,
}

impl MindMapLayout {
    #[must_use]
    /// The root node, absent only for a default-constructed layout.
    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    #[must_use]
    /// Box enclosing all node positions, or `None` when there are no nodes.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let start = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.nodes.iter().fold(start, |b, n| Bounds {
            min_x: b.min_x.min(n.x),
            min_y: b.min_y.min(n.y),
            max_x: b.max_x.max(n.x),
            max_y: b.max_y.max(n.y),
        }))
    }

    /// Serialises the layout for external renderers.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialisation fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[must_use]
/// Counts every section and leaf item below `node`.
pub fn subtree_weight(node: &OutlineNode) -> usize {
    node.subtree_weight()
}

/// Pending emission while walking the tree.
enum Frame<'a> {
    Section {
        id: usize,
        depth: usize,
        primary: f64,
        secondary: f64,
        parent: Option<usize>,
    },
    Leaf {
        label: &'a str,
        depth: usize,
        primary: f64,
        secondary: f64,
        parent: usize,
    },
}

/// Sections of the tree in pre-order with their child section ids.
struct Flattened<'a> {
    sections: Vec<&'a OutlineNode>,
    children: Vec<Vec<usize>>,
    weights: Vec<usize>,
}

fn flatten(root: &OutlineNode) -> Flattened<'_> {
    let mut sections = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();
    let mut children: Vec<Vec<usize>> = Vec::new();
    let mut pending = vec![(root, None)];

    while let Some((node, parent)) = pending.pop() {
        let id = sections.len();
        sections.push(node);
        parents.push(parent);
        children.push(Vec::new());
        if let Some(p) = parent {
            children[p].push(id);
        }
        pending.extend(node.children.iter().rev().map(|c| (c, Some(id))));
    }

    // Children always follow their parent in pre-order, so a reverse sweep sees every
    // child's final weight before adding it to the parent.
    let mut weights = vec![0usize; sections.len()];
    for id in (0..sections.len()).rev() {
        weights[id] += sections[id].leaves.len();
        if let Some(p) = parents[id] {
            weights[p] += 1 + weights[id];
        }
    }

    Flattened {
        sections,
        children,
        weights,
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Lays out the tree rooted at `root`.
///
/// The root sits at the origin. Every node, leaves included, gets its shape and color class
/// from its depth, clamped to the configured counts. The result depends only on the tree
/// and the configuration.
pub fn layout(root: &OutlineNode, config: &LayoutConfig) -> MindMapLayout {
    let flat = flatten(root);
    let spacing = config.node_spacing_secondary;
    let mut out = MindMapLayout::default();

    let mut pending = vec![Frame::Section {
        id: 0,
        depth: 0,
        primary: 0.0,
        secondary: 0.0,
        parent: None,
    }];

    while let Some(frame) = pending.pop() {
        let index = out.nodes.len();
        match frame {
            Frame::Section {
                id,
                depth,
                primary,
                secondary,
                parent,
            } => {
                let node = flat.sections[id];
                let weight = flat.weights[id];
                let position = config.place(primary, secondary);
                out.nodes.push(LayoutNode {
                    label: node.label.clone(),
                    kind: if parent.is_none() {
                        NodeKind::Root
                    } else {
                        NodeKind::Section
                    },
                    depth,
                    x: position.x,
                    y: position.y,
                    shape_class: config.shape_class(depth),
                    color_class: config.color_class(depth),
                    subtree_weight: weight,
                    parent,
                });
                push_edge(&mut out, parent, index);

                let next_primary = primary + config.node_spacing_primary;
                let base = secondary - (weight as f64 - 1.0) * spacing / 2.0;
                let mut offset = 0usize;
                let mut frames = Vec::with_capacity(flat.children[id].len() + node.leaves.len());

                for &child in &flat.children[id] {
                    let band = 1 + flat.weights[child];
                    let center = offset as f64 + (band as f64 - 1.0) / 2.0;
                    frames.push(Frame::Section {
                        id: child,
                        depth: depth + 1,
                        primary: next_primary,
                        secondary: base + center * spacing,
                        parent: Some(index),
                    });
                    offset += band;
                }
                for leaf in &node.leaves {
                    frames.push(Frame::Leaf {
                        label: leaf,
                        depth: depth + 1,
                        primary: next_primary,
                        secondary: base + offset as f64 * spacing,
                        parent: index,
                    });
                    offset += 1;
                }
                pending.extend(frames.into_iter().rev());
            }
            Frame::Leaf {
                label,
                depth,
                primary,
                secondary,
                parent,
            } => {
                let position = config.place(primary, secondary);
                out.nodes.push(LayoutNode {
                    label: label.to_string(),
                    kind: NodeKind::Leaf,
                    depth,
                    x: position.x,
                    y: position.y,
                    shape_class: config.shape_class(depth),
                    color_class: config.color_class(depth),
                    subtree_weight: 0,
                    parent: Some(parent),
                });
                push_edge(&mut out, Some(parent), index);
            }
        }
    }

    tracing::debug!(
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        orientation = %config.orientation,
        "laid out mind map"
    );
    out
}

fn push_edge(out: &mut MindMapLayout, parent: Option<usize>, child: usize) {
    let Some(from) = parent else {
        return;
    };
    let start = out.nodes[from].position();
    let end = out.nodes[child].position();
    out.edges.push(Edge {
        from,
        to: child,
        start,
        end,
    });
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
