//! Tree representation for parsed outlines.
//!
//! An outline node is either a section (declared by a line ending in a colon) or the
//! implicit root. Sections keep their nested sections and their leaf items in separate
//! lists, so a leaf's text can never collide with a section label.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Hierarchical outline division holding nested sections and leaf items in source order.
pub struct OutlineNode {
    /// Section header text without the trailing colon (empty for a header-less root).
    pub label: String,
    /// Sections nested directly beneath this node.
    pub children: Vec<OutlineNode>,
    /// Leaf items attached directly to this node.
    pub leaves: Vec<String>,
    /// Distance from the root (0 for the root itself).
    pub depth: usize,
}

impl OutlineNode {
    #[must_use]
    /// Creates the empty root that every parse starts from.
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    /// Creates an empty section with the given label at the given depth.
    pub fn section(label: impl Into<String>, depth: usize) -> Self {
        Self {
            label: label.into(),
            depth,
            ..Self::default()
        }
    }

    #[must_use]
    /// True when the node holds neither sections nor leaves.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.leaves.is_empty()
    }

    #[must_use]
    /// Counts every section and leaf item below this node.
    ///
    /// Equal to the sum of `1 + child.subtree_weight()` over child sections plus the number
    /// of leaves. Walks the subtree with an explicit stack so deep outlines do not recurse.
    pub fn subtree_weight(&self) -> usize {
        let mut weight = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            weight += node.children.len() + node.leaves.len();
            pending.extend(node.children.iter());
        }
        weight
    }

    #[must_use]
    /// Deepest depth reached by any section or leaf below this node.
    pub fn max_depth(&self) -> usize {
        let mut deepest = self.depth;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            let reach = if node.leaves.is_empty() {
                node.depth
            } else {
                node.depth + 1
            };
            deepest = deepest.max(reach);
            pending.extend(node.children.iter());
        }
        deepest
    }
}
