//! Outline parsing from tab-indented text into an [`OutlineNode`] tree.
//!
//! Each leading tab is one nesting level. A line whose content ends with a colon opens a
//! section; any other non-blank line is a leaf item of the nearest open section.
//!
//! Open sections live on a local stack of `(level, node)` pairs with the root at the
//! bottom. A section is only attached to its parent once it is popped, so the stack owns
//! every node that can still receive content and no shared references are needed.
//! Dedenting past every open section re-anchors the line to the root instead of failing.

use crate::outline::OutlineNode;

/// Leading tab count of a line and its trimmed content.
fn split_indent(line: &str) -> (usize, &str) {
    let level = line.bytes().take_while(|&b| b == b'\t').count();
    (level, line[level..].trim())
}

/// Attaches the top of the stack to the entry below it.
fn close_section(stack: &mut Vec<(usize, OutlineNode)>) {
    if stack.len() < 2 {
        return;
    }
    if let Some((_, node)) = stack.pop() {
        if let Some((_, parent)) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

#[must_use]
/// Parses tab-indented outline text into a tree rooted at a header-less node.
///
/// Never fails: blank lines are skipped, and a line that dedents past every open section
/// attaches to the root. Spaces are not indentation and are trimmed from the content.
pub fn parse(text: &str) -> OutlineNode {
    let mut stack: Vec<(usize, OutlineNode)> = vec![(0, OutlineNode::root())];
    let mut sections = 0usize;
    let mut leaves = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let (level, content) = split_indent(line);
        if content.is_empty() {
            continue;
        }

        let open_before = stack.len();
        while stack.len() > 1 && stack.last().is_some_and(|(open, _)| *open >= level) {
            close_section(&mut stack);
        }
        if stack.len() == 1 && open_before > 1 {
            tracing::trace!(line = line_no + 1, "re-anchoring line to the root");
        }

        let Some((_, parent)) = stack.last_mut() else {
            continue;
        };

        if let Some(header) = content.strip_suffix(':') {
            let node = OutlineNode::section(header.trim(), parent.depth + 1);
            stack.push((level, node));
            sections += 1;
        } else {
            parent.leaves.push(content.to_string());
            leaves += 1;
        }
    }

    while stack.len() > 1 {
        close_section(&mut stack);
    }

    let root = stack.pop().map(|(_, root)| root).unwrap_or_default();
    tracing::debug!(sections, leaves, depth = root.max_depth(), "parsed outline");
    root
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
