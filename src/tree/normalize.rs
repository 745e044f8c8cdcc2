use sha1::{Digest, Sha1};

use crate::tree::element_model::ElementTree;

const SUBTREE_HEADER: &str = "Element subtree:";
const SECTION_HEADERS: &[&str] = &["Attributes:", "Path to element:", "Query chain:"];

/// Pick the element lines out of a raw debug description, paired with
/// their 1-based line number in `text`.
///
/// With an `Element subtree:` header only the block under it is returned;
/// otherwise every non-blank line is. Blank lines are always dropped.
pub fn subtree_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    if !text.lines().any(|l| l.trim() == SUBTREE_HEADER) {
        return lines.filter(|(_, l)| !l.trim().is_empty()).collect();
    }

    lines.by_ref().find(|(_, l)| l.trim() == SUBTREE_HEADER);
    lines
        .take_while(|(_, l)| {
            let trimmed = l.trim();
            !trimmed.is_empty() && !SECTION_HEADERS.iter().any(|h| trimmed.starts_with(h))
        })
        .collect()
}

/// Structural fingerprint of a snapshot. Handles are left out since the
/// driver reassigns them between snapshots.
pub fn tree_fingerprint(tree: &ElementTree) -> String {
    let mut hasher = Sha1::new();
    for id in tree.ids() {
        let node = tree.node(id);
        let line = format!(
            "{}|{}|{}|{}|{}|{}|{}\n",
            node.depth,
            node.element_type,
            node.is_main_window,
            node.identifier.as_deref().unwrap_or(""),
            node.label.as_deref().unwrap_or(""),
            node.value.as_deref().unwrap_or(""),
            node.placeholder.as_deref().unwrap_or(""),
        );
        hasher.update(line.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
