use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tree::element_model::{ElementTree, NodeId};
use crate::tree::element_type::ElementType;

/// Ordinal placeholder when a node is missing from its own sibling list.
pub const INVALID_INDEX_SENTINEL: &str = "<invalid-index>";

/// Ordinal placeholder when no same-type siblings could be computed.
pub const AMBIGUOUS_SENTINEL: &str = "<ambiguous>";

/// One representable element and the expression that relocates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorEntry {
    pub handle: u64,
    pub element_type: ElementType,
    pub path: String,

    /// Another element produced the same path
    pub duplicate: bool,
}

/// Turns tree nodes into locator expressions such as
/// `app.tables.cells["row-3"].buttons.element(boundBy: 1)`.
pub struct PathGenerator<'a> {
    tree: &'a ElementTree,
    app_name: String,
}

impl<'a> PathGenerator<'a> {
    pub fn new(tree: &'a ElementTree, app_name: impl Into<String>) -> Self {
        Self {
            tree,
            app_name: app_name.into(),
        }
    }

    /// Locator for `target`, or `None` when it can't be expressed.
    ///
    /// The root and the main window collapse into the application name.
    /// Untyped `Other` nodes without a key are skipped on the way down; a
    /// target that is itself such a node has no path.
    pub fn path_for(&self, target: NodeId) -> Option<String> {
        let chain = self.tree.ancestry(target);
        let mut path = self.app_name.clone();

        for id in chain.into_iter().skip(1) {
            let node = self.tree.node(id);
            if node.is_main_window {
                continue;
            }
            if is_transparent(self.tree, id) {
                if id == target {
                    debug!(handle = node.handle, "no locator for untyped element");
                    return None;
                }
                continue;
            }

            path.push('.');
            path.push_str(&node.element_type.plural());
            path.push_str(&self.index_segment(id));
        }

        Some(path)
    }

    /// Locators for every representable node, in input order.
    pub fn generate_all(&self) -> Vec<LocatorEntry> {
        let mut entries: Vec<LocatorEntry> = self
            .tree
            .ids()
            .filter_map(|id| {
                let node = self.tree.node(id);
                self.path_for(id).map(|path| LocatorEntry {
                    handle: node.handle,
                    element_type: node.element_type,
                    path,
                    duplicate: false,
                })
            })
            .collect();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for e in &entries {
            *counts.entry(e.path.clone()).or_default() += 1;
        }
        for e in &mut entries {
            e.duplicate = counts.get(&e.path).is_some_and(|c| *c > 1);
        }

        entries
    }

    fn index_segment(&self, id: NodeId) -> String {
        let node = self.tree.node(id);
        if let Some(key) = node.index() {
            return format!("[\"{}\"]", escape_key(key));
        }

        let siblings = same_type_siblings(self.tree, id);
        match siblings.len() {
            0 => ordinal(AMBIGUOUS_SENTINEL),
            1 if siblings[0] == id => String::new(),
            _ => match siblings.iter().position(|s| *s == id) {
                Some(i) => ordinal(&i.to_string()),
                None => ordinal(INVALID_INDEX_SENTINEL),
            },
        }
    }
}

fn ordinal(index: &str) -> String {
    format!(".element(boundBy: {})", index)
}

fn escape_key(key: &str) -> String {
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

fn is_transparent(tree: &ElementTree, id: NodeId) -> bool {
    let node = tree.node(id);
    node.element_type == ElementType::Other && node.index().is_none()
}

/// Children of `id`'s parent sharing its type, in input order.
fn same_type_siblings(tree: &ElementTree, id: NodeId) -> Vec<NodeId> {
    let element_type = tree.node(id).element_type;
    match tree.parent(id) {
        Some(parent) => tree
            .children(parent)
            .iter()
            .copied()
            .filter(|c| tree.node(*c).element_type == element_type)
            .collect(),
        None => vec![id],
    }
}
