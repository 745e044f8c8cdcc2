use serde::{Deserialize, Serialize};

use crate::tree::element_type::ElementType;

/// Position of a node inside its `ElementTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One UI element reconstructed from a dump line.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub element_type: ElementType,

    /// Opaque handle printed by the driver; not stable across snapshots
    pub handle: u64,

    pub frame: Option<Frame>,
    pub is_main_window: bool,
    pub traits: Option<u64>,

    pub label: Option<String>,
    pub identifier: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,

    /// Indentation level the line was parsed at
    pub depth: usize,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    /// Source line, kept for diagnostics
    pub raw_line: String,
}

impl ElementNode {
    /// Disambiguation key: identifier if present, else label.
    pub fn index(&self) -> Option<&str> {
        self.identifier.as_deref().or(self.label.as_deref())
    }

    /// Type name as printed in the dump. Differs from `element_type` for
    /// names that resolved to `Other`.
    pub fn type_name(&self) -> &str {
        self.raw_line
            .split_whitespace()
            .next()
            .unwrap_or_else(|| self.element_type.name())
    }

    /// The dump named a type with no `ElementType` counterpart.
    pub fn is_unrecognized_type(&self) -> bool {
        self.element_type == ElementType::Other && self.type_name() != ElementType::Other.name()
    }
}

/// Immutable element hierarchy. Nodes are stored in input order, so
/// `NodeId(0)` is always the root and iteration order matches the dump.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
}

impl ElementTree {
    pub(crate) fn from_nodes(nodes: Vec<ElementNode>) -> Self {
        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &ElementNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ancestor chain from the root down to and including `id`.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    pub fn find_by_handle(&self, handle: u64) -> Option<NodeId> {
        self.ids().find(|id| self.node(*id).handle == handle)
    }

    /// Depth-first pre-order traversal. Equal to input order for a tree
    /// built by the parser.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Nested, serializable view of the hierarchy rooted at `id`.
    pub fn view(&self, id: NodeId) -> NodeView {
        let node = self.node(id);
        NodeView {
            element_type: node.element_type,
            unrecognized_type: node
                .is_unrecognized_type()
                .then(|| node.type_name().to_string()),
            handle: format!("0x{:x}", node.handle),
            frame: node.frame,
            is_main_window: node.is_main_window,
            label: node.label.clone(),
            identifier: node.identifier.clone(),
            value: node.value.clone(),
            placeholder: node.placeholder.clone(),
            children: node.children.iter().map(|c| self.view(*c)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub element_type: ElementType,
    /// Dump type name when it resolved to `Other`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrecognized_type: Option<String>,
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_main_window: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}
