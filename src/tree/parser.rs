use tracing::{debug, warn};

use crate::error::{DumpError, MalformedLine, StructuralError, StructuralErrorKind};
use crate::tree::element_model::{ElementNode, ElementTree, NodeId};
use crate::tree::line::{ParsedLine, parse_line};
use crate::tree::normalize::{subtree_lines, tree_fingerprint};

/// Result of reconstructing a dump.
///
/// Lines that parsed but could not be placed are reported in
/// `structural_errors`; the rest of the hierarchy is still built.
#[derive(Debug, Clone)]
pub struct ParsedSnapshot {
    pub tree: ElementTree,
    pub structural_errors: Vec<StructuralError>,
    pub fingerprint: String,
}

impl ParsedSnapshot {
    pub fn is_clean(&self) -> bool {
        self.structural_errors.is_empty()
    }

    /// Reject the snapshot if any line had to be left out of the tree.
    pub fn into_strict(self) -> Result<ElementTree, DumpError> {
        if self.structural_errors.is_empty() {
            Ok(self.tree)
        } else {
            Err(DumpError::Structural {
                errors: self.structural_errors,
            })
        }
    }
}

/// Builds an `ElementTree` from debug-dump lines.
pub struct DebugTreeParser;

impl DebugTreeParser {
    /// Parse a raw debug description, picking out the element subtree block.
    /// Reported line numbers refer to lines of `text`.
    pub fn parse_text(text: &str) -> Result<ParsedSnapshot, DumpError> {
        Self::parse_numbered(subtree_lines(text))
    }

    /// Parse element lines in order, numbering them from 1.
    ///
    /// Every line must follow the element grammar; otherwise all offending
    /// lines are returned and no tree is built.
    pub fn parse_lines<'a, I>(lines: I) -> Result<ParsedSnapshot, DumpError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::parse_numbered(lines.into_iter().enumerate().map(|(i, l)| (i + 1, l)))
    }

    /// Parse element lines that already carry their source line numbers.
    pub fn parse_numbered<'a, I>(lines: I) -> Result<ParsedSnapshot, DumpError>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut parsed = Vec::new();
        let mut malformed = Vec::new();

        for (line_number, line) in lines {
            match parse_line(line) {
                Ok(p) => parsed.push((line_number, line, p)),
                Err(reason) => malformed.push(MalformedLine {
                    line_number,
                    line: line.to_string(),
                    reason,
                }),
            }
        }

        if !malformed.is_empty() {
            warn!(count = malformed.len(), "dump rejected: malformed lines");
            return Err(DumpError::Malformed { lines: malformed });
        }
        if parsed.is_empty() {
            return Err(DumpError::Empty);
        }

        let (tree, structural_errors) = build_tree(parsed);
        let fingerprint = tree_fingerprint(&tree);

        debug!(
            nodes = tree.len(),
            structural_errors = structural_errors.len(),
            %fingerprint,
            "dump reconstructed"
        );

        Ok(ParsedSnapshot {
            tree,
            structural_errors,
            fingerprint,
        })
    }
}

/// Attach each line under the nearest open ancestor one level up.
///
/// `stack` holds the open ancestor chain with consecutive depths, root first.
fn build_tree(lines: Vec<(usize, &str, ParsedLine)>) -> (ElementTree, Vec<StructuralError>) {
    let mut nodes: Vec<ElementNode> = Vec::with_capacity(lines.len());
    let mut stack: Vec<(NodeId, usize)> = Vec::new();
    let mut errors = Vec::new();

    // (depth, line number) of the last rejected line; deeper lines are its subtree
    let mut rejected: Option<(usize, usize)> = None;

    for (line_number, raw, parsed) in lines {
        let depth = parsed.depth;

        if let Some((rejected_depth, rejected_line)) = rejected {
            if depth > rejected_depth {
                errors.push(structural(
                    line_number,
                    raw,
                    StructuralErrorKind::OrphanedDescendant {
                        ancestor_line: rejected_line,
                    },
                ));
                continue;
            }
            rejected = None;
        }

        if nodes.is_empty() {
            nodes.push(to_node(parsed, raw, None));
            stack.push((NodeId(0), depth));
            continue;
        }

        let root_depth = nodes[0].depth;
        if depth <= root_depth {
            errors.push(structural(
                line_number,
                raw,
                StructuralErrorKind::DetachedRoot { root_depth, depth },
            ));
            rejected = Some((depth, line_number));
            continue;
        }

        // The root is never popped: its depth is below every line that gets here.
        let top_depth = stack.last().map_or(root_depth, |(_, d)| *d);
        if depth > top_depth + 1 {
            errors.push(structural(
                line_number,
                raw,
                StructuralErrorKind::DepthJump {
                    parent_depth: top_depth,
                    depth,
                },
            ));
            rejected = Some((depth, line_number));
            continue;
        }

        while stack.last().is_some_and(|(_, d)| *d + 1 != depth) {
            stack.pop();
        }
        let Some(&(parent, _)) = stack.last() else {
            // only reachable if the stack lost its root
            errors.push(structural(
                line_number,
                raw,
                StructuralErrorKind::DetachedRoot { root_depth, depth },
            ));
            continue;
        };

        let id = NodeId(nodes.len());
        nodes.push(to_node(parsed, raw, Some(parent)));
        nodes[parent.0].children.push(id);
        stack.push((id, depth));
    }

    for e in &errors {
        warn!(line = e.line_number, "structural error: {}", e.kind);
    }

    (ElementTree::from_nodes(nodes), errors)
}

fn structural(line_number: usize, raw: &str, kind: StructuralErrorKind) -> StructuralError {
    StructuralError {
        line_number,
        line: raw.to_string(),
        kind,
    }
}

fn to_node(parsed: ParsedLine, raw: &str, parent: Option<NodeId>) -> ElementNode {
    ElementNode {
        element_type: parsed.element_type,
        handle: parsed.handle,
        frame: parsed.frame,
        is_main_window: parsed.is_main_window,
        traits: parsed.traits,
        label: parsed.label,
        identifier: parsed.identifier,
        value: parsed.value,
        placeholder: parsed.placeholder,
        depth: parsed.depth,
        parent,
        children: Vec::new(),
        raw_line: raw.to_string(),
    }
}
