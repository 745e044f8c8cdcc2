use tracing::{info, warn};

use crate::cli::config::OutputFormat;
use crate::error::CliError;
use crate::locator::path::{LocatorEntry, PathGenerator};
use crate::tree::element_model::{ElementTree, NodeId};
use crate::tree::parser::{DebugTreeParser, ParsedSnapshot};

// ============================================================================
// tree subcommand
// ============================================================================

/// Print the reconstructed hierarchy. Structural problems are listed on
/// stderr, or fail the command when `strict` is set.
pub fn cmd_tree(dump_path: &str, format: OutputFormat, strict: bool) -> Result<(), CliError> {
    let snapshot = load_snapshot(dump_path)?;
    for e in &snapshot.structural_errors {
        eprintln!("structural error: {}", e);
    }
    let unrecognized = snapshot
        .tree
        .ids()
        .filter(|id| snapshot.tree.node(*id).is_unrecognized_type())
        .count();
    if unrecognized > 0 {
        warn!(count = unrecognized, "element types read as Other");
    }

    let fingerprint = snapshot.fingerprint.clone();
    let tree = if strict {
        snapshot.into_strict()?
    } else {
        snapshot.tree
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree.view(tree.root()))?)
        }
        OutputFormat::Console => {
            print!("{}", format_tree(&tree));
            println!("fingerprint: {}", fingerprint);
        }
    }
    Ok(())
}

// ============================================================================
// paths subcommand
// ============================================================================

pub fn cmd_paths(dump_path: &str, app_name: &str, format: OutputFormat) -> Result<(), CliError> {
    let snapshot = load_snapshot(dump_path)?;
    let entries = PathGenerator::new(&snapshot.tree, app_name).generate_all();
    info!(
        elements = snapshot.tree.len(),
        locators = entries.len(),
        "locator paths generated"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Console => print!("{}", format_locators(&entries)),
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

pub fn load_snapshot(dump_path: &str) -> Result<ParsedSnapshot, CliError> {
    let text = std::fs::read_to_string(dump_path).map_err(|source| CliError::Io {
        path: dump_path.to_string(),
        source,
    })?;
    Ok(DebugTreeParser::parse_text(&text)?)
}

/// One line per element, indented two spaces per level below the root.
pub fn format_tree(tree: &ElementTree) -> String {
    let mut out = String::new();
    let root_depth = tree.node(tree.root()).depth;
    for id in tree.preorder() {
        out.push_str(&format_node(tree, id, root_depth));
        out.push('\n');
    }
    out
}

fn format_node(tree: &ElementTree, id: NodeId, root_depth: usize) -> String {
    let node = tree.node(id);
    let mut line = format!(
        "{}{} 0x{:x}",
        "  ".repeat(node.depth - root_depth),
        node.type_name(),
        node.handle
    );
    if node.is_unrecognized_type() {
        line.push_str(" (as Other)");
    }
    if node.is_main_window {
        line.push_str(" (main)");
    }
    let keys = [
        ("identifier", &node.identifier),
        ("label", &node.label),
        ("value", &node.value),
        ("placeholder", &node.placeholder),
    ];
    for (key, value) in keys {
        if let Some(v) = value {
            line.push_str(&format!(" {}='{}'", key, v));
        }
    }
    line
}

pub fn format_locators(entries: &[LocatorEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "0x{:<14x} {:<18} {}{}\n",
            e.handle,
            e.element_type.name(),
            e.path,
            if e.duplicate { "  (duplicate)" } else { "" }
        ));
    }
    out
}
