use ui_probe::tree::element_model::{ElementTree, NodeId};

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

pub fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    base.join("tests").join("fixtures").join(name).display().to_string()
}

/// Element line at `depth` (two spaces per level, plus the base level).
pub fn line(depth: usize, kind: &str, handle: u64, extras: &str) -> String {
    format!("{}{} 0x{:x}: {}", "  ".repeat(depth + 1), kind, handle, extras)
}

pub fn by_handle(tree: &ElementTree, handle: u64) -> NodeId {
    tree.find_by_handle(handle)
        .unwrap_or_else(|| panic!("no node with handle 0x{:x}", handle))
}
