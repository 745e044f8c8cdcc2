use ui_probe::{
    error::{DumpError, StructuralErrorKind},
    tree::{
        element_model::{ElementTree, Frame, NodeId},
        element_type::ElementType,
        parser::DebugTreeParser,
    },
};

use crate::common::utils::{by_handle, fixture, line};

mod common;

fn parse(lines: &[String]) -> ui_probe::ParsedSnapshot {
    DebugTreeParser::parse_lines(lines.iter().map(String::as_str)).expect("dump should parse")
}

fn assert_child_depths(tree: &ElementTree) {
    for id in tree.ids() {
        if let Some(parent) = tree.parent(id) {
            assert_eq!(
                tree.node(id).depth,
                tree.node(parent).depth + 1,
                "child depth must be parent depth + 1 ({})",
                tree.node(id).raw_line
            );
        }
    }
}

// =========================================================================
// Well-formed dumps
// =========================================================================

#[test]
fn well_formed_dump_keeps_every_line_in_order() {
    let depths = [0, 1, 2, 3, 3, 2, 1, 2, 3, 4, 4, 3, 1];
    let lines: Vec<String> = depths
        .iter()
        .enumerate()
        .map(|(i, d)| line(*d, "Other", i as u64 + 1, ""))
        .collect();

    let snapshot = parse(&lines);
    let tree = &snapshot.tree;

    assert!(snapshot.is_clean());
    assert_eq!(tree.len(), depths.len());
    assert_child_depths(tree);

    let handles: Vec<u64> = tree.preorder().iter().map(|id| tree.node(*id).handle).collect();
    let expected: Vec<u64> = (1..=depths.len() as u64).collect();
    assert_eq!(handles, expected, "traversal order must match input order");
}

#[test]
fn siblings_reanchor_after_deep_subtree() {
    let lines = vec![
        line(0, "Application", 1, ""),
        line(1, "Window", 2, "Main Window"),
        line(2, "Table", 3, ""),
        line(3, "Cell", 4, ""),
        line(4, "StaticText", 5, "label: 'Row'"),
        line(2, "Button", 6, "label: 'Done'"),
        line(1, "Window", 7, ""),
    ];
    let tree = parse(&lines).tree;

    assert_eq!(tree.parent(by_handle(&tree, 6)), Some(by_handle(&tree, 2)));
    assert_eq!(tree.parent(by_handle(&tree, 7)), Some(tree.root()));
    assert_eq!(tree.children(tree.root()).len(), 2);
    assert_child_depths(&tree);
}

#[test]
fn root_may_start_below_depth_zero() {
    let lines = vec![
        line(2, "Other", 1, ""),
        line(3, "Button", 2, ""),
        line(3, "Button", 3, ""),
    ];
    let snapshot = parse(&lines);
    assert!(snapshot.is_clean());
    assert_eq!(snapshot.tree.node(snapshot.tree.root()).depth, 2);
    assert_eq!(snapshot.tree.children(snapshot.tree.root()).len(), 2);
}

// =========================================================================
// Fixture dump
// =========================================================================

#[test]
fn fixture_dump_reconstructs_hierarchy() {
    let snapshot = DebugTreeParser::parse_text(&fixture("login_screen.txt")).unwrap();
    let tree = &snapshot.tree;

    assert!(snapshot.is_clean());
    assert_eq!(tree.len(), 12);

    let root = tree.node(tree.root());
    assert_eq!(root.element_type, ElementType::Application);
    assert_eq!(root.label.as_deref(), Some("Notes"));
    assert_eq!(
        root.frame,
        Some(Frame { x: 0.0, y: 0.0, width: 375.0, height: 667.0 })
    );

    let main = tree.node(by_handle(tree, 0x600000d04100));
    assert!(main.is_main_window);
    assert!(!tree.node(by_handle(tree, 0x600000d04a00)).is_main_window);

    let nav = tree.node(by_handle(tree, 0x600000d04300));
    assert_eq!(nav.element_type, ElementType::NavigationBar);
    assert_eq!(nav.index(), Some("Login"));
    assert_eq!(nav.traits, Some(35192962023424));
    assert_eq!(nav.children.len(), 2);

    let password = tree.node(by_handle(tree, 0x600000d04800));
    assert_eq!(password.identifier.as_deref(), Some("password"));
    assert_eq!(password.value.as_deref(), Some("****"));

    let email = tree.node(by_handle(tree, 0x600000d04600));
    assert_eq!(email.placeholder.as_deref(), Some("Email"));
    assert_eq!(email.index(), None);

    assert_child_depths(tree);
}

#[test]
fn identifier_wins_over_label_as_index() {
    let snapshot = DebugTreeParser::parse_text(&fixture("login_screen.txt")).unwrap();
    let submit = snapshot.tree.node(by_handle(&snapshot.tree, 0x600000d04900));
    assert_eq!(submit.label.as_deref(), Some("Sign In"));
    assert_eq!(submit.index(), Some("submit"));
}

#[test]
fn unknown_type_keeps_raw_line() {
    let lines = vec![line(0, "Application", 1, ""), line(1, "Hologram", 2, "label: 'x'")];
    let tree = parse(&lines).tree;
    let node = tree.node(NodeId(1));
    assert_eq!(node.element_type, ElementType::Other);
    assert!(node.raw_line.contains("Hologram"));
}

#[test]
fn fingerprint_ignores_handles_but_not_labels() {
    let a = parse(&[line(0, "Application", 1, ""), line(1, "Button", 2, "label: 'Go'")]);
    let b = parse(&[line(0, "Application", 9, ""), line(1, "Button", 8, "label: 'Go'")]);
    let c = parse(&[line(0, "Application", 1, ""), line(1, "Button", 2, "label: 'Stop'")]);

    assert_eq!(a.fingerprint, b.fingerprint);
    assert_ne!(a.fingerprint, c.fingerprint);
}

// =========================================================================
// Structural errors
// =========================================================================

#[test]
fn depth_jump_does_not_disturb_later_sibling() {
    let lines = vec![
        line(0, "Application", 1, ""),
        line(1, "Other", 2, ""),
        line(2, "Group", 3, ""),
        line(4, "Button", 4, ""),
        line(2, "Group", 5, ""),
    ];
    let snapshot = parse(&lines);
    let tree = &snapshot.tree;

    assert_eq!(snapshot.structural_errors.len(), 1);
    let error = &snapshot.structural_errors[0];
    assert_eq!(error.line_number, 4);
    assert_eq!(
        error.kind,
        StructuralErrorKind::DepthJump { parent_depth: 2, depth: 4 }
    );

    let parent = by_handle(tree, 2);
    assert_eq!(tree.parent(by_handle(tree, 5)), Some(parent));
    assert_eq!(tree.children(parent), &[by_handle(tree, 3), by_handle(tree, 5)]);
    assert!(tree.find_by_handle(4).is_none());
    assert_child_depths(tree);
}

#[test]
fn descendants_of_rejected_line_are_reported() {
    let lines = vec![
        line(0, "Application", 1, ""),
        line(1, "Window", 2, ""),
        line(3, "Table", 3, ""),
        line(4, "Cell", 4, ""),
        line(5, "StaticText", 5, ""),
        line(2, "Button", 6, ""),
    ];
    let snapshot = parse(&lines);

    let kinds: Vec<_> = snapshot.structural_errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            StructuralErrorKind::DepthJump { parent_depth: 1, depth: 3 },
            StructuralErrorKind::OrphanedDescendant { ancestor_line: 3 },
            StructuralErrorKind::OrphanedDescendant { ancestor_line: 3 },
        ]
    );
    assert_eq!(snapshot.tree.len(), 3);
    assert_eq!(
        snapshot.tree.parent(by_handle(&snapshot.tree, 6)),
        Some(by_handle(&snapshot.tree, 2))
    );
}

#[test]
fn second_root_is_rejected_with_its_subtree() {
    let lines = vec![
        line(0, "Application", 1, ""),
        line(1, "Window", 2, ""),
        line(0, "Application", 3, ""),
        line(1, "Window", 4, ""),
    ];
    let snapshot = parse(&lines);

    assert_eq!(snapshot.tree.len(), 2);
    assert_eq!(
        snapshot.structural_errors[0].kind,
        StructuralErrorKind::DetachedRoot { root_depth: 0, depth: 0 }
    );
    assert_eq!(
        snapshot.structural_errors[1].kind,
        StructuralErrorKind::OrphanedDescendant { ancestor_line: 3 }
    );

    match snapshot.into_strict() {
        Err(DumpError::Structural { errors }) => assert_eq!(errors.len(), 2),
        other => panic!("expected structural failure, got {:?}", other),
    }
}

#[test]
fn strict_mode_accepts_clean_dump() {
    let snapshot = parse(&[line(0, "Application", 1, "")]);
    let tree = snapshot.into_strict().unwrap();
    assert_eq!(tree.len(), 1);
}

// =========================================================================
// Malformed dumps
// =========================================================================

#[test]
fn every_malformed_line_is_reported() {
    let err = DebugTreeParser::parse_text(&fixture("malformed.txt")).unwrap_err();
    match err {
        DumpError::Malformed { lines } => {
            let numbers: Vec<usize> = lines.iter().map(|l| l.line_number).collect();
            assert_eq!(numbers, vec![3, 5, 6]);
            assert!(lines[0].line.contains("without a handle"));
            assert!(lines[1].reason.contains("indent"));
        }
        other => panic!("expected malformed error, got {:?}", other),
    }
}

#[test]
fn malformed_error_message_lists_lines() {
    let err = DebugTreeParser::parse_lines(["  Application 0x1: ", "garbage", "more garbage"])
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("2 malformed line(s)"), "{}", message);
    assert!(message.contains("line 2"));
    assert!(message.contains("line 3"));
}

#[test]
fn line_numbers_refer_to_source_text() {
    let err = DebugTreeParser::parse_text("\n\n  Application 0x1: \n\n    garbage\n").unwrap_err();
    match err {
        DumpError::Malformed { lines } => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].line_number, 5);
        }
        other => panic!("expected malformed error, got {:?}", other),
    }
}

#[test]
fn structural_line_numbers_skip_dump_header() {
    let text = [
        "Attributes: Application 0x1",
        "Element subtree:",
        "  Application 0x1: ",
        "    Window 0x2: ",
        "        Button 0x3: ",
    ]
    .join("\n");
    let snapshot = DebugTreeParser::parse_text(&text).unwrap();
    assert_eq!(snapshot.structural_errors.len(), 1);
    assert_eq!(snapshot.structural_errors[0].line_number, 5);
}

#[test]
fn empty_dump_is_rejected() {
    assert_eq!(DebugTreeParser::parse_text("").unwrap_err(), DumpError::Empty);
    assert_eq!(DebugTreeParser::parse_text("\n   \n").unwrap_err(), DumpError::Empty);
}
