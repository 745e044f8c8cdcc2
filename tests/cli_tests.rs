use clap::Parser;
use ui_probe::cli::commands::{format_locators, format_tree, load_snapshot};
use ui_probe::cli::config::{AppConfig, Cli, Commands, OutputFormat, load_config, log_level};
use ui_probe::error::CliError;
use ui_probe::locator::path::PathGenerator;
use ui_probe::tree::parser::DebugTreeParser;

use crate::common::utils::fixture_path;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_tree_minimal() {
    let cli = Cli::parse_from(["ui-probe", "tree", "--dump", "dump.txt"]);
    match cli.command {
        Commands::Tree {
            dump,
            format,
            strict,
        } => {
            assert_eq!(dump, "dump.txt");
            assert_eq!(format, None);
            assert!(!strict);
        }
        _ => panic!("Expected Tree command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_tree_all_args() {
    let cli = Cli::parse_from([
        "ui-probe", "-vv", "tree", "--dump", "d.txt", "--format", "json", "--strict",
    ]);
    match cli.command {
        Commands::Tree {
            format, strict, ..
        } => {
            assert_eq!(format, Some(OutputFormat::Json));
            assert!(strict);
        }
        _ => panic!("Expected Tree command"),
    }
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_parse_paths() {
    let cli = Cli::parse_from([
        "ui-probe",
        "paths",
        "--dump",
        "d.txt",
        "--app",
        "XCUIApplication()",
        "--config",
        "custom.yaml",
    ]);
    match cli.command {
        Commands::Paths { dump, app, format } => {
            assert_eq!(dump, "d.txt");
            assert_eq!(app.as_deref(), Some("XCUIApplication()"));
            assert_eq!(format, None);
        }
        _ => panic!("Expected Paths command"),
    }
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
}

#[test]
fn cli_requires_dump() {
    assert!(Cli::try_parse_from(["ui-probe", "paths"]).is_err());
}

#[test]
fn cli_rejects_unknown_format() {
    let result = Cli::try_parse_from(["ui-probe", "tree", "--dump", "d.txt", "--format", "jsn"]);
    assert!(result.is_err());
}

#[test]
fn log_level_follows_verbosity() {
    assert_eq!(log_level(0), "warn");
    assert_eq!(log_level(1), "info");
    assert_eq!(log_level(2), "debug");
    assert_eq!(log_level(7), "trace");
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_missing_file_uses_defaults() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.app_name, "app");
    assert_eq!(config.format, OutputFormat::Console);
    assert!(!config.strict);
}

#[test]
fn config_partial_yaml_fills_defaults() {
    let dir = std::env::temp_dir().join("ui_probe_cli_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ui-probe.yaml");
    std::fs::write(&path, "app_name: XCUIApplication()\nstrict: true\n").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.app_name, "XCUIApplication()");
    assert!(config.strict);
    assert_eq!(config.format, OutputFormat::Console);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_reads_output_format() {
    let dir = std::env::temp_dir().join("ui_probe_cli_format_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ui-probe.yaml");
    std::fs::write(&path, "format: json\n").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.app_name, "app");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_malformed_yaml_uses_defaults() {
    let dir = std::env::temp_dir().join("ui_probe_cli_bad_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ui-probe.yaml");
    std::fs::write(&path, "strict: [not, a, bool").unwrap();

    assert_eq!(load_config(path.to_str()), AppConfig::default());

    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================================
// Command Helpers
// ============================================================================

#[test]
fn load_snapshot_reports_missing_file() {
    match load_snapshot("no/such/dump.txt") {
        Err(CliError::Io { path, .. }) => assert_eq!(path, "no/such/dump.txt"),
        other => panic!("expected Io error, got {:?}", other.map(|s| s.tree.len())),
    }
}

#[test]
fn load_snapshot_surfaces_malformed_dump() {
    let err = load_snapshot(&fixture_path("malformed.txt")).unwrap_err();
    assert!(matches!(err, CliError::Dump(_)));
}

#[test]
fn format_tree_indents_from_root() {
    let snapshot = load_snapshot(&fixture_path("login_screen.txt")).unwrap();
    let out = format_tree(&snapshot.tree);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "Application 0x600000d04000 label='Notes'");
    assert_eq!(lines[1], "  Window 0x600000d04100 (main)");
    assert_eq!(
        lines[9],
        "      Button 0x600000d04900 identifier='submit' label='Sign In'"
    );
}

#[test]
fn format_tree_shows_unrecognized_type_name() {
    let snapshot = DebugTreeParser::parse_lines([
        "  Application 0x1: ",
        "    Hologram 0x2: label: 'x'",
        "    Other 0x3: ",
    ])
    .unwrap();
    let out = format_tree(&snapshot.tree);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[1], "  Hologram 0x2 (as Other) label='x'");
    assert_eq!(lines[2], "  Other 0x3");

    let json = serde_json::to_value(snapshot.tree.view(snapshot.tree.root())).unwrap();
    assert_eq!(json["children"][0]["unrecognized_type"], "Hologram");
    assert!(json["children"][1].get("unrecognized_type").is_none());
}

#[test]
fn format_locators_marks_duplicates() {
    let snapshot = load_snapshot(&fixture_path("login_screen.txt")).unwrap();
    let entries = PathGenerator::new(&snapshot.tree, "app").generate_all();
    let out = format_locators(&entries);

    let first = out.lines().next().unwrap();
    assert!(first.starts_with("0x600000d04000"));
    assert!(first.ends_with("app  (duplicate)"));
    assert!(out.contains("app.secureTextFields[\"password\"]\n"));
}
