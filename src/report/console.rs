use crate::progress::progress_model::Verdict;
use crate::report::report_model::SuiteReport;

// ============================================================================
// Console reporter
// ============================================================================

/// Format a suite report for terminal output.
///
/// ```text
/// === Suite: Smoke ===
///
/// ✓ PASS   Login (4 actions)
/// ! FLAG   Search (3 actions)
///     Search field warning: keyboard did not dismiss
/// ✗ FAIL   Checkout (5 actions)
///     Pay failed screen check: Payment is not active
///
/// === Results: 1 passed, 1 flagged, 1 failed (3 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Suite: {} ===\n\n", report.suite_name));

    for result in &report.results {
        let marker = match result.verdict {
            Verdict::Passed => "\u{2713} PASS",
            Verdict::DeferredFailure(_) => "! FLAG",
            Verdict::Failed(_) => "\u{2717} FAIL",
        };

        out.push_str(&format!(
            "{}   {} ({} actions)\n",
            marker, result.scenario_name, result.actions
        ));

        for message in &result.messages {
            out.push_str(&format!("    {}\n", message));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} flagged, {} failed ({} total)",
        report.passed, report.deferred, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}
