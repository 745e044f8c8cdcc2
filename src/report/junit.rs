use crate::progress::progress_model::Verdict;
use crate::report::report_model::SuiteReport;

// ============================================================================
// JUnit XML reporter
// ============================================================================

/// Generate JUnit XML for CI systems.
///
/// Flagged scenarios are reported as failures of type `DeferredFailure`
/// so CI can tell them apart from scenarios that stopped early:
/// ```xml
/// <testsuite name="Smoke" tests="2" failures="1" time="1.234">
///   <testcase name="Login" classname="ui-probe" />
///   <testcase name="Search" classname="ui-probe">
///     <failure message="1 diagnostic(s)" type="DeferredFailure">...</failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &SuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.results {
        let name = escape_xml(&result.scenario_name);
        let failure_type = match &result.verdict {
            Verdict::Passed => {
                cases.push_str(&format!(
                    "  <testcase name=\"{}\" classname=\"ui-probe\" />\n",
                    name
                ));
                continue;
            }
            Verdict::DeferredFailure(_) => "DeferredFailure",
            Verdict::Failed(_) => "Failure",
        };

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"ui-probe\">\n    <failure message=\"{count} diagnostic(s)\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = name,
            count = result.messages.len(),
            kind = failure_type,
            body = escape_xml(result.verdict.message().unwrap_or_default()),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.deferred + report.failed,
        time = time_attr,
        cases = cases,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
