use serde::{Deserialize, Serialize};

use crate::progress::progress_model::{Outcome, Verdict};

// ============================================================================
// Scenario results
// ============================================================================

/// Final result of one evaluated scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,

    /// Number of actions the scenario declares
    pub actions: usize,

    pub verdict: Verdict,

    /// Diagnostics in the order they were raised
    pub messages: Vec<String>,
}

impl ScenarioResult {
    pub fn from_outcome<S>(name: &str, actions: usize, outcome: &Outcome<S>) -> Self {
        Self {
            scenario_name: name.to_string(),
            actions,
            verdict: outcome.verdict(),
            messages: outcome.messages().to_vec(),
        }
    }
}

// ============================================================================
// Suite report
// ============================================================================

/// Aggregated report for a suite of scenarios.
///
/// Consumed by the console and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub total: usize,
    pub passed: usize,

    /// Scenarios that finished with flags
    pub deferred: usize,

    pub failed: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn from_results(suite_name: &str, results: Vec<ScenarioResult>) -> Self {
        let count = |f: fn(&Verdict) -> bool| results.iter().filter(|r| f(&r.verdict)).count();
        let passed = count(|v| matches!(v, Verdict::Passed));
        let deferred = count(|v| matches!(v, Verdict::DeferredFailure(_)));
        let failed = count(|v| matches!(v, Verdict::Failed(_)));
        Self {
            suite_name: suite_name.to_string(),
            total: results.len(),
            passed,
            deferred,
            failed,
            duration_ms: None,
            results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Deferred failures count against the suite.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}
