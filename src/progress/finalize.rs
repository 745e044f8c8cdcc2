use tracing::info;

use crate::progress::progress_model::{Outcome, Verdict};

/// Test host that receives the final result of a scenario.
pub trait HostHarness {
    fn pass(&mut self);

    /// Scenario ran to completion but raised non-fatal diagnostics.
    fn deferred_fail(&mut self, message: &str);

    fn fail(&mut self, message: &str);
}

/// Report a terminal outcome to `harness` and return the verdict it was given.
pub fn finalize<S>(outcome: &Outcome<S>, harness: &mut dyn HostHarness) -> Verdict {
    let verdict = outcome.verdict();
    match &verdict {
        Verdict::Passed => harness.pass(),
        Verdict::DeferredFailure(message) => harness.deferred_fail(message),
        Verdict::Failed(message) => harness.fail(message),
    }
    info!(status = outcome.status(), "outcome finalized");
    verdict
}
