use tracing::{debug, info, warn};

use crate::error::ProgressError;
use crate::progress::action::Action;
use crate::progress::progress_model::{Outcome, TaskFailure};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Folds actions over an `Outcome`, one at a time, in caller order.
#[derive(Debug)]
pub struct ProgressEvaluator {
    trace: TraceLogger,
    step: u64,
}

impl ProgressEvaluator {
    pub fn new() -> Self {
        Self::with_trace(TraceLogger::disabled())
    }

    pub fn with_trace(trace: TraceLogger) -> Self {
        Self { trace, step: 0 }
    }

    /// Number of actions handed to this evaluator so far, skipped ones included.
    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Apply `action`, checking its screen first.
    pub fn apply<S>(&mut self, outcome: Outcome<S>, action: &Action<S>) -> Outcome<S> {
        self.apply_with(outcome, action, true)
    }

    /// Apply `action` without the screen check.
    pub fn apply_unchecked<S>(&mut self, outcome: Outcome<S>, action: &Action<S>) -> Outcome<S> {
        self.apply_with(outcome, action, false)
    }

    /// Fold every action of `scenario` starting from `Passing(initial)`.
    pub fn run<S>(&mut self, scenario: &Scenario<S>, initial: S) -> Outcome<S> {
        info!(scenario = scenario.name(), actions = scenario.len(), "running scenario");
        let outcome = scenario
            .actions()
            .iter()
            .fold(Outcome::Passing(initial), |o, a| self.apply(o, a));
        info!(scenario = scenario.name(), status = outcome.status(), "scenario finished");
        outcome
    }

    fn apply_with<S>(
        &mut self,
        outcome: Outcome<S>,
        action: &Action<S>,
        check_screen: bool,
    ) -> Outcome<S> {
        self.step += 1;
        let step = self.step;
        let label = action.label();

        if outcome.is_failing() {
            debug!(step, action = label, "skipped: scenario already failing");
            self.trace.log(
                &TraceEvent::now(step, label)
                    .with_outcome(outcome.status())
                    .skipped(),
            );
            return outcome;
        }

        let (state, mut messages) = outcome.into_parts();
        let before = messages.len();
        let screen_checked = check_screen && action.screen().is_some();

        if let Some(screen) = action.screen().filter(|_| check_screen) {
            if let Err(e) = screen.become_active() {
                warn!(step, action = label, screen = screen.name(), "screen check failed");
                messages.push(format!("{} failed screen check: {}", label, e.message()));
                let next = Outcome::Failing(state, messages);
                self.record(step, label, screen_checked, before, &next);
                return next;
            }
        }

        let next = match action.run(&state) {
            Ok(new_state) if messages.is_empty() => Outcome::Passing(new_state),
            Ok(new_state) => Outcome::Flagging(new_state, messages),
            Err(failure) => fold_failure(label, state, messages, failure),
        };
        self.record(step, label, screen_checked, before, &next);
        next
    }

    fn record<S>(
        &self,
        step: u64,
        label: &str,
        screen_checked: bool,
        messages_before: usize,
        next: &Outcome<S>,
    ) {
        let appended = next.messages().get(messages_before).map(String::as_str);
        if let Some(message) = appended {
            debug!(step, action = label, status = next.status(), "{}", message);
        }
        self.trace.log(
            &TraceEvent::now(step, label)
                .with_screen_check(screen_checked)
                .with_outcome(next.status())
                .with_message(appended),
        );
    }
}

impl Default for ProgressEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn fold_failure<S>(
    label: &str,
    state: S,
    mut messages: Vec<String>,
    failure: TaskFailure<S>,
) -> Outcome<S> {
    let TaskFailure {
        error,
        state: reached,
    } = failure;

    if error.is_recoverable() {
        messages.push(format!("{} {}", label, error));
        Outcome::Flagging(reached.unwrap_or(state), messages)
    } else if error.is_precondition() {
        messages.push(format!("{} {}", label, error));
        Outcome::Failing(state, messages)
    } else {
        messages.push(error.message().to_string());
        Outcome::Failing(state, messages)
    }
}

/// Named, non-empty sequence of actions.
#[derive(Debug)]
pub struct Scenario<S> {
    name: String,
    actions: Vec<Action<S>>,
}

impl<S> Scenario<S> {
    pub fn new(name: impl Into<String>, actions: Vec<Action<S>>) -> Result<Self, ProgressError> {
        let name = name.into();
        if actions.is_empty() {
            return Err(ProgressError::Developer(format!(
                "scenario '{}' has no actions",
                name
            )));
        }
        Ok(Self { name, actions })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action<S>] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
