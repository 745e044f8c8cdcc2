use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Separator used when diagnostics are reported as one block of text.
pub const MESSAGE_SEPARATOR: &str = "\n";

/// Progress of a scenario after some number of actions.
///
/// Values are never mutated in place: each applied action consumes the
/// previous outcome and produces the next one. `Failing` is absorbing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<S> {
    Passing(S),
    Flagging(S, Vec<String>),
    Failing(S, Vec<String>),
}

impl<S> Outcome<S> {
    pub fn state(&self) -> &S {
        match self {
            Outcome::Passing(s) | Outcome::Flagging(s, _) | Outcome::Failing(s, _) => s,
        }
    }

    pub fn into_state(self) -> S {
        self.into_parts().0
    }

    /// Accumulated diagnostics, oldest first. Empty while passing.
    pub fn messages(&self) -> &[String] {
        match self {
            Outcome::Passing(_) => &[],
            Outcome::Flagging(_, m) | Outcome::Failing(_, m) => m,
        }
    }

    pub fn into_parts(self) -> (S, Vec<String>) {
        match self {
            Outcome::Passing(s) => (s, Vec::new()),
            Outcome::Flagging(s, m) | Outcome::Failing(s, m) => (s, m),
        }
    }

    pub fn is_passing(&self) -> bool {
        matches!(self, Outcome::Passing(_))
    }

    pub fn is_flagging(&self) -> bool {
        matches!(self, Outcome::Flagging(..))
    }

    pub fn is_failing(&self) -> bool {
        matches!(self, Outcome::Failing(..))
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Passing(_) => "passing",
            Outcome::Flagging(..) => "flagging",
            Outcome::Failing(..) => "failing",
        }
    }

    /// Host-facing result of a terminal outcome.
    pub fn verdict(&self) -> Verdict {
        match self {
            Outcome::Passing(_) => Verdict::Passed,
            Outcome::Flagging(_, m) => Verdict::DeferredFailure(m.join(MESSAGE_SEPARATOR)),
            Outcome::Failing(_, m) => Verdict::Failed(m.join(MESSAGE_SEPARATOR)),
        }
    }
}

/// Pass / deferred-fail / fail as reported to a test host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    DeferredFailure(String),
    Failed(String),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Passed => None,
            Verdict::DeferredFailure(m) | Verdict::Failed(m) => Some(m),
        }
    }
}

/// Error returned by an action task.
///
/// A warning may carry the state the task reached before it gave up; the
/// evaluator continues from that state instead of the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFailure<S> {
    pub error: ProgressError,
    pub state: Option<S>,
}

impl<S> TaskFailure<S> {
    pub fn warning(message: impl Into<String>) -> Self {
        ProgressError::Warning(message.into()).into()
    }

    pub fn incorrect_screen(message: impl Into<String>) -> Self {
        ProgressError::IncorrectScreen(message.into()).into()
    }

    pub fn other(message: impl Into<String>) -> Self {
        ProgressError::Unknown(message.into()).into()
    }

    pub fn with_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }
}

impl<S> From<ProgressError> for TaskFailure<S> {
    fn from(error: ProgressError) -> Self {
        Self { error, state: None }
    }
}

impl<S> std::fmt::Display for TaskFailure<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}
