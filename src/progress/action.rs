use std::rc::Rc;

use crate::error::ProgressError;
use crate::progress::evaluator::ProgressEvaluator;
use crate::progress::progress_model::{Outcome, TaskFailure};
use crate::progress::screen::ScreenCheck;

pub type Task<S> = Box<dyn Fn(&S) -> Result<S, TaskFailure<S>>>;

/// One step of a scenario: a label, an optional screen it must start on,
/// and the work it does against the scenario state.
pub struct Action<S> {
    label: String,
    screen: Option<Rc<dyn ScreenCheck>>,
    task: Task<S>,
}

impl<S> Action<S> {
    pub fn new<F>(label: impl Into<String>, task: F) -> Self
    where
        F: Fn(&S) -> Result<S, TaskFailure<S>> + 'static,
    {
        Self {
            label: label.into(),
            screen: None,
            task: Box::new(task),
        }
    }

    /// Require `screen` to be active before the task runs.
    pub fn on_screen(mut self, screen: Rc<dyn ScreenCheck>) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn screen(&self) -> Option<&dyn ScreenCheck> {
        self.screen.as_deref()
    }

    pub fn run(&self, state: &S) -> Result<S, TaskFailure<S>> {
        (self.task)(state)
    }
}

impl<S: Clone + 'static> Action<S> {
    /// Group several actions under one label.
    ///
    /// The inner actions are folded with screen checks. Inner flags surface
    /// as a warning carrying the inner state; an inner failure fails the
    /// composite with the inner messages verbatim.
    pub fn composite(
        label: impl Into<String>,
        actions: Vec<Action<S>>,
    ) -> Result<Self, ProgressError> {
        let label = label.into();
        if actions.is_empty() {
            return Err(ProgressError::Developer(format!(
                "composite action '{}' has no actions",
                label
            )));
        }

        Ok(Self::new(label, move |state: &S| {
            let mut evaluator = ProgressEvaluator::new();
            let outcome = actions.iter().fold(Outcome::Passing(state.clone()), |o, a| {
                evaluator.apply(o, a)
            });
            match outcome {
                Outcome::Passing(s) => Ok(s),
                Outcome::Flagging(s, m) => Err(TaskFailure::warning(m.join("; ")).with_state(s)),
                Outcome::Failing(_, m) => Err(TaskFailure::other(m.join("; "))),
            }
        }))
    }
}

impl<S> std::fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("screen", &self.screen.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}
