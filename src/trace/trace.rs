use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One applied action, as written to the progress trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,
    pub action: String,

    /// Whether the action's screen was checked before it ran
    pub screen_checked: bool,

    /// Outcome status after the action: passing, flagging or failing
    pub outcome: String,

    /// Diagnostic appended by this action, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Action was skipped because the scenario had already failed
    #[serde(default)]
    pub skipped: bool,
}

impl TraceEvent {
    pub fn now(step: u64, action: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            action: action.to_string(),
            screen_checked: false,
            outcome: String::new(),
            message: None,
            skipped: false,
        }
    }

    pub fn with_screen_check(mut self, checked: bool) -> Self {
        self.screen_checked = checked;
        self
    }

    pub fn with_outcome(mut self, status: impl ToString) -> Self {
        self.outcome = status.to_string();
        self
    }

    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = message.map(str::to_string);
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }
}
