use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProgressError;

/// Zero-argument check against the live UI.
pub type Probe = Box<dyn Fn() -> bool>;

/// Screen an action expects to be on before its task runs.
pub trait ScreenCheck {
    fn name(&self) -> &str;

    /// Non-blocking readiness query.
    fn is_active(&self) -> bool;

    /// Block until the screen is active or give up with `IncorrectScreen`.
    fn become_active(&self) -> Result<(), ProgressError>;
}

/// How a `Screen` waits to become active.
pub enum ActivationPolicy {
    /// Check once.
    Immediate,

    /// Re-check every `interval` until `timeout`.
    Poll { timeout: Duration, interval: Duration },

    /// Like `Poll`, but the screen only counts as active once a transient
    /// indicator (spinner, loading overlay) has gone away.
    PollPastTransient {
        timeout: Duration,
        interval: Duration,
        transient: Probe,
    },
}

pub struct Screen {
    name: String,
    probe: Probe,
    policy: ActivationPolicy,
}

impl Screen {
    pub fn new(name: impl Into<String>, probe: Probe, policy: ActivationPolicy) -> Self {
        Self {
            name: name.into(),
            probe,
            policy,
        }
    }

    /// Screen identified by one anchor element meeting `criteria`.
    pub fn from_element<F>(
        name: impl Into<String>,
        criteria: ReadinessCriteria,
        status: F,
        policy: ActivationPolicy,
    ) -> Self
    where
        F: Fn() -> ElementStatus + 'static,
    {
        Self::new(
            name,
            Box::new(move || criteria.is_met_by(&status())),
            policy,
        )
    }

    fn transient_visible(&self) -> bool {
        match &self.policy {
            ActivationPolicy::PollPastTransient { transient, .. } => transient(),
            _ => false,
        }
    }
}

impl ScreenCheck for Screen {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        (self.probe)() && !self.transient_visible()
    }

    fn become_active(&self) -> Result<(), ProgressError> {
        let (timeout, interval) = match &self.policy {
            ActivationPolicy::Immediate => {
                return if self.is_active() {
                    Ok(())
                } else {
                    Err(ProgressError::IncorrectScreen(format!(
                        "{} is not active",
                        self.name
                    )))
                };
            }
            ActivationPolicy::Poll { timeout, interval }
            | ActivationPolicy::PollPastTransient {
                timeout, interval, ..
            } => (*timeout, *interval),
        };

        if poll_until(timeout, interval, || self.is_active()) {
            return Ok(());
        }

        let detail = if self.transient_visible() {
            " (transient indicator still visible)"
        } else {
            ""
        };
        Err(ProgressError::IncorrectScreen(format!(
            "{} did not become active within {}ms{}",
            self.name,
            timeout.as_millis(),
            detail
        )))
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen").field("name", &self.name).finish()
    }
}

// ============================================================================
// Element readiness
// ============================================================================

/// Conditions an element must satisfy to count as ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadinessCriteria {
    pub exists: bool,
    pub hittable: bool,
    pub enabled: bool,
}

impl ReadinessCriteria {
    pub const EXISTS: Self = Self {
        exists: true,
        hittable: false,
        enabled: false,
    };

    pub const INTERACTIVE: Self = Self {
        exists: true,
        hittable: true,
        enabled: true,
    };

    pub fn is_met_by(&self, status: &ElementStatus) -> bool {
        self.unmet(status).is_empty()
    }

    /// Names of the required conditions `status` fails.
    pub fn unmet(&self, status: &ElementStatus) -> Vec<&'static str> {
        let mut unmet = Vec::new();
        if self.exists && !status.exists {
            unmet.push("exists");
        }
        if self.hittable && !status.hittable {
            unmet.push("hittable");
        }
        if self.enabled && !status.enabled {
            unmet.push("enabled");
        }
        unmet
    }
}

/// Observed state of a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementStatus {
    pub exists: bool,
    pub hittable: bool,
    pub enabled: bool,
}

/// Wait for an element to satisfy `criteria`, failing with
/// `ElementNotReady` after `timeout`.
pub fn wait_for_element<F>(
    name: &str,
    criteria: ReadinessCriteria,
    timeout: Duration,
    interval: Duration,
    status: F,
) -> Result<(), ProgressError>
where
    F: Fn() -> ElementStatus,
{
    if poll_until(timeout, interval, || criteria.is_met_by(&status())) {
        return Ok(());
    }
    let unmet = criteria.unmet(&status());
    Err(ProgressError::ElementNotReady(format!(
        "{} not {} after {}ms",
        name,
        unmet.join(", "),
        timeout.as_millis()
    )))
}

/// Evaluate `ready` until it holds or `timeout` elapses. Always checks at
/// least once. A timeout too large to represent as an `Instant` waits
/// without a deadline.
fn poll_until<F: Fn() -> bool>(timeout: Duration, interval: Duration, ready: F) -> bool {
    let deadline = Instant::now().checked_add(timeout);
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        if ready() {
            return true;
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    debug!(attempts, "poll timed out");
                    return false;
                }
                interval.min(deadline - now)
            }
            None => interval,
        };
        thread::sleep(pause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_report_unmet_conditions() {
        let status = ElementStatus {
            exists: true,
            hittable: false,
            enabled: false,
        };
        assert!(ReadinessCriteria::EXISTS.is_met_by(&status));
        assert_eq!(
            ReadinessCriteria::INTERACTIVE.unmet(&status),
            vec!["hittable", "enabled"]
        );
        assert!(ReadinessCriteria::default().is_met_by(&ElementStatus::default()));
    }

    #[test]
    fn poll_checks_at_least_once() {
        assert!(poll_until(Duration::ZERO, Duration::ZERO, || true));
        assert!(!poll_until(Duration::ZERO, Duration::ZERO, || false));
    }

    #[test]
    fn unbounded_timeout_polls_until_ready() {
        let checks = std::cell::Cell::new(0);
        let ready = poll_until(Duration::MAX, Duration::from_millis(1), || {
            checks.set(checks.get() + 1);
            checks.get() >= 3
        });
        assert!(ready);
        assert_eq!(checks.get(), 3);
    }
}
