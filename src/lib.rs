//! Support library for UI test automation.
//!
//! * [`tree`] rebuilds an element hierarchy from a textual debug dump.
//! * [`locator`] derives expressions that relocate those elements later.
//! * [`progress`] folds scenario actions into a passing / flagging /
//!   failing outcome and reports it to a test host.

pub mod cli;
pub mod error;
pub mod locator;
pub mod progress;
pub mod report;
pub mod trace;
pub mod tree;

pub use error::{DumpError, ProgressError};
pub use locator::path::{LocatorEntry, PathGenerator};
pub use progress::action::Action;
pub use progress::evaluator::{ProgressEvaluator, Scenario};
pub use progress::finalize::{HostHarness, finalize};
pub use progress::progress_model::{Outcome, TaskFailure, Verdict};
pub use tree::element_model::{ElementNode, ElementTree, NodeId};
pub use tree::parser::{DebugTreeParser, ParsedSnapshot};
