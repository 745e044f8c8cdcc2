use thiserror::Error;

// ============================================================================
// Dump errors (tree reconstruction)
// ============================================================================

/// A line that does not follow the element grammar at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Why a well-formed line could not be placed in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralErrorKind {
    /// Indentation skips one or more levels below the deepest open ancestor
    DepthJump { parent_depth: usize, depth: usize },

    /// Line sits at or above the root's depth after a root already exists
    DetachedRoot { root_depth: usize, depth: usize },

    /// Line belongs to the subtree of an earlier rejected line
    OrphanedDescendant { ancestor_line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind}: {line}")]
pub struct StructuralError {
    pub line_number: usize,
    pub line: String,
    pub kind: StructuralErrorKind,
}

impl std::fmt::Display for StructuralErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralErrorKind::DepthJump { parent_depth, depth } => write!(
                f,
                "depth {} cannot be a child of depth {}",
                depth, parent_depth
            ),
            StructuralErrorKind::DetachedRoot { root_depth, depth } => write!(
                f,
                "depth {} is outside the root at depth {}",
                depth, root_depth
            ),
            StructuralErrorKind::OrphanedDescendant { ancestor_line } => {
                write!(f, "descendant of rejected line {}", ancestor_line)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DumpError {
    #[error("dump contains no element lines")]
    Empty,

    #[error("{} malformed line(s): {}", .lines.len(), summarize_malformed(.lines))]
    Malformed { lines: Vec<MalformedLine> },

    #[error("{} structural error(s): {}", .errors.len(), summarize_structural(.errors))]
    Structural { errors: Vec<StructuralError> },
}

fn summarize_malformed(lines: &[MalformedLine]) -> String {
    lines
        .iter()
        .map(|l| format!("line {} ({})", l.line_number, l.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summarize_structural(errors: &[StructuralError]) -> String {
    errors
        .iter()
        .map(|e| format!("line {}", e.line_number))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Progress errors (scenario evaluation)
// ============================================================================

/// Categorized failure raised by a screen check or an action task.
///
/// Categorized variants display as `"<category>: <message>"`; `Unknown`
/// displays the raw message only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("element not ready: {0}")]
    ElementNotReady(String),

    #[error("incorrect screen: {0}")]
    IncorrectScreen(String),

    #[error("warning: {0}")]
    Warning(String),

    #[error("developer error: {0}")]
    Developer(String),

    #[error("{0}")]
    Unknown(String),
}

impl ProgressError {
    /// Recoverable failures flag the scenario instead of failing it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProgressError::Warning(_))
    }

    /// Message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ProgressError::ElementNotReady(m)
            | ProgressError::IncorrectScreen(m)
            | ProgressError::Warning(m)
            | ProgressError::Developer(m)
            | ProgressError::Unknown(m) => m,
        }
    }

    /// Failures caused by the UI not being in the expected place.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ProgressError::IncorrectScreen(_) | ProgressError::ElementNotReady(_)
        )
    }
}

// ============================================================================
// CLI errors
// ============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),
}
