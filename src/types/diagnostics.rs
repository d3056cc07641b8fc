//! Non-fatal diagnostics reported alongside best-effort results

use serde::{Deserialize, Serialize};

/// Category of a recoverable condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A header matched no canonical field and its column was ignored
    DroppedHeader,
    /// A second column mapped to an already-bound canonical field
    DuplicateColumn,
    /// A row with a blank or non-finite mandatory cell was skipped
    DroppedRow,
    /// The polynomial order was lowered to fit the available window
    DegradedFitOrder,
    /// A derivative root was complex or fell outside the window
    DiscardedRoot,
}

/// A note attached to a build or analysis result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}
