// ABOUTME: Per-image deletion outcomes and the aggregated retention report.
// ABOUTME: Status codes are recorded verbatim; failures never abort a run.

use crate::types::ImageDescriptor;
use serde::Serialize;
use std::fmt;

/// Raw result of one delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    /// The registry answered with this HTTP status code.
    Http(u16),
    /// No response was received (connection failure, timeout).
    Transport(String),
}

impl DeleteStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, DeleteStatus::Http(code) if (200..300).contains(code))
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            DeleteStatus::Http(code) => Some(*code),
            DeleteStatus::Transport(_) => None,
        }
    }
}

impl fmt::Display for DeleteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteStatus::Http(code) => write!(f, "status {}", code),
            DeleteStatus::Transport(error) => write!(f, "transport error: {}", error),
        }
    }
}

/// Result of attempting to delete one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    pub image: ImageDescriptor,
    pub status: DeleteStatus,
}

impl DeletionOutcome {
    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }
}

/// Everything a retention run produced, in deletion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionReport {
    /// Number of images the selector matched.
    pub total: usize,
    /// Set when the keep-count covered every matched image.
    pub all_kept: bool,
    pub outcomes: Vec<DeletionOutcome>,
}

impl RetentionReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| o.succeeded())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}
