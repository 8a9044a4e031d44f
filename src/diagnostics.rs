// ABOUTME: Diagnostics accumulator for non-fatal warnings during a cleanup run.
// ABOUTME: Collects skipped search entries and failed deletions for the summary.

use crate::registry::SkippedHit;
use crate::retention::DeletionOutcome;

/// Collects non-fatal warnings during a cleanup run.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::debug!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}

/// A non-fatal warning collected during cleanup.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for a search entry left out of the run.
    pub fn skipped_entry(hit: &SkippedHit) -> Self {
        Self {
            kind: WarningKind::SkippedEntry,
            message: format!("skipped search entry {}", hit),
        }
    }

    /// Create a warning for a delete that did not succeed.
    pub fn deletion_failed(outcome: &DeletionOutcome) -> Self {
        Self {
            kind: WarningKind::DeletionFailed,
            message: format!(
                "failed to delete {} ({}): {}",
                outcome.image, outcome.image.digest, outcome.status
            ),
        }
    }
}

/// Categories of warnings that can occur during cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Search entry without a usable asset location or checksum.
    SkippedEntry,
    /// Registry refused or never answered a delete.
    DeletionFailed,
}
