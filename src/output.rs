// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (cron), and JSON output modes.

use crate::retention::{DeleteStatus, DeletionOutcome, RetentionPolicy};
use crate::types::ImageDescriptor;
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Only result lines and errors
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

/// One result line for an attempted deletion.
pub fn format_outcome(outcome: &DeletionOutcome) -> String {
    let image = &outcome.image;
    if outcome.succeeded() {
        format!(
            "REPOSITORY: {} | DELETED: {}:{}",
            image.repository, image.name, image.version
        )
    } else {
        format!(
            "REPOSITORY: {} | FAILED: {}:{} ({})",
            image.repository, image.name, image.version, outcome.status
        )
    }
}

/// One result line for a deletion a dry run would perform.
pub fn format_planned(image: &ImageDescriptor) -> String {
    format!(
        "REPOSITORY: {} | WOULD DELETE: {}:{}",
        image.repository, image.name, image.version
    )
}

pub const NOTHING_TO_DELETE: &str = "No images in delete query";

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print the result line for one deletion attempt.
    pub fn outcome(&self, outcome: &DeletionOutcome) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", format_outcome(outcome)),
            OutputMode::Json => emit(&JsonOutcome {
                event: if outcome.succeeded() {
                    "deleted"
                } else {
                    "delete_failed"
                },
                repository: &outcome.image.repository,
                name: &outcome.image.name,
                version: &outcome.image.version,
                digest: outcome.image.digest.as_str(),
                status: outcome.status.code(),
                error: match &outcome.status {
                    DeleteStatus::Transport(e) => Some(e.as_str()),
                    DeleteStatus::Http(_) => None,
                },
            }),
        }
    }

    /// Print the result line for a target a dry run would delete.
    pub fn planned(&self, image: &ImageDescriptor) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", format_planned(image)),
            OutputMode::Json => emit(&JsonOutcome {
                event: "would_delete",
                repository: &image.repository,
                name: &image.name,
                version: &image.version,
                digest: image.digest.as_str(),
                status: None,
                error: None,
            }),
        }
    }

    /// Report that no image qualified for deletion.
    pub fn nothing_to_delete(&self) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{NOTHING_TO_DELETE}"),
            OutputMode::Json => emit(&JsonEvent {
                event: "nothing_to_delete",
                message: NOTHING_TO_DELETE,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Report that the keep count covered every matched image.
    pub fn all_kept(&self, total: usize, policy: RetentionPolicy) {
        let message = format!("All {} image(s) kept ({})", total, policy);
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => emit(&JsonEvent {
                event: "all_kept",
                message: &message,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent {
                event: "success",
                message,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => emit_err(&JsonEvent {
                event: "warning",
                message,
                duration_secs: None,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => emit_err(&JsonEvent {
                event: "error",
                message,
                duration_secs: self.duration(),
            }),
        }
    }
}

fn emit<T: Serialize>(event: &T) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

fn emit_err<T: Serialize>(event: &T) {
    if let Ok(json) = serde_json::to_string(event) {
        eprintln!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    event: &'a str,
    repository: &'a str,
    name: &'a str,
    version: &'a str,
    digest: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}
