// ABOUTME: Retention policy: keep the newest N images, or purge by maximum age.
// ABOUTME: Validated once at construction so the engine never sees an invalid policy.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors from building a retention policy out of raw inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("no retention policy given: pass --keep or --days, or set `retention` in the config file")]
    Unset,

    #[error("--keep and --days cannot be used together")]
    Conflicting,

    #[error("keep count cannot be negative: {0}")]
    NegativeKeep(i64),

    #[error("max age in days cannot be negative: {0}")]
    NegativeDays(i64),

    #[error("{field} is too large: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Exactly one retention mode per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the `n` most recently created images; the rest are candidates.
    KeepLatest(u32),
    /// Candidates are images created strictly before `today - days`.
    MaxAge(u32),
}

impl RetentionPolicy {
    pub fn keep_latest(n: i64) -> Result<Self, PolicyError> {
        if n < 0 {
            return Err(PolicyError::NegativeKeep(n));
        }
        u32::try_from(n)
            .map(RetentionPolicy::KeepLatest)
            .map_err(|_| PolicyError::OutOfRange {
                field: "keep count",
                value: n,
            })
    }

    pub fn max_age(days: i64) -> Result<Self, PolicyError> {
        if days < 0 {
            return Err(PolicyError::NegativeDays(days));
        }
        u32::try_from(days)
            .map(RetentionPolicy::MaxAge)
            .map_err(|_| PolicyError::OutOfRange {
                field: "max age",
                value: days,
            })
    }

    /// Build a policy from the two optional inputs, requiring exactly one.
    pub fn from_parts(keep: Option<i64>, days: Option<i64>) -> Result<Self, PolicyError> {
        match (keep, days) {
            (Some(_), Some(_)) => Err(PolicyError::Conflicting),
            (Some(n), None) => Self::keep_latest(n),
            (None, Some(days)) => Self::max_age(days),
            (None, None) => Err(PolicyError::Unset),
        }
    }

    /// Days subtracted from today to obtain the age cutoff.
    ///
    /// Keep-count policies use zero, so only images created before today are
    /// ever deleted.
    pub fn age_days(&self) -> u32 {
        match self {
            RetentionPolicy::KeepLatest(_) => 0,
            RetentionPolicy::MaxAge(days) => *days,
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::KeepLatest(n) => write!(f, "keep latest {}", n),
            RetentionPolicy::MaxAge(days) => write!(f, "max age {} day(s)", days),
        }
    }
}
