// ABOUTME: Default retention policy read from the config file.
// ABOUTME: Used only when neither --keep nor --days is given.

use crate::retention::{PolicyError, RetentionPolicy};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    #[serde(default)]
    pub keep: Option<i64>,
    #[serde(default)]
    pub days: Option<i64>,
}

impl RetentionConfig {
    pub fn policy(&self) -> Result<RetentionPolicy, PolicyError> {
        RetentionPolicy::from_parts(self.keep, self.days)
    }
}

/// Policy from command-line values, falling back to the config file.
///
/// The fallback is consulted only when neither value was given on the
/// command line; there is no built-in default.
pub fn resolve_policy(
    keep: Option<i64>,
    days: Option<i64>,
    fallback: Option<&RetentionConfig>,
) -> Result<RetentionPolicy, PolicyError> {
    match (keep, days, fallback) {
        (None, None, Some(config)) => config.policy(),
        _ => RetentionPolicy::from_parts(keep, days),
    }
}
