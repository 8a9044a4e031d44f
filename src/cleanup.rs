// ABOUTME: One cleanup run: collect matching images, plan, then delete or report.
// ABOUTME: Registry failures abort before any delete; delete failures are recorded.

use crate::error::{Error, Result};
use crate::registry::{Registry, RegistryDeleter, SkippedHit, collect_images};
use crate::retention::{self, RetentionPlan, RetentionPolicy, RetentionReport};
use crate::types::Selector;
use chrono::NaiveDate;

/// Whether planned deletions are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    Delete,
    DryRun,
}

#[derive(Debug, Clone)]
pub enum CleanupResult {
    /// Dry run: targets computed, nothing deleted.
    Planned(RetentionPlan),
    /// Deletes were issued for every target.
    Executed(RetentionReport),
}

#[derive(Debug, Clone)]
pub struct CleanupRun {
    pub result: CleanupResult,
    /// Search entries that could not be resolved and were left alone.
    pub skipped: Vec<SkippedHit>,
}

/// Run one cleanup against `registry`.
///
/// Returns [`Error::NothingMatched`] when the selector resolves to no images.
pub async fn run_cleanup<R>(
    registry: &R,
    selector: &Selector,
    policy: RetentionPolicy,
    today: NaiveDate,
    mode: CleanupMode,
) -> Result<CleanupRun>
where
    R: Registry + ?Sized,
{
    let collected = collect_images(registry, selector).await?;
    if collected.images.is_empty() {
        return Err(Error::NothingMatched(selector.to_string()));
    }

    let plan = retention::plan(&collected.images, policy, today);
    let result = match mode {
        CleanupMode::DryRun => CleanupResult::Planned(plan),
        CleanupMode::Delete => {
            CleanupResult::Executed(retention::execute(plan, &RegistryDeleter(registry)).await)
        }
    };

    Ok(CleanupRun {
        result,
        skipped: collected.skipped,
    })
}
