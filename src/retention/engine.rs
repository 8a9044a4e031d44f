// ABOUTME: Selection and deletion sequencing for a retention run.
// ABOUTME: Keep-count phase, then age phase, then one delete per target in order.

use super::{Deleter, DeletionOutcome, RetentionPolicy, RetentionReport};
use crate::types::ImageDescriptor;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Deletion targets chosen by the selection phases, before any delete runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionPlan {
    /// Number of images the selection started from.
    pub total: usize,
    /// Set when the keep-count covered every image.
    pub all_kept: bool,
    /// Images to delete, in deletion order.
    pub targets: Vec<ImageDescriptor>,
}

impl RetentionPlan {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of images that survive the plan.
    pub fn kept(&self) -> usize {
        self.total - self.targets.len()
    }
}

/// Oldest calendar date that is still kept; anything strictly earlier goes.
///
/// A cutoff before the earliest representable date keeps everything.
pub fn cutoff_date(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Compute deletion targets. Pure: the input is never reordered or modified.
///
/// Under [`RetentionPolicy::KeepLatest`] images are ranked newest first.
/// Images with identical creation times are ranked by digest, then by input
/// position, so the ranking is fully deterministic.
pub fn plan(images: &[ImageDescriptor], policy: RetentionPolicy, today: NaiveDate) -> RetentionPlan {
    let total = images.len();

    let candidates: Vec<&ImageDescriptor> = match policy {
        RetentionPolicy::KeepLatest(n) => {
            let keep = n as usize;
            if keep >= total {
                tracing::info!(total, keep, "keep count covers every image");
                return RetentionPlan {
                    total,
                    all_kept: true,
                    targets: Vec::new(),
                };
            }

            let mut ranked: Vec<&ImageDescriptor> = images.iter().collect();
            ranked.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| a.digest.cmp(&b.digest))
            });
            ranked.split_off(keep)
        }
        RetentionPolicy::MaxAge(_) => images.iter().collect(),
    };

    let cutoff = cutoff_date(today, policy.age_days());
    let candidate_count = candidates.len();
    let targets: Vec<ImageDescriptor> = candidates
        .into_iter()
        .filter(|image| image.created_on() < cutoff)
        .cloned()
        .collect();

    tracing::info!(
        total,
        candidates = candidate_count,
        targets = targets.len(),
        %cutoff,
        %policy,
        "retention plan computed"
    );

    RetentionPlan {
        total,
        all_kept: false,
        targets,
    }
}

/// Delete every target in plan order, recording one outcome per target.
///
/// A failed delete is recorded and the loop moves on to the next target.
pub async fn execute<D>(plan: RetentionPlan, deleter: &D) -> RetentionReport
where
    D: Deleter + ?Sized,
{
    let mut outcomes = Vec::with_capacity(plan.targets.len());

    for image in plan.targets {
        let status = deleter.delete(&image).await;
        if status.is_success() {
            tracing::debug!(image = %image, digest = %image.digest, %status, "deleted image");
        } else {
            tracing::warn!(image = %image, digest = %image.digest, %status, "failed to delete image");
        }
        outcomes.push(DeletionOutcome { image, status });
    }

    RetentionReport {
        total: plan.total,
        all_kept: plan.all_kept,
        outcomes,
    }
}

/// Select targets under `policy` and delete them through `deleter`.
pub async fn select_and_delete<D>(
    images: &[ImageDescriptor],
    policy: RetentionPolicy,
    today: NaiveDate,
    deleter: &D,
) -> RetentionReport
where
    D: Deleter + ?Sized,
{
    execute(plan(images, policy, today), deleter).await
}
