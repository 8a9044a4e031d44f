// ABOUTME: Clean command implementation.
// ABOUTME: Connects to Nexus, runs the retention engine once, and prints outcomes.

use chrono::Local;
use nexus_retention::cleanup::{CleanupMode, CleanupResult, run_cleanup};
use nexus_retention::config::Config;
use nexus_retention::diagnostics::{Diagnostics, Warning};
use nexus_retention::error::{Error, Result};
use nexus_retention::output::Output;
use nexus_retention::registry::NexusClient;
use nexus_retention::retention::RetentionPolicy;
use nexus_retention::types::Selector;

/// Apply `policy` to every image matching `selector`.
pub async fn clean(
    config: &Config,
    selector: &Selector,
    policy: RetentionPolicy,
    dry_run: bool,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Searching {} for {} ({})",
        config.registry.base_url(),
        selector,
        policy
    ));

    let client = NexusClient::new(&config.registry)?;
    let mode = if dry_run {
        CleanupMode::DryRun
    } else {
        CleanupMode::Delete
    };
    let today = Local::now().date_naive();

    let run = run_cleanup(&client, selector, policy, today, mode).await?;

    let mut diag = Diagnostics::default();
    for skipped in &run.skipped {
        diag.warn(Warning::skipped_entry(skipped));
    }

    let failure = match run.result {
        CleanupResult::Planned(plan) => {
            if plan.all_kept {
                output.all_kept(plan.total, policy);
            } else if plan.is_empty() {
                output.nothing_to_delete();
            } else {
                for image in &plan.targets {
                    output.planned(image);
                }
            }
            output.progress(&format!(
                "Dry run: {} of {} image(s) would be deleted",
                plan.targets.len(),
                plan.total
            ));
            None
        }
        CleanupResult::Executed(report) => {
            if report.all_kept {
                output.all_kept(report.total, policy);
            } else if report.is_empty() {
                output.nothing_to_delete();
            }

            for outcome in &report.outcomes {
                output.outcome(outcome);
                if !outcome.succeeded() {
                    diag.warn(Warning::deletion_failed(outcome));
                }
            }

            let failed = report.failed().count();
            (failed > 0).then_some(Error::DeletionFailed {
                failed,
                attempted: report.outcomes.len(),
            })
        }
    };

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    if let Some(e) = failure {
        return Err(e);
    }

    output.success("Cleanup complete!");
    Ok(())
}
