// ABOUTME: Retention decision engine for registry images.
// ABOUTME: Turns an unordered descriptor list plus a policy into ordered deletions.

mod deleter;
mod engine;
mod outcome;
mod policy;

pub use deleter::{Deleter, FnDeleter};
pub use engine::{RetentionPlan, cutoff_date, execute, plan, select_and_delete};
pub use outcome::{DeleteStatus, DeletionOutcome, RetentionReport};
pub use policy::{PolicyError, RetentionPolicy};
