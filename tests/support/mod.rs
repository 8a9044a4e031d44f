// ABOUTME: Test support utilities.
// ABOUTME: Provides descriptor builders, an in-memory registry, and Nexus mocks.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime};
use nexus_retention::types::{Digest, ImageDescriptor, LocationRef};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Once;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_registry;
#[allow(dead_code)]
pub mod nexus_mock;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("nexus_retention=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Fixed "today" so age arithmetic is deterministic.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Noon UTC, `days` before [`today`].
#[allow(dead_code)]
pub fn days_ago(days: u64) -> DateTime<FixedOffset> {
    today()
        .checked_sub_days(Days::new(days))
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        .and_utc()
        .fixed_offset()
}

/// Deterministic sha256-shaped digest derived from `seed`.
#[allow(dead_code)]
pub fn digest_for(seed: &str) -> Digest {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let hex = format!("{:016x}", hasher.finish()).repeat(4);
    Digest::parse(&hex).unwrap()
}

/// Descriptor for `app:<version>` in `docker-hosted`.
#[allow(dead_code)]
pub fn image(version: &str, created_at: DateTime<FixedOffset>) -> ImageDescriptor {
    image_in("docker-hosted", "app", version, created_at)
}

#[allow(dead_code)]
pub fn image_in(
    repository: &str,
    name: &str,
    version: &str,
    created_at: DateTime<FixedOffset>,
) -> ImageDescriptor {
    ImageDescriptor {
        repository: repository.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        location: LocationRef::from_download_url(&format!(
            "http://nexus.test:8081/repository/{}/v2/{}/manifests/{}",
            repository, name, version
        ))
        .unwrap(),
        digest: digest_for(&format!("{}/{}:{}", repository, name, version)),
        created_at,
    }
}

/// Versions of the given descriptors, in order.
#[allow(dead_code)]
pub fn versions<'a>(images: impl IntoIterator<Item = &'a ImageDescriptor>) -> Vec<&'a str> {
    images.into_iter().map(|i| i.version.as_str()).collect()
}
