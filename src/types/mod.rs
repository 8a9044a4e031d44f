// ABOUTME: Validated domain types shared by the registry client and retention engine.
// ABOUTME: Digests, location handles, selectors, and resolved image descriptors.

mod descriptor;
mod digest;
mod selector;

pub use descriptor::{ImageDescriptor, LocationRef, ParseLocationError};
pub use digest::{Digest, ParseDigestError};
pub use selector::{Selector, SelectorError};
