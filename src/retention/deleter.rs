// ABOUTME: Injection seam for the delete transport used by the engine.
// ABOUTME: Lets the engine sequence deletions without depending on HTTP.

use super::DeleteStatus;
use crate::types::ImageDescriptor;
use async_trait::async_trait;

/// Issues one delete for one image and reports the raw status.
///
/// Implementations must not panic or return early on failure; every
/// problem is expressed as a non-success [`DeleteStatus`].
#[async_trait]
pub trait Deleter: Send + Sync {
    async fn delete(&self, image: &ImageDescriptor) -> DeleteStatus;
}

/// Adapts a synchronous closure into a [`Deleter`].
pub struct FnDeleter<F>(F);

impl<F> FnDeleter<F>
where
    F: Fn(&ImageDescriptor) -> DeleteStatus + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Deleter for FnDeleter<F>
where
    F: Fn(&ImageDescriptor) -> DeleteStatus + Send + Sync,
{
    async fn delete(&self, image: &ImageDescriptor) -> DeleteStatus {
        (self.0)(image)
    }
}
