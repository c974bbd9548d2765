//! Object store port

use async_trait::async_trait;

use crate::error::StorageError;

/// Blob storage for place images
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload (overwriting any existing object) and return the public URL
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}
