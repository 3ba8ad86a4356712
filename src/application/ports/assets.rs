// src/application/ports/assets.rs
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Raw image bytes handed in by the boundary layer.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// An asset accepted by the store: the public URL plus the provider's
/// opaque id, which is the handle for later deletion.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub url: String,
    pub asset_id: String,
}

#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("asset store request failed: {0}")]
    Transport(String),
    #[error("asset store rejected the request: {0}")]
    Rejected(String),
}

/// External binary-object host. Calls are not retried here; callers decide
/// whether a failure aborts the operation or is best-effort cleanup.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(
        &self,
        payload: ImagePayload,
        namespace: &str,
    ) -> Result<StoredAsset, AssetStoreError>;

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError>;
}
