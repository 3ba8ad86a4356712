// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
        ports::{
            assets::{AssetStore, ImagePayload},
            time::Clock,
        },
    },
    domain::post::{
        ImageRef, PostId, PostReadRepository, PostWriteRepository, services::PostSlugService,
    },
};

/// Asset-store namespace for post images.
pub(super) const POST_IMAGE_NAMESPACE: &str = "blog-images";

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) slug_service: Arc<PostSlugService>,
    pub(super) asset_store: Arc<dyn AssetStore>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        slug_service: Arc<PostSlugService>,
        asset_store: Arc<dyn AssetStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            asset_store,
            clock,
        }
    }

    pub(super) async fn upload_image(&self, payload: ImagePayload) -> ApplicationResult<ImageRef> {
        let stored = self
            .asset_store
            .upload(payload, POST_IMAGE_NAMESPACE)
            .await
            .map_err(|err| ApplicationError::asset_upload(err.to_string()))?;
        ImageRef::new(stored.url, stored.asset_id).map_err(Into::into)
    }

    /// Best-effort removal of an asset orphaned by a failed write. The
    /// caller's original error is what surfaces; a secondary deletion
    /// failure is only logged.
    pub(super) async fn discard_asset(&self, image: &ImageRef) {
        if let Err(err) = self.asset_store.delete(image.asset_id()).await {
            tracing::warn!(
                asset_id = %image.asset_id(),
                error = %err,
                "failed to clean up orphaned image asset"
            );
        }
    }

    pub(super) async fn reload(&self, id: PostId) -> ApplicationResult<PostDto> {
        let record = self
            .read_repo
            .find_with_author(id)
            .await?
            .ok_or_else(|| ApplicationError::infrastructure("post missing after write"))?;
        Ok(record.into())
    }
}
