// src/application/commands/posts/update.rs
use super::service::PostCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PostDto},
        error::{ApplicationError, ApplicationResult},
        ports::assets::ImagePayload,
    },
    domain::post::{ImageRef, PostContent, PostId, PostTitle, PostUpdate},
};

/// Tri-state update request: `None` fields are left untouched, which is
/// distinct from explicitly setting `published` to false.
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub image: Option<ImagePayload>,
}

impl PostCommandService {
    pub async fn update_post(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePostCommand,
    ) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let post = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if post.author_id != actor.id {
            return Err(ApplicationError::forbidden(
                "only the owner may update this post",
            ));
        }

        let mut update = PostUpdate::new(id, self.clock.now());

        if let Some(title) = command.title {
            let title = PostTitle::new(title)?;
            if title != post.title {
                let slug = self.slug_service.reserve_slug(&title, Some(post.id)).await?;
                update = update.with_title_and_slug(title, slug);
            }
        }

        if let Some(content) = command.content {
            update = update.with_content(PostContent::new(content)?);
        }

        if let Some(published) = command.published {
            update = update.with_published(published);
        }

        // The old asset is removed before the replacement is uploaded so a
        // successful update never leaves two resolvable copies. If the
        // upload then fails, the stored post keeps referencing an asset
        // that no longer resolves until a retry succeeds.
        let mut uploaded: Option<ImageRef> = None;
        if let Some(payload) = command.image {
            if let Some(old) = &post.image {
                self.asset_store
                    .delete(old.asset_id())
                    .await
                    .map_err(|err| ApplicationError::asset_delete(err.to_string()))?;
            }
            let image = self.upload_image(payload).await?;
            update = update.with_image(image.clone());
            uploaded = Some(image);
        }

        // Nothing to change: skip the write so updated_at is untouched.
        if update.is_noop() {
            return self.reload(id).await;
        }

        if let Err(err) = self.write_repo.update(update).await {
            if let Some(image) = &uploaded {
                self.discard_asset(image).await;
            }
            return Err(err.into());
        }

        self.reload(id).await
    }
}
