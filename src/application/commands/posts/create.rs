// src/application/commands/posts/create.rs
use super::service::PostCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PostDto},
        error::ApplicationResult,
        ports::assets::ImagePayload,
    },
    domain::post::{NewPost, PostContent, PostTitle},
};

pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub image: Option<ImagePayload>,
}

impl PostCommandService {
    /// Create a post owned by `actor`. The slug is derived from the title;
    /// a collision with any non-deleted post rejects the whole request and
    /// nothing is written or uploaded.
    pub async fn create_post(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePostCommand,
    ) -> ApplicationResult<PostDto> {
        let title = PostTitle::new(command.title)?;
        let content = PostContent::new(command.content)?;
        let slug = self.slug_service.reserve_slug(&title, None).await?;
        let now = self.clock.now();

        let image = match command.image {
            Some(payload) => Some(self.upload_image(payload).await?),
            None => None,
        };

        let new_post = NewPost {
            title,
            slug,
            content,
            published: command.published,
            image: image.clone(),
            author_id: actor.id,
            created_at: now,
            updated_at: now,
        };

        let created = match self.write_repo.insert(new_post).await {
            Ok(post) => post,
            Err(err) => {
                // The upload succeeded but the insert did not; remove the
                // orphan and surface the insert error unchanged.
                if let Some(image) = &image {
                    self.discard_asset(image).await;
                }
                return Err(err.into());
            }
        };

        self.reload(created.id).await
    }
}
