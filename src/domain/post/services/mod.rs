// src/domain/post/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::repository::PostReadRepository;
use crate::domain::post::value_objects::{PostId, PostSlug, PostTitle};

/// Domain service that derives a post's slug from its title and rejects
/// collisions with other non-deleted posts.
///
/// The slug lookup here is advisory. Two concurrent writers can both pass
/// it; the store's unique constraint settles the race and the repository
/// maps that rejection to the same conflict error.
pub struct PostSlugService {
    read_repo: Arc<dyn PostReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl PostSlugService {
    pub fn new(read_repo: Arc<dyn PostReadRepository>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn reserve_slug(
        &self,
        title: &PostTitle,
        ignore_id: Option<PostId>,
    ) -> DomainResult<PostSlug> {
        let derived = self.generator.slugify(title.as_str());
        if derived.is_empty() {
            return Err(DomainError::Validation(
                "title does not produce a usable slug".into(),
            ));
        }

        let slug = PostSlug::new(derived)?;
        match self.read_repo.find_by_slug(&slug).await? {
            Some(existing) if ignore_id == Some(existing.id) => Ok(slug),
            Some(_) => Err(DomainError::Conflict(format!(
                "a post with slug '{slug}' already exists"
            ))),
            None => Ok(slug),
        }
    }
}
