use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{NewPost, Post, PostUpdate, PostWithAuthor};
use crate::domain::post::value_objects::{PostId, PostSlug};
use async_trait::async_trait;

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
}

/// Read access over non-deleted posts. Soft-deleted rows are invisible to
/// every method here.
#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_with_author(&self, id: PostId) -> DomainResult<Option<PostWithAuthor>>;
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    /// Listing order is creation time descending, id descending as tie-break.
    async fn list_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<PostWithAuthor>>;
    async fn count(&self) -> DomainResult<u64>;
}
