use super::PostQueryService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::PostId,
};

pub struct GetPostQuery {
    pub id: i64,
}

impl PostQueryService {
    /// Soft-deleted posts are indistinguishable from absent ones here.
    pub async fn get_post(&self, query: GetPostQuery) -> ApplicationResult<PostDto> {
        let id = PostId::new(query.id)?;
        let record = self
            .read_repo
            .find_with_author(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        Ok(record.into())
    }
}
