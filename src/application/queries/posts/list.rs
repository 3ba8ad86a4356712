use super::PostQueryService;
use crate::application::{
    dto::{Paged, PostDto},
    error::{ApplicationError, ApplicationResult},
};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

pub struct ListPostsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PostQueryService {
    /// Posts ordered by creation time descending (id descending as the
    /// tie-break); `total` is the count of all non-deleted posts.
    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<Paged<PostDto>> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(ApplicationError::validation(
                "page must be a positive integer",
            ));
        }
        if limit == 0 {
            return Err(ApplicationError::validation(
                "limit must be a positive integer",
            ));
        }

        let limit = limit.min(MAX_LIMIT);
        let offset = u64::from(page - 1) * u64::from(limit);

        let records = self.read_repo.list_page(offset, u64::from(limit)).await?;
        let total = self.read_repo.count().await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(Paged::new(items, page, limit, total))
    }
}
