mod get_by_id;
mod list;
mod service;

pub use get_by_id::GetPostQuery;
pub use list::ListPostsQuery;
pub use service::PostQueryService;
