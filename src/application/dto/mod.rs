pub mod auth;
pub mod pagination;
pub mod posts;

pub use auth::AuthenticatedUser;
pub use pagination::{PageInfo, Paged};
pub use posts::{AuthorDto, PostDto};
