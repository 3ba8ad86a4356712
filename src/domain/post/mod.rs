pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewPost, Post, PostUpdate, PostWithAuthor};
pub use repository::{PostReadRepository, PostWriteRepository};
pub use value_objects::{ImageRef, PostContent, PostId, PostSlug, PostTitle};
