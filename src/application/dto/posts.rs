use crate::domain::post::PostWithAuthor;
use crate::domain::user::Author;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author: AuthorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<PostWithAuthor> for PostDto {
    fn from(record: PostWithAuthor) -> Self {
        let PostWithAuthor { post, author } = record;
        Self {
            id: post.id.into(),
            title: post.title.into(),
            slug: post.slug.into(),
            content: post.content.into(),
            published: post.published,
            image_url: post.image.map(|image| image.url().to_string()),
            author: author.into(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            username: author.username.into(),
            display_name: author.display_name,
        }
    }
}
