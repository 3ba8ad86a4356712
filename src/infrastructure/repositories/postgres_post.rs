// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    ImageRef, NewPost, Post, PostContent, PostId, PostReadRepository, PostSlug, PostTitle,
    PostUpdate, PostWithAuthor, PostWriteRepository,
};
use crate::domain::user::{Author, UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
}

impl PostgresPostWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, title, slug, content, published, image_url, image_id, author_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    published: bool,
    image_url: Option<String>,
    image_id: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            slug: PostSlug::new(row.slug)?,
            content: PostContent::new(row.content)?,
            published: row.published,
            image: ImageRef::from_columns(row.image_url, row.image_id)?,
            author_id: UserId::new(row.author_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PostAuthorRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    published: bool,
    image_url: Option<String>,
    image_id: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    username: String,
    display_name: Option<String>,
    author_created_at: DateTime<Utc>,
}

impl TryFrom<PostAuthorRow> for PostWithAuthor {
    type Error = DomainError;

    fn try_from(row: PostAuthorRow) -> Result<Self, Self::Error> {
        let author = Author {
            id: UserId::new(row.author_id)?,
            username: Username::new(row.username)?,
            display_name: row.display_name,
            created_at: row.author_created_at,
        };
        let post = Post::try_from(PostRow {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            published: row.published,
            image_url: row.image_url,
            image_id: row.image_id,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })?;
        Ok(PostWithAuthor { post, author })
    }
}

const JOINED_SELECT: &str =
    "SELECT p.id, p.title, p.slug, p.content, p.published, p.image_url, p.image_id, \
     p.author_id, p.created_at, p.updated_at, \
     u.username, u.display_name, u.created_at AS author_created_at \
     FROM posts p JOIN users u ON u.id = p.author_id \
     WHERE p.deleted_at IS NULL";

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            slug,
            content,
            published,
            image,
            author_id,
            created_at,
            updated_at,
        } = post;

        let (image_url, image_id) = match image {
            Some(image) => (Some(image.url().to_string()), Some(image.asset_id().to_string())),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, slug, content, published, image_url, image_id, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(content.as_str())
        .bind(published)
        .bind(image_url)
        .bind(image_id)
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            slug,
            content,
            published,
            image,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            let title_str: String = title.into();
            builder.push(", title = ");
            builder.push_bind(title_str);
        }

        if let Some(slug) = slug {
            let slug_str: String = slug.into();
            builder.push(", slug = ");
            builder.push_bind(slug_str);
        }

        if let Some(content) = content {
            let content_str: String = content.into();
            builder.push(", content = ");
            builder.push_bind(content_str);
        }

        if let Some(published) = published {
            builder.push(", published = ");
            builder.push_bind(published);
        }

        if let Some(image) = image {
            builder.push(", image_url = ");
            builder.push_bind(image.url().to_string());
            builder.push(", image_id = ");
            builder.push_bind(image.asset_id().to_string());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND deleted_at IS NULL RETURNING ");
        builder.push(POST_COLUMNS);

        let maybe_row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row.ok_or_else(|| DomainError::NotFound("post not found".into()))?;
        Post::try_from(row)
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_with_author(&self, id: PostId) -> DomainResult<Option<PostWithAuthor>> {
        let query = format!("{JOINED_SELECT} AND p.id = $1");
        let row = sqlx::query_as::<_, PostAuthorRow>(&query)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(PostWithAuthor::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND deleted_at IS NULL"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn list_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<PostWithAuthor>> {
        let query =
            format!("{JOINED_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, PostAuthorRow>(&query)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(PostWithAuthor::try_from).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(total as u64)
    }
}
