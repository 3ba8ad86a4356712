// tests/support/mocks.rs
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use quill_core::application::ApplicationResult;
use quill_core::application::dto::AuthenticatedUser;
use quill_core::application::error::ApplicationError;
use quill_core::application::ports::assets::{
    AssetStore, AssetStoreError, ImagePayload, StoredAsset,
};
use quill_core::application::ports::security::TokenVerifier;
use quill_core::application::ports::time::Clock;
use quill_core::domain::errors::{DomainError, DomainResult};
use quill_core::domain::post::{
    NewPost, Post, PostId, PostReadRepository, PostSlug, PostUpdate, PostWithAuthor,
    PostWriteRepository,
};
use quill_core::domain::user::Author;

/// In-memory stand-in for the Postgres post tables. Enforces the same
/// invariants as the real store: slug uniqueness across non-deleted rows
/// and soft-deleted rows invisible to every read.
pub struct InMemoryPostStore {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    posts: Vec<Post>,
    authors: HashMap<i64, Author>,
    deleted: HashSet<i64>,
    next_id: i64,
    fail_next_insert: bool,
    fail_next_update: bool,
    hide_slug_matches: bool,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                posts: Vec::new(),
                authors: HashMap::new(),
                deleted: HashSet::new(),
                next_id: 1,
                fail_next_insert: false,
                fail_next_update: false,
                hide_slug_matches: false,
            }),
        }
    }

    pub fn add_author(&self, author: Author) {
        let mut inner = self.inner.lock().unwrap();
        inner.authors.insert(i64::from(author.id), author);
    }

    /// Insert a fully-formed post, keeping the id counter ahead of it.
    pub fn seed_post(&self, post: Post) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id = inner.next_id.max(i64::from(post.id) + 1);
        inner.posts.push(post);
    }

    pub fn soft_delete(&self, id: i64) {
        self.inner.lock().unwrap().deleted.insert(id);
    }

    pub fn fail_next_insert(&self) {
        self.inner.lock().unwrap().fail_next_insert = true;
    }

    pub fn fail_next_update(&self) {
        self.inner.lock().unwrap().fail_next_update = true;
    }

    /// Make `find_by_slug` report no match while the uniqueness check on
    /// write still fires, imitating a writer that lost the slug race.
    pub fn hide_slug_matches(&self) {
        self.inner.lock().unwrap().hide_slug_matches = true;
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        let inner = self.inner.lock().unwrap();
        inner
            .posts
            .iter()
            .find(|p| i64::from(p.id) == id && !inner.deleted.contains(&id))
            .cloned()
    }

    pub fn live_posts(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .posts
            .iter()
            .filter(|p| !inner.deleted.contains(&i64::from(p.id)))
            .count()
    }
}

impl StoreInner {
    fn slug_taken(&self, slug: &PostSlug, ignore_id: Option<PostId>) -> bool {
        self.posts.iter().any(|p| {
            p.slug == *slug && !self.deleted.contains(&i64::from(p.id)) && Some(p.id) != ignore_id
        })
    }
}

#[async_trait]
impl PostWriteRepository for InMemoryPostStore {
    async fn insert(&self, new_post: NewPost) -> DomainResult<Post> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_insert {
            inner.fail_next_insert = false;
            return Err(DomainError::Persistence("simulated insert failure".into()));
        }
        if inner.slug_taken(&new_post.slug, None) {
            return Err(DomainError::Conflict(format!(
                "a post with slug '{}' already exists",
                new_post.slug
            )));
        }

        let id = PostId::new(inner.next_id)?;
        inner.next_id += 1;
        let post = Post {
            id,
            title: new_post.title,
            slug: new_post.slug,
            content: new_post.content,
            published: new_post.published,
            image: new_post.image,
            author_id: new_post.author_id,
            created_at: new_post.created_at,
            updated_at: new_post.updated_at,
        };
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_update {
            inner.fail_next_update = false;
            return Err(DomainError::Persistence("simulated update failure".into()));
        }
        if let Some(slug) = &update.slug {
            if inner.slug_taken(slug, Some(update.id)) {
                return Err(DomainError::Conflict(format!(
                    "a post with slug '{slug}' already exists"
                )));
            }
        }

        let id = i64::from(update.id);
        if inner.deleted.contains(&id) {
            return Err(DomainError::NotFound("post not found".into()));
        }
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(slug) = update.slug {
            post.slug = slug;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(published) = update.published {
            post.published = published;
        }
        if let Some(image) = update.image {
            post.image = Some(image);
        }
        post.updated_at = update.updated_at;
        Ok(post.clone())
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostStore {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.post(i64::from(id)))
    }

    async fn find_with_author(&self, id: PostId) -> DomainResult<Option<PostWithAuthor>> {
        let inner = self.inner.lock().unwrap();
        let raw_id = i64::from(id);
        let Some(post) = inner
            .posts
            .iter()
            .find(|p| p.id == id && !inner.deleted.contains(&raw_id))
            .cloned()
        else {
            return Ok(None);
        };
        let author = inner
            .authors
            .get(&i64::from(post.author_id))
            .cloned()
            .ok_or_else(|| DomainError::Persistence("author row missing".into()))?;
        Ok(Some(PostWithAuthor { post, author }))
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let inner = self.inner.lock().unwrap();
        if inner.hide_slug_matches {
            return Ok(None);
        }
        Ok(inner
            .posts
            .iter()
            .find(|p| p.slug == *slug && !inner.deleted.contains(&i64::from(p.id)))
            .cloned())
    }

    async fn list_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<PostWithAuthor>> {
        let inner = self.inner.lock().unwrap();
        let mut live: Vec<&Post> = inner
            .posts
            .iter()
            .filter(|p| !inner.deleted.contains(&i64::from(p.id)))
            .collect();
        live.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(i64::from(b.id).cmp(&i64::from(a.id)))
        });

        live.into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|post| {
                let author = inner
                    .authors
                    .get(&i64::from(post.author_id))
                    .cloned()
                    .ok_or_else(|| DomainError::Persistence("author row missing".into()))?;
                Ok(PostWithAuthor {
                    post: post.clone(),
                    author,
                })
            })
            .collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.live_posts() as u64)
    }
}

/// Asset store double that tracks which assets are live, so tests can
/// observe orphan cleanup and delete-before-replace ordering.
pub struct RecordingAssetStore {
    inner: Mutex<AssetInner>,
}

struct AssetInner {
    live: HashSet<String>,
    uploads: u64,
    fail_next_upload: bool,
    fail_next_delete: bool,
}

impl RecordingAssetStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(AssetInner {
                live: HashSet::new(),
                uploads: 0,
                fail_next_upload: false,
                fail_next_delete: false,
            }),
        }
    }

    pub fn fail_next_upload(&self) {
        self.inner.lock().unwrap().fail_next_upload = true;
    }

    pub fn fail_next_delete(&self) {
        self.inner.lock().unwrap().fail_next_delete = true;
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.inner.lock().unwrap().live.contains(asset_id)
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn upload(
        &self,
        _payload: ImagePayload,
        namespace: &str,
    ) -> Result<StoredAsset, AssetStoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_upload {
            inner.fail_next_upload = false;
            return Err(AssetStoreError::Transport(
                "simulated upload failure".into(),
            ));
        }
        inner.uploads += 1;
        let asset_id = format!("{namespace}/img-{}", inner.uploads);
        inner.live.insert(asset_id.clone());
        Ok(StoredAsset {
            url: format!("https://assets.example.test/{asset_id}"),
            asset_id,
        })
    }

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_delete {
            inner.fail_next_delete = false;
            return Err(AssetStoreError::Transport(
                "simulated delete failure".into(),
            ));
        }
        if !inner.live.remove(asset_id) {
            return Err(AssetStoreError::Rejected("asset not found".into()));
        }
        Ok(())
    }
}

/// Clock that advances by one second per reading, so consecutive writes
/// get distinct, ordered timestamps.
pub struct TickingClock {
    ticks: Mutex<i64>,
}

impl TickingClock {
    pub fn new() -> Self {
        Self {
            ticks: Mutex::new(0),
        }
    }

    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut ticks = self.ticks.lock().unwrap();
        let now = Self::epoch() + Duration::seconds(*ticks);
        *ticks += 1;
        now
    }
}

/// Token verifier with a fixed token-to-user table.
pub struct StaticTokenVerifier {
    users: HashMap<String, AuthenticatedUser>,
}

impl StaticTokenVerifier {
    pub fn new(users: Vec<(&str, AuthenticatedUser)>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|(token, user)| (token.to_string(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| ApplicationError::unauthorized("invalid or expired token"))
    }
}
