use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

pub const MAX_TITLE_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl PostId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("post id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("title cannot be empty".into()));
        }
        if value.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::Validation(format!(
                "title cannot exceed {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PostTitle> for String {
    fn from(value: PostTitle) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSlug(String);

impl PostSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PostSlug> for String {
    fn from(value: PostSlug) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("content cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PostContent> for String {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

/// Reference to an externally hosted image asset. URL and provider asset id
/// always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    url: String,
    asset_id: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, asset_id: impl Into<String>) -> DomainResult<Self> {
        let url = url.into();
        let asset_id = asset_id.into();
        if url.trim().is_empty() || asset_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "image url and asset id cannot be empty".into(),
            ));
        }
        Ok(Self { url, asset_id })
    }

    /// Reassemble an image reference from storage columns, where both
    /// columns are NULL for posts without an image.
    pub fn from_columns(
        url: Option<String>,
        asset_id: Option<String>,
    ) -> DomainResult<Option<Self>> {
        match (url, asset_id) {
            (Some(url), Some(asset_id)) => Self::new(url, asset_id).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::Persistence(
                "image url and asset id columns are out of sync".into(),
            )),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }
}
