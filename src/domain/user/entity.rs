// src/domain/user/entity.rs
use crate::domain::user::value_objects::{UserId, Username};
use chrono::{DateTime, Utc};

/// The owning user of a post. This service has no user CRUD surface;
/// accounts are provisioned out of band and only read here.
#[derive(Debug, Clone)]
pub struct Author {
    pub id: UserId,
    pub username: Username,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
