use crate::domain::user::UserId;

/// The verified subject of a bearer token. Ownership checks compare this id
/// against the post's author.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}
