// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CreatePostCommand, UpdatePostCommand},
    dto::{Paged, PostDto},
    error::ApplicationError,
    ports::assets::ImagePayload,
    queries::posts::{GetPostQuery, ListPostsQuery},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Inline image upload: file name plus base64-encoded bytes.
#[derive(Debug, Deserialize)]
pub struct ImageUploadRequest {
    pub file_name: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub image: Option<ImageUploadRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub image: Option<ImageUploadRequest>,
}

fn decode_image(request: Option<ImageUploadRequest>) -> Result<Option<ImagePayload>, HttpError> {
    let Some(request) = request else {
        return Ok(None);
    };

    let bytes = STANDARD.decode(request.data.as_bytes()).map_err(|_| {
        HttpError::from_error(ApplicationError::validation("image data must be valid base64"))
    })?;
    if bytes.is_empty() {
        return Err(HttpError::from_error(ApplicationError::validation(
            "image data cannot be empty",
        )));
    }

    Ok(Some(ImagePayload {
        file_name: request.file_name,
        bytes: Bytes::from(bytes),
    }))
}

pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PostListParams>,
) -> HttpResult<Json<Paged<PostDto>>> {
    state
        .services
        .post_queries
        .list_posts(ListPostsQuery {
            page: params.page,
            limit: params.limit,
        })
        .await
        .into_http()
        .map(Json)
}

pub async fn get_post(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post(GetPostQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn create_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<(StatusCode, Json<PostDto>)> {
    let command = CreatePostCommand {
        title: payload.title,
        content: payload.content,
        published: payload.published,
        image: decode_image(payload.image)?,
    };

    let created = state
        .services
        .post_commands
        .create_post(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        content: payload.content,
        published: payload.published,
        image: decode_image(payload.image)?,
    };

    state
        .services
        .post_commands
        .update_post(&user, command)
        .await
        .into_http()
        .map(Json)
}
