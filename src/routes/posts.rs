use anyhow::Context;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use uuid::Uuid;

use crate::components::{layout, like_button, post_detail};
use crate::error::AppError;
use crate::services::likes::{LikeService, LikeServiceDb};
use crate::services::posts::{PostService, PostServiceDb};
use crate::session::SessionKeys;

pub type PostsState = (PostServiceDb, LikeServiceDb, SessionKeys);

async fn show_post(
    State((post_svc, _, keys)): State<PostsState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Markup, AppError> {
    let user = keys.current_user(&jar);
    let (post, author_name) = post_svc
        .find_with_author(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(layout::page(
        &post.title,
        user.as_ref(),
        post_detail::render(&post, &author_name),
    ))
}

/// Returns the re-rendered like button fragment; the caller's htmx swap
/// either confirms the new count or, on error, keeps the old one.
#[tracing::instrument(skip_all, fields(post_id = %id))]
async fn like_post(
    State((_, like_svc, _)): State<PostsState>,
    Path(id): Path<Uuid>,
) -> Result<Markup, AppError> {
    let new_count = like_svc
        .increment_like(id)
        .await
        .context("like failed")?
        .ok_or(AppError::NotFound)?;

    Ok(like_button::render(id, new_count))
}

pub fn router() -> Router<PostsState> {
    Router::new()
        .route("/:id", get(show_post))
        .route("/:id/like", post(like_post))
}
