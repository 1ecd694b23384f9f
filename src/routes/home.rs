use axum::{extract::State, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use uuid::Uuid;

use crate::components::{layout, post_list_component};
use crate::error::AppError;
use crate::models::post::PostPreview;
use crate::services::posts::{PostService, PostServiceDb};
use crate::services::tags::{TagService, TagServiceDb};
use crate::session::SessionKeys;

pub type HomeState = (PostServiceDb, TagServiceDb, SessionKeys);

async fn home(
    State((post_svc, tag_svc, keys)): State<HomeState>,
    jar: CookieJar,
) -> Result<Markup, AppError> {
    let user = keys.current_user(&jar);

    let rows = post_svc.list_published().await?;
    let ids: Vec<Uuid> = rows.iter().map(|(p, _)| p.id).collect();
    let mut tags_by_post = tag_svc.names_for_posts(&ids).await?;

    let previews: Vec<PostPreview> = rows
        .into_iter()
        .map(|(post, author_name)| {
            let tags = tags_by_post.remove(&post.id).unwrap_or_default();
            PostPreview {
                post,
                author_name,
                tags,
            }
        })
        .collect();

    Ok(layout::page(
        "Tech Blog",
        user.as_ref(),
        post_list_component::render(&previews),
    ))
}

pub fn router() -> Router<HomeState> {
    Router::new().route("/", get(home))
}
