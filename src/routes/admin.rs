use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use maud::Markup;
use serde::Deserialize;
use uuid::Uuid;

use crate::components::post_form::{self, PostFormView};
use crate::components::{self, admin_table, layout};
use crate::error::AppError;
use crate::models::post::{NewPost, PostChanges, PostForm};
use crate::services::posts::{PostService, PostServiceDb};
use crate::services::storage::{BlobStore, DiskBlobStore};
use crate::services::tags::{TagService, TagServiceDb};
use crate::session::SessionKeys;

pub type AdminState = (PostServiceDb, TagServiceDb, DiskBlobStore, SessionKeys);

async fn dashboard(
    State((post_svc, _, _, keys)): State<AdminState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(user) = keys.current_user(&jar) else {
        return Ok(Redirect::to("/login").into_response());
    };

    let posts = post_svc.list_for_author(user.id).await?;
    Ok(layout::page(
        "Dashboard",
        Some(&user),
        admin_table::render(&user.display_name, &posts),
    )
    .into_response())
}

async fn new_post(
    State((_, _, _, keys)): State<AdminState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(user) = keys.current_user(&jar) else {
        return Ok(Redirect::to("/login").into_response());
    };

    Ok(layout::page(
        "New Post",
        Some(&user),
        post_form::render(&PostFormView::blank(), None),
    )
    .into_response())
}

async fn edit_post(
    State((post_svc, tag_svc, _, keys)): State<AdminState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let Some(user) = keys.current_user(&jar) else {
        return Ok(Redirect::to("/login").into_response());
    };

    let post = post_svc
        .find_for_author(id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = tag_svc.names_for_post(id).await?;

    Ok(layout::page(
        "Edit Post",
        Some(&user),
        post_form::render(&PostFormView::from_post(&post, &tags), None),
    )
    .into_response())
}

/// Create-or-update, then reconcile tags, then back to the dashboard.
/// The tag step never fails the save: its errors are logged and swallowed.
#[tracing::instrument(skip_all)]
async fn save_post<P, T>(
    State((post_svc, tag_svc, _, keys)): State<(P, T, DiskBlobStore, SessionKeys)>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError>
where
    P: PostService + Clone + Send + Sync + 'static,
    T: TagService + Clone + Send + Sync + 'static,
{
    let user = keys.current_user(&jar).ok_or(AppError::Unauthorized)?;

    // Validation short-circuits before the store is touched.
    if let Err(msg) = form.validate() {
        let view = PostFormView::from_submission(&form);
        let title = if form.id.is_some() { "Edit Post" } else { "New Post" };
        return Ok(layout::page(title, Some(&user), post_form::render(&view, Some(msg)))
            .into_response());
    }

    let saved_id = match form.id {
        Some(id) => {
            let matched = post_svc
                .update(
                    id,
                    user.id,
                    PostChanges {
                        title: &form.title,
                        content: &form.content,
                        image_url: form.image_url_opt(),
                        is_published: form.publish_flag(),
                        updated_at: Utc::now(),
                    },
                )
                .await?;
            if matched == 0 {
                // Not this author's post; zero rows matched, nothing to do.
                tracing::warn!(%id, "update matched no rows");
                return Ok(Redirect::to("/admin").into_response());
            }
            id
        }
        None => {
            post_svc
                .create(NewPost {
                    author_id: user.id,
                    title: &form.title,
                    content: &form.content,
                    image_url: form.image_url_opt(),
                    is_published: form.publish_flag(),
                })
                .await?
                .id
        }
    };

    tag_svc.reconcile(saved_id, &form.tags).await;

    Ok(Redirect::to("/admin").into_response())
}

#[derive(Deserialize)]
struct ToggleForm {
    publish: bool,
}

async fn toggle_publish<P, T>(
    State((post_svc, _, _, keys)): State<(P, T, DiskBlobStore, SessionKeys)>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError>
where
    P: PostService + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    let user = keys.current_user(&jar).ok_or(AppError::Unauthorized)?;

    let matched = post_svc.set_published(id, user.id, form.publish).await?;
    if matched == 0 {
        tracing::debug!(%id, "toggle matched no rows");
    }
    Ok(Redirect::to("/admin"))
}

async fn delete_post<P, T>(
    State((post_svc, _, _, keys)): State<(P, T, DiskBlobStore, SessionKeys)>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError>
where
    P: PostService + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    let user = keys.current_user(&jar).ok_or(AppError::Unauthorized)?;

    let matched = post_svc.delete(id, user.id).await?;
    if matched == 0 {
        tracing::debug!(%id, "delete matched no rows");
    }
    Ok(Redirect::to("/admin"))
}

async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let original = field.file_name().unwrap_or("upload.bin").to_owned();
            let bytes = field.bytes().await?;
            return Ok((original, bytes));
        }
    }
    Err(anyhow!("multipart upload without a file field").into())
}

/// Multipart image upload; responds with the refreshed cover-image fragment
/// carrying the blob's public URL.
#[axum_macros::debug_handler]
async fn upload_image(
    State((_, _, blob_store, keys)): State<AdminState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Markup, AppError> {
    keys.current_user(&jar).ok_or(AppError::Unauthorized)?;

    let (original, bytes) = read_upload(multipart).await?;
    let url = blob_store.store(&original, &bytes).await?;
    Ok(post_form::image_preview(Some(&url)))
}

/// Upload for images embedded in the post body; responds with the markdown
/// snippet that references the stored blob.
async fn upload_inline_image(
    State((_, _, blob_store, keys)): State<AdminState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Markup, AppError> {
    keys.current_user(&jar).ok_or(AppError::Unauthorized)?;

    let (original, bytes) = read_upload(multipart).await?;
    let url = blob_store.store_inline(&original, &bytes).await?;
    Ok(post_form::inline_image_snippet(&original, &url))
}

/// Swaps the cover-image fragment back to its empty state. The blob itself
/// stays on disk; only the form's `image_url` is cleared.
async fn clear_image(
    State((_, _, _, keys)): State<AdminState>,
    jar: CookieJar,
) -> Result<Markup, AppError> {
    keys.current_user(&jar).ok_or(AppError::Unauthorized)?;
    Ok(post_form::image_preview(None))
}

#[derive(Deserialize)]
struct PreviewForm {
    #[serde(default)]
    content: String,
}

/// Editor preview fragment, rendered with the same pipeline as the detail
/// page.
async fn preview_markdown<P, T>(
    State((_, _, _, keys)): State<(P, T, DiskBlobStore, SessionKeys)>,
    jar: CookieJar,
    Form(form): Form<PreviewForm>,
) -> Result<Markup, AppError>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    keys.current_user(&jar).ok_or(AppError::Unauthorized)?;
    Ok(components::markdown(&form.content))
}

pub fn router() -> Router<AdminState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/posts/new", get(new_post))
        .route("/posts/:id/edit", get(edit_post))
        .route("/posts/save", post(save_post::<PostServiceDb, TagServiceDb>))
        .route(
            "/posts/:id/toggle",
            post(toggle_publish::<PostServiceDb, TagServiceDb>),
        )
        .route(
            "/posts/:id/delete",
            post(delete_post::<PostServiceDb, TagServiceDb>),
        )
        .route("/preview", post(preview_markdown::<PostServiceDb, TagServiceDb>))
        .route("/uploads", post(upload_image))
        .route("/uploads/inline", post(upload_inline_image))
        .route("/uploads/clear", get(clear_image))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::async_trait;
    use axum::http::StatusCode;

    use super::*;
    use crate::models::post::Post;
    use crate::services::Svc;
    use crate::session::session_cookie;

    // Every author-filtered mutation matches zero rows, as it would when the
    // target belongs to another author.
    #[derive(Clone)]
    struct ForeignPosts;

    impl Svc for ForeignPosts {}

    #[async_trait]
    impl PostService for ForeignPosts {
        async fn list_published(&self) -> anyhow::Result<Vec<(Post, String)>> {
            Ok(Vec::new())
        }

        async fn find_with_author(&self, _id: Uuid) -> anyhow::Result<Option<(Post, String)>> {
            Ok(None)
        }

        async fn list_for_author(&self, _author: Uuid) -> anyhow::Result<Vec<Post>> {
            Ok(Vec::new())
        }

        async fn find_for_author(&self, _id: Uuid, _author: Uuid) -> anyhow::Result<Option<Post>> {
            Ok(None)
        }

        async fn create(&self, _post: NewPost<'_>) -> anyhow::Result<Post> {
            unimplemented!("not exercised")
        }

        async fn update(
            &self,
            _id: Uuid,
            _author: Uuid,
            _changes: PostChanges<'_>,
        ) -> anyhow::Result<usize> {
            Ok(0)
        }

        async fn set_published(
            &self,
            _id: Uuid,
            _author: Uuid,
            _published: bool,
        ) -> anyhow::Result<usize> {
            Ok(0)
        }

        async fn delete(&self, _id: Uuid, _author: Uuid) -> anyhow::Result<usize> {
            Ok(0)
        }
    }

    #[derive(Clone)]
    struct NoopTags;

    impl Svc for NoopTags {}

    #[async_trait]
    impl TagService for NoopTags {
        async fn reconcile(&self, _post_id: Uuid, _raw: &str) {}

        async fn names_for_post(&self, _post_id: Uuid) -> anyhow::Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn names_for_posts(
            &self,
            _post_ids: &[Uuid],
        ) -> anyhow::Result<HashMap<Uuid, Vec<String>>> {
            Ok(HashMap::new())
        }
    }

    fn state(keys: &SessionKeys) -> (ForeignPosts, NoopTags, DiskBlobStore, SessionKeys) {
        (
            ForeignPosts,
            NoopTags,
            DiskBlobStore::new(std::env::temp_dir(), "/uploads"),
            keys.clone(),
        )
    }

    fn signed_in(keys: &SessionKeys) -> CookieJar {
        let token = keys.mint(Uuid::now_v7(), "Ada").unwrap();
        CookieJar::new().add(session_cookie(token))
    }

    #[tokio::test]
    async fn toggling_someone_elses_post_is_a_no_op() {
        let keys = SessionKeys::new("test-secret");
        let res = toggle_publish(
            State(state(&keys)),
            signed_in(&keys),
            Path(Uuid::now_v7()),
            Form(ToggleForm { publish: true }),
        )
        .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn deleting_someone_elses_post_is_a_no_op() {
        let keys = SessionKeys::new("test-secret");
        let res = delete_post(State(state(&keys)), signed_in(&keys), Path(Uuid::now_v7())).await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn updating_someone_elses_post_redirects_without_touching_tags() {
        let keys = SessionKeys::new("test-secret");
        let form = PostForm {
            id: Some(Uuid::now_v7()),
            title: "Title".into(),
            content: "Content".into(),
            image_url: String::new(),
            is_published: None,
            tags: "rust".into(),
        };
        let res = save_post(State(state(&keys)), signed_in(&keys), Form(form))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn mutating_without_a_session_is_unauthorized() {
        let keys = SessionKeys::new("test-secret");
        let res = delete_post(State(state(&keys)), CookieJar::new(), Path(Uuid::now_v7())).await;
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn preview_renders_markdown() {
        let keys = SessionKeys::new("test-secret");
        let markup = preview_markdown(
            State(state(&keys)),
            signed_in(&keys),
            Form(PreviewForm {
                content: "# Hello".into(),
            }),
        )
        .await
        .unwrap();
        assert!(markup.into_string().contains("<h1>Hello</h1>"));
    }
}
