use maud::{html, Markup};
use uuid::Uuid;

use crate::models::post::{Post, PostForm};

/// What the create/edit form displays; built either from a stored post or
/// from a rejected submission so entered values survive a validation error.
pub struct PostFormView {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: String,
    pub is_published: bool,
}

impl PostFormView {
    pub fn blank() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            image_url: None,
            tags: String::new(),
            is_published: false,
        }
    }

    pub fn from_post(post: &Post, tags: &[String]) -> Self {
        Self {
            id: Some(post.id),
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            tags: tags.join(", "),
            is_published: post.is_published,
        }
    }

    pub fn from_submission(form: &PostForm) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            content: form.content.clone(),
            image_url: form.image_url_opt().map(str::to_owned),
            tags: form.tags.clone(),
            is_published: form.publish_flag(),
        }
    }
}

pub fn image_preview(url: Option<&str>) -> Markup {
    html! {
        input type="hidden" name="image_url" value=(url.unwrap_or(""));
        @if let Some(url) = url {
            img.cover src=(url) alt="Cover image";
            button.button-secondary type="button"
                hx-get="/admin/uploads/clear"
                hx-target="#cover-image"
                hx-swap="innerHTML" { "Remove image" }
        } @else {
            p.empty-note { "No image" }
        }
    }
}

/// Fragment returned after an inline upload. The page script appends the
/// markdown to the content textarea; the visible snippet lets the author
/// paste it elsewhere instead.
pub fn inline_image_snippet(file_name: &str, url: &str) -> Markup {
    html! {
        p.empty-note { "Appended to the content:" }
        code { "![" (file_name) "](" (url) ")" }
    }
}

pub fn render(view: &PostFormView, error: Option<&str>) -> Markup {
    html! {
        form.stacked method="post" action="/admin/posts/save" {
            @if let Some(id) = view.id {
                input type="hidden" name="id" value=(id);
            }
            @if let Some(msg) = error {
                .error-banner { (msg) }
            }
            label for="title" { "Title" }
            input type="text" id="title" name="title" value=(view.title);

            label for="content" { "Content (Markdown)" }
            textarea id="content" name="content" { (view.content) }
            button.button-secondary type="button"
                hx-post="/admin/preview"
                hx-include="#content"
                hx-target="#content-preview"
                hx-swap="innerHTML" { "Preview" }
            #content-preview.markdown-body {}

            label { "Insert Image into Content" }
            #inline-image-result {}
            input type="file" name="file"
                hx-post="/admin/uploads/inline"
                hx-encoding="multipart/form-data"
                hx-target="#inline-image-result"
                hx-swap="innerHTML";

            label { "Cover Image" }
            #cover-image {
                (image_preview(view.image_url.as_deref()))
            }
            input type="file" name="file"
                hx-post="/admin/uploads"
                hx-encoding="multipart/form-data"
                hx-target="#cover-image"
                hx-swap="innerHTML";

            label for="tags" { "Tags (comma separated)" }
            input type="text" id="tags" name="tags" value=(view.tags);

            div {
                input type="checkbox" id="is_published" name="is_published"
                    value="true" checked[view.is_published];
                label for="is_published" { "Publish status" }
            }

            div {
                a.button-secondary href="/admin" { "Cancel" }
                button.button-primary type="submit" {
                    @if view.id.is_some() { "Update Post" } @else { "Save Post" }
                }
            }
        }
    }
}
