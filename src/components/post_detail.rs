use maud::{html, Markup};

use crate::components::{like_button, markdown};
use crate::models::post::Post;

pub fn render(post: &Post, author_name: &str) -> Markup {
    html! {
        article.post-detail {
            a href="/" { "← Back to all posts" }
            h1 { (post.title) }
            .post-meta {
                time datetime=(post.created_at.to_rfc3339()) {
                    (post.created_at.format("%Y/%m/%d %H:%M"))
                }
                span { (author_name) }
            }
            @if let Some(url) = &post.image_url {
                img.cover src=(url) alt=(post.title);
            }
            .markdown-body {
                (markdown(&post.content))
            }
            .like-section {
                p { "Liked this post?" }
                (like_button::render(post.id, post.likes_count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn detail_renders_markdown_body_and_like_button() {
        let post = Post {
            id: Uuid::now_v7(),
            author_id: Uuid::now_v7(),
            title: "Hello".into(),
            content: "# Heading\n\ntext".into(),
            image_url: None,
            is_published: true,
            likes_count: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let html = render(&post, "Ada").into_string();
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("hx-post"));
        assert!(html.contains("Ada"));
    }
}
