use maud::{html, Markup};

use crate::models::post::PostPreview;

impl maud::Render for PostPreview {
    fn render(&self) -> Markup {
        html! {
            article.post-card {
                .meta {
                    time datetime=(self.post.created_at.to_rfc3339()) {
                        (self.post.created_at.format("%Y/%m/%d"))
                    }
                    span { (self.author_name) }
                    span { "♥ " (self.post.likes_count) }
                }
                @if let Some(url) = &self.post.image_url {
                    img.cover src=(url) alt=(self.post.title);
                }
                h3 {
                    a href={ "/posts/" (self.post.id) } { (self.post.title) }
                }
                @if !self.tags.is_empty() {
                    .tags {
                        @for tag in &self.tags {
                            span.tag-chip { (tag) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use maud::Render;
    use uuid::Uuid;

    use crate::models::post::{Post, PostPreview};

    fn preview() -> PostPreview {
        PostPreview {
            post: Post {
                id: Uuid::now_v7(),
                author_id: Uuid::now_v7(),
                title: "Hello".into(),
                content: "World".into(),
                image_url: None,
                is_published: true,
                likes_count: 5,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            author_name: "Ada".into(),
            tags: vec!["go".into(), "rust".into()],
        }
    }

    #[test]
    fn card_shows_title_author_and_tags() {
        let html = preview().render().into_string();
        assert!(html.contains("Hello"));
        assert!(html.contains("Ada"));
        assert!(html.contains("go"));
        assert!(html.contains("rust"));
        assert!(html.contains("♥ 5"));
    }

    #[test]
    fn card_links_to_the_detail_page() {
        let p = preview();
        let html = p.render().into_string();
        assert!(html.contains(&format!("/posts/{}", p.post.id)));
    }
}
