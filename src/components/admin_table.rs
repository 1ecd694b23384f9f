use maud::{html, Markup};

use crate::models::post::Post;

pub fn render(display_name: &str, posts: &[Post]) -> Markup {
    html! {
        .admin-head {
            h1 { (display_name) "'s Posts Dashboard" }
            a.button-primary href="/admin/posts/new" { "Create New Post" }
        }
        table.admin-table {
            thead {
                tr {
                    th { "Title" }
                    th { "Status" }
                    th { "Created" }
                    th { "Likes" }
                    th { "Actions" }
                }
            }
            tbody {
                @if posts.is_empty() {
                    tr {
                        td colspan="5" {
                            p.empty-note { "No posts yet. Create your first one." }
                        }
                    }
                }
                @for post in posts {
                    tr {
                        td { (post.title) }
                        td {
                            @if post.is_published {
                                span.status-chip.published { "Published" }
                            } @else {
                                span.status-chip.draft { "Draft" }
                            }
                        }
                        td { (post.created_at.format("%Y/%m/%d")) }
                        td { (post.likes_count) }
                        td {
                            form method="post" action={ "/admin/posts/" (post.id) "/toggle" } {
                                input type="hidden" name="publish"
                                    value=(if post.is_published { "false" } else { "true" });
                                button.linklike type="submit" {
                                    @if post.is_published { "Unpublish" } @else { "Publish" }
                                }
                            }
                            a href={ "/admin/posts/" (post.id) "/edit" } { "Edit" }
                            form method="post" action={ "/admin/posts/" (post.id) "/delete" }
                                onsubmit="return confirm('Delete this post?')" {
                                button.linklike type="submit" { "Delete" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn post(title: &str, published: bool) -> Post {
        Post {
            id: Uuid::now_v7(),
            author_id: Uuid::now_v7(),
            title: title.into(),
            content: "c".into(),
            image_url: None,
            is_published: published,
            likes_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn table_lists_titles_and_statuses() {
        let html = render("Ada", &[post("Draft one", false), post("Live one", true)])
            .into_string();
        assert!(html.contains("Draft one"));
        assert!(html.contains("Live one"));
        assert!(html.contains("Draft"));
        assert!(html.contains("Published"));
    }

    #[test]
    fn toggle_form_carries_the_opposite_state() {
        let p = post("x", true);
        let html = render("Ada", std::slice::from_ref(&p)).into_string();
        assert!(html.contains("value=\"false\""));
        assert!(html.contains("Unpublish"));
    }

    #[test]
    fn empty_dashboard_renders_placeholder() {
        assert!(render("Ada", &[]).into_string().contains("No posts yet."));
    }
}
