use crate::models::post::PostPreview;
use maud::{html, Markup};

pub fn render(posts: &[PostPreview]) -> Markup {
    html! {
        @if posts.is_empty() {
            p.empty-note { "No posts yet." }
        } @else {
            @for post in posts {
                ( post )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_renders_placeholder() {
        assert!(render(&[]).into_string().contains("No posts yet."));
    }
}
