use maud::{html, Markup};
use uuid::Uuid;

/// The like interaction is speculative on the client: app.js bumps the
/// visible count before the request goes out and restores it on failure,
/// then a successful response swaps in the server's re-render.
pub fn render(post_id: Uuid, count: i32) -> Markup {
    html! {
        button.like-button
            hx-post={ "/posts/" (post_id) "/like" }
            hx-swap="outerHTML"
            hx-disabled-elt="this"
        {
            span { "♥" }
            span.count { (count) }
        }
    }
}
