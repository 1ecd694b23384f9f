pub mod admin_table;
pub mod auth_forms;
pub mod layout;
pub mod like_button;
pub mod post;
pub mod post_detail;
pub mod post_form;
pub mod post_list_component;

use maud::{Markup, PreEscaped};

/// Markdown to HTML, as authored; no sanitization pass.
pub fn markdown(src: &str) -> Markup {
    let mut out = String::new();
    pulldown_cmark::html::push_html(&mut out, pulldown_cmark::Parser::new(src));
    PreEscaped(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_renders_headings_and_emphasis() {
        let html = markdown("# Title\n\nSome *body*.").into_string();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>body</em>"));
    }

    #[test]
    fn markdown_of_plain_text_is_a_paragraph() {
        assert_eq!(markdown("hello").into_string().trim(), "<p>hello</p>");
    }
}
