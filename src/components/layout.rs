use maud::{html, Markup, DOCTYPE};

use crate::session::AuthUser;

pub fn page(title: &str, user: Option<&AuthUser>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/static/style.css";
                script src="https://unpkg.com/htmx.org@1.9.12" {}
                script src="/static/app.js" defer {}
            }
            body {
                header.site-header {
                    a.brand href="/" { "Tech Blog" }
                    nav {
                        @match user {
                            Some(u) => {
                                span { (u.display_name) }
                                a href="/admin" { "Dashboard" }
                                form method="post" action="/logout" {
                                    button.linklike type="submit" { "Log out" }
                                }
                            },
                            None => {
                                a href="/login" { "User Login" }
                            },
                        }
                    }
                }
                main.container { (body) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn anonymous_layout_offers_login() {
        let html = page("Home", None, html! { p { "hi" } }).into_string();
        assert!(html.contains("User Login"));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn layout_loads_the_page_script() {
        let html = page("Home", None, html! {}).into_string();
        assert!(html.contains("/static/app.js"));
    }

    #[test]
    fn signed_in_layout_shows_name_and_logout() {
        let user = AuthUser {
            id: Uuid::now_v7(),
            display_name: "Ada".into(),
        };
        let html = page("Home", Some(&user), html! {}).into_string();
        assert!(html.contains("Ada"));
        assert!(html.contains("Log out"));
        assert!(!html.contains("User Login"));
    }
}
