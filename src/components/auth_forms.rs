use maud::{html, Markup};

pub fn login(error: Option<&str>) -> Markup {
    html! {
        h1 { "Log in" }
        form.stacked method="post" action="/login" {
            @if let Some(msg) = error {
                .error-banner { (msg) }
            }
            label for="email" { "Email" }
            input type="email" id="email" name="email";
            label for="password" { "Password" }
            input type="password" id="password" name="password";
            button.button-primary type="submit" { "Log in" }
        }
        p { "No account yet? " a href="/signup" { "Sign up" } }
    }
}

pub fn signup(error: Option<&str>) -> Markup {
    html! {
        h1 { "Sign up" }
        form.stacked method="post" action="/signup" {
            @if let Some(msg) = error {
                .error-banner { (msg) }
            }
            label for="display_name" { "Display name" }
            input type="text" id="display_name" name="display_name";
            label for="email" { "Email" }
            input type="email" id="email" name="email";
            label for="password" { "Password" }
            input type="password" id="password" name="password";
            button.button-primary type="submit" { "Sign up" }
        }
        p { "Already registered? " a href="/login" { "Log in" } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_error_is_rendered() {
        let html = login(Some("Invalid email or password")).into_string();
        assert!(html.contains("Invalid email or password"));
    }

    #[test]
    fn signup_asks_for_display_name() {
        assert!(signup(None).into_string().contains("display_name"));
    }
}
