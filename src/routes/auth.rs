use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;

use crate::components::{auth_forms, layout};
use crate::error::AppError;
use crate::models::profile::{LoginForm, NewProfile, SignupForm};
use crate::services::accounts::{hash_password, verify_password, AccountService, AccountServiceDb};
use crate::session::{removal_cookie, session_cookie, SessionKeys};

pub type AuthState = (AccountServiceDb, SessionKeys);

async fn login_page(State((_, keys)): State<AuthState>, jar: CookieJar) -> Markup {
    let user = keys.current_user(&jar);
    layout::page("Log in", user.as_ref(), auth_forms::login(None))
}

async fn login(
    State((accounts, keys)): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.email.is_empty() || form.password.is_empty() {
        let body = auth_forms::login(Some("Email and password are required"));
        return Ok(layout::page("Log in", None, body).into_response());
    }

    let account = accounts
        .find_by_email(&form.email)
        .await?
        .filter(|p| verify_password(&form.password, &p.password_hash));

    let Some(account) = account else {
        let body = auth_forms::login(Some("Invalid email or password"));
        return Ok(layout::page("Log in", None, body).into_response());
    };

    let token = keys.mint(account.id, &account.display_name)?;
    Ok((jar.add(session_cookie(token)), Redirect::to("/admin")).into_response())
}

async fn signup_page(State((_, keys)): State<AuthState>, jar: CookieJar) -> Markup {
    let user = keys.current_user(&jar);
    layout::page("Sign up", user.as_ref(), auth_forms::signup(None))
}

async fn signup(
    State((accounts, keys)): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    if form.email.is_empty() || form.password.is_empty() || form.display_name.is_empty() {
        let body = auth_forms::signup(Some("All fields are required"));
        return Ok(layout::page("Sign up", None, body).into_response());
    }

    let password_hash = hash_password(&form.password)?;
    let created = accounts
        .create_account(NewProfile {
            email: &form.email,
            password_hash: &password_hash,
            display_name: &form.display_name,
        })
        .await;

    // Most likely a duplicate email; either way the form gets a generic
    // inline message rather than an error page.
    let account = match created {
        Ok(account) => account,
        Err(e) => {
            tracing::error!(err = %e, "signup failed");
            let body = auth_forms::signup(Some("Failed to create account"));
            return Ok(layout::page("Sign up", None, body).into_response());
        }
    };

    let token = keys.mint(account.id, &account.display_name)?;
    Ok((jar.add(session_cookie(token)), Redirect::to("/admin")).into_response())
}

async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to("/"))
}

pub fn router() -> Router<AuthState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}
