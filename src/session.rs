use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "inkpress_session";

const ISSUER: &str = "inkpress";
const SESSION_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    name: String,
    iat: i64,
    exp: i64,
    iss: String,
}

/// The identity carried by a valid session cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub display_name: String,
}

#[derive(Clone)]
pub struct SessionKeys {
    enc: EncodingKey,
    dec: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret.as_bytes()),
            dec: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn mint(&self, user_id: Uuid, display_name: &str) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            name: display_name.to_owned(),
            iat: now.timestamp(),
            exp: (now + TimeDelta::hours(SESSION_HOURS)).timestamp(),
            iss: ISSUER.to_owned(),
        };
        Ok(encode(&Header::default(), &claims, &self.enc)?)
    }

    /// An invalid, expired, or foreign token is simply "no current user".
    pub fn verify(&self, token: &str) -> Option<AuthUser> {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);
        let data = decode::<Claims>(token, &self.dec, &validation).ok()?;
        Some(AuthUser {
            id: data.claims.sub,
            display_name: data.claims.name,
        })
    }

    pub fn current_user(&self, jar: &CookieJar) -> Option<AuthUser> {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| self.verify(cookie.value()))
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_and_verify_round_trip() {
        let keys = SessionKeys::new("test-secret");
        let id = Uuid::now_v7();

        let token = keys.mint(id, "Ada").unwrap();
        let user = keys.verify(&token).unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.display_name, "Ada");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let keys = SessionKeys::new("test-secret");
        let other = SessionKeys::new("other-secret");

        let token = keys.mint(Uuid::now_v7(), "Ada").unwrap();
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = SessionKeys::new("test-secret");
        assert!(keys.verify("not-a-jwt").is_none());
    }

    #[test]
    fn cookie_is_http_only() {
        let cookie = session_cookie("tok".into());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
