use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::models::profile::{NewProfile, Profile};

use super::{Pool, Svc};

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow!("hashing password: {e}"))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[async_trait]
pub trait AccountService<E = anyhow::Error>: Svc {
    async fn create_account(&self, profile: NewProfile<'_>) -> Result<Profile, E>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, E>;
    async fn find(&self, id: Uuid) -> Result<Option<Profile>, E>;
}

#[derive(Clone)]
pub struct AccountServiceDb {
    db: Pool,
}

impl Svc for AccountServiceDb {}

#[async_trait]
impl AccountService<anyhow::Error> for AccountServiceDb {
    async fn create_account(&self, profile: NewProfile<'_>) -> anyhow::Result<Profile> {
        use crate::schema::profiles::dsl::*;

        let mut conn = self.db.get().await?;
        let created = diesel::insert_into(profiles)
            .values(&profile)
            .get_result::<Profile>(&mut conn)
            .await?;
        Ok(created)
    }

    async fn find_by_email(&self, account_email: &str) -> anyhow::Result<Option<Profile>> {
        use crate::schema::profiles::dsl::*;

        let mut conn = self.db.get().await?;
        let row = profiles
            .filter(email.eq(account_email))
            .select(Profile::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }

    async fn find(&self, account_id: Uuid) -> anyhow::Result<Option<Profile>> {
        use crate::schema::profiles::dsl::*;

        let mut conn = self.db.get().await?;
        let row = profiles
            .find(account_id)
            .select(Profile::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }
}

impl AccountServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }
}
