use anyhow::Context;
use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::models::like::NewPostLike;

use super::{Pool, Svc};

#[async_trait]
pub trait LikeService<E = anyhow::Error>: Svc {
    /// Record one like and return the new total, or `None` if the post is
    /// gone.
    async fn increment_like(&self, post_id: Uuid) -> Result<Option<i32>, E>;
}

#[derive(Clone)]
pub struct LikeServiceDb {
    db: Pool,
}

impl Svc for LikeServiceDb {}

#[async_trait]
impl LikeService<anyhow::Error> for LikeServiceDb {
    // Separate read and write, not an atomic `likes_count + 1` in SQL:
    // two concurrent likes can read the same value and one increment is
    // lost. Likes are anonymous and unlimited, the count is best-effort.
    async fn increment_like(&self, post_id: Uuid) -> anyhow::Result<Option<i32>> {
        use crate::schema::{post_likes, posts};

        let mut conn = self.db.get().await?;

        // A failed event insert aborts the whole like; the counter is
        // untouched. A failure after this point leaves an orphan event row.
        diesel::insert_into(post_likes::table)
            .values(&NewPostLike { post_id })
            .execute(&mut conn)
            .await
            .context("recording like event")?;

        let current: Option<i32> = posts::table
            .find(post_id)
            .select(posts::likes_count)
            .first(&mut conn)
            .await
            .optional()
            .context("reading likes count")?;

        let Some(current) = current else {
            return Ok(None);
        };

        let new_count = current + 1;
        diesel::update(posts::table.find(post_id))
            .set(posts::likes_count.eq(new_count))
            .execute(&mut conn)
            .await
            .context("writing likes count")?;

        Ok(Some(new_count))
    }
}

impl LikeServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}
