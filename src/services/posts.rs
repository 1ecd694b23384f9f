use axum::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::models::post::{NewPost, Post, PostChanges};

use super::{Pool, Svc};

#[async_trait]
pub trait PostService<E = anyhow::Error>: Svc {
    /// Published posts, newest first, with author display name.
    async fn list_published(&self) -> Result<Vec<(Post, String)>, E>;

    /// A single post with its author display name, published or not.
    async fn find_with_author(&self, post_id: Uuid) -> Result<Option<(Post, String)>, E>;

    /// All posts by one author, drafts included, newest first.
    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<Post>, E>;

    /// A post only if it belongs to the given author.
    async fn find_for_author(&self, post_id: Uuid, author_id: Uuid) -> Result<Option<Post>, E>;

    async fn create(&self, post: NewPost<'_>) -> Result<Post, E>;

    /// Author-filtered update; returns the number of rows matched, so a
    /// foreign post is a zero-row no-op rather than an error.
    async fn update(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        changes: PostChanges<'_>,
    ) -> Result<usize, E>;

    async fn set_published(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        publish: bool,
    ) -> Result<usize, E>;

    async fn delete(&self, post_id: Uuid, author_id: Uuid) -> Result<usize, E>;
}

#[derive(Clone)]
pub struct PostServiceDb {
    db: Pool,
}

impl Svc for PostServiceDb {}

#[async_trait]
impl PostService<anyhow::Error> for PostServiceDb {
    async fn list_published(&self) -> anyhow::Result<Vec<(Post, String)>> {
        use crate::schema::{posts, profiles};

        let mut conn = self.db.get().await?;
        let rows = posts::table
            .inner_join(profiles::table)
            .filter(posts::is_published.eq(true))
            .order(posts::created_at.desc())
            .select((Post::as_select(), profiles::display_name))
            .load::<(Post, String)>(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn find_with_author(&self, post_id: Uuid) -> anyhow::Result<Option<(Post, String)>> {
        use crate::schema::{posts, profiles};

        let mut conn = self.db.get().await?;
        let row = posts::table
            .inner_join(profiles::table)
            .filter(posts::id.eq(post_id))
            .select((Post::as_select(), profiles::display_name))
            .first::<(Post, String)>(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }

    async fn list_for_author(&self, author: Uuid) -> anyhow::Result<Vec<Post>> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let rows = posts
            .filter(author_id.eq(author))
            .order(created_at.desc())
            .select(Post::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn find_for_author(&self, post_id: Uuid, author: Uuid) -> anyhow::Result<Option<Post>> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let row = posts
            .filter(id.eq(post_id).and(author_id.eq(author)))
            .select(Post::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }

    async fn create(&self, post: NewPost<'_>) -> anyhow::Result<Post> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let created = diesel::insert_into(posts)
            .values(&post)
            .get_result::<Post>(&mut conn)
            .await?;
        Ok(created)
    }

    async fn update(
        &self,
        post_id: Uuid,
        author: Uuid,
        changes: PostChanges<'_>,
    ) -> anyhow::Result<usize> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let n = diesel::update(posts.filter(id.eq(post_id).and(author_id.eq(author))))
            .set(&changes)
            .execute(&mut conn)
            .await?;
        Ok(n)
    }

    async fn set_published(
        &self,
        post_id: Uuid,
        author: Uuid,
        publish: bool,
    ) -> anyhow::Result<usize> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let n = diesel::update(posts.filter(id.eq(post_id).and(author_id.eq(author))))
            .set((is_published.eq(publish), updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await?;
        Ok(n)
    }

    async fn delete(&self, post_id: Uuid, author: Uuid) -> anyhow::Result<usize> {
        use crate::schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let n = diesel::delete(posts.filter(id.eq(post_id).and(author_id.eq(author))))
            .execute(&mut conn)
            .await?;
        Ok(n)
    }
}

impl PostServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}
