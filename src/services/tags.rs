use std::collections::HashMap;

use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::helpers::OkLogged;
use crate::models::tag::{NewPostTag, NewTag, Tag};

use super::{Pool, Svc};

/// Split a raw comma-separated tag string into names: trim whitespace, drop
/// empties. Repeated names survive parsing; the resolve step collapses them
/// by name anyway.
pub fn parse_tag_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[async_trait]
pub trait TagService<E = anyhow::Error>: Svc {
    /// Make the post's tag associations match the parsed name set.
    ///
    /// Every step logs and swallows its own failures: reconciliation never
    /// rolls back the post save that preceded it, so a save can succeed
    /// with tags partially or fully unset.
    async fn reconcile(&self, post_id: Uuid, raw: &str);

    async fn names_for_post(&self, post_id: Uuid) -> Result<Vec<String>, E>;
    async fn names_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>, E>;
}

#[derive(Clone)]
pub struct TagServiceDb {
    db: Pool,
}

impl Svc for TagServiceDb {}

#[async_trait]
impl TagService<anyhow::Error> for TagServiceDb {
    async fn reconcile(&self, post_id: Uuid, raw: &str) {
        use crate::schema::{post_tags, tags};

        let names = parse_tag_names(raw);

        let Some(mut conn) = self.db.get().await.ok_logged("tags: get connection") else {
            return;
        };

        // Ensure existence. Names that already have a row are conflicts we
        // ignore; a partial failure here still lets resolution proceed with
        // whatever rows exist.
        if !names.is_empty() {
            let rows: Vec<NewTag> = names.iter().map(|n| NewTag { name: n }).collect();
            diesel::insert_into(tags::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(&mut conn)
                .await
                .ok_logged("tags: ensure tag rows");
        }

        // Resolve names to ids. Names that still have no row are dropped
        // silently from the association set.
        let by_name: HashMap<String, Uuid> = if names.is_empty() {
            HashMap::new()
        } else {
            match tags::table
                .filter(tags::name.eq_any(&names))
                .load::<Tag>(&mut conn)
                .await
                .ok_logged("tags: resolve names")
            {
                Some(found) => found.into_iter().map(|t| (t.name, t.id)).collect(),
                None => return,
            }
        };

        // Replace wholesale: delete everything, insert the resolved set.
        // Not transactional; a reader between the two statements sees zero
        // tags for an instant.
        let deleted = diesel::delete(post_tags::table.filter(post_tags::post_id.eq(post_id)))
            .execute(&mut conn)
            .await
            .ok_logged("tags: clear associations");
        if deleted.is_none() {
            return;
        }

        let links: Vec<NewPostTag> = by_name
            .values()
            .map(|&tag_id| NewPostTag { post_id, tag_id })
            .collect();
        if !links.is_empty() {
            diesel::insert_into(post_tags::table)
                .values(&links)
                .execute(&mut conn)
                .await
                .ok_logged("tags: insert associations");
        }
    }

    async fn names_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<String>> {
        use crate::schema::{post_tags, tags};

        let mut conn = self.db.get().await?;
        let names = post_tags::table
            .inner_join(tags::table)
            .filter(post_tags::post_id.eq(post_id))
            .select(tags::name)
            .load::<String>(&mut conn)
            .await?;
        Ok(names)
    }

    async fn names_for_posts(&self, post_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, Vec<String>>> {
        use crate::schema::{post_tags, tags};

        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.db.get().await?;
        let rows: Vec<(Uuid, String)> = post_tags::table
            .inner_join(tags::table)
            .filter(post_tags::post_id.eq_any(post_ids))
            .select((post_tags::post_id, tags::name))
            .load(&mut conn)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (pid, name) in rows {
            grouped.entry(pid).or_default().push(name);
        }
        Ok(grouped)
    }
}

impl TagServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_and_trims() {
        assert_eq!(parse_tag_names("go, rust"), vec!["go", "rust"]);
        assert_eq!(parse_tag_names("  a ,b,  c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_drops_empty_segments() {
        assert_eq!(parse_tag_names("a,,b,   ,"), vec!["a", "b"]);
        assert!(parse_tag_names("").is_empty());
        assert!(parse_tag_names(" , ,").is_empty());
    }

    #[test]
    fn parse_keeps_repeated_names() {
        assert_eq!(parse_tag_names("rust, rust"), vec!["rust", "rust"]);
    }

    #[test]
    fn parse_preserves_inner_whitespace_and_case() {
        assert_eq!(
            parse_tag_names("Systems Programming, Rust"),
            vec!["Systems Programming", "Rust"]
        );
    }
}
