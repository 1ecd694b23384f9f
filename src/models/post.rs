use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost<'a> {
    pub author_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub is_published: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(treat_none_as_null = true)]
pub struct PostChanges<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

/// A published post joined with its author and tag names, as shown on the
/// public listing.
#[derive(Debug, Clone)]
pub struct PostPreview {
    pub post: Post,
    pub author_name: String,
    pub tags: Vec<String>,
}

// the input to the save-post handler
#[derive(Deserialize, Debug)]
pub struct PostForm {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    // checkbox: present with value "true" when checked, absent otherwise
    pub is_published: Option<String>,
    #[serde(default)]
    pub tags: String,
}

impl PostForm {
    /// Checked before any store contact.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err("Title and Content are required");
        }
        Ok(())
    }

    pub fn publish_flag(&self) -> bool {
        self.is_published.as_deref() == Some("true")
    }

    pub fn image_url_opt(&self) -> Option<&str> {
        if self.image_url.is_empty() {
            None
        } else {
            Some(&self.image_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, content: &str) -> PostForm {
        PostForm {
            id: None,
            title: title.into(),
            content: content.into(),
            image_url: String::new(),
            is_published: None,
            tags: String::new(),
        }
    }

    #[test]
    fn empty_title_fails_validation() {
        assert!(form("", "body").validate().is_err());
    }

    #[test]
    fn empty_content_fails_validation() {
        assert!(form("title", "").validate().is_err());
    }

    #[test]
    fn non_empty_fields_pass() {
        assert!(form("Hello", "World").validate().is_ok());
    }

    #[test]
    fn checkbox_semantics() {
        let mut f = form("t", "c");
        assert!(!f.publish_flag());
        f.is_published = Some("true".into());
        assert!(f.publish_flag());
        f.is_published = Some("on".into());
        assert!(!f.publish_flag());
    }

    #[test]
    fn blank_image_url_maps_to_none() {
        let mut f = form("t", "c");
        assert_eq!(f.image_url_opt(), None);
        f.image_url = "/uploads/a.png".into();
        assert_eq!(f.image_url_opt(), Some("/uploads/a.png"));
    }
}
