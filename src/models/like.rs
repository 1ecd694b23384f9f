use diesel::prelude::*;
use uuid::Uuid;

/// Anonymous like event. No liker identity, no dedup; append-only.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::post_likes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPostLike {
    pub post_id: Uuid,
}
