pub mod like;
pub mod post;
pub mod profile;
pub mod tag;
