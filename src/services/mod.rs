pub mod accounts;
pub mod likes;
pub mod posts;
pub mod storage;
pub mod tags;

pub type Pool = diesel_async::pooled_connection::deadpool::Pool<diesel_async::AsyncPgConnection>;

pub trait Svc {}
