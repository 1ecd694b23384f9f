mod components;
mod config;
mod error;
mod helpers;
mod middleware;
mod models;
mod routes;
mod schema;
mod services;
mod session;

use anyhow::anyhow;
use axum::http::header;
use axum::Router;

use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use figment::{providers::Format, Figment};

use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::*;

use services::accounts::AccountServiceDb;
use services::likes::LikeServiceDb;
use services::posts::PostServiceDb;
use services::storage::DiskBlobStore;
use services::tags::TagServiceDb;
use session::SessionKeys;

use crate::middleware::logging::HttpLoggingExt;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: config::AppCfg = Figment::new()
        .merge(figment::providers::Json::file("appsettings.json"))
        .merge(figment::providers::Env::prefixed("APP_"))
        .extract()?;

    config::tracing::init();

    run_migrations(cfg.database_url.clone()).await?;

    // create a new connection pool with the default config
    let mgr =
        AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(&cfg.database_url);

    info!("Starting DB pool");
    let pool = Pool::builder(mgr)
        .max_size(10)
        .runtime(deadpool::Runtime::Tokio1)
        .build()?;

    let keys = SessionKeys::new(&cfg.session_secret);
    let post_svc = PostServiceDb::new(pool.clone());
    let tag_svc = TagServiceDb::new(pool.clone());
    let like_svc = LikeServiceDb::new(pool.clone());
    let account_svc = AccountServiceDb::new(pool.clone());

    let blob_store = DiskBlobStore::new(&cfg.uploads_dir, "/uploads");
    blob_store.ensure_root().await?;

    let app = Router::new()
        .merge(
            routes::home::router()
                .with_state((post_svc.clone(), tag_svc.clone(), keys.clone())),
        )
        .nest(
            "/posts",
            routes::posts::router().with_state((post_svc.clone(), like_svc, keys.clone())),
        )
        .merge(routes::auth::router().with_state((account_svc, keys.clone())))
        .nest(
            "/admin",
            routes::admin::router().with_state((post_svc, tag_svc, blob_store, keys)),
        )
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    header::HeaderValue::from_static("max-age=13420"),
                ))
                .layer(CompressionLayer::new())
                .service(tower_http::services::ServeDir::new("./static/")),
        )
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&cfg.uploads_dir),
        )
        .with_http_logging();

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!("starting listening at {}", cfg.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn run_migrations(database_url: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        use diesel::Connection;

        let mut conn = diesel::PgConnection::establish(&database_url)?;
        let ran = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("running migrations: {e}"))?;
        if !ran.is_empty() {
            info!(count = ran.len(), "applied pending migrations");
        }
        Ok(())
    })
    .await?
}
