//! Dev server for the demo users resource: in-memory SQLite, schema from
//! the entity, list endpoint on `GET /users`.

use anyhow::Context;
use sea_orm::{ConnectionTrait, Database, Schema};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use users_admin::api::{router, AppState};
use users_admin::entity;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db = Database::connect("sqlite::memory:")
        .await
        .context("connect sqlite")?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(entity::Entity)))
        .await
        .context("create users table")?;

    // React-Admin runs in the browser; without CORS the dev frontend
    // cannot reach this server at all.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = router(AppState::new(db)).layer(cors);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .context("bind 127.0.0.1:8080")?;
    tracing::info!("users-admin dev server on http://127.0.0.1:8080");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
