mod auth;
mod case_studies;
mod config;
mod db;
mod education;
mod errors;
mod experiences;
mod extract;
mod media;
mod models;
mod ordering;
mod profile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::store::ensure_admin;
use crate::config::Config;
use crate::db::create_pool;
use crate::media::cloudinary::CloudinaryClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting folio v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    let db = create_pool(&config.database_url).await?;

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        ensure_admin(&db, username, password).await?;
    }

    let images = CloudinaryClient::new(
        config.cloudinary_base_url.clone(),
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
    )?;
    info!(
        "Image host initialized (cloud: {})",
        config.cloudinary_cloud_name
    );

    let state = AppState {
        db,
        config: config.clone(),
        images: Arc::new(images),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
