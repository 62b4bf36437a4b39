use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::media::host::ImageHost;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Image storage backend. Default: CloudinaryClient.
    pub images: Arc<dyn ImageHost>,
}
