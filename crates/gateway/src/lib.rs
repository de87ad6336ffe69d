//! Newsroom API Gateway
//!
//! Route table and request handlers for the article API. The binary in
//! `main.rs` wires configuration, logging and the database pool around it.

pub mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use newsroom_common::{
    config::AppConfig,
    errors::Result,
    ArticleStore, DbPool, MemoryArticleStore, SqlArticleStore, ARTICLES_BASE_PATH,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ArticleStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Open the article store named by `database.url`
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn ArticleStore>> {
    if config.uses_memory_store() {
        warn!("Using in-memory article store; data is lost on exit");
        return Ok(Arc::new(MemoryArticleStore::new()));
    }

    let pool = DbPool::new(&config.database).await?;
    Ok(Arc::new(SqlArticleStore::new(pool)))
}

/// Article routes, relative to `ARTICLES_BASE_PATH`.
///
/// Static segments win over `/{id}`, so `/categories` is never read as an id.
fn article_routes() -> Router<AppState> {
    use handlers::articles;

    Router::new()
        .route("/", get(articles::list_articles).post(articles::create_article))
        .route("/categories", get(articles::list_categories))
        .route("/by-category/{category_id}", get(articles::list_articles_by_category))
        .route("/with-journalist/{id}", get(articles::get_article_with_journalist))
        .route("/by-journalist/{id}", get(articles::list_articles_by_journalist))
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // The browser client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // `nest` only matches the bare prefix for "/", so the slash form is explicit
        .route(
            &format!("{ARTICLES_BASE_PATH}/"),
            get(handlers::articles::list_articles).post(handlers::articles::create_article),
        )
        .nest(ARTICLES_BASE_PATH, article_routes())
        .layer(from_fn(middleware::metrics::track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

/// Router exposing the Prometheus scrape endpoint
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    info!("Serving Prometheus metrics on /metrics");
    Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    )
}
