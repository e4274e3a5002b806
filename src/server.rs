use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;
use crate::session::SessionStore;
use crate::tmdb::MovieApi;
use crate::view::Renderer;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn MovieApi>,
    pub renderer: Arc<Renderer>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: &Config, api: Arc<dyn MovieApi>, renderer: Renderer) -> Self {
        let sessions = SessionStore::new(&config.default_query, &config.session);
        Self {
            api,
            renderer: Arc::new(renderer),
            sessions: Arc::new(sessions),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let card_routes = Router::new()
        .route("/card/:generation/:id/details", post(handlers::card_details))
        .route("/card/:generation/:id/close", post(handlers::card_close))
        .route("/card/:generation/:id/click", post(handlers::card_click))
        .route(
            "/card/:generation/:id/poster-error",
            post(handlers::poster_error),
        );

    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::submit_search))
        .route(
            "/api/placeholder/:width/:height",
            get(handlers::placeholder_image),
        )
        .route("/robots.txt", get(robots_txt_handler))
        .merge(card_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    tracing::debug!(uri = %req.uri(), "no route");
    StatusCode::NOT_FOUND
}
