pub mod config;
pub mod contact;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod site;
pub mod state;
pub mod ui;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::contact::FormService;
use crate::rate_limit::{ContactRateLimiter, InFlightGuard};
use crate::site::SiteRegistry;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config, sites: SiteRegistry, forms: Arc<dyn FormService>) -> Router {
    let static_dir = config.static_dir.clone();
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        config,
        sites,
        forms,
        contact_limiter: ContactRateLimiter::new(),
        in_flight: InFlightGuard::new(),
    });

    spawn_limiter_sweeper(&state);

    Router::new()
        .merge(routes::page_routes())
        .merge(routes::contact_routes().layer(RequestBodyLimitLayer::new(max_body_size)))
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("accept-ch"),
            HeaderValue::from_static("Sec-CH-Prefers-Reduced-Motion"),
        ))
        .with_state(state)
}

/// Drop expired rate-limit windows periodically. Stops once the app is dropped.
fn spawn_limiter_sweeper(state: &SharedState) {
    let window = Duration::from_secs(state.config.rate_window_secs.max(1));
    let state = Arc::downgrade(state);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(window.max(Duration::from_secs(60)));
        loop {
            tick.tick().await;
            let Some(state) = state.upgrade() else {
                break;
            };
            state.contact_limiter.cleanup(window);
        }
    });
}

async fn health() -> &'static str {
    "ok"
}
