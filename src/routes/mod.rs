pub mod contact;
pub mod pages;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn page_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/{site}", get(pages::site_redirect))
        .route("/{site}/", get(pages::site_page))
}

pub fn contact_routes() -> Router<SharedState> {
    Router::new().route("/{site}/contact", post(contact::submit))
}
