use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::state::SharedState;
use crate::ui::{UiQuery, UiState};
use crate::views::{self, FormView};

/// Client hint sent by browsers when the visitor asked for less motion.
const REDUCED_MOTION_HINT: &str = "sec-ch-prefers-reduced-motion";

pub async fn index(State(state): State<SharedState>) -> Result<Response, AppError> {
    // A single gym has nothing to choose between.
    if state.sites.len() == 1 {
        if let Some(site) = state.sites.iter().next() {
            return Ok(Redirect::temporary(&format!("/{}/", site.slug)).into_response());
        }
    }

    Ok(views::index::render_index(&state.sites)?.into_response())
}

pub async fn site_redirect(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    let site = state
        .sites
        .get(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown site '{slug}'")))?;

    Ok(Redirect::permanent(&format!("/{}/", site.slug)))
}

pub async fn site_page(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<UiQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let site = state
        .sites
        .get(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown site '{slug}'")))?;

    let ui = UiState::from_query(&site, &query, prefers_reduced_motion(&headers));
    views::render_site_page(&site, &state.sites, &ui, FormView::default())
}

pub(crate) fn prefers_reduced_motion(headers: &HeaderMap) -> bool {
    headers
        .get(REDUCED_MOTION_HINT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("reduce"))
}
