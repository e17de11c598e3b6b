use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::contact::{
    ContactForm, ContactSubmission, FailureKind, SubmissionStatus, honeypot, metadata, parser,
};
use crate::error::AppError;
use crate::site::SiteContent;
use crate::state::SharedState;
use crate::ui::{Dialog, UiQuery, UiState};
use crate::views::{self, FormView};

/// Hidden input telling which copy of the form (inline or modal) was used.
const VARIANT_FIELD: &str = "_variant";

/// Result of one relay, ready to be rendered as JSON or as the page.
struct Outcome {
    status: SubmissionStatus,
    failure: Option<FailureKind>,
    message: String,
    values: ContactSubmission,
}

impl Outcome {
    fn accepted(site: &SiteContent) -> Self {
        Self {
            status: SubmissionStatus::Success,
            failure: None,
            message: site.form.copy.success.clone(),
            values: ContactSubmission::default(),
        }
    }

    fn http_status(&self) -> StatusCode {
        match (self.status, self.failure) {
            (SubmissionStatus::Error, Some(FailureKind::Transport)) => StatusCode::BAD_GATEWAY,
            (SubmissionStatus::Error, _) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::OK,
        }
    }
}

pub async fn submit(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let site = state
        .sites
        .get(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown site '{slug}'")))?;

    let ip = metadata::client_ip(&headers, addr.ip(), &state.config.trusted_proxies);

    let fields = parser::parse_form(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;
    let modal = fields.get(VARIANT_FIELD).is_some_and(|v| v == "modal");

    if honeypot::is_spam(&fields, site.form.honeypot.as_deref()) {
        tracing::info!("Contact form for '{}' caught by honeypot, not relayed", site.slug);
        return render(&state, &site, &headers, modal, Outcome::accepted(&site));
    }

    let submission = ContactSubmission::from_fields(&fields);
    let missing = submission.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if site.interest(&submission.interest).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown interest '{}'",
            submission.interest
        )));
    }

    state
        .contact_limiter
        .check(
            &site.slug,
            ip,
            state.config.rate_limit,
            state.config.rate_window_secs,
        )
        .map_err(|retry_after| {
            tracing::warn!("Contact form for '{}' rate limited for {ip}", site.slug);
            AppError::RateLimited(retry_after)
        })?;

    let _ticket = state
        .in_flight
        .try_acquire(&site.slug, ip)
        .ok_or_else(|| AppError::Conflict("A submission is already in progress".to_string()))?;

    // Modal dismissal happens in the browser; no server-side timer.
    let form = ContactForm::new(
        Arc::new(site.form.endpoint.clone()),
        site.form.copy.fallback_error.clone(),
    );
    form.fill(submission.clone()).await;

    let status = form
        .submit(state.forms.as_ref())
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = match status {
        SubmissionStatus::Success => Outcome::accepted(&site),
        _ => Outcome {
            status,
            failure: form.failure().await,
            message: form
                .error_message()
                .await
                .unwrap_or_else(|| site.form.copy.fallback_error.clone()),
            values: submission,
        },
    };

    tracing::info!(
        "Contact submission for '{}' relayed: {}",
        site.slug,
        outcome.status.as_str()
    );

    render(&state, &site, &headers, modal, outcome)
}

fn render(
    state: &SharedState,
    site: &SiteContent,
    headers: &HeaderMap,
    modal: bool,
    outcome: Outcome,
) -> Result<Response, AppError> {
    let code = outcome.http_status();
    let success = outcome.status == SubmissionStatus::Success;
    let dismiss_after = crate::contact::SUCCESS_DISMISS_DELAY;

    if wants_json(headers) {
        let body = json!({
            "status": outcome.status,
            "message": outcome.message,
            "dismiss_after_ms": success.then(|| dismiss_after.as_millis() as u64),
        });
        return Ok((code, Json(body)).into_response());
    }

    let mut ui = UiState::from_query(
        site,
        &UiQuery::default(),
        super::pages::prefers_reduced_motion(headers),
    );
    if modal {
        ui.open_dialog(Dialog::Contact);
    }

    let form = FormView {
        values: outcome.values,
        status: outcome.status,
        error: (!success).then_some(outcome.message),
        dismiss_after_secs: (modal && success).then(|| dismiss_after.as_secs()),
    };

    let page = views::render_site_page(site, &state.sites, &ui, form)?;
    Ok((code, page).into_response())
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}
