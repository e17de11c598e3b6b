use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;

use super::client::{FormEndpoint, FormService};
use super::response::ServiceVerdict;
use super::submission::{ContactSubmission, UnknownField};

/// How long a modal form stays open after a successful submission.
pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    #[default]
    Inline,
    /// Lives in a dialog that closes itself after a successful send.
    Modal,
}

/// What went wrong on the last attempt that ended in `SubmissionStatus::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered and said no.
    Rejected,
    /// No usable answer: network error, timeout or a non-JSON body.
    Transport,
}

/// Why `submit` returned without contacting the form service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRefused {
    InFlight,
    Incomplete(Vec<&'static str>),
}

impl std::fmt::Display for SubmitRefused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitRefused::InFlight => write!(f, "A submission is already in progress"),
            SubmitRefused::Incomplete(missing) => {
                write!(f, "Missing required fields: {}", missing.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitRefused {}

#[derive(Debug, Default)]
struct FormState {
    fields: ContactSubmission,
    status: SubmissionStatus,
    error: Option<String>,
    failure: Option<FailureKind>,
    modal_open: bool,
    attempt: u64,
}

/// A single contact form instance: its field values, submission status and,
/// for the modal variant, whether its dialog is open.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct ContactForm {
    state: Arc<Mutex<FormState>>,
    endpoint: Arc<FormEndpoint>,
    fallback_message: Arc<str>,
    variant: FormVariant,
    dismiss_after: Duration,
}

impl ContactForm {
    pub fn new(endpoint: Arc<FormEndpoint>, fallback_message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            endpoint,
            fallback_message: Arc::from(fallback_message.into()),
            variant: FormVariant::Inline,
            dismiss_after: SUCCESS_DISMISS_DELAY,
        }
    }

    pub fn modal(mut self) -> Self {
        self.variant = FormVariant::Modal;
        self
    }

    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_after = delay;
        self
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    pub async fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.state.lock().await.fields.set(name, value)
    }

    pub async fn fill(&self, fields: ContactSubmission) {
        self.state.lock().await.fields = fields;
    }

    pub async fn fields(&self) -> ContactSubmission {
        self.state.lock().await.fields.clone()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state.lock().await.status
    }

    pub async fn error_message(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn failure(&self) -> Option<FailureKind> {
        self.state.lock().await.failure
    }

    pub async fn open_modal(&self) {
        self.state.lock().await.modal_open = true;
    }

    pub async fn close_modal(&self) {
        self.state.lock().await.modal_open = false;
    }

    pub async fn is_modal_open(&self) -> bool {
        self.state.lock().await.modal_open
    }

    /// Send the current fields to the form service once.
    ///
    /// Refused without any network call while a previous submit is still
    /// pending or while a required field is empty. Service and transport
    /// failures are not errors here; they land in `status()` / `error_message()`.
    pub async fn submit(&self, service: &dyn FormService) -> Result<SubmissionStatus, SubmitRefused> {
        let (snapshot, attempt) = {
            let mut state = self.state.lock().await;
            if state.status == SubmissionStatus::Submitting {
                return Err(SubmitRefused::InFlight);
            }
            let missing = state.fields.missing_fields();
            if !missing.is_empty() {
                return Err(SubmitRefused::Incomplete(missing));
            }
            state.status = SubmissionStatus::Submitting;
            state.error = None;
            state.failure = None;
            state.attempt += 1;
            (state.fields.clone(), state.attempt)
        };

        let (verdict, kind) = match service.post(&self.endpoint, &snapshot).await {
            Ok(body) => (self.endpoint.response.interpret(&body), FailureKind::Rejected),
            Err(e) => {
                tracing::warn!("Contact form transport failure: {e}");
                (ServiceVerdict::Rejected(None), FailureKind::Transport)
            }
        };

        let mut state = self.state.lock().await;
        match verdict {
            ServiceVerdict::Accepted => {
                state.status = SubmissionStatus::Success;
                state.fields.clear();
                if self.variant == FormVariant::Modal {
                    self.schedule_dismiss(attempt);
                }
            }
            ServiceVerdict::Rejected(message) => {
                state.status = SubmissionStatus::Error;
                state.failure = Some(kind);
                state.error = Some(message.unwrap_or_else(|| self.fallback_message.to_string()));
            }
        }

        Ok(state.status)
    }

    fn schedule_dismiss(&self, attempt: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().await;
            // A newer attempt owns the status now.
            if state.attempt == attempt && state.status == SubmissionStatus::Success {
                state.modal_open = false;
                state.status = SubmissionStatus::Idle;
            }
        });
    }
}
