//! Contact form: field model, submit state machine and the outbound hosted-form client.

pub mod client;
pub mod form;
pub mod honeypot;
pub mod metadata;
pub mod parser;
pub mod response;
pub mod submission;

pub use client::{FormEndpoint, FormService, HostedFormClient, TransportError};
pub use form::{
    ContactForm, FailureKind, FormVariant, SUCCESS_DISMISS_DELAY, SubmissionStatus, SubmitRefused,
};
pub use response::{ResponseContract, ServiceVerdict};
pub use submission::{ContactSubmission, FIELD_NAMES};
