//! Observer trait for interface-agnostic submission updates
//!
//! This trait allows different front ends (CLI, web view, etc.) to follow
//! the submission state machine and to react to the delayed navigation.

use crate::inquiry::FieldErrors;
use async_trait::async_trait;
use std::fmt;

/// Why a submission attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Field-level errors returned by the server
    Fields(FieldErrors),
    /// A single human-readable message
    Message(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(errors) => {
                let parts: Vec<String> = errors.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                f.write_str(&parts.join("; "))
            }
            Self::Message(msg) => f.write_str(msg),
        }
    }
}

/// Submission pipeline state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// Ready for a submission
    Idle,
    /// Checking the form
    Validating,
    /// Form rejected locally; returns to `Idle`
    Invalid(FieldErrors),
    /// POST in flight
    Submitting,
    /// Inquiry accepted; navigation follows after the configured delay
    Submitted {
        /// Confirmation shown to the customer
        confirmation: String,
    },
    /// Inquiry rejected or not delivered; returns to `Idle`
    SubmitFailed(FailureReason),
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Validating => write!(f, "Validating"),
            Self::Invalid(errors) => write!(f, "Invalid ({} fields)", errors.len()),
            Self::Submitting => write!(f, "Submitting"),
            Self::Submitted { .. } => write!(f, "Submitted"),
            Self::SubmitFailed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// Submission observer trait
///
/// Implement this trait to follow a submission.
/// - CLI implementations can print to the terminal
/// - UI bindings can toggle spinners, banners and field errors
#[async_trait]
pub trait SubmitObserver: Send + Sync {
    /// Called on every state transition
    async fn on_state(&self, state: &SubmitState);

    /// Called when the post-confirmation delay elapses
    async fn on_navigate(&self);
}

/// No-op observer for testing or when updates aren't needed
pub struct NoopObserver;

#[async_trait]
impl SubmitObserver for NoopObserver {
    async fn on_state(&self, _state: &SubmitState) {}
    async fn on_navigate(&self) {}
}
