//! Inquiry (lead) submission
//!
//! 1. Validation - check the form locally, no network
//! 2. Submission - one POST to the inquiry intake
//! 3. Reaction - confirmation and delayed navigation, or a failure to show

mod pipeline;
mod progress;
mod validate;

pub use pipeline::{
    FALLBACK_FAILURE_MESSAGE, InquiryResult, SERVER_ERROR_MESSAGE, SubmissionPipeline,
};
pub use progress::{FailureReason, NoopObserver, SubmitObserver, SubmitState};
pub use validate::{
    Field, FieldErrors, Validation, is_valid_email, is_valid_phone, is_valid_zip, validate,
};
