//! Validate → submit → react, for one inquiry at a time

use crate::api::{INQUIRY_PATH, PartsApi};
use crate::attributes;
use crate::error::{Error, Result};
use crate::events::{self, EventSink};
use crate::inquiry::{
    FailureReason, Field, FieldErrors, SubmitObserver, SubmitState, Validation, validate,
};
use crate::types::{InquiryCandidate, InquiryResponse, VehicleDescription};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shown when the server rejects an inquiry without saying why
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to submit request. Please try again.";

/// Shown when the inquiry could not be delivered at all
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please check your connection and try again.";

/// Form name reported with submission events
const FORM_NAME: &str = "parts_inquiry";

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryResult {
    /// Inquiry accepted
    Success {
        /// Confirmation message for the customer
        confirmation: String,
    },
    /// Fields rejected, locally or by the server
    ValidationFailure {
        /// Field name → message
        field_errors: FieldErrors,
    },
    /// Rejected without field detail, or not delivered
    TransportFailure {
        /// Human-readable message
        message: String,
    },
}

struct Inner {
    state: SubmitState,
    timer: Option<JoinHandle<()>>,
    /// Bumped by `cancel()` so a timer scheduled earlier never acts
    generation: u64,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the pipeline to `Idle` if a submission is dropped mid-request
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(inner: &'a Mutex<Inner>) -> Self {
        Self { inner, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = lock(self.inner);
        if inner.state == SubmitState::Submitting {
            debug!("submission abandoned before a response");
            inner.state = SubmitState::Idle;
        }
    }
}

/// Single-flight inquiry submission
///
/// At most one inquiry is in flight; a confirmed inquiry holds the pipeline
/// until its navigation fires or [`cancel`](Self::cancel) is called.
pub struct SubmissionPipeline {
    api: Arc<dyn PartsApi>,
    events: Arc<dyn EventSink>,
    observer: Arc<dyn SubmitObserver>,
    redirect_delay: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl SubmissionPipeline {
    /// Create an idle pipeline
    pub fn new(
        api: Arc<dyn PartsApi>,
        events: Arc<dyn EventSink>,
        observer: Arc<dyn SubmitObserver>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            api,
            events,
            observer,
            redirect_delay,
            inner: Arc::new(Mutex::new(Inner {
                state: SubmitState::Idle,
                timer: None,
                generation: 0,
            })),
        }
    }

    /// Current state
    pub fn state(&self) -> SubmitState {
        lock(&self.inner).state.clone()
    }

    /// Whether a post-confirmation navigation is scheduled
    pub fn is_navigation_pending(&self) -> bool {
        lock(&self.inner)
            .timer
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Submit an inquiry with a generic confirmation message
    pub async fn submit(&self, candidate: &InquiryCandidate) -> Result<InquiryResult> {
        self.submit_described(candidate, None).await
    }

    /// Submit an inquiry; the confirmation names the vehicle and part when given
    ///
    /// Returns [`Error::SubmissionInFlight`] without touching the network
    /// when another submission is in progress or awaiting navigation.
    pub async fn submit_described(
        &self,
        candidate: &InquiryCandidate,
        vehicle: Option<&VehicleDescription>,
    ) -> Result<InquiryResult> {
        let validation = {
            let mut inner = lock(&self.inner);
            if inner.state != SubmitState::Idle {
                debug!(state = %inner.state, "rejecting concurrent submission");
                return Err(Error::SubmissionInFlight);
            }
            let validation = validate(candidate);
            inner.state = if validation.is_valid() {
                SubmitState::Submitting
            } else {
                SubmitState::Idle
            };
            validation
        };
        let in_flight = InFlight::new(&self.inner);

        self.observer.on_state(&SubmitState::Validating).await;

        let request = match validation {
            Validation::Valid(request) => request,
            Validation::Invalid(field_errors) => {
                in_flight.disarm();
                debug!(fields = field_errors.len(), "inquiry failed validation");
                self.observer
                    .on_state(&SubmitState::Invalid(field_errors.clone()))
                    .await;
                self.observer.on_state(&SubmitState::Idle).await;
                return Ok(InquiryResult::ValidationFailure { field_errors });
            }
        };

        self.observer.on_state(&SubmitState::Submitting).await;
        info!(
            year = request.year,
            manufacturer_id = request.manufacturer_id,
            model_id = request.model_id,
            part_category_id = request.part_category_id,
            "submitting parts inquiry"
        );

        let result = match self.api.submit_inquiry(&request).await {
            Ok(response) if response.is_success() => InquiryResult::Success {
                confirmation: confirmation_message(vehicle),
            },
            Ok(response) => {
                warn!(status = response.status, "inquiry rejected");
                self.record_api_error(Some(response.status), response.reply.error.as_deref());
                rejection(response)
            }
            Err(e) => {
                warn!(error = %e, "inquiry submission failed");
                self.record_api_error(e.status_code(), Some(&e.to_string()));
                InquiryResult::TransportFailure {
                    message: SERVER_ERROR_MESSAGE.to_string(),
                }
            }
        };

        let success = matches!(result, InquiryResult::Success { .. });
        self.events.record(
            events::FORM_SUBMIT,
            attributes! { "form_name" => FORM_NAME, "success" => success },
        );

        in_flight.disarm();
        match &result {
            InquiryResult::Success { confirmation } => self.confirm(confirmation).await,
            InquiryResult::ValidationFailure { field_errors } => {
                self.fail(FailureReason::Fields(field_errors.clone())).await;
            }
            InquiryResult::TransportFailure { message } => {
                self.fail(FailureReason::Message(message.clone())).await;
            }
        }

        Ok(result)
    }

    async fn confirm(&self, confirmation: &str) {
        let generation = {
            let mut inner = lock(&self.inner);
            inner.state = SubmitState::Submitted {
                confirmation: confirmation.to_string(),
            };
            inner.generation
        };

        self.observer
            .on_state(&SubmitState::Submitted {
                confirmation: confirmation.to_string(),
            })
            .await;

        let mut inner = lock(&self.inner);
        // cancel() may have run while the observer was notified
        if inner.generation != generation {
            return;
        }

        let shared = Arc::clone(&self.inner);
        let observer = Arc::clone(&self.observer);
        let delay = self.redirect_delay;
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut inner = lock(&shared);
                if inner.generation != generation {
                    return;
                }
                inner.state = SubmitState::Idle;
                inner.timer = None;
            }
            debug!("navigating away after confirmation");
            observer.on_state(&SubmitState::Idle).await;
            observer.on_navigate().await;
        }));
    }

    async fn fail(&self, reason: FailureReason) {
        lock(&self.inner).state = SubmitState::Idle;
        self.observer.on_state(&SubmitState::SubmitFailed(reason)).await;
        self.observer.on_state(&SubmitState::Idle).await;
    }

    fn record_api_error(&self, status: Option<u16>, message: Option<&str>) {
        self.events.record(
            events::API_ERROR,
            attributes! {
                "endpoint" => INQUIRY_PATH,
                "status_code" => status,
                "error_message" => message,
            },
        );
    }

    /// Cancel a scheduled navigation and return to `Idle`
    ///
    /// Call from the hosting view's teardown. Returns whether a navigation
    /// was pending.
    pub fn cancel(&self) -> bool {
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        let pending = inner.timer.take().is_some_and(|timer| {
            let running = !timer.is_finished();
            timer.abort();
            running
        });
        if matches!(inner.state, SubmitState::Submitted { .. }) {
            inner.state = SubmitState::Idle;
        }
        drop(inner);
        if pending {
            debug!("cancelled pending navigation");
        }
        pending
    }
}

impl Drop for SubmissionPipeline {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.inner).timer.take() {
            timer.abort();
        }
    }
}

fn confirmation_message(vehicle: Option<&VehicleDescription>) -> String {
    vehicle.map_or_else(
        || "Thank you for your inquiry! We've received your request.".to_string(),
        |v| format!("Thank you for your inquiry! We've received your request for the {v}."),
    )
}

/// Map a rejected inquiry response to a result
fn rejection(response: InquiryResponse) -> InquiryResult {
    let InquiryResponse { reply, .. } = response;

    if let Some(errors) = reply.errors.filter(|errors| !errors.is_empty()) {
        let field_errors = errors
            .iter()
            .map(|(wire, messages)| {
                let field = Field::from_wire(wire).map_or_else(|| wire.clone(), |f| f.as_str().to_string());
                (field, messages.joined())
            })
            .collect();
        return InquiryResult::ValidationFailure { field_errors };
    }

    InquiryResult::TransportFailure {
        message: reply
            .error
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorMessages, InquiryReply};
    use std::collections::BTreeMap;

    fn response(status: u16, reply: InquiryReply) -> InquiryResponse {
        InquiryResponse { status, reply }
    }

    #[test]
    fn test_rejection_maps_wire_field_names() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "zipcode".to_string(),
            ErrorMessages::Many(vec!["Invalid.".to_string(), "Too short.".to_string()]),
        );
        errors.insert(
            "non_field_errors".to_string(),
            ErrorMessages::One("Duplicate inquiry.".to_string()),
        );
        let result = rejection(response(
            400,
            InquiryReply {
                success: false,
                error: None,
                errors: Some(errors),
            },
        ));

        let InquiryResult::ValidationFailure { field_errors } = result else {
            panic!("expected ValidationFailure");
        };
        assert_eq!(field_errors["zipCode"], "Invalid., Too short.");
        assert_eq!(field_errors["non_field_errors"], "Duplicate inquiry.");
    }

    #[test]
    fn test_rejection_uses_server_message_or_fallback() {
        let with_message = rejection(response(
            200,
            InquiryReply {
                success: false,
                error: Some("Out of service area".to_string()),
                errors: None,
            },
        ));
        assert_eq!(
            with_message,
            InquiryResult::TransportFailure {
                message: "Out of service area".to_string()
            }
        );

        let bare = rejection(response(500, InquiryReply::default()));
        assert_eq!(
            bare,
            InquiryResult::TransportFailure {
                message: FALLBACK_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_confirmation_message() {
        let vehicle = VehicleDescription {
            year: 2015,
            manufacturer: "Toyota".to_string(),
            model: "Camry".to_string(),
            part_category: "Engine".to_string(),
        };
        assert_eq!(
            confirmation_message(Some(&vehicle)),
            "Thank you for your inquiry! We've received your request for the Engine for your 2015 Toyota Camry."
        );
        assert!(confirmation_message(None).ends_with("your request."));
    }
}
