//! CLI submission observer with styled output and a spinner

use crate::cli::style::{check, cross, spinner, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use parts_finder::inquiry::{FailureReason, FieldErrors, SubmitObserver, SubmitState};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Follow-up promise shown under a confirmation
const FOLLOW_UP: &str = "Our team will review your request and contact you within 2-45 minutes with availability and pricing information.";

/// Prints submission progress and signals navigation
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
    navigated: Notify,
}

impl CliProgress {
    /// Create an observer with no spinner running
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            navigated: Notify::new(),
        }
    }

    /// Wait until the pipeline asks to navigate away
    pub async fn wait_for_navigation(&self) {
        self.navigated.notified().await;
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            spinner.finish_and_clear();
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Print field errors to stderr, one per line
pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        eprintln!("  {} {}: {}", cross(), field.accent().for_stderr(), message.error());
    }
}

#[async_trait]
impl SubmitObserver for CliProgress {
    async fn on_state(&self, state: &SubmitState) {
        match state {
            SubmitState::Idle | SubmitState::Validating => {}
            SubmitState::Invalid(errors) => {
                eprintln!("{}", "Please fix the following:".warn());
                print_field_errors(errors);
            }
            SubmitState::Submitting => {
                if let Ok(mut slot) = self.spinner.lock() {
                    *slot = Some(spinner("Sending inquiry..."));
                }
            }
            SubmitState::Submitted { confirmation } => {
                self.stop_spinner();
                println!("{} {}", check(), "Request Received!".success());
                println!("  {confirmation}");
                println!("  {}", FOLLOW_UP.muted());
            }
            SubmitState::SubmitFailed(reason) => {
                self.stop_spinner();
                match reason {
                    FailureReason::Fields(errors) => {
                        eprintln!("{} {}", cross(), "The inquiry was rejected:".error());
                        print_field_errors(errors);
                    }
                    FailureReason::Message(message) => {
                        eprintln!("{} {}", cross(), message.error());
                    }
                }
            }
        }
    }

    async fn on_navigate(&self) {
        println!("{}", "Returning to search.".muted());
        self.navigated.notify_one();
    }
}
