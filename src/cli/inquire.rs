//! Inquire command - send an inquiry from flags, without prompts

use crate::cli::progress::CliProgress;
use clap::Args;
use parts_finder::context::AppContext;
use parts_finder::inquiry::InquiryResult;
use parts_finder::types::InquiryCandidate;
use std::sync::Arc;

/// Inquiry fields; missing or malformed values are reported together
#[derive(Args, Debug, Clone, Default)]
pub struct InquireArgs {
    /// Model year
    #[arg(long)]
    pub year: Option<i32>,

    /// Manufacturer id
    #[arg(long)]
    pub make: Option<u64>,

    /// Model id
    #[arg(long)]
    pub model: Option<u64>,

    /// Part category id
    #[arg(long)]
    pub part: Option<u64>,

    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// ZIP code
    #[arg(long, default_value = "")]
    pub zip: String,

    /// Anything else the yard should know
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl From<InquireArgs> for InquiryCandidate {
    fn from(args: InquireArgs) -> Self {
        Self {
            year: args.year,
            manufacturer_id: args.make,
            model_id: args.model,
            part_category_id: args.part,
            name: args.name,
            email: args.email,
            phone: args.phone,
            zip_code: args.zip,
            notes: args.notes,
        }
    }
}

/// Validate and send one inquiry
///
/// Fails when the inquiry was not accepted; the observer has already
/// printed why.
pub async fn run_inquire(ctx: &AppContext, args: InquireArgs) -> anyhow::Result<()> {
    let pipeline = ctx.pipeline(Arc::new(CliProgress::new()));
    let candidate = InquiryCandidate::from(args);

    match pipeline.submit(&candidate).await? {
        InquiryResult::Success { .. } => {
            // Nothing to navigate back to
            pipeline.cancel();
            Ok(())
        }
        InquiryResult::ValidationFailure { field_errors } => {
            anyhow::bail!("inquiry not sent: {} field(s) need attention", field_errors.len())
        }
        InquiryResult::TransportFailure { message } => anyhow::bail!("inquiry not sent: {message}"),
    }
}
