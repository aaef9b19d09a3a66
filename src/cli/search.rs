//! Interactive search - pick a vehicle and part, then send an inquiry

use crate::cli::progress::CliProgress;
use crate::cli::style::{cross, spinner, Stylize};
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input, Select};
use parts_finder::context::AppContext;
use parts_finder::error::{CatalogError, Error, Result};
use parts_finder::inquiry::{Field, InquiryResult, is_valid_email, is_valid_phone, is_valid_zip};
use parts_finder::resolver::{CatalogResolver, ModelsFetch, current_year_options};
use parts_finder::types::InquiryCandidate;
use std::sync::Arc;

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Internal(format!("Failed to read input: {e}"))
}

fn select(prompt: &str, items: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)
}

fn input(prompt: &str, check: fn(&str) -> bool, message: &'static str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(move |value: &String| if check(value) { Ok(()) } else { Err(message) })
        .interact_text()
        .map_err(prompt_error)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

fn failure_notice(err: &CatalogError) -> String {
    let what = err.collection.as_str().replace('_', " ");
    format!("Failed to load {what}. Please retry.")
}

/// Report a failed catalog load; `true` when the user wants to try again
fn offer_retry(err: &CatalogError) -> Result<bool> {
    tracing::debug!(error = %err, "catalog load failed");
    eprintln!("{} {}", cross(), failure_notice(err).error());
    confirm("Retry?", true)
}

/// Run the interactive search
///
/// `brand` preselects the manufacturer by name or slug.
pub async fn run_search(ctx: &AppContext, brand: Option<&str>) -> Result<()> {
    let progress = Arc::new(CliProgress::new());

    loop {
        let resolver = ctx.resolver();
        let Some(mut candidate) = pick_vehicle(&resolver, brand).await? else {
            return Ok(());
        };
        read_contact(&mut candidate)?;

        let pipeline = ctx.pipeline(progress.clone());
        let vehicle = resolver.describe_selection();
        let result = pipeline.submit_described(&candidate, vehicle.as_ref()).await?;

        if matches!(result, InquiryResult::Success { .. }) {
            progress.wait_for_navigation().await;
        }

        if !confirm("Search for another part?", false)? {
            return Ok(());
        }
    }
}

/// Walk Year → Make → Model → Part
///
/// `None` when the catalog has nothing to offer or the user gives up
/// after a failed load.
async fn pick_vehicle(
    resolver: &CatalogResolver,
    brand: Option<&str>,
) -> Result<Option<InquiryCandidate>> {
    let (makes, parts) = loop {
        let spinner = spinner("Loading catalog...");
        let loaded = tokio::join!(resolver.load_manufacturers(), resolver.load_part_categories());
        spinner.finish_and_clear();
        match loaded {
            (Ok(makes), Ok(parts)) => break (makes, parts),
            (Err(e), _) | (_, Err(e)) => {
                if !offer_retry(&e)? {
                    return Ok(None);
                }
            }
        }
    };

    if makes.is_empty() || parts.is_empty() {
        eprintln!("{}", "The parts catalog is empty right now. Please try again later.".warn());
        return Ok(None);
    }

    let years = current_year_options();
    let labels: Vec<String> = years.iter().map(ToString::to_string).collect();
    let year = years[select("Year", &labels)?];
    resolver.select_year(Some(year));

    let mut fetch = if let Some(brand) = brand {
        println!("{} {}", "Make:".muted(), brand.accent());
        resolver.select_manufacturer_by_name(brand).await
    } else {
        let labels: Vec<String> = makes.iter().map(|m| m.name.clone()).collect();
        let make = &makes[select("Make", &labels)?];
        resolver.select_manufacturer(Some(make.id)).await.map_err(Error::from)
    };

    // A failed models load keeps the make selected, so retrying reloads it
    let models: Arc<[_]> = loop {
        match fetch {
            Ok(ModelsFetch::Applied(models)) => break models,
            Ok(ModelsFetch::Superseded | ModelsFetch::Cleared) => {
                break resolver.models().items().into();
            }
            Err(Error::Catalog(e)) => {
                let Some(id) = resolver.selection().manufacturer_id() else {
                    return Ok(None);
                };
                if !offer_retry(&e)? {
                    return Ok(None);
                }
                fetch = resolver.load_models(id).await.map_err(Error::from);
            }
            Err(e) => return Err(e),
        }
    };
    if models.is_empty() {
        eprintln!("{}", "No models are listed for this make.".warn());
        return Ok(None);
    }
    let labels: Vec<String> = models.iter().map(|m| m.name.clone()).collect();
    let model = &models[select("Model", &labels)?];
    resolver.select_model(Some(model.id))?;

    let labels: Vec<String> = parts.iter().map(|p| p.name.clone()).collect();
    let part = &parts[select("Part", &labels)?];
    resolver.select_part_category(Some(part.id));

    if let Some(vehicle) = resolver.describe_selection() {
        println!("{} {}", "Looking for".muted(), vehicle.to_string().emphasis());
    }
    Ok(Some(resolver.candidate()))
}

fn read_contact(candidate: &mut InquiryCandidate) -> Result<()> {
    candidate.name = input("Name", |v| !v.trim().is_empty(), Field::Name.message())?;
    candidate.email = input("Email", is_valid_email, Field::Email.message())?;
    candidate.phone = input("Phone", is_valid_phone, Field::Phone.message())?;
    candidate.zip_code = input("ZIP code", is_valid_zip, Field::ZipCode.message())?;
    candidate.notes = Input::<String>::new()
        .with_prompt("Notes (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    Ok(())
}
