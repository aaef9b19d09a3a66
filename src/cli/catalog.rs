//! Catalog listing commands - makes, models, parts, image

use crate::cli::style::{bullet, check, cross, hyperlink_url, spinner, Stream, Stylize};
use anstream::{eprintln, println};
use parts_finder::context::AppContext;
use parts_finder::error::Result;
use parts_finder::resolver::{CatalogResolver, ModelsFetch};
use parts_finder::types::{ImageQuery, Model};
use std::sync::Arc;

/// List every manufacturer
pub async fn run_makes(ctx: &AppContext) -> Result<()> {
    let resolver = ctx.resolver();
    let spinner = spinner("Loading manufacturers...");
    let makes = resolver.load_manufacturers().await;
    spinner.finish_and_clear();

    let makes = makes?;
    println!("{} ({})", "Manufacturers".emphasis(), makes.len().accent());
    for make in makes.iter() {
        println!("  {} {} {}", bullet(), make.name.accent(), format!("#{}", make.id).muted());
    }
    Ok(())
}

/// List every part category
pub async fn run_parts(ctx: &AppContext) -> Result<()> {
    let resolver = ctx.resolver();
    let spinner = spinner("Loading part categories...");
    let parts = resolver.load_part_categories().await;
    spinner.finish_and_clear();

    let parts = parts?;
    println!("{} ({})", "Part categories".emphasis(), parts.len().accent());
    for part in parts.iter() {
        println!("  {} {} {}", bullet(), part.name.accent(), format!("#{}", part.id).muted());
    }
    Ok(())
}

/// List the models of a manufacturer, given by name, slug or id
pub async fn run_models(ctx: &AppContext, make: &str) -> Result<()> {
    let resolver = ctx.resolver();
    let spinner = spinner("Loading models...");
    let models = fetch_models(&resolver, make).await;
    spinner.finish_and_clear();

    let models = models?;
    let heading = format!("Models for {}", make.trim());
    println!("{} ({})", heading.emphasis(), models.len().accent());
    if models.is_empty() {
        println!("  {}", "No models listed.".muted());
    }
    for model in models.iter() {
        println!("  {} {} {}", bullet(), model.name.accent(), format!("#{}", model.id).muted());
    }
    Ok(())
}

async fn fetch_models(resolver: &CatalogResolver, make: &str) -> Result<Arc<[Model]>> {
    let fetch = if let Ok(id) = make.trim().parse::<u64>() {
        resolver.select_manufacturer(Some(id)).await?
    } else {
        resolver.load_manufacturers().await?;
        resolver.select_manufacturer_by_name(make).await?
    };

    Ok(match fetch {
        ModelsFetch::Applied(models) => models,
        // Nothing else touches this resolver
        ModelsFetch::Superseded | ModelsFetch::Cleared => resolver.models().items().into(),
    })
}

/// Look up the product image for a vehicle and part
pub async fn run_image(ctx: &AppContext, query: &ImageQuery) -> Result<()> {
    let spinner = spinner("Looking up product image...");
    let image = ctx.api().product_image(query).await;
    spinner.finish_and_clear();

    match image? {
        Some(image) => {
            println!(
                "{} {}",
                check(),
                hyperlink_url(Stream::Stdout, &image.image_url).accent()
            );
            if let Some(number) = image.specification_number {
                println!("  {} {}", "Specification:".muted(), number);
            }
        }
        None => {
            eprintln!("{} {}", cross(), "No image available for this part.".warn());
        }
    }
    Ok(())
}
