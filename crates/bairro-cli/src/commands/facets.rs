//! Facets command - values available for structured filters.

use bairro::PriceLevel;
use colored::Colorize;
use serde::Serialize;

use super::{CommandResult, Context};

#[derive(Serialize)]
struct Facets {
    cuisines: Vec<String>,
    diet_options: Vec<String>,
    price_levels: Vec<PriceLevel>,
    restaurants: usize,
}

pub fn run(ctx: &Context, json_output: bool) -> CommandResult {
    let dataset = ctx.load_dataset()?;

    let facets = Facets {
        cuisines: dataset.cuisines(),
        diet_options: dataset.diet_options(),
        price_levels: PriceLevel::ALL
            .into_iter()
            .filter(|level| dataset.iter().any(|r| r.price_level == Some(*level)))
            .collect(),
        restaurants: dataset.len(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    println!(
        "{} {} restaurants",
        dataset.metadata.file.white().bold(),
        facets.restaurants
    );
    println!();
    println!("{}", "Cuisines:".yellow().bold());
    for cuisine in &facets.cuisines {
        println!("  {}", cuisine);
    }
    println!();
    println!("{}", "Diet options:".yellow().bold());
    for diet in &facets.diet_options {
        println!("  {}", diet);
    }
    println!();
    let prices: Vec<&str> = facets.price_levels.iter().map(|p| p.symbol()).collect();
    println!("{} {}", "Price levels:".yellow().bold(), prices.join("  "));

    Ok(())
}
