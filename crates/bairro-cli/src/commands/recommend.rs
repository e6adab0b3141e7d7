//! Recommend command - structured filter mode.

use bairro::{FilterCriteria, PriceLevel, Requirement};
use colored::Colorize;

use super::{print_results, CommandResult, Context};

#[allow(clippy::too_many_arguments)]
pub fn run(
    ctx: &Context,
    cuisine: Vec<String>,
    price: Option<PriceLevel>,
    voucher: Requirement,
    diet: Vec<String>,
    accessible: Requirement,
    top: Option<usize>,
    json_output: bool,
) -> CommandResult {
    let dataset = ctx.load_dataset()?;
    let guide = ctx.guide(top)?;

    let mut criteria = FilterCriteria::new()
        .with_cuisines(cuisine)
        .with_voucher(voucher)
        .with_diets(diet)
        .with_accessibility(accessible);
    if let Some(price) = price {
        criteria = criteria.with_price(price);
    }

    let results = guide.recommend(&dataset, &criteria);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "{} {} of {} restaurants ({} active filters)",
        "Showing".cyan().bold(),
        results.len().to_string().white().bold(),
        dataset.len(),
        criteria.active_count()
    );
    println!();
    print_results(&results, false);

    Ok(())
}
