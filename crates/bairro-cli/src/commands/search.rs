//! Search command - free-text lexical mode.

use colored::Colorize;

use super::{print_results, CommandResult, Context};

pub fn run(ctx: &Context, query: String, top: Option<usize>, json_output: bool) -> CommandResult {
    let dataset = ctx.load_dataset()?;
    let guide = ctx.guide(top)?;

    let results = guide.search(&dataset, &query);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.iter().all(|r| r.score == 0) {
        println!(
            "{} \"{}\", showing the first {} restaurants",
            "No matches for".yellow(),
            query,
            results.len()
        );
    } else {
        println!("{} \"{}\"", "Results for".cyan().bold(), query);
    }
    println!();
    print_results(&results, true);

    Ok(())
}
