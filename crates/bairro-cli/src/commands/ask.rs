//! Ask command - conversational answers grounded on the dataset.

use bairro::ProviderChoice;
use colored::Colorize;

use super::{CommandResult, Context};

pub fn run(
    ctx: &Context,
    question: String,
    llm: Option<ProviderChoice>,
    model: Option<String>,
    json_output: bool,
) -> CommandResult {
    let dataset = ctx.load_dataset()?;
    let guide = ctx.llm_guide(llm, model)?;

    if !guide.has_llm() {
        return Err(
            "No language model configured. Pass --llm <anthropic|openai|mock> or set [llm] provider in the config."
                .into(),
        );
    }

    let answer = guide.ask(&dataset, &question)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("{}", answer.text);
    println!();

    let names: Vec<&str> = answer.sources.iter().map(|s| s.name()).collect();
    println!(
        "{} {}",
        format!("Context ({}):", answer.provider).dimmed(),
        names.join(", ").dimmed()
    );

    Ok(())
}
