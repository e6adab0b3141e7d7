//! Convert command - rewrite a dataset in another format.

use std::path::PathBuf;

use bairro::{Dataset, DatasetFormat};
use colored::Colorize;

use super::CommandResult;

pub fn run(input: PathBuf, output: PathBuf, to: Option<DatasetFormat>) -> CommandResult {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }

    let format = to
        .or_else(|| DatasetFormat::from_path(&output))
        .ok_or_else(|| {
            format!(
                "Cannot tell the output format from '{}'. Use --to json or --to pipe.",
                output.display()
            )
        })?;

    let dataset = Dataset::load(&input)?;
    dataset.save_as(&output, format)?;

    println!(
        "{} {} restaurants from {} ({}) to {} ({})",
        "Converted".green().bold(),
        dataset.len(),
        input.display(),
        dataset.metadata.format,
        output.display().to_string().white(),
        format
    );
    if format == DatasetFormat::Pipe {
        println!(
            "{}",
            "Note: the pipe format has no columns for neighborhood, highlights or provenance."
                .dimmed()
        );
    }

    Ok(())
}
