//! Import command - merge free text into the dataset.

use std::io::Read;
use std::path::{Path, PathBuf};

use bairro::{Dataset, ImportMode, MergeReport, ProviderChoice};
use colored::Colorize;
use tracing::info;

use super::{CommandResult, Context};

pub fn run(
    ctx: &Context,
    file: PathBuf,
    llm: Option<ProviderChoice>,
    model: Option<String>,
    dry_run: bool,
    history: bool,
    json_output: bool,
) -> CommandResult {
    let text = read_input(&file)?;

    let mode = match llm {
        Some(ProviderChoice::None) | None => ImportMode::Offline,
        Some(_) => ImportMode::Model,
    };
    let guide = match mode {
        ImportMode::Offline => ctx.guide(None)?,
        ImportMode::Model => ctx.llm_guide(llm, model)?,
    };

    // A missing dataset file starts a new dataset
    let path = ctx.dataset_path()?;
    let mut dataset = if path.exists() {
        Dataset::load(&path)?
    } else {
        info!(path = %path.display(), "dataset does not exist yet, starting empty");
        Dataset::from_records(Vec::new())
    };

    let report = guide.import_text(&mut dataset, &text, mode)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if dry_run {
        if !json_output {
            println!();
            println!("{}", "Dry run - dataset not saved".yellow());
        }
        return Ok(());
    }

    if !report.has_changes() {
        return Ok(());
    }

    if history {
        dataset.save_with_history(&path)?;
    } else {
        dataset.save_as(&path, dataset.metadata.format)?;
    }

    if !json_output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn read_input(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(std::fs::read_to_string(file)?)
}

fn print_report(report: &MergeReport) {
    println!("{} {}", "Import:".cyan().bold(), report.summary());

    for name in &report.added {
        println!("  {} {}", "+".green().bold(), name);
    }
    for update in &report.updated {
        let fields: Vec<&str> = update.fields.iter().map(|f| f.name()).collect();
        println!(
            "  {} {} {}",
            "~".yellow().bold(),
            update.name,
            format!("({})", fields.join(", ")).dimmed()
        );
    }
    for ignored in &report.ignored {
        let name = if ignored.name.trim().is_empty() {
            "<unnamed>"
        } else {
            ignored.name.as_str()
        };
        println!(
            "  {} {} {}",
            "-".dimmed(),
            name.dimmed(),
            format!("({})", ignored.reason.label()).dimmed()
        );
    }
}
