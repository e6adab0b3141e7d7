//! CLI command implementations.

pub mod ask;
pub mod convert;
pub mod facets;
pub mod import;
pub mod recommend;
pub mod search;

use std::path::{Path, PathBuf};

use bairro::context::accessibility_label;
use bairro::{Dataset, Guide, GuideConfig, ProviderChoice, ScoredRecord};
use colored::Colorize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every command.
pub struct Context {
    pub config: GuideConfig,
    data: Option<PathBuf>,
}

impl Context {
    pub fn new(
        config_path: Option<&Path>,
        data: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = GuideConfig::load_or_default(config_path)?;
        Ok(Self { config, data })
    }

    /// Dataset path from `--data`, falling back to the config.
    pub fn dataset_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.data
            .clone()
            .or_else(|| self.config.dataset.clone())
            .ok_or_else(|| {
                "No dataset given. Pass --data <FILE> or set `dataset` in the config file."
                    .to_string()
                    .into()
            })
    }

    pub fn load_dataset(&self) -> Result<Dataset, Box<dyn std::error::Error>> {
        let path = self.dataset_path()?;
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
        Ok(Dataset::load(&path)?)
    }

    /// Build a guide for the retrieval commands.
    ///
    /// No language model is constructed, so a configured provider with a
    /// missing API key does not get in the way of `recommend` or `search`.
    pub fn guide(&self, top: Option<usize>) -> Result<Guide, Box<dyn std::error::Error>> {
        let mut config = self.config.clone();
        if let Some(k) = top {
            if k == 0 {
                return Err("--top must be at least 1".into());
            }
            config.top_k = k;
        }
        Ok(Guide::with_config(config))
    }

    /// Build a guide with its language model, optionally overriding the
    /// configured provider and model.
    pub fn llm_guide(
        &self,
        llm: Option<ProviderChoice>,
        model: Option<String>,
    ) -> Result<Guide, Box<dyn std::error::Error>> {
        let mut config = self.config.clone();
        if let Some(provider) = llm {
            config.llm.provider = provider;
        }
        if model.is_some() {
            config.llm.model = model;
        }
        Ok(Guide::from_config(config)?)
    }
}

/// Print ranked results in human-readable form.
pub fn print_results(results: &[ScoredRecord], show_score: bool) {
    if results.is_empty() {
        println!("{}", "No restaurants match.".yellow());
        return;
    }

    for (rank, hit) in results.iter().enumerate() {
        print_record(rank + 1, hit, show_score);
    }
}

fn print_record(rank: usize, hit: &ScoredRecord, show_score: bool) {
    let record = &hit.record;

    let mut header = format!("{}. {}", rank, record.name.white().bold());
    if let Some(price) = record.price_level {
        header.push_str(&format!(" {}", price.symbol().green()));
    }
    if show_score {
        header.push_str(&format!(" {}", format!("(score {})", hit.score).dimmed()));
    }
    println!("{}", header);

    if !record.cuisine.is_empty() {
        let cuisine: Vec<&str> = record.cuisine.iter().map(String::as_str).collect();
        println!("   {}", cuisine.join(", ").cyan());
    }
    if let Some(ref address) = record.address {
        println!("   {}", address);
    }
    if let Some(ref hours) = record.hours {
        println!("   {} {}", "Hours:".dimmed(), hours);
    }

    println!(
        "   {} {}",
        "Voucher:".dimmed(),
        record.accepts_voucher.describe("meal vouchers")
    );
    println!(
        "   {} {}",
        "Accessibility:".dimmed(),
        accessibility_label(record.accessibility)
    );
    if !record.diet_options.is_empty() {
        let diets: Vec<&str> = record.diet_options.iter().map(String::as_str).collect();
        println!("   {} {}", "Diet:".dimmed(), diets.join(", "));
    }
    for highlight in &record.highlights {
        println!("   {} {}", "*".yellow(), highlight);
    }
    if let Some(updated) = record.updated_at {
        let local = updated.with_timezone(&chrono::Local);
        println!("   {}", format!("updated {}", local.format("%Y-%m-%d")).dimmed());
    }
    println!();
}
