//! CLI argument definitions using clap.

use std::path::PathBuf;

use bairro::{DatasetFormat, PriceLevel, ProviderChoice, Requirement};
use clap::{Parser, Subcommand};

/// Bairro: neighborhood restaurant guide
#[derive(Parser)]
#[command(name = "bairro")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: <config dir>/bairro/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset file, JSON or pipe-delimited (overrides the config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend restaurants matching structured filters
    Recommend {
        /// Cuisine to accept; repeat or comma-separate for several (any match)
        #[arg(short, long, value_delimiter = ',')]
        cuisine: Vec<String>,

        /// Exact price level: $, $$ or $$$
        #[arg(short, long)]
        price: Option<PriceLevel>,

        /// Meal voucher requirement: any, yes or no
        #[arg(long, default_value = "any")]
        voucher: Requirement,

        /// Dietary option that must be offered; repeat for several (all must match)
        #[arg(long, value_delimiter = ',')]
        diet: Vec<String>,

        /// Accessibility requirement: any, yes or no
        #[arg(long, default_value = "any")]
        accessible: Requirement,

        /// Number of results (default from config)
        #[arg(short = 'k', long)]
        top: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search restaurants by free text
    Search {
        /// Query words
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,

        /// Number of results (default from config)
        #[arg(short = 'k', long)]
        top: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a question answered by a language model from the dataset
    Ask {
        /// The question
        #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
        question: Vec<String>,

        /// LLM provider (overrides the config)
        #[arg(long)]
        llm: Option<ProviderChoice>,

        /// Model to use (provider-specific, e.g., "gpt-4o")
        #[arg(long)]
        model: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import restaurants from free text and merge them into the dataset
    Import {
        /// Text file to import ("-" reads stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Extract with a language model instead of the offline parser
        #[arg(long)]
        llm: Option<ProviderChoice>,

        /// Model to use with --llm
        #[arg(long)]
        model: Option<String>,

        /// Show what would change without saving
        #[arg(long)]
        dry_run: bool,

        /// Keep a copy of the previous dataset in <name>.history/
        #[arg(long)]
        history: bool,

        /// Output the merge report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the cuisines, dietary options and price levels in the dataset
    Facets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a dataset between JSON and pipe-delimited formats
    Convert {
        /// Input dataset
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path; its extension picks the format unless --to is given
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output format: json or pipe
        #[arg(long)]
        to: Option<DatasetFormat>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_splits_cuisine_list() {
        let cli = Cli::try_parse_from([
            "bairro", "recommend", "-c", "italian,pizza", "--price", "$$", "--voucher", "yes",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend {
                cuisine,
                price,
                voucher,
                accessible,
                top,
                ..
            } => {
                assert_eq!(cuisine, vec!["italian", "pizza"]);
                assert_eq!(price, Some(PriceLevel::Moderate));
                assert_eq!(voucher, Requirement::Required);
                assert_eq!(accessible, Requirement::Any);
                assert_eq!(top, None);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["bairro", "search", "cheap", "lunch", "-d", "guide.json"])
            .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("guide.json")));
        match cli.command {
            Commands::Search { query, .. } => assert_eq!(query, vec!["cheap", "lunch"]),
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["bairro", "ask"]).is_err());
    }

    #[test]
    fn test_import_llm_choice() {
        let cli = Cli::try_parse_from(["bairro", "import", "notes.txt", "--llm", "mock", "--dry-run"])
            .unwrap();
        match cli.command {
            Commands::Import { llm, dry_run, .. } => {
                assert_eq!(llm, Some(ProviderChoice::Mock));
                assert!(dry_run);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["bairro", "-q", "-v", "facets"]).is_err());
    }

    #[test]
    fn test_invalid_price_rejected() {
        assert!(Cli::try_parse_from(["bairro", "recommend", "--price", "$$$$"]).is_err());
    }
}
