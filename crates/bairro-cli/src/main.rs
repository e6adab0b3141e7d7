//! Bairro CLI - neighborhood restaurant guide.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("BAIRRO_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let ctx = commands::Context::new(cli.config.as_deref(), cli.data);

    let result = ctx.and_then(|ctx| match cli.command {
        Commands::Recommend {
            cuisine,
            price,
            voucher,
            diet,
            accessible,
            top,
            json,
        } => commands::recommend::run(&ctx, cuisine, price, voucher, diet, accessible, top, json),

        Commands::Search { query, top, json } => {
            commands::search::run(&ctx, query.join(" "), top, json)
        }

        Commands::Ask {
            question,
            llm,
            model,
            json,
        } => commands::ask::run(&ctx, question.join(" "), llm, model, json),

        Commands::Import {
            file,
            llm,
            model,
            dry_run,
            history,
            json,
        } => commands::import::run(&ctx, file, llm, model, dry_run, history, json),

        Commands::Facets { json } => commands::facets::run(&ctx, json),

        Commands::Convert { input, output, to } => commands::convert::run(input, output, to),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
