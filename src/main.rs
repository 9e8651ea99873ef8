mod cli;
mod config;
mod dataset;
mod download;
mod grouping;
mod plot;
mod prompt;
mod selection;
mod series;

use std::{io, process};

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use config::PlotConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Series { url, options } => command::series(url, &options.to_config()).await,
        Commands::Surface {
            url,
            options,
            project_name,
            no_drop_lines,
        } => {
            let config = PlotConfig {
                project_name: project_name.clone(),
                drop_lines: !no_drop_lines,
                ..options.to_config()
            };
            command::surface(url, &config).await
        }
    };

    match result {
        Ok(files) => println!("\n{} plot(s) saved", files.len()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
