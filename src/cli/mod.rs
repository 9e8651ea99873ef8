//! Command line interface.

pub mod command;

use std::time::Duration;

use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PlotConfig;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot variables against time for selected stations
    Series {
        /// OPeNDAP link to the dataset
        url: String,

        #[command(flatten)]
        options: DatasetOptions,
    },
    /// Plot one variable over latitude and longitude at selected times
    Surface {
        /// OPeNDAP link to the dataset
        url: String,

        #[command(flatten)]
        options: DatasetOptions,

        /// Project name shown in plot titles
        #[arg(long, default_value = "GCIP/ESOP 95")]
        project_name: String,

        /// Omit observation points and their drop lines
        #[arg(long)]
        no_drop_lines: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DatasetOptions {
    /// Sequence holding the observations
    #[arg(long, default_value = "QCF")]
    pub sequence: String,

    /// Value marking a missing observation
    #[arg(long, default_value = "-999.99", allow_hyphen_values = true)]
    pub missing_value: String,

    /// Number of leading metadata variables that cannot be plotted
    #[arg(long, default_value_t = 9)]
    pub metadata_count: usize,
}

impl DatasetOptions {
    /// Overlays the options on the default configuration.
    pub fn to_config(&self) -> PlotConfig {
        PlotConfig {
            sequence: self.sequence.clone(),
            missing_value: self.missing_value.clone(),
            metadata_count: self.metadata_count,
            ..PlotConfig::default()
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------
