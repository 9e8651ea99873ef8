//! Read-only access to a remote OPeNDAP sequence dataset.

pub mod ascii;
pub mod dds;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::{cli::create_spinner, config::PlotConfig, download::fetch_text};

// Suffixes of the OPeNDAP response pages an operator may paste instead of the
// bare dataset URL.
const DAP_SUFFIXES: [&str; 6] = [".html", ".dds", ".das", ".ascii", ".dods", ".info"];

#[derive(Debug, Clone)]
pub struct Dataset {
    base_url: String,
    sequence: String,
    variables: Vec<String>,
}

impl Dataset {
    /// Opens the dataset at `url` by fetching its structure.
    pub async fn open(url: &str, config: &PlotConfig) -> Result<Self> {
        let base_url = base_url(url);
        let dds_url = format!("{}.dds", base_url);

        let bar = create_spinner("Reading dataset structure...".to_string());
        let dds = fetch_text(&dds_url, &bar).await?;
        bar.finish_with_message("Dataset structure read");

        let variables = dds::sequence_variables(&dds, &config.sequence)
            .with_context(|| format!("Unexpected dataset structure at `{}`", dds_url))?;
        info!(url = %base_url, variables = variables.len(), "opened dataset");

        Ok(Dataset::from_parts(base_url, config.sequence.clone(), variables))
    }

    pub fn from_parts(base_url: String, sequence: String, variables: Vec<String>) -> Self {
        Dataset {
            base_url,
            sequence,
            variables,
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    /// Variables following the leading metadata block.
    pub fn plottable_variables(&self, metadata_count: usize) -> &[String] {
        self.variables.get(metadata_count..).unwrap_or(&[])
    }

    /// Materialises each named variable as one string per row.
    pub async fn columns(&self, names: &[&str]) -> Result<Vec<Vec<String>>> {
        if let Some(missing) = names.iter().find(|name| !self.has_variable(name)) {
            return Err(anyhow!(
                "Variable `{}` is not part of sequence `{}`",
                missing,
                self.sequence
            ));
        }

        let url = self.ascii_url(names);
        let bar = create_spinner(format!("Downloading {}...", names.join(", ")));
        let body = fetch_text(&url, &bar).await?;
        bar.finish_with_message(format!("Downloaded {}", names.join(", ")));

        let columns = ascii::parse_columns(&body, &self.sequence, names)
            .with_context(|| format!("Malformed response from `{}`", url))?;
        debug!(rows = columns.first().map_or(0, Vec::len), "parsed columns");

        Ok(columns)
    }

    /// Materialises a single variable.
    pub async fn column(&self, name: &str) -> Result<Vec<String>> {
        let mut columns = self.columns(&[name]).await?;
        columns
            .pop()
            .ok_or_else(|| anyhow!("No data returned for `{}`", name))
    }

    fn ascii_url(&self, names: &[&str]) -> String {
        let projection: Vec<String> = names
            .iter()
            .map(|name| format!("{}.{}", self.sequence, name))
            .collect();

        format!("{}.ascii?{}", self.base_url, projection.join(","))
    }
}

/// Strips any query and response suffix, leaving the dataset URL.
pub fn base_url(url: &str) -> String {
    let url = url.trim();
    let url = url.split('?').next().unwrap_or(url);

    DAP_SUFFIXES
        .iter()
        .find_map(|suffix| url.strip_suffix(suffix))
        .unwrap_or(url)
        .to_string()
}

// -- Tests -------------------------------------------------------------------
