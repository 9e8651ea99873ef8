//! Fetches OPeNDAP responses over HTTP.

use anyhow::{Context, Error, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

// Upper bound on the buffer reserved from a server-reported length.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// Downloads the body at `url` as text, advancing `progress_bar` as chunks arrive.
///
/// The bar stays a spinner unless the server reports a content length.
pub async fn fetch_text(url: &str, progress_bar: &ProgressBar) -> Result<String> {
    debug!(url, "requesting");
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to request `{}`", url))?;

    if !response.status().is_success() {
        return Err(Error::msg(format!(
            "Failed to download `{}`: {}",
            url,
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    if total_size > 0 {
        progress_bar.set_length(total_size);
        progress_bar.set_style(byte_style());
    }

    let mut body = Vec::with_capacity(initial_capacity(total_size));
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| Error::msg(format!("Error reading chunk: {}", e)))?;
        body.extend_from_slice(&chunk);
        progress_bar.set_position(body.len() as u64);
    }

    debug!(url, bytes = body.len(), "downloaded");

    String::from_utf8(body).with_context(|| format!("Response from `{}` is not UTF-8", url))
}

fn initial_capacity(content_length: u64) -> usize {
    usize::try_from(content_length)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATION)
}

fn byte_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ")
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_switch_spinner_to_byte_bar() {
        let pb = ProgressBar::new_spinner();

        pb.set_length(1000);
        pb.set_style(byte_style());
        pb.set_position(250);

        assert_eq!(pb.length(), Some(1000));
        assert_eq!(pb.position(), 250);
    }

    #[test]
    fn should_not_trust_huge_content_length() {
        assert_eq!(initial_capacity(0), 0);
        assert_eq!(initial_capacity(4096), 4096);
        assert_eq!(initial_capacity(u64::MAX), MAX_PREALLOCATION);
    }

    #[tokio::test]
    async fn should_fail_on_unreachable_host() {
        let pb = ProgressBar::hidden();
        let result = fetch_text("http://127.0.0.1:9/missing.dds", &pb).await;

        assert!(result.is_err());
    }
}
