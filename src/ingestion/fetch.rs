//! Fetch functions - retrieve published workbook exports over HTTP

use anyhow::{anyhow, Result};
use reqwest::Client;
use tracing::info;

/// Download a workbook export. The IOLP files run to a few megabytes, so
/// the whole body is buffered.
pub async fn fetch_workbook(url: &str) -> Result<Vec<u8>> {
    info!("Downloading workbook from {}", url);

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(anyhow!("HTTP request failed: {}", status));
    }

    let bytes = response.bytes().await?;
    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// True when an import source names a URL rather than a local file.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
