//! Native HTTP fetch of the OWID CSV.
//!
//! A single GET with no retry: any failure is returned to the caller, which
//! treats it as fatal.

use crate::compression::{decode_body, is_gzip_path};
use crate::error::{OwidError, Result};
use log::{info, warn};
use reqwest::Client;

/// Download the dataset at `url` and return it as CSV text.
pub async fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    info!("Fetching OWID dataset from {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!("Bad response status for {}: {}", url, status);
        return Err(OwidError::ResponseStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await?;
    info!("Received {} bytes from {}", bytes.len(), url);
    decode_body(bytes.to_vec(), is_gzip_path(url))
}
