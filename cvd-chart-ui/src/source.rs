//! The dataset source used inside the browser.

use crate::js_bridge;
use cvd_data::source::CsvSource;
use cvd_owid::error::Result;
use cvd_owid::observation::OWID_CSV_URL;

/// Fetches the dataset with the browser Fetch API.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserSource {
    url: String,
}

impl BrowserSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Source pointing at the published OWID file.
    pub fn owid() -> Self {
        Self::new(OWID_CSV_URL)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CsvSource for BrowserSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        js_bridge::fetch_csv(&self.url).await
    }
}
