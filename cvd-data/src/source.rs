//! Where the raw CSV comes from.

use cvd_owid::error::Result;
use std::future::Future;

/// A provider of the raw OWID CSV body.
///
/// The native CLI uses [`HttpSource`] or a local file, the web dashboard a
/// browser `fetch`.
pub trait CsvSource {
    /// Human readable origin, for logs.
    fn describe(&self) -> String;

    /// Fetch the full CSV body.
    fn fetch(&self) -> impl Future<Output = Result<String>>;
}

#[cfg(feature = "api")]
pub use http::HttpSource;

#[cfg(feature = "api")]
mod http {
    use super::CsvSource;
    use cvd_owid::error::Result;
    use cvd_owid::fetch::fetch_csv;
    use cvd_owid::observation::OWID_CSV_URL;
    use reqwest::Client;

    /// Fetches the dataset over HTTP(S) with a single GET.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        client: Client,
        url: String,
    }

    impl HttpSource {
        pub fn new(url: impl Into<String>) -> Self {
            Self {
                client: Client::new(),
                url: url.into(),
            }
        }

        /// Source pointing at the published OWID file.
        pub fn owid() -> Self {
            Self::new(OWID_CSV_URL)
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl CsvSource for HttpSource {
        fn describe(&self) -> String {
            self.url.clone()
        }

        async fn fetch(&self) -> Result<String> {
            fetch_csv(&self.client, &self.url).await
        }
    }
}
