//! Direct `GeoJSON` URL source.
//!
//! Issues a single GET and expects a standard `GeoJSON`
//! `FeatureCollection` in the response body.

use async_trait::async_trait;

use super::{FeatureSource, features_from_document};
use crate::VillageError;

/// Fetches the `GeoJSON` document over HTTP.
#[derive(Debug, Clone)]
pub struct UrlSource {
    client: reqwest::Client,
    url: String,
}

impl UrlSource {
    /// Creates a source fetching `url` with `client`.
    #[must_use]
    pub const fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl FeatureSource for UrlSource {
    async fn fetch_features(&self) -> Result<Vec<serde_json::Value>, VillageError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(VillageError::Status {
                status: resp.status(),
            });
        }
        let body = resp.text().await?;

        let document: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| VillageError::Conversion {
                message: format!("Failed to parse GeoJSON response: {e}"),
            })?;

        features_from_document(document)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
