//! Local file source.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{FeatureSource, features_from_document};
use crate::VillageError;

/// Reads the `GeoJSON` document from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FeatureSource for FileSource {
    async fn fetch_features(&self) -> Result<Vec<serde_json::Value>, VillageError> {
        let body = tokio::fs::read(&self.path).await?;
        let document: serde_json::Value = serde_json::from_slice(&body)?;
        features_from_document(document)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
