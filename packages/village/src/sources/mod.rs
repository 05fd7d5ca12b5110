//! Feature sources for the village boundary document.
//!
//! Each source produces the raw `features` array of a `GeoJSON`
//! `FeatureCollection`. Normalization happens afterwards in
//! [`crate::normalize`].

pub mod file;
pub mod url;

use async_trait::async_trait;
use village_table_village_models::DataSourceConfig;

use crate::VillageError;

/// Something that can produce the raw features of the village document.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetches the document once and returns its `features` array.
    ///
    /// # Errors
    ///
    /// Returns [`VillageError`] if the document cannot be read or has no
    /// `features` array.
    async fn fetch_features(&self) -> Result<Vec<serde_json::Value>, VillageError>;

    /// Where the document is read from, for logs.
    fn location(&self) -> String;
}

/// Builds the source described by `config`.
#[must_use]
pub fn from_config(client: &reqwest::Client, config: &DataSourceConfig) -> Box<dyn FeatureSource> {
    match config {
        DataSourceConfig::File { path } => Box::new(file::FileSource::new(path.clone())),
        DataSourceConfig::Url { url } => Box::new(url::UrlSource::new(client.clone(), url.clone())),
    }
}

/// Pulls the `features` array out of a parsed `FeatureCollection`.
///
/// # Errors
///
/// Returns [`VillageError::Conversion`] if there is no `features` array.
pub fn features_from_document(
    document: serde_json::Value,
) -> Result<Vec<serde_json::Value>, VillageError> {
    match document {
        serde_json::Value::Object(mut object) => match object.remove("features") {
            Some(serde_json::Value::Array(features)) => Ok(features),
            _ => Err(VillageError::Conversion {
                message: "No features array in GeoJSON document".to_string(),
            }),
        },
        _ => Err(VillageError::Conversion {
            message: "GeoJSON document is not an object".to_string(),
        }),
    }
}

/// A fixed list of features, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    features: Vec<serde_json::Value>,
}

impl StaticSource {
    /// Creates a source that always returns `features`.
    #[must_use]
    pub const fn new(features: Vec<serde_json::Value>) -> Self {
        Self { features }
    }
}

#[async_trait]
impl FeatureSource for StaticSource {
    async fn fetch_features(&self) -> Result<Vec<serde_json::Value>, VillageError> {
        Ok(self.features.clone())
    }

    fn location(&self) -> String {
        "<static>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_features_array() {
        let document = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{ "properties": {}, "geometry": null }]
        });
        assert_eq!(features_from_document(document).unwrap().len(), 1);
    }

    #[test]
    fn rejects_document_without_features() {
        let err = features_from_document(serde_json::json!({ "type": "FeatureCollection" }))
            .unwrap_err();
        assert!(matches!(err, VillageError::Conversion { .. }));

        let err = features_from_document(serde_json::json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, VillageError::Conversion { .. }));
    }

    #[test]
    fn config_selects_source() {
        let client = reqwest::Client::new();
        let source = from_config(&client, &DataSourceConfig::from_location("desa.json"));
        assert_eq!(source.location(), "desa.json");

        let source = from_config(
            &client,
            &DataSourceConfig::from_location("http://localhost:9/desa.json"),
        );
        assert_eq!(source.location(), "http://localhost:9/desa.json");
    }
}
