//! Fetching and normalizing village records.
//!
//! [`VillageLoader`] holds no records, so a fetch can run while the table it
//! feeds keeps serving the previous list.

use village_table_geometry::CenterOptions;
use village_table_village_models::{VillageFieldMapping, VillageRecord};

use crate::VillageError;
use crate::normalize::normalize_features;
use crate::sources::FeatureSource;

/// A feature source plus the settings that turn its features into records.
pub struct VillageLoader {
    source: Box<dyn FeatureSource>,
    fields: VillageFieldMapping,
    center: CenterOptions,
}

impl VillageLoader {
    #[must_use]
    pub fn new(
        source: Box<dyn FeatureSource>,
        fields: VillageFieldMapping,
        center: CenterOptions,
    ) -> Self {
        Self {
            source,
            fields,
            center,
        }
    }

    /// Fetches the document and normalizes every feature.
    ///
    /// # Errors
    ///
    /// Returns [`VillageError`] if the source cannot be fetched.
    pub async fn fetch_records(&self) -> Result<Vec<VillageRecord>, VillageError> {
        log::info!("Loading village data from {}", self.source.location());
        let features = self.source.fetch_features().await?;
        Ok(normalize_features(&features, &self.fields, &self.center))
    }

    /// Where the data is loaded from.
    #[must_use]
    pub fn location(&self) -> String {
        self.source.location()
    }
}
