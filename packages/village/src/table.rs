//! The village table controller.
//!
//! [`VillageTable`] owns the record list. [`VillageTable::commit`] is its
//! only writer; rendering and searching read it and never change it. The
//! slow part of a load lives in [`VillageLoader`], which a caller can run
//! without holding the table.

use std::sync::Arc;

use village_table_geometry::CenterOptions;
use village_table_village_models::{TableRow, VillageFieldMapping, VillageRecord};

use crate::VillageError;
use crate::loader::VillageLoader;
use crate::render::RenderSink;
use crate::sources::FeatureSource;

/// Message shown in place of the table when loading fails.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data.";

/// Outcome of the most recent load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has finished yet.
    Pending,
    /// The last load succeeded.
    Loaded,
    /// The last load failed.
    Failed,
}

/// Loads, holds, renders, and filters village records.
pub struct VillageTable {
    loader: Arc<VillageLoader>,
    records: Option<Vec<VillageRecord>>,
    status: LoadStatus,
}

impl VillageTable {
    /// Creates a table with no records yet.
    #[must_use]
    pub fn new(
        source: Box<dyn FeatureSource>,
        fields: VillageFieldMapping,
        center: CenterOptions,
    ) -> Self {
        Self {
            loader: Arc::new(VillageLoader::new(source, fields, center)),
            records: None,
            status: LoadStatus::Pending,
        }
    }

    /// The loader feeding this table.
    #[must_use]
    pub fn loader(&self) -> Arc<VillageLoader> {
        Arc::clone(&self.loader)
    }

    /// Fetches the document, replaces the record list, and renders it.
    ///
    /// Equivalent to running [`VillageLoader::fetch_records`] and then
    /// [`Self::commit`] while holding the table throughout.
    ///
    /// # Errors
    ///
    /// Returns [`VillageError`] if the source cannot be fetched.
    pub async fn load<S: RenderSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<usize, VillageError> {
        sink.render_loading();
        let fetched = self.loader.fetch_records().await;
        self.commit(fetched, sink)
    }

    /// Stores the outcome of a fetch and renders it.
    ///
    /// On failure the error is logged and rendered as
    /// [`LOAD_ERROR_MESSAGE`]; the record list keeps whatever the last
    /// successful load produced (nothing, on a first load).
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged.
    pub fn commit<S: RenderSink + ?Sized>(
        &mut self,
        fetched: Result<Vec<VillageRecord>, VillageError>,
        sink: &mut S,
    ) -> Result<usize, VillageError> {
        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error fetching data: {e}");
                self.status = LoadStatus::Failed;
                sink.render_error(LOAD_ERROR_MESSAGE);
                return Err(e);
            }
        };

        log::info!("Loaded {} villages", records.len());
        Self::render(&records, sink);
        let count = records.len();
        self.records = Some(records);
        self.status = LoadStatus::Loaded;
        Ok(count)
    }

    /// Renders one row per record, numbered from 1.
    pub fn render<'a, S, I>(records: I, sink: &mut S)
    where
        S: RenderSink + ?Sized,
        I: IntoIterator<Item = &'a VillageRecord>,
    {
        let rows: Vec<TableRow> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| TableRow::from_record(i, record))
            .collect();
        sink.render_rows(&rows);
    }

    /// Records whose name contains `term`, ignoring case, in stored order.
    ///
    /// An empty term matches everything; an unset list matches nothing.
    #[must_use]
    pub fn filter(&self, term: &str) -> Vec<&VillageRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .flatten()
            .filter(|record| record.name_matches(&needle))
            .collect()
    }

    /// Renders the records matching `term`.
    pub fn search<S: RenderSink + ?Sized>(&self, term: &str, sink: &mut S) {
        Self::render(self.filter(term), sink);
    }

    /// Redraws the table in its current state.
    ///
    /// Shows the loading placeholder before the first load finishes and the
    /// error message if loading failed with nothing to fall back on.
    pub fn render_current<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        match (&self.records, self.status) {
            (Some(records), _) => Self::render(records, sink),
            (None, LoadStatus::Failed) => sink.render_error(LOAD_ERROR_MESSAGE),
            (None, _) => sink.render_loading(),
        }
    }

    /// The stored records, or `None` if no load has succeeded.
    #[must_use]
    pub fn records(&self) -> Option<&[VillageRecord]> {
        self.records.as_deref()
    }

    /// Outcome of the most recent load.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Where the data is loaded from.
    #[must_use]
    pub fn location(&self) -> String {
        self.loader.location()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::sources::StaticSource;

    #[derive(Debug, Default)]
    struct RecordingSink {
        events: Vec<String>,
        rows: Vec<TableRow>,
    }

    impl RenderSink for RecordingSink {
        fn render_loading(&mut self) {
            self.events.push("loading".to_string());
        }

        fn render_rows(&mut self, rows: &[TableRow]) {
            self.events.push(format!("rows:{}", rows.len()));
            self.rows = rows.to_vec();
        }

        fn render_error(&mut self, message: &str) {
            self.events.push(format!("error:{message}"));
        }
    }

    /// Fails whenever `failing` is set.
    struct FlakySource {
        failing: Arc<AtomicBool>,
        inner: StaticSource,
    }

    #[async_trait]
    impl FeatureSource for FlakySource {
        async fn fetch_features(&self) -> Result<Vec<serde_json::Value>, VillageError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(VillageError::Conversion {
                    message: "Network response was not ok".to_string(),
                });
            }
            self.inner.fetch_features().await
        }

        fn location(&self) -> String {
            "<flaky>".to_string()
        }
    }

    fn village(name: &str, district: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "NAMOBJ": name, "WADMKC": district, "LUASWH": 100.5 },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]
            }
        })
    }

    fn features() -> Vec<serde_json::Value> {
        vec![
            village("Pancasari", "Sukasada"),
            village("Gitgit", "Sukasada"),
            village("PANJI", "Sukasada"),
            village("Kalibukbuk", "Buleleng"),
        ]
    }

    fn table_with(source: impl FeatureSource + 'static) -> VillageTable {
        VillageTable::new(
            Box::new(source),
            VillageFieldMapping::default(),
            CenterOptions::default(),
        )
    }

    async fn loaded_table() -> VillageTable {
        let mut table = table_with(StaticSource::new(features()));
        table.load(&mut RecordingSink::default()).await.unwrap();
        table
    }

    fn names(records: &[&VillageRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn load_renders_loading_then_rows() {
        let mut table = table_with(StaticSource::new(features()));
        let mut sink = RecordingSink::default();

        let count = table.load(&mut sink).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(sink.events, ["loading", "rows:4"]);
        assert_eq!(sink.rows[0].index, 1);
        assert_eq!(sink.rows[0].name, "Pancasari");
        assert_eq!(sink.rows[0].area, "100.5");
        assert_eq!(sink.rows[0].center, "[0.8,0.8]");
        assert_eq!(sink.rows[3].index, 4);
        assert_eq!(table.status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn failed_first_load_leaves_records_unset() {
        let mut table = table_with(FlakySource {
            failing: Arc::new(AtomicBool::new(true)),
            inner: StaticSource::new(features()),
        });
        let mut sink = RecordingSink::default();

        assert!(table.load(&mut sink).await.is_err());
        assert_eq!(sink.events, ["loading", "error:Failed to load data."]);
        assert!(table.records().is_none());
        assert_eq!(table.status(), LoadStatus::Failed);

        let mut sink = RecordingSink::default();
        table.search("pan", &mut sink);
        assert_eq!(sink.events, ["rows:0"]);
        assert!(table.filter("").is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_records() {
        let failing = Arc::new(AtomicBool::new(false));
        let mut table = table_with(FlakySource {
            failing: Arc::clone(&failing),
            inner: StaticSource::new(features()),
        });
        table.load(&mut RecordingSink::default()).await.unwrap();

        failing.store(true, Ordering::SeqCst);
        let mut sink = RecordingSink::default();
        assert!(table.load(&mut sink).await.is_err());
        assert_eq!(sink.events, ["loading", "error:Failed to load data."]);
        assert_eq!(table.records().map(<[VillageRecord]>::len), Some(4));

        let mut sink = RecordingSink::default();
        table.render_current(&mut sink);
        assert_eq!(sink.events, ["rows:4"]);
    }

    #[tokio::test]
    async fn reload_replaces_records_wholesale() {
        let mut table = loaded_table().await;
        table.loader = Arc::new(VillageLoader::new(
            Box::new(StaticSource::new(vec![village("Anturan", "Buleleng")])),
            VillageFieldMapping::default(),
            CenterOptions::default(),
        ));

        table.load(&mut RecordingSink::default()).await.unwrap();
        assert_eq!(names(&table.filter("")), ["Anturan"]);
    }

    #[tokio::test]
    async fn commit_after_detached_fetch_swaps_records() {
        let failing = Arc::new(AtomicBool::new(false));
        let mut table = table_with(FlakySource {
            failing: Arc::clone(&failing),
            inner: StaticSource::new(features()),
        });
        table.load(&mut RecordingSink::default()).await.unwrap();

        let loader = table.loader();
        failing.store(true, Ordering::SeqCst);
        let fetched = loader.fetch_records().await;
        // The table still answers searches until the result is committed.
        assert_eq!(names(&table.filter("pan")), ["Pancasari", "PANJI"]);

        let mut sink = RecordingSink::default();
        assert!(table.commit(fetched, &mut sink).is_err());
        assert_eq!(sink.events, ["error:Failed to load data."]);
        assert_eq!(table.status(), LoadStatus::Failed);
        assert_eq!(table.records().map(<[VillageRecord]>::len), Some(4));

        failing.store(false, Ordering::SeqCst);
        let fetched = loader.fetch_records().await;
        let mut sink = RecordingSink::default();
        assert_eq!(table.commit(fetched, &mut sink).unwrap(), 4);
        assert_eq!(sink.events, ["rows:4"]);
        assert_eq!(table.status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn empty_term_matches_everything_in_order() {
        let table = loaded_table().await;
        assert_eq!(
            names(&table.filter("")),
            ["Pancasari", "Gitgit", "PANJI", "Kalibukbuk"]
        );
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let table = loaded_table().await;
        assert_eq!(names(&table.filter("pan")), ["Pancasari", "PANJI"]);
        assert_eq!(names(&table.filter("GIT")), ["Gitgit"]);
        assert!(table.filter("xyz").is_empty());
    }

    #[tokio::test]
    async fn search_matches_names_only() {
        let table = loaded_table().await;
        assert!(table.filter("Sukasada").is_empty());
        assert!(table.filter("100.5").is_empty());
    }

    #[tokio::test]
    async fn search_is_idempotent_and_does_not_mutate() {
        let table = loaded_table().await;
        let once = names(&table.filter("pan"));
        let twice = names(&table.filter("pan"));
        assert_eq!(once, twice);
        assert_eq!(table.records().map(<[VillageRecord]>::len), Some(4));
    }

    #[tokio::test]
    async fn search_renders_renumbered_rows() {
        let table = loaded_table().await;
        let mut sink = RecordingSink::default();
        table.search("panji", &mut sink);
        assert_eq!(sink.rows.len(), 1);
        assert_eq!(sink.rows[0].index, 1);
        assert_eq!(sink.rows[0].name, "PANJI");
    }

    #[test]
    fn render_current_shows_loading_before_first_load() {
        let table = table_with(StaticSource::new(features()));
        let mut sink = RecordingSink::default();
        table.render_current(&mut sink);
        assert_eq!(sink.events, ["loading"]);
    }

    #[test]
    fn rendering_empty_list_produces_no_rows() {
        let empty: Vec<VillageRecord> = Vec::new();
        let mut sink = RecordingSink::default();
        VillageTable::render(&empty, &mut sink);
        assert_eq!(sink.events, ["rows:0"]);
    }
}
