//! HTTP handler functions for the village table.

use actix_web::{HttpResponse, web};
use village_table_server_models::{ApiError, ApiHealth, ApiReload, ApiVillage, SearchParams};
use village_table_village::table::LoadStatus;
use village_table_village::{HtmlTableSink, VillageError};

use crate::AppState;
use crate::page::render_page;

/// Response header carrying the table's load status.
pub const LOAD_STATUS_HEADER: &str = "X-Load-Status";

const fn status_label(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Pending => "pending",
        LoadStatus::Loaded => "loaded",
        LoadStatus::Failed => "failed",
    }
}

/// Renders the table body for `term`.
///
/// Before any load has succeeded the body shows the loading or error state
/// rather than an empty search result.
async fn render_rows(state: &AppState, term: &str) -> (String, &'static str) {
    let mut sink = HtmlTableSink::new();
    let table = state.table.read().await;

    if table.records().is_some() {
        table.search(term, &mut sink);
    } else {
        table.render_current(&mut sink);
    }
    (sink.into_html(), status_label(table.status()))
}

/// `GET /`
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let (rows, status) = render_rows(&state, "").await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&rows, status))
}

/// `GET /rows?q=term`
///
/// Table body fragment for the search input.
pub async fn rows(state: web::Data<AppState>, params: web::Query<SearchParams>) -> HttpResponse {
    let (rows, status) = render_rows(&state, params.term()).await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((LOAD_STATUS_HEADER, status))
        .body(rows)
}

/// `GET /api/villages?q=term`
///
/// Villages whose name contains the term, as JSON.
pub async fn villages(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> HttpResponse {
    let table = state.table.read().await;
    let villages: Vec<ApiVillage> = table
        .filter(params.term())
        .into_iter()
        .enumerate()
        .map(|(i, record)| ApiVillage::from_record(i, record))
        .collect();
    HttpResponse::Ok().json(villages)
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let (loaded, record_count) = state
        .table
        .read()
        .await
        .records()
        .map_or((false, 0), |records| (true, records.len()));

    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        loaded,
        record_count,
    })
}

/// `POST /api/reload`
///
/// Fetches the data file again and replaces the stored villages. Searches
/// keep answering from the previous list until the new one is in.
pub async fn reload(state: web::Data<AppState>) -> HttpResponse {
    match refresh_table(&state).await {
        Ok(record_count) => HttpResponse::Ok().json(ApiReload { record_count }),
        Err(e) => HttpResponse::BadGateway().json(ApiError {
            error: format!("Failed to load data: {e}"),
        }),
    }
}

/// Loads the table without holding it during the fetch.
///
/// The write lock is only taken to swap in the result.
///
/// # Errors
///
/// Returns the load error, already logged by the table.
pub async fn refresh_table(state: &AppState) -> Result<usize, VillageError> {
    let loader = state.table.read().await.loader();
    let fetched = loader.fetch_records().await;
    state
        .table
        .write()
        .await
        .commit(fetched, &mut HtmlTableSink::new())
}
