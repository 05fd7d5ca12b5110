#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the village table application.
//!
//! Loads the village boundary file in the background on startup, serves the
//! searchable table page, the `/rows` fragments its search input requests,
//! and a small JSON API over the same records.

pub mod config;
pub mod handlers;
pub mod page;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use tokio::sync::RwLock;
use village_table_village::{VillageTable, sources};

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// The village table. Only committing a finished load writes.
    pub table: RwLock<VillageTable>,
}

impl AppState {
    /// Wraps a table for sharing between workers.
    #[must_use]
    pub fn new(table: VillageTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/rows", web::get().to(handlers::rows))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/villages", web::get().to(handlers::villages))
                .route("/reload", web::post().to(handlers::reload)),
        );
}

/// Starts the village table server.
///
/// Builds the table from `config`, starts the initial load in the
/// background, and runs the Actix-Web HTTP server until it stops. The
/// caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout())
        .build()
        .map_err(std::io::Error::other)?;
    let source = sources::from_config(&client, &config.source);
    let table = VillageTable::new(source, config.fields, config.center);

    let state = web::Data::new(AppState::new(table));

    let loader = state.clone();
    actix_web::rt::spawn(async move {
        // Failures are logged by the table and shown on the page.
        let _ = handlers::refresh_table(&loader).await;
    });

    let bind_addr = config.bind_addr;
    let port = config.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
