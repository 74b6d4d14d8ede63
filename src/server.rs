//! HTTP server for the browse pipeline.
//!
//! Serves the archive's search and detail views as JSON over a corpus
//! loaded once at startup. A corpus that fails to load stops the server
//! before it binds.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/browsearchives?s=&width=` | Browse or search; summary plus card columns |
//! | `GET`  | `/browsearchives/archives/{slug}` | Transcript detail |
//! | `GET`  | `/collections/{slug}?width=` | Collection page |
//! | `GET`  | `/recent?width=` | Recently added transcripts |
//! | `GET`  | `/health` | Health check (returns version and record count) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "transcript not found: foo" } }
//! ```
//!
//! Error codes: `not_found` (404), `internal` (500). Malformed query
//! parameters are rejected by Axum's extractors before a handler runs.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the static front end
//! can call the API from any host.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use oral_archive_core::detail::{CollectionPage, RecentEntry, TranscriptPage};
use oral_archive_core::render::RenderedResults;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::collections::{get_collection, recent};
use crate::config::Config;
use crate::corpus::{load_corpus, Corpus};
use crate::get::get_transcript;
use crate::search::{browse, render_options};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    /// Read-only for the life of the server; no locking needed.
    corpus: Arc<Corpus>,
}

/// Load the corpus and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let corpus = load_corpus(config)?;
    let app = router(config.clone(), corpus);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "archive server listening");
    println!("Archive server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router over an already-loaded corpus.
pub fn router(config: Config, corpus: Corpus) -> Router {
    let state = AppState {
        config: Arc::new(config),
        corpus: Arc::new(corpus),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/browsearchives", get(handle_browse))
        .route("/browsearchives/archives/{slug}", get(handle_transcript))
        .route("/collections/{slug}", get(handle_collection))
        .route("/recent", get(handle_recent))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Map lookup failures to 404, everything else to 500.
fn classify(err: anyhow::Error) -> AppError {
    let msg = err.to_string();
    if msg.contains("not found") {
        not_found(msg)
    } else {
        tracing::error!(error = %format!("{:#}", err), "request failed");
        internal(msg)
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    records: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.corpus.store.len(),
    })
}

// ============ GET /browsearchives ============

/// Query string for the browse page. `s` seeds the search box.
#[derive(Debug, Deserialize)]
struct BrowseParams {
    s: Option<String>,
    width: Option<u32>,
}

/// Browse response: the query echoed back plus the rendered results.
#[derive(Serialize)]
struct BrowseResponse {
    query: String,
    #[serde(flatten)]
    view: RenderedResults,
}

async fn handle_browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowseResponse>, AppError> {
    let options = render_options(&state.config, params.width).map_err(classify)?;
    let query = params.s.unwrap_or_default();
    let view = browse(&state.corpus, options, Some(query.clone()));
    Ok(Json(BrowseResponse { query, view }))
}

// ============ GET /browsearchives/archives/{slug} ============

async fn handle_transcript(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TranscriptPage>, AppError> {
    get_transcript(&state.corpus, &slug).map(Json).map_err(classify)
}

// ============ GET /collections/{slug} ============

#[derive(Debug, Deserialize)]
struct WidthParams {
    width: Option<u32>,
}

async fn handle_collection(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<WidthParams>,
) -> Result<Json<CollectionPage>, AppError> {
    get_collection(&state.corpus, &state.config, &slug, params.width)
        .map(Json)
        .map_err(classify)
}

// ============ GET /recent ============

async fn handle_recent(
    State(state): State<AppState>,
    Query(params): Query<WidthParams>,
) -> Json<Vec<RecentEntry>> {
    Json(recent(&state.corpus, &state.config, params.width))
}
