//! Thin HTTP wrapper over the in-memory index. Documents, stop words
//! and stem rules are loaded at startup; `POST /reload` re-reads the
//! document source, rebuilds off to the side and publishes the new
//! index atomically. Stop words and stems are fixed for the lifetime of
//! the process; changing them means a restart.

use anyhow::Result;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sift_core::{build, source, IndexHandle, QueryEngine, QueryMode, StemTable, StopWordSet};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub texts: bool,
}
fn default_mode() -> String { "or".into() }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: QueryMode,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub handle: IndexHandle,
    pub stopwords: Arc<StopWordSet>,
    pub stems: Arc<StemTable>,
    pub docs_path: PathBuf,
    pub admin_token: Option<String>,
}

pub fn build_app(docs: &Path, stopwords: Option<&Path>, stems: Option<&Path>) -> Result<Router> {
    let stopwords = Arc::new(match stopwords {
        Some(p) => StopWordSet::from_json_reader(File::open(p)?)?,
        None => StopWordSet::default(),
    });
    let stems = Arc::new(match stems {
        Some(p) => StemTable::from_json_reader(File::open(p)?)?,
        None => StemTable::default(),
    });
    let documents = source::read_documents(docs)?;
    let index = build(documents, &stopwords, &stems)?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_tokens = index.num_tokens(),
        "index built"
    );

    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState {
        handle: IndexHandle::new(index),
        stopwords,
        stems,
        docs_path: docs.to_path_buf(),
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let mode: QueryMode = params
        .mode
        .parse()
        .map_err(|e: sift_core::Error| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let index = state.handle.load();
    let engine = QueryEngine::new(&index, &state.stopwords, &state.stems);
    let ids = match mode {
        // Phrase patterns run against the raw query string, spaces included.
        QueryMode::Phrase => engine.query_phrase(&params.q),
        QueryMode::Single | QueryMode::Or => {
            let terms: Vec<String> = params.q.split_whitespace().map(str::to_string).collect();
            engine.query(mode, &terms)
        }
    };

    let mut results = Vec::with_capacity(ids.len());
    for id in &ids {
        let text = if params.texts {
            index.doc_text(*id).ok().map(str::to_string)
        } else {
            None
        };
        results.push(SearchHit { doc_id: *id, text });
    }

    Ok(Json(SearchResponse {
        query: params.q,
        mode,
        took_s: start.elapsed().as_secs_f64(),
        total_hits: results.len(),
        results,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    AxumPath(doc_id): AxumPath<u32>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let index = state.handle.load();
    match index.doc_text(doc_id) {
        Ok(text) => Ok(Json(serde_json::json!({ "doc_id": doc_id, "text": text }))),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        )),
    }
}

async fn reload_handler(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let documents = source::read_documents(&state.docs_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let index = build(documents, &state.stopwords, &state.stems)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let num_docs = index.num_docs();
    let num_tokens = index.num_tokens();
    state.handle.swap(index);
    tracing::info!(num_docs, num_tokens, "index reloaded");
    Ok(Json(serde_json::json!({ "num_docs": num_docs, "num_tokens": num_tokens })))
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
