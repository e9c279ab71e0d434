//! HTTP surface: health, manifest, and the stream route.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use sluice_api::{fetch_all, AddonClient};
use sluice_core::{auto_pick, rank, AppConfig, RawStream};
use sluice_parse::KeywordExtractor;

/// Addon manifest, served verbatim.
const MANIFEST: &str = include_str!("../assets/manifest.json");

/// Shared, immutable per-process state.
pub struct AppState {
    pub config: AppConfig,
    pub providers: Vec<AddonClient>,
    pub extractor: KeywordExtractor,
}

/// Per-request options, carried as query parameters.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Device profile key; unknown keys fall back to the default profile.
    profile: Option<String>,
    /// Collapse the list to a single recommendation.
    #[serde(default)]
    auto_pick: bool,
}

#[derive(Debug, Serialize)]
struct StreamsBody {
    streams: Vec<RawStream>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/manifest.json", get(manifest))
        .route("/stream/{media_type}/{media_id}", get(streams))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn manifest() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], MANIFEST)
}

async fn streams(
    State(state): State<Arc<AppState>>,
    Path((media_type, media_id)): Path<(String, String)>,
    Query(query): Query<StreamQuery>,
) -> Json<StreamsBody> {
    // Addon clients request `/stream/movie/tt123.json`; accept the bare
    // ID as well.
    let media_id = media_id.strip_suffix(".json").unwrap_or(&media_id);

    let raw = fetch_all(&state.providers, &media_type, media_id).await;
    let profile = state.config.resolve_profile(query.profile.as_deref());
    info!(
        %media_type,
        %media_id,
        candidates = raw.len(),
        profile = %profile.name,
        auto_pick = query.auto_pick,
        "handling stream request"
    );

    let outcome = rank(raw, profile, &state.extractor, &state.config.source_priority);
    let picked = if query.auto_pick {
        auto_pick(&outcome, &state.config.source_priority)
    } else {
        outcome.ranked
    };

    Json(StreamsBody {
        streams: picked.into_iter().map(|entry| entry.stream).collect(),
    })
}
