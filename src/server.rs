//! Axum HTTP server: JSON endpoints over the loaded draw history.
//!
//! The draw history is loaded once and shared as `Arc<ServerContext>`. Each
//! request builds its own [`Session`], so requests never share results.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/draws` | Draw history since the rules change; `?all=true` for every feed row |
//! | POST | `/evaluate` | Results and totals for one ticket |
//! | POST | `/search` | Profitability search over random tickets |

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::{MAX_BATCH_SIZE, MAX_SEARCH_ATTEMPTS};
use crate::sampler::seeded_rng;
use crate::search::{search_profitable, SearchConfig};
use crate::session::{Session, SortColumn, SortOrder};
use crate::types::{HistoricalDraw, SearchOutcome, Ticket};

/// Read-only data shared by all handlers.
pub struct ServerContext {
    /// Draws on or after the rules change; every evaluation runs on these.
    pub draws: Arc<Vec<HistoricalDraw>>,
    /// Every well-formed feed row, served by `/draws?all=true`.
    pub all_draws: Arc<Vec<HistoricalDraw>>,
    /// Limits used when a search request leaves them out.
    pub search: SearchConfig,
}

pub type AppState = Arc<ServerContext>;

pub fn create_router(ctx: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/draws", get(handle_get_draws))
        .route("/evaluate", post(handle_evaluate))
        .route("/search", post(handle_search))
        .layer(cors)
        .with_state(ctx)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct DrawsQuery {
    all: bool,
}

#[derive(Deserialize)]
struct EvaluateRequest {
    numbers: Vec<u8>,
    lucky_number: u8,
    sort_column: Option<SortColumn>,
    sort_order: Option<SortOrder>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchRequest {
    max_attempts: Option<u32>,
    batch_size: Option<u32>,
    seed: Option<u64>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg })))
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_get_draws(
    State(ctx): State<AppState>,
    Query(query): Query<DrawsQuery>,
) -> Json<serde_json::Value> {
    let draws = if query.all { &ctx.all_draws } else { &ctx.draws };
    Json(serde_json::json!({
        "count": draws.len(),
        "draws": draws.as_slice(),
    }))
}

// ── POST handlers ───────────────────────────────────────────────────

async fn handle_evaluate(
    State(ctx): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ticket = Ticket::new(&req.numbers, req.lucky_number)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let mut session = Session::new(ctx.draws.clone());
    session.set_selection(&ticket);
    session.calculate_results();
    if let Some(column) = req.sort_column {
        let order = req.sort_order.unwrap_or(column.default_order());
        session.sort_with(column, order);
    } else if let Some(order) = req.sort_order {
        session.sort_with(session.sort_column(), order);
    }

    Ok(Json(serde_json::json!({
        "ticket": ticket,
        "sort_column": session.sort_column(),
        "sort_order": session.sort_order(),
        "summary": session.summary(),
        "results": session.results(),
    })))
}

async fn handle_search(
    State(ctx): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let config = SearchConfig {
        max_attempts: req.max_attempts.unwrap_or(ctx.search.max_attempts),
        batch_size: req.batch_size.unwrap_or(ctx.search.batch_size),
    };
    if config.max_attempts > MAX_SEARCH_ATTEMPTS {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!("max_attempts must be at most {MAX_SEARCH_ATTEMPTS}"),
        ));
    }
    if config.batch_size > MAX_BATCH_SIZE {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!("batch_size must be at most {MAX_BATCH_SIZE}"),
        ));
    }

    info!(
        "search request: max_attempts={} batch_size={} seed={:?}",
        config.max_attempts, config.batch_size, req.seed
    );
    let outcome = search_profitable(&ctx.draws, config, seeded_rng(req.seed), None).await;

    let mut session = Session::new(ctx.draws.clone());
    session.apply_search_outcome(&outcome);
    let summary = match outcome {
        SearchOutcome::Found { .. } => Some(session.summary()),
        _ => None,
    };

    Ok(Json(serde_json::json!({
        "outcome": outcome,
        "message": session.message(),
        "summary": summary,
    })))
}
