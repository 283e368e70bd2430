use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

use crate::plan_store::{fetch_page, gather_stats, DistinctColumn, MissionPlanEntry, PlanStore};
use crate::query::{
    clamp_limit, clamp_offset, reject_unknown_params, strict_validate, validate_search_term,
    FilterSet,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::task;

use super::error::ApiError;
use super::state::*;
use super::{log_requests, ServerConfig};

pub const SERVICE_NAME: &str = "cassini-huygens-mcp-server";

#[derive(Serialize)]
struct Pagination {
    total: i64,
    limit: i64,
    offset: i64,
    count: usize,
}

#[derive(Serialize)]
struct ListResponse {
    data: Vec<MissionPlanEntry>,
    pagination: Pagination,
    filters: Option<FilterSet>,
}

#[derive(Serialize)]
struct EntryResponse {
    data: MissionPlanEntry,
}

#[derive(Serialize)]
struct SearchResponse {
    data: Vec<MissionPlanEntry>,
    query: String,
    count: usize,
}

#[derive(Serialize)]
struct DistinctResponse {
    data: Vec<String>,
    count: usize,
}

async fn get_mission_plan(
    State(store): State<GuardedPlanStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListResponse>, ApiError> {
    reject_unknown_params(&params).map_err(|invalid| ApiError::UnknownFilters { invalid })?;

    // Strict validation first; the clamp below is then a formality on this
    // route, but stays so the composition matches the unvalidated paths.
    strict_validate(
        params.get("limit").map(String::as_str),
        params.get("offset").map(String::as_str),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let filters = FilterSet::from_params(&params);
    let limit = clamp_limit(params.get("limit").and_then(|s| s.parse().ok()));
    let offset = clamp_offset(params.get("offset").and_then(|s| s.parse().ok()));

    let (entries, total) = fetch_page(store, filters.clone(), limit, offset).await?;

    Ok(Json(ListResponse {
        pagination: Pagination {
            total,
            limit,
            offset,
            count: entries.len(),
        },
        data: entries,
        filters: if filters.is_empty() {
            None
        } else {
            Some(filters)
        },
    }))
}

async fn get_mission_plan_entry(
    State(store): State<GuardedPlanStore>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>, ApiError> {
    let id: i64 = id
        .parse()
        .ok()
        .filter(|value| *value >= 1)
        .ok_or_else(|| ApiError::BadRequest("ID must be a positive integer".to_string()))?;

    let entry = task::spawn_blocking(move || store.get_entry_by_id(id))
        .await
        .map_err(anyhow::Error::from)??;

    match entry {
        Some(entry) => Ok(Json(EntryResponse { data: entry })),
        None => Err(ApiError::NotFound(format!(
            "Mission plan entry with id {} not found",
            id
        ))),
    }
}

async fn search_mission_plan(
    State(store): State<GuardedPlanStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = validate_search_term(params.get("q").map(String::as_str))
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .to_string();

    let limit = clamp_limit(params.get("limit").and_then(|s| s.parse().ok()));

    let query = term.clone();
    let results = task::spawn_blocking(move || store.search_text(&term, limit))
        .await
        .map_err(anyhow::Error::from)??;

    Ok(Json(SearchResponse {
        count: results.len(),
        data: results,
        query,
    }))
}

async fn get_distinct(
    store: GuardedPlanStore,
    column: DistinctColumn,
) -> Result<Json<DistinctResponse>, ApiError> {
    let values = task::spawn_blocking(move || store.list_distinct(column))
        .await
        .map_err(anyhow::Error::from)??;

    Ok(Json(DistinctResponse {
        count: values.len(),
        data: values,
    }))
}

async fn get_teams(
    State(store): State<GuardedPlanStore>,
) -> Result<Json<DistinctResponse>, ApiError> {
    get_distinct(store, DistinctColumn::Team).await
}

async fn get_targets(
    State(store): State<GuardedPlanStore>,
) -> Result<Json<DistinctResponse>, ApiError> {
    get_distinct(store, DistinctColumn::Target).await
}

async fn get_spass_types(
    State(store): State<GuardedPlanStore>,
) -> Result<Json<DistinctResponse>, ApiError> {
    get_distinct(store, DistinctColumn::SpassType).await
}

async fn get_stats(
    State(store): State<GuardedPlanStore>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = gather_stats(store).await?;
    Ok(Json(json!({ "data": stats })))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": "connected",
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "Route not found",
            "availableRoutes": {
                "missionPlan": "/api/mission-plan",
                "metadata": "/api/metadata",
                "health": "/health",
            },
        })),
    )
}

pub fn make_app(config: ServerConfig, plan_store: Arc<dyn PlanStore>) -> Router {
    let state = ServerState { config, plan_store };

    let mission_plan_routes: Router = Router::new()
        .route("/", get(get_mission_plan))
        .route("/{id}", get(get_mission_plan_entry))
        .route("/search/text", get(search_mission_plan))
        .with_state(state.clone());

    let metadata_routes: Router = Router::new()
        .route("/teams", get(get_teams))
        .route("/targets", get(get_targets))
        .route("/spass-types", get(get_spass_types))
        .route("/stats", get(get_stats))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health))
        .nest("/api/mission-plan", mission_plan_routes)
        .nest("/api/metadata", metadata_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(plan_store: Arc<dyn PlanStore>, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, plan_store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
