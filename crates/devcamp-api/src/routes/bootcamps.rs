use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use bson::Document;
use devcamp_lists::{ItemResponse, Resource, Resources};
use devcamp_query::ListEnvelope;
use serde_json::Value;

use super::items::{self, ItemResult};
use crate::error::ApiError;
use crate::state::AppState;

fn bootcamps(resources: &Resources) -> &Resource {
    &resources.bootcamps
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListEnvelope<Value>>, ApiError> {
    let Query(pairs) = query?;
    items::list(state, bootcamps, pairs).await
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<Value>>), ApiError> {
    let Json(body) = body?;
    items::create(state, bootcamps, None, body).await
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ItemResult {
    items::get(state, bootcamps, id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Document>, JsonRejection>,
) -> ItemResult {
    let Json(body) = body?;
    items::update(state, bootcamps, id, body).await
}

/// Removes the bootcamp together with its courses and reviews.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ItemResult {
    items::delete(state, bootcamps, id).await
}
