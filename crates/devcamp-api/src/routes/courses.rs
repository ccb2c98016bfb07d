use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use bson::Document;
use devcamp_lists::{ChildListResponse, ItemResponse, Resource, Resources};
use devcamp_query::ListEnvelope;
use serde_json::Value;

use super::items::{self, ItemResult};
use crate::error::ApiError;
use crate::state::AppState;

fn courses(resources: &Resources) -> &Resource {
    &resources.courses
}

/// Every course, with its bootcamp's name and description joined in.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListEnvelope<Value>>, ApiError> {
    let Query(pairs) = query?;
    items::list(state, courses, pairs).await
}

pub async fn for_bootcamp(
    State(state): State<AppState>,
    Path(bootcamp_id): Path<String>,
) -> Result<Json<ChildListResponse<Value>>, ApiError> {
    items::children(state, courses, bootcamp_id).await
}

pub async fn create(
    State(state): State<AppState>,
    Path(bootcamp_id): Path<String>,
    body: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<Value>>), ApiError> {
    let Json(body) = body?;
    items::create(state, courses, Some(bootcamp_id), body).await
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ItemResult {
    items::get(state, courses, id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Document>, JsonRejection>,
) -> ItemResult {
    let Json(body) = body?;
    items::update(state, courses, id, body).await
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ItemResult {
    items::delete(state, courses, id).await
}
