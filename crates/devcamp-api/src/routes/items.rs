use axum::Json;
use axum::http::StatusCode;
use bson::Document;
use devcamp_lists::{ChildListResponse, ItemResponse, Resource, Resources};
use devcamp_query::{ListEnvelope, QueryParams};
use serde_json::Value;

use super::blocking;
use crate::error::ApiError;
use crate::json;
use crate::state::AppState;

/// Picks the resource a handler serves.
pub type Select = fn(&Resources) -> &Resource;

pub type ItemResult = Result<Json<ItemResponse<Value>>, ApiError>;

pub async fn list(
    state: AppState,
    select: Select,
    pairs: Vec<(String, String)>,
) -> Result<Json<ListEnvelope<Value>>, ApiError> {
    let params = QueryParams::from_pairs(pairs);
    let envelope = blocking(&state, move |lists, resources| {
        lists.advanced_results(select(resources), &params)
    })
    .await?;
    Ok(Json(envelope.map(json::document)))
}

pub async fn children(
    state: AppState,
    select: Select,
    parent_id: String,
) -> Result<Json<ChildListResponse<Value>>, ApiError> {
    let docs = blocking(&state, move |lists, resources| {
        lists.list_children(select(resources), &parent_id)
    })
    .await?;
    Ok(Json(ChildListResponse::new(json::documents(docs))))
}

pub async fn get(state: AppState, select: Select, id: String) -> ItemResult {
    let doc = blocking(&state, move |lists, resources| {
        lists.get(select(resources), &id)
    })
    .await?;
    Ok(Json(ItemResponse::new(json::document(doc))))
}

pub async fn create(
    state: AppState,
    select: Select,
    parent_id: Option<String>,
    body: Document,
) -> Result<(StatusCode, Json<ItemResponse<Value>>), ApiError> {
    let doc = blocking(&state, move |lists, resources| {
        let resource = select(resources);
        match &parent_id {
            Some(parent_id) => lists.create_child(resource, parent_id, body),
            None => lists.create(resource, body),
        }
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::new(json::document(doc))),
    ))
}

pub async fn update(state: AppState, select: Select, id: String, body: Document) -> ItemResult {
    let doc = blocking(&state, move |lists, resources| {
        lists.update(select(resources), &id, body)
    })
    .await?;
    Ok(Json(ItemResponse::new(json::document(doc))))
}

pub async fn delete(state: AppState, select: Select, id: String) -> ItemResult {
    blocking(&state, move |lists, resources| {
        lists.delete(select(resources), &id)
    })
    .await?;
    Ok(Json(ItemResponse::new(serde_json::json!({}))))
}
