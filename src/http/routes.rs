use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ApiError, AppState, Envelope};
use crate::error::StoreResult;
use crate::field_value::FieldValue;
use crate::store::FieldStore;

type ApiResult = Result<Json<Envelope>, ApiError>;

/// Body of `PUT /messages/`.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub message_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Deserialize)]
pub struct ValueQuery {
    pub value: Option<String>,
}

/// Run a store operation on the blocking pool. redb transactions do file I/O
/// and must not stall the async workers.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&FieldStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?;
    Ok(result?)
}

/// `GET /`
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Hello World"}))
}

/// `GET /alive`
pub async fn alive() -> Json<Envelope> {
    Envelope::empty()
}

// ─── Messages ───────────────────────────────────────────────────────────────

/// `GET /messages/`
pub async fn list_messages(State(state): State<AppState>) -> ApiResult {
    let messages = with_store(&state, |store| store.list_all_messages()).await?;
    Ok(Envelope::ok(json!({ "messages": messages })))
}

/// `GET /messages/{message_id}`
pub async fn get_message(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path(message_id) = path?;
    let message = with_store(&state, move |store| store.get_message(&message_id)).await?;
    Ok(Envelope::ok(json!({ "message": message })))
}

/// `PUT /messages/`
pub async fn put_message(
    State(state): State<AppState>,
    body: Result<Json<IncomingMessage>, JsonRejection>,
) -> ApiResult {
    let Json(incoming) = body?;
    let message = with_store(&state, move |store| {
        store.upsert_message(&incoming.message_id, incoming.fields)
    })
    .await?;
    Ok(Envelope::ok(json!({ "message": message })))
}

/// `DELETE /messages/{message_id}`
pub async fn delete_message(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path(message_id) = path?;
    with_store(&state, move |store| store.delete_message(&message_id)).await?;
    Ok(Envelope::empty())
}

// ─── Fields ─────────────────────────────────────────────────────────────────

/// `GET /fields/{message_id}`
pub async fn get_fields(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path(message_id) = path?;
    let message = with_store(&state, move |store| store.get_message(&message_id)).await?;
    Ok(Envelope::ok(json!({ "fields": message.fields })))
}

/// `GET /fields/{message_id}/{field_name}`
pub async fn get_field(
    path: Result<Path<(String, String)>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path((message_id, field_name)) = path?;
    let field = with_store(&state, move |store| {
        store.get_field(&message_id, &field_name)
    })
    .await?;
    Ok(Envelope::ok(json!({ "field": field })))
}

/// `PUT /fields/{message_id}/{field_name}?value=...`
pub async fn put_field(
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<ValueQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path((message_id, field_name)) = path?;
    let Query(query) = query?;
    let value = query
        .value
        .as_deref()
        .map(FieldValue::parse_loose)
        .unwrap_or_default();
    let field = with_store(&state, move |store| {
        store.upsert_field(&message_id, &field_name, value)
    })
    .await?;
    Ok(Envelope::ok(json!({ "field": field })))
}

/// `DELETE /fields/{message_id}/{field_name}`
pub async fn delete_field(
    path: Result<Path<(String, String)>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult {
    let Path((message_id, field_name)) = path?;
    with_store(&state, move |store| {
        store.delete_field(&message_id, &field_name)
    })
    .await?;
    Ok(Envelope::empty())
}
