use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::StoreError;

/// `{"status": "ok", "data": ...}` or `{"status": "error", "reason": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Ok { data: Value },
    Error { reason: String },
}

impl Envelope {
    pub fn ok(data: Value) -> Json<Self> {
        Json(Envelope::Ok { data })
    }

    pub fn empty() -> Json<Self> {
        Self::ok(Value::Null)
    }
}

/// Every expected store failure becomes a 400 carrying the reason verbatim.
/// Storage faults and failed blocking tasks become a 500 with a generic reason.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = match self {
            ApiError::Store(StoreError::Storage(err)) => {
                error!(event = "storage_fault", error = %err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error.".to_string(),
                )
            }
            ApiError::Store(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
            ApiError::Internal(detail) => {
                error!(event = "handler_fault", error = %detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };
        (status, Json(Envelope::Error { reason })).into_response()
    }
}
