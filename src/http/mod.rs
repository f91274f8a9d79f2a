//! Thin HTTP transport over [`FieldStore`](crate::store::FieldStore).
//!
//! Handlers validate nothing themselves; they pass raw path/query/body values
//! to the store and wrap whatever comes back in the response envelope.

pub mod envelope;
pub mod routes;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;

use crate::store::FieldStore;

pub use envelope::{ApiError, Envelope};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FieldStore>,
}

impl AppState {
    pub fn new(store: FieldStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/alive", get(routes::alive))
        .route(
            "/messages",
            get(routes::list_messages).put(routes::put_message),
        )
        .route(
            "/messages/",
            get(routes::list_messages).put(routes::put_message),
        )
        .route(
            "/messages/{message_id}",
            get(routes::get_message).delete(routes::delete_message),
        )
        .route("/fields/{message_id}", get(routes::get_fields))
        .route(
            "/fields/{message_id}/{field_name}",
            get(routes::get_field)
                .put(routes::put_field)
                .delete(routes::delete_field),
        )
        .with_state(state)
}
