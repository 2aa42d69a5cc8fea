//! HTTP API Boundary
//!
//! TigerStyle: One route per store operation, no logic beyond identity
//! assignment and error rendering.
//!
//! Routes:
//! - `POST /create` body `{"tableName": "..."}` — create a table
//! - `GET /:table?limit=&skip=` — list records
//! - `GET /:table/:id` — record by id (`null` on soft miss)
//! - `POST /:table` — insert; the server stamps a fresh `_uuid` and echoes
//!   the stored record back
//! - `PUT /:table/:id` — shallow partial update
//! - `DELETE /:table/:id` — delete a record
//! - `DELETE /:table` — delete a table
//!
//! A failed operation renders as a status code plus `{"error": "..."}`; it
//! never takes the server down.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::codec::Record;
use crate::error::StoreError;
use crate::store::RecordStore;
use crate::UUID_FIELD;

// =============================================================================
// Router
// =============================================================================

/// Build the API router over a shared store.
pub fn router(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route("/create", post(create_table))
        .route(
            "/:table",
            get(list_records).post(insert_record).delete(drop_table),
        )
        .route(
            "/:table/:id",
            get(find_record).put(update_record).delete(remove_record),
        )
        .with_state(store)
}

/// Stamp a fresh identity into the record, replacing any client-supplied
/// value. Identity is owned by this boundary; the store never assigns it.
pub fn assign_record_id(record: &mut Record) -> String {
    let id = Uuid::new_v4().to_string();
    record.insert(UUID_FIELD.to_string(), Value::String(id.clone()));
    id
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTableRequest {
    /// Name of the table to create
    table_name: String,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    /// Maximum number of records to return
    limit: Option<usize>,
    /// Offset into the table's insertion order
    skip: Option<usize>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_table(
    State(store): State<Arc<RecordStore>>,
    Json(request): Json<CreateTableRequest>,
) -> Result<StatusCode, ApiError> {
    store.create_table(&request.table_name)?;
    tracing::info!(table = %request.table_name, "table created");
    Ok(StatusCode::CREATED)
}

async fn list_records(
    State(store): State<Arc<RecordStore>>,
    Path(table): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = store.all_records(&table, params.limit, params.skip)?;
    Ok(Json(records))
}

async fn find_record(
    State(store): State<Arc<RecordStore>>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<Option<Record>>, ApiError> {
    // Soft miss on an existing table is a successful `null`, not a 404.
    let record = store.record_by_id(&table, &id)?;
    Ok(Json(record))
}

async fn insert_record(
    State(store): State<Arc<RecordStore>>,
    Path(table): Path<String>,
    Json(mut record): Json<Record>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let id = assign_record_id(&mut record);
    store.insert_record(&table, record.clone())?;
    tracing::debug!(table = %table, id = %id, "record inserted");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(store): State<Arc<RecordStore>>,
    Path((table, id)): Path<(String, String)>,
    Json(partial): Json<Record>,
) -> Result<StatusCode, ApiError> {
    store.update_record(&table, &id, partial)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_record(
    State(store): State<Arc<RecordStore>>,
    Path((table, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    store.delete_record(&table, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn drop_table(
    State(store): State<Arc<RecordStore>>,
    Path(table): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete_table(&table)?;
    tracing::info!(table = %table, "table deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Error Rendering
// =============================================================================

/// Wrapper turning a [`StoreError`] into an HTTP response.
#[derive(Debug)]
struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "store failure");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
        StoreError::TableNotFound { .. } | StoreError::RecordNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        StoreError::Decode { .. } | StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// Tests
// =============================================================================
