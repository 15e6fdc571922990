//! Record dump and batch match handlers.

use super::{QUERY_PARSE_ERROR_MESSAGE, QueryErrorResponse};
use crate::api::AppState;
use crate::types::{Record, RecordQuery};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET / - Every stored record, in insertion order
#[utoipa::path(
    get,
    path = "/",
    tag = "records",
    responses(
        (status = 200, description = "All stored records", body = Vec<Record>),
        (status = 500, description = "Store failure", body = crate::error::ApiError)
    )
)]
pub async fn dump_records(State(state): State<AppState>) -> Response {
    match state.db.all_records().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list records");
            e.into_response()
        }
    }
}

/// POST /q - First matching record for each query in the batch
///
/// The response has one slot per query, in request order. A query that
/// matches nothing yields the zero-valued record in its slot. A body that is
/// not a JSON array of query objects fails the whole batch.
#[utoipa::path(
    post,
    path = "/q",
    tag = "records",
    request_body = Vec<RecordQuery>,
    responses(
        (status = 200, description = "One record per query, zero-valued when unmatched", body = Vec<Record>),
        (status = 400, description = "Body is not a JSON array of queries", body = QueryErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiError)
    )
)]
pub async fn match_records(State(state): State<AppState>, body: Bytes) -> Response {
    let queries: Vec<RecordQuery> = match serde_json::from_slice(&body) {
        Ok(queries) => queries,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed query batch");
            return (
                StatusCode::BAD_REQUEST,
                Json(QueryErrorResponse {
                    message: QUERY_PARSE_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut results = Vec::with_capacity(queries.len());
    for query in &queries {
        match state.db.find_first(query).await {
            Ok(found) => results.push(found.unwrap_or_default()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to match query");
                return e.into_response();
            }
        }
    }

    (StatusCode::OK, Json(results)).into_response()
}
