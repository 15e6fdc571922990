//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`records`] - Full dump and batch field-match queries
//! - [`system`] - Health, OpenAPI

use serde::{Deserialize, Serialize};

mod records;
mod system;

pub use records::*;
pub use system::*;

/// Fixed message returned when a `POST /q` body cannot be parsed
pub const QUERY_PARSE_ERROR_MESSAGE: &str = "Error occurred when parsing your JSON query ! X( ";

/// Body of the 400 response to a malformed `POST /q`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QueryErrorResponse {
    /// Always [`QUERY_PARSE_ERROR_MESSAGE`]
    pub message: String,
}
