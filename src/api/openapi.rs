//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the foli query API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the foli query API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "foli query API",
        version = "0.1.0",
        description = "Read-only access to stored project records: full dump and batch field-match queries",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Records
        crate::api::routes::dump_records,
        crate::api::routes::match_records,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::Record,
        crate::types::RecordId,
        crate::types::RecordQuery,
        crate::api::routes::QueryErrorResponse,
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "records", description = "Stored records - Dump everything or look up by exact field match"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
