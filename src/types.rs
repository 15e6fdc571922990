//! Core types for foli
//!
//! Two families live here: the upstream payloads decoded from the Behance v2
//! API (transient, consumed once) and the persisted [`Record`] together with
//! the [`RecordQuery`] used to look records up.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Unique identifier for a stored record
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for RecordId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for RecordId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for RecordId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for RecordId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// A persisted, flattened project
///
/// `Record::default()` is the zero-valued placeholder the batch query endpoint
/// returns for queries that matched nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Record {
    /// Store-assigned identity, never reused
    pub id: RecordId,
    /// Project title
    pub title: String,
    /// Project description
    pub description: String,
    /// Last path segment of `source_url`
    pub filename: String,
    /// URL of the original-resolution cover image
    #[serde(rename = "src")]
    pub source_url: String,
}

/// A record that has not been saved yet
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewRecord {
    /// Project title
    pub title: String,
    /// Project description
    pub description: String,
    /// Last path segment of `source_url`
    pub filename: String,
    /// URL of the original-resolution cover image
    pub source_url: String,
}

/// Field-match query submitted to `POST /q`
///
/// Every field is optional. A field that is absent *or* empty is not used as a
/// predicate, so a query cannot ask for "title equals the empty string".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordQuery {
    /// Exact title match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Exact description match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exact filename match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Exact source URL match
    #[serde(default, rename = "src", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RecordQuery {
    /// Predicates that actually filter, as `(column, value)` pairs
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("filename", &self.filename),
            ("source_url", &self.source_url),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }

    /// True when no predicate applies and the query matches every record
    pub fn is_unfiltered(&self) -> bool {
        self.predicates().is_empty()
    }
}

/// Response of `GET /creativestofollow`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreativesPage {
    /// Creatives suggested to follow
    #[serde(default)]
    pub creatives_to_follow: Vec<Creative>,
}

/// A user on the platform
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Creative {
    /// Numeric user id
    #[serde(default)]
    pub id: i64,
    /// Username, used to address the user's project listing
    #[serde(default)]
    pub username: String,
}

/// Response of `GET /users/{username}/projects`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectsPage {
    /// Projects created by the user
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
}

/// Reference to a project in a listing
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectRef {
    /// Numeric project id
    #[serde(default)]
    pub id: i64,
}

/// Response of `GET /projects/{id}`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectEnvelope {
    /// The project itself
    #[serde(default)]
    pub project: ProjectDetail,
}

/// Project metadata and cover sources
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectDetail {
    /// Project name
    #[serde(default, rename = "name")]
    pub title: String,
    /// Project description
    #[serde(default)]
    pub description: String,
    /// Cover URLs keyed by resolution label ("original", "115", ...)
    ///
    /// Values are kept untyped: the upstream mixes strings with other types
    /// and only the `"original"` entry is ever read.
    #[serde(default)]
    pub covers: HashMap<String, serde_json::Value>,
}
