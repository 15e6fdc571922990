//! Projection of a fetched project into a persistable record

use crate::error::{DataError, Result};
use crate::types::{NewRecord, ProjectDetail};

/// Key of the cover entry that is stored and downloaded
pub const ORIGINAL_COVER_KEY: &str = "original";

/// Derive the on-disk filename from a source URL: the text after the last `/`
///
/// # Examples
///
/// ```
/// use foli::mapper::derive_filename;
///
/// let name = derive_filename("https://cdn.example.com/projects/115/abc.jpg").unwrap();
/// assert_eq!(name, "abc.jpg");
/// assert!(derive_filename("").is_err());
/// ```
pub fn derive_filename(url: &str) -> Result<String> {
    match url.rsplit('/').next() {
        Some(segment) if !url.is_empty() => Ok(segment.to_string()),
        _ => Err(DataError::MalformedUrl {
            url: url.to_string(),
        }
        .into()),
    }
}

/// Read the `"original"` cover URL out of a project's untyped covers map
pub fn original_source(project: &ProjectDetail) -> Result<&str> {
    let value = project
        .covers
        .get(ORIGINAL_COVER_KEY)
        .ok_or_else(|| DataError::MissingSource {
            key: ORIGINAL_COVER_KEY.to_string(),
        })?;

    value.as_str().ok_or_else(|| {
        DataError::SourceType {
            key: ORIGINAL_COVER_KEY.to_string(),
            found: json_type_name(value).to_string(),
        }
        .into()
    })
}

/// Map a project into the record that gets saved
pub fn map_record(project: &ProjectDetail) -> Result<NewRecord> {
    let source_url = original_source(project)?;
    let filename = derive_filename(source_url)?;

    Ok(NewRecord {
        title: project.title.clone(),
        description: project.description.clone(),
        filename,
        source_url: source_url.to_string(),
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
