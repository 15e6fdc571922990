//! Record persistence and lookup.

use crate::error::DatabaseError;
use crate::types::{NewRecord, Record, RecordId, RecordQuery};
use crate::{Error, Result};

use super::Database;

impl Database {
    /// Save a new record and return the id the store assigned to it
    ///
    /// Ids are strictly increasing and never reused, even after deletions.
    pub async fn save_record(&self, record: &NewRecord) -> Result<RecordId> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO records (title, description, filename, source_url, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.filename)
        .bind(&record.source_url)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert record: {}",
                e
            )))
        })?;

        Ok(RecordId(result.last_insert_rowid()))
    }

    /// All records in insertion order
    pub async fn all_records(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, title, description, filename, source_url
            FROM records
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(rows)
    }

    /// Get a record by id
    pub async fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, title, description, filename, source_url
            FROM records
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(row)
    }

    /// First record (lowest id) matching every non-empty field of `query`
    ///
    /// Absent and empty fields are not predicates, so an all-empty query
    /// returns the first record ever saved. `Ok(None)` is the not-found signal.
    pub async fn find_first(&self, query: &RecordQuery) -> Result<Option<Record>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT id, title, description, filename, source_url FROM records",
        );

        for (i, (column, value)) in query.predicates().into_iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            // column names come from a fixed allow-list in RecordQuery::predicates
            builder.push(column);
            builder.push(" = ");
            builder.push_bind(value);
        }

        builder.push(" ORDER BY id ASC LIMIT 1");

        let row = builder
            .build_query_as::<Record>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to find record: {}",
                    e
                )))
            })?;

        Ok(row)
    }

    /// Count stored records
    pub async fn count_records(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Sqlx)?;

        Ok(count)
    }
}
