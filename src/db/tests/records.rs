use crate::db::*;
use crate::types::{NewRecord, RecordId, RecordQuery};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn new_record(title: &str, filename: &str) -> NewRecord {
    NewRecord {
        title: title.to_string(),
        description: format!("{} description", title),
        filename: filename.to_string(),
        source_url: format!("https://cdn.example.com/projects/original/{}", filename),
    }
}

fn query() -> RecordQuery {
    RecordQuery::default()
}

#[tokio::test]
async fn test_save_and_read_back() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let saved = new_record("Poster Series", "abc.jpg");
    let id = db.save_record(&saved).await.unwrap();
    assert!(id.get() > 0);

    let all = db.all_records().await.unwrap();
    assert_eq!(all.len(), 1);
    let record = &all[0];
    assert_eq!(record.id, id);
    assert_eq!(record.title, saved.title);
    assert_eq!(record.description, saved.description);
    assert_eq!(record.filename, saved.filename);
    assert_eq!(record.source_url, saved.source_url);

    db.close().await;
}

#[tokio::test]
async fn test_all_records_in_insertion_order_with_increasing_ids() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let titles = ["c", "a", "b", "a"];
    for (i, title) in titles.iter().enumerate() {
        db.save_record(&new_record(title, &format!("{}.jpg", i)))
            .await
            .unwrap();
    }

    let all = db.all_records().await.unwrap();
    let got: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(got, titles);

    for pair in all.windows(2) {
        assert!(pair[0].id < pair[1].id, "ids must be strictly increasing");
    }

    db.close().await;
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let first = db.save_record(&new_record("a", "a.jpg")).await.unwrap();
    let second = db.save_record(&new_record("b", "b.jpg")).await.unwrap();

    // Deletion is not part of the API; simulate an external one
    sqlx::query("DELETE FROM records WHERE id = ?")
        .bind(second)
        .execute(db.pool())
        .await
        .unwrap();

    let third = db.save_record(&new_record("c", "c.jpg")).await.unwrap();
    assert!(third > second);
    assert!(second > first);

    db.close().await;
}

#[tokio::test]
async fn test_find_first_with_empty_query_returns_first_saved() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert!(db.find_first(&query()).await.unwrap().is_none());

    let first = db.save_record(&new_record("first", "1.jpg")).await.unwrap();
    db.save_record(&new_record("second", "2.jpg")).await.unwrap();

    let found = db.find_first(&query()).await.unwrap().unwrap();
    assert_eq!(found.id, first);

    // Empty strings are treated exactly like absent fields
    let blank = RecordQuery {
        title: Some(String::new()),
        filename: Some(String::new()),
        ..query()
    };
    let found = db.find_first(&blank).await.unwrap().unwrap();
    assert_eq!(found.id, first);

    db.close().await;
}

#[tokio::test]
async fn test_find_first_single_field() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.save_record(&new_record("alpha", "a.jpg")).await.unwrap();
    let beta = db.save_record(&new_record("beta", "b.jpg")).await.unwrap();

    let by_title = db
        .find_first(&RecordQuery {
            title: Some("beta".into()),
            ..query()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_title.id, beta);

    let by_src = db
        .find_first(&RecordQuery {
            source_url: Some("https://cdn.example.com/projects/original/b.jpg".into()),
            ..query()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_src.id, beta);

    let by_description = db
        .find_first(&RecordQuery {
            description: Some("alpha description".into()),
            ..query()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_description.title, "alpha");

    db.close().await;
}

#[tokio::test]
async fn test_find_first_ands_predicates_and_picks_lowest_id() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.save_record(&new_record("same", "x.jpg")).await.unwrap();
    let y1 = db.save_record(&new_record("same", "y.jpg")).await.unwrap();
    db.save_record(&new_record("same", "y.jpg")).await.unwrap();

    let found = db
        .find_first(&RecordQuery {
            title: Some("same".into()),
            filename: Some("y.jpg".into()),
            ..query()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, y1);

    // Both predicates must hold
    let missing = db
        .find_first(&RecordQuery {
            title: Some("other".into()),
            filename: Some("y.jpg".into()),
            ..query()
        })
        .await
        .unwrap();
    assert!(missing.is_none());

    db.close().await;
}

#[tokio::test]
async fn test_find_first_is_exact_match() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.save_record(&new_record("Poster", "p.jpg")).await.unwrap();

    for probe in ["poster", "Post", "Poster ", "%"] {
        let found = db
            .find_first(&RecordQuery {
                title: Some(probe.into()),
                ..query()
            })
            .await
            .unwrap();
        assert!(found.is_none(), "{probe:?} must not match");
    }

    db.close().await;
}

#[tokio::test]
async fn test_get_record_and_count() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert_eq!(db.count_records().await.unwrap(), 0);
    assert!(db.get_record(RecordId(42)).await.unwrap().is_none());

    let id = db.save_record(&new_record("one", "1.jpg")).await.unwrap();
    assert_eq!(db.count_records().await.unwrap(), 1);
    assert_eq!(db.get_record(id).await.unwrap().unwrap().title, "one");

    db.close().await;
}

#[tokio::test]
async fn test_concurrent_saves_get_unique_ids() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Arc::new(Database::new(temp_file.path()).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..16 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.save_record(&new_record(&format!("r{}", i), &format!("{}.jpg", i)))
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert_eq!(db.count_records().await.unwrap(), 16);

    db.close().await;
}
