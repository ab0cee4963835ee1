//! Quote store tests against an in-memory SQLite database.

use quotescript::error::QuoteScriptError;
use quotescript::store::QuoteStore;

async fn seeded_store() -> QuoteStore {
    let store = QuoteStore::connect("sqlite::memory:").await.unwrap();
    sqlx::query(
        "CREATE TABLE quotes (id INTEGER, content TEXT NOT NULL, author TEXT NOT NULL, tags TEXT)",
    )
    .execute(store.pool())
    .await
    .unwrap();

    // Ids deliberately out of order: load order must follow insertion
    // (rowid), not the id column.
    for (id, content, author, tags) in [
        (10_i64, "hope is the thing with feathers", "Dickinson", Some("['Hope']")),
        (5, "the obstacle is the way", "Marcus Aurelius", None),
        (7, "hope springs eternal", "Pope", Some("['Hope']")),
    ] {
        sqlx::query("INSERT INTO quotes (id, content, author, tags) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(content)
            .bind(author)
            .bind(tags)
            .execute(store.pool())
            .await
            .unwrap();
    }

    store
}

#[tokio::test]
async fn test_load_all_preserves_insertion_order() {
    let store = seeded_store().await;
    let records = store.load_all().await.unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![10, 5, 7]);
    assert_eq!(records[1].tags, None);
    assert_eq!(records[2].raw_tags(), "['Hope']");
}

#[tokio::test]
async fn test_missing_table_surfaces_as_source_unavailable() {
    let store = QuoteStore::connect("sqlite::memory:").await.unwrap();
    let err = store.load_all().await.unwrap_err();
    assert!(matches!(err, QuoteScriptError::Store(_)));
}

#[tokio::test]
async fn test_unreachable_database_surfaces_as_source_unavailable() {
    let err = QuoteStore::connect("sqlite:///no/such/dir/quotes.db")
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteScriptError::Store(_)));
}
