//! SQLite-backed quote store.
//!
//! The store is the only collaborator outside the compile-and-execute core.
//! It exposes exactly one read: all records, in `rowid` (insertion) order.
//! TOP selection depends on that order, so the query pins it explicitly.
//!
//! The store location is always passed in; nothing in this module reads the
//! process environment.

use crate::error::{QuoteScriptResult, StoreError};
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// One quote row. `tags` holds the store's textual list encoding and is
/// expanded lazily by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct QuoteRecord {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub tags: Option<String>,
}

impl QuoteRecord {
    /// The raw tags text, empty when the column is NULL.
    pub fn raw_tags(&self) -> &str {
        self.tags.as_deref().unwrap_or("")
    }
}

/// A connection to the quotes database.
#[derive(Clone, Debug)]
pub struct QuoteStore {
    pool: SqlitePool,
}

impl QuoteStore {
    /// Open the store at the given URL, e.g. `sqlite://data/quotes.db` or
    /// `sqlite::memory:`. An unreachable store is reported as
    /// source-unavailable, never retried.
    pub async fn connect(url: &str) -> QuoteScriptResult<Self> {
        // One connection keeps `sqlite::memory:` coherent across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| StoreError::SourceUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Load every record, in insertion order.
    pub async fn load_all(&self) -> QuoteScriptResult<Vec<QuoteRecord>> {
        sqlx::query_as::<_, QuoteRecord>(
            "SELECT id, content, author, tags FROM quotes ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::SourceUnavailable(e.to_string()).into())
    }

    /// The underlying pool (seeding, tests).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
