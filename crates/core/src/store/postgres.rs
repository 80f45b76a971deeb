use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use super::error::StoreResult;
use super::query::{Condition, Query, SortKey};
use crate::document::id::DocumentId;
use crate::document::model::StoredDocument;

/// Document store over a single PostgreSQL `documents` table holding JSONB content.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Database row representation of a document.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    collection: String,
    content: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id.into(),
            collection: row.collection,
            content: row.content.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, collection, content, created_at, updated_at";

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool.
    pub async fn connect(url: &str, min_connections: u32, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert(&self, collection: &str, content: Value) -> StoreResult<StoredDocument> {
        let row: DocumentRow = sqlx::query_as(&format!(
            "INSERT INTO documents (id, collection, content) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(*DocumentId::new().as_uuid())
        .bind(collection)
        .bind(Json(content))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn get(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2"
        ))
        .bind(collection)
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM documents"));
        push_conditions(&mut builder, collection, &query.conditions);

        builder.push(" ORDER BY ");
        let direction = if query.sort.descending { "DESC" } else { "ASC" };
        match &query.sort.key {
            SortKey::CreatedAt => {}
            SortKey::Field(path) => {
                builder
                    .push("content #> ")
                    .push_bind(path.segments().to_vec())
                    .push(" ")
                    .push(direction)
                    .push(if query.sort.descending { " NULLS LAST, " } else { " NULLS FIRST, " });
            }
        }
        builder
            .push("created_at ")
            .push(direction)
            .push(", id ")
            .push(direction);

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(to_i64(limit));
        }
        if query.offset > 0 {
            builder.push(" OFFSET ").push_bind(to_i64(query.offset));
        }

        let rows: Vec<DocumentRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count(&self, collection: &str, conditions: &[Condition]) -> StoreResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents");
        push_conditions(&mut builder, collection, conditions);
        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    pub async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        content: Value,
    ) -> StoreResult<Option<StoredDocument>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "UPDATE documents SET content = $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 RETURNING {COLUMNS}"
        ))
        .bind(collection)
        .bind(*id.as_uuid())
        .bind(Json(content))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, collection: &str, id: DocumentId) -> StoreResult<Option<StoredDocument>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING {COLUMNS}"
        ))
        .bind(collection)
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, collection: &str, conditions: &[Condition]) {
    builder.push(" WHERE collection = ").push_bind(collection.to_string());
    for condition in conditions {
        builder.push(" AND ");
        match condition {
            Condition::Eq { path, value } => {
                builder
                    .push("content #> ")
                    .push_bind(path.segments().to_vec())
                    .push(" = ")
                    .push_bind(Json(value.clone()));
            }
            Condition::Matches { path, pattern } => {
                builder
                    .push("content #>> ")
                    .push_bind(path.segments().to_vec())
                    .push(" ~* ")
                    .push_bind(pattern.clone());
            }
            Condition::CreatedSince(since) => {
                builder.push("created_at >= ").push_bind(*since);
            }
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
