//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Articles table (content is immutable after upload; it is the offset
-- source of truth for annotations)
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_articles_user ON articles(user_id);
CREATE INDEX IF NOT EXISTS idx_articles_created ON articles(created_at);

-- Annotations table (half-open char ranges into articles.content)
CREATE TABLE IF NOT EXISTS annotations (
    id TEXT PRIMARY KEY,
    article_id TEXT NOT NULL,
    user_id TEXT,
    selected_text TEXT NOT NULL,
    start_offset INTEGER NOT NULL,
    end_offset INTEGER NOT NULL,
    context_sentence TEXT,
    phonetic TEXT,
    audio_url TEXT,
    definitions_json TEXT NOT NULL DEFAULT '[]',
    highlight_color TEXT NOT NULL DEFAULT '#FFF59D',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_annotations_article ON annotations(article_id);
CREATE INDEX IF NOT EXISTS idx_annotations_article_start ON annotations(article_id, start_offset);
CREATE INDEX IF NOT EXISTS idx_annotations_user ON annotations(user_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();
        initialize_schema(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('articles', 'annotations')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(count, 2);
    }
}
