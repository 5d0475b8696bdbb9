//! SQLite storage for annotations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::types::{Annotation, Definition};

/// Repository for annotation persistence
pub struct AnnotationRepository<'a> {
    pool: &'a SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, article_id, user_id, selected_text,
           start_offset, end_offset, context_sentence, phonetic,
           audio_url, definitions_json, highlight_color, created_at, updated_at
    FROM annotations
"#;

impl<'a> AnnotationRepository<'a> {
    /// Create a new repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an annotation
    pub async fn create(&self, annotation: &Annotation) -> Result<()> {
        let definitions_json = serde_json::to_string(&annotation.definitions)?;

        sqlx::query(
            r#"
            INSERT INTO annotations (
                id, article_id, user_id, selected_text,
                start_offset, end_offset, context_sentence, phonetic,
                audio_url, definitions_json, highlight_color, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&annotation.id)
        .bind(&annotation.article_id)
        .bind(&annotation.user_id)
        .bind(&annotation.selected_text)
        .bind(annotation.start_offset as i64)
        .bind(annotation.end_offset as i64)
        .bind(&annotation.context_sentence)
        .bind(&annotation.phonetic)
        .bind(&annotation.audio_url)
        .bind(&definitions_json)
        .bind(&annotation.highlight_color)
        .bind(annotation.created_at.to_rfc3339())
        .bind(annotation.updated_at.to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get an annotation by ID
    pub async fn get(&self, id: &str) -> Result<Option<Annotation>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = sqlx::query_as::<_, AnnotationRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| r.into_annotation()).transpose()
    }

    /// List an article's annotations ordered by start offset ascending,
    /// the order the renderer consumes them in.
    pub async fn list_for_article(&self, article_id: &str) -> Result<Vec<Annotation>> {
        let sql = format!("{SELECT_COLUMNS} WHERE article_id = ? ORDER BY start_offset ASC");
        let rows = sqlx::query_as::<_, AnnotationRow>(&sql)
            .bind(article_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_annotation()).collect()
    }

    /// First stored annotation whose half-open range overlaps `[start, end)`.
    pub async fn find_overlapping(
        &self,
        article_id: &str,
        start: usize,
        end: usize,
    ) -> Result<Option<Annotation>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE article_id = ? AND start_offset < ? AND end_offset > ? ORDER BY start_offset ASC LIMIT 1"
        );
        let row = sqlx::query_as::<_, AnnotationRow>(&sql)
            .bind(article_id)
            .bind(end as i64)
            .bind(start as i64)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| r.into_annotation()).transpose()
    }

    /// Delete an annotation
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all annotations for an article
    pub async fn delete_for_article(&self, article_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM annotations WHERE article_id = ?")
            .bind(article_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count annotations for an article
    pub async fn count_for_article(&self, article_id: &str) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM annotations WHERE article_id = ?")
            .bind(article_id)
            .fetch_one(self.pool)
            .await?;

        Ok(row.0)
    }
}

/// Internal row type for SQLite queries
#[derive(sqlx::FromRow)]
struct AnnotationRow {
    id: String,
    article_id: String,
    user_id: Option<String>,
    selected_text: String,
    start_offset: i64,
    end_offset: i64,
    context_sentence: Option<String>,
    phonetic: Option<String>,
    audio_url: Option<String>,
    definitions_json: String,
    highlight_color: String,
    created_at: String,
    updated_at: String,
}

impl AnnotationRow {
    fn into_annotation(self) -> Result<Annotation> {
        let definitions: Vec<Definition> = serde_json::from_str(&self.definitions_json)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)?.with_timezone(&Utc);

        Ok(Annotation {
            id: self.id,
            article_id: self.article_id,
            user_id: self.user_id,
            selected_text: self.selected_text,
            start_offset: self.start_offset.max(0) as usize,
            end_offset: self.end_offset.max(0) as usize,
            context_sentence: self.context_sentence,
            phonetic: self.phonetic,
            audio_url: self.audio_url,
            definitions,
            highlight_color: self.highlight_color,
            created_at,
            updated_at,
        })
    }
}
