//! SQLite storage for articles

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A stored article. `content` is plain text and immutable after upload;
/// annotation offsets index into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create an article. Title and content are trimmed here, before any
    /// offsets are taken against the content.
    pub fn new(title: &str, content: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Listing view of an article: content elided to an excerpt.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub char_count: i64,
    pub annotation_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Repository for article persistence
pub struct ArticleRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an article
    pub async fn create(&self, article: &Article) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, user_id, title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.user_id)
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.created_at.to_rfc3339())
        .bind(article.updated_at.to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get an article by ID
    pub async fn get(&self, id: &str) -> Result<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM articles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| r.into_article()).transpose()
    }

    /// List articles, newest first. `user_id = None` lists everything
    /// (anonymous single-user mode).
    ///
    /// SQLite's `length()` and `substr()` count chars on TEXT values, so
    /// `char_count` agrees with the char offsets used everywhere else.
    pub async fn list(&self, user_id: Option<&str>) -> Result<Vec<ArticleSummary>> {
        let mut sql = String::from(
            r#"
            SELECT a.id, a.user_id, a.title,
                   substr(a.content, 1, 280) AS excerpt,
                   length(a.content) AS char_count,
                   (SELECT COUNT(*) FROM annotations WHERE article_id = a.id) AS annotation_count,
                   a.created_at, a.updated_at
            FROM articles a
            "#,
        );

        if user_id.is_some() {
            sql.push_str(" WHERE a.user_id = ?");
        }

        sql.push_str(" ORDER BY a.created_at DESC");

        let mut q = sqlx::query_as::<_, ArticleSummary>(&sql);
        if let Some(user) = user_id {
            q = q.bind(user);
        }

        Ok(q.fetch_all(self.pool).await?)
    }

    /// Delete an article. Annotations are removed separately via
    /// `AnnotationRepository::delete_for_article`.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal row type for SQLite queries
#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: String,
    user_id: Option<String>,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
}

impl ArticleRow {
    fn into_article(self) -> Result<Article> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)?.with_timezone(&Utc);

        Ok(Article {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize_schema;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = setup_test_db().await;
        let repo = ArticleRepository::new(&pool);

        let article = Article::new("  My Title  ", "  Body text here.  ");
        repo.create(&article).await.unwrap();

        let loaded = repo.get(&article.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "My Title");
        assert_eq!(loaded.content, "Body text here.");
        assert_eq!(loaded.id, article.id);
    }

    #[tokio::test]
    async fn test_content_survives_round_trip_exactly() {
        let pool = setup_test_db().await;
        let repo = ArticleRepository::new(&pool);

        let content = "Línea one.\n\nSecond paragraph with café and naïve words.";
        let article = Article::new("Unicode", content);
        repo.create(&article).await.unwrap();

        let loaded = repo.get(&article.id).await.unwrap().unwrap();
        assert_eq!(loaded.content, content);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_counts() {
        let pool = setup_test_db().await;
        let repo = ArticleRepository::new(&pool);

        let mut older = Article::new("Older", "café body");
        older.created_at = Utc::now() - chrono::Duration::minutes(10);
        older.updated_at = older.created_at;
        repo.create(&older).await.unwrap();

        let newer = Article::new("Newer", "plain body");
        repo.create(&newer).await.unwrap();

        let summaries = repo.list(None).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Newer");
        assert_eq!(summaries[1].title, "Older");
        // SQLite length() counts chars, not bytes.
        assert_eq!(summaries[1].char_count, 9);
        assert_eq!(summaries[1].excerpt, "café body");
        assert_eq!(summaries[0].annotation_count, 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_user() {
        let pool = setup_test_db().await;
        let repo = ArticleRepository::new(&pool);

        repo.create(&Article::new("Mine", "a").with_user("user-1"))
            .await
            .unwrap();
        repo.create(&Article::new("Theirs", "b").with_user("user-2"))
            .await
            .unwrap();

        let mine = repo.list(Some("user-1")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = setup_test_db().await;
        let repo = ArticleRepository::new(&pool);

        let article = Article::new("Gone", "soon");
        repo.create(&article).await.unwrap();

        assert!(repo.delete(&article.id).await.unwrap());
        assert!(repo.get(&article.id).await.unwrap().is_none());
        assert!(!repo.delete(&article.id).await.unwrap());
    }
}
