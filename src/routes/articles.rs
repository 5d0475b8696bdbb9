//! Article CRUD routes

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::annotations::AnnotationRepository;
use crate::db::{Article, ArticleRepository, ArticleSummary};
use crate::error::{AppError, Result};
use crate::routes::user_id;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(create_article).get(list_articles))
        .route("/:id", get(get_article).delete(delete_article))
        .layer(Extension(state))
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
}

/// Create an article from plain text. The content stored here is the
/// offset source of truth for every later annotation, so it is trimmed
/// once on the way in and never rewritten.
async fn create_article(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "content must not be empty".to_string(),
        ));
    }

    let mut article = Article::new(&request.title, &request.content);
    if let Some(user) = user_id(&headers) {
        article = article.with_user(user);
    }

    ArticleRepository::new(state.db()).create(&article).await?;

    tracing::info!(
        article_id = %article.id,
        chars = article.content.chars().count(),
        "article created"
    );

    Ok((StatusCode::CREATED, Json(article)))
}

async fn list_articles(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ArticleSummary>>> {
    let user = user_id(&headers);
    let summaries = ArticleRepository::new(state.db())
        .list(user.as_deref())
        .await?;

    Ok(Json(summaries))
}

async fn get_article(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>> {
    let article = ArticleRepository::new(state.db())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

    Ok(Json(article))
}

/// Delete an article and everything annotated on it.
async fn delete_article(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let removed = AnnotationRepository::new(state.db())
        .delete_for_article(&id)
        .await?;
    let deleted = ArticleRepository::new(state.db()).delete(&id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("Article {} not found", id)));
    }

    tracing::info!(article_id = %id, removed_annotations = removed, "article deleted");
    Ok(StatusCode::NO_CONTENT)
}
