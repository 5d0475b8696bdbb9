//! Article rendering route

use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::annotations::AnnotationRepository;
use crate::db::ArticleRepository;
use crate::error::{AppError, Result};
use crate::render::{render, ReaderSettings, RenderOptions, RenderStrategy, RenderedArticle};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/:id/render", get(render_article))
        .layer(Extension(state))
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub strategy: RenderStrategy,
    pub font_size: Option<u8>,
    pub line_height: Option<f32>,
    pub focus_mode: Option<bool>,
}

/// Render an article into segments under the requested strategy and
/// reader settings. Unset settings fall back to the reader defaults;
/// out-of-range values are normalized, not rejected.
async fn render_article(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedArticle>> {
    let article = ArticleRepository::new(state.db())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;
    let annotations = AnnotationRepository::new(state.db())
        .list_for_article(&id)
        .await?;

    let defaults = ReaderSettings::default();
    let options = RenderOptions {
        strategy: query.strategy,
        settings: ReaderSettings {
            font_size: query.font_size.unwrap_or(defaults.font_size),
            line_height: query.line_height.unwrap_or(defaults.line_height),
            focus_mode: query.focus_mode.unwrap_or(defaults.focus_mode),
        },
    };

    Ok(Json(render(&article.content, &annotations, options)))
}
