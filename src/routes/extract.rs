//! Web article extraction route

use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::extract::{extract_article, ExtractedArticle};

pub fn router() -> Router {
    Router::new().route("/", post(extract))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Fetch a web page and reduce it to plain article text, ready to be
/// submitted as a new article.
async fn extract(Json(request): Json<ExtractRequest>) -> Result<Json<ExtractedArticle>> {
    let extracted = extract_article(&request.url).await?;

    tracing::info!(
        url = %extracted.original_url,
        chars = extracted.content.chars().count(),
        "article extracted"
    );

    Ok(Json(extracted))
}
