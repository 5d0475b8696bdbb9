//! Selection resolution route
//!
//! Resolves a node-anchored selection snapshot into article char offsets.
//! The region is rebuilt from the same segment tree the client rendered,
//! so segment keys line up exactly with what the host reported.

use axum::extract::Path;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::annotations::AnnotationRepository;
use crate::db::ArticleRepository;
use crate::error::{AppError, Result};
use crate::render::{render, RenderOptions, RenderStrategy};
use crate::selection::{ContentRegion, SelectionResolver, SelectionSnapshot, SnapPolicy, TextSelection};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/:id/selection", post(resolve_selection))
        .layer(Extension(state))
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(flatten)]
    pub snapshot: SelectionSnapshot,
    /// Strategy the client rendered under. Segment keys differ between
    /// strategies, so this must match the rendered view.
    #[serde(default)]
    pub strategy: RenderStrategy,
    #[serde(default)]
    pub snap: SnapPolicy,
}

/// Resolve a selection gesture. An unusable gesture resolves to `null`,
/// not an error; the client simply shows no popover.
async fn resolve_selection(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<Option<TextSelection>>> {
    let article = ArticleRepository::new(state.db())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;
    let annotations = AnnotationRepository::new(state.db())
        .list_for_article(&id)
        .await?;

    let rendered = render(
        &article.content,
        &annotations,
        RenderOptions {
            strategy: request.strategy,
            ..RenderOptions::default()
        },
    );
    let region = ContentRegion::from_parts(
        rendered
            .segments
            .iter()
            .map(|s| (s.key().to_string(), s.text().to_string())),
    );

    let selection = SelectionResolver::new(request.snap).resolve(&region, &request.snapshot);
    if selection.is_none() {
        tracing::debug!(article_id = %id, "selection did not resolve");
    }

    Ok(Json(selection))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testing;

    async fn create_article(server: &axum_test::TestServer, content: &str) -> String {
        let created: serde_json::Value = server
            .post("/api/v1/articles")
            .json(&json!({ "title": "T", "content": content }))
            .await
            .json();
        created["id"].as_str().unwrap().to_string()
    }

    fn range(node: &str, start: usize, end_node: &str, end: usize) -> serde_json::Value {
        json!({
            "start": { "node": node, "offset": start },
            "end": { "node": end_node, "offset": end }
        })
    }

    #[tokio::test]
    async fn test_partial_word_snaps_to_full_word() {
        let server = testing::server(testing::state().await);
        let id = create_article(&server, "International law matters.").await;

        // No annotations yet: the rendered view is one plain segment.
        let response = server
            .post(&format!("/api/v1/articles/{id}/selection"))
            .json(&json!({ "ranges": [range("text-0", 5, "text-0", 9)] }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["text"], "International");
        assert_eq!(body["start_offset"], 0);
        assert_eq!(body["end_offset"], 13);
    }

    #[tokio::test]
    async fn test_selection_spanning_segments() {
        let server = testing::server(testing::state().await);
        let id = create_article(&server, "The cat sat.").await;

        server
            .post(&format!("/api/v1/articles/{id}/annotations"))
            .json(&json!({ "selected_text": "cat", "start_offset": 4, "end_offset": 7 }))
            .await
            .assert_status(StatusCode::CREATED);

        // Tokenized view: "word-4" is the annotated cat, "text-8" is sat.
        let body: serde_json::Value = server
            .post(&format!("/api/v1/articles/{id}/selection"))
            .json(&json!({ "ranges": [range("word-4", 0, "text-8", 3)] }))
            .await
            .json();
        assert_eq!(body["text"], "cat sat");
        assert_eq!(body["start_offset"], 4);
        assert_eq!(body["end_offset"], 11);
    }

    #[tokio::test]
    async fn test_unusable_selection_resolves_to_null() {
        let server = testing::server(testing::state().await);
        let id = create_article(&server, "cat sat").await;

        // The space between the words.
        let response = server
            .post(&format!("/api/v1/articles/{id}/selection"))
            .json(&json!({ "ranges": [range("text-0", 3, "text-0", 4)] }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_exact_snap_policy() {
        let server = testing::server(testing::state().await);
        let id = create_article(&server, "International law matters.").await;

        let body: serde_json::Value = server
            .post(&format!("/api/v1/articles/{id}/selection"))
            .json(&json!({
                "ranges": [range("text-0", 5, "text-0", 9)],
                "snap": "exact"
            }))
            .await
            .json();
        assert_eq!(body["text"], "nati");
    }

    #[tokio::test]
    async fn test_anchor_uses_rect_and_scroll() {
        let server = testing::server(testing::state().await);
        let id = create_article(&server, "anchor target words").await;

        let body: serde_json::Value = server
            .post(&format!("/api/v1/articles/{id}/selection"))
            .json(&json!({
                "ranges": [range("text-0", 0, "text-0", 6)],
                "rect": { "left": 100.0, "top": 50.0, "width": 60.0, "height": 18.0 },
                "scroll_y": 500.0
            }))
            .await
            .json();
        assert_eq!(body["anchor"]["x"], 130.0);
        assert_eq!(body["anchor"]["y"], 540.0);
    }

    #[tokio::test]
    async fn test_selection_on_missing_article() {
        let server = testing::server(testing::state().await);

        server
            .post("/api/v1/articles/nope/selection")
            .json(&json!({ "ranges": [range("text-0", 0, "text-0", 3)] }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
