//! Annotation capture and management routes
//!
//! Capture is the write path of the whole system: validate the requested
//! range against the immutable article content, reject overlaps, enrich
//! with dictionary data and pronunciation audio, then persist. Dictionary
//! and audio failures degrade; validation failures reject.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::annotations::{validate_range, Annotation, AnnotationError, AnnotationRepository};
use crate::db::ArticleRepository;
use crate::error::{AppError, Result};
use crate::playback::PlaybackPlan;
use crate::routes::user_id;
use crate::state::AppState;
use crate::text;

/// Article-scoped routes, merged into the `/articles` tree.
pub fn article_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/:id/annotations",
            get(list_annotations).post(create_annotation),
        )
        .layer(Extension(state))
}

/// Routes addressing annotations by their own id.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/:id", delete(delete_annotation))
        .route("/:id/playback", get(playback_plan))
        .layer(Extension(state))
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub selected_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(default)]
    pub highlight_color: Option<String>,
}

/// Annotations for an article, ordered by start offset.
async fn list_annotations(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Annotation>>> {
    let annotations = AnnotationRepository::new(state.db())
        .list_for_article(&id)
        .await?;

    Ok(Json(annotations))
}

async fn create_annotation(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CreateAnnotationRequest>,
) -> Result<(StatusCode, Json<Annotation>)> {
    let article = ArticleRepository::new(state.db())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

    validate_range(
        &article.content,
        request.start_offset,
        request.end_offset,
        &request.selected_text,
    )?;

    let repo = AnnotationRepository::new(state.db());
    if let Some(existing) = repo
        .find_overlapping(&id, request.start_offset, request.end_offset)
        .await?
    {
        tracing::debug!(
            article_id = %id,
            existing_id = %existing.id,
            "rejected overlapping annotation"
        );
        return Err(AnnotationError::Overlap {
            start: request.start_offset,
            end: request.end_offset,
        }
        .into());
    }

    // Lookup never fails; a broken provider degrades to a placeholder
    // entry so the highlight is still captured.
    let info = state.dictionary().lookup_word(&request.selected_text).await;
    let sentence = text::extract_sentence(&article.content, request.start_offset);
    let audio_url = pronunciation_audio(&state, &request.selected_text).await;

    let mut annotation = Annotation::new(
        article.id.as_str(),
        request.selected_text.as_str(),
        request.start_offset,
        request.end_offset,
    )
    .with_phonetic(info.phonetic)
    .with_definitions(info.definitions)
    .with_context_sentence(sentence);

    if let Some(user) = user_id(&headers) {
        annotation = annotation.with_user(user);
    }
    if let Some(color) = request.highlight_color {
        annotation = annotation.with_color(color);
    }
    if let Some(url) = audio_url {
        annotation = annotation.with_audio_url(url);
    }

    repo.create(&annotation).await?;

    tracing::info!(
        annotation_id = %annotation.id,
        article_id = %id,
        word = %annotation.selected_text,
        "annotation created"
    );

    Ok((StatusCode::CREATED, Json(annotation)))
}

/// Fetch or synthesize pronunciation audio for a word.
///
/// Audio is optional enrichment: every failure here is logged and
/// swallowed, the annotation is stored without audio, and clients fall
/// back to speech synthesis at playback time.
async fn pronunciation_audio(state: &AppState, word: &str) -> Option<String> {
    let store = state.audio_store()?;
    let voice = state.dictionary().voice();

    match store.pronunciation_exists(word, voice).await {
        Ok(true) => return Some(store.pronunciation_url(word, voice)),
        Ok(false) => {}
        Err(e) => {
            tracing::warn!(word, error = %e, "pronunciation store check failed");
            return None;
        }
    }

    let bytes = match state.dictionary().synthesize_audio(word).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(word, error = %e, "audio synthesis unavailable");
            return None;
        }
    };

    match store.put_pronunciation(word, voice, bytes).await {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(word, error = %e, "failed to store pronunciation audio");
            None
        }
    }
}

async fn delete_annotation(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let deleted = AnnotationRepository::new(state.db()).delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Annotation {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Playback plan for an annotation: stored audio with a speech fallback,
/// or speech alone when no audio was captured.
async fn playback_plan(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlaybackPlan>> {
    let annotation = AnnotationRepository::new(state.db())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Annotation {} not found", id)))?;

    Ok(Json(PlaybackPlan::for_annotation(&annotation)))
}
