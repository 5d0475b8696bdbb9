//! Annotation types
//!
//! Core data model shared by the capture flow, the renderer, and the HTTP
//! surface. The renderer consumes these types directly and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text;

/// Highlight color applied when a request does not pick one.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFF59D";

/// One dictionary sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Part of speech ("noun", "verb", ...).
    pub pos: String,
    /// Sense text.
    pub meaning: String,
}

/// A stored annotation over `[start_offset, end_offset)` of an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier (UUID)
    pub id: String,
    /// The article this annotation belongs to
    pub article_id: String,
    /// Owning user, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Exact content slice at the stored range, captured at creation
    pub selected_text: String,
    /// First char of the range (inclusive)
    pub start_offset: usize,
    /// One past the last char of the range (exclusive)
    pub end_offset: usize,
    /// Sentence surrounding the selection, for popover context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_sentence: Option<String>,
    /// Phonetic transcription, e.g. `/ˌɪntərˈnæʃənəl/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    /// Stored pronunciation audio; `None` means clients fall back to
    /// speech synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Dictionary senses, in lookup order
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// CSS color for the highlight background
    pub highlight_color: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Annotation {
    /// Create a bare annotation; enrichment is attached with the `with_*`
    /// builders.
    pub fn new(
        article_id: impl Into<String>,
        selected_text: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            article_id: article_id.into(),
            user_id: None,
            selected_text: selected_text.into(),
            start_offset,
            end_offset,
            context_sentence: None,
            phonetic: None,
            audio_url: None,
            definitions: Vec::new(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = Some(phonetic.into());
        self
    }

    pub fn with_definitions(mut self, definitions: Vec<Definition>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn with_context_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.context_sentence = Some(sentence.into());
        self
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.highlight_color = color.into();
        self
    }

    /// The `(start, end)` pair identifying where this annotation was made.
    pub fn position_key(&self) -> (usize, usize) {
        (self.start_offset, self.end_offset)
    }
}

/// Rejection reasons for an annotation request.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("range {start}..{end} is not valid for content of {len} chars")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("selected text does not match the content at {start}..{end}")]
    TextMismatch { start: usize, end: usize },

    #[error("range {start}..{end} overlaps an existing annotation")]
    Overlap { start: usize, end: usize },
}

/// Check the creation invariant: `0 <= start < end <= char_len(content)`
/// and the content slice at the range equals `selected_text`.
pub fn validate_range(
    content: &str,
    start: usize,
    end: usize,
    selected_text: &str,
) -> Result<(), AnnotationError> {
    let len = text::char_len(content);
    if start >= end || end > len {
        return Err(AnnotationError::InvalidRange { start, end, len });
    }
    match text::slice_chars(content, start, end) {
        Some(slice) if slice == selected_text => Ok(()),
        _ => Err(AnnotationError::TextMismatch { start, end }),
    }
}

/// True when two half-open ranges share at least one char.
pub fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_annotation_defaults() {
        let annotation = Annotation::new("article-1", "ubiquitous", 10, 20);

        assert_eq!(annotation.article_id, "article-1");
        assert_eq!(annotation.selected_text, "ubiquitous");
        assert_eq!(annotation.position_key(), (10, 20));
        assert_eq!(annotation.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
        assert!(annotation.user_id.is_none());
        assert!(annotation.definitions.is_empty());
        assert!(annotation.audio_url.is_none());
    }

    #[test]
    fn test_builder_enrichment() {
        let annotation = Annotation::new("article-1", "cat", 0, 3)
            .with_user("user-9")
            .with_phonetic("/kæt/")
            .with_definitions(vec![Definition {
                pos: "noun".to_string(),
                meaning: "a small domesticated felid".to_string(),
            }])
            .with_context_sentence("The cat sat.")
            .with_audio_url("https://cdn.example.com/cat.mp3")
            .with_color("#AED581");

        assert_eq!(annotation.user_id.as_deref(), Some("user-9"));
        assert_eq!(annotation.phonetic.as_deref(), Some("/kæt/"));
        assert_eq!(annotation.definitions.len(), 1);
        assert_eq!(annotation.highlight_color, "#AED581");
    }

    #[test]
    fn test_serialization_round_trip() {
        let annotation = Annotation::new("article-1", "cat", 4, 7)
            .with_phonetic("/kæt/")
            .with_definitions(vec![Definition {
                pos: "noun".to_string(),
                meaning: "a small domesticated felid".to_string(),
            }]);

        let json = serde_json::to_string(&annotation).unwrap();
        let back: Annotation = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, annotation.id);
        assert_eq!(back.selected_text, "cat");
        assert_eq!(back.position_key(), (4, 7));
        assert_eq!(back.definitions, annotation.definitions);
    }

    #[test]
    fn test_optional_fields_elided_in_json() {
        let annotation = Annotation::new("article-1", "cat", 4, 7);
        let json = serde_json::to_string(&annotation).unwrap();

        assert!(!json.contains("audio_url"));
        assert!(!json.contains("phonetic"));
        assert!(json.contains("highlight_color"));
    }

    #[test]
    fn test_validate_range_ok() {
        let content = "The cat sat on the mat.";
        assert!(validate_range(content, 4, 7, "cat").is_ok());
    }

    #[test]
    fn test_validate_range_mismatch() {
        let content = "The cat sat on the mat.";
        let err = validate_range(content, 4, 7, "dog").unwrap_err();
        assert!(matches!(err, AnnotationError::TextMismatch { start: 4, end: 7 }));
    }

    #[test]
    fn test_validate_range_rejects_inverted_and_out_of_range() {
        let content = "short";
        assert!(matches!(
            validate_range(content, 3, 3, ""),
            Err(AnnotationError::InvalidRange { .. })
        ));
        assert!(matches!(
            validate_range(content, 4, 2, "xx"),
            Err(AnnotationError::InvalidRange { .. })
        ));
        assert!(matches!(
            validate_range(content, 0, 99, "short"),
            Err(AnnotationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_range_counts_chars_not_bytes() {
        let content = "Él leyó café.";
        // "café" occupies chars 8..12 even though the bytes differ.
        assert!(validate_range(content, 8, 12, "café").is_ok());
    }

    #[test]
    fn test_ranges_overlap() {
        assert!(ranges_overlap((0, 5), (3, 8)));
        assert!(ranges_overlap((3, 8), (0, 5)));
        assert!(ranges_overlap((2, 6), (2, 6)));
        assert!(ranges_overlap((0, 10), (3, 4)));
        // Half-open ranges touching at a boundary do not overlap.
        assert!(!ranges_overlap((0, 5), (5, 9)));
        assert!(!ranges_overlap((5, 9), (0, 5)));
        assert!(!ranges_overlap((0, 2), (7, 9)));
    }
}
