//! Render segments

use serde::{Deserialize, Serialize};

use crate::annotations::{Annotation, Definition};

/// Annotation details carried on a highlight segment for the interaction
/// layer: popover content, jump-to-annotation targeting, playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationInfo {
    pub annotation_id: String,
    /// CSS color for the highlight background.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_sentence: Option<String>,
}

impl AnnotationInfo {
    pub fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            annotation_id: annotation.id.clone(),
            color: annotation.highlight_color.clone(),
            phonetic: annotation.phonetic.clone(),
            definitions: annotation.definitions.clone(),
            context_sentence: annotation.context_sentence.clone(),
        }
    }
}

/// One run of rendered article text.
///
/// Keys are derived from the run's start offset and therefore stable
/// across re-renders of the same content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Plain text with no interaction.
    Text { key: String, text: String },
    /// A run tied to an annotation. `highlighted` controls the visual
    /// background; tokenized rendering attaches metadata to repeated
    /// occurrences of a word without highlighting them.
    Highlight {
        key: String,
        text: String,
        highlighted: bool,
        annotation: AnnotationInfo,
    },
}

impl Segment {
    pub fn key(&self) -> &str {
        match self {
            Segment::Text { key, .. } | Segment::Highlight { key, .. } => key,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text, .. } | Segment::Highlight { text, .. } => text,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }
}

/// Concatenation of all segment texts. Equal to the source content for
/// every render, whatever the strategy or annotation state.
pub fn concat_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_accessors() {
        let plain = Segment::Text {
            key: "text-0".to_string(),
            text: "hello ".to_string(),
        };
        assert_eq!(plain.key(), "text-0");
        assert_eq!(plain.text(), "hello ");
        assert!(!plain.is_highlight());
    }

    #[test]
    fn test_serialization_is_tagged() {
        let annotation = Annotation::new("article-1", "word", 6, 10).with_phonetic("/wɜːd/");
        let segment = Segment::Highlight {
            key: "word-6".to_string(),
            text: "word".to_string(),
            highlighted: true,
            annotation: AnnotationInfo::from_annotation(&annotation),
        };

        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["type"], "highlight");
        assert_eq!(json["key"], "word-6");
        assert_eq!(json["highlighted"], true);
        assert_eq!(json["annotation"]["phonetic"], "/wɜːd/");

        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, segment);
    }

    #[test]
    fn test_concat_text() {
        let segments = vec![
            Segment::Text {
                key: "text-0".to_string(),
                text: "a ".to_string(),
            },
            Segment::Text {
                key: "text-2".to_string(),
                text: "b".to_string(),
            },
        ];
        assert_eq!(concat_text(&segments), "a b");
    }
}
