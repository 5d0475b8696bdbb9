//! Tokenized renderer
//!
//! Word-identity strategy: the content is tokenized in full, and every
//! word token matching an annotated word (case-insensitive) becomes an
//! interactive segment carrying that annotation's metadata. The visual
//! highlight is reserved for the position the annotation was originally
//! made at; repeated occurrences stay unhighlighted but keep the phonetic
//! and definitions.

use std::collections::{HashMap, HashSet};

use crate::annotations::Annotation;

use super::segment::{AnnotationInfo, Segment};
use super::token::{tokenize, TokenKind};

/// Render `content` by tokenizing it and matching word tokens against the
/// annotated vocabulary.
///
/// When the same word was annotated more than once, the first annotation
/// in `annotations` wins the word mapping; callers pass the list ordered
/// by start offset, so that is the earliest one in the article.
pub fn render_tokenized(content: &str, annotations: &[Annotation]) -> Vec<Segment> {
    if annotations.is_empty() {
        return vec![Segment::Text {
            key: "text-0".to_string(),
            text: content.to_string(),
        }];
    }

    let mut by_word: HashMap<String, &Annotation> = HashMap::new();
    let mut annotated_positions: HashSet<(usize, usize)> = HashSet::new();
    for annotation in annotations {
        by_word
            .entry(annotation.selected_text.to_lowercase())
            .or_insert(annotation);
        annotated_positions.insert(annotation.position_key());
    }

    tokenize(content)
        .into_iter()
        .map(|token| {
            if token.kind == TokenKind::Word {
                if let Some(annotation) = by_word.get(&token.text.to_lowercase()) {
                    return Segment::Highlight {
                        key: format!("word-{}", token.start),
                        text: token.text,
                        highlighted: annotated_positions.contains(&(token.start, token.end)),
                        annotation: AnnotationInfo::from_annotation(annotation),
                    };
                }
            }
            Segment::Text {
                key: format!("text-{}", token.start),
                text: token.text,
            }
        })
        .collect()
}
