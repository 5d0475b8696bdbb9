//! Interval-splicing renderer
//!
//! Position-exact strategy: walks the content once with a cursor, splicing
//! each annotation's range in ascending start order. Gap text before an
//! annotation, the highlighted slice, then the tail after the last one.

use crate::annotations::Annotation;
use crate::text;

use super::segment::{AnnotationInfo, Segment};

/// Render `content` by splicing annotation ranges into the text.
///
/// Malformed annotations degrade, they never fail the render: ranges are
/// clamped to the content length, empty and out-of-range ones are skipped,
/// and an annotation starting before the cursor (an overlap with the one
/// already emitted) is skipped with a warning. The emitted texts always
/// concatenate back to `content`.
pub fn render_spliced(content: &str, annotations: &[Annotation]) -> Vec<Segment> {
    if annotations.is_empty() {
        return vec![Segment::Text {
            key: "text-0".to_string(),
            text: content.to_string(),
        }];
    }

    let len = text::char_len(content);

    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.start_offset);

    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for annotation in sorted {
        let start = annotation.start_offset;
        let end = annotation.end_offset.min(len);

        if start >= len || end <= start {
            tracing::warn!(
                annotation_id = %annotation.id,
                start,
                end = annotation.end_offset,
                content_len = len,
                "skipping annotation with unusable range"
            );
            continue;
        }
        if start < cursor {
            tracing::warn!(
                annotation_id = %annotation.id,
                start,
                cursor,
                "skipping annotation overlapping an already rendered range"
            );
            continue;
        }

        if start > cursor {
            if let Some(gap) = text::slice_chars(content, cursor, start) {
                segments.push(Segment::Text {
                    key: format!("text-{cursor}"),
                    text: gap.to_string(),
                });
            }
        }

        if let Some(slice) = text::slice_chars(content, start, end) {
            segments.push(Segment::Highlight {
                key: format!("word-{start}"),
                text: slice.to_string(),
                highlighted: true,
                annotation: AnnotationInfo::from_annotation(annotation),
            });
            cursor = end;
        }
    }

    if cursor < len {
        if let Some(tail) = text::slice_chars(content, cursor, len) {
            segments.push(Segment::Text {
                key: format!("text-{cursor}"),
                text: tail.to_string(),
            });
        }
    }

    segments
}
