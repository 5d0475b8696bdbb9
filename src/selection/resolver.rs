//! Selection resolution

use serde::{Deserialize, Serialize};

use super::region::ContentRegion;
use crate::text;

/// Vertical gap between the selection rect and the popover anchor, in px.
const POPOVER_GAP: f64 = 10.0;

/// One endpoint of a selection range, anchored to a region node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangePoint {
    /// Key of the node the endpoint sits in.
    pub node: String,
    /// Char offset within that node's text.
    pub offset: usize,
}

/// A node-anchored selection range as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRef {
    pub start: RangePoint,
    pub end: RangePoint,
}

/// Bounding rectangle of the selection in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the host reports about a live selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// Ranges in document order. Only the first is resolved.
    pub ranges: Vec<RangeRef>,
    /// Bounding rect of the selection.
    #[serde(default)]
    pub rect: Rect,
    /// Vertical scroll position of the viewport.
    #[serde(default)]
    pub scroll_y: f64,
}

/// Where the annotation popover should anchor, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

/// A resolved selection. Ephemeral: handed to the capture flow, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSelection {
    /// Content slice at `[start_offset, end_offset)` after snapping.
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Popover anchor: horizontal center of the selection, just above it.
    pub anchor: AnchorPoint,
    /// The originating node-anchored range, echoed back to the host.
    pub range: RangeRef,
}

/// Whether resolved offsets expand to word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPolicy {
    /// Grow partial words out to whole words.
    #[default]
    SnapToWords,
    /// Keep the offsets exactly as selected.
    Exact,
}

/// Resolves selection snapshots against a content region.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionResolver {
    snap: SnapPolicy,
}

impl SelectionResolver {
    pub fn new(snap: SnapPolicy) -> Self {
        Self { snap }
    }

    /// Resolve a snapshot to a [`TextSelection`].
    ///
    /// Offsets come from accumulated text length: the global offset of an
    /// endpoint is the length of all region text before it. `None` for
    /// every unusable gesture; resolution itself never fails.
    ///
    /// The whitespace check runs on the raw range, before snapping, so a
    /// whitespace-only selection stays unusable even though snapping could
    /// grow it into the neighboring words.
    pub fn resolve(
        &self,
        region: &ContentRegion,
        snapshot: &SelectionSnapshot,
    ) -> Option<TextSelection> {
        let range = snapshot.ranges.first()?;

        let raw_start = region.offset_of(&range.start.node, range.start.offset)?;
        let raw_end = region.offset_of(&range.end.node, range.end.offset)?;
        if raw_end <= raw_start {
            return None;
        }

        let content = region.text();
        let raw_text = text::slice_chars(&content, raw_start, raw_end)?;
        if raw_text.trim().is_empty() {
            return None;
        }

        let (start_offset, end_offset) = match self.snap {
            SnapPolicy::SnapToWords => snap_to_word_boundaries(&content, raw_start, raw_end),
            SnapPolicy::Exact => (raw_start, raw_end),
        };

        let selected = text::slice_chars(&content, start_offset, end_offset)?;

        Some(TextSelection {
            text: selected.to_string(),
            start_offset,
            end_offset,
            anchor: AnchorPoint {
                x: snapshot.rect.left + snapshot.rect.width / 2.0,
                y: snapshot.rect.top + snapshot.scroll_y - POPOVER_GAP,
            },
            range: range.clone(),
        })
    }
}

/// Expand `[start, end)` outward while the adjacent chars are word chars.
///
/// Whitespace and punctuation stop the expansion, so only partially
/// selected words grow; a selection already on word boundaries is
/// returned unchanged.
pub fn snap_to_word_boundaries(content: &str, start: usize, end: usize) -> (usize, usize) {
    let chars: Vec<char> = content.chars().collect();
    let mut start = start.min(chars.len());
    let mut end = end.min(chars.len());

    while start > 0 && text::is_word_char(chars[start - 1]) {
        start -= 1;
    }
    while end < chars.len() && text::is_word_char(chars[end]) {
        end += 1;
    }

    (start, end)
}
