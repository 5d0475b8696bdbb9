//! Selection module
//!
//! Resolves a reader's selection gesture into a stable half-open char range
//! of the article content, plus an anchor point for the annotation popover.
//!
//! The host environment (whatever renders the article) is abstracted as a
//! [`ContentRegion`]: an ordered list of text-bearing nodes with stable
//! keys. A selection endpoint is `(node key, in-node char offset)`; global
//! offsets come from accumulated text length, never from node arithmetic,
//! so nested or split nodes cannot skew them.
//!
//! Resolution yields `None` rather than an error for every unusable
//! gesture: empty or collapsed ranges, whitespace-only text, endpoints
//! outside the region. Word-boundary snapping is a policy switch, on by
//! default.

mod region;
mod resolver;

pub use region::ContentRegion;
pub use resolver::{
    snap_to_word_boundaries, AnchorPoint, RangePoint, RangeRef, Rect, SelectionResolver,
    SelectionSnapshot, SnapPolicy, TextSelection,
};
