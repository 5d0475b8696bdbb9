//! Content region model

use crate::text;

/// One text-bearing node of the rendered article container.
#[derive(Debug, Clone)]
struct TextNode {
    key: String,
    text: String,
}

/// A flattened view of the container an article is rendered in: text nodes
/// in document order, concatenating to the article content.
///
/// Keys are whatever the renderer used for its segments; the host echoes
/// them back in selection snapshots.
#[derive(Debug, Clone)]
pub struct ContentRegion {
    nodes: Vec<TextNode>,
}

impl ContentRegion {
    /// Region holding the whole content in a single node keyed `text-0`.
    pub fn single_node(content: &str) -> Self {
        Self::from_parts([("text-0".to_string(), content.to_string())])
    }

    /// Build a region from `(key, text)` parts in document order.
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let nodes = parts
            .into_iter()
            .map(|(key, text)| TextNode { key, text })
            .collect();
        Self { nodes }
    }

    /// Concatenated plain text of all nodes.
    pub fn text(&self) -> String {
        self.nodes.iter().map(|n| n.text.as_str()).collect()
    }

    /// Total char length of the region text.
    pub fn char_len(&self) -> usize {
        self.nodes.iter().map(|n| text::char_len(&n.text)).sum()
    }

    /// Global char offset of the point `(key, offset)`: the summed char
    /// lengths of all earlier nodes plus the in-node offset.
    ///
    /// `None` when the key is not part of the region or the offset lies
    /// past the node's text. An offset equal to the node length is valid;
    /// selection endpoints may sit just past the last char.
    pub fn offset_of(&self, key: &str, offset: usize) -> Option<usize> {
        let mut preceding = 0usize;
        for node in &self.nodes {
            let len = text::char_len(&node.text);
            if node.key == key {
                if offset > len {
                    return None;
                }
                return Some(preceding + offset);
            }
            preceding += len;
        }
        None
    }
}
