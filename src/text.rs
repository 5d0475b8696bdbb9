//! Plain-text helpers
//!
//! All offsets in this crate are Unicode scalar (char) offsets into an
//! article's content, never byte offsets. The conversions live here so the
//! selection and rendering sides cannot drift apart.

/// True for chars that belong to a word token: letters, digits, hyphen,
/// apostrophe. Shared by the tokenizer and word-boundary snapping.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '\''
}

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the char at `char_idx`. `char_idx == char_len(s)` maps to
/// `s.len()`; anything past that is `None`.
pub fn byte_index(s: &str, char_idx: usize) -> Option<usize> {
    s.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(s.len()))
        .nth(char_idx)
}

/// Slice `s` by a half-open char range. `None` when the range is inverted
/// or out of bounds.
pub fn slice_chars(s: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = byte_index(s, start)?;
    let to = byte_index(s, end)?;
    s.get(from..to)
}

/// Sentence surrounding the char at `offset`, trimmed.
///
/// Walks backward to the previous `.` `!` `?` or newline, then forward
/// through the next `.` `!` `?`. An offset past the end clamps to the end.
pub fn extract_sentence(content: &str, offset: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    let offset = offset.min(chars.len());

    let mut start = offset;
    while start > 0 {
        let c = chars[start - 1];
        if c == '.' || c == '!' || c == '?' || c == '\n' {
            break;
        }
        start -= 1;
    }

    let mut end = offset;
    while end < chars.len() {
        let c = chars[end];
        end += 1;
        if c == '.' || c == '!' || c == '?' {
            break;
        }
    }

    chars[start..end]
        .iter()
        .collect::<String>()
        .trim()
        .to_string()
}
