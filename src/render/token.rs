//! Content tokenizer
//!
//! Splits article text into word, whitespace and punctuation runs with
//! half-open char ranges. Classification is total: every char lands in
//! exactly one run, so concatenating the tokens reproduces the input.

use crate::text::is_word_char;

/// Classification of a token run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letters, digits, hyphens, apostrophes.
    Word,
    Whitespace,
    /// Everything else.
    Punctuation,
}

fn classify(c: char) -> TokenKind {
    if is_word_char(c) {
        TokenKind::Word
    } else if c.is_whitespace() {
        TokenKind::Whitespace
    } else {
        TokenKind::Punctuation
    }
}

/// A maximal run of same-kind chars at `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Scanner state over the content chars.
struct Tokenizer {
    input: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(content: &str) -> Self {
        Self {
            input: content.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Option<Token> {
        let kind = classify(self.peek()?);
        let start = self.pos;

        while let Some(c) = self.peek() {
            if classify(c) != kind {
                break;
            }
            self.pos += 1;
        }

        Some(Token {
            kind,
            text: self.input[start..self.pos].iter().collect(),
            start,
            end: self.pos,
        })
    }
}

/// Tokenize `content` into classified runs with char offsets.
pub fn tokenize(content: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(content);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_sentence() {
        let tokens = tokenize("The cat.");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Word,
                TokenKind::Whitespace,
                TokenKind::Word,
                TokenKind::Punctuation,
            ]
        );
        assert_eq!(tokens[0].text, "The");
        assert_eq!((tokens[2].start, tokens[2].end), (4, 7));
        assert_eq!(tokens[3].text, ".");
    }

    #[test]
    fn test_hyphen_and_apostrophe_stay_in_words() {
        let tokens = tokenize("it's a well-known fact");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(words, vec!["it's", "a", "well-known", "fact"]);
    }

    #[test]
    fn test_runs_are_maximal() {
        let tokens = tokenize("wait...  what?!");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Word,
                TokenKind::Punctuation,
                TokenKind::Whitespace,
                TokenKind::Word,
                TokenKind::Punctuation,
            ]
        );
        assert_eq!(tokens[1].text, "...");
        assert_eq!(tokens[2].text, "  ");
        assert_eq!(tokens[4].text, "?!");
    }

    #[test]
    fn test_every_char_is_classified() {
        // Underscores and symbols are neither word nor whitespace; they
        // must still come through as punctuation runs.
        let content = "a_b @#€ c\n\nd";
        let tokens = tokenize(content);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_round_trip_multibyte() {
        let content = "¿Qué pasó? — café, naïve; 中文 words";
        let rebuilt: String = tokenize(content).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_offsets_are_char_offsets() {
        let tokens = tokenize("café bar");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 4));
        assert_eq!((tokens[2].start, tokens[2].end), (5, 8));
        assert_eq!(tokens[2].text, "bar");
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
