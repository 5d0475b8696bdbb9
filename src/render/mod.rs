//! Render module
//!
//! Turns `(content, annotations)` into an ordered stream of [`Segment`]s
//! that a client lays out directly: plain text runs interleaved with
//! annotated runs carrying popover metadata.
//!
//! Two strategies exist and are chosen explicitly per render, never
//! blended:
//!
//! - [`RenderStrategy::Splice`]: position-exact interval splicing. Only
//!   the annotated ranges light up; phrases spanning several words work.
//! - [`RenderStrategy::Tokenized`]: word-identity rendering. Every
//!   occurrence of an annotated word is interactive; the originally
//!   annotated position alone gets the visual highlight. The default.
//!
//! Both uphold the same contract: segment texts concatenate back to the
//! exact content, malformed annotation ranges degrade to skips, and the
//! output is a pure function of the inputs. Rendering is linear in the
//! content length and re-runs in full whenever the annotation set changes.

mod segment;
mod splice;
mod token;
mod tokenized;

pub use segment::{concat_text, AnnotationInfo, Segment};
pub use splice::render_spliced;
pub use token::{tokenize, Token, TokenKind};
pub use tokenized::render_tokenized;

use serde::{Deserialize, Serialize};

use crate::annotations::Annotation;

/// Which rendering algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStrategy {
    /// Position-exact interval splicing.
    Splice,
    /// Word-identity tokenization.
    #[default]
    Tokenized,
}

/// Reader presentation settings, passed through the render call instead
/// of living in ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Body font size in px, 14 to 24.
    pub font_size: u8,
    /// Line height multiplier: 1.5, 1.8 or 2.0.
    pub line_height: f32,
    /// Dim everything except the active paragraph.
    pub focus_mode: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 18,
            line_height: 1.8,
            focus_mode: false,
        }
    }
}

impl ReaderSettings {
    const LINE_HEIGHTS: [f32; 3] = [1.5, 1.8, 2.0];

    /// Clamp out-of-range values to the supported ones.
    pub fn normalized(mut self) -> Self {
        self.font_size = self.font_size.clamp(14, 24);
        if !Self::LINE_HEIGHTS.contains(&self.line_height) {
            self.line_height = 1.8;
        }
        self
    }
}

/// Options for one render call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub strategy: RenderStrategy,
    pub settings: ReaderSettings,
}

/// A rendered article: the segment stream plus the settings it was
/// rendered under.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedArticle {
    pub strategy: RenderStrategy,
    pub settings: ReaderSettings,
    pub segments: Vec<Segment>,
}

/// Render `content` with `annotations` under the chosen strategy.
pub fn render(
    content: &str,
    annotations: &[Annotation],
    options: RenderOptions,
) -> RenderedArticle {
    let settings = options.settings.normalized();
    let segments = match options.strategy {
        RenderStrategy::Splice => render_spliced(content, annotations),
        RenderStrategy::Tokenized => render_tokenized(content, annotations),
    };

    RenderedArticle {
        strategy: options.strategy,
        settings,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_normalization() {
        let settings = ReaderSettings {
            font_size: 99,
            line_height: 3.7,
            focus_mode: true,
        }
        .normalized();

        assert_eq!(settings.font_size, 24);
        assert_eq!(settings.line_height, 1.8);
        assert!(settings.focus_mode);

        let small = ReaderSettings {
            font_size: 6,
            line_height: 1.5,
            focus_mode: false,
        }
        .normalized();
        assert_eq!(small.font_size, 14);
        assert_eq!(small.line_height, 1.5);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ReaderSettings::default();
        assert_eq!(settings.font_size, 18);
        assert_eq!(settings.line_height, 1.8);
        assert!(!settings.focus_mode);
    }

    #[test]
    fn test_strategy_parses_from_lowercase() {
        let strategy: RenderStrategy = serde_json::from_str("\"splice\"").unwrap();
        assert_eq!(strategy, RenderStrategy::Splice);
        let strategy: RenderStrategy = serde_json::from_str("\"tokenized\"").unwrap();
        assert_eq!(strategy, RenderStrategy::Tokenized);
    }

    #[test]
    fn test_render_dispatches_both_strategies() {
        let content = "alpha beta alpha";
        let annotations = vec![Annotation::new("article-1", "alpha", 0, 5)];

        let spliced = render(
            content,
            &annotations,
            RenderOptions {
                strategy: RenderStrategy::Splice,
                settings: ReaderSettings::default(),
            },
        );
        let tokenized = render(content, &annotations, RenderOptions::default());

        // Splicing highlights the stored range only; tokenizing marks
        // both occurrences of the word.
        assert_eq!(
            spliced.segments.iter().filter(|s| s.is_highlight()).count(),
            1
        );
        assert_eq!(
            tokenized
                .segments
                .iter()
                .filter(|s| s.is_highlight())
                .count(),
            2
        );

        assert_eq!(concat_text(&spliced.segments), content);
        assert_eq!(concat_text(&tokenized.segments), content);
    }

    #[test]
    fn test_rendered_article_echoes_normalized_settings() {
        let rendered = render(
            "text",
            &[],
            RenderOptions {
                strategy: RenderStrategy::Tokenized,
                settings: ReaderSettings {
                    font_size: 2,
                    line_height: 9.0,
                    focus_mode: false,
                },
            },
        );

        assert_eq!(rendered.settings.font_size, 14);
        assert_eq!(rendered.settings.line_height, 1.8);
        assert_eq!(rendered.strategy, RenderStrategy::Tokenized);
    }
}
