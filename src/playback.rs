//! Pronunciation playback planning
//!
//! The server does not play audio; it hands the client a plan for one
//! annotation and models the client's playing state. An annotation with
//! stored audio plays that URL and falls back to speech synthesis on a
//! load or playback error; an annotation without audio goes straight to
//! speech synthesis of its selected text.

use serde::{Deserialize, Serialize};

use crate::annotations::Annotation;

/// Locale for synthesized speech.
pub const SPEECH_LANG: &str = "en-US";
/// Reduced utterance rate so learners catch the pronunciation.
pub const SPEECH_RATE: f32 = 0.8;

/// One way of sounding out an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaybackSource {
    /// Stored pronunciation audio.
    Audio { url: String },
    /// Client-side speech synthesis of the selected text.
    Speech { text: String, lang: String, rate: f32 },
}

/// Playback plan for a single annotation.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackPlan {
    pub annotation_id: String,
    /// What to try first.
    pub source: PlaybackSource,
    /// Speech fallback when `source` is stored audio that fails to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<PlaybackSource>,
}

impl PlaybackPlan {
    pub fn for_annotation(annotation: &Annotation) -> Self {
        let speech = PlaybackSource::Speech {
            text: annotation.selected_text.clone(),
            lang: SPEECH_LANG.to_string(),
            rate: SPEECH_RATE,
        };

        match &annotation.audio_url {
            Some(url) => Self {
                annotation_id: annotation.id.clone(),
                source: PlaybackSource::Audio { url: url.clone() },
                fallback: Some(speech),
            },
            None => Self {
                annotation_id: annotation.id.clone(),
                source: speech,
                fallback: None,
            },
        }
    }
}

/// Tracks which annotation is currently playing.
///
/// At most one id is tracked; starting another replaces it without
/// queueing. Completion and error events clear the state only when they
/// belong to the tracked id, so a stale event from a replaced annotation
/// cannot knock out the current one.
#[derive(Debug, Default)]
pub struct PlaybackTracker {
    playing: Option<String>,
}

impl PlaybackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `annotation_id` as playing. Returns the id it displaced.
    pub fn start(&mut self, annotation_id: &str) -> Option<String> {
        self.playing.replace(annotation_id.to_string())
    }

    /// Handle a completion or error event for `annotation_id`. Returns
    /// whether the event cleared the tracked state.
    pub fn finish(&mut self, annotation_id: &str) -> bool {
        if self.playing.as_deref() == Some(annotation_id) {
            self.playing = None;
            true
        } else {
            false
        }
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    pub fn is_playing(&self, annotation_id: &str) -> bool {
        self.playing.as_deref() == Some(annotation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(audio_url: Option<&str>) -> Annotation {
        let mut a = Annotation::new("article-1", "ephemeral", 10, 19);
        if let Some(url) = audio_url {
            a = a.with_audio_url(url);
        }
        a
    }

    #[test]
    fn test_plan_prefers_stored_audio() {
        let a = annotation(Some("https://cdn.example.com/audio.mp3"));
        let plan = PlaybackPlan::for_annotation(&a);

        assert_eq!(
            plan.source,
            PlaybackSource::Audio {
                url: "https://cdn.example.com/audio.mp3".to_string()
            }
        );
        match plan.fallback {
            Some(PlaybackSource::Speech { text, lang, rate }) => {
                assert_eq!(text, "ephemeral");
                assert_eq!(lang, "en-US");
                assert_eq!(rate, 0.8);
            }
            other => panic!("expected speech fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_without_audio_goes_straight_to_speech() {
        let plan = PlaybackPlan::for_annotation(&annotation(None));

        match plan.source {
            PlaybackSource::Speech { ref text, ref lang, rate } => {
                assert_eq!(text, "ephemeral");
                assert_eq!(lang, "en-US");
                assert_eq!(rate, 0.8);
            }
            ref other => panic!("expected speech source, got {:?}", other),
        }
        assert!(plan.fallback.is_none());
    }

    #[test]
    fn test_source_serializes_tagged() {
        let source = PlaybackSource::Audio {
            url: "https://cdn.example.com/a.mp3".to_string(),
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "audio");

        let speech: PlaybackSource =
            serde_json::from_str(r#"{"type":"speech","text":"cat","lang":"en-US","rate":0.8}"#)
                .unwrap();
        assert!(matches!(speech, PlaybackSource::Speech { .. }));
    }

    #[test]
    fn test_tracker_replaces_instead_of_queueing() {
        let mut tracker = PlaybackTracker::new();

        assert_eq!(tracker.start("a"), None);
        assert!(tracker.is_playing("a"));

        // Starting another annotation displaces the first.
        assert_eq!(tracker.start("b"), Some("a".to_string()));
        assert!(tracker.is_playing("b"));
        assert!(!tracker.is_playing("a"));
    }

    #[test]
    fn test_tracker_clears_on_finish() {
        let mut tracker = PlaybackTracker::new();
        tracker.start("a");

        assert!(tracker.finish("a"));
        assert_eq!(tracker.playing(), None);
    }

    #[test]
    fn test_stale_event_leaves_current_playback_alone() {
        let mut tracker = PlaybackTracker::new();
        tracker.start("a");
        tracker.start("b");

        // The replaced annotation's completion event arrives late.
        assert!(!tracker.finish("a"));
        assert!(tracker.is_playing("b"));
    }

    #[test]
    fn test_finish_on_idle_tracker_is_a_no_op() {
        let mut tracker = PlaybackTracker::new();
        assert!(!tracker.finish("a"));
        assert_eq!(tracker.playing(), None);
    }
}
