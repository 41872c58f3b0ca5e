// SPDX-License-Identifier: MIT OR Apache-2.0
//! Narration bindings and duration resolution.
//!
//! Narration is an optional enhancement layered over deterministic visual
//! pacing: a failing speech backend degrades the schedule to default-duration
//! playback, it never aborts a build.

use crate::config::SequencerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error for a speech backend that could not produce audio
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("narration unavailable: {reason}")]
pub struct NarrationUnavailableError {
    /// Backend-reported failure reason
    pub reason: String,
}

impl NarrationUnavailableError {
    /// Create an error with a backend-reported reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Where narration audio comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NarrationSource {
    /// No narration
    #[default]
    None,
    /// Synthesized by a text-to-speech backend
    Synthesized,
    /// Looked up from pre-recorded assets keyed by text
    PreRecorded,
}

/// Association of narration text with a grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NarrationBinding {
    /// Narration text, if any
    pub text: Option<String>,
    /// Audio source for this binding
    pub source: NarrationSource,
}

impl NarrationBinding {
    /// Create a binding for synthesized speech
    pub fn spoken(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            source: NarrationSource::Synthesized,
        }
    }

    /// Create a binding for a pre-recorded clip keyed by text
    pub fn pre_recorded(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            source: NarrationSource::PreRecorded,
        }
    }

    /// Create a binding with no narration
    pub fn silent() -> Self {
        Self::default()
    }

    /// Narration text, treating an empty string as absent
    pub fn effective_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Synthesized or looked-up narration audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationClip {
    /// Audio duration in seconds
    pub duration: f32,
    /// Backend asset reference (file path, cache key), if any
    pub asset: Option<String>,
}

/// Speech backend producing audio for narration text.
///
/// Implementations may call a TTS engine or look up pre-recorded assets; the
/// sequencer only needs the resulting clip duration.
pub trait SpeechService {
    /// Produce audio for `text` spoken with `voice`
    fn synthesize(
        &mut self,
        text: &str,
        voice: &str,
    ) -> Result<NarrationClip, NarrationUnavailableError>;
}

/// Offline speech service estimating duration from a speaking rate.
///
/// Deterministic per text, so resolved durations are reproducible without an
/// audio backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacedSpeech {
    /// Speaking rate in words per minute
    pub words_per_minute: f32,
}

impl Default for PacedSpeech {
    fn default() -> Self {
        Self {
            words_per_minute: 150.0,
        }
    }
}

impl SpeechService for PacedSpeech {
    fn synthesize(
        &mut self,
        text: &str,
        _voice: &str,
    ) -> Result<NarrationClip, NarrationUnavailableError> {
        if self.words_per_minute <= 0.0 || !self.words_per_minute.is_finite() {
            return Err(NarrationUnavailableError::new(format!(
                "invalid speaking rate: {}",
                self.words_per_minute
            )));
        }
        let words = text.split_whitespace().count().max(1) as f32;
        Ok(NarrationClip {
            duration: words * 60.0 / self.words_per_minute,
            asset: None,
        })
    }
}

/// Resolves effective durations for narration bindings.
///
/// Owns the speech backend, the voice profile and a per-text cache so that
/// resolving the same text twice yields the same clip.
pub struct NarrationResolver {
    service: Option<Box<dyn SpeechService>>,
    voice: String,
    default_duration: f32,
    enabled: bool,
    cache: HashMap<String, NarrationClip>,
}

impl NarrationResolver {
    /// Create a resolver from the sequencer configuration and a speech backend
    pub fn new(config: &SequencerConfig, service: Option<Box<dyn SpeechService>>) -> Self {
        Self {
            service,
            voice: config.voice_profile.clone(),
            default_duration: config.default_unit_duration,
            enabled: config.narration_enabled,
            cache: HashMap::new(),
        }
    }

    /// Resolve the effective duration for a binding.
    ///
    /// Returns the resolved duration and, when narration audio was produced,
    /// the clip to attach to the schedule entry. `requested` is the duration
    /// the grouping would occupy without narration.
    pub fn resolve(
        &mut self,
        binding: &NarrationBinding,
        requested: Option<f32>,
    ) -> (f32, Option<NarrationClip>) {
        let fallback = requested.unwrap_or(self.default_duration);

        let Some(text) = binding.effective_text() else {
            return (fallback, None);
        };
        if !self.enabled {
            return (fallback, None);
        }

        if let Some(clip) = self.cache.get(text) {
            return (clip.duration, Some(clip.clone()));
        }

        let Some(service) = self.service.as_mut() else {
            tracing::warn!(
                "narration enabled but no speech service configured; using {fallback}s"
            );
            return (fallback, None);
        };

        match service.synthesize(text, &self.voice) {
            Ok(clip) => {
                self.cache.insert(text.to_owned(), clip.clone());
                (clip.duration, Some(clip))
            }
            Err(err) => {
                tracing::warn!("narration synthesis failed ({err}); using {fallback}s");
                (fallback, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingService;

    impl SpeechService for FailingService {
        fn synthesize(
            &mut self,
            _text: &str,
            _voice: &str,
        ) -> Result<NarrationClip, NarrationUnavailableError> {
            Err(NarrationUnavailableError::new("backend offline"))
        }
    }

    /// Service that reports a different duration on every call, to make
    /// cache hits observable.
    struct CountingService {
        calls: u32,
    }

    impl SpeechService for CountingService {
        fn synthesize(
            &mut self,
            _text: &str,
            _voice: &str,
        ) -> Result<NarrationClip, NarrationUnavailableError> {
            self.calls += 1;
            Ok(NarrationClip {
                duration: self.calls as f32,
                asset: None,
            })
        }
    }

    fn narrated_config() -> SequencerConfig {
        SequencerConfig {
            narration_enabled: true,
            ..SequencerConfig::default()
        }
    }

    #[test]
    fn test_paced_speech_is_deterministic() {
        let mut service = PacedSpeech::default();
        let a = service.synthesize("the quick brown fox", "test").unwrap();
        let b = service.synthesize("the quick brown fox", "test").unwrap();
        assert_eq!(a.duration, b.duration);
        assert_eq!(a.duration, 4.0 * 60.0 / 150.0);
    }

    #[test]
    fn test_disabled_narration_uses_requested_or_default() {
        let config = SequencerConfig::default();
        let mut resolver = NarrationResolver::new(&config, Some(Box::new(PacedSpeech::default())));

        let binding = NarrationBinding::spoken("hello there");
        assert_eq!(resolver.resolve(&binding, Some(2.5)).0, 2.5);
        assert_eq!(
            resolver.resolve(&binding, None).0,
            config.default_unit_duration
        );
    }

    #[test]
    fn test_empty_text_is_silent() {
        let mut resolver =
            NarrationResolver::new(&narrated_config(), Some(Box::new(PacedSpeech::default())));

        let binding = NarrationBinding::spoken("");
        let (duration, clip) = resolver.resolve(&binding, Some(1.5));
        assert_eq!(duration, 1.5);
        assert!(clip.is_none());
    }

    #[test]
    fn test_synthesis_failure_falls_back() {
        let mut resolver = NarrationResolver::new(&narrated_config(), Some(Box::new(FailingService)));

        let binding = NarrationBinding::spoken("this will not be spoken");
        let (duration, clip) = resolver.resolve(&binding, None);
        assert_eq!(duration, SequencerConfig::default().default_unit_duration);
        assert!(clip.is_none());
    }

    #[test]
    fn test_resolution_is_idempotent_per_text() {
        let mut resolver = NarrationResolver::new(
            &narrated_config(),
            Some(Box::new(CountingService { calls: 0 })),
        );

        let binding = NarrationBinding::spoken("cached line");
        let (first, _) = resolver.resolve(&binding, None);
        let (second, _) = resolver.resolve(&binding, None);
        assert_eq!(first, second);

        // A different text does hit the backend again
        let other = NarrationBinding::spoken("different line");
        let (third, _) = resolver.resolve(&other, None);
        assert_ne!(first, third);
    }
}
