// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequencer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a scene sequencer.
///
/// Passed explicitly at construction; there are no ambient globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Whether narration bindings resolve against the speech backend
    pub narration_enabled: bool,
    /// Voice profile handed to the speech backend
    pub voice_profile: String,
    /// Duration in seconds for units with no explicit duration
    pub default_unit_duration: f32,
    /// Stagger fraction for lagged groupings that do not specify one
    pub lag_ratio_default: f32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            narration_enabled: false,
            voice_profile: "en-US-SteffanNeural".to_owned(),
            default_unit_duration: 1.0,
            lag_ratio_default: 0.05,
        }
    }
}

impl SequencerConfig {
    /// Configuration with narration enabled for the given voice
    pub fn narrated(voice_profile: impl Into<String>) -> Self {
        Self {
            narration_enabled: true,
            voice_profile: voice_profile.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SequencerConfig::default();
        assert!(!config.narration_enabled);
        assert_eq!(config.default_unit_duration, 1.0);
        assert_eq!(config.lag_ratio_default, 0.05);
    }

    #[test]
    fn test_serialization() {
        let config = SequencerConfig::narrated("en-GB-RyanNeural");
        let ron_str = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: SequencerConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }
}
