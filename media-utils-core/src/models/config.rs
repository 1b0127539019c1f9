use serde::{Deserialize, Serialize};

use super::error::MediaError;

/// Latency preference handed to the host when creating an audio context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyHint {
    Interactive,
    Balanced,
    Playback,
}

/// Options for the audio context created by each `combine` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfiguration {
    /// Context sample rate in Hz (default: 48000).
    pub sample_rate: f64,

    /// Output channel count of the destination node (default: 2).
    pub channel_count: u16,

    /// Latency preference (default: interactive).
    pub latency_hint: LatencyHint,
}

impl MixerConfiguration {
    pub const MIN_SAMPLE_RATE: f64 = 8000.0;
    pub const MAX_SAMPLE_RATE: f64 = 384000.0;
    pub const MAX_CHANNELS: u16 = 32;

    pub fn validate(&self) -> Result<(), String> {
        if !(Self::MIN_SAMPLE_RATE..=Self::MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(format!("unsupported sample rate: {}", self.sample_rate));
        }
        if self.channel_count == 0 || self.channel_count > Self::MAX_CHANNELS {
            return Err(format!("unsupported channel count: {}", self.channel_count));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MediaError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MediaError::ConfigurationFailed(format!("failed to parse configuration: {}", e)))?;
        config.validate().map_err(MediaError::ConfigurationFailed)?;
        Ok(config)
    }
}

impl Default for MixerConfiguration {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            channel_count: 2,
            latency_hint: LatencyHint::Interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(MixerConfiguration::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_sample_rate() {
        let config = MixerConfiguration {
            sample_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MixerConfiguration {
            sample_rate: 1_000_000.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_channels() {
        let config = MixerConfiguration {
            channel_count: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err("unsupported channel count: 0".to_string())
        );
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = MixerConfiguration::from_json_str(r#"{"sample_rate": 44100.0}"#).unwrap();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.channel_count, 2);
        assert_eq!(config.latency_hint, LatencyHint::Interactive);
    }

    #[test]
    fn from_json_parses_latency_hint() {
        let config = MixerConfiguration::from_json_str(r#"{"latency_hint": "playback"}"#).unwrap();
        assert_eq!(config.latency_hint, LatencyHint::Playback);
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        let err = MixerConfiguration::from_json_str(r#"{"channel_count": 0}"#).unwrap_err();
        assert!(matches!(err, MediaError::ConfigurationFailed(_)));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = MixerConfiguration::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, MediaError::ConfigurationFailed(msg) if msg.starts_with("failed to parse")));
    }
}
