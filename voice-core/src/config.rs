//! # Configuration Module
//!
//! Runtime configuration for analysis, capture and display, persisted as
//! pretty-printed JSON. Every section carries `#[serde(default)]` so that a
//! partial file fills the missing fields with defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::formant::SPEED_OF_SOUND_M_PER_S;
use crate::pitch::DEFAULT_PITCH_THRESHOLD;

/// Default file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "voice_config.json";

/// Tuning constants for the signal analyzer.
///
/// The segment growth and centroid exponent are empirically tuned; changing
/// them changes which formant is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum magnitude for a pitch peak, in the buffer's own units.
    pub pitch_threshold: f32,
    /// Half-width of the first moving-average pass, in bins.
    pub first_smoothing_radius: usize,
    /// Half-width of the second moving-average pass, in bins.
    pub second_smoothing_radius: usize,
    /// Size of the first peak-extraction segment, in bins.
    pub base_segment_size: usize,
    /// Exponent applied to the segment index when growing segments.
    pub segment_log_scale: f32,
    /// Number of formant slots to keep.
    pub formant_count: usize,
    /// Exponent of the magnitude weights in the formant centroid.
    pub centroid_exponent: i32,
    /// Speed of sound in m/s used for the vocal-tract length.
    pub speed_of_sound: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            pitch_threshold: DEFAULT_PITCH_THRESHOLD,
            first_smoothing_radius: 20,
            second_smoothing_radius: 10,
            base_segment_size: 6,
            segment_log_scale: 1.0,
            formant_count: 1,
            centroid_exponent: 40,
            speed_of_sound: SPEED_OF_SOUND_M_PER_S,
        }
    }
}

/// Audio capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Number of time-domain samples per analysis frame.
    pub frame_size: usize,
    /// Preferred device sample rate in Hz.
    pub target_sample_rate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            target_sample_rate: 44_100,
        }
    }
}

/// Readout and refresh settings for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places shown in formatted readouts.
    pub value_precision: usize,
    /// Interval between display ticks in milliseconds.
    pub refresh_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            value_precision: 1,
            refresh_interval_ms: 16, // ~60 FPS
        }
    }
}

impl DisplayConfig {
    /// Largest number of decimal places a readout may show.
    pub const MAX_VALUE_PRECISION: usize = 4;

    /// Shows one more decimal place, up to [`Self::MAX_VALUE_PRECISION`].
    pub fn increase_precision(&mut self) {
        self.value_precision = (self.value_precision + 1).min(Self::MAX_VALUE_PRECISION);
    }

    /// Shows one fewer decimal place, down to none.
    pub fn decrease_precision(&mut self) {
        self.value_precision = self.value_precision.saturating_sub(1);
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub analyzer: AnalyzerConfig,
    pub capture: CaptureConfig,
    pub display: DisplayConfig,
}

impl VoiceConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Arguments
    /// * `path` - JSON file to read
    ///
    /// # Returns
    /// * `Ok(config)` - Parsed, validated configuration
    /// * `Err(e)` - The file could not be read, parsed or validated
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads a configuration file, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(Error::Io(e)) => {
                debug!("Config file not readable at {:?}: {}", path, e);
                debug!("Using default configuration");
                Self::default()
            }
            Err(e) => {
                warn!("Failed to load config file {:?}: {}", path, e);
                warn!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Saves the configuration as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Rejects values that would make analysis or capture meaningless.
    pub fn validate(&self) -> Result<()> {
        let analyzer = &self.analyzer;

        if !analyzer.pitch_threshold.is_finite() {
            return Err(invalid("pitch_threshold must be finite"));
        }
        if analyzer.base_segment_size == 0 {
            return Err(invalid("base_segment_size must be at least 1"));
        }
        if !analyzer.segment_log_scale.is_finite() || analyzer.segment_log_scale < 0.0 {
            return Err(invalid("segment_log_scale must be a non-negative number"));
        }
        if analyzer.formant_count == 0 {
            return Err(invalid("formant_count must be at least 1"));
        }
        if analyzer.centroid_exponent <= 0 {
            return Err(invalid("centroid_exponent must be positive"));
        }
        if !analyzer.speed_of_sound.is_finite() || analyzer.speed_of_sound <= 0.0 {
            return Err(invalid("speed_of_sound must be positive"));
        }
        if self.capture.frame_size < 4 {
            return Err(invalid("frame_size must be at least 4 samples"));
        }
        if self.capture.target_sample_rate == 0 {
            return Err(invalid("target_sample_rate must be positive"));
        }
        if self.display.value_precision > DisplayConfig::MAX_VALUE_PRECISION {
            return Err(invalid("value_precision must be at most 4"));
        }
        if self.display.refresh_interval_ms == 0 {
            return Err(invalid("refresh_interval_ms must be positive"));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> Error {
    Error::InvalidConfig(reason.to_string())
}
