// voice-core/src/lib.rs

//! The core logic for the voice compass.
//! This crate is responsible for spectrum analysis, pitch and formant
//! estimation, and for mapping those estimates onto display axes.
//! It is completely headless and contains no GUI code.

pub mod analysis;
pub mod audio;
pub mod axis;
pub mod config;
pub mod convert;
pub mod coordinate;
pub mod error;
pub mod fft;
pub mod formant;
pub mod pitch;

pub use analysis::{analyze, Analyzer, MagnitudeBuffer};
pub use axis::{Axis, AxisCoordinate, AxisDimension, PITCH_AXIS, RESONANCE_AXIS};
pub use config::VoiceConfig;
pub use coordinate::{CompassPoint, Quadrant};
pub use error::{Error, Result};

/// Represents the result of analysing a single magnitude buffer.
///
/// Both fields are `None` when the analyzer could not produce a confident
/// estimate; there is no sentinel value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisOutput {
    /// The dominant pitch in Hz.
    pub pitch_hz: Option<f32>,
    /// Vocal-tract length in centimetres, derived from the first formant.
    pub resonance_value: Option<f32>,
}

impl AnalysisOutput {
    /// An output carrying no estimates at all.
    pub const ABSENT: Self = Self {
        pitch_hz: None,
        resonance_value: None,
    };

    /// Returns `true` when neither a pitch nor a resonance estimate exists.
    pub fn is_absent(&self) -> bool {
        self.pitch_hz.is_none() && self.resonance_value.is_none()
    }
}
