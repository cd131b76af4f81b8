//! # Analysis Module
//!
//! Turns one frequency-domain magnitude buffer into an [`AnalysisOutput`].
//! Every function here is pure: the buffer is only borrowed for the duration
//! of the call and nothing is cached between calls, so an [`Analyzer`] can be
//! shared freely between threads.

use crate::config::AnalyzerConfig;
use crate::{formant, pitch, AnalysisOutput};

/// A borrowed snapshot of per-bin magnitudes and the sample rate they were
/// captured at.
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeBuffer<'a> {
    magnitudes: &'a [f32],
    sample_rate: f32,
}

impl<'a> MagnitudeBuffer<'a> {
    pub fn new(magnitudes: &'a [f32], sample_rate: f32) -> Self {
        Self {
            magnitudes,
            sample_rate,
        }
    }

    /// Creates a buffer whose length must equal the declared bin count.
    ///
    /// # Panics
    /// * If `magnitudes.len() != bin_count`. A mismatch is a programming error
    ///   in the caller; pad or truncate at the capture boundary instead.
    pub fn with_bin_count(magnitudes: &'a [f32], sample_rate: f32, bin_count: usize) -> Self {
        assert_eq!(
            magnitudes.len(),
            bin_count,
            "magnitude buffer length must match the configured bin count"
        );
        Self::new(magnitudes, sample_rate)
    }

    pub fn magnitudes(&self) -> &'a [f32] {
        self.magnitudes
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Width of one bin in Hz: `sample_rate / 2 / len`.
    pub fn hertz_per_bin(&self) -> f32 {
        self.sample_rate / 2.0 / self.magnitudes.len() as f32
    }

    /// Converts a (possibly fractional) bin index into Hz.
    pub fn bin_to_hz(&self, bin: f32) -> f32 {
        bin * self.hertz_per_bin()
    }
}

/// Runs pitch and resonance estimation with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyses a single magnitude buffer.
    ///
    /// An empty buffer short-circuits to an output with both fields absent;
    /// nothing is scanned.
    pub fn analyze(&self, buffer: &MagnitudeBuffer<'_>) -> AnalysisOutput {
        if buffer.is_empty() {
            return AnalysisOutput::ABSENT;
        }

        let pitch_hz = pitch::estimate_pitch(buffer, self.config.pitch_threshold);
        let resonance_value = formant::estimate_first_formant(buffer, &self.config).and_then(
            |formant_hz| formant::vocal_tract_length_cm(formant_hz, self.config.speed_of_sound),
        );

        AnalysisOutput {
            pitch_hz,
            resonance_value,
        }
    }
}

/// Analyses `magnitudes` captured at `sample_rate` with the default
/// configuration.
pub fn analyze(magnitudes: &[f32], sample_rate: f32) -> AnalysisOutput {
    Analyzer::default().analyze(&MagnitudeBuffer::new(magnitudes, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_fully_absent() {
        let output = analyze(&[], 44_100.0);
        assert!(output.is_absent());
    }

    #[test]
    fn all_zero_buffer_is_fully_absent() {
        let data = vec![0.0; 1024];
        assert_eq!(analyze(&data, 44_100.0), AnalysisOutput::ABSENT);
    }

    #[test]
    fn hertz_per_bin_uses_half_the_sample_rate() {
        let data = vec![0.0; 1024];
        let buffer = MagnitudeBuffer::new(&data, 44_100.0);
        assert!((buffer.hertz_per_bin() - 21.533_203).abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "configured bin count")]
    fn mismatched_bin_count_fails_fast() {
        let data = vec![0.0; 100];
        let _ = MagnitudeBuffer::with_bin_count(&data, 44_100.0, 128);
    }

    #[test]
    fn analysis_is_deterministic() {
        let data: Vec<f32> = (0..512)
            .map(|i| (-((i as f32 - 60.0) / 12.0).powi(2)).exp())
            .collect();
        let analyzer = Analyzer::default();
        let buffer = MagnitudeBuffer::new(&data, 16_000.0);
        assert_eq!(analyzer.analyze(&buffer), analyzer.analyze(&buffer));
    }
}
