//! # Formant Estimation Module
//!
//! Formants are broad humps in the spectrum rather than single-bin spikes,
//! so the raw magnitudes are too noisy to peak-pick directly. Estimation
//! runs in three stages:
//!
//! 1. Two centred moving averages produce a low-noise envelope.
//! 2. The envelope is cut into segments that grow with frequency and only
//!    the maximum of each segment is kept.
//! 3. Local maxima of that coarse peak sequence become formant candidates,
//!    each positioned at a sharply weighted centroid of its neighbourhood.
//!
//! The first formant then yields a vocal-tract length estimate.

use std::collections::VecDeque;

use crate::analysis::MagnitudeBuffer;
use crate::config::AnalyzerConfig;

/// Speed of sound in air, in metres per second.
pub const SPEED_OF_SOUND_M_PER_S: f32 = 343.0;

/// The maximum of one envelope segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPeak {
    /// Bin index of the maximum within the envelope.
    pub index: usize,
    pub value: f32,
}

/// A formant candidate selected from the peak sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formant {
    /// Weighted centroid position, in (fractional) bins.
    pub position: f32,
    /// Envelope value at the local maximum.
    pub magnitude: f32,
}

/// Centred moving average with a window of `radius` samples on each side.
///
/// Windows near the edges are not zero-padded: they average over however
/// many samples actually exist.
pub fn moving_average(data: &[f32], radius: usize) -> Vec<f32> {
    let n = data.len();

    // prefix[i] = sum of data[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    let mut running = 0.0f64;
    prefix.push(running);
    for &v in data {
        running += v as f64;
        prefix.push(running);
    }

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(n);
            ((prefix[hi] - prefix[lo]) / (hi - lo) as f64) as f32
        })
        .collect()
}

/// Applies the two moving-average passes configured in `config`.
pub fn smoothed_envelope(magnitudes: &[f32], config: &AnalyzerConfig) -> Vec<f32> {
    let first = moving_average(magnitudes, config.first_smoothing_radius);
    moving_average(&first, config.second_smoothing_radius)
}

/// Splits `data` into segments of growing size and keeps each segment's maximum.
///
/// The first segment spans `base_segment_size` samples; afterwards the n-th
/// segment spans `n^log_scale * base_segment_size`. A segment closes on the
/// sample that reaches its end, and that sample also opens the next one.
/// A trailing segment that never reaches its end is discarded.
pub fn segment_peaks(data: &[f32], base_segment_size: usize, log_scale: f32) -> Vec<SegmentPeak> {
    let base = base_segment_size as f32;
    let mut peaks = Vec::new();

    let mut segment_size = base;
    let mut segment_index = 1u32;
    let mut segment_start = 0usize;
    let mut peak = SegmentPeak {
        index: 0,
        value: 0.0,
    };

    for (k, &value) in data.iter().enumerate() {
        if value >= peak.value {
            peak = SegmentPeak { index: k, value };
        }

        if k as f32 >= segment_start as f32 + segment_size {
            peaks.push(peak);

            segment_size = (segment_index as f32).powf(log_scale) * base;
            segment_start = k;
            segment_index += 1;
            peak.value = 0.0;
        }
    }

    peaks
}

/// Picks formants out of a peak sequence.
///
/// A peak qualifies when it is strictly greater than both neighbours and
/// than the magnitude held in the oldest slot of a window of
/// `formant_count + 1` slots. Each qualifying peak evicts that oldest slot.
/// The result is the first `formant_count` filled slots, in frequency order,
/// so a stronger later hump never displaces the lower one before it.
///
/// The position is the centroid of the peak and its two neighbours weighted
/// by `value^exponent`. A large exponent keeps the centroid close to, but not
/// exactly on, the strongest of the three.
pub fn select_formants(peaks: &[SegmentPeak], formant_count: usize, exponent: i32) -> Vec<Formant> {
    if formant_count == 0 {
        return Vec::new();
    }

    let mut window: VecDeque<Option<Formant>> = std::iter::repeat(None).take(formant_count + 1).collect();

    for i in 1..peaks.len().saturating_sub(1) {
        let (prev, current, next) = (peaks[i - 1], peaks[i], peaks[i + 1]);

        let oldest = window.front().copied().flatten().map_or(0.0, |f| f.magnitude);
        if current.value <= oldest {
            continue;
        }
        if !(prev.value < current.value && current.value > next.value) {
            continue;
        }

        window.pop_front();
        window.push_back(Some(Formant {
            position: weighted_centroid(&[prev, current, next], current.value, exponent),
            magnitude: current.value,
        }));
    }

    window.into_iter().flatten().take(formant_count).collect()
}

/// Centroid of `peaks` weighted by `value^exponent`.
///
/// Values are divided by `reference` before exponentiation; the centroid is
/// unchanged, but the weights stay representable for any input scale.
fn weighted_centroid(peaks: &[SegmentPeak], reference: f32, exponent: i32) -> f32 {
    let reference = reference as f64;
    let mut weighted_position = 0.0f64;
    let mut total_weight = 0.0f64;

    for peak in peaks {
        let weight = (peak.value as f64 / reference).powi(exponent);
        weighted_position += peak.index as f64 * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 && total_weight.is_finite() {
        (weighted_position / total_weight) as f32
    } else {
        peaks[peaks.len() / 2].index as f32
    }
}

/// Runs the full pipeline and returns up to `config.formant_count` formants,
/// positioned in bins.
pub fn estimate_formants(magnitudes: &[f32], config: &AnalyzerConfig) -> Vec<Formant> {
    let envelope = smoothed_envelope(magnitudes, config);
    let peaks = segment_peaks(&envelope, config.base_segment_size, config.segment_log_scale);
    select_formants(&peaks, config.formant_count, config.centroid_exponent)
}

/// Estimates the first dominant formant of `buffer` in Hz.
///
/// Returns `None` when no qualifying local maximum exists.
pub fn estimate_first_formant(buffer: &MagnitudeBuffer<'_>, config: &AnalyzerConfig) -> Option<f32> {
    let Some(first) = estimate_formants(buffer.magnitudes(), config).into_iter().next() else {
        tracing::trace!(bins = buffer.len(), "no formant found");
        return None;
    };

    Some(buffer.bin_to_hz(first.position))
}

/// Converts a first-formant frequency into a vocal-tract length in centimetres:
/// `speed_of_sound / (2 * formant_hz) * 100`.
///
/// Returns `None` for non-positive or non-finite formants.
pub fn vocal_tract_length_cm(formant_hz: f32, speed_of_sound: f32) -> Option<f32> {
    if !formant_hz.is_finite() || formant_hz <= 0.0 {
        return None;
    }

    let length_cm = speed_of_sound / (2.0 * formant_hz) * 100.0;
    length_cm.is_finite().then_some(length_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaks_from(values: &[f32]) -> Vec<SegmentPeak> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| SegmentPeak { index: i, value })
            .collect()
    }

    #[test]
    fn moving_average_divides_edges_by_samples_used() {
        let data = [3.0, 0.0, 0.0, 0.0, 6.0];
        let avg = moving_average(&data, 1);
        assert_eq!(avg, vec![1.5, 1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn moving_average_of_empty_is_empty() {
        assert!(moving_average(&[], 20).is_empty());
    }

    #[test]
    fn moving_average_preserves_constants() {
        let data = vec![0.5; 64];
        assert!(moving_average(&data, 20).iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn segments_grow_linearly_with_unit_log_scale() {
        let data: Vec<f32> = (0..40).map(|i| i as f32).collect();
        let peaks = segment_peaks(&data, 6, 1.0);
        // segments close at 6, 12 and 24; the next one would close at 42
        let indices: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![6, 12, 24]);
    }

    #[test]
    fn segment_keeps_its_maximum() {
        let mut data = vec![0.0; 20];
        data[3] = 0.9;
        data[9] = 0.4;
        let peaks = segment_peaks(&data, 6, 1.0);
        assert_eq!(peaks[0], SegmentPeak { index: 3, value: 0.9 });
        assert_eq!(peaks[1].index, 9);
    }

    #[test]
    fn single_hump_collapses_to_its_own_position() {
        let peaks = peaks_from(&[0.0, 0.1, 0.2, 0.3, 0.5, 0.9, 0.5, 0.3, 0.2, 0.1]);
        let formants = select_formants(&peaks, 1, 40);
        assert_eq!(formants.len(), 1);
        assert!((formants[0].position - 5.0).abs() < 1e-3);
        assert_eq!(formants[0].magnitude, 0.9);
    }

    #[test]
    fn centroid_leans_towards_the_stronger_neighbour() {
        let peaks = peaks_from(&[0.0, 0.95, 1.0, 0.5, 0.0]);
        let formants = select_formants(&peaks, 1, 40);
        let position = formants[0].position;
        assert!(position < 2.0 && position > 1.0, "position was {position}");
    }

    #[test]
    fn weaker_later_maxima_do_not_replace_a_single_slot() {
        let peaks = peaks_from(&[0.0, 0.8, 0.0, 0.4, 0.0]);
        let formants = select_formants(&peaks, 1, 40);
        assert!((formants[0].position - 1.0).abs() < 1e-3);
    }

    #[test]
    fn stronger_later_hump_keeps_the_lower_formant() {
        let peaks = peaks_from(&[0.0, 0.5, 0.0, 0.8, 0.0]);
        let formants = select_formants(&peaks, 1, 40);
        assert_eq!(formants.len(), 1);
        assert!((formants[0].position - 1.0).abs() < 1e-3);
        assert_eq!(formants[0].magnitude, 0.5);
    }

    #[test]
    fn window_keeps_recent_formants_in_order() {
        let peaks = peaks_from(&[0.0, 0.3, 0.0, 0.5, 0.0, 0.7, 0.0]);
        let formants = select_formants(&peaks, 2, 40);
        let positions: Vec<f32> = formants.iter().map(|f| f.position.round()).collect();
        assert_eq!(positions, vec![1.0, 3.0]);

        // a fourth, stronger maximum evicts the oldest slot
        let peaks = peaks_from(&[0.0, 0.3, 0.0, 0.5, 0.0, 0.7, 0.0, 0.9, 0.0]);
        let formants = select_formants(&peaks, 2, 40);
        let positions: Vec<f32> = formants.iter().map(|f| f.position.round()).collect();
        assert_eq!(positions, vec![3.0, 5.0]);
    }

    #[test]
    fn flat_sequence_has_no_formants() {
        let peaks = peaks_from(&[0.0; 8]);
        assert!(select_formants(&peaks, 1, 40).is_empty());
    }

    #[test]
    fn vocal_tract_length_from_formant() {
        let length = vocal_tract_length_cm(1000.0, SPEED_OF_SOUND_M_PER_S).unwrap();
        assert!((length - 17.15).abs() < 1e-4);
    }

    #[test]
    fn zero_formant_has_no_vocal_tract_length() {
        assert_eq!(vocal_tract_length_cm(0.0, SPEED_OF_SOUND_M_PER_S), None);
        assert_eq!(vocal_tract_length_cm(f32::NAN, SPEED_OF_SOUND_M_PER_S), None);
    }

    #[test]
    fn low_formant_wins_over_a_stronger_high_one() {
        let data: Vec<f32> = (0..1024)
            .map(|i| {
                let i = i as f32;
                0.4 * (-((i - 40.0) / 6.0).powi(2)).exp() + 0.7 * (-((i - 140.0) / 6.0).powi(2)).exp()
            })
            .collect();
        let buffer = MagnitudeBuffer::new(&data, 44_100.0);
        let formant_hz = estimate_first_formant(&buffer, &AnalyzerConfig::default()).unwrap();
        let low_hz = 40.0 * buffer.hertz_per_bin();
        assert!((formant_hz - low_hz).abs() < 8.0 * buffer.hertz_per_bin(), "formant was {formant_hz}");
    }

    #[test]
    fn broad_hump_is_found_in_hz() {
        let data: Vec<f32> = (0..1024)
            .map(|i| 0.8 * (-((i as f32 - 50.0) / 8.0).powi(2)).exp())
            .collect();
        let buffer = MagnitudeBuffer::new(&data, 44_100.0);
        let formant_hz = estimate_first_formant(&buffer, &AnalyzerConfig::default()).unwrap();
        let hump_hz = 50.0 * buffer.hertz_per_bin();
        // segment maxima are coarse, so allow a few bins either way
        assert!((formant_hz - hump_hz).abs() < 6.0 * buffer.hertz_per_bin(), "formant was {formant_hz}");
    }
}
