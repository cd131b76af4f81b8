//! # Pitch Estimation Module
//!
//! This module estimates the dominant pitch of a frequency-domain magnitude
//! buffer. The estimate is the strongest bin above a threshold, refined to
//! sub-bin accuracy with parabolic interpolation.
//!
//! ## Threshold units
//! The threshold is compared directly against the buffer's magnitudes, so it
//! must be expressed in the same units. Buffers produced by
//! [`crate::fft::magnitude_spectrum`] are normalized so that a full-scale
//! sine peaks near `1.0`; the default threshold of `0.25` assumes that scale.

use crate::analysis::MagnitudeBuffer;

/// Default detection threshold in normalized magnitude units.
pub const DEFAULT_PITCH_THRESHOLD: f32 = 0.25;

/// Estimates the pitch of a magnitude buffer.
///
/// # Arguments
/// * `buffer` - Magnitude buffer with its sample rate
/// * `threshold` - Minimum magnitude a bin must exceed to count as a peak
///
/// # Returns
/// * `Some(pitch_hz)` - Frequency of the refined peak bin
/// * `None` - Empty buffer, or no bin above the threshold
pub fn estimate_pitch(buffer: &MagnitudeBuffer<'_>, threshold: f32) -> Option<f32> {
    let magnitudes = buffer.magnitudes();
    let peak_bin = find_peak_bin(magnitudes, threshold)?;
    let refined = refine_peak(magnitudes, peak_bin);
    let pitch_hz = buffer.bin_to_hz(refined);

    if pitch_hz.is_finite() {
        Some(pitch_hz)
    } else {
        tracing::trace!(peak_bin, refined, "pitch estimate not finite, dropping");
        None
    }
}

/// Finds the bin with the largest magnitude strictly above `threshold`.
///
/// Ties keep the earliest (lowest-frequency) bin and non-finite bins are
/// skipped. Returns `None` when no bin exceeds the threshold.
pub fn find_peak_bin(magnitudes: &[f32], threshold: f32) -> Option<usize> {
    let mut peak: Option<(usize, f32)> = None;

    for (i, &magnitude) in magnitudes.iter().enumerate() {
        if !magnitude.is_finite() || magnitude <= threshold {
            continue;
        }
        match peak {
            Some((_, best)) if magnitude <= best => {}
            _ => peak = Some((i, magnitude)),
        }
    }

    peak.map(|(i, _)| i)
}

/// Refines an integer peak bin with parabolic interpolation.
///
/// The first and last bins have only one neighbour and are returned as-is.
/// When the three magnitudes are collinear the parabola is degenerate and the
/// integer bin is returned instead.
pub fn refine_peak(magnitudes: &[f32], peak_bin: usize) -> f32 {
    if peak_bin == 0 || peak_bin + 1 >= magnitudes.len() {
        return peak_bin as f32;
    }

    let left = magnitudes[peak_bin - 1];
    let center = magnitudes[peak_bin];
    let right = magnitudes[peak_bin + 1];

    let denominator = left - 2.0 * center + right;
    if denominator.abs() < f32::EPSILON {
        return peak_bin as f32;
    }

    let peak_shift = 0.5 * (left - right) / denominator;
    if peak_shift.is_finite() {
        peak_bin as f32 + peak_shift
    } else {
        peak_bin as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(len: usize, bin: usize, magnitude: f32) -> Vec<f32> {
        let mut data = vec![0.0; len];
        data[bin] = magnitude;
        data
    }

    #[test]
    fn silence_has_no_pitch() {
        let data = vec![0.0; 512];
        let buffer = MagnitudeBuffer::new(&data, 44_100.0);
        assert_eq!(estimate_pitch(&buffer, DEFAULT_PITCH_THRESHOLD), None);
    }

    #[test]
    fn isolated_spike_maps_to_its_bin_frequency() {
        let data = spike(1024, 100, 0.9);
        let buffer = MagnitudeBuffer::new(&data, 44_100.0);
        let pitch = estimate_pitch(&buffer, DEFAULT_PITCH_THRESHOLD).unwrap();
        let expected = 100.0 * (44_100.0 / 2.0 / 1024.0);
        assert!((pitch - expected).abs() < 1e-3, "pitch was {pitch}");
    }

    #[test]
    fn values_at_threshold_are_not_peaks() {
        let data = vec![0.25; 16];
        assert_eq!(find_peak_bin(&data, 0.25), None);
    }

    #[test]
    fn ties_keep_the_lowest_bin() {
        let mut data = vec![0.0; 32];
        data[7] = 0.8;
        data[20] = 0.8;
        assert_eq!(find_peak_bin(&data, 0.25), Some(7));
    }

    #[test]
    fn non_finite_bins_are_skipped() {
        assert_eq!(find_peak_bin(&[0.9, f32::NAN, 0.3], 0.25), Some(0));
        assert_eq!(find_peak_bin(&[0.4, f32::INFINITY, 0.3], 0.25), Some(0));
        assert_eq!(find_peak_bin(&[f32::NAN, 0.1], 0.25), None);
    }

    #[test]
    fn sub_threshold_noise_does_not_move_the_peak() {
        let mut data = spike(256, 40, 0.7);
        for (i, v) in data.iter_mut().enumerate() {
            if i != 40 {
                *v = 0.2 * ((i % 7) as f32 / 7.0);
            }
        }
        assert_eq!(find_peak_bin(&data, 0.25), Some(40));
    }

    #[test]
    fn asymmetric_neighbours_shift_towards_the_larger_one() {
        let mut data = vec![0.0; 16];
        data[4] = 0.4;
        data[5] = 1.0;
        data[6] = 0.8;
        let refined = refine_peak(&data, 5);
        assert!(refined > 5.0 && refined < 6.0, "refined was {refined}");
    }

    #[test]
    fn edge_bins_are_not_interpolated() {
        let data = [0.9, 0.5, 0.1];
        assert_eq!(refine_peak(&data, 0), 0.0);
        let data = [0.1, 0.5, 0.9];
        assert_eq!(refine_peak(&data, 2), 2.0);
    }

    #[test]
    fn collinear_neighbours_fall_back_to_the_integer_bin() {
        let data = [0.2, 0.4, 0.6];
        assert_eq!(refine_peak(&data, 1), 1.0);
    }
}
