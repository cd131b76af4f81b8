//! # Fast Fourier Transform (FFT) Module
//!
//! Turns a frame of time-domain samples into the normalized magnitude buffer
//! the analyzer expects. This sits at the capture boundary: the analyzer
//! itself never sees time-domain audio.
//!
//! ## Features
//! - High-performance FFT using RustFFT
//! - Hann windowing for reduced spectral leakage
//! - DC offset removal
//! - Magnitudes normalized so a full-scale sine peaks near 1.0

use rustfft::{num_complex::Complex, FftPlanner};

/// Removes the DC offset from a signal by making its average value zero.
///
/// A DC component would otherwise show up as a large magnitude in the
/// lowest bins and swamp both pitch and formant estimation.
fn remove_dc_offset(signal: &mut [f32]) {
    let len = signal.len();
    if len == 0 { return; }
    let avg = signal.iter().sum::<f32>() / len as f32;
    if avg.abs() > 1e-6 {
        for sample in signal.iter_mut() {
            *sample -= avg;
        }
    }
}

/// Applies a Hann window to the input buffer to reduce spectral leakage.
fn apply_hann_window(buffer: &mut [f32]) {
    let n = buffer.len();
    if n < 2 { return; }
    let n_minus_1 = (n - 1) as f32;
    for (i, sample) in buffer.iter_mut().enumerate() {
        let multiplier = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n_minus_1).cos());
        *sample *= multiplier;
    }
}

/// Performs a forward FFT on a signal and returns the complex spectrum.
///
/// The signal is DC-corrected and Hann-windowed first. Any length is
/// accepted; an empty signal yields an empty spectrum.
pub fn perform_fft(signal: &[f32]) -> Vec<Complex<f32>> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut processed_signal = signal.to_vec();
    remove_dc_offset(&mut processed_signal);
    apply_hann_window(&mut processed_signal);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(processed_signal.len());

    let mut buffer: Vec<Complex<f32>> = processed_signal
        .into_iter()
        .map(|sample| Complex { re: sample, im: 0.0 })
        .collect();

    fft.process(&mut buffer);
    buffer
}

/// Calculates normalized magnitudes from a complex spectrum.
///
/// Only the first half of the spectrum (up to Nyquist) is returned. Each
/// magnitude is scaled by `4 / N`: `2 / N` for the single-sided spectrum and
/// another factor of two for the Hann window's coherent gain.
pub fn spectrum_to_magnitudes(spectrum: &[Complex<f32>]) -> Vec<f32> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }
    let scale = 4.0 / n as f32;

    spectrum
        .iter()
        .take(n / 2)
        .map(|c| c.norm() * scale) // .norm() is sqrt(re^2 + im^2)
        .collect()
}

/// Converts a time-domain frame into a magnitude buffer of `frame.len() / 2` bins.
pub fn magnitude_spectrum(frame: &[f32]) -> Vec<f32> {
    spectrum_to_magnitudes(&perform_fft(frame))
}
