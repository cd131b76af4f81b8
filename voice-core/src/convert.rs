//! Buffer conversions used at the capture boundary.
//!
//! Capture sources deliver either normalized floats in `[-1, 1]` or bytes in
//! `[0, 255]` centred on 128. The analyzer works on floats throughout, so
//! byte sources are converted here before analysis.

use std::borrow::Cow;

/// Converts normalized floats to bytes centred on 128, saturating at the ends.
pub fn float_to_byte(signal: &[f32]) -> Vec<u8> {
    signal
        .iter()
        .map(|&v| ((v + 1.0) * 128.0).clamp(0.0, 255.0) as u8)
        .collect()
}

/// Converts bytes centred on 128 to floats in `[-1, 1)`.
pub fn byte_to_float(signal: &[u8]) -> Vec<f32> {
    signal.iter().map(|&b| (b as f32 - 128.0) / 128.0).collect()
}

/// Zero-pads `bytes` to a multiple of four, so it can be reinterpreted as
/// 32-bit samples. Aligned input is returned without copying.
pub fn pad_to_multiple_of_4(bytes: &[u8]) -> Cow<'_, [u8]> {
    let remainder = bytes.len() % 4;
    if remainder == 0 {
        return Cow::Borrowed(bytes);
    }

    let mut padded = Vec::with_capacity(bytes.len() + 4 - remainder);
    padded.extend_from_slice(bytes);
    padded.resize(bytes.len() + 4 - remainder, 0);
    Cow::Owned(padded)
}
