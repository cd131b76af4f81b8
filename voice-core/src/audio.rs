//! # Audio Capture Module
//!
//! This module handles real-time audio capture using CPAL (Cross-Platform Audio Library).
//! It opens the default input device and streams fixed-size frames of samples to the
//! analysis side over a channel. Capture is a boundary concern: nothing else in this
//! crate touches a device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SupportedStreamConfigRange;
use crossbeam_channel::Sender;
use anyhow::{Result, anyhow};
use tracing::{error, info, trace};

use crate::config::CaptureConfig;

/// Starts audio capture from the default input device.
///
/// This function:
/// 1. Selects the default audio input device
/// 2. Picks a mono `f32` configuration closest to the target sample rate
/// 3. Sets up a callback that slices the stream into frames of
///    `config.frame_size` samples and sends them to `sender`
///
/// Frames are dropped when the channel is full so the audio callback never blocks.
///
/// # Arguments
/// * `sender` - Channel sender for streaming frames to the analysis thread
/// * `config` - Frame size and preferred sample rate
///
/// # Returns
/// * `Ok((stream, sample_rate))` - Audio stream handle and the sample rate in use
/// * `Err(e)` - Error if audio setup fails
pub fn start_audio_capture(sender: Sender<Vec<f32>>, config: &CaptureConfig) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host.default_input_device()
        .ok_or_else(|| anyhow!("No input device available"))?;

    info!("Using audio input device: {}", device.name()?);

    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, config.target_sample_rate)
        .ok_or_else(|| anyhow!("No suitable f32 input format found"))?;

    let sample_rate = cpal::SampleRate(config.target_sample_rate.clamp(
        supported_config.min_sample_rate().0,
        supported_config.max_sample_rate().0,
    ));
    let stream_config = supported_config.with_sample_rate(sample_rate);

    let sample_rate_val = stream_config.sample_rate().0;
    let stream_config: cpal::StreamConfig = stream_config.into();

    info!("Selected sample rate: {} Hz", sample_rate_val);

    let err_fn = |err| error!("An error occurred on the audio stream: {}", err);

    let frame_size = config.frame_size;
    // This buffer will accumulate audio data from the callback.
    let mut audio_buffer = Vec::with_capacity(frame_size * 2);

    let stream = device.build_input_stream(
        &stream_config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            audio_buffer.extend_from_slice(data);

            while audio_buffer.len() >= frame_size {
                let frame_to_send = audio_buffer[..frame_size].to_vec();

                if sender.try_send(frame_to_send).is_err() {
                    trace!("analysis channel full, dropping frame");
                }

                audio_buffer.drain(..frame_size);
            }
        },
        err_fn,
        None
    )?;

    stream.play()?;

    Ok((stream, sample_rate_val))
}

/// Finds the best supported audio configuration for the target sample rate.
///
/// Only mono `f32` configurations are considered; among those the one whose
/// supported range lies closest to `target_rate` wins.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.channels() == 1 && c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| rate_distance(c.min_sample_rate().0, c.max_sample_rate().0, target_rate))
}

/// Distance from `target` to the closed range `[min, max]`.
fn rate_distance(min: u32, max: u32, target: u32) -> u32 {
    if target < min {
        min - target
    } else {
        target.saturating_sub(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_inside_range_has_zero_distance() {
        assert_eq!(rate_distance(8_000, 96_000, 44_100), 0);
    }

    #[test]
    fn rate_outside_range_measures_to_nearest_end() {
        assert_eq!(rate_distance(48_000, 48_000, 44_100), 3_900);
        assert_eq!(rate_distance(8_000, 22_050, 44_100), 22_050);
    }
}
