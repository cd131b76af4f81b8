//! # Voice Compass GUI
//!
//! This module contains the main GUI application for the voice compass.
//! It captures the microphone, estimates pitch and resonance for every frame,
//! and plots the latest estimate on a two-axis compass.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Audio Thread**: Dedicated thread for capture, FFT and analysis
//! - **Communication**: Crossbeam channels for thread-safe data exchange
//! - **Updates**: timer subscription at the configured refresh interval

mod ui;

use crossbeam_channel::{Receiver, Sender};
use cpal::traits::StreamTrait;
use iced::{Element, Subscription, Theme};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voice_core::{
    audio, fft, formant, AnalysisOutput, Analyzer, MagnitudeBuffer, VoiceConfig,
};
use ui::main_display::create_main_view;

/// Main entry point for the voice compass.
pub fn main() -> iced::Result {
    init_logging();
    info!("Starting voice compass...");
    let result = iced::application("Voice Compass", VoiceApp::update, VoiceApp::view)
        .subscription(VoiceApp::subscription)
        .theme(VoiceApp::theme)
        .run();
    info!("Application finished with result: {:?}", result);
    result
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("voice_gui=info,voice_core=info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleSpectrum,  // Show/hide the spectrum panel
    ToggleReadouts,  // Show/hide the numeric readouts
    MorePrecision,   // One more decimal place in readouts
    LessPrecision,   // One fewer decimal place in readouts
    SaveConfig,      // Write the current configuration to disk
    Tick,            // Timer tick for real-time updates
}

/// One analysed frame, as handed from the audio thread to the GUI.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    pub output: AnalysisOutput,
    /// Normalized magnitudes the analysis ran on.
    pub magnitudes: Vec<f32>,
    /// Smoothed envelope used for formant estimation.
    pub envelope: Vec<f32>,
}

/// UI-specific data needed for rendering the interface.
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    pub audio_worker_active: bool,
    pub last_frame: Option<FrameAnalysis>,
    /// Latest analysis that carried at least one estimate.
    pub last_estimate: Option<AnalysisOutput>,
    pub spectrum_visible: bool,
    pub readouts_visible: bool,
    pub value_precision: usize,
}

#[derive(Debug)]
struct VoiceApp {
    audio_worker: Option<AudioWorker>,
    analysis_receiver: Option<Receiver<FrameAnalysis>>,
    analysis_sender: Option<Sender<FrameAnalysis>>,

    config: VoiceConfig,
    config_path: PathBuf,

    display_data: AppDisplayData,
}

/// Handle to the dedicated capture and analysis thread.
#[derive(Debug)]
struct AudioWorker {
    shutdown_tx: Sender<()>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Default for VoiceApp {
    fn default() -> Self {
        let config_path = VoiceConfig::default_path();
        let config = VoiceConfig::load_or_default(&config_path);
        let (analysis_tx, analysis_rx) = crossbeam_channel::bounded(8);

        let mut app = Self {
            audio_worker: None,
            analysis_receiver: Some(analysis_rx),
            analysis_sender: Some(analysis_tx),
            display_data: AppDisplayData {
                audio_worker_active: false, // Will be set to true after audio starts
                last_frame: None,
                last_estimate: None,
                spectrum_visible: true,
                readouts_visible: true,
                value_precision: config.display.value_precision,
            },
            config,
            config_path,
        };

        app.start_audio_processing();
        app
    }
}

impl Drop for VoiceApp {
    fn drop(&mut self) {
        if let Some(mut worker) = self.audio_worker.take() {
            debug!("Shutting down audio worker...");
            let _ = worker.shutdown_tx.send(());
            if let Some(handle) = worker.thread_handle.take() {
                if handle.join().is_err() {
                    warn!("Audio thread panicked during shutdown");
                }
            }
        }
    }
}

impl VoiceApp {
    /// Starts the dedicated audio processing thread.
    ///
    /// The thread owns the capture stream, turns each frame into a magnitude
    /// buffer, analyses it and sends the result back over the analysis channel.
    fn start_audio_processing(&mut self) {
        let Some(analysis_tx) = self.analysis_sender.take() else {
            return;
        };

        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
        let capture_config = self.config.capture.clone();
        let analyzer = Analyzer::new(self.config.analyzer.clone());

        let thread_handle = thread::spawn(move || {
            let (raw_audio_tx, raw_audio_rx) = crossbeam_channel::bounded::<Vec<f32>>(4);

            let (stream, sample_rate) = match audio::start_audio_capture(raw_audio_tx, &capture_config) {
                Ok(tuple) => tuple,
                Err(e) => {
                    error!("Fatal error starting audio: {}", e);
                    return;
                }
            };
            info!("Audio capture started at {} Hz", sample_rate);

            loop {
                crossbeam_channel::select! {
                    recv(raw_audio_rx) -> msg => match msg {
                        Ok(audio_frame) => {
                            let result = perform_analysis(&analyzer, &audio_frame, sample_rate as f32);
                            // Drop frames the GUI has not caught up with.
                            let _ = analysis_tx.try_send(result);
                        }
                        Err(_) => {
                            warn!("Audio channel closed");
                            break;
                        }
                    },
                    recv(shutdown_rx) -> _ => {
                        debug!("Received shutdown signal");
                        break;
                    },
                }
            }

            if let Err(e) = stream.pause() {
                warn!("Error pausing stream: {}", e);
            }
            drop(stream);
            debug!("Audio thread finished");
        });

        self.audio_worker = Some(AudioWorker {
            shutdown_tx,
            thread_handle: Some(thread_handle),
        });
        self.display_data.audio_worker_active = true;
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::ToggleSpectrum => {
                self.display_data.spectrum_visible = !self.display_data.spectrum_visible;
            }
            Message::ToggleReadouts => {
                self.display_data.readouts_visible = !self.display_data.readouts_visible;
            }
            Message::MorePrecision => {
                self.config.display.increase_precision();
                self.display_data.value_precision = self.config.display.value_precision;
            }
            Message::LessPrecision => {
                self.config.display.decrease_precision();
                self.display_data.value_precision = self.config.display.value_precision;
            }
            Message::SaveConfig => match self.config.save_to(&self.config_path) {
                Ok(()) => info!("Configuration saved to {:?}", self.config_path),
                Err(e) => error!("Error saving configuration: {}", e),
            },
            Message::Tick => {
                if let Some(receiver) = &self.analysis_receiver {
                    let latest = receiver.try_iter().last();
                    if let Some(frame) = latest {
                        self.process_frame(frame);
                    }
                }
            }
        }
    }

    fn process_frame(&mut self, frame: FrameAnalysis) {
        // Fully absent frames keep the previous marker on screen.
        if !frame.output.is_absent() {
            self.display_data.last_estimate = Some(frame.output);
        }
        self.display_data.last_frame = Some(frame);
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.display_data)
    }

    fn subscription(&self) -> Subscription<Message> {
        let interval = Duration::from_millis(self.config.display.refresh_interval_ms);
        iced::time::every(interval).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Runs one captured frame through FFT and analysis.
fn perform_analysis(analyzer: &Analyzer, audio_frame: &[f32], sample_rate: f32) -> FrameAnalysis {
    let magnitudes = fft::magnitude_spectrum(audio_frame);
    let bin_count = audio_frame.len() / 2;
    let output = analyzer.analyze(&MagnitudeBuffer::with_bin_count(&magnitudes, sample_rate, bin_count));
    let envelope = formant::smoothed_envelope(&magnitudes, analyzer.config());

    FrameAnalysis {
        output,
        magnitudes,
        envelope,
    }
}
