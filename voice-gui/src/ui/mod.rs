//! # UI Module
//!
//! This module contains all UI components for the voice compass.

pub mod compass;
pub mod spectrogram;
pub mod main_display;
