//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the voice compass.

use iced::widget::{button, column, container, horizontal_space, row, text, Space};
use iced::{Alignment, Element, Length};
use voice_core::{AnalysisOutput, Axis, PITCH_AXIS, RESONANCE_AXIS};

use super::{compass, spectrogram};

/// Bins shown in the spectrum panel; covers roughly 0 to 4.3 kHz at 44.1 kHz / 2048.
const SPECTRUM_BINS: usize = 200;

/// Sidebar buttons and the messages they send.
const SIDEBAR_BUTTONS: &[(&str, crate::Message)] = &[
    ("Spectrum", crate::Message::ToggleSpectrum),
    ("Readouts", crate::Message::ToggleReadouts),
    ("Save Settings", crate::Message::SaveConfig),
];

/// Precision stepper buttons.
const PRECISION_BUTTONS: &[(&str, crate::Message)] = &[
    ("-", crate::Message::LessPrecision),
    ("+", crate::Message::MorePrecision),
];

/// Creates the complete main application view
pub fn create_main_view(data: &crate::AppDisplayData) -> Element<'static, crate::Message> {
    if !data.audio_worker_active {
        return container(text("No audio input").size(40))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let title = text("Voice Compass").size(28);

    let compass_panel = create_compass_panel(data);
    let readouts_panel = create_readouts_panel(data);
    let spectrum_panel = create_spectrum_panel(data);

    let mut left = column![title, Space::with_height(20), compass_panel]
        .width(Length::Fill)
        .spacing(10);
    if let Some(spectrum) = spectrum_panel {
        left = left.push(spectrum);
    }

    let mut sidebar = column![].spacing(10);
    if let Some(readouts) = readouts_panel {
        sidebar = sidebar.push(readouts);
    }
    sidebar = sidebar.push(create_controls(data.value_precision));

    let main_content = row![
        left,
        Space::with_width(10),
        container(sidebar.padding(15))
            .width(Length::Fixed(250.0))
            .height(Length::Fill),
    ]
    .align_y(Alignment::Start)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn create_compass_panel(data: &crate::AppDisplayData) -> Element<'static, crate::Message> {
    container(compass::Compass::new(data.last_estimate).view())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Creates the spectrum panel for the latest frame.
fn create_spectrum_panel(data: &crate::AppDisplayData) -> Option<Element<'static, crate::Message>> {
    if !data.spectrum_visible {
        return None;
    }

    let (magnitudes, envelope) = data
        .last_frame
        .as_ref()
        .map(|frame| (frame.magnitudes.clone(), frame.envelope.clone()))
        .unwrap_or_default();

    let spectrum_content = container(
        spectrogram::Spectrogram::new(magnitudes, envelope)
            .with_visible_bins(SPECTRUM_BINS)
            .view(),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let panel = container(
        column![text("Spectrum").size(18), Space::with_height(10), spectrum_content]
            .spacing(5)
            .padding(15),
    )
    .width(Length::Fill)
    .height(Length::Fixed(220.0));

    Some(panel.into())
}

/// Creates the numeric readouts for both axes.
///
/// Values come from the latest frame, so they blank out as soon as an
/// estimate goes missing even though the compass marker stays put.
fn create_readouts_panel(data: &crate::AppDisplayData) -> Option<Element<'static, crate::Message>> {
    if !data.readouts_visible {
        return None;
    }

    let current = data
        .last_frame
        .as_ref()
        .map(|frame| frame.output)
        .unwrap_or(AnalysisOutput::ABSENT);

    let pitch_line = readout_line(&PITCH_AXIS, &current, current.pitch_hz.is_some(), data.value_precision);
    let resonance_line = readout_line(
        &RESONANCE_AXIS,
        &current,
        current.resonance_value.is_some(),
        data.value_precision,
    );

    let quadrant = data
        .last_estimate
        .map(|estimate| voice_core::CompassPoint::locate(&estimate, 1.0, 1.0).quadrant().label())
        .unwrap_or("--");

    let content = column![
        text("Readouts").size(18),
        Space::with_height(10),
        pitch_line,
        resonance_line,
        row![text("Quadrant").size(14), horizontal_space(), text(quadrant).size(20)]
            .align_y(Alignment::Center),
    ]
    .spacing(8);

    Some(content.into())
}

/// One labelled value; pitch shows its value along the range, resonance its
/// displayed percentage.
fn readout_line(
    axis: &Axis,
    analysis: &AnalysisOutput,
    present: bool,
    precision: usize,
) -> Element<'static, crate::Message> {
    let value = if !present {
        "--".to_string()
    } else if axis.range().min().display_label().is_some() {
        format!("{:.*} {}", precision, axis.displayed_value(analysis), axis.unit())
    } else {
        format!("{} {}", axis.formatted_value(analysis, precision), axis.unit())
    };

    row![
        text(axis.label().to_string()).size(14),
        horizontal_space(),
        text(value).size(20),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Creates the settings section: panel toggles, the readout precision
/// stepper and the save button.
fn create_controls(precision: usize) -> Element<'static, crate::Message> {
    let buttons = SIDEBAR_BUTTONS.iter().fold(column![].spacing(8), |col, (label, message)| {
        col.push(
            button(text(*label).size(14).width(Length::Fill))
                .padding([6, 10])
                .on_press(message.clone()),
        )
    });

    let stepper = PRECISION_BUTTONS.iter().fold(
        row![text(format!("Decimals: {precision}")).size(14), horizontal_space()]
            .spacing(8)
            .align_y(Alignment::Center),
        |row, (label, message)| {
            row.push(
                button(text(*label).size(14))
                    .padding([4, 10])
                    .on_press(message.clone()),
            )
        },
    );

    column![text("Settings").size(18), Space::with_height(10), stepper, buttons]
        .spacing(5)
        .into()
}
