//! # Voice Compass Widget
//!
//! Plots the latest analysis on a square chart: resonance runs along the
//! horizontal axis and pitch along the vertical axis. The chart is split
//! into four labelled quadrants, and each axis end carries its displayed limit.
//!
//! ## Features
//! - Quadrant shading and labels
//! - Axis limit labels taken from the axis configuration
//! - Marker for the latest estimate, hidden when nothing was detected

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Geometry, Path, Stroke, Text};
use iced::widget::container;
use iced::{mouse, Color, Element, Pixels, Point, Rectangle, Renderer, Size, Theme};
use voice_core::{AnalysisOutput, Axis, CompassPoint, Quadrant, PITCH_AXIS, RESONANCE_AXIS};

/// Space reserved around the plot area for axis labels.
const MARGIN: f32 = 28.0;

const MARKER_RADIUS: f32 = 7.0;

/// Voice compass widget.
pub struct Compass {
    /// Analysis to mark, if any estimate exists.
    analysis: Option<AnalysisOutput>,
}

impl Compass {
    pub fn new(analysis: Option<AnalysisOutput>) -> Self {
        Self {
            analysis: analysis.filter(|a| !a.is_absent()),
        }
    }

    pub fn view(self) -> Element<'static, super::super::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fill),
        )
        .into()
    }
}

fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::Hollow => Color::from_rgb8(0x3A, 0x3F, 0x4B),
        Quadrant::Feminine => Color::from_rgb8(0x4B, 0x3A, 0x48),
        Quadrant::Masculine => Color::from_rgb8(0x33, 0x42, 0x4B),
        Quadrant::Overfull => Color::from_rgb8(0x47, 0x44, 0x36),
    }
}

fn limit_text(axis: &Axis, value: f32) -> String {
    format!("{value:.0} {}", axis.unit())
}

impl<Message> canvas::Program<Message> for Compass {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let plot_width = bounds.width - 2.0 * MARGIN;
        let plot_height = bounds.height - 2.0 * MARGIN;
        if !plot_width.is_finite() || !plot_height.is_finite() || plot_width <= 0.0 || plot_height <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let half = Size::new(plot_width / 2.0, plot_height / 2.0);
        let center = Point::new(MARGIN + half.width, MARGIN + half.height);

        // Quadrants
        for quadrant in Quadrant::ALL {
            let x = if quadrant.is_left() { MARGIN } else { center.x };
            let y = if quadrant.is_top() { MARGIN } else { center.y };
            frame.fill(&Path::rectangle(Point::new(x, y), half), quadrant_color(quadrant));

            frame.fill_text(Text {
                content: quadrant.label().to_string(),
                position: Point::new(x + half.width / 2.0, y + half.height / 2.0),
                color: Color::from_rgba(1.0, 1.0, 1.0, 0.35),
                size: Pixels(18.0),
                horizontal_alignment: Horizontal::Center,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }

        // Center cross
        let axis_stroke = Stroke::default()
            .with_width(1.5)
            .with_color(Color::from_rgb8(0x90, 0x90, 0x90));
        frame.stroke(
            &Path::line(Point::new(MARGIN, center.y), Point::new(MARGIN + plot_width, center.y)),
            axis_stroke.clone(),
        );
        frame.stroke(
            &Path::line(Point::new(center.x, MARGIN), Point::new(center.x, MARGIN + plot_height)),
            axis_stroke,
        );

        // Limits at the plot edges
        let label_color = Color::from_rgb8(0xC0, 0xC0, 0xC0);
        let resonance = RESONANCE_AXIS.range();
        let pitch = PITCH_AXIS.range();
        let labels = [
            (
                limit_text(&RESONANCE_AXIS, resonance.displayed_value_at(0.0)),
                Point::new(MARGIN, bounds.height - MARGIN / 2.0),
                Horizontal::Left,
            ),
            (
                limit_text(&RESONANCE_AXIS, resonance.displayed_value_at(1.0)),
                Point::new(bounds.width - MARGIN, bounds.height - MARGIN / 2.0),
                Horizontal::Right,
            ),
            (
                format!("{} / {}", RESONANCE_AXIS.label(), PITCH_AXIS.label()),
                Point::new(center.x, MARGIN / 2.0),
                Horizontal::Center,
            ),
            (
                limit_text(&PITCH_AXIS, pitch.displayed_value_at(1.0)),
                Point::new(MARGIN + 4.0, MARGIN + 8.0),
                Horizontal::Left,
            ),
            (
                limit_text(&PITCH_AXIS, pitch.displayed_value_at(0.0)),
                Point::new(MARGIN + 4.0, MARGIN + plot_height - 8.0),
                Horizontal::Left,
            ),
        ];
        for (content, position, horizontal_alignment) in labels {
            frame.fill_text(Text {
                content,
                position,
                color: label_color,
                size: Pixels(13.0),
                horizontal_alignment,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }

        // Marker
        if let Some(analysis) = &self.analysis {
            let point = CompassPoint::locate(analysis, plot_width, plot_height);
            let marker_center = Point::new(MARGIN + point.x, MARGIN + plot_height - point.y);

            let marker = Path::circle(marker_center, MARKER_RADIUS);
            frame.fill(&marker, Color::from_rgb8(0xFF, 0xC3, 0x00));
            frame.stroke(
                &marker,
                Stroke::default().with_width(2.0).with_color(Color::WHITE),
            );
        }

        vec![frame.into_geometry()]
    }
}
