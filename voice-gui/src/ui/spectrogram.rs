//! # Spectrum Widget
//!
//! Draws the magnitude buffer the analysis ran on as a bar chart, with the
//! smoothed envelope used for formant estimation drawn over it as a line.
//!
//! ## Features
//! - Logarithmic magnitude scaling
//! - Envelope overlay on the same scale
//! - Optional zoom to the lowest bins, where voice energy sits

use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Color, Element, Point, Rectangle, Renderer, Size, Theme};

/// Small epsilon value to prevent log(0) errors in magnitude calculations.
const EPSILON: f32 = 1e-12;

/// Magnitudes below this are drawn as empty; sets the floor of the log scale.
const FLOOR: f32 = 1e-4;

/// Spectrum widget for a single analysed frame.
pub struct Spectrogram {
    magnitudes: Vec<f32>,
    envelope: Vec<f32>,
    /// Number of leading bins to draw; `None` draws all of them.
    visible_bins: Option<usize>,
}

impl Spectrogram {
    pub fn new(magnitudes: Vec<f32>, envelope: Vec<f32>) -> Self {
        Self {
            magnitudes,
            envelope,
            visible_bins: None,
        }
    }

    pub fn with_visible_bins(mut self, bins: usize) -> Self {
        self.visible_bins = Some(bins);
        self
    }

    pub fn view(self) -> Element<'static, super::super::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fill),
        )
        .into()
    }

    fn bin_count(&self) -> usize {
        let len = self.magnitudes.len();
        self.visible_bins.map_or(len, |bins| bins.min(len))
    }
}

/// Height of `magnitude` on a log scale running from [`FLOOR`] to `max`.
fn log_height(magnitude: f32, max: f32, extent: f32) -> f32 {
    let floor = FLOOR.ln();
    let top = (max + EPSILON).ln();
    if top <= floor {
        return 0.0;
    }
    let value = (magnitude + EPSILON).ln();
    ((value - floor) / (top - floor) * extent).clamp(0.0, extent)
}

impl<Message> canvas::Program<Message> for Spectrogram {
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

        let bins = self.bin_count();
        if !bounds.width.is_finite() || !bounds.height.is_finite() || bins == 0 {
            return vec![frame.into_geometry()];
        }

        let max_magnitude = self.magnitudes[..bins].iter().fold(0.0f32, |max, &val| val.max(max));
        if max_magnitude <= FLOOR {
            return vec![frame.into_geometry()];
        }

        let bar_width = bounds.width / bins as f32;

        for (i, &magnitude) in self.magnitudes[..bins].iter().enumerate() {
            let height = log_height(magnitude, max_magnitude, bounds.height);

            if height.is_finite() && height > 0.0 {
                let bar = Path::rectangle(
                    Point::new(i as f32 * bar_width, bounds.height - height),
                    Size::new(bar_width.max(1.0), height),
                );
                frame.fill(&bar, Color::from_rgb8(0x34, 0x98, 0xDB));
            }
        }

        let envelope_bins = bins.min(self.envelope.len());
        if envelope_bins > 1 {
            let envelope = Path::new(|builder| {
                for (i, &value) in self.envelope[..envelope_bins].iter().enumerate() {
                    let point = Point::new(
                        (i as f32 + 0.5) * bar_width,
                        bounds.height - log_height(value, max_magnitude, bounds.height),
                    );
                    if i == 0 {
                        builder.move_to(point);
                    } else {
                        builder.line_to(point);
                    }
                }
            });
            frame.stroke(
                &envelope,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb8(0xFF, 0x8C, 0x42)),
            );
        }

        vec![frame.into_geometry()]
    }
}
