//! # Compass Coordinate Module
//!
//! Places an analysis on the two-dimensional voice compass: resonance runs
//! left to right and pitch bottom to top. Positions are measured from the
//! bottom-left corner; flipping into screen coordinates is up to the renderer.

use crate::axis::{Axis, AxisCoordinate, PITCH_AXIS, RESONANCE_AXIS};
use crate::AnalysisOutput;

/// The labelled quarters of the compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// High pitch, low resonance.
    Hollow,
    /// High pitch, high resonance.
    Feminine,
    /// Low pitch, low resonance.
    Masculine,
    /// Low pitch, high resonance.
    Overfull,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Hollow,
        Quadrant::Feminine,
        Quadrant::Masculine,
        Quadrant::Overfull,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Hollow => "Hollow",
            Quadrant::Feminine => "Feminine",
            Quadrant::Masculine => "Masculine",
            Quadrant::Overfull => "Overfull",
        }
    }

    /// Classifies clamped ratios; `0.5` and above count as right/top.
    pub fn from_ratios(horizontal: f32, vertical: f32) -> Self {
        match (horizontal >= 0.5, vertical >= 0.5) {
            (false, true) => Quadrant::Hollow,
            (true, true) => Quadrant::Feminine,
            (false, false) => Quadrant::Masculine,
            (true, false) => Quadrant::Overfull,
        }
    }

    /// Whether the quadrant sits in the top half.
    pub fn is_top(&self) -> bool {
        matches!(self, Quadrant::Hollow | Quadrant::Feminine)
    }

    /// Whether the quadrant sits in the left half.
    pub fn is_left(&self) -> bool {
        matches!(self, Quadrant::Hollow | Quadrant::Masculine)
    }
}

/// One analysis placed on the compass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassPoint {
    pub horizontal: AxisCoordinate,
    pub vertical: AxisCoordinate,
    /// Pixels from the left edge.
    pub x: f32,
    /// Pixels from the bottom edge.
    pub y: f32,
}

impl CompassPoint {
    /// Places `analysis` using the standard resonance and pitch axes.
    pub fn locate(analysis: &AnalysisOutput, width: f32, height: f32) -> Self {
        compass_point(analysis, &RESONANCE_AXIS, &PITCH_AXIS, width, height)
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_ratios(self.horizontal.ratio, self.vertical.ratio)
    }
}

/// Position of `analysis` along `axis`, in pixels of `extent`.
pub fn axis_position(analysis: &AnalysisOutput, axis: &Axis, extent: f32) -> f32 {
    axis.ratio_along_range(analysis, true) * extent
}

/// Maps `analysis` through both axes and scales the ratios to pixels.
pub fn compass_point(
    analysis: &AnalysisOutput,
    horizontal_axis: &Axis,
    vertical_axis: &Axis,
    width: f32,
    height: f32,
) -> CompassPoint {
    let horizontal = horizontal_axis.coordinate(analysis);
    let vertical = vertical_axis.coordinate(analysis);

    CompassPoint {
        horizontal,
        vertical,
        x: horizontal.position(width),
        y: vertical.position(height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_follow_compass_layout() {
        assert_eq!(Quadrant::from_ratios(0.2, 0.8), Quadrant::Hollow);
        assert_eq!(Quadrant::from_ratios(0.8, 0.8), Quadrant::Feminine);
        assert_eq!(Quadrant::from_ratios(0.2, 0.2), Quadrant::Masculine);
        assert_eq!(Quadrant::from_ratios(0.8, 0.2), Quadrant::Overfull);
        assert_eq!(Quadrant::from_ratios(0.5, 0.5), Quadrant::Feminine);
    }

    #[test]
    fn quadrant_halves_are_consistent() {
        for quadrant in Quadrant::ALL {
            let h = if quadrant.is_left() { 0.25 } else { 0.75 };
            let v = if quadrant.is_top() { 0.75 } else { 0.25 };
            assert_eq!(Quadrant::from_ratios(h, v), quadrant);
        }
    }

    #[test]
    fn point_scales_ratios_by_extent() {
        let analysis = AnalysisOutput {
            pitch_hz: Some(400.0),
            resonance_value: Some(14.5),
        };
        let point = CompassPoint::locate(&analysis, 200.0, 100.0);
        assert!((point.x - 100.0).abs() < 1e-3);
        assert!((point.y - 100.0).abs() < 1e-3);
        assert_eq!(point.quadrant(), Quadrant::Feminine);
    }

    #[test]
    fn low_voice_with_long_tract_is_masculine() {
        let analysis = AnalysisOutput {
            pitch_hz: Some(90.0),
            resonance_value: Some(17.5),
        };
        let point = CompassPoint::locate(&analysis, 1.0, 1.0);
        assert_eq!(point.quadrant(), Quadrant::Masculine);
        assert!((axis_position(&analysis, &PITCH_AXIS, 350.0) - 40.0).abs() < 1e-3);
    }
}
