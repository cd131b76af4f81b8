//! # Axis Mapping Module
//!
//! Converts a raw measurement into a position along a labelled display axis.
//! An [`Axis`] combines:
//! - an extraction function that pulls its measurement out of an
//!   [`AnalysisOutput`],
//! - an [`AxisRange`] built from two [`AxisLimit`]s, a [`Scale`] and a
//!   [`DataRelationship`].
//!
//! Axes are immutable configuration. The two axes of the voice compass are
//! built once and shared through [`PITCH_AXIS`] and [`RESONANCE_AXIS`].

mod limit;
mod range;
mod relationship;
mod scale;

pub use limit::AxisLimit;
pub use range::AxisRange;
pub use relationship::DataRelationship;
pub use scale::Scale;

use once_cell::sync::Lazy;

use crate::AnalysisOutput;

/// Pulls an axis's raw measurement out of an analysis.
pub type Extractor = fn(&AnalysisOutput) -> Option<f32>;

/// The pitch axis: vertical, 50–400 Hz, direct and linear.
pub static PITCH_AXIS: Lazy<Axis> = Lazy::new(Axis::pitch);

/// The resonance axis: horizontal, vocal-tract lengths of 11–18 cm shown as
/// 100–0 %.
pub static RESONANCE_AXIS: Lazy<Axis> = Lazy::new(Axis::resonance);

/// Screen direction an axis runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDimension {
    Horizontal,
    Vertical,
}

/// An axis position computed for one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCoordinate {
    /// Raw measurement; `0.0` when the analysis lacks it.
    pub raw: f32,
    /// Clamped fraction of the axis, in `[0, 1]`.
    pub ratio: f32,
    /// Clamped value along the range, in calculation units.
    pub value_along_range: f32,
}

impl AxisCoordinate {
    /// Position in pixels along an extent of `extent` pixels.
    pub fn position(&self, extent: f32) -> f32 {
        self.ratio * extent
    }
}

/// A labelled mapping from one measurement to a bounded display range.
#[derive(Debug, Clone)]
pub struct Axis {
    label: String,
    unit: String,
    dimension: AxisDimension,
    range: AxisRange,
    extract: Extractor,
}

impl Axis {
    pub fn new(
        label: impl Into<String>,
        unit: impl Into<String>,
        dimension: AxisDimension,
        range: AxisRange,
        extract: Extractor,
    ) -> Self {
        Self {
            label: label.into(),
            unit: unit.into(),
            dimension,
            range,
            extract,
        }
    }

    pub fn pitch() -> Self {
        Self::new(
            "Pitch",
            "Hz",
            AxisDimension::Vertical,
            AxisRange::new(AxisLimit::new(50.0), AxisLimit::new(400.0), Scale::Linear)
                .with_relationship(DataRelationship::Direct),
            |analysis| analysis.pitch_hz,
        )
    }

    pub fn resonance() -> Self {
        Self::new(
            "Resonance",
            "%",
            AxisDimension::Horizontal,
            AxisRange::new(
                AxisLimit::with_display_label(11.0, 0.0),
                AxisLimit::with_display_label(18.0, 100.0),
                Scale::Linear,
            )
            .with_relationship(DataRelationship::Inverse),
            |analysis| analysis.resonance_value,
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn dimension(&self) -> AxisDimension {
        self.dimension
    }

    pub fn range(&self) -> &AxisRange {
        &self.range
    }

    /// The axis's measurement, or `0.0` when the analysis lacks it.
    ///
    /// Callers are expected to skip fully absent analyses before mapping;
    /// the zero only covers a partially absent one.
    pub fn raw_value(&self, analysis: &AnalysisOutput) -> f32 {
        (self.extract)(analysis).unwrap_or(0.0)
    }

    /// The raw value placed on the range's scale, before the relationship.
    pub fn raw_value_along_axis(&self, analysis: &AnalysisOutput) -> f32 {
        let range = &self.range;
        range.scale().value_along_scale(
            range.min().calc_limit(),
            range.max().calc_limit(),
            self.raw_value(analysis),
        )
    }

    pub fn value_along_range(&self, analysis: &AnalysisOutput, clamped: bool) -> f32 {
        self.range.value_along_range(self.raw_value(analysis), clamped)
    }

    pub fn ratio_along_range(&self, analysis: &AnalysisOutput, clamped: bool) -> f32 {
        self.range.ratio_along_range(self.raw_value(analysis), clamped)
    }

    /// Raw value, clamped ratio and clamped value along the range.
    pub fn coordinate(&self, analysis: &AnalysisOutput) -> AxisCoordinate {
        let raw = self.raw_value(analysis);
        AxisCoordinate {
            raw,
            ratio: self.range.ratio_along_range(raw, true),
            value_along_range: self.range.value_along_range(raw, true),
        }
    }

    /// The clamped value along the range, rendered with `precision` decimals.
    pub fn formatted_value(&self, analysis: &AnalysisOutput, precision: usize) -> String {
        format!("{:.*}", precision, self.value_along_range(analysis, true))
    }

    /// The clamped ratio mapped onto the limits' displayed labels, e.g.
    /// 0–100 % for resonance.
    pub fn displayed_value(&self, analysis: &AnalysisOutput) -> f32 {
        self.range.displayed_value_at(self.ratio_along_range(analysis, true))
    }
}

/// Axes compare by their configuration; the extraction function is ignored.
impl PartialEq for Axis {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.unit == other.unit
            && self.dimension == other.dimension
            && self.range == other.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(pitch_hz: Option<f32>, resonance_value: Option<f32>) -> AnalysisOutput {
        AnalysisOutput {
            pitch_hz,
            resonance_value,
        }
    }

    #[test]
    fn presets_have_expected_configuration() {
        assert_eq!(PITCH_AXIS.label(), "Pitch");
        assert_eq!(PITCH_AXIS.unit(), "Hz");
        assert_eq!(PITCH_AXIS.dimension(), AxisDimension::Vertical);
        assert_eq!(PITCH_AXIS.range().relationship(), DataRelationship::Direct);

        assert_eq!(RESONANCE_AXIS.label(), "Resonance");
        assert_eq!(RESONANCE_AXIS.unit(), "%");
        assert_eq!(RESONANCE_AXIS.dimension(), AxisDimension::Horizontal);
        assert_eq!(RESONANCE_AXIS.range().min().calc_limit(), 11.0);
        assert_eq!(RESONANCE_AXIS.range().min().displayed_val(), 0.0);
        assert_eq!(RESONANCE_AXIS.range().max().displayed_val(), 100.0);
    }

    #[test]
    fn pitch_coordinate_tracks_pitch() {
        let coord = PITCH_AXIS.coordinate(&analysis(Some(225.0), None));
        assert_eq!(coord.raw, 225.0);
        assert_eq!(coord.value_along_range, 225.0);
        assert!((coord.ratio - 0.5).abs() < 1e-6);
        assert!((coord.position(300.0) - 150.0).abs() < 1e-4);
    }

    #[test]
    fn resonance_is_inverted() {
        let short = RESONANCE_AXIS.coordinate(&analysis(None, Some(11.0)));
        let long = RESONANCE_AXIS.coordinate(&analysis(None, Some(18.0)));
        assert_eq!(short.ratio, 1.0);
        assert_eq!(long.ratio, 0.0);
        assert_eq!(RESONANCE_AXIS.displayed_value(&analysis(None, Some(11.0))), 100.0);
    }

    #[test]
    fn missing_measurement_reads_as_zero() {
        let output = analysis(None, Some(14.0));
        assert_eq!(PITCH_AXIS.raw_value(&output), 0.0);
        assert_eq!(PITCH_AXIS.ratio_along_range(&output, true), 0.0);
    }

    #[test]
    fn formatted_value_uses_precision_and_clamps() {
        let output = analysis(Some(123.456), None);
        assert_eq!(PITCH_AXIS.formatted_value(&output, 1), "123.5");
        assert_eq!(PITCH_AXIS.formatted_value(&output, 0), "123");

        let loud = analysis(Some(1000.0), None);
        assert_eq!(PITCH_AXIS.formatted_value(&loud, 2), "400.00");
    }

    #[test]
    fn raw_value_along_axis_is_scale_placement() {
        let output = analysis(Some(180.0), None);
        assert_eq!(PITCH_AXIS.raw_value_along_axis(&output), 180.0);
    }

    #[test]
    fn equality_ignores_extractor() {
        let custom = Axis::new(
            "Pitch",
            "Hz",
            AxisDimension::Vertical,
            *PITCH_AXIS.range(),
            |analysis| analysis.resonance_value,
        );
        assert_eq!(custom, *PITCH_AXIS);
        assert_ne!(*PITCH_AXIS, *RESONANCE_AXIS);
    }
}
