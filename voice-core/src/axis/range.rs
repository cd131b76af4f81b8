//! The span an axis covers and how raw values are placed on it.

use super::limit::AxisLimit;
use super::relationship::DataRelationship;
use super::scale::Scale;

/// Two limits plus the scale and relationship that map raw values between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: AxisLimit,
    max: AxisLimit,
    scale: Scale,
    relationship: DataRelationship,
}

impl AxisRange {
    /// Creates a range with a [`DataRelationship::Direct`] relationship.
    pub const fn new(min: AxisLimit, max: AxisLimit, scale: Scale) -> Self {
        Self {
            min,
            max,
            scale,
            relationship: DataRelationship::Direct,
        }
    }

    pub fn with_relationship(mut self, relationship: DataRelationship) -> Self {
        self.relationship = relationship;
        self
    }

    pub fn min(&self) -> &AxisLimit {
        &self.min
    }

    pub fn max(&self) -> &AxisLimit {
        &self.max
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn relationship(&self) -> DataRelationship {
        self.relationship
    }

    /// Width of the range in calculation units; never negative.
    pub fn span(&self) -> f32 {
        (self.max.calc_limit() - self.min.calc_limit()).max(0.0)
    }

    /// Maps a raw measurement into the range.
    ///
    /// The value is placed on the scale, passed through the relationship and,
    /// when `clamped`, limited to `[min, max]`.
    pub fn value_along_range(&self, raw: f32, clamped: bool) -> f32 {
        let (min, max) = (self.min.calc_limit(), self.max.calc_limit());
        let scaled = self.scale.value_along_scale(min, max, raw);
        let value = self.relationship.apply(self.scale, scaled, min, max);

        if clamped {
            clamp(value, min, max)
        } else {
            value
        }
    }

    /// Fraction of the range covered by the mapped value. When `clamped`, the
    /// result lies in `[0, 1]`; a zero span always yields `0.0`.
    pub fn ratio_along_range(&self, raw: f32, clamped: bool) -> f32 {
        if self.span() == 0.0 {
            return 0.0;
        }

        let value = self.value_along_range(raw, clamped);
        let ratio = self
            .scale
            .ratio_along_scale(self.min.calc_limit(), self.max.calc_limit(), value);

        if clamped {
            clamp(ratio, 0.0, 1.0)
        } else {
            ratio
        }
    }

    /// The raw measurement whose ratio along this range is `ratio`.
    pub fn value_along_range_inverse(&self, ratio: f32) -> f32 {
        self.scale.value_from_ratio(
            self.min.calc_limit(),
            self.max.calc_limit(),
            self.relationship.invert_ratio(ratio),
        )
    }

    /// Linearly maps a ratio onto the displayed labels of the two limits.
    pub fn displayed_value_at(&self, ratio: f32) -> f32 {
        let (lo, hi) = (self.min.displayed_val(), self.max.displayed_val());
        lo + ratio * (hi - lo)
    }
}

// Unlike `f32::clamp` this never panics, so a range built with max < min
// still clamps (to `max`).
fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}
