//! Whether a larger raw value means a larger or a smaller displayed value.

use super::scale::Scale;

/// Direction of the mapping between a measurement and its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataRelationship {
    /// Larger raw values sit further along the axis.
    #[default]
    Direct,
    /// Larger raw values sit closer to the start of the axis, e.g. a shorter
    /// vocal tract reads as more resonance.
    Inverse,
}

impl DataRelationship {
    pub fn label(&self) -> &'static str {
        match self {
            DataRelationship::Direct => "direct",
            DataRelationship::Inverse => "inverse",
        }
    }

    /// Applies the relationship to a value already placed on `scale`.
    ///
    /// `Inverse` mirrors the value within `[min, max]`: its ratio `r` becomes
    /// `1 - r` before converting back through the scale.
    pub fn apply(&self, scale: Scale, val: f32, min: f32, max: f32) -> f32 {
        match self {
            DataRelationship::Direct => scale.value_along_scale(min, max, val),
            DataRelationship::Inverse => {
                let ratio = scale.ratio_along_scale(min, max, val);
                scale.value_from_ratio(min, max, 1.0 - ratio)
            }
        }
    }

    /// Maps a ratio of the mapped value back to the ratio of the raw value.
    pub fn invert_ratio(&self, ratio: f32) -> f32 {
        match self {
            DataRelationship::Direct => ratio,
            DataRelationship::Inverse => 1.0 - ratio,
        }
    }
}
