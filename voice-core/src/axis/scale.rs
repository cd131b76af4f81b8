//! How a raw value is placed within a range.

/// Strategy for interpreting a raw value between two limits.
///
/// Both variants keep values in the measurement's own units; they differ in
/// how a value converts to and from a ratio of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Equal steps in value are equal steps in ratio.
    #[default]
    Linear,
    /// Equal ratios of value are equal steps in ratio. Requires positive
    /// limits; otherwise it behaves like [`Scale::Linear`].
    Logarithmic,
}

impl Scale {
    pub fn label(&self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Logarithmic => "logarithmic",
        }
    }

    /// Places `val` on the scale. Values stay in measurement units.
    pub fn value_along_scale(&self, _min: f32, _max: f32, val: f32) -> f32 {
        val
    }

    /// Fraction of the way from `min` to `max`; unbounded. A non-positive
    /// span yields `0.0`.
    pub fn ratio_along_scale(&self, min: f32, max: f32, val: f32) -> f32 {
        if max <= min {
            return 0.0;
        }

        match self.effective(min) {
            Scale::Linear => (val - min) / (max - min),
            Scale::Logarithmic => (val.max(f32::MIN_POSITIVE) / min).ln() / (max / min).ln(),
        }
    }

    /// The value that sits at `ratio` of the way from `min` to `max`.
    pub fn value_from_ratio(&self, min: f32, max: f32, ratio: f32) -> f32 {
        if max <= min {
            return min;
        }

        match self.effective(min) {
            Scale::Linear => min + ratio * (max - min),
            Scale::Logarithmic => min * (max / min).powf(ratio),
        }
    }

    fn effective(&self, min: f32) -> Scale {
        match self {
            Scale::Logarithmic if min > 0.0 => Scale::Logarithmic,
            _ => Scale::Linear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ratio_is_offset_from_min() {
        assert_eq!(Scale::Linear.ratio_along_scale(50.0, 400.0, 50.0), 0.0);
        assert_eq!(Scale::Linear.ratio_along_scale(50.0, 400.0, 400.0), 1.0);
        assert_eq!(Scale::Linear.ratio_along_scale(0.0, 10.0, 2.5), 0.25);
    }

    #[test]
    fn degenerate_span_has_zero_ratio() {
        assert_eq!(Scale::Linear.ratio_along_scale(5.0, 5.0, 7.0), 0.0);
        assert_eq!(Scale::Linear.ratio_along_scale(5.0, 1.0, 7.0), 0.0);
    }

    #[test]
    fn logarithmic_octaves_are_even_steps() {
        let scale = Scale::Logarithmic;
        let mid = scale.ratio_along_scale(100.0, 400.0, 200.0);
        assert!((mid - 0.5).abs() < 1e-6);
        assert!((scale.value_from_ratio(100.0, 400.0, 0.5) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn logarithmic_falls_back_for_non_positive_min() {
        let scale = Scale::Logarithmic;
        assert_eq!(scale.ratio_along_scale(0.0, 10.0, 5.0), 0.5);
    }

    #[test]
    fn scales_compare_by_variant() {
        assert_eq!(Scale::Linear, Scale::default());
        assert_ne!(Scale::Linear, Scale::Logarithmic);
        assert_eq!(Scale::Logarithmic.label(), "logarithmic");
    }
}
