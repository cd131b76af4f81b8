//! One end of an axis range.

/// A range bound: the value used in range math plus an optional label that
/// replaces it on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimit {
    calc_limit: f32,
    display_label: Option<f32>,
}

impl AxisLimit {
    pub const fn new(calc_limit: f32) -> Self {
        Self {
            calc_limit,
            display_label: None,
        }
    }

    /// A limit that computes with `calc_limit` but is shown as `display_label`.
    pub const fn with_display_label(calc_limit: f32, display_label: f32) -> Self {
        Self {
            calc_limit,
            display_label: Some(display_label),
        }
    }

    pub fn calc_limit(&self) -> f32 {
        self.calc_limit
    }

    pub fn display_label(&self) -> Option<f32> {
        self.display_label
    }

    /// The value to render for this limit.
    pub fn displayed_val(&self) -> f32 {
        self.display_label.unwrap_or(self.calc_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displayed_val_prefers_override() {
        let limit = AxisLimit::with_display_label(11.0, 0.0);
        assert_eq!(limit.calc_limit(), 11.0);
        assert_eq!(limit.displayed_val(), 0.0);
    }

    #[test]
    fn displayed_val_defaults_to_calc_limit() {
        assert_eq!(AxisLimit::new(400.0).displayed_val(), 400.0);
    }
}
