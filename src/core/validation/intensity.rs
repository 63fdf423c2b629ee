use crate::core::data::intensity_range::IntensityRange;

/// Widest window accepted before a range is treated as runaway.
pub const MAX_INTENSITY_WINDOW: f64 = 100_000.0;

#[must_use]
pub fn validate_intensity(candidate: &IntensityRange) -> Option<IntensityRange> {
    validate_intensity_within(candidate, MAX_INTENSITY_WINDOW)
}

/// Same as [`validate_intensity`] with a caller-chosen window ceiling.
#[must_use]
pub fn validate_intensity_within(
    candidate: &IntensityRange,
    max_window: f64,
) -> Option<IntensityRange> {
    if !candidate.lower.is_finite() || !candidate.upper.is_finite() {
        return None;
    }

    if candidate.lower >= candidate.upper {
        return None;
    }

    let window = candidate.window();
    if !(window > 0.0 && window <= max_window) {
        return None;
    }

    Some(*candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ordered_ranges_within_ceiling_are_accepted(
            lower in -50_000.0..50_000.0f64,
            window in 1e-3..=MAX_INTENSITY_WINDOW,
        ) {
            let range = IntensityRange::new(lower, lower + window);
            prop_assume!(range.window() > 0.0 && range.window() <= MAX_INTENSITY_WINDOW);

            prop_assert_eq!(validate_intensity(&range), Some(range));
        }

        #[test]
        fn inverted_or_empty_ranges_are_rejected(
            upper in -50_000.0..50_000.0f64,
            gap in 0.0..1_000.0f64,
        ) {
            let range = IntensityRange::new(upper + gap, upper);

            prop_assert_eq!(validate_intensity(&range), None);
        }

        #[test]
        fn oversized_windows_are_rejected(
            lower in -1e6..1e6f64,
            excess in 1.0..1e6f64,
        ) {
            let range = IntensityRange::new(lower, lower + MAX_INTENSITY_WINDOW + excess);

            prop_assert_eq!(validate_intensity(&range), None);
        }
    }

    #[test]
    fn boundary_window_is_accepted() {
        let range = IntensityRange::new(-50_000.0, 50_000.0);

        assert_eq!(validate_intensity(&range), Some(range));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(validate_intensity(&IntensityRange::new(40.0, 40.0)), None);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert_eq!(validate_intensity(&IntensityRange::new(f64::NAN, 1.0)), None);
        assert_eq!(
            validate_intensity(&IntensityRange::new(0.0, f64::INFINITY)),
            None
        );
        assert_eq!(
            validate_intensity(&IntensityRange::new(f64::NEG_INFINITY, 0.0)),
            None
        );
    }

    #[test]
    fn custom_ceiling_is_honoured() {
        let range = IntensityRange::new(0.0, 500.0);

        assert_eq!(validate_intensity_within(&range, 400.0), None);
        assert_eq!(validate_intensity_within(&range, 500.0), Some(range));
    }
}
