//! Rounding of elevation values to clean chart-axis bounds.

use pass_finder_profile_models::RoundedBound;

/// Padding applied to the first elevation of a path for its lower bound.
pub const LOWER_PADDING: i32 = -2;

/// Padding applied to the last elevation of a path for its upper bound.
pub const UPPER_PADDING: i32 = 2;

/// Decomposes `num` into its leading two digits and order of magnitude,
/// then shifts the leading digits by `padding`.
///
/// `order = floor(log10(num))`, `leading = floor(num / 10^(order - 1))`,
/// `bound = (leading + padding) * 10^(order - 1)`. For example `635` with
/// padding `-2` gives `610` (leading `63`, order `2`).
///
/// Returns `None` for non-positive or non-finite input, where the
/// logarithm is undefined.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_bound(num: f64, padding: i32) -> Option<RoundedBound> {
    if !num.is_finite() || num <= 0.0 {
        return None;
    }

    let order = num.log10().floor() as i32;
    let scale = 10_f64.powi(order - 1);
    let leading = (num / scale).floor();
    let bound = (leading + f64::from(padding)) * scale;

    Some(RoundedBound {
        bound,
        leading,
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_three_digit_values() {
        let r = round_bound(635.0, -2).unwrap();
        assert!((r.bound - 610.0).abs() < 1e-9);
        assert!((r.leading - 63.0).abs() < f64::EPSILON);
        assert_eq!(r.order, 2);
    }

    #[test]
    fn decomposes_four_digit_values() {
        let r = round_bound(2635.0, 2).unwrap();
        assert!((r.bound - 2800.0).abs() < 1e-9);
        assert!((r.leading - 26.0).abs() < f64::EPSILON);
        assert_eq!(r.order, 3);
    }

    #[test]
    fn lower_bound_stays_within_an_order() {
        for n in [1.5, 9.99, 10.0, 99.0, 101.0, 635.0, 999.0, 1000.0, 2635.0, 4808.7] {
            let r = round_bound(n, LOWER_PADDING).unwrap();
            assert!(r.bound <= n, "{n}: {r:?}");
            assert!(n - r.bound < 10_f64.powi(r.order), "{n}: {r:?}");
        }
    }

    #[test]
    fn upper_bound_is_above_value() {
        for n in [12.0, 480.0, 1999.0, 2757.0] {
            let r = round_bound(n, UPPER_PADDING).unwrap();
            assert!(r.bound > n, "{n}: {r:?}");
        }
    }

    #[test]
    fn undefined_for_non_positive() {
        assert!(round_bound(0.0, 2).is_none());
        assert!(round_bound(-40.0, -2).is_none());
        assert!(round_bound(f64::NAN, -2).is_none());
    }
}
