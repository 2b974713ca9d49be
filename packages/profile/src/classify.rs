//! Steepness classification and colour mapping.

use pass_finder_profile_models::{PALETTE_SIZE, Rgb, SteepnessPalette};

/// Gradients (percent) at or beyond this magnitude share the extreme
/// palette colour.
#[allow(clippy::cast_possible_wrap)]
pub const COLOR_RANGE: i64 = (PALETTE_SIZE as i64 - 1) / 2;

/// Segments with a gradient in `[-FLAT_LIMIT, FLAT_LIMIT)` count as flat.
pub const FLAT_LIMIT: f64 = 2.0;

/// Coarse direction of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Steepness {
    /// Below -2 %.
    Descent,
    /// From -2 % (inclusive) to 2 % (exclusive).
    Flat,
    /// 2 % and above.
    Ascent,
}

impl Steepness {
    #[must_use]
    pub fn of(gradient: f64) -> Self {
        if gradient < -FLAT_LIMIT {
            Self::Descent
        } else if gradient < FLAT_LIMIT {
            Self::Flat
        } else {
            Self::Ascent
        }
    }
}

/// Palette index of a gradient: the gradient rounded to whole percent
/// (ties to even) and shifted so -20 % maps to 0, clamped to the palette.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn color_index(gradient: f64) -> usize {
    let shifted = gradient.round_ties_even() as i64 + COLOR_RANGE;
    shifted.clamp(0, 2 * COLOR_RANGE) as usize
}

/// Colours of each gradient under `palette`.
#[must_use]
pub fn colorize(palette: &SteepnessPalette, gradients: &[f64]) -> Vec<Rgb> {
    gradients
        .iter()
        .map(|&g| palette.color(color_index(g)))
        .collect()
}

/// Flat and descending length (km) of a path.
///
/// `segment_km[i]` is the length of the segment whose gradient is
/// `segments[i]`.
#[must_use]
pub fn flat_and_descent_km(segment_km: &[f64], segments: &[f64]) -> (f64, f64) {
    segment_km
        .iter()
        .zip(segments)
        .fold((0.0, 0.0), |(flat, descend), (&len, &g)| match Steepness::of(g) {
            Steepness::Flat => (flat + len, descend),
            Steepness::Descent => (flat, descend + len),
            Steepness::Ascent => (flat, descend),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::default_palette;

    #[test]
    fn maps_whole_percents_to_palette_slots() {
        assert_eq!(color_index(-20.0), 0);
        assert_eq!(color_index(0.0), 20);
        assert_eq!(color_index(7.3), 27);
        assert_eq!(color_index(20.0), 40);
    }

    #[test]
    fn rounds_ties_to_even() {
        assert_eq!(color_index(2.5), 22);
        assert_eq!(color_index(3.5), 24);
        assert_eq!(color_index(-0.5), 20);
    }

    #[test]
    fn saturates_outside_range() {
        for g in [-25.0, -20.6, 21.0, 45.0, -300.0] {
            assert_eq!(color_index(g), color_index(g.clamp(-20.0, 20.0)), "gradient {g}");
        }
        assert_eq!(color_index(-45.0), 0);
        assert_eq!(color_index(45.0), 40);
    }

    #[test]
    fn color_index_is_monotonic() {
        let mut last = 0;
        let mut g = -30.0;
        while g <= 30.0 {
            let idx = color_index(g);
            assert!(idx >= last, "index dropped at {g}");
            last = idx;
            g += 0.25;
        }
    }

    #[test]
    fn classifies_flat_boundaries() {
        assert_eq!(Steepness::of(-2.0), Steepness::Flat);
        assert_eq!(Steepness::of(-2.01), Steepness::Descent);
        assert_eq!(Steepness::of(1.99), Steepness::Flat);
        assert_eq!(Steepness::of(2.0), Steepness::Ascent);
    }

    #[test]
    fn sums_flat_and_descent() {
        let (flat, descend) =
            flat_and_descent_km(&[0.5, 0.25, 1.0, 0.75], &[1.0, -5.0, 8.0, -2.0]);
        assert!((flat - 1.25).abs() < 1e-12);
        assert!((descend - 0.25).abs() < 1e-12);
    }

    #[test]
    fn colorizes_with_palette() {
        let palette = default_palette();
        let colors = colorize(palette, &[0.0, 30.0]);
        assert_eq!(colors[0].to_string(), "#ace186");
        assert_eq!(colors[1].to_string(), "#5e4747");
    }
}
