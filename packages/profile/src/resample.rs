//! Fixed-interval resampling of gradient and elevation series.
//!
//! Bins sit every [`BIN_WIDTH_M`] meters starting at the midpoint of the
//! first bin. Values are linearly interpolated at each bin position, which
//! approximates (but is not) an average over the bin.

/// Distance between resampling positions in meters.
pub const BIN_WIDTH_M: f64 = 100.0;

/// First resampling position in meters.
pub const FIRST_BIN_M: f64 = BIN_WIDTH_M / 2.0;

/// Longest path that is resampled, in km. A trace running past this holds
/// a corrupt distance sample, not a climb.
pub const MAX_PATH_KM: f64 = 1000.0;

/// Upper limit on the number of resampling positions.
pub const MAX_BINS: usize = 10_000;

/// Resampling positions in meters: `50, 150, 250, ...` up to and
/// including the first position at or past `last_m - 50`.
///
/// Empty when more than [`MAX_BINS`] positions would be needed.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bin_positions(last_m: f64) -> Vec<f64> {
    let stop = last_m + FIRST_BIN_M;
    let count = ((stop - FIRST_BIN_M) / BIN_WIDTH_M).ceil();
    if !count.is_finite() || count <= 0.0 || count > MAX_BINS as f64 {
        return Vec::new();
    }
    (0..count as usize)
        .map(|k| (k as f64).mul_add(BIN_WIDTH_M, FIRST_BIN_M))
        .collect()
}

/// Positions each segment gradient is plotted at: the segment start
/// shifted by half the width of the *first* segment.
#[must_use]
pub fn segment_midpoints(distance_m: &[f64]) -> Vec<f64> {
    let [first, second, ..] = distance_m else {
        return Vec::new();
    };
    let half = (second - first) / 2.0;
    distance_m[..distance_m.len() - 1]
        .iter()
        .map(|d| d + half)
        .collect()
}

/// One-dimensional linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be non-decreasing. Positions before the first or after the
/// last sample take the first or last value.
#[must_use]
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let (Some(&first), Some(&last)) = (fp.first(), fp.last()) else {
        return f64::NAN;
    };

    let upper = xp.partition_point(|&v| v <= x);
    if upper == 0 {
        return first;
    }
    if upper == xp.len() {
        return last;
    }

    let lower = upper - 1;
    let (x0, x1) = (xp[lower], xp[upper]);
    let (y0, y1) = (fp[lower], fp[upper]);
    (x - x0).mul_add((y1 - y0) / (x1 - x0), y0)
}

/// Interpolates `(xp, fp)` at every position of `xs`.
#[must_use]
pub fn interp_all(xs: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| interp(x, xp, fp)).collect()
}

/// Resampled series of one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resampled {
    /// Bin positions in km.
    pub bins_km: Vec<f64>,
    pub gradient: Vec<f64>,
    pub elevation: Vec<f64>,
}

/// Resamples segment gradients and point elevations onto the fixed bins.
///
/// `distance_km` and `elevation` are per point; `segments` holds one
/// gradient per consecutive pair of points.
#[must_use]
pub fn resample(distance_km: &[f64], elevation: &[f64], segments: &[f64]) -> Resampled {
    let Some(&last_km) = distance_km.last() else {
        return Resampled::default();
    };

    let distance_m: Vec<f64> = distance_km.iter().map(|d| d * 1000.0).collect();
    let bins_m = bin_positions(last_km * 1000.0);
    let bins_km: Vec<f64> = bins_m.iter().map(|b| b / 1000.0).collect();

    let midpoints = segment_midpoints(&distance_m);
    let gradient = interp_all(&bins_m, &midpoints, segments);
    let elevation = interp_all(&bins_km, distance_km, elevation);

    Resampled {
        bins_km,
        gradient,
        elevation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len(), "{a:?} vs {b:?}");
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn bins_start_at_midpoint() {
        assert_close(&bin_positions(300.0), &[50.0, 150.0, 250.0]);
        assert_close(&bin_positions(320.0), &[50.0, 150.0, 250.0, 350.0]);
        assert_close(&bin_positions(1.0), &[50.0]);
        assert!(bin_positions(0.0).is_empty());
    }

    #[test]
    fn bin_count_is_capped() {
        assert_eq!(bin_positions(MAX_PATH_KM * 1000.0).len(), MAX_BINS);
        assert!(bin_positions(MAX_PATH_KM * 1000.0 + BIN_WIDTH_M).is_empty());
        assert!(bin_positions(1e23).is_empty());
        assert!(bin_positions(f64::INFINITY).is_empty());
    }

    #[test]
    fn midpoints_use_first_segment_width() {
        let mids = segment_midpoints(&[0.0, 200.0, 250.0, 600.0]);
        assert_close(&mids, &[100.0, 300.0, 350.0]);
        assert!(segment_midpoints(&[5.0]).is_empty());
    }

    #[test]
    fn interp_matches_linear_and_clamps() {
        let xp = [0.0, 10.0, 20.0];
        let fp = [0.0, 100.0, 50.0];
        assert!((interp(5.0, &xp, &fp) - 50.0).abs() < 1e-12);
        assert!((interp(15.0, &xp, &fp) - 75.0).abs() < 1e-12);
        assert!((interp(-3.0, &xp, &fp)).abs() < 1e-12);
        assert!((interp(25.0, &xp, &fp) - 50.0).abs() < 1e-12);
        assert!((interp(20.0, &xp, &fp) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn interp_handles_repeated_positions() {
        let xp = [0.0, 10.0, 10.0, 20.0];
        let fp = [0.0, 10.0, 30.0, 40.0];
        assert!((interp(10.0, &xp, &fp) - 30.0).abs() < 1e-12);
        assert!((interp(15.0, &xp, &fp) - 35.0).abs() < 1e-12);
    }

    #[test]
    fn resamples_constant_climb() {
        // 1 km at a steady 8 %.
        let distance_km = [0.0, 0.25, 0.5, 0.75, 1.0];
        let elevation = [1000.0, 1020.0, 1040.0, 1060.0, 1080.0];
        let segments = [8.0, 8.0, 8.0, 8.0];

        let r = resample(&distance_km, &elevation, &segments);
        assert_eq!(r.bins_km.len(), 10);
        assert!((r.bins_km[0] - 0.05).abs() < 1e-12);
        assert!(r.gradient.iter().all(|g| (g - 8.0).abs() < 1e-9));
        assert!((r.elevation[0] - 1004.0).abs() < 1e-9);
        assert!((r.elevation[9] - 1076.0).abs() < 1e-9);
    }
}
