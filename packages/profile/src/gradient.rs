//! Per-segment gradient computation.

/// Segments at most this long (meters) get a zero gradient.
pub const MIN_SEGMENT_M: f64 = 1.0;

/// Reported gradient extrema are capped at +/- this many percent.
pub const GRADIENT_CAP: f64 = 30.0;

/// Gradient in percent of each segment between consecutive points.
///
/// Returns one value per segment, so `distance_m.len() - 1` values.
/// `distance_m` and `elevation` must have the same length.
#[must_use]
pub fn segment_gradients(distance_m: &[f64], elevation: &[f64]) -> Vec<f64> {
    debug_assert_eq!(distance_m.len(), elevation.len());

    distance_m
        .windows(2)
        .zip(elevation.windows(2))
        .map(|(d, e)| {
            let run = d[1] - d[0];
            if run > MIN_SEGMENT_M {
                (e[1] - e[0]) / run * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Aligns segment gradients with points by prepending a zero for the
/// first point.
#[must_use]
pub fn point_gradients(segments: &[f64]) -> Vec<f64> {
    std::iter::once(0.0).chain(segments.iter().copied()).collect()
}

/// Steepest climb and descent over `segments`, capped at
/// [`GRADIENT_CAP`]. Returns `None` when there are no segments.
#[must_use]
pub fn gradient_extrema(segments: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = segments.split_first()?;
    let (max, min) = rest
        .iter()
        .fold((*first, *first), |(max, min), &g| (max.max(g), min.min(g)));
    Some((max.min(GRADIENT_CAP), min.max(-GRADIENT_CAP)))
}
