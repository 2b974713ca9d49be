//! Statistics over search results.

use pass_finder_pass::Pass;
use pass_finder_search_models::SearchType;

/// Result sets up to this size are too small for statistics.
pub const MIN_STATISTICS_VALUES: usize = 10;

/// Equal-width bin counts over a range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, one more than there are bins.
    pub edges: Vec<f64>,
    /// Number of values per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Midpoint of each bin.
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Total number of counted values.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Counts `values` into `bins` equal-width bins over `range`, or over the
/// values' own extent when `range` is `None`.
///
/// Every bin is half-open except the last, which also holds its upper
/// edge. Values outside the range are not counted. A degenerate extent
/// `[x, x]` is widened to `[x - 0.5, x + 0.5]`.
///
/// Returns `None` for fewer than [`MIN_STATISTICS_VALUES`] + 1 values or
/// zero bins.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[f64], range: Option<(f64, f64)>, bins: usize) -> Option<Histogram> {
    if values.len() <= MIN_STATISTICS_VALUES || bins == 0 {
        return None;
    }

    let (mut low, mut high) = match range {
        Some(range) => range,
        None => values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            }),
    };
    if (high - low).abs() < f64::EPSILON {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| (i as f64).mul_add(width, low)).collect();

    let mut counts = vec![0; bins];
    for &v in values {
        if !(low..=high).contains(&v) {
            continue;
        }
        let bin = (((v - low) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Some(Histogram { edges, counts })
}

/// The attribute of `passes` a search of `search_type` is about: path
/// lengths for distance, path elevation gains for elevation, and summit
/// heights otherwise.
#[must_use]
pub fn searched_values(passes: &[Pass], search_type: SearchType) -> Vec<f64> {
    match search_type {
        SearchType::Distance => passes.iter().flat_map(Pass::total_distance).collect(),
        SearchType::Elevation => passes.iter().flat_map(Pass::total_elevation).collect(),
        SearchType::Name | SearchType::Height | SearchType::Region | SearchType::Country => {
            passes.iter().map(Pass::height).collect()
        }
    }
}
