//! Trace sanitizing.
//!
//! GPS elevation feeds occasionally report zero or negative elevations for
//! samples without a fix. Those samples are dropped together with their
//! distance and coordinate so every series stays aligned.

use pass_finder_profile_models::{Coordinate, RawTrace};

/// A trace with non-physical samples removed.
///
/// `distance`, `elevation`, and `track` always have the same length and
/// `distance` never decreases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedTrace {
    /// Cumulative distance in km.
    pub distance: Vec<f64>,
    /// Elevation in meters, all positive.
    pub elevation: Vec<f64>,
    pub track: Vec<Coordinate>,
}

impl SanitizedTrace {
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }
}

/// Drops samples with elevation `<= 0` and samples whose distance runs
/// backwards relative to the last kept sample.
#[must_use]
pub fn sanitize(trace: &RawTrace) -> SanitizedTrace {
    let mut out = SanitizedTrace {
        distance: Vec::with_capacity(trace.len()),
        elevation: Vec::with_capacity(trace.len()),
        track: Vec::with_capacity(trace.len()),
    };

    let mut dropped_elevation = 0_usize;
    let mut dropped_distance = 0_usize;

    for point in &trace.points {
        if point.elevation <= 0.0 {
            dropped_elevation += 1;
            continue;
        }
        if out.distance.last().is_some_and(|&last| point.distance < last) {
            dropped_distance += 1;
            continue;
        }
        out.distance.push(point.distance);
        out.elevation.push(point.elevation);
        out.track.push(point.coordinate());
    }

    if dropped_elevation > 0 || dropped_distance > 0 {
        log::debug!(
            "Sanitized trace: dropped {dropped_elevation} non-positive elevations, \
             {dropped_distance} backwards distances ({} of {} samples kept)",
            out.len(),
            trace.len()
        );
    }

    out
}
