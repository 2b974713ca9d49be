#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Climb profile computation.
//!
//! Turns the raw geographic trace of one path into a [`PathProfile`]:
//!
//! 1. [`sanitize`] drops samples without a physical elevation and keeps
//!    distance non-decreasing.
//! 2. [`gradient`] derives per-segment grades, rejecting near-zero
//!    segments as noise.
//! 3. [`resample`] interpolates gradient and elevation every 100 m.
//! 4. [`classify`] colours each resampled gradient and sums flat and
//!    descending length.
//! 5. [`bounds`] rounds the first and last elevation outward to clean
//!    chart bounds.
//!
//! Every step is a pure function of its input, so computing a profile
//! twice from the same trace yields identical series.

pub mod bounds;
pub mod classify;
pub mod gradient;
pub mod palette;
pub mod resample;
pub mod sanitize;
pub mod trace;

pub use pass_finder_profile_models::{
    Coordinate, PALETTE_SIZE, PaletteError, PathProfile, RawTrace, Rgb, RoundedBound,
    SteepnessPalette, TracePoint,
};
pub use palette::{default_palette, parse_palette_toml};
pub use trace::{TraceError, parse_trace};

/// Computes the profile of one path.
///
/// Returns `None` when fewer than two samples survive sanitizing, since
/// no segment exists to derive a gradient from, or when the trace runs
/// past [`resample::MAX_PATH_KM`].
#[must_use]
pub fn compute_profile(trace: &RawTrace, palette: &SteepnessPalette) -> Option<PathProfile> {
    let clean = sanitize::sanitize(trace);
    if clean.len() < 2 {
        log::debug!(
            "Trace has {} usable samples after sanitizing, need at least 2",
            clean.len()
        );
        return None;
    }

    let last_km = *clean.distance.last()?;
    if last_km > resample::MAX_PATH_KM {
        log::warn!(
            "Discarding trace ending at {last_km} km, longer than {} km",
            resample::MAX_PATH_KM
        );
        return None;
    }

    let distance_m: Vec<f64> = clean.distance.iter().map(|d| d * 1000.0).collect();
    let segments = gradient::segment_gradients(&distance_m, &clean.elevation);
    let (grad_max, grad_min) = gradient::gradient_extrema(&segments)?;

    let segment_km: Vec<f64> = clean.distance.windows(2).map(|w| w[1] - w[0]).collect();
    let (flat_km, descend_km) = classify::flat_and_descent_km(&segment_km, &segments);

    let resampled = resample::resample(&clean.distance, &clean.elevation, &segments);
    let grad_color = classify::colorize(palette, &resampled.gradient);

    let first_elevation = *clean.elevation.first()?;
    let last_elevation = *clean.elevation.last()?;
    let elev_lower = bounds::round_bound(first_elevation, bounds::LOWER_PADDING)?.bound;
    let elev_upper = bounds::round_bound(last_elevation, bounds::UPPER_PADDING)?.bound;

    Some(PathProfile {
        gradient: gradient::point_gradients(&segments),
        distance: clean.distance,
        elevation: clean.elevation,
        track: clean.track,
        grad_bin: resampled.bins_km,
        grad_interp: resampled.gradient,
        elev_interp: resampled.elevation,
        grad_color,
        grad_max,
        grad_min,
        flat_km,
        descend_km,
        elev_lower,
        elev_upper,
    })
}

/// Parses a raw trace payload and computes its profile.
///
/// Parse failures are logged and yield `None`, the same as a trace too
/// short to profile.
#[must_use]
pub fn profile_from_payload(payload: &str, palette: &SteepnessPalette) -> Option<PathProfile> {
    match parse_trace(payload) {
        Ok(trace) => compute_profile(&trace, palette),
        Err(e) => {
            log::warn!("Discarding malformed trace: {e}");
            None
        }
    }
}
