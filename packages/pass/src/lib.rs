#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pass aggregation.
//!
//! A [`Pass`] is built from a stored [`PassRecord`]: the trace of every
//! path is fetched through a [`TraceProvider`] and profiled eagerly, then
//! per-path totals and pass-level extrema are derived. A pass is immutable
//! once built. Narrowing it to a subset of its paths (as range searches
//! do) produces a new, reduced pass via [`Pass::reduced`].
//!
//! Paths whose trace cannot be acquired or parsed are logged and left
//! out; the pass stays usable with the remaining paths.

pub mod progress;
pub mod provider;

use std::collections::BTreeMap;

use geo::{Distance as _, Haversine, Point};
use pass_finder_profile::{PathProfile, SteepnessPalette};
use serde::Deserialize as _;

pub use pass_finder_pass_models::{Coordinate, PassRecord, PathRecord, PathSummary};
pub use pass_finder_profile::default_palette;
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use provider::{DirectoryTraceProvider, MemoryTraceProvider, TraceProvider};

/// Errors from building a [`Pass`].
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    /// A stored record is missing a required field or has a mistyped one.
    #[error("Malformed pass record '{name}': {source}")]
    MalformedRecord {
        /// The record's `name` field, if it has a readable one.
        name: String,
        /// What failed to deserialize.
        #[source]
        source: serde_json::Error,
    },
}

/// Map extent around a pass, as south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

/// A mountain pass with the computed profile of each usable path.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    record: PassRecord,
    profiles: BTreeMap<usize, PathProfile>,
    summaries: BTreeMap<usize, PathSummary>,
    min_distance: f64,
    max_distance: f64,
    min_elevation: f64,
    max_elevation: f64,
}

impl Pass {
    /// Builds a pass from a raw stored record.
    ///
    /// # Errors
    ///
    /// Returns [`PassError::MalformedRecord`] if the record does not have
    /// the shape of a [`PassRecord`].
    pub fn from_value(
        value: &serde_json::Value,
        provider: &dyn TraceProvider,
        palette: &SteepnessPalette,
    ) -> Result<Self, PassError> {
        let record = parse_record(value)?;
        Ok(Self::from_record(record, provider, palette))
    }

    /// Builds a pass, fetching and profiling the trace of every path.
    #[must_use]
    pub fn from_record(
        record: PassRecord,
        provider: &dyn TraceProvider,
        palette: &SteepnessPalette,
    ) -> Self {
        let mut profiles = BTreeMap::new();

        for (&index, path) in &record.gpts {
            let payload = match provider.fetch(path) {
                Ok(payload) => payload,
                Err(e) => {
                    log::warn!("{}: path {index} ({}) has no trace: {e}", record.name, path.name);
                    continue;
                }
            };

            match pass_finder_profile::profile_from_payload(&payload, palette) {
                Some(profile) => {
                    profiles.insert(index, profile);
                }
                None => {
                    log::warn!(
                        "{}: path {index} ({}) has no usable profile",
                        record.name,
                        path.name
                    );
                }
            }
        }

        Self::assemble(record, profiles)
    }

    /// A copy of this pass restricted to the paths in `indices`.
    ///
    /// Per-path totals and pass-level extrema are recomputed from the
    /// kept paths, and the record's path table is narrowed to match.
    /// Indices that do not exist on this pass are ignored.
    #[must_use]
    pub fn reduced(&self, indices: &[usize]) -> Self {
        let mut record = self.record.clone();
        record.gpts.retain(|index, _| indices.contains(index));

        let profiles = self
            .profiles
            .iter()
            .filter(|(index, _)| indices.contains(index))
            .map(|(&index, profile)| (index, profile.clone()))
            .collect();

        Self::assemble(record, profiles)
    }

    fn assemble(record: PassRecord, profiles: BTreeMap<usize, PathProfile>) -> Self {
        let summaries: BTreeMap<usize, PathSummary> = profiles
            .iter()
            .filter_map(|(&index, profile)| {
                let path = record.gpts.get(&index)?;
                Some((index, summarize(index, path, profile)))
            })
            .collect();

        let (min_distance, max_distance) = extrema(summaries.values().map(|s| s.distance_km));
        let (min_elevation, max_elevation) = extrema(summaries.values().map(|s| s.elevation_m));

        log::debug!(
            "{}: {} of {} paths profiled, distance {min_distance:.1}-{max_distance:.1} km",
            record.name,
            profiles.len(),
            record.gpts.len()
        );

        Self {
            record,
            profiles,
            summaries,
            min_distance,
            max_distance,
            min_elevation,
            max_elevation,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.record.alt_name()
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.record.country
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.record.region
    }

    /// Summit coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        self.record.coord
    }

    /// Summit height in meters.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.record.height
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.record.url
    }

    /// The stored record this pass was built from (narrowed to the kept
    /// paths for a reduced pass).
    #[must_use]
    pub const fn record(&self) -> &PassRecord {
        &self.record
    }

    /// Profiles keyed by path index. Paths without a usable trace are
    /// absent.
    #[must_use]
    pub const fn profiles(&self) -> &BTreeMap<usize, PathProfile> {
        &self.profiles
    }

    #[must_use]
    pub fn profile(&self, index: usize) -> Option<&PathProfile> {
        self.profiles.get(&index)
    }

    /// Indices of stored paths that have no profile.
    #[must_use]
    pub fn absent_paths(&self) -> Vec<usize> {
        self.record
            .gpts
            .keys()
            .copied()
            .filter(|index| !self.profiles.contains_key(index))
            .collect()
    }

    /// Number of profiled paths.
    #[must_use]
    pub fn num_paths(&self) -> usize {
        self.profiles.len()
    }

    /// Direction labels of the profiled paths, in index order.
    ///
    /// Paths listed in the record but without a profile are left out, so
    /// the labels line up with [`Self::total_distance`] and the other
    /// per-path series. Their indices are in [`Self::absent_paths`], and
    /// every label is still reachable through [`Self::record`].
    pub fn path_names(&self) -> Vec<&str> {
        self.summaries.values().map(|s| s.name.as_str()).collect()
    }

    /// Per-path summaries, in index order.
    pub fn path_summaries(&self) -> impl Iterator<Item = &PathSummary> {
        self.summaries.values()
    }

    #[must_use]
    pub fn path_summary(&self, index: usize) -> Option<&PathSummary> {
        self.summaries.get(&index)
    }

    /// Length of each profiled path in km, in index order.
    #[must_use]
    pub fn total_distance(&self) -> Vec<f64> {
        self.summaries.values().map(|s| s.distance_km).collect()
    }

    /// Elevation gain of each profiled path in meters, in index order.
    #[must_use]
    pub fn total_elevation(&self) -> Vec<f64> {
        self.summaries.values().map(|s| s.elevation_m).collect()
    }

    /// Average gradient of each profiled path in percent, in index order.
    #[must_use]
    pub fn avg_grad(&self) -> Vec<f64> {
        self.summaries.values().map(|s| s.avg_grad).collect()
    }

    /// Shortest path length in km (0 without profiled paths).
    #[must_use]
    pub const fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Longest path length in km (0 without profiled paths).
    #[must_use]
    pub const fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Smallest elevation gain in meters.
    #[must_use]
    pub const fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    /// Largest elevation gain in meters.
    #[must_use]
    pub const fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// A pass is valid when at least one path has a positive length.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.max_distance > 0.0
    }

    /// Start coordinate of each profiled path, in index order.
    #[must_use]
    pub fn starts_from(&self) -> Vec<Coordinate> {
        self.profiles.values().filter_map(PathProfile::start).collect()
    }

    /// A map extent centred on the summit that reaches the path start
    /// farthest from it.
    ///
    /// Returns `None` without profiled paths.
    #[must_use]
    pub fn map_bound(&self) -> Option<MapBounds> {
        let summit = self.coord();
        let summit_point = Point::new(summit.lon, summit.lat);

        let farthest = self.starts_from().into_iter().max_by(|a, b| {
            let da = Haversine.distance(summit_point, Point::new(a.lon, a.lat));
            let db = Haversine.distance(summit_point, Point::new(b.lon, b.lat));
            da.total_cmp(&db)
        })?;

        let d_lat = (summit.lat - farthest.lat).abs();
        let d_lon = (summit.lon - farthest.lon).abs();

        Some(MapBounds {
            south_west: Coordinate::new(summit.lat - d_lat, summit.lon - d_lon),
            north_east: Coordinate::new(summit.lat + d_lat, summit.lon + d_lon),
        })
    }

    /// Indices of profiled paths between `low` and `high` km long
    /// (inclusive).
    #[must_use]
    pub fn paths_with_distance(&self, low: f64, high: f64) -> Vec<usize> {
        if self.max_distance < low || self.min_distance > high {
            return Vec::new();
        }
        self.summaries
            .values()
            .filter(|s| (low..=high).contains(&s.distance_km))
            .map(|s| s.index)
            .collect()
    }

    /// Indices of profiled paths gaining between `low` and `high` meters
    /// (inclusive).
    #[must_use]
    pub fn paths_with_elevation(&self, low: f64, high: f64) -> Vec<usize> {
        if self.max_elevation < low || self.min_elevation > high {
            return Vec::new();
        }
        self.summaries
            .values()
            .filter(|s| (low..=high).contains(&s.elevation_m))
            .map(|s| s.index)
            .collect()
    }
}

fn parse_record(value: &serde_json::Value) -> Result<PassRecord, PassError> {
    PassRecord::deserialize(value).map_err(|source| PassError::MalformedRecord {
        name: value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string(),
        source,
    })
}

fn summarize(index: usize, path: &PathRecord, profile: &PathProfile) -> PathSummary {
    let span = |series: &[f64]| match (series.first(), series.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };

    let distance_km = span(&profile.distance);
    let elevation_m = span(&profile.elevation);
    let avg_grad = if distance_km > 0.0 {
        elevation_m / (distance_km * 1000.0) * 100.0
    } else {
        0.0
    };

    PathSummary {
        index,
        name: path.name.clone(),
        distance_km,
        elevation_m,
        avg_grad,
        url: path.url.clone(),
    }
}

/// Minimum and maximum of `values`, or `(0, 0)` when empty.
fn extrema(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}
