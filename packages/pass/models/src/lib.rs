#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persisted pass record types and per-path summaries.
//!
//! A [`PassRecord`] is what the record store holds for one pass: metadata
//! plus a reference to the raw trace of each path. Derived profiles are
//! never persisted; `pass_finder_pass` recomputes them from these records.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub use pass_finder_profile_models::Coordinate;

/// Metadata of one approach route to a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Direction label (e.g. "from Bormio").
    pub name: String,
    /// Page describing this climb.
    pub url: String,
    /// Trace identifier handed to the trace provider.
    pub gpt: String,
}

/// A stored pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Primary name, unique across the store.
    pub name: String,
    /// Alternative (often other-language) name.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub alt: Option<String>,
    pub country: String,
    pub region: String,
    /// Summit coordinate.
    pub coord: Coordinate,
    /// Summit height in meters.
    pub height: f64,
    pub url: String,
    /// Paths keyed by path index.
    pub gpts: BTreeMap<usize, PathRecord>,
}

impl PassRecord {
    /// The alternative name, if any.
    #[must_use]
    pub fn alt_name(&self) -> Option<&str> {
        self.alt.as_deref()
    }
}

/// Treats a missing, `null`, or blank alternative name as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Headline numbers of one path, as shown in result tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    /// Path index within its pass.
    pub index: usize,
    /// Direction label.
    pub name: String,
    /// Length in km.
    pub distance_km: f64,
    /// Elevation gain (last minus first elevation) in meters.
    pub elevation_m: f64,
    /// Average gradient in percent.
    pub avg_grad: f64,
    pub url: String,
}
