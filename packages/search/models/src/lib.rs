#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search query types and search configuration.
//!
//! This crate contains only data types. Dispatching and the record store
//! live in `pass_finder_search`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Attribute a search runs against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchType {
    /// Primary or alternative name.
    Name,
    /// Summit height in meters.
    Height,
    /// Elevation gain of a path in meters.
    Elevation,
    /// Length of a path in km.
    Distance,
    Region,
    Country,
}

impl SearchType {
    /// Every search type, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Height,
        Self::Elevation,
        Self::Distance,
        Self::Region,
        Self::Country,
    ];

    /// The kind of key this search type expects.
    #[must_use]
    pub const fn key_kind(self) -> KeyKind {
        match self {
            Self::Name | Self::Region | Self::Country => KeyKind::Text,
            Self::Height | Self::Elevation | Self::Distance => KeyKind::Range,
        }
    }

    /// Comma-separated list of every search type tag.
    #[must_use]
    pub fn valid_tags() -> String {
        Self::ALL
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

/// Shape of a search key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum KeyKind {
    /// A single string.
    Text,
    /// A two-element numeric bound.
    Range,
}

/// A search key.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchKey {
    /// A pass name, matched exactly then fuzzily.
    Name(String),
    /// A region or country, matched case-insensitively.
    Category(String),
    /// An ordered `(low, high)` numeric bound.
    Range(f64, f64),
}

impl SearchKey {
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::Name(_) | Self::Category(_) => KeyKind::Text,
            Self::Range(..) => KeyKind::Range,
        }
    }

    /// The string of a text key.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Name(s) | Self::Category(s) => Some(s),
            Self::Range(..) => None,
        }
    }

    /// The `(low, high)` bounds of a range key.
    #[must_use]
    pub const fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range(low, high) => Some((*low, *high)),
            Self::Name(_) | Self::Category(_) => None,
        }
    }

    /// Builds a range key from a slice, which must hold exactly two
    /// values.
    #[must_use]
    pub fn range_from_slice(bound: &[f64]) -> Option<Self> {
        match *bound {
            [low, high] => Some(Self::Range(low, high)),
            _ => None,
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) | Self::Category(s) => write!(f, "'{s}'"),
            Self::Range(low, high) => write!(f, "[{low}, {high}]"),
        }
    }
}

/// Stored record attribute a store query filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RecordField {
    Name,
    Alt,
    Country,
    Region,
    Height,
}

/// Search engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// JSON file holding the pass records.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Directory holding one raw trace file per path.
    #[serde(default)]
    pub trace_dir: Option<PathBuf>,

    /// TOML steepness palette replacing the built-in colours.
    #[serde(default)]
    pub palette_path: Option<PathBuf>,

    /// Maximum number of name suggestions on a failed name search.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Minimum similarity (0 to 1) for a name to be suggested.
    #[serde(default = "default_suggestion_cutoff")]
    pub suggestion_cutoff: f64,

    /// Number of histogram bins in result statistics.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

const fn default_suggestion_limit() -> usize {
    3
}

const fn default_suggestion_cutoff() -> f64 {
    0.6
}

const fn default_histogram_bins() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            trace_dir: None,
            palette_path: None,
            suggestion_limit: default_suggestion_limit(),
            suggestion_cutoff: default_suggestion_cutoff(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_search_type_tags() {
        assert_eq!(SearchType::from_str("distance").unwrap(), SearchType::Distance);
        assert_eq!(SearchType::Region.to_string(), "region");
        assert!(SearchType::from_str("altitude").is_err());
        assert_eq!(
            SearchType::valid_tags(),
            "name, height, elevation, distance, region, country"
        );
    }

    #[test]
    fn key_kinds_match_search_types() {
        assert_eq!(SearchType::Name.key_kind(), KeyKind::Text);
        assert_eq!(SearchType::Height.key_kind(), KeyKind::Range);
        assert_eq!(SearchType::Country.key_kind(), KeyKind::Text);
        assert_eq!(SearchKey::Range(1.0, 2.0).kind(), KeyKind::Range);
        assert_eq!(SearchKey::Category("Italy".into()).kind(), KeyKind::Text);
        assert_eq!(SearchKey::Name("x".into()).text(), Some("x"));
        assert_eq!(SearchKey::Range(1.0, 2.0).text(), None);
        assert_eq!(SearchKey::Range(10.0, 15.0).range(), Some((10.0, 15.0)));
        assert_eq!(SearchKey::Category("Italy".into()).range(), None);
    }

    #[test]
    fn range_needs_two_values() {
        assert_eq!(
            SearchKey::range_from_slice(&[10.0, 15.0]),
            Some(SearchKey::Range(10.0, 15.0))
        );
        assert_eq!(SearchKey::range_from_slice(&[10.0]), None);
        assert_eq!(SearchKey::range_from_slice(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: SearchConfig = toml::from_str("trace_dir = \"traces\"").unwrap();
        assert_eq!(config.trace_dir, Some(PathBuf::from("traces")));
        assert_eq!(config.store_path, None);
        assert_eq!(config.palette_path, None);
        assert_eq!(config.suggestion_limit, 3);
        assert!((config.suggestion_cutoff - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(
            toml::from_str::<SearchConfig>("").unwrap(),
            SearchConfig::default()
        );
    }
}
