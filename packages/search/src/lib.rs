#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-attribute pass search.
//!
//! [`PassSearch`] validates a query, routes it to the handler for its
//! [`SearchType`], and builds the matching passes from a [`RecordStore`].
//!
//! * Name searches try the primary name, then the alternative name, and
//!   fail with closest-name suggestions.
//! * Range searches (height, distance, elevation) require `high > low`.
//!   Distance and elevation results are reduced to the matching paths.
//! * Category searches (region, country) match case-insensitively.
//!
//! An empty result is always an error, never an empty success.

mod handlers;

pub mod fuzzy;
pub mod stats;
pub mod store;

use std::str::FromStr as _;
use std::sync::Arc;

use pass_finder_pass::{Pass, PassError, ProgressCallback, TraceProvider, null_progress};
use serde_json::Value;

pub use pass_finder_profile::{SteepnessPalette, parse_palette_toml};
pub use pass_finder_search_models::{KeyKind, RecordField, SearchConfig, SearchKey, SearchType};
pub use store::{JsonRecordStore, RecordStore, StoreError};

/// Errors from a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search type tag is not one of the supported types.
    #[error("Unsupported search type '{tag}', expected one of: {valid}")]
    UnsupportedSearchType {
        tag: String,
        /// Comma-separated list of supported tags.
        valid: String,
    },

    /// The key has the wrong shape for the search type.
    #[error("Unsupported input type for {search_type} search: expected a {expected} key, got {found}")]
    UnsupportedInputType {
        search_type: SearchType,
        expected: KeyKind,
        found: KeyKind,
    },

    /// The upper bound of a range is not greater than the lower bound.
    #[error("Invalid range [{low}, {high}]: upper bound must be greater than lower bound")]
    InvalidRange { low: f64, high: f64 },

    /// No pass has this name.
    #[error("No pass named '{name}'{}", suggestion_hint(.suggestions))]
    NotFound {
        name: String,
        /// Closest names in the store, most similar first.
        suggestions: Vec<String>,
    },

    /// A non-name search found nothing.
    #[error("No pass matches {search_type} {key}")]
    NoMatch {
        search_type: SearchType,
        key: SearchKey,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Pass(#[from] PassError),
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// A read-only search engine over a record store.
pub struct PassSearch {
    store: Box<dyn RecordStore>,
    provider: Box<dyn TraceProvider>,
    palette: SteepnessPalette,
    config: SearchConfig,
    progress: Arc<dyn ProgressCallback>,
}

impl PassSearch {
    /// Creates a search engine using the default steepness palette and no
    /// progress reporting.
    #[must_use]
    pub fn new(
        store: impl RecordStore + 'static,
        provider: impl TraceProvider + 'static,
        config: SearchConfig,
    ) -> Self {
        Self {
            store: Box::new(store),
            provider: Box::new(provider),
            palette: pass_finder_profile::default_palette().clone(),
            config,
            progress: null_progress(),
        }
    }

    /// Replaces the steepness palette used for path profiles.
    #[must_use]
    pub fn with_palette(mut self, palette: SteepnessPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Reports pass construction to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches with a search type given as its tag string.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedSearchType`] for an unknown tag,
    /// otherwise as [`Self::search`].
    pub fn search_tag(&self, key: &SearchKey, tag: &str) -> Result<Vec<Pass>, SearchError> {
        let search_type =
            SearchType::from_str(tag).map_err(|_| SearchError::UnsupportedSearchType {
                tag: tag.to_string(),
                valid: SearchType::valid_tags(),
            })?;
        self.search(key, search_type)
    }

    /// Finds the passes matching `key` on the `search_type` attribute.
    ///
    /// # Errors
    ///
    /// * [`SearchError::UnsupportedInputType`] if `key` has the wrong
    ///   shape for `search_type`
    /// * [`SearchError::InvalidRange`] for a range whose upper bound is
    ///   not greater than its lower bound
    /// * [`SearchError::NotFound`] if a name search finds nothing
    /// * [`SearchError::NoMatch`] if any other search finds nothing
    /// * [`SearchError::Store`] / [`SearchError::Pass`] if the store
    ///   cannot be read or holds a malformed record
    pub fn search(
        &self,
        key: &SearchKey,
        search_type: SearchType,
    ) -> Result<Vec<Pass>, SearchError> {
        let passes = match (search_type, key) {
            (SearchType::Name, SearchKey::Name(name) | SearchKey::Category(name)) => {
                self.search_name(name)?
            }
            (SearchType::Height, &SearchKey::Range(low, high)) => self.search_height(low, high)?,
            (SearchType::Distance | SearchType::Elevation, &SearchKey::Range(low, high)) => {
                self.search_path_range(search_type, low, high)?
            }
            (
                SearchType::Region | SearchType::Country,
                SearchKey::Name(value) | SearchKey::Category(value),
            ) => self.search_category(search_type, value)?,
            _ => {
                return Err(SearchError::UnsupportedInputType {
                    search_type,
                    expected: search_type.key_kind(),
                    found: key.kind(),
                });
            }
        };

        if passes.is_empty() {
            log::info!("No pass matches {search_type} {key}");
            return Err(SearchError::NoMatch {
                search_type,
                key: key.clone(),
            });
        }

        log::info!("{} passes match {search_type} {key}", passes.len());
        Ok(passes)
    }

    /// Every primary and alternative name in the store.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if the store cannot be read.
    pub fn name_corpus(&self) -> Result<Vec<String>, SearchError> {
        Ok(self.store.name_corpus()?)
    }

    /// Builds a pass from each record, reporting progress.
    fn build_passes(&self, records: &[Value]) -> Result<Vec<Pass>, SearchError> {
        self.progress.set_total(records.len() as u64);

        let mut passes = Vec::with_capacity(records.len());
        for record in records {
            if let Some(name) = record.get("name").and_then(Value::as_str) {
                self.progress.set_message(format!("Profiling {name}"));
            }
            passes.push(Pass::from_value(record, self.provider.as_ref(), &self.palette)?);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(passes)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use pass_finder_pass::MemoryTraceProvider;
    use serde_json::json;

    use super::*;

    /// Payload of a straight climb of `km` kilometres at `grade` percent,
    /// sampled every 250 m.
    pub fn climb(km: f64, grade: f64, start_m: f64) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (km / 0.25).round() as usize;
        let samples: Vec<String> = (0..=steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let d = i as f64 * 0.25;
                let e = start_m + d * 1000.0 * grade / 100.0;
                format!("46.5,10.4,{e},{d}")
            })
            .collect();
        serde_json::to_string(&samples).unwrap()
    }

    /// Three passes:
    ///
    /// * Stilfser Joch (2757 m): 12.5 km / 1000 m and 20 km / 1200 m
    /// * Passo di Gavia (2621 m): 17 km / 1360 m
    /// * Grossglockner Hochalpenstrasse (2504 m): 25 km / 1500 m, plus a
    ///   path without a trace
    pub fn search() -> PassSearch {
        let store = JsonRecordStore::new(vec![
            json!({
                "name": "Stilfser Joch",
                "alt": "Passo dello Stelvio",
                "country": "Italy",
                "region": "Lombardei",
                "coord": [46.5286, 10.4531],
                "height": 2757,
                "url": "https://example.org/stilfser-joch",
                "gpts": {
                    "0": { "name": "from Prad", "url": "", "gpt": "prad" },
                    "1": { "name": "from Bormio", "url": "", "gpt": "bormio" }
                }
            }),
            json!({
                "name": "Passo di Gavia",
                "alt": null,
                "country": "Italy",
                "region": "Lombardei",
                "coord": [46.3428, 10.4875],
                "height": 2621,
                "url": "https://example.org/gavia",
                "gpts": {
                    "0": { "name": "from Ponte di Legno", "url": "", "gpt": "ponte" }
                }
            }),
            json!({
                "name": "Grossglockner Hochalpenstrasse",
                "alt": "",
                "country": "Austria",
                "region": "Salzburg",
                "coord": [47.0742, 12.8361],
                "height": 2504,
                "url": "https://example.org/grossglockner",
                "gpts": {
                    "0": { "name": "from Bruck", "url": "", "gpt": "bruck" },
                    "1": { "name": "from Heiligenblut", "url": "", "gpt": "missing" }
                }
            }),
        ]);

        let provider = MemoryTraceProvider::new()
            .with_trace("prad", climb(12.5, 8.0, 900.0))
            .with_trace("bormio", climb(20.0, 6.0, 1225.0))
            .with_trace("ponte", climb(17.0, 8.0, 1260.0))
            .with_trace("bruck", climb(25.0, 6.0, 750.0));

        PassSearch::new(store, provider, SearchConfig::default())
    }

    pub fn names(passes: &[Pass]) -> Vec<&str> {
        passes.iter().map(Pass::name).collect()
    }
}
