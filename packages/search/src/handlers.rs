//! Per-search-type handlers of [`PassSearch`].

use pass_finder_pass::Pass;
use pass_finder_search_models::{RecordField, SearchType};

use crate::{PassSearch, SearchError, fuzzy};

impl PassSearch {
    /// Exact primary name, then exact alternative name. Fails with the
    /// closest names when neither matches.
    pub(crate) fn search_name(&self, name: &str) -> Result<Vec<Pass>, SearchError> {
        let mut records = self.store.find_eq(RecordField::Name, name)?;
        if records.is_empty() {
            records = self.store.find_eq(RecordField::Alt, name)?;
            if !records.is_empty() {
                log::debug!("'{name}' matched an alternative name");
            }
        }

        if records.is_empty() {
            let corpus = self.store.name_corpus()?;
            let suggestions = fuzzy::close_matches(
                name,
                &corpus,
                self.config.suggestion_limit,
                self.config.suggestion_cutoff,
            );
            log::info!("No pass named '{name}', {} suggestions", suggestions.len());
            return Err(SearchError::NotFound {
                name: name.to_string(),
                suggestions,
            });
        }

        self.build_passes(&records)
    }

    /// Passes whose summit height lies strictly between `low` and `high`.
    pub(crate) fn search_height(&self, low: f64, high: f64) -> Result<Vec<Pass>, SearchError> {
        check_range(low, high)?;
        let records = self.store.find_between(RecordField::Height, low, high)?;
        self.build_passes(&records)
    }

    /// Passes with at least one path whose length (distance) or elevation
    /// gain (elevation) lies in `[low, high]`, each reduced to those paths.
    pub(crate) fn search_path_range(
        &self,
        search_type: SearchType,
        low: f64,
        high: f64,
    ) -> Result<Vec<Pass>, SearchError> {
        check_range(low, high)?;
        let records = self.store.all()?;
        let passes = self.build_passes(&records)?;

        Ok(passes
            .iter()
            .filter_map(|pass| {
                let indices = if search_type == SearchType::Distance {
                    pass.paths_with_distance(low, high)
                } else {
                    pass.paths_with_elevation(low, high)
                };
                if indices.is_empty() {
                    return None;
                }
                log::debug!("{}: paths {indices:?} in {search_type} range", pass.name());
                Some(pass.reduced(&indices))
            })
            .collect())
    }

    /// Passes whose region or country equals `value`, ignoring case.
    pub(crate) fn search_category(
        &self,
        search_type: SearchType,
        value: &str,
    ) -> Result<Vec<Pass>, SearchError> {
        let field = if search_type == SearchType::Region {
            RecordField::Region
        } else {
            RecordField::Country
        };
        let records = self.store.find_eq_ignore_case(field, value)?;
        self.build_passes(&records)
    }
}

/// A range must be strictly increasing. NaN bounds are rejected too.
fn check_range(low: f64, high: f64) -> Result<(), SearchError> {
    if high > low {
        Ok(())
    } else {
        Err(SearchError::InvalidRange { low, high })
    }
}
