//! Trace providers.
//!
//! Acquiring raw traces (scraping, downloading) happens outside this
//! workspace. A [`TraceProvider`] hands over whatever payload was acquired
//! for a path, or a [`TraceError`] when nothing is available.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pass_finder_pass_models::PathRecord;
use pass_finder_profile::TraceError;

/// Source of raw trace payloads.
///
/// Implementations must be `Send + Sync` so a search engine holding one
/// can be shared between threads.
pub trait TraceProvider: Send + Sync {
    /// Returns the raw payload of `path`'s trace.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError`] if the trace cannot be acquired.
    fn fetch(&self, path: &PathRecord) -> Result<String, TraceError>;
}

/// Reads traces from files named after each path's trace identifier.
#[derive(Debug, Clone)]
pub struct DirectoryTraceProvider {
    dir: PathBuf,
}

impl DirectoryTraceProvider {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `path`'s trace. Only the last segment of the trace
    /// identifier is used, so an identifier can never escape the
    /// directory.
    #[must_use]
    pub fn trace_path(&self, path: &PathRecord) -> Option<PathBuf> {
        let file_name = path
            .gpt
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")?;
        Some(self.dir.join(file_name))
    }
}

impl TraceProvider for DirectoryTraceProvider {
    fn fetch(&self, path: &PathRecord) -> Result<String, TraceError> {
        let file = self
            .trace_path(path)
            .ok_or_else(|| TraceError::Unavailable(format!("invalid trace id '{}'", path.gpt)))?;
        if !file.is_file() {
            return Err(TraceError::Unavailable(format!(
                "no trace file at {}",
                file.display()
            )));
        }
        Ok(std::fs::read_to_string(file)?)
    }
}

/// Serves traces from memory, keyed by trace identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryTraceProvider {
    traces: BTreeMap<String, String>,
}

impl MemoryTraceProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the payload for trace `id`.
    #[must_use]
    pub fn with_trace(mut self, id: impl Into<String>, payload: impl Into<String>) -> Self {
        self.insert(id, payload);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, payload: impl Into<String>) {
        self.traces.insert(id.into(), payload.into());
    }
}

impl TraceProvider for MemoryTraceProvider {
    fn fetch(&self, path: &PathRecord) -> Result<String, TraceError> {
        self.traces
            .get(&path.gpt)
            .cloned()
            .ok_or_else(|| TraceError::Unavailable(format!("no trace for '{}'", path.gpt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(gpt: &str) -> PathRecord {
        PathRecord {
            name: "from Prad".to_string(),
            url: String::new(),
            gpt: gpt.to_string(),
        }
    }

    #[test]
    fn memory_provider_serves_known_traces() {
        let provider = MemoryTraceProvider::new().with_trace("a", "[]");
        assert_eq!(provider.fetch(&path("a")).unwrap(), "[]");
        assert!(matches!(
            provider.fetch(&path("b")),
            Err(TraceError::Unavailable(_))
        ));
    }

    #[test]
    fn directory_provider_uses_last_id_segment() {
        let provider = DirectoryTraceProvider::new("/data/traces");
        assert_eq!(
            provider.trace_path(&path("https://example.org/gpt/stelvio-1.json")),
            Some(PathBuf::from("/data/traces/stelvio-1.json"))
        );
        assert_eq!(
            provider.trace_path(&path("../../etc/passwd")),
            Some(PathBuf::from("/data/traces/passwd"))
        );
        assert_eq!(provider.trace_path(&path("gpt/")), None);
    }

    #[test]
    fn directory_provider_reads_files() {
        let dir = std::env::temp_dir().join(format!("pass_finder_traces_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("t.json"), r#"["1,2,3,4"]"#).unwrap();

        let provider = DirectoryTraceProvider::new(&dir);
        assert_eq!(provider.fetch(&path("t.json")).unwrap(), r#"["1,2,3,4"]"#);
        assert!(matches!(
            provider.fetch(&path("missing.json")),
            Err(TraceError::Unavailable(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
