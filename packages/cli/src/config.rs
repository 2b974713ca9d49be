//! Search configuration loading.
//!
//! An explicit `--config` file must exist. Without one, `pass_finder.toml`
//! in the working directory is used when present, else the defaults.
//! Command-line paths override file values.

use std::path::{Path, PathBuf};

use pass_finder_search::{SearchConfig, SteepnessPalette};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pass_finder.toml";

/// Trace directory used when neither the file nor the command line sets
/// one.
pub const DEFAULT_TRACE_DIR: &str = "traces";

/// Errors from loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid palette file {path}: {source}")]
    Palette {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No record store was configured.
    #[error("No record store configured: pass --store or set store_path in {DEFAULT_CONFIG_FILE}")]
    MissingStore,
}

/// Paths given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub store: Option<PathBuf>,
    pub traces: Option<PathBuf>,
}

/// Loads the configuration and applies command-line overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] if the config file cannot be read or parsed,
/// or no record store is configured.
pub fn load(config: Option<&Path>, overrides: Overrides) -> Result<SearchConfig, ConfigError> {
    let mut config = match config {
        Some(path) => read(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                read(path)?
            } else {
                SearchConfig::default()
            }
        }
    };

    if let Some(store) = overrides.store {
        config.store_path = Some(store);
    }
    if let Some(traces) = overrides.traces {
        config.trace_dir = Some(traces);
    }

    if config.store_path.is_none() {
        return Err(ConfigError::MissingStore);
    }
    if config.trace_dir.is_none() {
        config.trace_dir = Some(PathBuf::from(DEFAULT_TRACE_DIR));
    }

    Ok(config)
}

/// Reads the custom steepness palette named by `palette_path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or does not hold
/// exactly 41 `#rrggbb` colours.
pub fn load_palette(path: &Path) -> Result<SteepnessPalette, ConfigError> {
    let text = read_text(path)?;
    let palette =
        pass_finder_search::parse_palette_toml(&text).map_err(|source| ConfigError::Palette {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("Loaded palette from {}", path.display());
    Ok(palette)
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<SearchConfig, ConfigError> {
    let text = read_text(path)?;
    let config: SearchConfig = toml::de::from_str(&text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pass_finder_{name}_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn reads_explicit_file() {
        let path = temp_config(
            "explicit",
            "store_path = \"passes.json\"\nsuggestion_limit = 5\n",
        );
        let config = load(Some(&path), Overrides::default()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.store_path, Some(PathBuf::from("passes.json")));
        assert_eq!(config.trace_dir, Some(PathBuf::from(DEFAULT_TRACE_DIR)));
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.histogram_bins, 20);
    }

    #[test]
    fn command_line_overrides_file() {
        let path = temp_config(
            "override",
            "store_path = \"passes.json\"\ntrace_dir = \"gpt\"\n",
        );
        let config = load(
            Some(&path),
            Overrides {
                store: Some(PathBuf::from("other.json")),
                traces: None,
            },
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.store_path, Some(PathBuf::from("other.json")));
        assert_eq!(config.trace_dir, Some(PathBuf::from("gpt")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/pass_finder.toml")), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = temp_config("invalid", "suggestion_limit = \"many\"\n");
        let err = load(Some(&path), Overrides::default()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn loads_custom_palette() {
        let colors: Vec<String> = (0..41).map(|i| format!("\"#{i:02x}{i:02x}{i:02x}\"")).collect();
        let path = temp_config("palette", &format!("colors = [{}]\n", colors.join(", ")));
        let palette = load_palette(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(palette.color(40).to_string(), "#282828");

        let config = temp_config(
            "with_palette",
            "store_path = \"passes.json\"\npalette_path = \"steep.toml\"\n",
        );
        let loaded = load(Some(&config), Overrides::default()).unwrap();
        std::fs::remove_file(&config).unwrap();
        assert_eq!(loaded.palette_path, Some(PathBuf::from("steep.toml")));
    }

    #[test]
    fn short_palette_is_an_error() {
        let path = temp_config("short_palette", "colors = [\"#000000\"]\n");
        let err = load_palette(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Palette { .. }));
    }

    #[test]
    fn store_is_required() {
        let path = temp_config("nostore", "trace_dir = \"gpt\"\n");
        let err = load(Some(&path), Overrides::default()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::MissingStore));
    }
}
