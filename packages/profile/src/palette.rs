//! The built-in steepness palette.
//!
//! The 41 colours ship as `palette.toml`, embedded at compile time. A table
//! of the same shape read with [`parse_palette_toml`] replaces it, which is
//! how the CLI applies the `palette_path` setting.

use std::sync::LazyLock;

use pass_finder_profile_models::SteepnessPalette;

const PALETTE_TOML: &str = include_str!("../palette.toml");

static DEFAULT_PALETTE: LazyLock<SteepnessPalette> = LazyLock::new(|| {
    parse_palette_toml(PALETTE_TOML).unwrap_or_else(|e| panic!("Failed to parse palette.toml: {e}"))
});

/// Parses a palette table of the form `colors = ["#rrggbb", ...]`.
///
/// # Errors
///
/// Returns a [`toml::de::Error`] if the TOML is malformed, a colour is not
/// `#rrggbb`, or the table does not hold exactly 41 colours.
pub fn parse_palette_toml(toml_str: &str) -> Result<SteepnessPalette, toml::de::Error> {
    toml::de::from_str(toml_str)
}

/// The built-in palette.
///
/// # Panics
///
/// Panics if the embedded `palette.toml` is malformed (a build-time
/// asset, covered by tests).
#[must_use]
pub fn default_palette() -> &'static SteepnessPalette {
    &DEFAULT_PALETTE
}
