#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trace, profile, and steepness palette types for climb profiles.
//!
//! This crate contains only data types and simple conversions. The
//! numerical work that turns a [`RawTrace`] into a [`PathProfile`] lives
//! in `pass_finder_profile`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of colours in a steepness palette: one per whole percent from
/// -20 % to +20 %.
pub const PALETTE_SIZE: usize = 41;

/// A WGS84 coordinate. Serialized as `[lat, lon]`, matching the stored
/// pass records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// One sample of a raw geographic trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Elevation in meters.
    pub elevation: f64,
    /// Cumulative distance from the start of the path in km.
    pub distance: f64,
}

impl TracePoint {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// An ordered, unsanitized sequence of trace samples for one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrace {
    pub points: Vec<TracePoint>,
}

impl RawTrace {
    #[must_use]
    pub const fn new(points: Vec<TracePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Errors from parsing colours or assembling a [`SteepnessPalette`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// A colour string is not of the form `#rrggbb`.
    #[error("Invalid colour '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// The palette does not hold exactly [`PALETTE_SIZE`] colours.
    #[error("Palette has {0} colours, expected {PALETTE_SIZE}")]
    WrongSize(usize),
}

/// An opaque 24-bit colour. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[r, g, b]`.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as `[r, g, b, a]` where `a` is `opacity` (0.0..=1.0) scaled
    /// to 0..=255. Map layers take colours in this form.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba(self, opacity: f64) -> [u8; 4] {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
        [self.r, self.g, self.b, alpha]
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PaletteError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = PaletteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ordered steepness colours, steepest descent first.
///
/// Index `i` is the colour for a rounded gradient of `i - 20` percent.
/// Always holds exactly [`PALETTE_SIZE`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteDef")]
pub struct SteepnessPalette {
    colors: Vec<Rgb>,
}

#[derive(Deserialize)]
struct PaletteDef {
    colors: Vec<Rgb>,
}

impl TryFrom<PaletteDef> for SteepnessPalette {
    type Error = PaletteError;

    fn try_from(def: PaletteDef) -> Result<Self, Self::Error> {
        Self::new(def.colors)
    }
}

impl SteepnessPalette {
    /// # Errors
    ///
    /// Returns [`PaletteError::WrongSize`] unless exactly
    /// [`PALETTE_SIZE`] colours are given.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.len() != PALETTE_SIZE {
            return Err(PaletteError::WrongSize(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Colour at a palette index. Indices past the end saturate to the
    /// last colour.
    #[must_use]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index.min(PALETTE_SIZE - 1)]
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// An elevation rounded outward to a clean chart bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedBound {
    /// The rounded value, `(leading + padding) * 10^(order - 1)`.
    pub bound: f64,
    /// The leading digits, `floor(num / 10^(order - 1))`.
    pub leading: f64,
    /// `floor(log10(num))`.
    pub order: i32,
}

/// The derived climb profile of one path.
///
/// All per-point series (`distance`, `elevation`, `gradient`, `track`)
/// share one index; all resampled series (`grad_bin`, `grad_interp`,
/// `elev_interp`, `grad_color`) share another.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProfile {
    /// Cumulative distance in km, non-decreasing.
    pub distance: Vec<f64>,
    /// Elevation in meters, all positive.
    pub elevation: Vec<f64>,
    /// Gradient in percent of the segment ending at each point. The
    /// first entry is always 0.
    pub gradient: Vec<f64>,
    /// Sanitized `(lat, lon)` of each point.
    pub track: Vec<Coordinate>,
    /// Resampling positions in km (50 m, 150 m, 250 m, ...).
    pub grad_bin: Vec<f64>,
    /// Gradient interpolated at each `grad_bin` position.
    pub grad_interp: Vec<f64>,
    /// Elevation interpolated at each `grad_bin` position.
    pub elev_interp: Vec<f64>,
    /// Steepness colour of each `grad_interp` value.
    pub grad_color: Vec<Rgb>,
    /// Steepest segment, capped at +30 %.
    pub grad_max: f64,
    /// Steepest descending segment, capped at -30 %.
    pub grad_min: f64,
    /// Length in km of segments with gradient in [-2, 2) %.
    pub flat_km: f64,
    /// Length in km of segments with gradient below -2 %.
    pub descend_km: f64,
    /// Lower elevation axis bound.
    pub elev_lower: f64,
    /// Upper elevation axis bound.
    pub elev_upper: f64,
}

impl PathProfile {
    /// Number of sanitized points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Where the path starts.
    #[must_use]
    pub fn start(&self) -> Option<Coordinate> {
        self.track.first().copied()
    }
}
