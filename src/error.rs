//! Errors raised by this crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::shades::Shade;

/// Errors of the color adapter and of the [`Picker`](crate::Picker).
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a hexadecimal sRGB color.
    #[error("not a color: “{0}”")]
    InvalidColor(String),
}

/// Problems found while loading or validating a [`RampConfig`](crate::RampConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown strategy “{0}” (expected anchored or weighted)")]
    UnknownStrategy(String),

    #[error("unknown shade label {0}")]
    UnknownShade(u16),

    #[error("shade {0} is missing from the table")]
    MissingShade(Shade),

    #[error("shade {0} appears more than once in the table")]
    DuplicateShade(Shade),

    /// A numeric entry lies outside its admissible range.
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange { field: String, value: f64, expected: &'static str },

    #[error("no reference scales were given")]
    NoReferenceScales,

    #[error("reference scale {0} is achromatic, chroma ratios are undefined")]
    AchromaticScale(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
