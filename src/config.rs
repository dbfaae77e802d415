//! Tuning constants and reference tables of the generator.
//!
//! Every field has a default, so a TOML file only needs to list what
//! it changes:
//!
//! ```toml
//! strategy = "anchored"
//! gamut_step = 0.005
//!
//! [yellow]
//! chroma_cap = 0.28
//! ```

use std::{fmt, fs, path::Path, str::FromStr};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::shades::{self, ensure, ShadeTable, WeightedTable};

/// How the rungs are derived from the base color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Rescale the reference chroma curve so that the rung closest to
    /// the base color reproduces it exactly, and blend its neighbors
    /// toward it.
    #[default]
    Anchored,
    /// Interpolate between saturated and desaturated reference
    /// tables according to the chroma of the base color.  The base
    /// color itself does not appear in the ramp.
    Weighted,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchored" => Ok(Strategy::Anchored),
            "weighted" => Ok(Strategy::Weighted),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Strategy::Anchored => "anchored",
                                 Strategy::Weighted => "weighted" })
    }
}

/// Hues (in degrees) whose chroma must be tamed.  Yellows reach their
/// maximal chroma at high lightness and turn olive or reddish when
/// darkened at full chroma.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueBand {
    pub start: f64,
    pub end: f64,
    /// Replaces [`RampConfig::chroma_cap`] inside the band.
    pub chroma_cap: f64,
    /// Chroma of the rungs 500 to 950 is multiplied by
    /// `1 - (label - 500) / 900 * darkening`.
    pub darkening: f64,
}

impl Default for HueBand {
    fn default() -> Self {
        HueBand { start: 70., end: 95., chroma_cap: 0.30, darkening: 0.3 }
    }
}

impl HueBand {
    #[inline]
    pub fn contains(&self, hue: f64) -> bool {
        (self.start ..= self.end).contains(&hue)
    }
}

/// Parameters of [`Strategy::Weighted`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationWeight {
    /// Colors with a chroma at most this are fully desaturated.
    pub min_chroma: f64,
    /// Colors with a chroma at least this are fully saturated.  Also
    /// the chroma for which the reference chromas are used unscaled.
    pub max_chroma: f64,
    /// Upper bound on the scaling of the reference chromas.
    pub max_scale: f64,
}

impl Default for SaturationWeight {
    fn default() -> Self {
        SaturationWeight { min_chroma: 0.03, max_chroma: 0.15, max_scale: 1.2 }
    }
}

impl SaturationWeight {
    /// How saturated a color of chroma `c` is, in \[0, 1\].
    pub fn weight(&self, c: f64) -> f64 {
        if c <= self.min_chroma { 0. }
        else if c >= self.max_chroma { 1. }
        else { (c - self.min_chroma) / (self.max_chroma - self.min_chroma) }
    }

    /// Factor applied to the reference chromas for a color of chroma `c`.
    pub fn scale(&self, c: f64) -> f64 { (c / self.max_chroma).min(self.max_scale) }
}

/// Everything the generator needs to know besides the base color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampConfig {
    pub strategy: Strategy,
    /// Highest chroma a ramp may peak at (outside of [`Self::yellow`]).
    pub chroma_cap: f64,
    /// Rungs closer than this (in label units) to the base rung are
    /// blended toward the base color.
    pub transition_window: f64,
    /// Chroma removed at each step while bringing a color into the
    /// sRGB gamut.
    pub gamut_step: f64,
    pub yellow: HueBand,
    pub saturation: SaturationWeight,
    pub steps: ShadeTable,
    pub weighted: WeightedTable,
}

lazy_static! {
    static ref STANDARD: RampConfig = RampConfig {
        strategy: Strategy::Anchored,
        chroma_cap: 0.40,
        transition_window: 200.,
        gamut_step: 0.01,
        yellow: HueBand::default(),
        saturation: SaturationWeight::default(),
        steps: shades::STEPS.clone(),
        weighted: shades::WEIGHTED.clone(),
    };
}

impl Default for RampConfig {
    fn default() -> Self { STANDARD.clone() }
}

impl RampConfig {
    /// The default configuration, built once.
    pub fn standard() -> &'static RampConfig { &STANDARD }

    /// Parse and validate a TOML configuration.  Missing fields take
    /// their default value.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: RampConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the TOML configuration file `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| {
            ConfigError::Io { path: path.to_path_buf(), source } })?;
        let config = Self::from_toml_str(&s)?;
        tracing::debug!(path = %path.display(), strategy = %config.strategy,
                        "loaded ramp configuration");
        Ok(config)
    }

    /// Write the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the scalar parameters.  The tables check themselves when
    /// they are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use std::ops::Bound::{Excluded, Included, Unbounded};
        let positive = (Excluded(0.), Unbounded);
        // No displayable color has a chroma above 0.37.
        let cap = (Excluded(0.), Included(0.5));
        ensure("chroma_cap", self.chroma_cap, cap, "in ]0, 0.5]")?;
        ensure("transition_window", self.transition_window, positive, "> 0")?;
        ensure("gamut_step", self.gamut_step, 1e-4 ..= 0.5, "in [1e-4, 0.5]")?;
        let y = &self.yellow;
        ensure("yellow.start", y.start, 0. ..= 360., "in [0, 360]")?;
        ensure("yellow.end", y.end, y.start ..= 360., "in [yellow.start, 360]")?;
        ensure("yellow.chroma_cap", y.chroma_cap, cap, "in ]0, 0.5]")?;
        ensure("yellow.darkening", y.darkening, 0. ..= 1., "in [0, 1]")?;
        let s = &self.saturation;
        ensure("saturation.min_chroma", s.min_chroma, 0. .., ">= 0")?;
        ensure("saturation.max_chroma", s.max_chroma,
               (Excluded(s.min_chroma), Unbounded), "> saturation.min_chroma")?;
        ensure("saturation.max_scale", s.max_scale, positive, "> 0")?;
        Ok(())
    }

    /// The highest chroma a ramp of hue `hue` may peak at.
    pub fn chroma_cap(&self, hue: f64) -> f64 {
        if self.yellow.contains(hue) { self.yellow.chroma_cap }
        else { self.chroma_cap }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::shades::Shade;
    use std::io::Write;

    #[test]
    fn standard_is_valid() {
        RampConfig::standard().validate().unwrap();
        assert_eq!(RampConfig::default(), *RampConfig::standard());
    }

    #[test]
    fn caps() {
        let c = RampConfig::standard();
        assert_eq!(c.chroma_cap(80.), 0.30);
        assert_eq!(c.chroma_cap(70.), 0.30);
        assert_eq!(c.chroma_cap(95.), 0.30);
        assert_eq!(c.chroma_cap(29.), 0.40);
        assert_eq!(c.chroma_cap(250.), 0.40);
    }

    #[test]
    fn saturation_weight() {
        let s = SaturationWeight::default();
        assert_eq!(s.weight(0.01), 0.);
        assert_eq!(s.weight(0.2), 1.);
        assert!((s.weight(0.09) - 0.5).abs() < 1e-12);
        assert_eq!(s.scale(0.3), 1.2);
        assert!((s.scale(0.075) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn partial_toml() {
        let c = RampConfig::from_toml_str(
            "strategy = \"weighted\"\n\
             gamut_step = 0.005\n\
             [yellow]\n\
             chroma_cap = 0.25\n").unwrap();
        assert_eq!(c.strategy, Strategy::Weighted);
        assert_eq!(c.gamut_step, 0.005);
        assert_eq!(c.yellow.chroma_cap, 0.25);
        assert_eq!(c.yellow.start, 70.);
        assert_eq!(c.steps, RampConfig::standard().steps);
    }

    #[test]
    fn empty_toml_is_standard() {
        assert_eq!(RampConfig::from_toml_str("").unwrap(), *RampConfig::standard());
    }

    #[test]
    fn toml_file_survives() {
        let s = RampConfig::standard().to_toml_string().unwrap();
        assert!(s.contains("[[steps]]"), "{s}");
        assert_eq!(RampConfig::from_toml_str(&s).unwrap(), *RampConfig::standard());
    }

    #[test]
    fn out_of_range() {
        match RampConfig::from_toml_str("gamut_step = 0.0") {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "gamut_step"),
            r => panic!("{r:?}"),
        }
        match RampConfig::from_toml_str("[yellow]\nstart = 100.0") {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "yellow.end"),
            r => panic!("{r:?}"),
        }
        assert!(RampConfig::from_toml_str("strategy = \"random\"").is_err());
    }

    #[test]
    fn repair_must_be_able_to_progress() {
        for (toml, field) in [("gamut_step = 1e-20", "gamut_step"),
                              ("chroma_cap = 1e6", "chroma_cap"),
                              ("[yellow]\nchroma_cap = 2.0", "yellow.chroma_cap")] {
            match RampConfig::from_toml_str(toml) {
                Err(ConfigError::OutOfRange { field: f, .. }) => assert_eq!(f, field),
                r => panic!("{toml}: {r:?}"),
            }
        }
        let c = RampConfig::from_toml_str("gamut_step = 1e-4\nchroma_cap = 0.5").unwrap();
        assert_eq!(c.gamut_step, 1e-4);
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let steps: String = Shade::ALL[.. 10].iter().map(|s| format!(
            "[[steps]]\nshade = {s}\nlightness = 0.5\nchroma_ratio = 0.5\n\
             hsl_lightness = 50.0\n")).collect();
        match RampConfig::from_toml_str(&steps) {
            Err(ConfigError::Toml(e)) =>
                assert!(e.to_string().contains("950"), "{e}"),
            r => panic!("{r:?}"),
        }
    }

    #[test]
    fn load_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "transition_window = 300.0").unwrap();
        let c = RampConfig::load(f.path()).unwrap();
        assert_eq!(c.transition_window, 300.);
        let missing = f.path().with_extension("missing");
        assert!(matches!(RampConfig::load(missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn strategy_names() {
        assert_eq!("Weighted".parse::<Strategy>().unwrap(), Strategy::Weighted);
        assert_eq!(Strategy::Anchored.to_string(), "anchored");
        assert!("other".parse::<Strategy>().is_err());
    }
}
