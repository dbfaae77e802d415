use std::{fmt, ops::{Bound, Index}};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A rung of the ramp.  The eleven rungs are ordered from the
/// lightest ([`Shade::S50`]) to the darkest ([`Shade::S950`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
         Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Shade {
    S50, S100, S200, S300, S400, S500, S600, S700, S800, S900, S950,
}

impl Shade {
    /// All rungs in ascending label order.
    pub const ALL: [Shade; 11] = [
        Shade::S50, Shade::S100, Shade::S200, Shade::S300, Shade::S400,
        Shade::S500, Shade::S600, Shade::S700, Shade::S800, Shade::S900,
        Shade::S950];

    /// The label of the rung, 50, 100,…, 900, 950.
    pub const fn label(self) -> u16 {
        use Shade::*;
        match self {
            S50 => 50, S100 => 100, S200 => 200, S300 => 300, S400 => 400,
            S500 => 500, S600 => 600, S700 => 700, S800 => 800, S900 => 900,
            S950 => 950,
        }
    }

    /// Position of the rung in [`Shade::ALL`].
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Distance between two rungs, in label units (500 and 700 are
    /// 200 apart).
    #[inline]
    pub fn distance(self, other: Shade) -> u16 {
        self.label().abs_diff(other.label())
    }
}

impl TryFrom<u16> for Shade {
    type Error = ConfigError;

    fn try_from(label: u16) -> Result<Self, Self::Error> {
        Shade::ALL.into_iter().find(|s| s.label() == label)
            .ok_or(ConfigError::UnknownShade(label))
    }
}

impl From<Shade> for u16 {
    #[inline]
    fn from(s: Shade) -> u16 { s.label() }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.label(), f)
    }
}


/// Something attached to a single rung.
pub(crate) trait Rung {
    fn shade(&self) -> Shade;
}

/// Reorder `rows` by shade, checking that every shade appears
/// exactly once.
fn by_shade<T: Rung>(rows: Vec<T>) -> Result<Vec<T>, ConfigError> {
    let mut slots: Vec<Option<T>> = Shade::ALL.iter().map(|_| None).collect();
    for row in rows {
        let shade = row.shade();
        let slot = &mut slots[shade.index()];
        if slot.is_some() { return Err(ConfigError::DuplicateShade(shade)) }
        *slot = Some(row);
    }
    slots.into_iter().zip(Shade::ALL)
        .map(|(row, shade)| row.ok_or(ConfigError::MissingShade(shade)))
        .collect()
}

/// Fails unless `value` is a finite number in `range`.
pub(crate) fn ensure(field: impl fmt::Display, value: f64,
                     range: impl std::ops::RangeBounds<f64>,
                     expected: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field: field.to_string(), value, expected })
    }
}


/// Reference values of one rung for the anchored ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReference {
    pub shade: Shade,
    /// OKLCH lightness expected at this rung, in \[0, 1\].
    pub lightness: f64,
    /// Fraction of the ramp's peak chroma expected at this rung.
    pub chroma_ratio: f64,
    /// HSL lightness (in percent) used to classify the input color.
    pub hsl_lightness: f64,
}

impl Rung for StepReference {
    fn shade(&self) -> Shade { self.shade }
}

/// Reference values of the eleven rungs, one [`StepReference`] each.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StepReference>", into = "Vec<StepReference>")]
pub struct ShadeTable {
    pub(crate) steps: Vec<StepReference>, // Invariant: ordered by shade, len 11
}

impl TryFrom<Vec<StepReference>> for ShadeTable {
    type Error = ConfigError;

    fn try_from(rows: Vec<StepReference>) -> Result<Self, Self::Error> {
        let steps = by_shade(rows)?;
        for s in &steps {
            ensure(format_args!("steps.{}.lightness", s.shade),
                   s.lightness, 0. ..= 1., "in [0, 1]")?;
            // The ratio of the base rung divides its chroma.
            ensure(format_args!("steps.{}.chroma_ratio", s.shade),
                   s.chroma_ratio, (Bound::Excluded(0.), Bound::Included(2.)),
                   "in ]0, 2]")?;
            ensure(format_args!("steps.{}.hsl_lightness", s.shade),
                   s.hsl_lightness, 0. ..= 100., "in [0, 100]")?;
        }
        Ok(ShadeTable { steps })
    }
}

impl From<ShadeTable> for Vec<StepReference> {
    fn from(t: ShadeTable) -> Self { t.steps }
}

impl Index<Shade> for ShadeTable {
    type Output = StepReference;

    #[inline]
    fn index(&self, shade: Shade) -> &StepReference { &self.steps[shade.index()] }
}

impl ShadeTable {
    /// Iterate over the rungs in ascending label order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &StepReference> {
        self.steps.iter()
    }

    /// The rung whose reference HSL lightness is the closest to
    /// `hsl_percent`.  Ties go to the lightest rung.  `hsl_percent`
    /// must not be NaN.
    pub fn nearest_by_hsl(&self, hsl_percent: f64) -> Shade {
        debug_assert!(!hsl_percent.is_nan(), "HSL lightness is NaN");
        let mut best = Shade::S50;
        let mut best_d = f64::INFINITY;
        for s in &self.steps {
            let d = (s.hsl_lightness - hsl_percent).abs();
            if d < best_d {
                best = s.shade;
                best_d = d;
            }
        }
        best
    }
}


/// Reference values of one rung for the saturation weighted ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedStep {
    pub shade: Shade,
    /// Lightness of this rung in saturated scales.
    pub saturated_lightness: f64,
    /// Lightness of this rung in desaturated (grayish) scales.
    pub desaturated_lightness: f64,
    pub saturated_chroma: f64,
    pub desaturated_chroma: f64,
}

impl Rung for WeightedStep {
    fn shade(&self) -> Shade { self.shade }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightedStep>", into = "Vec<WeightedStep>")]
pub struct WeightedTable {
    pub(crate) steps: Vec<WeightedStep>, // Invariant: ordered by shade, len 11
}

impl TryFrom<Vec<WeightedStep>> for WeightedTable {
    type Error = ConfigError;

    fn try_from(rows: Vec<WeightedStep>) -> Result<Self, Self::Error> {
        let steps = by_shade(rows)?;
        for s in &steps {
            let f = |name: &str| format!("weighted.{}.{name}", s.shade);
            ensure(f("saturated_lightness"), s.saturated_lightness,
                   0. ..= 1., "in [0, 1]")?;
            ensure(f("desaturated_lightness"), s.desaturated_lightness,
                   0. ..= 1., "in [0, 1]")?;
            ensure(f("saturated_chroma"), s.saturated_chroma,
                   0. ..= 0.5, "in [0, 0.5]")?;
            ensure(f("desaturated_chroma"), s.desaturated_chroma,
                   0. ..= 0.5, "in [0, 0.5]")?;
        }
        Ok(WeightedTable { steps })
    }
}

impl From<WeightedTable> for Vec<WeightedStep> {
    fn from(t: WeightedTable) -> Self { t.steps }
}

impl Index<Shade> for WeightedTable {
    type Output = WeightedStep;

    #[inline]
    fn index(&self, shade: Shade) -> &WeightedStep { &self.steps[shade.index()] }
}
