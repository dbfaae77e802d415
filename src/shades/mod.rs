//! The eleven rungs of a ramp and their reference tables.
//!
//! The default tables are averages measured on popular design-system
//! scales; [`ShadeTable::from_reference_scales`] recomputes such a
//! table from other scales.

use lazy_static::lazy_static;

pub(crate) mod ty;
pub use ty::{Shade, ShadeTable, StepReference, WeightedStep, WeightedTable};
pub(crate) use ty::ensure;

use crate::color::{self, Color};
use crate::error::ConfigError;

fn step(shade: Shade, lightness: f64, chroma_ratio: f64,
        hsl_lightness: f64) -> StepReference {
    StepReference { shade, lightness, chroma_ratio, hsl_lightness }
}

fn weighted(shade: Shade, saturated: (f64, f64),
            desaturated: (f64, f64)) -> WeightedStep {
    WeightedStep { shade,
                   saturated_lightness: saturated.0,
                   saturated_chroma: saturated.1,
                   desaturated_lightness: desaturated.0,
                   desaturated_chroma: desaturated.1 }
}

lazy_static! {
    /// Reference rungs of the anchored ramp.  Chroma peaks at 600.
    pub(crate) static ref STEPS: ShadeTable = {
        use Shade::*;
        ShadeTable { steps: vec![
            step(S50,  0.971, 0.0625, 97.),
            step(S100, 0.936, 0.146,  93.),
            step(S200, 0.885, 0.292,  86.),
            step(S300, 0.808, 0.5,    77.),
            step(S400, 0.704, 0.792,  65.),
            step(S500, 0.637, 0.958,  53.),
            step(S600, 0.577, 1.,     45.),
            step(S700, 0.505, 0.875,  38.),
            step(S800, 0.444, 0.75,   31.),
            step(S900, 0.396, 0.583,  25.),
            step(S950, 0.258, 0.375,  15.),
        ]}
    };

    /// (lightness, chroma) of saturated and desaturated scales.
    pub(crate) static ref WEIGHTED: WeightedTable = {
        use Shade::*;
        WeightedTable { steps: vec![
            weighted(S50,  (0.971, 0.015), (0.985, 0.002)),
            weighted(S100, (0.936, 0.035), (0.968, 0.004)),
            weighted(S200, (0.885, 0.070), (0.925, 0.006)),
            weighted(S300, (0.808, 0.120), (0.870, 0.010)),
            weighted(S400, (0.704, 0.190), (0.707, 0.020)),
            weighted(S500, (0.637, 0.230), (0.553, 0.025)),
            weighted(S600, (0.577, 0.240), (0.443, 0.020)),
            weighted(S700, (0.505, 0.210), (0.372, 0.015)),
            weighted(S800, (0.444, 0.180), (0.275, 0.010)),
            weighted(S900, (0.396, 0.140), (0.210, 0.005)),
            weighted(S950, (0.258, 0.090), (0.140, 0.002)),
        ]}
    };
}

impl ShadeTable {
    /// Average reference values over `scales`, each listing the
    /// colors of the rungs 50 to 950.  Chroma ratios are taken with
    /// respect to the most chromatic color of each scale.
    ///
    /// # Example
    ///
    /// ```
    /// use oklch_shades::{parse_hex, Shade, ShadeTable};
    /// let red = ["#FEF2F2", "#FEE2E2", "#FECACA", "#FCA5A5", "#F87171",
    ///            "#EF4444", "#DC2626", "#B91C1C", "#991B1B", "#7F1D1D",
    ///            "#450A0A"].map(|h| parse_hex(h).unwrap());
    /// let table = ShadeTable::from_reference_scales(&[red]).unwrap();
    /// assert!(table[Shade::S50].lightness > table[Shade::S950].lightness);
    /// ```
    pub fn from_reference_scales(scales: &[[Color; 11]])
                                 -> Result<Self, ConfigError> {
        if scales.is_empty() { return Err(ConfigError::NoReferenceScales) }
        let n = scales.len() as f64;
        let mut steps: Vec<_> = Shade::ALL.iter()
            .map(|&s| step(s, 0., 0., 0.)).collect();
        for (k, scale) in scales.iter().enumerate() {
            let peak = scale.iter().map(|c| c.c).fold(0., f64::max);
            if peak < color::ACHROMATIC {
                return Err(ConfigError::AchromaticScale(k))
            }
            for (s, c) in steps.iter_mut().zip(scale) {
                let rgb = color::to_rgb_clamped(*c);
                s.lightness += c.l / n;
                s.chroma_ratio += c.c / peak / n;
                s.hsl_lightness += 100. * color::hsl_lightness(rgb) / n;
            }
        }
        ShadeTable::try_from(steps)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_valid() {
        let steps = ShadeTable::try_from(Vec::from(STEPS.clone())).unwrap();
        assert_eq!(steps, *STEPS);
        let w = WeightedTable::try_from(Vec::from(WEIGHTED.clone())).unwrap();
        assert_eq!(w, *WEIGHTED);
    }

    #[test]
    fn default_lightness_decreases() {
        for pair in STEPS.steps.windows(2) {
            assert!(pair[0].lightness > pair[1].lightness);
            assert!(pair[0].hsl_lightness > pair[1].hsl_lightness);
        }
    }

    #[test]
    fn labels() {
        let labels: Vec<u16> = Shade::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);
        assert_eq!(Shade::S500.distance(Shade::S700), 200);
        assert_eq!(Shade::S950.distance(Shade::S900), 50);
        assert_eq!(Shade::try_from(600).unwrap(), Shade::S600);
        assert!(matches!(Shade::try_from(650), Err(ConfigError::UnknownShade(650))));
        for (i, s) in Shade::ALL.iter().enumerate() { assert_eq!(s.index(), i) }
    }

    #[test]
    fn nearest_by_hsl() {
        assert_eq!(STEPS.nearest_by_hsl(50.), Shade::S500);
        assert_eq!(STEPS.nearest_by_hsl(100.), Shade::S50);
        assert_eq!(STEPS.nearest_by_hsl(0.), Shade::S950);
        // 95 is as close to 97 as to 93.
        assert_eq!(STEPS.nearest_by_hsl(95.), Shade::S50);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "NaN")]
    fn nearest_by_hsl_rejects_nan() {
        STEPS.nearest_by_hsl(f64::NAN);
    }

    #[test]
    fn missing_and_duplicate_shades() {
        let mut rows = Vec::from(STEPS.clone());
        rows.pop();
        assert!(matches!(ShadeTable::try_from(rows.clone()),
                         Err(ConfigError::MissingShade(Shade::S950))));
        rows.push(rows[0]);
        assert!(matches!(ShadeTable::try_from(rows),
                         Err(ConfigError::DuplicateShade(Shade::S50))));
    }

    #[test]
    fn rows_are_reordered() {
        let mut rows = Vec::from(STEPS.clone());
        rows.reverse();
        assert_eq!(ShadeTable::try_from(rows).unwrap(), *STEPS);
    }

    #[test]
    fn zero_chroma_ratio_is_rejected() {
        let mut rows = Vec::from(STEPS.clone());
        rows[3].chroma_ratio = 0.;
        match ShadeTable::try_from(rows) {
            Err(ConfigError::OutOfRange { field, .. }) =>
                assert_eq!(field, "steps.300.chroma_ratio"),
            r => panic!("{r:?}"),
        }
    }

    #[test]
    fn derive_from_scales() {
        let scale = Shade::ALL.map(|s| {
            let r = STEPS[s];
            Color::new(r.lightness, 0.1 * r.chroma_ratio, 250.) });
        let table = ShadeTable::from_reference_scales(&[scale, scale]).unwrap();
        for s in Shade::ALL {
            assert!((table[s].lightness - STEPS[s].lightness).abs() < 1e-9);
            assert!((table[s].chroma_ratio - STEPS[s].chroma_ratio).abs() < 1e-9);
        }
        for pair in table.steps.windows(2) {
            assert!(pair[0].hsl_lightness > pair[1].hsl_lightness);
        }
    }

    #[test]
    fn derive_needs_chromatic_scales() {
        assert!(matches!(ShadeTable::from_reference_scales(&[]),
                         Err(ConfigError::NoReferenceScales)));
        let gray = Shade::ALL.map(|s| Color::new(STEPS[s].lightness, 0., 0.));
        let scale = Shade::ALL.map(|s| Color::new(STEPS[s].lightness, 0.1, 0.));
        assert!(matches!(ShadeTable::from_reference_scales(&[scale, gray]),
                         Err(ConfigError::AchromaticScale(1))));
    }
}
