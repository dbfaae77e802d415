//! Generation of the eleven rungs of a ramp.

use rgb::{RGB, RGB8};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::color::{self, Color, ColorFormats};
use crate::config::{RampConfig, Strategy};
use crate::error::Result;
use crate::shades::Shade;

/// One rung of a [`Ramp`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShadeResult {
    pub shade: Shade,
    /// The OKLCH color of the rung, always in the sRGB gamut.
    pub color: Color,
    pub rgb: RGB8,
    /// `#RRGGBB`
    pub hex: String,
    /// `oklch(L% C H)`
    pub oklch: String,
    /// `hsl(h, s%, l%)`
    pub hsl: String,
    /// Whether this is the rung the base color was classified into.
    pub is_base: bool,
}

impl ShadeResult {
    fn new(shade: Shade, color: Color, rgb: RGB<f64>, is_base: bool) -> Self {
        ShadeResult { shade, color,
                      rgb: color::to_rgb8(rgb),
                      hex: color::format_hex(rgb),
                      oklch: color::format_oklch(color),
                      hsl: color::format_hsl(rgb),
                      is_base }
    }
}

/// The rungs 50, 100,…, 950 generated from a base color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ramp {
    base: Color,
    base_shade: Shade,
    shades: Vec<ShadeResult>, // Invariant: one per shade, in label order
}

impl Ramp {
    /// The color the ramp was generated from.
    #[inline]
    pub fn base_color(&self) -> Color { self.base }

    /// The rung the base color was classified into.
    #[inline]
    pub fn base_shade(&self) -> Shade { self.base_shade }

    /// The rung flagged as the base.
    #[inline]
    pub fn base(&self) -> &ShadeResult { self.get(self.base_shade) }

    #[inline]
    pub fn get(&self, shade: Shade) -> &ShadeResult { &self.shades[shade.index()] }

    /// Always 11.
    #[inline]
    pub fn len(&self) -> usize { self.shades.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.shades.is_empty() }

    /// The rungs from the lightest to the darkest.
    pub fn iter(&self) -> std::slice::Iter<'_, ShadeResult> { self.shades.iter() }

    /// The base color in every notation.
    pub fn describe_base(&self) -> ColorFormats { ColorFormats::of(self.base) }
}

impl<'a> IntoIterator for &'a Ramp {
    type Item = &'a ShadeResult;
    type IntoIter = std::slice::Iter<'a, ShadeResult>;

    fn into_iter(self) -> Self::IntoIter { self.shades.iter() }
}

/// Bound on the number of chroma reductions of [`RampGenerator::repair_gamut`].
pub const MAX_REPAIR_STEPS: f64 = 10_000.;

/// Generates ramps according to a [`RampConfig`].
#[derive(Clone, Copy, Debug)]
pub struct RampGenerator<'a> {
    config: &'a RampConfig,
}

impl Default for RampGenerator<'static> {
    fn default() -> Self { RampGenerator::new(RampConfig::standard()) }
}

impl<'a> RampGenerator<'a> {
    pub fn new(config: &'a RampConfig) -> Self { RampGenerator { config } }

    #[inline]
    pub fn config(&self) -> &'a RampConfig { self.config }

    /// Parse `hex` and generate its ramp.
    ///
    /// # Example
    ///
    /// ```
    /// use oklch_shades::{RampGenerator, Shade};
    /// let ramp = RampGenerator::default().generate_from_hex("#3B82F6").unwrap();
    /// assert_eq!(ramp.len(), 11);
    /// assert_eq!(ramp.base().hex, "#3B82F6");
    /// assert!(RampGenerator::default().generate_from_hex("blue").is_err());
    /// ```
    pub fn generate_from_hex(&self, hex: &str) -> Result<Ramp> {
        let rgb = color::parse_rgb(hex)?;
        let base = Color::from_rgb8(rgb);
        let hsl_l = color::hsl_lightness(color::from_rgb8(rgb));
        Ok(self.generate(base.l, base.c, base.h, hsl_l))
    }

    /// Generate the ramp of the OKLCH color (`base_lightness`,
    /// `base_chroma`, `base_hue`) whose HSL lightness, in \[0, 1\], is
    /// `base_hsl_lightness`, which must not be NaN.
    pub fn generate(&self, base_lightness: f64, base_chroma: f64,
                    base_hue: f64, base_hsl_lightness: f64) -> Ramp {
        let base = Color::new(base_lightness, base_chroma, base_hue);
        let base_shade = self.nearest_shade(base_hsl_lightness);
        let shades = match self.config.strategy {
            Strategy::Anchored => self.anchored(base, base_shade),
            Strategy::Weighted => self.weighted(base, base_shade),
        };
        Ramp { base, base_shade, shades }
    }

    /// The rung whose reference HSL lightness is the closest to
    /// `hsl_lightness` ∈ \[0, 1\].
    pub fn nearest_shade(&self, hsl_lightness: f64) -> Shade {
        self.config.steps.nearest_by_hsl(100. * hsl_lightness)
    }

    /// The chroma of the most colorful rung of the ramp of `base`
    /// anchored at `base_shade`.
    pub fn peak_chroma(&self, base: Color, base_shade: Shade) -> f64 {
        let ratio = self.config.steps[base_shade].chroma_ratio;
        (base.c / ratio).min(self.config.chroma_cap(base.h))
    }

    fn anchored(&self, base: Color, base_shade: Shade) -> Vec<ShadeResult> {
        let config = self.config;
        let cap = config.chroma_cap(base.h);
        let yellow = config.yellow.contains(base.h);
        let peak = self.peak_chroma(base, base_shade);
        let base_ref = config.steps[base_shade];
        debug!(%base, %base_shade, peak, yellow, "anchored ramp");
        Shade::ALL.iter().map(|&shade| {
            if shade == base_shade {
                return ShadeResult::new(shade, base, color::to_rgb_clamped(base),
                                        true)
            }
            let reference = config.steps[shade];
            let distance = shade.distance(base_shade) as f64;
            let weight = (1. - distance / config.transition_window).max(0.);
            let mut l = reference.lightness;
            let mut c = peak * reference.chroma_ratio;
            if yellow && shade.label() >= 500 {
                let t = (shade.label() - 500) as f64 / 900.;
                c *= 1. - t * config.yellow.darkening;
            }
            if weight > 0. {
                let expected = reference.lightness - base_ref.lightness;
                let actual = base.l - base_ref.lightness;
                l += (actual - expected) * weight;
                c = c * (1. - weight) + base.c.min(cap) * weight;
            }
            let (color, rgb) = self.repair_gamut(Color::new(l, c, base.h));
            ShadeResult::new(shade, color, rgb, false)
        }).collect()
    }

    fn weighted(&self, base: Color, base_shade: Shade) -> Vec<ShadeResult> {
        let config = self.config;
        let w = config.saturation.weight(base.c);
        let scale = config.saturation.scale(base.c);
        debug!(%base, %base_shade, weight = w, scale, "weighted ramp");
        let lerp = |desaturated: f64, saturated: f64| {
            desaturated + (saturated - desaturated) * w };
        Shade::ALL.iter().map(|&shade| {
            let r = config.weighted[shade];
            let l = lerp(r.desaturated_lightness, r.saturated_lightness);
            let c = lerp(r.desaturated_chroma, r.saturated_chroma) * scale;
            let (color, rgb) = self.repair_gamut(Color::new(l, c, base.h));
            ShadeResult::new(shade, color, rgb, shade == base_shade)
        }).collect()
    }

    /// Lower the chroma of `target` by steps of
    /// [`RampConfig::gamut_step`] until it fits in the sRGB gamut.
    /// When even the gray of that lightness does not fit, the
    /// lightness is clamped into \[0, 1\].  At most
    /// [`MAX_REPAIR_STEPS`] steps (give or take rounding) are taken.
    pub fn repair_gamut(&self, target: Color) -> (Color, RGB<f64>) {
        let step = self.config.gamut_step.max(target.c / MAX_REPAIR_STEPS);
        let mut color = target;
        loop {
            if let Some(rgb) = color::to_rgb_gamut_checked(color) {
                return (color, rgb)
            }
            if color.c <= 0. { break }
            color = color.with_chroma(color.c - step);
            trace!(chroma = color.c, "out of gamut, lowering chroma");
        }
        let gray = Color::new(color.l.clamp(0., 1.), 0., color.h);
        warn!(%target, %gray, "no displayable chroma, falling back to gray");
        (gray, color::to_rgb_clamped(gray))
    }
}

/// Generate a ramp with the [standard configuration](RampConfig::standard).
///
/// ```
/// use oklch_shades::{generate_shades, Shade};
/// // #FF0000
/// let ramp = generate_shades(0.628, 0.2577, 29.23, 0.5);
/// assert_eq!(ramp.base_shade(), Shade::S500);
/// assert_eq!(ramp.iter().filter(|s| s.is_base).count(), 1);
/// ```
pub fn generate_shades(base_lightness: f64, base_chroma: f64, base_hue: f64,
                       base_hsl_lightness: f64) -> Ramp {
    RampGenerator::default().generate(base_lightness, base_chroma, base_hue,
                                      base_hsl_lightness)
}
