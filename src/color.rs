//! Conversions between hexadecimal sRGB, OKLCH and HSL together with
//! the textual forms displayed next to each swatch.
//!
//! All color-space arithmetic is delegated to the [`palette`] crate;
//! this module only decides what “in gamut” means and how results
//! are printed.

use std::fmt;
use palette::{FromColor, Hsl, Oklch, Srgb, encoding};
use palette::convert::FromColorUnclamped;
use rgb::{RGB, RGB8};
use serde::Serialize;

use crate::error::{Error, Result};

/// Below this chroma a color is considered achromatic and its hue is
/// reported as 0.
pub(crate) const ACHROMATIC: f64 = 1e-4;

/// How far (in \[0, 1\] units) an sRGB channel may stray outside of
/// \[0, 1\] and still be considered displayable.
const GAMUT_TOLERANCE: f64 = 1e-4;

/// A color in the OKLCH space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    /// Lightness, 0 is black and 1 is white.
    pub l: f64,
    /// Chroma, ≥ 0.  Displayable colors rarely exceed 0.37.
    pub c: f64,
    /// Hue in degrees, in \[0, 360\[.
    pub h: f64,
}

impl Color {
    /// Create a color.  Negative chromas are raised to 0 and the hue
    /// is wrapped into \[0, 360\[.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Color { l, c: c.max(0.), h: h.rem_euclid(360.) }
    }

    /// Same lightness and hue, another chroma.
    #[inline]
    pub fn with_chroma(self, c: f64) -> Self { Color::new(self.l, c, self.h) }

    /// Convert an 8 bit sRGB color.
    pub fn from_rgb8(rgb: RGB8) -> Self {
        let srgb = Srgb::<u8>::new(rgb.r, rgb.g, rgb.b).into_format::<f64>();
        let lch = Oklch::<f64>::from_color(srgb);
        if lch.chroma < ACHROMATIC {
            Color::new(lch.l, 0., 0.)
        } else {
            Color::new(lch.l, lch.chroma, lch.hue.into_positive_degrees())
        }
    }

    /// sRGB coordinates in \[0, 1\] when in gamut, possibly outside
    /// otherwise.
    fn to_srgb_unclamped(self) -> Srgb<f64> {
        Srgb::<f64>::from_color_unclamped(Oklch::<f64>::new(self.l, self.c, self.h))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_oklch(*self))
    }
}

/// Parse `#RRGGBB` (or `#RGB`, the `#` being optional) as an 8 bit
/// sRGB color.
pub fn parse_rgb(hex: &str) -> Result<RGB8> {
    let srgb: Srgb<u8> = hex.trim().parse()
        .map_err(|_| Error::InvalidColor(hex.to_string()))?;
    Ok(RGB8 { r: srgb.red, g: srgb.green, b: srgb.blue })
}

/// Parse a hexadecimal color into OKLCH coordinates.
///
/// # Example
///
/// ```
/// use oklch_shades::parse_hex;
/// let red = parse_hex("#FF0000").unwrap();
/// assert!((red.l - 0.628).abs() < 1e-3);
/// assert!(parse_hex("not-a-color").is_err());
/// ```
pub fn parse_hex(hex: &str) -> Result<Color> {
    parse_rgb(hex).map(Color::from_rgb8)
}

/// Map `color` to sRGB (channels in \[0, 255\]).  Returns `None` when
/// `color` lies outside of the sRGB gamut.
pub fn to_rgb_gamut_checked(color: Color) -> Option<RGB<f64>> {
    let srgb = color.to_srgb_unclamped();
    let inside = |x: f64| {
        (-GAMUT_TOLERANCE ..= 1. + GAMUT_TOLERANCE).contains(&x) };
    if inside(srgb.red) && inside(srgb.green) && inside(srgb.blue) {
        Some(scale(srgb))
    } else {
        None
    }
}

/// Map `color` to sRGB, clamping the channels into the gamut.
pub fn to_rgb_clamped(color: Color) -> RGB<f64> {
    scale(color.to_srgb_unclamped())
}

fn scale(srgb: Srgb<f64>) -> RGB<f64> {
    RGB { r: 255. * srgb.red.clamp(0., 1.),
          g: 255. * srgb.green.clamp(0., 1.),
          b: 255. * srgb.blue.clamp(0., 1.) }
}

/// Round a color with channels in \[0, 255\] to 8 bits.
pub fn to_rgb8(rgb: RGB<f64>) -> RGB8 {
    let q = |x: f64| x.round().clamp(0., 255.) as u8;
    RGB8 { r: q(rgb.r), g: q(rgb.g), b: q(rgb.b) }
}

/// Widen an 8 bit color to channels in \[0, 255\].
pub fn from_rgb8(rgb: RGB8) -> RGB<f64> {
    RGB { r: rgb.r as f64, g: rgb.g as f64, b: rgb.b as f64 }
}

/// Format as `#RRGGBB`.  An absent color is formatted as black.
///
/// ```
/// use oklch_shades::format_hex;
/// use rgb::RGB;
/// assert_eq!(format_hex(RGB::new(255., 127.6, 0.)), "#FF8000");
/// assert_eq!(format_hex(None), "#000000");
/// ```
pub fn format_hex(rgb: impl Into<Option<RGB<f64>>>) -> String {
    match rgb.into() {
        Some(rgb) => {
            let RGB8 { r, g, b } = to_rgb8(rgb);
            format!("#{r:02X}{g:02X}{b:02X}")
        }
        None => "#000000".to_string(),
    }
}

fn to_hsl(rgb: RGB<f64>) -> Hsl<encoding::Srgb, f64> {
    let srgb = Srgb::<f64>::new(rgb.r / 255., rgb.g / 255., rgb.b / 255.);
    Hsl::<encoding::Srgb, f64>::from_color(srgb)
}

/// HSL lightness in \[0, 1\] of a color with channels in \[0, 255\].
pub fn hsl_lightness(rgb: RGB<f64>) -> f64 { to_hsl(rgb).lightness }

/// Format as `hsl(h, s%, l%)`, components rounded to 2 decimals.
pub fn format_hsl(rgb: RGB<f64>) -> String {
    let hsl = to_hsl(rgb);
    // `+ 0.` turns -0 into 0.
    let fixup = |x: f64| (x * 100.).round() / 100. + 0.;
    let h = if hsl.saturation < ACHROMATIC { 0. }
            else { hsl.hue.into_positive_degrees() };
    format!("hsl({}, {}%, {}%)",
            fixup(h) % 360., fixup(100. * hsl.saturation),
            fixup(100. * hsl.lightness))
}

/// Format as `oklch(L% C H)` with the lightness to 1 decimal, the
/// chroma to 3 decimals and the hue to the nearest degree.
pub fn format_oklch(color: Color) -> String {
    format!("oklch({:.1}% {:.3} {})", 100. * color.l, color.c, color.h.round())
}

/// The base color written in every notation shown to users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorFormats {
    /// The 8 bit color, `#RRGGBB`.
    pub hex: String,
    /// The color after the trip through OKLCH, `#RRGGBB`.
    pub rgb: String,
    pub hsl: String,
    /// `oklch(L% C H)` with an integral lightness percentage.
    pub oklch: String,
}

impl ColorFormats {
    /// Describe the color written `hex`.
    pub fn describe(hex: &str) -> Result<Self> {
        let rgb8 = parse_rgb(hex)?;
        let mut formats = Self::of(Color::from_rgb8(rgb8));
        formats.hex = format_hex(from_rgb8(rgb8));
        Ok(formats)
    }

    /// Describe an OKLCH color (clamped into the sRGB gamut).
    pub fn of(color: Color) -> Self {
        let rgb = to_rgb_clamped(color);
        ColorFormats {
            hex: format_hex(rgb),
            rgb: format_hex(rgb),
            hsl: format_hsl(rgb),
            oklch: format!("oklch({:.0}% {:.3} {})",
                           100. * color.l, color.c, color.h.round()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_red() {
        let red = parse_hex("#FF0000").unwrap();
        assert!((red.l - 0.628).abs() < 1e-3, "{red:?}");
        assert!((red.c - 0.2577).abs() < 1e-3, "{red:?}");
        assert!((red.h - 29.23).abs() < 0.1, "{red:?}");
    }

    #[test]
    fn parse_accepts_missing_hash_and_lowercase() {
        assert_eq!(parse_rgb("00ff1e").unwrap(), RGB8::new(0, 255, 30));
        assert_eq!(parse_rgb(" #00FF1E ").unwrap(), RGB8::new(0, 255, 30));
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["not-a-color", "", "#12345", "#GGGGGG"] {
            assert!(matches!(parse_hex(s), Err(Error::InvalidColor(_))), "{s}");
        }
    }

    #[test]
    fn gray_is_achromatic() {
        let gray = parse_hex("#808080").unwrap();
        assert_eq!(gray.c, 0.);
        assert_eq!(gray.h, 0.);
        assert!((gray.l - 0.5999).abs() < 1e-3, "{gray:?}");
    }

    #[test]
    fn gamut_check() {
        assert!(to_rgb_gamut_checked(Color::new(0.5, 0.4, 140.)).is_none());
        assert!(to_rgb_gamut_checked(Color::new(1.2, 0., 0.)).is_none());
        let gray = to_rgb_gamut_checked(parse_hex("#808080").unwrap()).unwrap();
        assert_eq!(to_rgb8(gray), RGB8::new(128, 128, 128));
        let white = to_rgb_gamut_checked(parse_hex("#FFFFFF").unwrap()).unwrap();
        assert_eq!(format_hex(white), "#FFFFFF");
    }

    #[test]
    fn hex_survives_oklch() {
        for hex in ["#00FF1E", "#FF0000", "#123456", "#000000", "#FFFFFF"] {
            let rgb = to_rgb_clamped(parse_hex(hex).unwrap());
            assert_eq!(format_hex(rgb), hex);
        }
    }

    #[test]
    fn hsl_strings() {
        assert_eq!(format_hsl(RGB::new(255., 0., 0.)), "hsl(0, 100%, 50%)");
        assert_eq!(format_hsl(RGB::new(128., 128., 128.)), "hsl(0, 0%, 50.2%)");
        assert_eq!(format_hsl(RGB::new(0., 0., 255.)), "hsl(240, 100%, 50%)");
    }

    #[test]
    fn hsl_lightness_of_grays_and_colors() {
        assert!((hsl_lightness(RGB::new(255., 0., 0.)) - 0.5).abs() < 1e-12);
        assert!((hsl_lightness(RGB::new(128., 128., 128.)) - 128. / 255.).abs() < 1e-12);
        assert!((hsl_lightness(RGB::new(59., 130., 246.)) - (59. + 246.) / 510.).abs()
                < 1e-12);
        assert_eq!(hsl_lightness(RGB::new(255., 255., 255.)), 1.);
        assert_eq!(hsl_lightness(RGB::new(0., 0., 0.)), 0.);
    }

    #[test]
    fn oklch_strings() {
        assert_eq!(format_oklch(Color::new(0.65, 0.18, 142.)),
                   "oklch(65.0% 0.180 142)");
        assert_eq!(Color::new(0.5, 0.1, -20.).to_string(),
                   "oklch(50.0% 0.100 340)");
    }

    #[test]
    fn describe_base_color() {
        let f = ColorFormats::describe("#00ff1e").unwrap();
        assert_eq!(f.hex, "#00FF1E");
        assert_eq!(f.rgb, "#00FF1E");
        assert!(f.oklch.starts_with("oklch(87% "), "{}", f.oklch);
        assert!(ColorFormats::describe("nope").is_err());
    }
}
