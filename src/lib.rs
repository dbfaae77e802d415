//! Shade ramps for design systems.
//!
//! From a single base color, generate the eleven shades 50, 100,…,
//! 900, 950 of a perceptually uniform scale in the OKLCH color space,
//! every one of them displayable in sRGB.
//!
//! - [`palette_from_hex`] and [`generate_shades`] use the
//!   [standard configuration](RampConfig::standard).
//! - [`RampGenerator`] uses any [`RampConfig`], for example one
//!   loaded from a TOML file with [`RampConfig::load`].
//! - [`Picker`] keeps the last ramp of a color picker and hands new
//!   ones to a [`Render`]er.
//!
//! The conversions between color spaces are done by the [`palette`]
//! crate.
//!
//! # Example
//!
//! ```
//! use oklch_shades::{palette_from_hex, Shade};
//! let ramp = palette_from_hex("#FF0000").unwrap();
//! for s in &ramp {
//!     println!("{:>3} {} {} {}{}", s.shade, s.hex, s.oklch, s.hsl,
//!              if s.is_base { " ●" } else { "" });
//! }
//! assert_eq!(ramp.get(Shade::S500).hex, "#FF0000");
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod ramp;
pub mod session;
pub mod shades;

pub use color::{Color, ColorFormats, parse_hex, parse_rgb, to_rgb_gamut_checked,
                format_hex, format_hsl, format_oklch};
pub use config::{HueBand, RampConfig, SaturationWeight, Strategy};
pub use error::{ConfigError, Error, Result};
pub use ramp::{Ramp, RampGenerator, ShadeResult, generate_shades};
pub use session::{Picker, Render};
pub use shades::{Shade, ShadeTable, StepReference, WeightedStep, WeightedTable};

/// Generate the ramp of the color written `hex` with the standard
/// configuration.
#[inline]
pub fn palette_from_hex(hex: &str) -> Result<Ramp> {
    RampGenerator::default().generate_from_hex(hex)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_gives_no_ramp() {
        assert!(matches!(palette_from_hex("not-a-color"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn hex_and_coordinates_agree() {
        let c = parse_hex("#7C3AED").unwrap();
        let hsl_l = (237. + 58.) / 510.;
        assert_eq!(palette_from_hex("#7C3AED").unwrap(),
                   generate_shades(c.l, c.c, c.h, hsl_l));
    }
}
