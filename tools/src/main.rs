// Derive the reference table of the anchored ramp from known scales.
//
//   cargo run -- reference_scales.toml shades.toml
//
// then use the result with `oklch-shades --config shades.toml`.  The
// input lists, for each scale, the hexadecimal colors of the rungs 50
// to 950.

use std::{collections::BTreeMap,
          env,
          fs::{self, File},
          io::{BufWriter, prelude::*},
          error::Error};
use oklch_shades::{parse_hex, Color, ShadeTable};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Scales {
    scales: BTreeMap<String, Vec<String>>,
}

fn parse_scale(name: &str, hexes: &[String]) -> Result<[Color; 11], Box<dyn Error>> {
    let colors = hexes.iter().map(|h| parse_hex(h))
        .collect::<Result<Vec<_>, _>>()?;
    let n = colors.len();
    colors.try_into().map_err(|_| {
        format!("oklch-shades-tools: scale “{name}” has {n} colors, \
                 expected 11").into() })
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "reference_scales.toml".into());
    let output = args.next().unwrap_or_else(|| "shades.toml".into());

    let scales: Scales = toml::from_str(&fs::read_to_string(&input)?)?;
    let colors = scales.scales.iter()
        .map(|(name, hexes)| parse_scale(name, hexes))
        .collect::<Result<Vec<_>, _>>()?;
    let table = ShadeTable::from_reference_scales(&colors)?;

    let mut fh = BufWriter::new(File::create(&output)?);
    writeln!(fh, "# Written by {} from {input}\n\
                  # Scales: {}\n",
             env::args().next().unwrap_or_default(),
             scales.scales.keys().cloned().collect::<Vec<_>>().join(", "))?;
    for s in table.iter() {
        writeln!(fh, "[[steps]]\n\
                      shade = {}\n\
                      lightness = {:.3}\n\
                      chroma_ratio = {:.3}\n\
                      hsl_lightness = {:.1}\n",
                 s.shade, s.lightness, s.chroma_ratio, s.hsl_lightness)?;
    }
    fh.flush()?;
    Ok(())
}
