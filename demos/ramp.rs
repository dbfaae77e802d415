use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use oklch_shades::{palette_from_hex, Ramp, RampConfig, RampGenerator,
                   Strategy};
use rgb::RGB8;

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Luma of `c`, to check that lightness progresses regularly.
fn to_gray(c: RGB8) -> RGB8 {
    let x = (0.299 * c.r as f64 + 0.587 * c.g as f64 + 0.114 * c.b as f64)
        .round() as u8;
    RGB8 { r: x, g: x, b: x }
}

fn table_of_ramp(fh: &mut impl Write, ramp: &Ramp, comment: &str)
                 -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for s in ramp {
        let border = if s.is_base { "border: 3px solid black;" } else { "" };
        writeln!(fh, "  <td title=\"{} {} {}\" style=\"width: 60px; \
                      height: 40px; {border} background-color: {}\">\
                      <small>{}</small></td>",
                 s.hex, s.oklch, s.hsl, css_string(s.rgb), s.shade)?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for s in ramp {
        writeln!(fh, "  <td style=\"width: 60px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(to_gray(s.rgb)))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("ramp.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>oklch-shades: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;
    let colors = ["#00FF1E", "#FF0000", "#3B82F6", "#FACC15", "#808080",
                  "#7C3AED", "#0A3D2E", "#F97316", "#EC4899"];

    writeln!(fh, "<h3>Anchored</h3>")?;
    for hex in colors {
        table_of_ramp(&mut fh, &palette_from_hex(hex)?, hex)?;
    }

    writeln!(fh, "<h3>Saturation weighted</h3>")?;
    let weighted = RampConfig { strategy: Strategy::Weighted,
                                ..RampConfig::default() };
    let g = RampGenerator::new(&weighted);
    for hex in colors {
        table_of_ramp(&mut fh, &g.generate_from_hex(hex)?, hex)?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
