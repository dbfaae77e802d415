use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use oklch_shades::{Picker, Ramp, RampConfig, Render, ShadeResult, Strategy};

#[derive(Debug, Parser)]
#[command(name = "oklch-shades", version,
          about = "Generate the shades 50–950 of a color in OKLCH")]
struct Cli {
    /// Base color, #RRGGBB.  When absent, colors are read from stdin,
    /// one per line, and a ramp is printed for each valid one.
    color: Option<String>,

    /// TOML file overriding the reference tables and constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the strategy of the configuration (anchored, weighted).
    #[arg(long)]
    strategy: Option<Strategy>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Terminal background, to pick the color of the base marker.
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Swatches and their descriptions.
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Theme {
    Light,
    Dark,
}

/// Writes ramps to a terminal.  The first write error is kept for
/// the caller since [`Render`] cannot report it.
struct Terminal<W> {
    out: W,
    format: Format,
    theme: Theme,
    error: Option<io::Error>,
}

impl<W: Write> Terminal<W> {
    fn write_text(&mut self, ramp: &Ramp) -> io::Result<()> {
        let base = ramp.describe_base();
        writeln!(self.out, "base  {}  {}  {}", base.hex, base.oklch, base.hsl)?;
        for s in ramp {
            writeln!(self.out, "{:>4}  {}  {}  {}  {}",
                     s.shade, self.swatch(s), s.hex, s.oklch, s.hsl)?;
        }
        writeln!(self.out)
    }

    /// A block of the color of `s`, marked when it is the base rung.
    fn swatch(&self, s: &ShadeResult) -> String {
        let (r, g, b) = (s.rgb.r, s.rgb.g, s.rgb.b);
        let marker = if s.is_base {
            match self.theme { Theme::Dark => "\x1b[97m ● \x1b[39m",
                               Theme::Light => "\x1b[30m ● \x1b[39m" }
        } else { "   " };
        format!("\x1b[48;2;{r};{g};{b}m{marker}\x1b[0m")
    }

    fn write(&mut self, ramp: &Ramp) -> io::Result<()> {
        match self.format {
            Format::Text => self.write_text(ramp)?,
            Format::Json => {
                serde_json::to_writer_pretty(&mut self.out, ramp)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    fn check(&mut self) -> io::Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }
}

impl<W: Write> Render for Terminal<W> {
    fn render(&mut self, ramp: &Ramp) {
        if self.error.is_none() {
            self.error = self.write(ramp).err();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                         .unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RampConfig::load(path)
            .with_context(|| format!("load {}", path.display()))?,
        None => RampConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.dump_config {
        print!("{}", config.to_toml_string().context("serialize config")?);
        return Ok(())
    }

    let terminal = Terminal { out: io::stdout().lock(), format: cli.format,
                              theme: cli.theme, error: None };
    let mut picker = Picker::new(config, terminal);

    match cli.color {
        Some(color) => {
            picker.on_color_picked(&color)?;
            picker.renderer_mut().check().context("write ramp")?;
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("read stdin")?;
                let color = line.trim();
                if color.is_empty() { continue }
                if let Err(e) = picker.on_color_picked(color) {
                    tracing::warn!("{e}, keeping the previous ramp");
                }
                picker.renderer_mut().check().context("write ramp")?;
            }
        }
    }
    Ok(())
}
