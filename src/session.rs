//! The loop between a color picker and whatever displays the ramp.

use tracing::debug;

use crate::config::RampConfig;
use crate::error::Result;
use crate::ramp::{Ramp, RampGenerator};

/// Displays ramps.
pub trait Render {
    fn render(&mut self, ramp: &Ramp);
}

impl<F: FnMut(&Ramp)> Render for F {
    #[inline]
    fn render(&mut self, ramp: &Ramp) { self(ramp) }
}

/// Keeps the ramp of the last valid color picked and hands every new
/// ramp to a [`Render`]er.
///
/// # Example
///
/// ```
/// use oklch_shades::{Picker, RampConfig, Ramp};
/// let mut shown = 0;
/// let mut picker = Picker::new(RampConfig::default(), |_: &Ramp| shown += 1);
/// picker.on_color_picked("#00FF1E").unwrap();
/// assert!(picker.on_color_picked("#00FF").is_err());
/// assert_eq!(picker.current().unwrap().base().hex, "#00FF1E");
/// drop(picker);
/// assert_eq!(shown, 1);
/// ```
pub struct Picker<R> {
    config: RampConfig,
    renderer: R,
    current: Option<Ramp>,
}

impl<R: Render> Picker<R> {
    pub fn new(config: RampConfig, renderer: R) -> Self {
        Picker { config, renderer, current: None }
    }

    /// Generate and render the ramp of `hex`.  When `hex` is not a
    /// color nothing is rendered and the previous ramp is kept.
    pub fn on_color_picked(&mut self, hex: &str) -> Result<&Ramp> {
        let ramp = match RampGenerator::new(&self.config).generate_from_hex(hex) {
            Ok(ramp) => ramp,
            Err(e) => {
                debug!(hex, "rejected color, keeping the previous ramp");
                return Err(e)
            }
        };
        self.renderer.render(&ramp);
        Ok(self.current.insert(ramp))
    }

    /// The ramp of the last valid color, if any.
    #[inline]
    pub fn current(&self) -> Option<&Ramp> { self.current.as_ref() }

    #[inline]
    pub fn config(&self) -> &RampConfig { &self.config }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R { &mut self.renderer }

    pub fn into_renderer(self) -> R { self.renderer }
}
