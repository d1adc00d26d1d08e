//! Series colors
//!
//! Colors are drawn fresh for every chart build. Hues advance by the golden
//! angle from a random start so neighbouring series stay distinguishable;
//! saturation and lightness jitter slightly. Seed the palette for
//! reproducible output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GOLDEN_ANGLE: f64 = 137.507_764;

/// Fill and line color of one series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesColor {
    pub background: String,
    pub border: String,
}

/// Color generator for multi-series charts
pub struct Palette {
    rng: StdRng,
}

impl Palette {
    /// Reproducible palette
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Palette seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw `count` colors
    pub fn colors(&mut self, count: usize) -> Vec<SeriesColor> {
        let start = self.rng.gen_range(0.0..360.0);

        (0..count)
            .map(|i| {
                let hue = (start + i as f64 * GOLDEN_ANGLE) % 360.0;
                let saturation = self.rng.gen_range(0.55..0.85);
                let lightness = self.rng.gen_range(0.45..0.60);
                let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);

                SeriesColor {
                    background: format!("rgba({}, {}, {}, 0.4)", r, g, b),
                    border: format!("rgba({}, {}, {}, 1)", r, g, b),
                }
            })
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// HSL (hue in degrees, saturation and lightness in 0..=1) to 8-bit RGB
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}
