//! RGB colours and the BSP layer colour schemes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from unit-range components, truncating towards zero.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        Self::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Converts hue, saturation and value (all in `[0, 1]`) to RGB.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s == 0.0 {
            return Self::from_unit(v, v, v);
        }
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i32).rem_euclid(6) {
            0 => Self::from_unit(v, t, p),
            1 => Self::from_unit(q, v, p),
            2 => Self::from_unit(p, v, t),
            3 => Self::from_unit(p, q, v),
            4 => Self::from_unit(t, p, v),
            _ => Self::from_unit(v, p, q),
        }
    }

    /// Returns the colour with every channel inverted.
    pub fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

/// Error returned when parsing an unknown colour scheme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme `{0}` (expected base, rainbow, heatmap or blues)")]
pub struct UnknownColorScheme(pub String);

/// How output faces are coloured.
///
/// Every scheme except `Base` ignores the face's own colour and encodes its
/// position in the back-to-front order instead (0 = farthest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// The per-face base colour from shape decomposition.
    Base,
    /// Blue (far) through green and yellow to red (near).
    #[default]
    Rainbow,
    /// Blue to green to red.
    Heatmap,
    /// Shades of blue brightening towards the viewer.
    Blues,
}

impl ColorScheme {
    /// Cycles to the next scheme.
    pub fn next(self) -> Self {
        match self {
            ColorScheme::Base => ColorScheme::Rainbow,
            ColorScheme::Rainbow => ColorScheme::Heatmap,
            ColorScheme::Heatmap => ColorScheme::Blues,
            ColorScheme::Blues => ColorScheme::Base,
        }
    }

    /// Colour for the face at `layer` of `total` emitted faces.
    pub fn color(self, base: Rgb, layer: usize, total: usize) -> Rgb {
        let pos = layer as f32 / total.saturating_sub(1).max(1) as f32;
        match self {
            ColorScheme::Base => base,
            ColorScheme::Rainbow => Rgb::from_hsv((1.0 - pos) * 0.8, 0.9, 0.9),
            ColorScheme::Heatmap => {
                if pos < 0.5 {
                    let ratio = pos * 2.0;
                    Rgb::from_unit(0.0, ratio, 1.0 - ratio)
                } else {
                    let ratio = (pos - 0.5) * 2.0;
                    Rgb::from_unit(ratio, 1.0 - ratio, 0.0)
                }
            }
            ColorScheme::Blues => Rgb::new(
                (pos * 50.0) as u8,
                (pos * 200.0) as u8,
                (180.0 + pos * 75.0) as u8,
            ),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorScheme::Base => "base",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Heatmap => "heatmap",
            ColorScheme::Blues => "blues",
        })
    }
}

impl FromStr for ColorScheme {
    type Err = UnknownColorScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(ColorScheme::Base),
            "rainbow" => Ok(ColorScheme::Rainbow),
            "heatmap" => Ok(ColorScheme::Heatmap),
            "blues" => Ok(ColorScheme::Blues),
            _ => Err(UnknownColorScheme(s.to_string())),
        }
    }
}
