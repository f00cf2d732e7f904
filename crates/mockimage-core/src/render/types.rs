//! Core types for mock image rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for building a `RenderSpec`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderSpecError {
    /// A colour string is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// A palette needs at least one colour.
    #[error("Palette must contain at least one colour")]
    EmptyPalette,
}

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style hex colour (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    ///
    /// An alpha component is accepted and ignored; palettes are opaque and
    /// translucency is applied per drawing operation.
    pub fn from_hex(input: &str) -> Result<Self, RenderSpecError> {
        let invalid = || RenderSpecError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Linear interpolation towards `other` (`t` in 0.0..=1.0).
    #[inline]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// An ordered colour palette.
///
/// Index 0 is the gradient start, index 1 the accent, index 2 the gradient
/// end. Lookups wrap, so shorter palettes still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, RenderSpecError> {
        if colors.is_empty() {
            return Err(RenderSpecError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Build a palette from hex colour strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, RenderSpecError> {
        let colors = colors
            .iter()
            .map(|c| Rgb::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = RenderSpecError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl<const N: usize> From<[Rgb; N]> for Palette {
    /// Panics if `N` is zero.
    fn from(colors: [Rgb; N]) -> Self {
        assert!(N > 0, "palette must contain at least one colour");
        Self {
            colors: colors.to_vec(),
        }
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// Decorative layer drawn between the background and the label bar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ArtMode {
    /// Random translucent rectangles and a web of faint lines.
    #[default]
    Pattern,
    /// A rotated, staggered watermark of one glyph.
    Glyph {
        glyph: String,
        /// Tiling density (1-10); higher means smaller cells.
        density: u8,
    },
}

/// Everything the rasterizer needs to paint one image.
///
/// Bounds are checked by the generator before painting; the rasterizer
/// trusts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpec {
    /// Width in pixels (1-6000)
    pub width: u32,
    /// Height in pixels (1-6000)
    pub height: u32,
    /// Decoration density (1-5)
    pub complexity: u8,
    pub palette: Palette,
    pub mode: ArtMode,
    /// Target size shown in the label bar
    pub target_kb: f64,
}

impl RenderSpec {
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            width,
            height,
            complexity: 3,
            palette,
            mode: ArtMode::Pattern,
            target_kb: 500.0,
        }
    }

    pub fn with_complexity(mut self, complexity: u8) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_mode(mut self, mode: ArtMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_target_kb(mut self, target_kb: f64) -> Self {
        self.target_kb = target_kb;
        self
    }

    /// Total pixel count, widened so oversized requests cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
