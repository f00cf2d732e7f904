//! Mock artwork rasterizer.
//!
//! This module provides functionality for:
//! - Describing an image to paint (`RenderSpec`, `Palette`, `ArtMode`)
//! - Painting it onto an in-memory RGB surface (`Painter`, `ArtworkPainter`)
//! - Drawing label text with a built-in bitmap font
//!
//! # Architecture
//!
//! Painting is synchronous and never fails: dimension limits are enforced
//! by the generator before a painter runs. Decorative layers draw from an
//! injected `rand::Rng`, so a seeded generator makes output reproducible.
//!
//! # Examples
//!
//! ```ignore
//! use mockimage_core::render::{ArtworkPainter, Painter, Palette, RenderSpec};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let palette = Palette::from_hex(&["#0b1220", "#0ea5e9", "#a855f7"]).unwrap();
//! let spec = RenderSpec::new(1200, 630, palette);
//! let surface = ArtworkPainter::new(StdRng::seed_from_u64(1)).paint(&spec);
//! ```

mod artwork;
mod font;
mod surface;
mod types;

pub use artwork::{label_headline, render_artwork, ArtworkPainter, Painter, LABEL_TAGLINE};
pub use font::{draw_glyph, draw_text_centered, GlyphPlacement};
pub use surface::{RasterSurface, Surface};
pub use types::{ArtMode, Palette, RenderSpec, RenderSpecError, Rgb};
