//! Procedural mock artwork.
//!
//! Layers, bottom to top:
//! 1. Diagonal linear gradient (palette 0 to palette 2)
//! 2. Radial accent (palette 1, 80% opacity, fading out)
//! 3. Decorative layer: random rectangles and lines, or a glyph watermark
//! 4. Faint dot grid
//! 5. Centred label bar with the dimensions and target size

use rand::Rng;

use super::font::{draw_glyph, draw_text_centered, GlyphPlacement};
use super::surface::{RasterSurface, Surface};
use super::types::{ArtMode, Palette, RenderSpec, Rgb};

/// Second line of the label bar.
pub const LABEL_TAGLINE: &str = "MOCK IMAGE • DEV HERO";

/// Produces a painted surface for a `RenderSpec`.
pub trait Painter {
    type Surface: RasterSurface;

    /// Paint a surface of exactly `spec.width` x `spec.height`.
    ///
    /// Callers validate bounds first; painters trust their input.
    fn paint(&mut self, spec: &RenderSpec) -> Self::Surface;
}

/// The default painter, driven by an injected random source.
///
/// Seed it with `StdRng::seed_from_u64` for reproducible output.
#[derive(Debug, Clone)]
pub struct ArtworkPainter<R> {
    rng: R,
}

impl<R: Rng> ArtworkPainter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Painter for ArtworkPainter<R> {
    type Surface = Surface;

    fn paint(&mut self, spec: &RenderSpec) -> Surface {
        render_artwork(spec, &mut self.rng)
    }
}

/// Render the full artwork for `spec`.
pub fn render_artwork<R: Rng + ?Sized>(spec: &RenderSpec, rng: &mut R) -> Surface {
    let mut surface = Surface::new(spec.width, spec.height);

    paint_background(&mut surface, &spec.palette);
    paint_accent(&mut surface, &spec.palette);
    match &spec.mode {
        ArtMode::Pattern => paint_pattern(&mut surface, spec, rng),
        ArtMode::Glyph { glyph, density } => {
            paint_watermark(&mut surface, &spec.palette, glyph, *density, rng)
        }
    }
    paint_grid(&mut surface);
    paint_label(&mut surface, spec);

    surface
}

fn paint_background(surface: &mut Surface, palette: &Palette) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    let start = palette.color(0);
    let end = palette.color(2);

    // Project onto the (0,0)-(w,h) diagonal.
    let len_sq = (w * w + h * h).max(1.0);
    surface.shade(|x, y, _| {
        let t = ((x as f32 + 0.5) * w + (y as f32 + 0.5) * h) / len_sq;
        start.lerp(end, t)
    });
}

fn paint_accent(surface: &mut Surface, palette: &Palette) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    let accent = palette.color(1);
    let (cx, cy) = (w * 0.25, h * 0.25);
    let radius = w.max(h) * 0.6;

    surface.shade(|x, y, under| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
        under.lerp(accent, 0.8 * (1.0 - t))
    });
}

/// Opacity bytes for pattern rectangles.
const RECT_ALPHA: std::ops::Range<u8> = 20..60;

fn rect_alpha<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(RECT_ALPHA) as f32 / 255.0
}

fn paint_pattern<R: Rng + ?Sized>(surface: &mut Surface, spec: &RenderSpec, rng: &mut R) {
    let (w, h) = (spec.width as f32, spec.height as f32);
    let complexity = spec.complexity as usize;

    let rect_count = 12 + complexity * 8;
    for _ in 0..rect_count {
        let color = spec.palette.color(rng.gen_range(0..3));
        let alpha = rect_alpha(rng);
        let rw = rng.gen::<f32>() * w * 0.4;
        let rh = rng.gen::<f32>() * h * 0.4;
        let x = rng.gen::<f32>() * w;
        let y = rng.gen::<f32>() * h;
        surface.fill_rect(x, y, rw, rh, color, alpha);
    }

    let line_count = 60 + complexity * 35;
    for _ in 0..line_count {
        let from = (rng.gen::<f32>() * w, rng.gen::<f32>() * h);
        let to = (rng.gen::<f32>() * w, rng.gen::<f32>() * h);
        surface.draw_line(from, to, Rgb::WHITE, 0.06);
    }
}

fn paint_watermark<R: Rng + ?Sized>(
    surface: &mut Surface,
    palette: &Palette,
    glyph: &str,
    density: u8,
    rng: &mut R,
) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    let density = density.max(1) as f32;
    let cell = (w / (density * 2.0)).max(60.0);
    let ch = glyph.chars().next().unwrap_or('*');
    let color = palette.color(1);

    let mut x = 0.0;
    while x <= w + cell {
        let mut y = 0.0;
        let mut row = 0usize;
        while y <= h + cell {
            let offset = if row % 2 == 0 { 0.0 } else { cell / 2.0 };
            let placement = GlyphPlacement {
                center: (x + offset, y),
                size: cell * 0.5,
                rotation: -std::f32::consts::FRAC_PI_8,
            };
            let alpha = 0.15 + rng.gen::<f32>() * 0.2;
            draw_glyph(surface, ch, placement, color, alpha);

            y += cell;
            row += 1;
        }
        x += cell;
    }
}

fn paint_grid(surface: &mut Surface) {
    let (w, h) = (surface.width(), surface.height());
    let step = (w.min(h) as f32 / 20.0).max(32.0);

    let mut x = 0.0f32;
    while x < w as f32 {
        let mut y = 0.0f32;
        while y < h as f32 {
            surface.blend_pixel(x as i64, y as i64, Rgb::WHITE, 0.04);
            y += step;
        }
        x += step;
    }
}

/// Text of the first label line.
pub fn label_headline(spec: &RenderSpec) -> String {
    format!("{} × {} PX ({} KB)", spec.width, spec.height, spec.target_kb)
}

fn paint_label(surface: &mut Surface, spec: &RenderSpec) {
    let (w, h) = (spec.width as f32, spec.height as f32);
    let font_size = (w.min(h) * 0.08).max(18.0);
    let box_height = font_size * 2.8;

    surface.fill_rect(0.0, h / 2.0 - box_height / 2.0, w, box_height, Rgb::BLACK, 0.7);

    draw_text_centered(
        surface,
        &label_headline(spec),
        (w / 2.0, h / 2.0 - font_size * 0.2),
        font_size * 0.9,
        0.0,
        Rgb::WHITE,
        1.0,
    );
    draw_text_centered(
        surface,
        LABEL_TAGLINE,
        (w / 2.0, h / 2.0 + font_size * 0.65),
        font_size * 0.35,
        4.0,
        spec.palette.color(1),
        1.0,
    );
}
