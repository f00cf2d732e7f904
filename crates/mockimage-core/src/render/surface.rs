//! In-memory RGB drawing surface.
//!
//! A deliberately small set of primitives: alpha-blended pixels, clipped
//! rectangles and one-pixel lines. Everything the artwork needs beyond that
//! (gradients, glyphs) is built on `blend_pixel`.

use super::types::Rgb;

/// Read access to a painted raster, as consumed by encoders.
pub trait RasterSurface {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// RGB pixel data in row-major order (3 bytes per pixel).
    fn rgb_pixels(&self) -> &[u8];
}

/// An owned RGB surface backed by an `image::RgbImage`.
#[derive(Debug, Clone)]
pub struct Surface {
    image: image::RgbImage,
}

impl Surface {
    /// Create a black surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: image::RgbImage::new(width, height),
        }
    }

    /// Wrap an existing `image::RgbImage`.
    pub fn from_rgb_image(image: image::RgbImage) -> Self {
        Self { image }
    }

    pub fn into_rgb_image(self) -> image::RgbImage {
        self.image
    }

    /// Read one pixel. Returns `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let [r, g, b] = self.image.get_pixel(x, y).0;
        Some(Rgb::new(r, g, b))
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some((x, y)) = self.clip(x, y) {
            self.image.put_pixel(x, y, image::Rgb([color.r, color.g, color.b]));
        }
    }

    /// Source-over blend one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let Some((x, y)) = self.clip(x, y) else {
            return;
        };
        let px = self.image.get_pixel_mut(x, y);
        let [r, g, b] = px.0;
        let under = Rgb::new(r, g, b);
        let over = under.lerp(color, alpha);
        px.0 = [over.r, over.g, over.b];
    }

    /// Blend a rectangle, clipped to the surface.
    ///
    /// Coordinates are fractional (canvas style) and snapped to the pixel
    /// grid; zero or negative extents draw nothing.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let x0 = x.round().max(0.0) as i64;
        let y0 = y.round().max(0.0) as i64;
        let x1 = ((x + w).round() as i64).min(self.width() as i64);
        let y1 = ((y + h).round() as i64).min(self.height() as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color, alpha);
            }
        }
    }

    /// Blend a one-pixel line (Bresenham).
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, alpha: f32) {
        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x0, y0, color, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Apply `shade` to every pixel; it receives coordinates and the
    /// current colour and returns the new colour.
    pub fn shade<F>(&mut self, mut shade: F)
    where
        F: FnMut(u32, u32, Rgb) -> Rgb,
    {
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let [r, g, b] = px.0;
            let out = shade(x, y, Rgb::new(r, g, b));
            px.0 = [out.r, out.g, out.b];
        }
    }

    #[inline]
    fn clip(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }
}

impl RasterSurface for Surface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn rgb_pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_new_surface_dimensions() {
        let surface = Surface::new(7, 3);
        assert_eq!(surface.width(), 7);
        assert_eq!(surface.height(), 3);
        assert_eq!(surface.rgb_pixels().len(), 7 * 3 * 3);
    }

    #[test]
    fn test_blend_full_alpha_replaces() {
        let mut surface = Surface::new(2, 2);
        surface.blend_pixel(1, 1, RED, 1.0);
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_blend_half_alpha_mixes() {
        let mut surface = Surface::new(1, 1);
        surface.blend_pixel(0, 0, Rgb::WHITE, 0.5);
        let px = surface.pixel(0, 0).unwrap();
        assert!((px.r as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut surface = Surface::new(2, 2);
        surface.blend_pixel(-1, 0, RED, 1.0);
        surface.put_pixel(2, 2, RED);
        assert!(surface.rgb_pixels().iter().all(|&v| v == 0));
        assert_eq!(surface.pixel(2, 0), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(2.0, 2.0, 10.0, 10.0, RED, 1.0);
        assert_eq!(surface.pixel(3, 3), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_fill_rect_negative_extent_draws_nothing() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(3.0, 3.0, -2.0, 1.0, RED, 1.0);
        assert!(surface.rgb_pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut surface = Surface::new(10, 10);
        surface.draw_line((0.0, 0.0), (9.0, 5.0), RED, 1.0);
        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(9, 5), Some(RED));
    }

    #[test]
    fn test_draw_line_offscreen_terminates() {
        let mut surface = Surface::new(4, 4);
        surface.draw_line((-20.0, -20.0), (30.0, 30.0), RED, 1.0);
        assert_eq!(surface.pixel(2, 2), Some(RED));
    }

    #[test]
    fn test_shade_visits_every_pixel() {
        let mut surface = Surface::new(3, 2);
        let mut count = 0;
        surface.shade(|_, _, c| {
            count += 1;
            c
        });
        assert_eq!(count, 6);
    }
}
