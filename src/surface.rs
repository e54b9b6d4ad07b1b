//! Minimal render-target capability so the map core stays independent of
//! any concrete rendering backend.

use image::{Rgba, RgbaImage};

/// An abstract 2D drawable target.
///
/// The map draws exclusively through this trait, which keeps the core
/// testable with a recording mock and lets the demo pick its own backend.
pub trait Surface {
    /// Pixel dimensions of the target.
    fn size(&self) -> (u32, u32);

    /// Composite an image at the given pixel position (top-left corner).
    /// Positions may be negative or extend past the edges; out-of-target
    /// pixels are clipped.
    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32);

    /// Fill an axis-aligned rectangle with a solid color, clipped to the
    /// target.
    fn fill_rect(&mut self, color: Rgba<u8>, x: i32, y: i32, w: u32, h: u32);
}

/// A CPU-side RGBA framebuffer.
///
/// The demo draws the whole frame into one of these and uploads it as a
/// texture once per frame.
pub struct PixelSurface {
    pixels: RgbaImage,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Fill the entire buffer, typically once per frame before drawing.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
    }

    /// Raw RGBA bytes, row-major, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    fn set_blended(&mut self, x: u32, y: u32, src: Rgba<u8>) {
        // Source-over blend; fully opaque and fully transparent pixels
        // take the cheap paths.
        match src[3] {
            255 => self.pixels.put_pixel(x, y, src),
            0 => {}
            a => {
                let dst = self.pixels.get_pixel(x, y);
                let a = a as u32;
                let inv = 255 - a;
                let blend = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
                let out = Rgba([
                    blend(src[0], dst[0]),
                    blend(src[1], dst[1]),
                    blend(src[2], dst[2]),
                    (a + dst[3] as u32 * inv / 255).min(255) as u8,
                ]);
                self.pixels.put_pixel(x, y, out);
            }
        }
    }

    /// Clip a span starting at `pos` of length `len` against `[0, limit)`.
    /// Returns (start inside target, offset into source, clipped length).
    fn clip(pos: i32, len: u32, limit: u32) -> Option<(u32, u32, u32)> {
        let start = pos.max(0);
        let end = (pos + len as i32).min(limit as i32);
        if start >= end {
            return None;
        }
        Some((start as u32, (start - pos) as u32, (end - start) as u32))
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let (tw, th) = self.pixels.dimensions();
        let (iw, ih) = image.dimensions();
        let Some((dx, sx, w)) = Self::clip(x, iw, tw) else {
            return;
        };
        let Some((dy, sy, h)) = Self::clip(y, ih, th) else {
            return;
        };

        for row in 0..h {
            for col in 0..w {
                let src = *image.get_pixel(sx + col, sy + row);
                self.set_blended(dx + col, dy + row, src);
            }
        }
    }

    fn fill_rect(&mut self, color: Rgba<u8>, x: i32, y: i32, w: u32, h: u32) {
        let (tw, th) = self.pixels.dimensions();
        let Some((dx, _, w)) = Self::clip(x, w, tw) else {
            return;
        };
        let Some((dy, _, h)) = Self::clip(y, h, th) else {
            return;
        };

        for row in 0..h {
            for col in 0..w {
                self.pixels.put_pixel(dx + col, dy + row, color);
            }
        }
    }
}
