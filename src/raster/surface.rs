use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::geometry::IntRect;

/// Rectangle-fill writes over a fixed-size pixel target.
///
/// The shape rasterizers only ever need this one operation; everything they
/// draw is built out of clipped 1-pixel dots and solid spans.
pub trait DrawingSurface {
    fn fill_rect(&mut self, left: i32, top: i32, width: i32, height: i32);
}

/// Owned width x height RGBA buffer, 4 bytes per pixel, row-major.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wraps raw RGBA bytes. Panics if the length does not match the size.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 4,
            "RGBA data length does not match {width}x{height}"
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Alpha channel at (x, y). Out-of-bounds reads as transparent.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[self.index(x, y) + 3]
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Color32 {
        if x >= self.width || y >= self.height {
            return Color32::TRANSPARENT;
        }
        let i = self.index(x, y);
        Color32::from_rgba_premultiplied(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Fills a rectangle with `color`, clipped to the buffer.
    pub fn fill_rect(&mut self, left: i32, top: i32, width: i32, height: i32, color: Color32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + width).min(self.width as i32);
        let y1 = (top + height).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let rgba = color.to_array();
        for y in y0..y1 {
            let row = self.index(x0 as u32, y as u32);
            for px in self.data[row..row + ((x1 - x0) as usize) * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Copies the pixels under `rect` (clipped to the buffer) into a new buffer.
    pub fn sub_buffer(&self, rect: IntRect) -> PixelBuffer {
        let mut out = PixelBuffer::new(rect.width, rect.height);
        for y in 0..rect.height {
            for x in 0..rect.width {
                let sx = rect.left + x as i32;
                let sy = rect.top + y as i32;
                if sx < 0 || sy < 0 {
                    continue;
                }
                out.set_pixel(x, y, self.pixel_at(sx as u32, sy as u32));
            }
        }
        out
    }

    /// Stamps `src` with its top-left corner at (left, top).
    ///
    /// Hard-edged compositing: source pixels with zero alpha leave the
    /// destination untouched, everything else replaces it outright.
    pub fn blit(&mut self, src: &PixelBuffer, left: i32, top: i32) {
        for y in 0..src.height {
            let dy = top + y as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for x in 0..src.width {
                let dx = left + x as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                if src.alpha_at(x, y) != 0 {
                    self.set_pixel(dx as u32, dy as u32, src.pixel_at(x, y));
                }
            }
        }
    }
}

/// Adapts a [`PixelBuffer`] to [`DrawingSurface`] with a fixed fill color,
/// the way a canvas context carries its current fill style.
pub struct PixelPainter<'a> {
    buffer: &'a mut PixelBuffer,
    color: Color32,
}

impl<'a> PixelPainter<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, color: Color32) -> Self {
        Self { buffer, color }
    }
}

impl DrawingSurface for PixelPainter<'_> {
    fn fill_rect(&mut self, left: i32, top: i32, width: i32, height: i32) {
        self.buffer.fill_rect(left, top, width, height, self.color);
    }
}
