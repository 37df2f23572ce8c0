use crate::geometry::IntRect;

use super::surface::PixelBuffer;

fn row_blank(buffer: &PixelBuffer, y: u32) -> bool {
    (0..buffer.width()).all(|x| buffer.alpha_at(x, y) == 0)
}

fn column_blank(buffer: &PixelBuffer, x: u32, top: u32, bottom: u32) -> bool {
    (top..bottom).all(|y| buffer.alpha_at(x, y) == 0)
}

/// Smallest integer rectangle enclosing every pixel with non-zero alpha.
///
/// Shrinks from the top and bottom edges while the candidate row is fully
/// transparent, then from the left and right restricted to the surviving row
/// range. One full scan per conversion, O(width x height).
///
/// A buffer with no opaque pixel at all returns `None`; callers treat that as
/// "no content" rather than receiving a degenerate rectangle.
pub fn hit_bounds(buffer: &PixelBuffer) -> Option<IntRect> {
    let width = buffer.width();
    let height = buffer.height();

    let mut top = 0;
    let mut bottom = height;
    let mut left = 0;
    let mut right = width;

    while top < bottom && row_blank(buffer, top) {
        top += 1;
    }
    if top == bottom {
        return None;
    }
    while bottom - 1 > top && row_blank(buffer, bottom - 1) {
        bottom -= 1;
    }
    while left < right && column_blank(buffer, left, top, bottom) {
        left += 1;
    }
    while right - 1 > left && column_blank(buffer, right - 1, top, bottom) {
        right -= 1;
    }

    Some(IntRect::new(
        left as i32,
        top as i32,
        right - left,
        bottom - top,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn transparent_buffer_has_no_bounds() {
        let buffer = PixelBuffer::new(8, 8);
        assert_eq!(hit_bounds(&buffer), None);
    }

    #[test]
    fn zero_sized_buffer_has_no_bounds() {
        assert_eq!(hit_bounds(&PixelBuffer::new(0, 0)), None);
        assert_eq!(hit_bounds(&PixelBuffer::new(8, 0)), None);
        assert_eq!(hit_bounds(&PixelBuffer::new(0, 8)), None);
    }

    #[test]
    fn single_pixel_bounds() {
        let mut buffer = PixelBuffer::new(8, 8);
        buffer.set_pixel(3, 5, Color32::BLACK);
        assert_eq!(hit_bounds(&buffer), Some(IntRect::new(3, 5, 1, 1)));
    }

    #[test]
    fn corner_pixels_survive_trimming() {
        let mut buffer = PixelBuffer::new(8, 8);
        buffer.set_pixel(0, 0, Color32::BLACK);
        buffer.set_pixel(7, 7, Color32::BLACK);
        assert_eq!(hit_bounds(&buffer), Some(IntRect::new(0, 0, 8, 8)));
    }

    #[test]
    fn bounds_enclose_scattered_content() {
        let mut buffer = PixelBuffer::new(16, 16);
        buffer.set_pixel(4, 2, Color32::BLACK);
        buffer.set_pixel(12, 9, Color32::BLACK);
        buffer.set_pixel(6, 6, Color32::BLACK);
        assert_eq!(hit_bounds(&buffer), Some(IntRect::new(4, 2, 9, 8)));
    }

    #[test]
    fn opaque_buffer_keeps_full_bounds() {
        let mut buffer = PixelBuffer::new(5, 4);
        buffer.fill_rect(0, 0, 5, 4, Color32::BLACK);
        assert_eq!(hit_bounds(&buffer), Some(IntRect::new(0, 0, 5, 4)));
    }
}
