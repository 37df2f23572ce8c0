use serde::{Deserialize, Serialize};

pub mod snap;

pub use snap::{points_close, snap_delta_to_angle};

/// Integer pixel rectangle, used for trimmed content bounds and blit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl IntRect {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Smallest integer rectangle covering a float rectangle (floor min, ceil max).
    pub fn enclosing(rect: egui::Rect) -> Self {
        let left = rect.min.x.floor() as i32;
        let top = rect.min.y.floor() as i32;
        let right = rect.max.x.ceil() as i32;
        let bottom = rect.max.y.ceil() as i32;
        Self {
            left,
            top,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    pub fn to_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.left as f32, self.top as f32),
            egui::vec2(self.width as f32, self.height as f32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_rounds_outward() {
        let rect = egui::Rect::from_min_max(egui::pos2(1.2, -0.7), egui::pos2(4.1, 2.0));
        let int_rect = IntRect::enclosing(rect);
        assert_eq!(int_rect, IntRect::new(1, -1, 4, 3));
    }

    #[test]
    fn contains_is_exclusive_of_right_and_bottom() {
        let rect = IntRect::new(2, 3, 4, 2);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 4));
        assert!(!rect.contains(6, 4));
        assert!(!rect.contains(5, 5));
    }
}
