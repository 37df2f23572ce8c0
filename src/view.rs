//! Fixed art-board geometry and the per-editor view context.
//!
//! Vector content is authored on a 480x360 art board; the bitmap layer is
//! 960x720, twice the linear resolution. Conversion scales by 0.5 going into
//! vector space and by 2 coming out, keeping the shared center registration.

use egui::{Pos2, Rect, Vec2};

/// Vector art board size, in art-board units.
pub const ART_BOARD_SIZE: Vec2 = Vec2::new(480.0, 360.0);

/// Bitmap layer size in pixels: the art board at double resolution.
pub const BITMAP_SIZE: Vec2 = Vec2::new(960.0, 720.0);

/// Linear factor between vector and bitmap space.
pub const BITMAP_SCALE: f32 = 2.0;

/// Canvas center in vector art-board coordinates; the registration point all
/// center snapping aligns to.
pub const CENTER: Pos2 = Pos2::new(240.0, 180.0);

/// Explicit view state threaded into every component that needs coordinate
/// transforms: zoom level plus the bounds a drag may act within.
#[derive(Debug, Clone)]
pub struct ViewContext {
    zoom: f32,
    action_bounds: Rect,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewContext {
    pub fn new() -> Self {
        // Drags may run half an art board past every edge.
        let art_board = Rect::from_min_size(Pos2::ZERO, ART_BOARD_SIZE);
        Self {
            zoom: 1.0,
            action_bounds: art_board.expand2(ART_BOARD_SIZE * 0.5),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        debug_assert!(zoom > 0.0, "zoom must be positive, got {zoom}");
        self.zoom = zoom;
    }

    pub fn action_bounds(&self) -> Rect {
        self.action_bounds
    }

    /// Clamps an event point to the draggable area.
    pub fn clamp_to_action_bounds(&self, point: Pos2) -> Pos2 {
        Pos2::new(
            point.x.clamp(self.action_bounds.left(), self.action_bounds.right()),
            point.y.clamp(self.action_bounds.top(), self.action_bounds.bottom()),
        )
    }
}
