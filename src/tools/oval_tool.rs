//! Bitmap oval shape tool: drag out a box, commit the inscribed ellipse.

use egui::{Color32, Pos2, Rect};
use log::debug;

use crate::context::EditorContext;
use crate::raster::{PixelPainter, RotatedEllipse, draw_rotated_ellipse};
use crate::update::{ImageUpdate, UpdateSignal};

pub struct OvalTool {
    color: Color32,
    filled: bool,
    on_update_image: UpdateSignal,
    down_point: Option<Pos2>,
    current_point: Option<Pos2>,
}

impl std::fmt::Debug for OvalTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OvalTool")
            .field("color", &self.color)
            .field("filled", &self.filled)
            .field("down_point", &self.down_point)
            .finish_non_exhaustive()
    }
}

impl OvalTool {
    pub fn new(
        color: Color32,
        filled: bool,
        on_update_image: impl FnMut(&ImageUpdate) + 'static,
    ) -> Self {
        Self {
            color,
            filled,
            on_update_image: Box::new(on_update_image),
            down_point: None,
            current_point: None,
        }
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn on_mouse_down(&mut self, point: Pos2) {
        self.down_point = Some(point);
        self.current_point = Some(point);
    }

    pub fn on_mouse_drag(&mut self, point: Pos2) {
        if self.down_point.is_some() {
            self.current_point = Some(point);
        }
    }

    /// Commits the dragged oval to the bitmap layer. Degenerate drags (no
    /// movement on an axis) end the gesture without drawing or signaling.
    pub fn on_mouse_up(&mut self, ctx: &mut EditorContext) {
        let (Some(down), Some(current)) = (self.down_point.take(), self.current_point.take())
        else {
            return;
        };
        let rect = Rect::from_two_pos(down, current);
        let radii = rect.size() / 2.0;
        if radii.x < 1.0 || radii.y < 1.0 {
            return;
        }
        let center = rect.center();
        let mut painter = PixelPainter::new(&mut ctx.bitmap, self.color);
        draw_rotated_ellipse(
            &RotatedEllipse {
                center_x: center.x,
                center_y: center.y,
                radius_x: radii.x,
                radius_y: radii.y,
                rotation: 0.0,
                is_filled: self.filled,
            },
            &mut painter,
        );
        debug!("oval committed at {center:?}, radii {radii:?}");
        (self.on_update_image)(&ImageUpdate::bitmap(&ctx.bitmap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::hit_bounds;
    use egui::pos2;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dragged_oval_fills_its_box() {
        let updates = Rc::new(Cell::new(0));
        let counter = updates.clone();
        let mut ctx = EditorContext::new();
        let mut tool = OvalTool::new(Color32::BLACK, true, move |_| {
            counter.set(counter.get() + 1);
        });
        tool.on_mouse_down(pos2(100.0, 100.0));
        tool.on_mouse_drag(pos2(140.0, 120.0));
        tool.on_mouse_up(&mut ctx);

        let bounds = hit_bounds(&ctx.bitmap).expect("oval should paint");
        assert!(bounds.contains(120, 110));
        assert!(bounds.left >= 100 && bounds.right() <= 141);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn degenerate_drag_draws_nothing() {
        let updates = Rc::new(Cell::new(0));
        let counter = updates.clone();
        let mut ctx = EditorContext::new();
        let mut tool = OvalTool::new(Color32::BLACK, true, move |_| {
            counter.set(counter.get() + 1);
        });
        tool.on_mouse_down(pos2(100.0, 100.0));
        tool.on_mouse_drag(pos2(140.0, 100.0));
        tool.on_mouse_up(&mut ctx);
        assert!(ctx.bitmap.is_blank());
        assert_eq!(updates.get(), 0);
    }

    #[test]
    fn mouse_up_without_down_is_a_no_op() {
        let mut ctx = EditorContext::new();
        let mut tool = OvalTool::new(Color32::BLACK, true, |_| {});
        tool.on_mouse_up(&mut ctx);
        assert!(ctx.bitmap.is_blank());
    }
}
