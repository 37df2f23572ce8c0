//! Bitmap brush: stamps a hard-edged brush mark along the dragged path.

use egui::{Color32, Pos2};
use log::debug;

use crate::context::EditorContext;
use crate::raster::{PixelBuffer, brush_mark, for_each_line_point};
use crate::update::{ImageUpdate, UpdateSignal};

pub struct BrushTool {
    size: f32,
    color: Color32,
    on_update_image: UpdateSignal,
    /// Mark rendered once per gesture at mouse-down.
    mark: Option<PixelBuffer>,
    last_point: Option<Pos2>,
    touched: bool,
}

impl std::fmt::Debug for BrushTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrushTool")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("touched", &self.touched)
            .finish_non_exhaustive()
    }
}

impl BrushTool {
    pub fn new(size: f32, color: Color32, on_update_image: impl FnMut(&ImageUpdate) + 'static) -> Self {
        Self {
            size,
            color,
            on_update_image: Box::new(on_update_image),
            mark: None,
            last_point: None,
            touched: false,
        }
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn on_mouse_down(&mut self, point: Pos2, ctx: &mut EditorContext) {
        let mark = brush_mark(self.size, self.color);
        if mark.width() > 0 {
            stamp(&mark, point, &mut ctx.bitmap);
            self.touched = true;
        }
        self.mark = Some(mark);
        self.last_point = Some(point);
    }

    pub fn on_mouse_drag(&mut self, point: Pos2, ctx: &mut EditorContext) {
        let (Some(mark), Some(last)) = (&self.mark, self.last_point) else {
            return;
        };
        if mark.width() > 0 {
            for_each_line_point(last, point, |x, y| {
                stamp_at(mark, x, y, &mut ctx.bitmap);
            });
            self.touched = true;
        }
        self.last_point = Some(point);
    }

    pub fn on_mouse_up(&mut self, ctx: &mut EditorContext) {
        if self.touched {
            debug!("brush stroke committed");
            (self.on_update_image)(&ImageUpdate::bitmap(&ctx.bitmap));
        }
        self.mark = None;
        self.last_point = None;
        self.touched = false;
    }
}

fn stamp(mark: &PixelBuffer, point: Pos2, target: &mut PixelBuffer) {
    stamp_at(mark, point.x as i32, point.y as i32, target);
}

fn stamp_at(mark: &PixelBuffer, x: i32, y: i32, target: &mut PixelBuffer) {
    let half = (mark.width() / 2) as i32;
    target.blit(mark, x - half, y - half);
}
