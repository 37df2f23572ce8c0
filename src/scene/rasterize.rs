//! Direct, non-anti-aliased rendering of the vector scene into pixels, and
//! the encoded payload the bitmap conversion pipeline decodes.

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::error::ExportError;
use crate::geometry::IntRect;
use crate::raster::{
    PixelBuffer, PixelPainter, RotatedEllipse, brush_mark, draw_rotated_ellipse,
    for_each_line_point,
};

use super::{ItemId, ItemKind, PathGeometry, PathShape, SceneGraph};

/// Encoded image payload produced by a vector export.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// PNG-encoded pixels rendered at bitmap resolution (2x the art board).
    pub png: Vec<u8>,
    /// Content bounds in vector art-board coordinates.
    pub bounds: IntRect,
}

/// Renders every scene item into `target`.
///
/// Point transform is `(p + offset) * scale`; painting is back to front in
/// z-order, through the same hard-edged rasterizer the bitmap tools use.
pub fn rasterize_scene(scene: &SceneGraph, scale: f32, offset: Vec2, target: &mut PixelBuffer) {
    for root in scene.root_ids() {
        rasterize_item(scene, *root, scale, offset, target);
    }
}

/// Exports the scene to an encoded payload, cropped to the content bounds
/// and rendered at bitmap (2x) resolution.
///
/// An empty scene exports nothing (`Ok(None)`). Encoding failure is an
/// [`ExportError`]; conversion must surface it, never swallow it.
pub fn export_payload(scene: &SceneGraph) -> Result<Option<ExportedImage>, ExportError> {
    let Some(bounds) = scene.content_bounds() else {
        return Ok(None);
    };
    let bounds = IntRect::enclosing(bounds);
    if bounds.width == 0 || bounds.height == 0 {
        return Ok(None);
    }

    let mut pixels = PixelBuffer::new(bounds.width * 2, bounds.height * 2);
    rasterize_scene(
        scene,
        2.0,
        Vec2::new(-bounds.left as f32, -bounds.top as f32),
        &mut pixels,
    );

    let image = image::RgbaImage::from_raw(pixels.width(), pixels.height(), pixels.data().to_vec())
        .expect("pixel buffer length matches its dimensions");
    let mut png = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;
    debug!(
        "exported scene payload: {}x{} px from bounds {:?}",
        pixels.width(),
        pixels.height(),
        bounds
    );
    Ok(Some(ExportedImage { png, bounds }))
}

fn rasterize_item(scene: &SceneGraph, id: ItemId, scale: f32, offset: Vec2, target: &mut PixelBuffer) {
    let Some(item) = scene.get(id) else {
        return;
    };
    match &item.kind {
        ItemKind::Group(group) => {
            for child in &group.children {
                rasterize_item(scene, *child, scale, offset, target);
            }
        }
        ItemKind::Path(shape) => rasterize_shape(shape, scale, offset, target),
        ItemKind::CompoundPath(shapes) => {
            for shape in shapes {
                rasterize_shape(shape, scale, offset, target);
            }
        }
        ItemKind::Raster(raster) => {
            let dst = transform_rect(raster.rect, scale, offset);
            blit_scaled(&raster.pixels, dst, target);
        }
        ItemKind::Text(text) => {
            // Text renders as a solid block; glyph rendering belongs to the
            // UI layer and never round-trips through conversion.
            let dst = transform_rect(text.bounds(), scale, offset);
            target.fill_rect(
                dst.min.x.floor() as i32,
                dst.min.y.floor() as i32,
                dst.width().ceil() as i32,
                dst.height().ceil() as i32,
                text.color,
            );
        }
    }
}

fn rasterize_shape(shape: &PathShape, scale: f32, offset: Vec2, target: &mut PixelBuffer) {
    match &shape.geometry {
        PathGeometry::Polyline { points } => {
            if points.is_empty() {
                return;
            }
            let mark = brush_mark((shape.stroke_width * scale).max(1.0), shape.color);
            let half = (mark.width() / 2) as i32;
            let mut stamp = |x: i32, y: i32| {
                target.blit(&mark, x - half, y - half);
            };
            let transformed: Vec<Pos2> = points
                .iter()
                .map(|point| transform_point(point.position, scale, offset))
                .collect();
            if transformed.len() == 1 {
                stamp(transformed[0].x as i32, transformed[0].y as i32);
                return;
            }
            for pair in transformed.windows(2) {
                for_each_line_point(pair[0], pair[1], &mut stamp);
            }
        }
        PathGeometry::Ellipse {
            center,
            radii,
            rotation,
        } => {
            let center = transform_point(*center, scale, offset);
            let mut painter = PixelPainter::new(target, shape.color);
            draw_rotated_ellipse(
                &RotatedEllipse {
                    center_x: center.x,
                    center_y: center.y,
                    radius_x: radii.x * scale,
                    radius_y: radii.y * scale,
                    rotation: *rotation,
                    is_filled: shape.filled,
                },
                &mut painter,
            );
        }
    }
}

fn transform_point(p: Pos2, scale: f32, offset: Vec2) -> Pos2 {
    Pos2::new((p.x + offset.x) * scale, (p.y + offset.y) * scale)
}

fn transform_rect(rect: Rect, scale: f32, offset: Vec2) -> Rect {
    Rect::from_min_max(
        transform_point(rect.min, scale, offset),
        transform_point(rect.max, scale, offset),
    )
}

/// Nearest-neighbor stamp of `src` into the destination rectangle.
fn blit_scaled(src: &PixelBuffer, dst: Rect, target: &mut PixelBuffer) {
    if src.width() == 0 || src.height() == 0 || !dst.is_positive() {
        return;
    }
    let x0 = dst.min.x.floor() as i32;
    let y0 = dst.min.y.floor() as i32;
    let x1 = dst.max.x.ceil() as i32;
    let y1 = dst.max.y.ceil() as i32;
    for y in y0.max(0)..y1.min(target.height() as i32) {
        for x in x0.max(0)..x1.min(target.width() as i32) {
            let u = ((x as f32 + 0.5 - dst.min.x) / dst.width() * src.width() as f32) as i32;
            let v = ((y as f32 + 0.5 - dst.min.y) / dst.height() * src.height() as f32) as i32;
            let u = u.clamp(0, src.width() as i32 - 1) as u32;
            let v = v.clamp(0, src.height() as i32 - 1) as u32;
            if src.alpha_at(u, v) != 0 {
                target.set_pixel(x as u32, y as u32, src.pixel_at(u, v));
            }
        }
    }
}
