use egui::{Pos2, Vec2};

/// True if the two points are within `threshold` of each other on both axes.
pub fn points_close(a: Pos2, b: Pos2, threshold: f32) -> bool {
    let x_dist = (a.x - b.x).abs();
    let y_dist = (a.y - b.y).abs();
    x_dist < threshold && y_dist < threshold
}

/// Projects `delta` onto the nearest multiple of `snap_angle` radians.
///
/// Used for axis-locked dragging: the returned vector points along the
/// quantized direction with the length of `delta`'s projection onto it.
pub fn snap_delta_to_angle(delta: Vec2, snap_angle: f32) -> Vec2 {
    let angle = delta.y.atan2(delta.x);
    let angle = (angle / snap_angle).round() * snap_angle;
    let dir_x = angle.cos();
    let dir_y = angle.sin();
    let d = (dir_x * delta.x) + (dir_y * delta.y);
    Vec2::new(dir_x * d, dir_y * d)
}
