//! Hard-edged ellipse rasterization.
//!
//! Ellipses are modeled implicitly as `Ax^2 + Bxy + Cy^2 = 1`, which also
//! covers sheared variants. Two critical slopes mark where the boundary's
//! derivative is +1 and -1; they split the boundary into an arc walked one
//! row at a time and an arc walked one column at a time. At each step the
//! quadratic is solved for the cross-axis coordinate and a mirrored pixel
//! pair (outline) or mirrored span (fill) is painted across both reflection
//! axes. Rotation is reduced to an equivalent shear before drawing.

use egui::Color32;

use super::surface::{DrawingSurface, PixelBuffer, PixelPainter};

/// One draw call's worth of sheared-ellipse parameters.
#[derive(Debug, Clone, Copy)]
pub struct ShearedEllipse {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Slope of the sheared x axis; 0 draws a plain ellipse.
    pub shear_slope: f32,
    pub is_filled: bool,
}

/// One draw call's worth of rotated-ellipse parameters.
#[derive(Debug, Clone, Copy)]
pub struct RotatedEllipse {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub is_filled: bool,
}

/// Both solutions of `ax^2 + bx + c = 0`, larger first.
///
/// A negative discriminant yields NaN in both slots; the walk conditions
/// below treat NaN comparisons as false and stop, which is what terminates
/// each arc at the ellipse's extent.
fn solve_quadratic(a: f64, b: f64, c: f64) -> (f64, f64) {
    let root = ((b * b) - (4.0 * a * c)).sqrt();
    let soln1 = (-b + root) / 2.0 / a;
    let soln2 = (-b - root) / 2.0 / a;
    if soln1 > soln2 {
        (soln1, soln2)
    } else {
        (soln2, soln1)
    }
}

struct ArcWalker<'s> {
    a: f64,
    b: f64,
    c: f64,
    center_x: i32,
    center_y: i32,
    is_filled: bool,
    surface: &'s mut dyn DrawingSurface,
}

impl ArcWalker<'_> {
    /// Steps one row at a time from `start_y` downward in ellipse space,
    /// painting while `keep_going(larger_x_root, y)` holds. Returns the last
    /// point painted, if any.
    fn step_vertical(
        &mut self,
        start_y: f64,
        keep_going: impl Fn(f64, f64) -> bool,
    ) -> Option<(f64, f64)> {
        let mut y = start_y;
        let mut x = solve_quadratic(self.a, self.b * y, (self.c * y * y) - 1.0);
        let mut last = None;
        while keep_going(x.0, y) {
            let p_y = y.floor();
            let p_x1 = x.0.floor();
            let p_x2 = x.1.floor();
            let span = (p_x1 - p_x2) as i32 + 1;
            if self.is_filled {
                self.surface.fill_rect(
                    self.center_x - p_x1 as i32 - 1,
                    self.center_y + p_y as i32,
                    span,
                    1,
                );
                self.surface.fill_rect(
                    self.center_x + p_x2 as i32,
                    self.center_y - p_y as i32 - 1,
                    span,
                    1,
                );
            } else {
                self.surface.fill_rect(
                    self.center_x - p_x1 as i32 - 1,
                    self.center_y + p_y as i32,
                    1,
                    1,
                );
                self.surface.fill_rect(
                    self.center_x + p_x1 as i32,
                    self.center_y - p_y as i32 - 1,
                    1,
                    1,
                );
            }
            last = Some((p_x1, p_y));
            y -= 1.0;
            x = solve_quadratic(self.a, self.b * y, (self.c * y * y) - 1.0);
        }
        last
    }

    /// Steps one column at a time from `start_x` rightward in ellipse space,
    /// painting while `keep_going(x, larger_y_root)` holds.
    fn step_horizontal(
        &mut self,
        start_x: f64,
        keep_going: impl Fn(f64, f64) -> bool,
    ) -> Option<(f64, f64)> {
        let mut x = start_x;
        let mut y = solve_quadratic(self.c, self.b * x, (self.a * x * x) - 1.0);
        let mut last = None;
        while keep_going(x, y.0) {
            let p_x = x.floor();
            let p_y1 = y.0.floor();
            let p_y2 = y.1.floor();
            let span = (p_y1 - p_y2) as i32 + 1;
            if self.is_filled {
                self.surface.fill_rect(
                    self.center_x - p_x as i32 - 1,
                    self.center_y + p_y2 as i32,
                    1,
                    span,
                );
                self.surface.fill_rect(
                    self.center_x + p_x as i32,
                    self.center_y - p_y1 as i32 - 1,
                    1,
                    span,
                );
            } else {
                self.surface.fill_rect(
                    self.center_x - p_x as i32 - 1,
                    self.center_y + p_y1 as i32,
                    1,
                    1,
                );
                self.surface.fill_rect(
                    self.center_x + p_x as i32,
                    self.center_y - p_y1 as i32 - 1,
                    1,
                    1,
                );
            }
            last = Some((p_x, p_y1));
            x += 1.0;
            y = solve_quadratic(self.c, self.b * x, (self.a * x * x) - 1.0);
        }
        last
    }
}

/// Draws a hard-edged sheared ellipse onto `surface`.
///
/// Degenerate input (non-finite slope or radii, radii that truncate to less
/// than one pixel) is a silent no-op: the call returns without painting and
/// without entering any walk loop.
pub fn draw_sheared_ellipse(ellipse: &ShearedEllipse, surface: &mut dyn DrawingSurface) {
    if !ellipse.shear_slope.is_finite()
        || !ellipse.radius_x.is_finite()
        || !ellipse.radius_y.is_finite()
    {
        return;
    }
    let center_x = (ellipse.center_x as f64).trunc() as i32;
    let center_y = (ellipse.center_y as f64).trunc() as i32;
    let radius_x = (ellipse.radius_x as f64).trunc() - 0.5;
    let radius_y = (ellipse.radius_y as f64).trunc() - 0.5;
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return;
    }
    let shear_slope = ellipse.shear_slope as f64;

    // Implicit Ax^2 + Bxy + Cy^2 = 1 coefficients of the skewed ellipse.
    let a = (1.0 / radius_x / radius_x) + (shear_slope * shear_slope / radius_y / radius_y);
    let b = -2.0 * shear_slope / radius_y / radius_y;
    let c = 1.0 / radius_y / radius_y;
    // A line with slope1 intersects the ellipse where its derivative is 1,
    // a line with slope2 where the derivative is -1.
    let slope1 = ((-2.0 * a) - b) / ((2.0 * c) + b);
    let slope2 = ((-2.0 * a) + b) / ((-2.0 * c) + b);
    let vertical_steps_first = slope1 > slope2;

    let mut walker = ArcWalker {
        a,
        b,
        c,
        center_x,
        center_y,
        is_filled: ellipse.is_filled,
        surface,
    };

    if vertical_steps_first {
        let forward_leaning = slope1 > 0.0;

        // Step vertically until the first critical slope is crossed.
        let mut last = walker.step_vertical(
            if forward_leaning { -radius_y } else { radius_y },
            |x, y| (y / x > slope1) || (forward_leaning && x == 0.0),
        );
        // Hand off: step horizontally while the boundary is flat.
        last = walker
            .step_horizontal(last.map_or(0.5, |(x, _)| -x + 0.5), |x, y| y / x > slope2)
            .or(last);
        // Step vertically back to the start to close the loop.
        if let Some((_, last_y)) = last {
            walker.step_vertical(last_y - 0.5, |_, y| {
                if forward_leaning {
                    y > -radius_y
                } else {
                    y > radius_y
                }
            });
        }
    } else {
        // Step horizontally until the second critical slope is crossed.
        let mut last = walker.step_horizontal(0.5, |x, y| y / x > slope2);
        // Hand off: step vertically while the boundary is steep.
        last = walker
            .step_vertical(last.map_or(radius_y, |(_, y)| y - 0.5), |x, y| {
                (y / x > slope1) || x == 0.0
            })
            .or(last);
        // Step horizontally back to the start to close the loop.
        if let Some((last_x, _)) = last {
            walker.step_horizontal(-last_x + 0.5, |x, y| y / x > slope2);
        }
    }
}

/// Draws a hard-edged rotated ellipse by reducing the rotation to the
/// equivalent shear and delegating to [`draw_sheared_ellipse`] exactly once.
pub fn draw_rotated_ellipse(ellipse: &RotatedEllipse, surface: &mut dyn DrawingSurface) {
    if !ellipse.radius_x.is_finite()
        || !ellipse.radius_y.is_finite()
        || !ellipse.rotation.is_finite()
    {
        return;
    }
    if ellipse.radius_x == ellipse.radius_y {
        // A circle is rotation-invariant; skip the shear solve entirely.
        draw_sheared_ellipse(
            &ShearedEllipse {
                center_x: ellipse.center_x,
                center_y: ellipse.center_y,
                radius_x: ellipse.radius_x,
                radius_y: ellipse.radius_y,
                shear_slope: 0.0,
                is_filled: ellipse.is_filled,
            },
            surface,
        );
        return;
    }
    let radius_x = ellipse.radius_x as f64;
    let radius_y = ellipse.radius_y as f64;
    let rotation = ellipse.rotation as f64;

    // Solve for the parameter angle at which the rotated ellipse reaches its
    // horizontal extent; the shear image matches that extent.
    let theta = (radius_y * -rotation.tan()).atan2(radius_x);
    let shear_dx = (radius_x * theta.cos() * rotation.cos())
        - (radius_y * theta.sin() * rotation.sin());
    let shear_dy = (radius_x * theta.cos() * rotation.sin())
        + (radius_y * theta.sin() * rotation.cos());
    let shear_slope = shear_dy / shear_dx;
    let shear_radius_x = shear_dx.abs();
    let shear_radius_y = radius_x * radius_y / shear_radius_x;
    draw_sheared_ellipse(
        &ShearedEllipse {
            center_x: ellipse.center_x,
            center_y: ellipse.center_y,
            radius_x: shear_radius_x as f32,
            radius_y: shear_radius_y as f32,
            shear_slope: shear_slope as f32,
            is_filled: ellipse.is_filled,
        },
        surface,
    );
}

/// Renders the mark a brush of diameter `size` stamps per pixel.
///
/// The mark is a square raster of side `2 * ceil(size / 2)`. Sizes of five
/// and under paint a plain filled square (shifted one pixel when odd) so
/// small brushes stay crisp for pixel work; larger sizes use the filled
/// ellipse.
pub fn brush_mark(size: f32, color: Color32) -> PixelBuffer {
    let size = size.trunc();
    let rounded_up_radius = (size / 2.0).ceil().max(0.0) as u32;
    let mut buffer = PixelBuffer::new(rounded_up_radius * 2, rounded_up_radius * 2);
    let mut painter = PixelPainter::new(&mut buffer, color);
    if size <= 5.0 {
        let size = size as i32;
        if size % 2 != 0 {
            painter.fill_rect(1, 1, size, size);
        } else {
            painter.fill_rect(0, 0, size, size);
        }
    } else {
        draw_sheared_ellipse(
            &ShearedEllipse {
                center_x: size / 2.0,
                center_y: size / 2.0,
                radius_x: size / 2.0,
                radius_y: size / 2.0,
                shear_slope: 0.0,
                is_filled: true,
            },
            &mut painter,
        );
    }
    buffer
}
