//! Hard-edged rasterization: pixel surfaces, line walking, sheared/rotated
//! ellipses, and alpha-bounds trimming. Nothing in here anti-aliases.

pub mod ellipse;
pub mod line;
pub mod surface;
pub mod trim;

pub use ellipse::{RotatedEllipse, ShearedEllipse, brush_mark, draw_rotated_ellipse, draw_sheared_ellipse};
pub use line::for_each_line_point;
pub use surface::{DrawingSurface, PixelBuffer, PixelPainter};
pub use trim::hit_bounds;
