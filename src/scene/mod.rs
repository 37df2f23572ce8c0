//! Scene items and the scene graph the selection tools operate on.
//!
//! Item variants form a closed enum with capability queries instead of a
//! class hierarchy; tools hold item ids, never references into the graph.

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::raster::PixelBuffer;

pub mod document;
pub mod graph;
pub mod rasterize;

pub use document::VectorDocument;
pub use graph::SceneGraph;
pub use rasterize::{ExportedImage, export_payload, rasterize_scene};

pub type ItemId = Uuid;

/// Distance in art-board units within which a click counts as hitting an
/// outline or polyline stroke.
pub const HIT_TOLERANCE: f32 = 2.0;

// Block metrics used for text bounds; real glyph layout is the UI layer's
// problem.
const TEXT_CHAR_ADVANCE: f32 = 0.6;
const TEXT_LINE_HEIGHT: f32 = 1.2;

/// Per-item selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectState {
    #[default]
    Unselected,
    Selected,
    /// Selected with all control points selected (sub-select mode only).
    FullySelected,
}

/// A polyline control point with its own selection flag for reshape mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Pos2,
    pub selected: bool,
}

impl PathPoint {
    pub fn new(position: Pos2) -> Self {
        Self {
            position,
            selected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathGeometry {
    Polyline { points: Vec<PathPoint> },
    Ellipse { center: Pos2, radii: Vec2, rotation: f32 },
}

/// A single drawable path: open/closed polyline or an ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub geometry: PathGeometry,
    pub stroke_width: f32,
    pub color: Color32,
    pub filled: bool,
}

impl PathShape {
    pub fn polyline(points: Vec<Pos2>, stroke_width: f32, color: Color32) -> Self {
        Self {
            geometry: PathGeometry::Polyline {
                points: points.into_iter().map(PathPoint::new).collect(),
            },
            stroke_width,
            color,
            filled: false,
        }
    }

    pub fn ellipse(center: Pos2, radii: Vec2, rotation: f32, color: Color32, filled: bool) -> Self {
        Self {
            geometry: PathGeometry::Ellipse {
                center,
                radii,
                rotation,
            },
            stroke_width: 1.0,
            color,
            filled,
        }
    }

    pub fn bounds(&self) -> Rect {
        match &self.geometry {
            PathGeometry::Polyline { points } => {
                if points.is_empty() {
                    return Rect::NOTHING;
                }
                let mut min = points[0].position;
                let mut max = points[0].position;
                for point in points {
                    min = min.min(point.position);
                    max = max.max(point.position);
                }
                let pad = self.stroke_width / 2.0;
                Rect::from_min_max(min, max).expand(pad)
            }
            PathGeometry::Ellipse {
                center,
                radii,
                rotation,
            } => {
                // Axis-aligned extents of the rotated ellipse.
                let (sin, cos) = rotation.sin_cos();
                let half_w = ((radii.x * cos).powi(2) + (radii.y * sin).powi(2)).sqrt();
                let half_h = ((radii.x * sin).powi(2) + (radii.y * cos).powi(2)).sqrt();
                Rect::from_center_size(*center, Vec2::new(half_w * 2.0, half_h * 2.0))
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.geometry {
            PathGeometry::Polyline { points } => {
                for point in points {
                    point.position += delta;
                }
            }
            PathGeometry::Ellipse { center, .. } => *center += delta,
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        match &self.geometry {
            PathGeometry::Polyline { points } => {
                let tolerance = (self.stroke_width / 2.0).max(HIT_TOLERANCE);
                match points.len() {
                    0 => false,
                    1 => points[0].position.distance(pos) <= tolerance,
                    _ => points.windows(2).any(|pair| {
                        segment_distance(pos, pair[0].position, pair[1].position) <= tolerance
                    }),
                }
            }
            PathGeometry::Ellipse {
                center,
                radii,
                rotation,
            } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return false;
                }
                // Into the ellipse's own frame, then against the unit circle.
                let rel = pos - *center;
                let (sin, cos) = rotation.sin_cos();
                let local_x = rel.x * cos + rel.y * sin;
                let local_y = -rel.x * sin + rel.y * cos;
                let d = ((local_x / radii.x).powi(2) + (local_y / radii.y).powi(2)).sqrt();
                if self.filled {
                    d <= 1.0
                } else {
                    (d - 1.0).abs() <= HIT_TOLERANCE / radii.x.min(radii.y)
                }
            }
        }
    }

    pub fn set_points_selected(&mut self, selected: bool) {
        if let PathGeometry::Polyline { points } = &mut self.geometry {
            for point in points {
                point.selected = selected;
            }
        }
    }
}

fn segment_distance(pos: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return pos.distance(a);
    }
    let t = ((pos - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    pos.distance(a + ab * t)
}

/// A lifted bitmap region living in the vector scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterItem {
    pub pixels: PixelBuffer,
    /// Placement in art-board coordinates.
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub content: String,
    /// Center of the text block.
    pub position: Pos2,
    pub font_size: f32,
    pub color: Color32,
    /// Editable text hands off to the text tool on double click.
    pub editable: bool,
}

impl TextItem {
    pub fn bounds(&self) -> Rect {
        let width = self.content.chars().count() as f32 * self.font_size * TEXT_CHAR_ADVANCE;
        let height = self.font_size * TEXT_LINE_HEIGHT;
        Rect::from_center_size(self.position, Vec2::new(width.max(1.0), height))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    /// Child item ids in paint order (back to front).
    pub children: Vec<ItemId>,
}

/// Closed set of scene item variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Path(PathShape),
    CompoundPath(Vec<PathShape>),
    Group(GroupItem),
    Raster(RasterItem),
    Text(TextItem),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneItem {
    pub id: ItemId,
    pub parent: Option<ItemId>,
    pub kind: ItemKind,
    pub selection: SelectState,
}

impl SceneItem {
    fn with_kind(kind: ItemKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            kind,
            selection: SelectState::Unselected,
        }
    }

    pub fn path(shape: PathShape) -> Self {
        Self::with_kind(ItemKind::Path(shape))
    }

    pub fn compound_path(shapes: Vec<PathShape>) -> Self {
        Self::with_kind(ItemKind::CompoundPath(shapes))
    }

    pub fn group() -> Self {
        Self::with_kind(ItemKind::Group(GroupItem::default()))
    }

    pub fn raster(pixels: PixelBuffer, rect: Rect) -> Self {
        Self::with_kind(ItemKind::Raster(RasterItem { pixels, rect }))
    }

    pub fn text(content: impl Into<String>, position: Pos2, font_size: f32, color: Color32) -> Self {
        Self::with_kind(ItemKind::Text(TextItem {
            content: content.into(),
            position,
            font_size,
            color,
            editable: true,
        }))
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ItemKind::Group(_))
    }

    pub fn is_compound_path(&self) -> bool {
        matches!(self.kind, ItemKind::CompoundPath(_))
    }

    /// Groups are hit only through their children.
    pub fn is_hit_testable(&self) -> bool {
        !self.is_group()
    }

    pub fn is_selected(&self) -> bool {
        self.selection != SelectState::Unselected
    }

    pub fn is_editable_text(&self) -> bool {
        matches!(&self.kind, ItemKind::Text(text) if text.editable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn polyline_bounds_include_stroke() {
        let shape = PathShape::polyline(
            vec![pos2(10.0, 10.0), pos2(20.0, 14.0)],
            4.0,
            Color32::BLACK,
        );
        let bounds = shape.bounds();
        assert_eq!(bounds.min, pos2(8.0, 8.0));
        assert_eq!(bounds.max, pos2(22.0, 16.0));
    }

    #[test]
    fn rotated_ellipse_bounds_grow_with_rotation() {
        let flat = PathShape::ellipse(pos2(0.0, 0.0), vec2(10.0, 2.0), 0.0, Color32::BLACK, true);
        let tilted = PathShape::ellipse(
            pos2(0.0, 0.0),
            vec2(10.0, 2.0),
            std::f32::consts::FRAC_PI_4,
            Color32::BLACK,
            true,
        );
        assert!(tilted.bounds().height() > flat.bounds().height());
        assert!(tilted.bounds().width() < flat.bounds().width());
    }

    #[test]
    fn filled_ellipse_hit_test() {
        let shape = PathShape::ellipse(pos2(50.0, 50.0), vec2(20.0, 10.0), 0.0, Color32::BLACK, true);
        assert!(shape.hit_test(pos2(50.0, 50.0)));
        assert!(shape.hit_test(pos2(65.0, 50.0)));
        assert!(!shape.hit_test(pos2(50.0, 65.0)));
    }

    #[test]
    fn outline_ellipse_only_hits_near_boundary() {
        let shape =
            PathShape::ellipse(pos2(50.0, 50.0), vec2(20.0, 20.0), 0.0, Color32::BLACK, false);
        assert!(!shape.hit_test(pos2(50.0, 50.0)));
        assert!(shape.hit_test(pos2(70.0, 50.0)));
    }

    #[test]
    fn polyline_hit_test_uses_stroke_width() {
        let shape = PathShape::polyline(
            vec![pos2(0.0, 0.0), pos2(100.0, 0.0)],
            8.0,
            Color32::BLACK,
        );
        assert!(shape.hit_test(pos2(50.0, 3.0)));
        assert!(!shape.hit_test(pos2(50.0, 10.0)));
    }
}
