//! The image-update signal: the one callback a host receives when an edit
//! commits, invoked exactly once per committed edit.

use crate::raster::PixelBuffer;
use crate::scene::{SceneGraph, VectorDocument};
use crate::view;

/// What changed in a committed edit.
#[derive(Debug, Clone)]
pub enum UpdatePayload {
    /// The vector scene after the edit.
    Vector(VectorDocument),
    /// The bitmap layer after the edit.
    Bitmap(PixelBuffer),
}

/// One committed edit, delivered to the host's update callback.
#[derive(Debug, Clone)]
pub struct ImageUpdate {
    pub is_vector: bool,
    pub payload: UpdatePayload,
    /// Registration point of the payload: the art board center of its space.
    pub registration_x: f32,
    pub registration_y: f32,
}

impl ImageUpdate {
    pub fn vector(scene: &SceneGraph) -> Self {
        Self {
            is_vector: true,
            payload: UpdatePayload::Vector(VectorDocument::from_scene(scene)),
            registration_x: view::CENTER.x,
            registration_y: view::CENTER.y,
        }
    }

    pub fn bitmap(bitmap: &PixelBuffer) -> Self {
        Self {
            is_vector: false,
            payload: UpdatePayload::Bitmap(bitmap.clone()),
            registration_x: view::CENTER.x * view::BITMAP_SCALE,
            registration_y: view::CENTER.y * view::BITMAP_SCALE,
        }
    }
}

/// Host callback receiving committed edits.
pub type UpdateSignal = Box<dyn FnMut(&ImageUpdate)>;
