use crate::layer::GuideLayers;
use crate::raster::PixelBuffer;
use crate::scene::SceneGraph;
use crate::view::{self, ViewContext};

/// Everything a tool or conversion needs to act on the document: the vector
/// scene, the bitmap layer, view geometry, and the guide overlays.
///
/// Passed explicitly into every operation; there is no ambient "active
/// document" anywhere in the crate.
#[derive(Debug)]
pub struct EditorContext {
    pub scene: SceneGraph,
    /// The bitmap layer, at double the art board's linear resolution.
    pub bitmap: PixelBuffer,
    pub view: ViewContext,
    pub guides: GuideLayers,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContext {
    pub fn new() -> Self {
        Self {
            scene: SceneGraph::new(),
            bitmap: PixelBuffer::new(view::BITMAP_SIZE.x as u32, view::BITMAP_SIZE.y as u32),
            view: ViewContext::new(),
            guides: GuideLayers::new(),
        }
    }
}
