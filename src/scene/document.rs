//! Serializable vector document format.
//!
//! The scene graph flattens its id-linked tree into nested nodes for export;
//! importing rebuilds the tree with fresh ids. This is the payload carried by
//! vector image updates and the interchange format for hosts that persist
//! vector content.

use serde::{Deserialize, Serialize};

use crate::view;

use super::{ItemKind, PathShape, RasterItem, SceneGraph, SceneItem, TextItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DocumentNode {
    Path(PathShape),
    CompoundPath(Vec<PathShape>),
    Group(Vec<DocumentNode>),
    Raster(RasterItem),
    Text(TextItem),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDocument {
    pub art_board_width: f32,
    pub art_board_height: f32,
    /// Root nodes in paint order, back to front.
    pub items: Vec<DocumentNode>,
}

impl VectorDocument {
    /// Snapshots the scene into a document.
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let items = scene
            .root_ids()
            .iter()
            .filter_map(|id| export_node(scene, *id))
            .collect();
        Self {
            art_board_width: view::ART_BOARD_SIZE.x,
            art_board_height: view::ART_BOARD_SIZE.y,
            items,
        }
    }

    /// Rebuilds a scene graph from the document. Items get fresh ids.
    pub fn into_scene(self) -> SceneGraph {
        let mut scene = SceneGraph::new();
        for node in self.items {
            import_node(&mut scene, None, node);
        }
        scene
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn export_node(scene: &SceneGraph, id: super::ItemId) -> Option<DocumentNode> {
    let item = scene.get(id)?;
    Some(match &item.kind {
        ItemKind::Path(shape) => DocumentNode::Path(shape.clone()),
        ItemKind::CompoundPath(shapes) => DocumentNode::CompoundPath(shapes.clone()),
        ItemKind::Group(group) => DocumentNode::Group(
            group
                .children
                .iter()
                .filter_map(|child| export_node(scene, *child))
                .collect(),
        ),
        ItemKind::Raster(raster) => DocumentNode::Raster(raster.clone()),
        ItemKind::Text(text) => DocumentNode::Text(text.clone()),
    })
}

fn import_node(scene: &mut SceneGraph, parent: Option<super::ItemId>, node: DocumentNode) {
    let item = match node {
        DocumentNode::Path(shape) => SceneItem::path(shape),
        DocumentNode::CompoundPath(shapes) => SceneItem::compound_path(shapes),
        DocumentNode::Raster(raster) => {
            SceneItem::raster(raster.pixels, raster.rect)
        }
        DocumentNode::Text(text) => {
            let mut item = SceneItem::text(text.content, text.position, text.font_size, text.color);
            if let ItemKind::Text(t) = &mut item.kind {
                t.editable = text.editable;
            }
            item
        }
        DocumentNode::Group(children) => {
            let group = SceneItem::group();
            let group_id = match parent {
                Some(parent_id) => scene.insert_child(parent_id, group),
                None => scene.insert(group),
            };
            for child in children {
                import_node(scene, Some(group_id), child);
            }
            return;
        }
    };
    match parent {
        Some(parent_id) => scene.insert_child(parent_id, item),
        None => scene.insert(item),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PathShape;
    use egui::{Color32, pos2, vec2};

    #[test]
    fn document_round_trips_scene_structure() {
        let mut scene = SceneGraph::new();
        let group = scene.insert(SceneItem::group());
        scene.insert_child(
            group,
            SceneItem::path(PathShape::ellipse(
                pos2(10.0, 10.0),
                vec2(4.0, 4.0),
                0.0,
                Color32::RED,
                true,
            )),
        );
        scene.insert(SceneItem::text("hi", pos2(50.0, 50.0), 12.0, Color32::BLACK));

        let json = VectorDocument::from_scene(&scene).to_json().unwrap();
        let rebuilt = VectorDocument::from_json(&json).unwrap().into_scene();

        assert_eq!(rebuilt.len(), scene.len());
        assert_eq!(rebuilt.root_ids().len(), 2);
        let group_bounds = rebuilt.bounds_of(rebuilt.root_ids()[0]);
        assert_eq!(group_bounds.center(), pos2(10.0, 10.0));
    }
}
