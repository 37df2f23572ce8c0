//! The selection-state store: the system of record for what is selected.
//!
//! Tools mutate selection flags on scene items and then sync the store from
//! the scene. Across gestures only the store and the scene flags persist;
//! any tool-side snapshot is a per-gesture cache.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::scene::{ItemId, SceneGraph};

/// Selection granularity: whole items, or individual leaf items whose
/// control points are being reshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    Item,
    Point,
}

impl Granularity {
    pub fn from_mode(mode: Mode) -> Self {
        if mode == Mode::Reshape {
            Granularity::Point
        } else {
            Granularity::Item
        }
    }
}

/// Ordered, duplicate-free set of selected item ids plus the granularity it
/// was computed at. Never holds ids of removed items after a sync.
#[derive(Debug, Default)]
pub struct SelectionStore {
    ids: Vec<ItemId>,
    granularity: Granularity,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Recomputes the store from the scene's selection flags.
    pub fn sync_from_scene(&mut self, scene: &SceneGraph, granularity: Granularity) {
        let ids = match granularity {
            Granularity::Item => scene.selected_root_items(),
            Granularity::Point => scene.selected_leaf_items(),
        };
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self.granularity = granularity;
    }

    /// Drops ids whose items no longer exist.
    pub fn retain_live(&mut self, scene: &SceneGraph) {
        self.ids.retain(|id| scene.contains(*id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Deselects everything: scene flags and the store together.
pub fn clear_selection(scene: &mut SceneGraph, store: &mut SelectionStore) {
    scene.clear_selection();
    store.clear();
}
