use std::collections::HashMap;

use egui::{Pos2, Rect, Vec2};
use log::debug;

use super::{ItemId, ItemKind, SceneItem, SelectState};

/// Owner of all vector scene items.
///
/// Items are stored flat and keyed by id; groups reference their children by
/// id. Root items carry a z-order (back to front). Everything outside the
/// graph (tools, the selection store, drag snapshots) holds ids only.
#[derive(Debug, Default)]
pub struct SceneGraph {
    items: HashMap<ItemId, SceneItem>,
    order: Vec<ItemId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut SceneItem> {
        self.items.get_mut(&id)
    }

    /// Root item ids in paint order, back to front.
    pub fn root_ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Inserts a root item on top of the stack and returns its id.
    pub fn insert(&mut self, mut item: SceneItem) -> ItemId {
        item.parent = None;
        let id = item.id;
        self.items.insert(id, item);
        self.order.push(id);
        id
    }

    /// Inserts an item as the topmost child of `parent`.
    ///
    /// Falls back to a root insert if `parent` is not a live group.
    pub fn insert_child(&mut self, parent: ItemId, mut item: SceneItem) -> ItemId {
        let id = item.id;
        match self.items.get_mut(&parent) {
            Some(parent_item) => {
                if let ItemKind::Group(group) = &mut parent_item.kind {
                    group.children.push(id);
                    item.parent = Some(parent);
                    self.items.insert(id, item);
                    return id;
                }
                debug!("insert_child: {parent} is not a group, inserting at root");
                self.insert(item)
            }
            None => self.insert(item),
        }
    }

    /// Removes an item (and, for groups, its whole subtree).
    pub fn remove(&mut self, id: ItemId) -> Option<SceneItem> {
        let item = self.items.remove(&id)?;
        match item.parent {
            Some(parent) => {
                if let Some(ItemKind::Group(group)) = self.items.get_mut(&parent).map(|i| &mut i.kind)
                {
                    group.children.retain(|child| *child != id);
                }
            }
            None => self.order.retain(|root| *root != id),
        }
        if let ItemKind::Group(group) = &item.kind {
            for child in group.children.clone() {
                self.remove_subtree(child);
            }
        }
        Some(item)
    }

    fn remove_subtree(&mut self, id: ItemId) {
        if let Some(item) = self.items.remove(&id) {
            if let ItemKind::Group(group) = &item.kind {
                for child in &group.children {
                    self.remove_subtree(*child);
                }
            }
        }
    }

    /// Drops every item. Used when conversion discards the vector content.
    pub fn clear_content(&mut self) {
        self.items.clear();
        self.order.clear();
    }

    /// Climbs the parent chain to the top-level ancestor.
    pub fn root_of(&self, id: ItemId) -> ItemId {
        let mut current = id;
        while let Some(parent) = self.items.get(&current).and_then(|item| item.parent) {
            current = parent;
        }
        current
    }

    /// Bounding rectangle of an item; groups report the union of their
    /// children, an empty group reports `Rect::NOTHING`.
    pub fn bounds_of(&self, id: ItemId) -> Rect {
        let Some(item) = self.items.get(&id) else {
            return Rect::NOTHING;
        };
        match &item.kind {
            ItemKind::Path(shape) => shape.bounds(),
            ItemKind::CompoundPath(shapes) => shapes
                .iter()
                .map(|shape| shape.bounds())
                .reduce(|acc, b| acc.union(b))
                .unwrap_or(Rect::NOTHING),
            ItemKind::Group(group) => group
                .children
                .iter()
                .map(|child| self.bounds_of(*child))
                .reduce(|acc, b| acc.union(b))
                .unwrap_or(Rect::NOTHING),
            ItemKind::Raster(raster) => raster.rect,
            ItemKind::Text(text) => text.bounds(),
        }
    }

    /// An item's position is the center of its bounds.
    pub fn position_of(&self, id: ItemId) -> Pos2 {
        self.bounds_of(id).center()
    }

    /// Moves an item so its bounds center lands on `position`.
    pub fn set_position(&mut self, id: ItemId, position: Pos2) {
        let delta = position - self.position_of(id);
        if delta != Vec2::ZERO {
            self.translate(id, delta);
        }
    }

    pub fn translate(&mut self, id: ItemId, delta: Vec2) {
        let children = match self.items.get_mut(&id) {
            None => return,
            Some(item) => match &mut item.kind {
                ItemKind::Path(shape) => {
                    shape.translate(delta);
                    return;
                }
                ItemKind::CompoundPath(shapes) => {
                    for shape in shapes {
                        shape.translate(delta);
                    }
                    return;
                }
                ItemKind::Raster(raster) => {
                    raster.rect = raster.rect.translate(delta);
                    return;
                }
                ItemKind::Text(text) => {
                    text.position += delta;
                    return;
                }
                ItemKind::Group(group) => group.children.clone(),
            },
        };
        for child in children {
            self.translate(child, delta);
        }
    }

    /// Topmost hit-testable item under `pos`, descending into groups.
    /// Returns the leaf item that was actually hit.
    pub fn hit_test(&self, pos: Pos2) -> Option<ItemId> {
        for root in self.order.iter().rev() {
            if let Some(hit) = self.hit_test_item(*root, pos) {
                return Some(hit);
            }
        }
        None
    }

    fn hit_test_item(&self, id: ItemId, pos: Pos2) -> Option<ItemId> {
        let item = self.items.get(&id)?;
        match &item.kind {
            ItemKind::Group(group) => group
                .children
                .iter()
                .rev()
                .find_map(|child| self.hit_test_item(*child, pos)),
            ItemKind::Path(shape) => shape.hit_test(pos).then_some(id),
            ItemKind::CompoundPath(shapes) => {
                shapes.iter().any(|shape| shape.hit_test(pos)).then_some(id)
            }
            ItemKind::Raster(raster) => raster.rect.contains(pos).then_some(id),
            ItemKind::Text(text) => text.bounds().contains(pos).then_some(id),
        }
    }

    /// Union of all root item bounds, or `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.order
            .iter()
            .map(|id| self.bounds_of(*id))
            .filter(|rect| rect.is_positive())
            .reduce(|acc, b| acc.union(b))
    }

    // ---- selection flags ------------------------------------------------

    pub fn clear_selection(&mut self) {
        for item in self.items.values_mut() {
            item.selection = SelectState::Unselected;
            set_points(&mut item.kind, false);
        }
    }

    /// Selects or deselects an item as a whole; groups propagate the flag to
    /// their whole subtree. Control points are left alone.
    pub fn set_item_selection(&mut self, id: ItemId, selected: bool) {
        let state = if selected {
            SelectState::Selected
        } else {
            SelectState::Unselected
        };
        let children = match self.items.get_mut(&id) {
            None => return,
            Some(item) => {
                item.selection = state;
                if !selected {
                    set_points(&mut item.kind, false);
                }
                match &item.kind {
                    ItemKind::Group(group) => group.children.clone(),
                    _ => return,
                }
            }
        };
        for child in children {
            self.set_item_selection(child, selected);
        }
    }

    /// Sub-select-mode selection of a single item without its points.
    pub fn set_leaf_selection(&mut self, id: ItemId, selected: bool) {
        if let Some(item) = self.items.get_mut(&id) {
            item.selection = if selected {
                SelectState::Selected
            } else {
                SelectState::Unselected
            };
            if !selected {
                set_points(&mut item.kind, false);
            }
        }
    }

    /// Fully selects an item: the item itself plus all of its control points.
    pub fn set_fully_selected(&mut self, id: ItemId, selected: bool) {
        if let Some(item) = self.items.get_mut(&id) {
            item.selection = if selected {
                SelectState::FullySelected
            } else {
                SelectState::Unselected
            };
            set_points(&mut item.kind, selected);
        }
    }

    /// Top-level ancestors of all selected items, in z-order, deduplicated.
    pub fn selected_root_items(&self) -> Vec<ItemId> {
        self.order
            .iter()
            .copied()
            .filter(|root| self.subtree_has_selection(*root))
            .collect()
    }

    /// Selected leaf (non-group) items in depth-first paint order.
    pub fn selected_leaf_items(&self) -> Vec<ItemId> {
        let mut out = Vec::new();
        for root in &self.order {
            self.collect_selected_leaves(*root, &mut out);
        }
        out
    }

    fn collect_selected_leaves(&self, id: ItemId, out: &mut Vec<ItemId>) {
        let Some(item) = self.items.get(&id) else {
            return;
        };
        match &item.kind {
            ItemKind::Group(group) => {
                for child in &group.children {
                    self.collect_selected_leaves(*child, out);
                }
            }
            _ => {
                if item.is_selected() {
                    out.push(id);
                }
            }
        }
    }

    fn subtree_has_selection(&self, id: ItemId) -> bool {
        let Some(item) = self.items.get(&id) else {
            return false;
        };
        if item.is_selected() {
            return true;
        }
        match &item.kind {
            ItemKind::Group(group) => group
                .children
                .iter()
                .any(|child| self.subtree_has_selection(*child)),
            _ => false,
        }
    }

    /// Duplicates the current selection in place, as alt-drag does.
    ///
    /// The clones land directly above their sources in z-order and take over
    /// the selection; the originals are deselected and stay put. Returns the
    /// clone ids.
    pub fn duplicate_selected(&mut self) -> Vec<ItemId> {
        let sources = self.selected_root_items();
        let mut clones = Vec::with_capacity(sources.len());
        for source in sources {
            let Some(mut clone) = self.clone_subtree(source) else {
                continue;
            };
            clone.parent = None;
            let clone_id = clone.id;
            self.items.insert(clone_id, clone);
            let position = self
                .order
                .iter()
                .position(|root| *root == source)
                .map_or(self.order.len(), |i| i + 1);
            self.order.insert(position, clone_id);
            self.set_item_selection(source, false);
            clones.push(clone_id);
        }
        debug!("duplicated {} selected item(s)", clones.len());
        clones
    }

    fn clone_subtree(&mut self, id: ItemId) -> Option<SceneItem> {
        let source = self.items.get(&id)?.clone();
        let mut clone = source;
        clone.id = ItemId::new_v4();
        if let ItemKind::Group(group) = &mut clone.kind {
            let mut new_children = Vec::with_capacity(group.children.len());
            for child in group.children.clone() {
                if let Some(mut child_clone) = self.clone_subtree(child) {
                    child_clone.parent = Some(clone.id);
                    new_children.push(child_clone.id);
                    self.items.insert(child_clone.id, child_clone);
                }
            }
            group.children = new_children;
        }
        Some(clone)
    }
}

fn set_points(kind: &mut ItemKind, selected: bool) {
    match kind {
        ItemKind::Path(shape) => shape.set_points_selected(selected),
        ItemKind::CompoundPath(shapes) => {
            for shape in shapes {
                shape.set_points_selected(selected);
            }
        }
        _ => {}
    }
}
