//! Selection and drag-to-move tool.
//!
//! Handles hit selection (single, additive, double-click, sub-select),
//! cloning, and dragging with center and angle snapping. One gesture runs
//! Idle -> Dragging -> Idle; the selection store and scene flags are the
//! system of record, the tool's snapshot lives only inside a gesture.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_4;

use egui::Pos2;
use log::{debug, trace};

use crate::context::EditorContext;
use crate::geometry::{points_close, snap_delta_to_angle};
use crate::mode::Mode;
use crate::scene::ItemId;
use crate::selection::{Granularity, SelectionStore, clear_selection};
use crate::update::{ImageUpdate, UpdateSignal};
use crate::view::CENTER;

use super::{DragEvent, HitProps};

/// Align the selection center to the canvas center within this distance,
/// scaled down by zoom.
pub const SNAPPING_THRESHOLD: f32 = 4.0;

/// Snap an individual item's own position onto the canvas center within this
/// distance, scaled down by zoom.
const ITEM_SNAPPING_THRESHOLD: f32 = 2.0;

/// How fast the crosshair fades with distance from the canvas center, in
/// units of the canvas half-width.
const CROSSHAIR_FADE_RATE: f32 = 4.0;

pub struct MoveTool {
    mode: Mode,
    on_update_image: UpdateSignal,
    switch_to_text_tool: Option<Box<dyn FnMut()>>,
    /// Items being dragged this gesture: leaf items in reshape mode, root
    /// items otherwise.
    dragged_items: Vec<ItemId>,
    /// Pre-drag positions, cached once per gesture per item.
    original_positions: HashMap<ItemId, Pos2>,
    selection_center: Option<Pos2>,
    first_drag: bool,
}

impl std::fmt::Debug for MoveTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveTool")
            .field("mode", &self.mode)
            .field("dragged_items", &self.dragged_items.len())
            .field("selection_center", &self.selection_center)
            .field("first_drag", &self.first_drag)
            .finish_non_exhaustive()
    }
}

impl MoveTool {
    /// `mode` must be a selection mode; anything else is a programmer error.
    pub fn new(mode: Mode, on_update_image: impl FnMut(&ImageUpdate) + 'static) -> Self {
        assert!(
            matches!(mode, Mode::Select | Mode::Reshape | Mode::BitSelect),
            "MoveTool constructed with non-selection mode {mode:?}"
        );
        Self {
            mode,
            on_update_image: Box::new(on_update_image),
            switch_to_text_tool: None,
            dragged_items: Vec::new(),
            original_positions: HashMap::new(),
            selection_center: None,
            first_drag: false,
        }
    }

    /// Configures the hand-off invoked when editable text is double-clicked.
    pub fn with_text_hand_off(mut self, hand_off: impl FnMut() + 'static) -> Self {
        self.switch_to_text_tool = Some(Box::new(hand_off));
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        !self.dragged_items.is_empty()
    }

    /// Starts a gesture on the hit item.
    ///
    /// A hit on an id the scene no longer knows is a no-op, as is a gesture
    /// that resolves to an empty snapshot.
    pub fn on_mouse_down(
        &mut self,
        hit: ItemId,
        props: HitProps,
        ctx: &mut EditorContext,
        store: &mut SelectionStore,
    ) {
        if !ctx.scene.contains(hit) {
            return;
        }
        let subselect = self.mode == Mode::Reshape;

        // In whole-item mode a hit inside a group or compound path selects
        // the top-level ancestor.
        let target = if subselect {
            hit
        } else {
            let root = ctx.scene.root_of(hit);
            let climbs = ctx
                .scene
                .get(root)
                .is_some_and(|item| item.is_group() || item.is_compound_path());
            if climbs { root } else { hit }
        };

        let already_selected = ctx
            .scene
            .get(target)
            .is_some_and(|item| item.is_selected());

        if already_selected {
            if props.double_clicked {
                if !props.multiselect {
                    // Double click on editable text enters text editing
                    // instead of selecting.
                    let is_text = ctx
                        .scene
                        .get(target)
                        .is_some_and(|item| item.is_editable_text());
                    if is_text && self.switch_to_text_tool.is_some() {
                        if let Some(hand_off) = &mut self.switch_to_text_tool {
                            debug!("double click on text item, handing off to text tool");
                            hand_off();
                        }
                        return;
                    }
                    clear_selection(&mut ctx.scene, store);
                }
                self.select(ctx, store, target, true, subselect, true);
            } else if props.multiselect {
                self.select(ctx, store, target, false, subselect, false);
            }
        } else {
            // Replace the selection unless multiselect is held.
            if !props.multiselect {
                clear_selection(&mut ctx.scene, store);
            }
            self.select(ctx, store, target, true, subselect, false);
        }

        if props.clone {
            ctx.scene.duplicate_selected();
            store.sync_from_scene(&ctx.scene, Granularity::from_mode(self.mode));
            (self.on_update_image)(&ImageUpdate::vector(&ctx.scene));
        }

        self.dragged_items = if self.mode == Mode::Reshape {
            ctx.scene.selected_leaf_items()
        } else {
            ctx.scene.selected_root_items()
        };
        if self.dragged_items.is_empty() {
            return;
        }

        let selection_bounds = self
            .dragged_items
            .iter()
            .map(|id| ctx.scene.bounds_of(*id))
            .reduce(|acc, b| acc.union(b));
        self.selection_center = selection_bounds.map(|bounds| bounds.center());
        self.first_drag = true;
        debug!(
            "gesture started on {} item(s), center {:?}",
            self.dragged_items.len(),
            self.selection_center
        );
    }

    /// Applies one drag movement to the snapshot.
    pub fn on_mouse_drag(&mut self, event: DragEvent, ctx: &mut EditorContext) {
        if self.dragged_items.is_empty() {
            return;
        }
        let point = ctx.view.clamp_to_action_bounds(event.point);
        let drag_vector = point - event.down_point;
        let zoom = ctx.view.zoom();

        // Center snapping aligns the selection center exactly to the canvas
        // center. Not in reshape mode, which shows no crosshair.
        let mut snap_vector = None;
        if !event.axis_lock && self.mode != Mode::Reshape {
            if let Some(center) = self.selection_center {
                if points_close(center + drag_vector, CENTER, SNAPPING_THRESHOLD / zoom) {
                    snap_vector = Some(CENTER - center);
                }
            }
        }

        for id in &self.dragged_items {
            if !ctx.scene.contains(*id) {
                continue;
            }
            // Cache the pre-drag position the first time we move this item.
            let original = *self
                .original_positions
                .entry(*id)
                .or_insert_with(|| ctx.scene.position_of(*id));

            let position = if let Some(snap) = snap_vector {
                original + snap
            } else if event.axis_lock {
                original + snap_delta_to_angle(drag_vector, FRAC_PI_4)
            } else {
                let mut position = original + drag_vector;
                if points_close(position, CENTER, ITEM_SNAPPING_THRESHOLD / zoom) {
                    position = CENTER;
                }
                position
            };
            ctx.scene.set_position(*id, position);
        }

        if self.first_drag {
            // Reveal the center crosshair above the dragged selection.
            ctx.guides.crosshair.visible = true;
            self.first_drag = false;
        }
        if let Some(center) = self.selection_center {
            let effective = snap_vector.unwrap_or(drag_vector);
            let distance = CENTER.distance(center + effective);
            let opacity = (1.0 - (distance / CENTER.x) * (CROSSHAIR_FADE_RATE * zoom)).max(0.0);
            ctx.guides.crosshair.opacity = opacity;
            trace!("crosshair opacity {opacity}");
        }
    }

    /// Ends the gesture. Signals one image update iff anything moved.
    pub fn on_mouse_up(&mut self, ctx: &mut EditorContext) {
        self.first_drag = false;
        let mut moved = false;
        for id in &self.dragged_items {
            if let Some(original) = self.original_positions.get(id) {
                if ctx.scene.contains(*id) && ctx.scene.position_of(*id) != *original {
                    moved = true;
                }
            }
        }
        self.original_positions.clear();
        self.dragged_items.clear();
        self.selection_center = None;

        if moved {
            debug!("gesture moved items, signaling image update");
            (self.on_update_image)(&ImageUpdate::vector(&ctx.scene));
        }
        ctx.guides.crosshair.visible = false;
    }

    /// External selection change mid-drag: treat it as a mouse-up with zero
    /// displacement. Items return to their pre-drag positions and no update
    /// is signaled.
    pub fn interrupt_gesture(&mut self, ctx: &mut EditorContext) {
        for (id, original) in self.original_positions.drain() {
            if ctx.scene.contains(id) {
                ctx.scene.set_position(id, original);
            }
        }
        self.first_drag = false;
        self.dragged_items.clear();
        self.selection_center = None;
        ctx.guides.crosshair.visible = false;
        debug!("gesture interrupted, positions restored");
    }

    /// Applies a selection state change and re-syncs the store.
    ///
    /// In sub-select mode `fully` additionally selects all of the item's
    /// control points.
    fn select(
        &mut self,
        ctx: &mut EditorContext,
        store: &mut SelectionStore,
        id: ItemId,
        state: bool,
        subselect: bool,
        fully: bool,
    ) {
        if subselect {
            if fully {
                ctx.scene.set_fully_selected(id, state);
            } else {
                ctx.scene.set_leaf_selection(id, state);
            }
        } else {
            ctx.scene.set_item_selection(id, state);
        }
        store.sync_from_scene(&ctx.scene, Granularity::from_mode(self.mode));
    }
}
