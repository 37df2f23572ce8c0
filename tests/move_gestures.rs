use std::cell::Cell;
use std::rc::Rc;

use duopaint::scene::{PathShape, SceneItem};
use duopaint::selection::Granularity;
use duopaint::tools::{DragEvent, HitProps, MoveTool};
use duopaint::{EditorContext, ItemId, Mode, SelectionStore};
use egui::{Color32, Pos2, pos2, vec2};

fn circle_at(center: Pos2) -> SceneItem {
    SceneItem::path(PathShape::ellipse(
        center,
        vec2(10.0, 10.0),
        0.0,
        Color32::BLACK,
        true,
    ))
}

struct Rig {
    ctx: EditorContext,
    store: SelectionStore,
    tool: MoveTool,
    updates: Rc<Cell<usize>>,
}

impl Rig {
    fn new(mode: Mode) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let updates = Rc::new(Cell::new(0));
        let counter = updates.clone();
        Self {
            ctx: EditorContext::new(),
            store: SelectionStore::new(),
            tool: MoveTool::new(mode, move |_| counter.set(counter.get() + 1)),
            updates,
        }
    }

    fn mouse_down(&mut self, hit: ItemId, props: HitProps) {
        self.tool
            .on_mouse_down(hit, props, &mut self.ctx, &mut self.store);
    }

    fn drag(&mut self, from: Pos2, to: Pos2) {
        self.tool
            .on_mouse_drag(DragEvent::new(to, from), &mut self.ctx);
    }

    fn mouse_up(&mut self) {
        self.tool.on_mouse_up(&mut self.ctx);
    }
}

#[test]
fn plain_click_selects_single_item() {
    let mut rig = Rig::new(Mode::Select);
    let a = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));
    let b = rig.ctx.scene.insert(circle_at(pos2(200.0, 100.0)));

    rig.mouse_down(a, HitProps::default());
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[a]);

    // Clicking another item replaces the selection.
    rig.mouse_down(b, HitProps::default());
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[b]);
}

#[test]
fn shift_select_toggles_back_out() {
    let mut rig = Rig::new(Mode::Select);
    let a = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));
    let b = rig.ctx.scene.insert(circle_at(pos2(200.0, 100.0)));
    let multiselect = HitProps {
        multiselect: true,
        ..Default::default()
    };

    rig.mouse_down(a, HitProps::default());
    rig.mouse_up();
    rig.mouse_down(b, multiselect);
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[a, b]);

    // Shift-clicking the already-selected item removes exactly it.
    rig.mouse_down(a, multiselect);
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[b]);
}

#[test]
fn hit_inside_group_selects_the_group() {
    let mut rig = Rig::new(Mode::Select);
    let group = rig.ctx.scene.insert(SceneItem::group());
    let leaf = rig
        .ctx
        .scene
        .insert_child(group, circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(leaf, HitProps::default());
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[group]);
    assert_eq!(rig.store.granularity(), Granularity::Item);
}

#[test]
fn reshape_mode_selects_the_exact_leaf() {
    let mut rig = Rig::new(Mode::Reshape);
    let group = rig.ctx.scene.insert(SceneItem::group());
    let leaf = rig
        .ctx
        .scene
        .insert_child(group, circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(leaf, HitProps::default());
    rig.mouse_up();
    assert_eq!(rig.store.ids(), &[leaf]);
    assert_eq!(rig.store.granularity(), Granularity::Point);
}

#[test]
fn selection_center_snaps_to_canvas_center() {
    // Canvas center (240, 180), zoom 1, threshold 4: an item at (236, 180)
    // dragged by (3, 0) lands exactly on the center.
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(236.0, 180.0)));

    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(236.0, 180.0), pos2(239.0, 180.0));
    assert_eq!(rig.ctx.scene.position_of(item), pos2(240.0, 180.0));
}

#[test]
fn axis_lock_suppresses_center_snap_and_quantizes() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(236.0, 180.0)));

    rig.mouse_down(item, HitProps::default());
    rig.tool.on_mouse_drag(
        DragEvent {
            point: pos2(239.0, 180.2),
            down_point: pos2(236.0, 180.0),
            axis_lock: true,
        },
        &mut rig.ctx,
    );
    // Quantized to the horizontal axis instead of snapping onto the center.
    let position = rig.ctx.scene.position_of(item);
    assert!((position.y - 180.0).abs() < 1e-3);
    assert!((position.x - 239.0).abs() < 0.3);
}

#[test]
fn drag_with_no_net_movement_signals_nothing() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));

    // Click without any drag at all.
    rig.mouse_down(item, HitProps::default());
    rig.mouse_up();
    assert_eq!(rig.updates.get(), 0);

    // Drag out and back to the start before releasing.
    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(100.0, 100.0), pos2(150.0, 130.0));
    rig.drag(pos2(100.0, 100.0), pos2(100.0, 100.0));
    rig.mouse_up();
    assert_eq!(rig.updates.get(), 0);
    assert_eq!(rig.ctx.scene.position_of(item), pos2(100.0, 100.0));
}

#[test]
fn completed_drag_signals_exactly_once() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(100.0, 100.0), pos2(120.0, 100.0));
    rig.drag(pos2(100.0, 100.0), pos2(150.0, 110.0));
    rig.mouse_up();

    assert_eq!(rig.updates.get(), 1);
    assert_eq!(rig.ctx.scene.position_of(item), pos2(150.0, 110.0));
}

#[test]
fn multi_item_drag_moves_every_selected_item() {
    let mut rig = Rig::new(Mode::Select);
    let a = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));
    let b = rig.ctx.scene.insert(circle_at(pos2(140.0, 100.0)));

    rig.mouse_down(a, HitProps::default());
    rig.mouse_up();
    rig.mouse_down(
        b,
        HitProps {
            multiselect: true,
            ..Default::default()
        },
    );
    rig.drag(pos2(140.0, 100.0), pos2(160.0, 120.0));
    rig.mouse_up();

    assert_eq!(rig.ctx.scene.position_of(a), pos2(120.0, 120.0));
    assert_eq!(rig.ctx.scene.position_of(b), pos2(160.0, 120.0));
    assert_eq!(rig.updates.get(), 1);
}

#[test]
fn clone_drags_the_copy_and_leaves_the_original() {
    let mut rig = Rig::new(Mode::Select);
    let original = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(
        original,
        HitProps {
            clone: true,
            ..Default::default()
        },
    );
    // Cloning is itself a committed edit.
    assert_eq!(rig.updates.get(), 1);
    assert_eq!(rig.ctx.scene.root_ids().len(), 2);

    rig.drag(pos2(100.0, 100.0), pos2(160.0, 100.0));
    rig.mouse_up();
    assert_eq!(rig.updates.get(), 2);

    assert_eq!(rig.ctx.scene.position_of(original), pos2(100.0, 100.0));
    let clone = rig.store.ids()[0];
    assert_ne!(clone, original);
    assert_eq!(rig.ctx.scene.position_of(clone), pos2(160.0, 100.0));
}

#[test]
fn crosshair_shows_during_drag_and_hides_after() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(236.0, 180.0)));

    rig.mouse_down(item, HitProps::default());
    assert!(!rig.ctx.guides.crosshair.visible);

    rig.drag(pos2(236.0, 180.0), pos2(239.0, 180.0));
    assert!(rig.ctx.guides.crosshair.visible);
    // Snapped onto the canvas center: full opacity.
    assert!((rig.ctx.guides.crosshair.opacity - 1.0).abs() < 1e-5);

    rig.mouse_up();
    assert!(!rig.ctx.guides.crosshair.visible);
}

#[test]
fn crosshair_fades_away_from_center() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(230.0, 170.0)));

    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(230.0, 170.0), pos2(235.0, 175.0));
    let near = rig.ctx.guides.crosshair.opacity;

    rig.drag(pos2(230.0, 170.0), pos2(200.0, 140.0));
    let far = rig.ctx.guides.crosshair.opacity;
    assert!(near > 0.5);
    assert!(far < near);
    assert!((0.0..=1.0).contains(&far));
}

#[test]
fn interrupt_restores_positions_without_signaling() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(100.0, 100.0), pos2(150.0, 150.0));
    rig.tool.interrupt_gesture(&mut rig.ctx);

    assert_eq!(rig.ctx.scene.position_of(item), pos2(100.0, 100.0));
    assert_eq!(rig.updates.get(), 0);
    assert!(!rig.ctx.guides.crosshair.visible);
    assert!(!rig.tool.is_dragging());
}

#[test]
fn stale_hit_is_a_no_op() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));
    rig.ctx.scene.remove(item);

    rig.mouse_down(item, HitProps::default());
    rig.mouse_up();
    assert!(rig.store.is_empty());
    assert_eq!(rig.updates.get(), 0);
}

#[test]
fn double_click_on_text_hands_off_to_text_tool() {
    let handed_off = Rc::new(Cell::new(false));
    let flag = handed_off.clone();

    let mut ctx = EditorContext::new();
    let mut store = SelectionStore::new();
    let text = ctx
        .scene
        .insert(SceneItem::text("hello", pos2(100.0, 100.0), 14.0, Color32::BLACK));
    let mut tool =
        MoveTool::new(Mode::Select, |_| {}).with_text_hand_off(move || flag.set(true));

    // First click selects, second click hands off.
    tool.on_mouse_down(text, HitProps::default(), &mut ctx, &mut store);
    tool.on_mouse_up(&mut ctx);
    tool.on_mouse_down(
        text,
        HitProps {
            double_clicked: true,
            ..Default::default()
        },
        &mut ctx,
        &mut store,
    );
    assert!(handed_off.get());
    assert!(!tool.is_dragging());
}

#[test]
fn drag_point_is_clamped_to_action_bounds() {
    let mut rig = Rig::new(Mode::Select);
    let item = rig.ctx.scene.insert(circle_at(pos2(100.0, 100.0)));

    rig.mouse_down(item, HitProps::default());
    rig.drag(pos2(100.0, 100.0), pos2(100_000.0, 100.0));
    rig.mouse_up();

    let position = rig.ctx.scene.position_of(item);
    assert!(rig.ctx.view.action_bounds().right() >= position.x);
    assert!(position.x > 100.0);
}
