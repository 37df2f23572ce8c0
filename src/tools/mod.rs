//! Interactive tools. Each tool is a small state machine driven by
//! mouse-down / drag / mouse-up events; one gesture per cycle, and no tool
//! state survives past mouse-up.

use egui::Pos2;

mod brush_tool;
mod move_tool;
mod oval_tool;

pub use brush_tool::BrushTool;
pub use move_tool::{MoveTool, SNAPPING_THRESHOLD};
pub use oval_tool::OvalTool;

/// Modifier and click facts accompanying a mouse-down on a hit item.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitProps {
    /// Duplicate the selection in place before dragging (alt held).
    pub clone: bool,
    /// Add to / toggle within the selection instead of replacing it
    /// (shift held).
    pub multiselect: bool,
    /// Second click on the same spot within the double-click window.
    pub double_clicked: bool,
}

/// One drag movement within a gesture.
#[derive(Debug, Clone, Copy)]
pub struct DragEvent {
    /// Current pointer position in art-board coordinates.
    pub point: Pos2,
    /// Pointer position at mouse-down.
    pub down_point: Pos2,
    /// Axis-lock modifier (shift): quantizes the drag to 45 degree steps
    /// and suppresses center snapping.
    pub axis_lock: bool,
}

impl DragEvent {
    pub fn new(point: Pos2, down_point: Pos2) -> Self {
        Self {
            point,
            down_point,
            axis_lock: false,
        }
    }
}
