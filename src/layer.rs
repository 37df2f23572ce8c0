//! Guide layers: non-content overlays that must never leak into exports.

use log::trace;

/// The center crosshair shown above a dragged selection.
#[derive(Debug, Clone)]
pub struct CrosshairLayer {
    pub visible: bool,
    /// 1.0 at canvas center, fading to 0.0 with distance.
    pub opacity: f32,
}

impl Default for CrosshairLayer {
    fn default() -> Self {
        Self {
            visible: false,
            opacity: 1.0,
        }
    }
}

/// All guide layers, with the hide/restore protocol export depends on.
#[derive(Debug, Clone, Default)]
pub struct GuideLayers {
    pub crosshair: CrosshairLayer,
    /// Selection outline overlay shown around selected items.
    pub outline_visible: bool,
}

impl GuideLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hides every guide layer for the duration of an export and returns a
    /// guard that restores the saved visibility when dropped, on every exit
    /// path including failure.
    pub fn hide_for_export(&mut self) -> GuideVisibilityGuard<'_> {
        let saved = (self.crosshair.visible, self.outline_visible);
        self.crosshair.visible = false;
        self.outline_visible = false;
        trace!("guide layers hidden for export");
        GuideVisibilityGuard {
            layers: self,
            saved,
        }
    }
}

/// Restores guide layer visibility on drop.
pub struct GuideVisibilityGuard<'a> {
    layers: &'a mut GuideLayers,
    saved: (bool, bool),
}

impl Drop for GuideVisibilityGuard<'_> {
    fn drop(&mut self) {
        self.layers.crosshair.visible = self.saved.0;
        self.layers.outline_visible = self.saved.1;
        trace!("guide layers restored after export");
    }
}
