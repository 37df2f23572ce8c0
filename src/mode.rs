use serde::{Deserialize, Serialize};

/// Closed set of editor tool modes across both authoring formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    // Vector modes
    Brush,
    Eraser,
    Fill,
    Line,
    Oval,
    Rect,
    Select,
    Reshape,
    Text,
    // Bitmap modes
    BitBrush,
    BitEraser,
    BitFill,
    BitLine,
    BitOval,
    BitRect,
    BitSelect,
    BitText,
}

impl Mode {
    pub fn is_bitmap(self) -> bool {
        matches!(
            self,
            Mode::BitBrush
                | Mode::BitEraser
                | Mode::BitFill
                | Mode::BitLine
                | Mode::BitOval
                | Mode::BitRect
                | Mode::BitSelect
                | Mode::BitText
        )
    }

    pub fn is_vector(self) -> bool {
        !self.is_bitmap()
    }

    /// The bitmap tool a vector mode lands on when the format switches.
    ///
    /// Total over the vector modes; calling it with a bitmap mode is a
    /// programmer error and fails fast.
    pub fn bitmap_counterpart(self) -> Mode {
        match self {
            Mode::Brush => Mode::BitBrush,
            Mode::Eraser => Mode::BitEraser,
            Mode::Fill => Mode::BitFill,
            Mode::Line => Mode::BitLine,
            Mode::Oval => Mode::BitOval,
            Mode::Rect => Mode::BitRect,
            // Reshape has no bitmap equivalent; it degrades to selection.
            Mode::Select | Mode::Reshape => Mode::BitSelect,
            Mode::Text => Mode::BitText,
            _ => unreachable!("bitmap counterpart requested for bitmap mode {self:?}"),
        }
    }

    /// The vector tool a bitmap mode lands on when the format switches.
    ///
    /// Total over the bitmap modes; calling it with a vector mode is a
    /// programmer error and fails fast.
    pub fn vector_counterpart(self) -> Mode {
        match self {
            Mode::BitBrush => Mode::Brush,
            Mode::BitEraser => Mode::Eraser,
            Mode::BitFill => Mode::Fill,
            Mode::BitLine => Mode::Line,
            Mode::BitOval => Mode::Oval,
            Mode::BitRect => Mode::Rect,
            Mode::BitSelect => Mode::Select,
            Mode::BitText => Mode::Text,
            _ => unreachable!("vector counterpart requested for vector mode {self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_MODES: [Mode; 9] = [
        Mode::Brush,
        Mode::Eraser,
        Mode::Fill,
        Mode::Line,
        Mode::Oval,
        Mode::Rect,
        Mode::Select,
        Mode::Reshape,
        Mode::Text,
    ];

    const BITMAP_MODES: [Mode; 8] = [
        Mode::BitBrush,
        Mode::BitEraser,
        Mode::BitFill,
        Mode::BitLine,
        Mode::BitOval,
        Mode::BitRect,
        Mode::BitSelect,
        Mode::BitText,
    ];

    #[test]
    fn every_vector_mode_maps_to_a_bitmap_mode() {
        for mode in VECTOR_MODES {
            assert!(mode.is_vector());
            assert!(mode.bitmap_counterpart().is_bitmap());
        }
    }

    #[test]
    fn every_bitmap_mode_maps_to_a_vector_mode() {
        for mode in BITMAP_MODES {
            assert!(mode.is_bitmap());
            assert!(mode.vector_counterpart().is_vector());
        }
    }

    #[test]
    fn select_modes_round_trip() {
        assert_eq!(Mode::Select.bitmap_counterpart(), Mode::BitSelect);
        assert_eq!(Mode::BitSelect.vector_counterpart(), Mode::Select);
        // Reshape degrades to plain selection across the boundary.
        assert_eq!(Mode::Reshape.bitmap_counterpart(), Mode::BitSelect);
    }

    #[test]
    #[should_panic(expected = "bitmap counterpart")]
    fn bitmap_mode_in_bitmap_lookup_is_a_programmer_error() {
        let _ = Mode::BitBrush.bitmap_counterpart();
    }
}
