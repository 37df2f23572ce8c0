#![warn(clippy::all, rust_2018_idioms)]

pub mod bridge;
pub mod context;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod mode;
pub mod raster;
pub mod scene;
pub mod selection;
pub mod tools;
pub mod update;
pub mod view;

pub use bridge::{BitmapVectorBridge, PayloadDecoder, PngPayloadDecoder};
pub use context::EditorContext;
pub use error::{ConversionError, DecodeError, ExportError};
pub use geometry::IntRect;
pub use mode::Mode;
pub use raster::{DrawingSurface, PixelBuffer, PixelPainter};
pub use scene::{ItemId, SceneGraph, VectorDocument};
pub use selection::{Granularity, SelectionStore};
pub use tools::{BrushTool, DragEvent, HitProps, MoveTool, OvalTool};
pub use update::{ImageUpdate, UpdatePayload};
