//! Conversion between the two authoring formats.
//!
//! Vector to bitmap exports the scene to an encoded payload, decodes it
//! asynchronously (the one async boundary in the crate), and draws the
//! result onto the bitmap layer; decode failure falls back to direct
//! rasterization so the pipeline can never stall. Bitmap to vector trims
//! the bitmap layer to its opaque bounds and lifts the region into the
//! scene as a single raster item. Both directions signal exactly one image
//! update per conversion, and only after the work has resolved.

use egui::{Rect, Vec2, pos2, vec2};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use log::{debug, warn};

use crate::context::EditorContext;
use crate::error::{ConversionError, DecodeError};
use crate::raster::{PixelBuffer, hit_bounds};
use crate::scene::{ExportedImage, SceneItem, export_payload, rasterize_scene};
use crate::selection::{SelectionStore, clear_selection};
use crate::update::{ImageUpdate, UpdateSignal};
use crate::view::BITMAP_SCALE;

/// Asynchronous decoder for exported image payloads.
pub trait PayloadDecoder {
    fn decode(
        &mut self,
        payload: &ExportedImage,
    ) -> LocalBoxFuture<'static, Result<PixelBuffer, DecodeError>>;
}

/// Default decoder for the PNG payloads the exporter produces.
#[derive(Debug, Default)]
pub struct PngPayloadDecoder;

impl PayloadDecoder for PngPayloadDecoder {
    fn decode(
        &mut self,
        payload: &ExportedImage,
    ) -> LocalBoxFuture<'static, Result<PixelBuffer, DecodeError>> {
        let bytes = payload.png.clone();
        async move {
            if bytes.is_empty() {
                return Err(DecodeError::EmptyPayload);
            }
            let image = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?;
            let rgba = image.to_rgba8();
            Ok(PixelBuffer::from_rgba(
                rgba.width(),
                rgba.height(),
                rgba.into_raw(),
            ))
        }
        .boxed_local()
    }
}

/// Orchestrates bitmap/vector format conversion.
pub struct BitmapVectorBridge<D = PngPayloadDecoder> {
    decoder: D,
    on_update_image: UpdateSignal,
}

impl<D: PayloadDecoder> BitmapVectorBridge<D> {
    pub fn new(decoder: D, on_update_image: impl FnMut(&ImageUpdate) + 'static) -> Self {
        Self {
            decoder,
            on_update_image: Box::new(on_update_image),
        }
    }

    /// Vector to bitmap conversion.
    ///
    /// Export failure propagates; guide layers are restored before this
    /// returns on every path, including the error path.
    pub async fn convert_to_bitmap(
        &mut self,
        ctx: &mut EditorContext,
        store: &mut SelectionStore,
    ) -> Result<(), ConversionError> {
        clear_selection(&mut ctx.scene, store);

        // Hide guides, export, restore. The guard restores visibility when
        // the block exits, before any error leaves this function.
        let payload = {
            let _guard = ctx.guides.hide_for_export();
            export_payload(&ctx.scene)
        }?;

        let Some(payload) = payload else {
            debug!("no vector content to convert");
            ctx.scene.clear_content();
            (self.on_update_image)(&ImageUpdate::bitmap(&ctx.bitmap));
            return Ok(());
        };

        let decoded = match self.decoder.decode(&payload).await {
            Ok(pixels) => pixels,
            Err(err) => {
                // Forward progress over fidelity: rasterize the scene
                // directly instead of surfacing the failure.
                warn!("payload decode failed ({err}), rasterizing scene directly");
                let mut pixels =
                    PixelBuffer::new(payload.bounds.width * 2, payload.bounds.height * 2);
                rasterize_scene(
                    &ctx.scene,
                    BITMAP_SCALE,
                    Vec2::new(-payload.bounds.left as f32, -payload.bounds.top as f32),
                    &mut pixels,
                );
                pixels
            }
        };

        // Content keeps its art-board-center registration: vector
        // coordinates land at twice their value in bitmap space.
        ctx.bitmap.blit(
            &decoded,
            payload.bounds.left * BITMAP_SCALE as i32,
            payload.bounds.top * BITMAP_SCALE as i32,
        );
        ctx.scene.clear_content();
        (self.on_update_image)(&ImageUpdate::bitmap(&ctx.bitmap));
        Ok(())
    }

    /// Bitmap to vector conversion.
    ///
    /// A fully transparent bitmap layer discards the bitmap content
    /// entirely; otherwise the trimmed region becomes one raster item.
    pub fn convert_to_vector(&mut self, ctx: &mut EditorContext, store: &mut SelectionStore) {
        clear_selection(&mut ctx.scene, store);

        match hit_bounds(&ctx.bitmap) {
            None => {
                debug!("bitmap layer is empty, discarding");
            }
            Some(bounds) => {
                let pixels = ctx.bitmap.sub_buffer(bounds);
                let rect = Rect::from_min_size(
                    pos2(
                        bounds.left as f32 / BITMAP_SCALE,
                        bounds.top as f32 / BITMAP_SCALE,
                    ),
                    vec2(
                        bounds.width as f32 / BITMAP_SCALE,
                        bounds.height as f32 / BITMAP_SCALE,
                    ),
                );
                debug!("lifting {bounds:?} into the vector scene");
                ctx.scene.insert(SceneItem::raster(pixels, rect));
            }
        }
        ctx.bitmap.clear();
        (self.on_update_image)(&ImageUpdate::vector(&ctx.scene));
    }
}
