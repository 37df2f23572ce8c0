use thiserror::Error;

/// Failure to export the vector scene to an encoded image payload.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode scene payload: {0}")]
    Encode(#[from] image::ImageError),
}

/// Failure to decode an exported image payload.
///
/// Decode failures are never surfaced out of a conversion; the bridge falls
/// back to direct rasterization instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode image payload: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image payload is empty")]
    EmptyPayload,
}

/// Failure of a bitmap/vector mode conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("vector export failed: {0}")]
    Export(#[from] ExportError),
}
