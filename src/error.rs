use thiserror::Error;

/// Errors raised while validating tool parameters or loading a [`crate::SketchConfig`].
///
/// Everything past this boundary is infallible: the session controller only
/// ever sees values that already passed these checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("marker thickness must be a positive finite number, got {0}")]
    InvalidThickness(f32),

    #[error("stamp label must not be empty")]
    EmptyStampLabel,

    #[error("export scale must be a positive finite number, got {0}")]
    InvalidExportScale(f32),

    #[error("canvas size must be non-zero, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("canvas must be at most {max}x{max}, got {width}x{height}")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },

    #[error("export would be {width}x{height} pixels, the limit is {max} per side")]
    ExportTooLarge { width: u64, height: u64, max: u32 },

    #[error("at least one marker preset is required")]
    NoMarkers,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur while encoding or writing an exported drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot allocate a {width}x{height} canvas at scale {scale}")]
    TooLarge { width: u32, height: u32, scale: f32 },

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
