use crate::drawable::Drawable;
use crate::error::ExportError;
use crate::renderer::{Frame, Renderer};
use crate::surface::Surface;

/// Upscale factor of exported images relative to the on-screen canvas
pub const DEFAULT_EXPORT_SCALE: f32 = 4.0;

/// Largest exported image side, in pixels
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// Pixel size of a `width` x `height` canvas exported at `scale`
pub fn export_size(width: u32, height: u32, scale: f32) -> (u64, u64) {
    let side = |logical: u32| (logical as f64 * scale as f64).round() as u64;
    (side(width), side(height))
}

/// Renders the committed drawing onto a fresh, larger surface.
///
/// Only committed drawables are exported: never the in-progress stroke or
/// the cursor preview. The on-screen surface is not touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportCompositor {
    logical_width: u32,
    logical_height: u32,
    scale: f32,
}

impl ExportCompositor {
    pub fn new(logical_width: u32, logical_height: u32, scale: f32) -> Self {
        Self {
            logical_width,
            logical_height,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Compose `committed` at export scale. Fails when the output would be
    /// larger than [`MAX_EXPORT_SIDE`] or cannot be allocated.
    pub fn compose(&self, renderer: &Renderer, committed: &[Drawable]) -> Result<Surface, ExportError> {
        let too_large = ExportError::TooLarge {
            width: self.logical_width,
            height: self.logical_height,
            scale: self.scale,
        };
        let (width, height) = export_size(self.logical_width, self.logical_height, self.scale);
        if width > MAX_EXPORT_SIDE as u64 || height > MAX_EXPORT_SIDE as u64 {
            return Err(too_large);
        }
        let mut output = Surface::with_scale(self.logical_width, self.logical_height, self.scale)
            .ok_or(too_large)?;
        renderer.repaint(
            &mut output,
            &Frame {
                committed,
                in_progress: None,
                preview: None,
            },
        );
        log::debug!(
            "Composed {} drawables at {}x{}",
            committed.len(),
            output.pixel_width(),
            output.pixel_height()
        );
        Ok(output)
    }

    /// Compose and encode as PNG
    pub fn export_png(&self, renderer: &Renderer, committed: &[Drawable]) -> Result<Vec<u8>, ExportError> {
        let png = self.compose(renderer, committed)?.to_png()?;
        log::info!("Exported {} drawables as {} byte PNG", committed.len(), png.len());
        Ok(png)
    }
}
