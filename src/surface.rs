use std::io::Cursor;

use egui::{Color32, ColorImage, Pos2, Rect, Vec2, pos2, vec2};
use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Transform};

use crate::error::ExportError;
use crate::glyph::LabelShape;

/// Outline width of the box drawn for an uncovered stamp character, in logical units
const MISSING_OUTLINE: f32 = 1.5;

/// A CPU raster that drawables paint onto.
///
/// Callers work in logical coordinates; the surface multiplies them by its
/// `scale` to reach device pixels. Antialiasing is off, so a pixel is either
/// untouched or fully inked and painting the same scene twice always
/// produces identical pixels.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
    logical_size: Vec2,
    scale: f32,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("logical_size", &self.logical_size)
            .field("scale", &self.scale)
            .field("pixel_width", &self.pixmap.width())
            .field("pixel_height", &self.pixmap.height())
            .finish()
    }
}

fn paint(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint
}

fn premultiplied(color: Color32) -> PremultipliedColorU8 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a).premultiply().to_color_u8()
}

impl Surface {
    /// Create a surface whose device pixels match its logical size.
    /// Returns `None` for an empty or unallocatable size.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Self::with_scale(width, height, 1.0)
    }

    /// Create a surface of `logical_width` x `logical_height` units rendered at `scale`.
    pub fn with_scale(logical_width: u32, logical_height: u32, scale: f32) -> Option<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let pixel_width = ((logical_width as f32) * scale).round();
        let pixel_height = ((logical_height as f32) * scale).round();
        if pixel_width > u32::MAX as f32 || pixel_height > u32::MAX as f32 {
            return None;
        }

        Some(Self {
            pixmap: Pixmap::new(pixel_width as u32, pixel_height as u32)?,
            logical_size: vec2(logical_width as f32, logical_height as f32),
            scale,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Color of the device pixel at (x, y), or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixmap.pixel(x, y).map(|pixel| {
            let c = pixel.demultiply();
            Color32::from_rgba_unmultiplied(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Raw premultiplied RGBA bytes, row by row
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Device-pixel rectangle containing every pixel that differs from `background`.
    pub fn painted_bounds(&self, background: Color32) -> Option<Rect> {
        let background = premultiplied(background);
        let width = self.pixmap.width() as usize;
        let mut bounds: Option<Rect> = None;
        for (i, pixel) in self.pixmap.pixels().iter().enumerate() {
            if *pixel == background {
                continue;
            }
            let cell = Rect::from_min_size(pos2((i % width) as f32, (i / width) as f32), Vec2::splat(1.0));
            bounds = Some(bounds.map_or(cell, |b| b.union(cell)));
        }
        bounds
    }

    /// Trace a connected polyline through `points`, `width` logical units
    /// wide, with round joins and caps.
    ///
    /// The whole line is filled as one path, so translucent colors do not
    /// darken where segments meet.
    pub fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let pen = tiny_skia::Stroke {
            width: self.visible_width(width),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &pen, self.device_transform(), None);
    }

    /// Draw an unfilled circle of `diameter` logical units centred at `center`.
    pub fn stroke_circle(&mut self, center: Pos2, diameter: f32, line_width: f32, color: Color32) {
        let Some(circle) = PathBuilder::from_circle(center.x, center.y, diameter * 0.5) else {
            return;
        };
        let pen = tiny_skia::Stroke {
            width: self.visible_width(line_width),
            ..tiny_skia::Stroke::default()
        };
        self.pixmap
            .stroke_path(&circle, &paint(color), &pen, self.device_transform(), None);
    }

    /// Fill `label` centred on `anchor`, rotated clockwise by
    /// `rotation_degrees` about the anchor.
    pub fn fill_label(&mut self, label: &LabelShape, anchor: Pos2, rotation_degrees: f32, color: Color32) {
        let bounds = label.bounds();
        let centre = (
            bounds.left() + bounds.width() * 0.5,
            bounds.top() + bounds.height() * 0.5,
        );
        let transform = self
            .device_transform()
            .pre_concat(Transform::from_rotate_at(rotation_degrees, anchor.x, anchor.y))
            .pre_translate(anchor.x - centre.0, anchor.y - centre.1);
        let paint = paint(color);

        if let Some(glyphs) = label.glyphs() {
            self.pixmap
                .fill_path(glyphs, &paint, FillRule::Winding, transform, None);
        }

        let pen = tiny_skia::Stroke {
            width: self.visible_width(MISSING_OUTLINE),
            ..tiny_skia::Stroke::default()
        };
        for rect in label.missing() {
            let outline = PathBuilder::from_rect(*rect);
            self.pixmap.stroke_path(&outline, &paint, &pen, transform, None);
        }
    }

    /// Copy the pixels into an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_premultiplied(
            [self.pixmap.width() as usize, self.pixmap.height() as usize],
            self.pixmap.data(),
        )
    }

    /// Unpremultiplied copy of the pixels
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            let rgba = self.pixmap.pixel(x, y).map_or([0; 4], |pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            });
            Rgba(rgba)
        })
    }

    /// Encode the surface as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.to_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn device_transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// Logical line width, widened so it covers at least one device pixel
    fn visible_width(&self, width: f32) -> f32 {
        width.max(1.0 / self.scale)
    }
}
