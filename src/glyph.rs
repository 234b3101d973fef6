//! Outlines for stamp labels, taken from the fonts egui bundles.
//!
//! Each character is looked up in the bundled fonts in order, so letters come
//! from the proportional font and emoji from the emoji fonts. A character that
//! no font covers is drawn as a hollow box so the stamp is still visible.

use ab_glyph::{Font, FontArc, FontVec, GlyphId, OutlineCurve, PxScale, ScaleFont};
use once_cell::sync::Lazy;
use tiny_skia::{Path, PathBuilder, Rect};

/// Font size of stamp labels, in logical units
pub const STAMP_SIZE: f32 = 24.0;

/// Searched in this order for every character
const FONT_FALLBACK: [&str; 4] = ["Ubuntu-Light", "NotoEmoji-Regular", "emoji-icon-font", "Hack"];

/// Advance of a whitespace character, relative to the font size
const SPACE_ADVANCE: f32 = 0.3;

/// Width of the box drawn for an uncovered character, relative to the font size
const MISSING_ADVANCE: f32 = 0.6;

static FONTS: Lazy<Vec<FontArc>> = Lazy::new(load_fonts);

fn load_fonts() -> Vec<FontArc> {
    let definitions = egui::FontDefinitions::default();
    FONT_FALLBACK
        .iter()
        .filter_map(|name| {
            let data = definitions.font_data.get(*name)?;
            match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
                Ok(font) => Some(FontArc::new(font)),
                Err(err) => {
                    log::warn!("Skipping bundled font {name}: {err}");
                    None
                }
            }
        })
        .collect()
}

fn find_glyph(ch: char) -> Option<(&'static FontArc, GlyphId)> {
    FONTS.iter().find_map(|font| {
        let id = font.glyph_id(ch);
        (id.0 != 0).then_some((font, id))
    })
}

/// Emoji presentation selectors and joiners carry no outline of their own.
fn is_invisible(ch: char) -> bool {
    matches!(ch, '\u{FE0E}' | '\u{FE0F}' | '\u{200D}')
}

/// A laid-out label: filled glyph outlines plus boxes for uncovered characters.
///
/// Coordinates are logical units with the baseline at `y = 0` and the pen
/// starting at `x = 0`. Callers centre the shape using [`LabelShape::bounds`].
#[derive(Debug, Clone)]
pub struct LabelShape {
    glyphs: Option<Path>,
    missing: Vec<Rect>,
    bounds: Rect,
}

impl LabelShape {
    /// Lay out `label` left to right at `size`. Returns `None` if nothing in
    /// the label would leave a mark.
    pub fn for_label(label: &str, size: f32) -> Option<Self> {
        let mut builder = PathBuilder::new();
        let mut missing = Vec::new();
        let mut pen = 0.0;

        for ch in label.chars().filter(|ch| !is_invisible(*ch)) {
            if ch.is_whitespace() {
                pen += size * SPACE_ADVANCE;
                continue;
            }

            match find_glyph(ch) {
                Some((font, id)) => {
                    let scaled = font.as_scaled(PxScale::from(size));
                    if let Some(outline) = font.outline(id) {
                        append_outline(
                            &mut builder,
                            &outline.curves,
                            pen,
                            scaled.h_scale_factor(),
                            scaled.v_scale_factor(),
                        );
                    }
                    pen += scaled.h_advance(id);
                }
                None => {
                    log::debug!("No bundled font covers {ch:?}");
                    let advance = size * MISSING_ADVANCE;
                    let inset = size * 0.05;
                    if let Some(rect) =
                        Rect::from_xywh(pen + inset, -size * 0.75, advance - 2.0 * inset, size * 0.75)
                    {
                        missing.push(rect);
                    }
                    pen += advance;
                }
            }
        }

        let glyphs = builder.finish();
        let bounds = glyphs
            .iter()
            .map(Path::bounds)
            .chain(missing.iter().copied())
            .reduce(union)?;

        Some(Self {
            glyphs,
            missing,
            bounds,
        })
    }

    /// Filled outlines of every covered character
    pub fn glyphs(&self) -> Option<&Path> {
        self.glyphs.as_ref()
    }

    /// Hollow boxes standing in for characters no font covers
    pub fn missing(&self) -> &[Rect] {
        &self.missing
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    Rect::from_ltrb(
        a.left().min(b.left()),
        a.top().min(b.top()),
        a.right().max(b.right()),
        a.bottom().max(b.bottom()),
    )
    .unwrap_or(a)
}

/// Copy font-unit curves into `builder`, flipping y so the baseline sits at 0.
fn append_outline(builder: &mut PathBuilder, curves: &[OutlineCurve], origin_x: f32, h_scale: f32, v_scale: f32) {
    let map = |p: ab_glyph::Point| (origin_x + p.x * h_scale, -p.y * v_scale);
    let mut cursor: Option<ab_glyph::Point> = None;

    for curve in curves {
        let (OutlineCurve::Line(start, _) | OutlineCurve::Quad(start, _, _) | OutlineCurve::Cubic(start, _, _, _)) =
            curve;
        if cursor != Some(*start) {
            if cursor.is_some() {
                builder.close();
            }
            let (x, y) = map(*start);
            builder.move_to(x, y);
        }

        let end = match curve {
            OutlineCurve::Line(_, end) => {
                let (x, y) = map(*end);
                builder.line_to(x, y);
                *end
            }
            OutlineCurve::Quad(_, control, end) => {
                let ((cx, cy), (x, y)) = (map(*control), map(*end));
                builder.quad_to(cx, cy, x, y);
                *end
            }
            OutlineCurve::Cubic(_, c1, c2, end) => {
                let ((x1, y1), (x2, y2), (x, y)) = (map(*c1), map(*c2), map(*end));
                builder.cubic_to(x1, y1, x2, y2, x, y);
                *end
            }
        };
        cursor = Some(end);
    }

    if cursor.is_some() {
        builder.close();
    }
}
