use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};

use crate::canvas::Canvas;
use crate::color::Rgba8Premul;
use crate::error::{TileboardError, TileboardResult};

/// TrueType/OpenType font used for border coordinate labels.
pub struct BorderFont {
    font: FontVec,
}

impl BorderFont {
    pub fn load(path: &Path) -> TileboardResult<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            TileboardError::asset(format!("unable to load font {}: {err}", path.display()))
        })?;
        Self::from_bytes(bytes)
            .map_err(|err| TileboardError::asset(format!("{}: {err}", path.display())))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| "not a parsable font".to_string())?;
        Ok(Self { font })
    }

    /// Advance width of `text` at pixel size `px`, rounded up.
    pub fn measure(&self, text: &str, px: f32) -> u32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width.ceil().max(0.0) as u32
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// Glyph coverage is alpha-blended into the canvas; pixels falling
    /// outside the canvas are clipped by the blend call.
    pub fn draw(&self, canvas: &mut Canvas, x: u32, y: u32, text: &str, px: f32, color: Rgba8Premul) {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let baseline = y as f32 + scaled.ascent();

        let mut caret = x as f32;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, v| {
                    let px_x = bounds.min.x + gx as f32;
                    let px_y = bounds.min.y + gy as f32;
                    if px_x < 0.0 || px_y < 0.0 {
                        return;
                    }
                    canvas.blend_pixel(px_x as u32, px_y as u32, scale_coverage(color, v));
                });
            }

            caret += scaled.h_advance(id);
            prev = Some(id);
        }
    }
}

fn scale_coverage(color: Rgba8Premul, v: f32) -> Rgba8Premul {
    let v = v.clamp(0.0, 1.0);
    let scale = |c: u8| ((c as f32) * v + 0.5) as u8;
    Rgba8Premul {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
        a: scale(color.a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Metric and drawing tests need a real font and live in
    // tests/border_render.rs against a system font; this module only covers
    // the coverage scaling math.

    #[test]
    fn coverage_scales_all_channels() {
        let c = Rgba8Premul {
            r: 200,
            g: 100,
            b: 50,
            a: 255,
        };
        assert_eq!(scale_coverage(c, 0.0), Rgba8Premul::transparent());
        assert_eq!(scale_coverage(c, 1.0), c);
        let half = scale_coverage(c, 0.5);
        assert!((half.a as i32 - 128).abs() <= 1);
        assert!((half.r as i32 - 100).abs() <= 1);
    }
}
