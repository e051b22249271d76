use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::coords::to_base26;
use crate::error::{TileboardError, TileboardResult};
use crate::notation::Board;
use crate::text::BorderFont;

/// Hard cap on either canvas side, in pixels.
///
/// Boards in the tens of thousands of pixels per side are expected to work;
/// anything past this cap fails fast instead of attempting a raster the
/// encoder cannot represent.
pub const MAX_CANVAS_DIM: u32 = 32_768;

/// Every size and color knob of one render.
///
/// Serializes as JSON so a full style can live in a file; all fields have
/// defaults matching the classic diagram look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardStyle {
    /// Square tile edge length in pixels (the tileset's native size).
    pub tile_size: u32,

    pub border: bool,
    pub border_uppercase: bool,
    pub border_color: Color,
    pub border_font_color: Color,

    pub outer_outline: bool,
    pub outer_outline_color: Color,
    pub inner_outline: bool,
    pub inner_outline_color: Color,

    pub checkerboard: bool,
    pub checkerboard_color1: Color,
    pub checkerboard_color2: Color,
    /// Flat fill drawn under holes. `None` keeps holes fully transparent.
    pub hole_color: Option<Color>,

    /// Paste piece tiles (the checkerboard can be rendered alone).
    pub pieces: bool,

    pub dot_color: Color,
    pub cross_color: Color,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            tile_size: 42,
            border: true,
            border_uppercase: false,
            border_color: Color::rgba(1.0, 1.0, 1.0, 1.0),
            border_font_color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            outer_outline: true,
            outer_outline_color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            inner_outline: true,
            inner_outline_color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            checkerboard: true,
            checkerboard_color1: Color::from_hex("#ffce9e").expect("static color"),
            checkerboard_color2: Color::from_hex("#d18b47").expect("static color"),
            hole_color: None,
            pieces: true,
            dot_color: Color::from_hex("#cc0000").expect("static color"),
            cross_color: Color::from_hex("#cc0000").expect("static color"),
        }
    }
}

impl BoardStyle {
    /// Reject styles no layout can be computed for.
    pub fn validate(&self) -> TileboardResult<()> {
        if self.tile_size == 0 {
            return Err(TileboardError::config("tile_size must be at least 1"));
        }
        if self.tile_size > MAX_CANVAS_DIM {
            return Err(TileboardError::config(format!(
                "tile_size {} exceeds the maximum canvas side of {MAX_CANVAS_DIM}",
                self.tile_size
            )));
        }
        Ok(())
    }
}

/// Outline thickness for a tile size: 1px per 100px of tile, minimum 1.
pub fn outline_size(tile_size: u32) -> u32 {
    (tile_size / 100).max(1)
}

/// Border label font size: a third of the tile, floor of 12px so labels
/// stay readable on small tiles.
pub fn border_font_size(tile_size: u32) -> u32 {
    (tile_size / 3).max(12)
}

/// Derived pixel geometry of one render. Computed once, immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub tile_size: u32,
    pub outer_outline_size: u32,
    pub border_size: u32,
    pub border_font_size: u32,
    pub inner_outline_size: u32,
    /// Top-left pixel of the playable grid.
    pub board_origin: (u32, u32),
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Compute the pixel layout for `board` under `style`.
///
/// The border band must fit the widest column letters and rank numbers, so
/// a font is required whenever the border is enabled.
pub fn layout(
    board: &Board,
    style: &BoardStyle,
    font: Option<&BorderFont>,
) -> TileboardResult<Layout> {
    style.validate()?;

    let tile_size = style.tile_size;
    let outer = if style.outer_outline {
        outline_size(tile_size)
    } else {
        0
    };
    let inner = if style.inner_outline {
        outline_size(tile_size)
    } else {
        0
    };
    let font_px = border_font_size(tile_size);

    let border = if style.border {
        let font = font.ok_or_else(|| {
            TileboardError::config("the border is enabled but no border font was provided")
        })?;

        // Widest labels the border will ever hold: the letters one past the
        // last column, and the bottom rank number. 10px of padding.
        let widest_letters = to_base26(board.width());
        let widest_number = board.height().to_string();
        let letters_w = font.measure(&widest_letters, font_px as f32) + 10;
        let numbers_w = font.measure(&widest_number, font_px as f32) + 10;
        (tile_size / 2).max(letters_w).max(numbers_w)
    } else {
        0
    };

    let margin = u64::from(outer) + u64::from(border) + u64::from(inner);
    let canvas_width = (board.width() as u64) * u64::from(tile_size) + 2 * margin;
    let canvas_height = (board.height() as u64) * u64::from(tile_size) + 2 * margin;

    for (side, label) in [(canvas_width, "width"), (canvas_height, "height")] {
        if side > u64::from(MAX_CANVAS_DIM) {
            return Err(TileboardError::dimension(format!(
                "canvas {label} {side}px exceeds the {MAX_CANVAS_DIM}px limit"
            )));
        }
    }

    let margin = margin as u32;
    Ok(Layout {
        tile_size,
        outer_outline_size: outer,
        border_size: border,
        border_font_size: font_px,
        inner_outline_size: inner,
        board_origin: (margin, margin),
        canvas_width: canvas_width as u32,
        canvas_height: canvas_height as u32,
    })
}
