use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::assets::{FsTileSource, TileCache, TileSource};
use crate::canvas::Canvas;
use crate::coords::Markers;
use crate::error::TileboardResult;
use crate::geometry::{self, BoardStyle};
use crate::notation::Board;
use crate::text::BorderFont;

/// Render one position to a canvas.
///
/// Orchestrates the full pipeline: parse, resolve markers, compute layout,
/// composite. Errors are detected as early as possible (notation before
/// geometry, geometry before compositing) and abort the render; nothing is
/// partially produced.
#[tracing::instrument(skip(source, font), fields(tile_size = style.tile_size))]
pub fn render_position(
    position: &str,
    markers: &Markers,
    style: &BoardStyle,
    source: Box<dyn TileSource>,
    font: Option<&BorderFont>,
) -> TileboardResult<Canvas> {
    let board = Board::parse(position)?;
    let resolved = markers.resolve(&board)?;
    let layout = geometry::layout(&board, style, font)?;
    tracing::debug!(
        board_width = board.width(),
        board_height = board.height(),
        canvas_width = layout.canvas_width,
        canvas_height = layout.canvas_height,
        "layout computed"
    );

    let mut cache = TileCache::new(layout.tile_size, source);
    crate::render::compose(&board, &layout, &resolved, &mut cache, style, font)
}

/// Encode a rendered canvas as PNG bytes (straight alpha).
pub fn encode_png(canvas: &Canvas) -> TileboardResult<Vec<u8>> {
    let straight = canvas.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), straight)
        .context("canvas buffer matches its dimensions")?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(bytes)
}

/// Render a position and write the PNG to `out_path`.
///
/// The file is written only after the render fully succeeds, so a failed
/// render never leaves partial output behind.
#[tracing::instrument(skip(markers, style))]
pub fn render_to_file(
    position: &str,
    out_path: &Path,
    markers: &Markers,
    style: &BoardStyle,
    tileset_root: &Path,
    font_path: Option<&Path>,
) -> TileboardResult<()> {
    let font = match font_path {
        Some(path) => Some(BorderFont::load(path)?),
        None => None,
    };

    let canvas = render_position(
        position,
        markers,
        style,
        Box::new(FsTileSource::new(tileset_root)),
        font.as_ref(),
    )?;
    let bytes = encode_png(&canvas)?;

    std::fs::write(out_path, &bytes)
        .with_context(|| format!("write output '{}'", out_path.display()))?;
    Ok(())
}
