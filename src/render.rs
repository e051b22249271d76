use crate::assets::TileCache;
use crate::canvas::Canvas;
use crate::coords::{MarkerKind, to_base26};
use crate::error::{TileboardError, TileboardResult};
use crate::geometry::{BoardStyle, Layout};
use crate::notation::{Board, Cell};
use crate::text::BorderFont;

/// Composite one board render onto a fresh canvas.
///
/// Draw order is a contract, not an implementation detail:
/// 1. transparent canvas;
/// 2. border band and coordinate labels;
/// 3. inner outline;
/// 4. cells in reading order (checkerboard square, then piece tile);
/// 5. dots, then crosses;
/// 6. outer outline.
///
/// Holes are skipped entirely unless a hole fill color is configured, which
/// is what produces irregular board shapes.
pub fn compose(
    board: &Board,
    layout: &Layout,
    markers: &[(usize, usize, MarkerKind)],
    cache: &mut TileCache,
    style: &BoardStyle,
    font: Option<&BorderFont>,
) -> TileboardResult<Canvas> {
    let mut canvas = Canvas::new(layout.canvas_width, layout.canvas_height);
    let ts = layout.tile_size;
    let (ox, oy) = layout.board_origin;

    if style.border {
        let font = font.ok_or_else(|| {
            TileboardError::config("the border is enabled but no border font was provided")
        })?;
        draw_border(&mut canvas, board, layout, style, font);
    }

    if layout.inner_outline_size > 0 {
        let off = layout.outer_outline_size + layout.border_size;
        canvas.stroke_rect(
            off,
            off,
            layout.canvas_width - off - 1,
            layout.canvas_height - off - 1,
            layout.inner_outline_size,
            style.inner_outline_color.to_rgba8_premul(),
        );
    }

    let color1 = style.checkerboard_color1.to_rgba8_premul();
    let color2 = style.checkerboard_color2.to_rgba8_premul();
    let hole = style.hole_color.map(|c| c.to_rgba8_premul());

    for (row, col, cell) in board.cells() {
        let x = ox + (col as u32) * ts;
        let y = oy + (row as u32) * ts;

        if cell.is_hole() {
            if let Some(hole) = hole {
                let tile = cache.fill(hole);
                canvas.blit(x, y, tile.width, tile.height, &tile.rgba8_premul);
            }
            continue;
        }

        if style.checkerboard {
            let color = if (row + col) % 2 == 0 { color1 } else { color2 };
            let tile = cache.fill(color);
            canvas.blit(x, y, tile.width, tile.height, &tile.rgba8_premul);
        }

        if style.pieces
            && let Some((symbol, case)) = cell.piece()
        {
            let tile = cache.piece(symbol, case)?;
            canvas.blit(x, y, tile.width, tile.height, &tile.rgba8_premul);
        }
    }

    for &(row, col, kind) in markers {
        let color = match kind {
            MarkerKind::Dot => style.dot_color.to_rgba8_premul(),
            MarkerKind::Cross => style.cross_color.to_rgba8_premul(),
        };
        let tile = cache.marker(kind, color);
        let x = ox + (col as u32) * ts;
        let y = oy + (row as u32) * ts;
        canvas.blit(x, y, tile.width, tile.height, &tile.rgba8_premul);
    }

    if layout.outer_outline_size > 0 {
        canvas.stroke_rect(
            0,
            0,
            layout.canvas_width - 1,
            layout.canvas_height - 1,
            layout.outer_outline_size,
            style.outer_outline_color.to_rgba8_premul(),
        );
    }

    Ok(canvas)
}

fn draw_border(
    canvas: &mut Canvas,
    board: &Board,
    layout: &Layout,
    style: &BoardStyle,
    font: &BorderFont,
) {
    let ts = layout.tile_size;
    let outer = layout.outer_outline_size;
    let border = layout.border_size;
    let inner = layout.inner_outline_size;
    let font_px = layout.border_font_size as f32;
    let (ox, oy) = layout.board_origin;

    canvas.stroke_rect(
        outer,
        outer,
        layout.canvas_width - outer - 1,
        layout.canvas_height - outer - 1,
        border,
        style.border_color.to_rgba8_premul(),
    );

    let font_color = style.border_font_color.to_rgba8_premul();

    // Vertical centering inside the band; constant for both label rows.
    let band_center = i64::from(border / 2) - i64::from(layout.border_font_size / 2);
    let letters_y_top = i64::from(outer) + band_center;
    let letters_y_bottom =
        i64::from(oy) + i64::from(ts) * (board.height() as i64) + i64::from(inner) + band_center;

    for col in 0..board.width() {
        let mut text = to_base26(col);
        if style.border_uppercase {
            text = text.to_uppercase();
        }
        let w = font.measure(&text, font_px);
        let x = i64::from(ox) + i64::from(ts) * (col as i64) + i64::from(ts / 2) - i64::from(w / 2);
        draw_label(canvas, font, x, letters_y_top, &text, font_px, font_color);
        draw_label(canvas, font, x, letters_y_bottom, &text, font_px, font_color);
    }

    let numbers_x_left = i64::from(outer) + i64::from(border / 2);
    let numbers_x_right = i64::from(ox)
        + i64::from(ts) * (board.width() as i64)
        + i64::from(inner)
        + i64::from(border / 2);

    for row in 0..board.height() {
        // Rank numbers run from the board height down to 1.
        let text = (board.height() - row).to_string();
        let w = font.measure(&text, font_px);
        let y = i64::from(oy) + i64::from(ts) * (row as i64) + i64::from(ts / 2)
            - i64::from(layout.border_font_size / 2);
        draw_label(
            canvas,
            font,
            numbers_x_left - i64::from(w / 2),
            y,
            &text,
            font_px,
            font_color,
        );
        draw_label(
            canvas,
            font,
            numbers_x_right - i64::from(w / 2),
            y,
            &text,
            font_px,
            font_color,
        );
    }
}

fn draw_label(
    canvas: &mut Canvas,
    font: &BorderFont,
    x: i64,
    y: i64,
    text: &str,
    px: f32,
    color: crate::color::Rgba8Premul,
) {
    font.draw(canvas, x.max(0) as u32, y.max(0) as u32, text, px, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{PreparedImage, TileSource};
    use crate::color::{Color, Rgba8Premul};
    use crate::coords::{Coord, Markers};
    use crate::geometry;
    use crate::notation::PieceCase;
    use std::sync::Arc;

    struct SolidSource {
        color: [u8; 4],
    }

    impl TileSource for SolidSource {
        fn load(&mut self, _symbol: char, _case: PieceCase) -> TileboardResult<PreparedImage> {
            Ok(PreparedImage {
                width: 4,
                height: 4,
                rgba8_premul: Arc::new(self.color.repeat(16)),
            })
        }
    }

    fn test_style() -> BoardStyle {
        BoardStyle {
            tile_size: 4,
            border: false,
            outer_outline: false,
            inner_outline: false,
            ..BoardStyle::default()
        }
    }

    fn render(position: &str, style: &BoardStyle, markers: &Markers) -> Canvas {
        let board = Board::parse(position).unwrap();
        let resolved = markers.resolve(&board).unwrap();
        let layout = geometry::layout(&board, style, None).unwrap();
        let mut cache = TileCache::new(
            layout.tile_size,
            Box::new(SolidSource {
                color: [0, 255, 0, 255],
            }),
        );
        compose(&board, &layout, &resolved, &mut cache, style, None).unwrap()
    }

    #[test]
    fn checkerboard_parity_law() {
        let style = test_style();
        let canvas = render("8/8/8/8/8/8/8/8", &style, &Markers::default());
        let ts = style.tile_size;
        let color1 = style.checkerboard_color1.to_rgba8_premul();
        let color2 = style.checkerboard_color2.to_rgba8_premul();

        // (r+c) mod 2 selects the color for every cell.
        for (r, c) in [(0u32, 0u32), (0, 1), (1, 1), (3, 5), (7, 7)] {
            let px = canvas.pixel(c * ts + ts / 2, r * ts + ts / 2).unwrap();
            let expected = if (r + c) % 2 == 0 { color1 } else { color2 };
            assert_eq!(px, expected, "cell ({r},{c})");
        }
        assert_ne!(
            canvas.pixel(ts / 2, ts / 2),
            canvas.pixel(ts + ts / 2, ts / 2)
        );
    }

    #[test]
    fn holes_never_receive_checkerboard() {
        let style = test_style();
        let canvas = render(
            "0001/003/05/2n1n2/1ppppp1/7/7/7/1PPPPP1/2N1N2/05/003/0001",
            &style,
            &Markers::default(),
        );
        let ts = style.tile_size;

        // Hole flanked by playable cells on the Cam board stays transparent.
        for (r, c) in [(0u32, 0u32), (0, 2), (0, 6), (1, 1), (2, 0), (12, 5)] {
            let px = canvas.pixel(c * ts + ts / 2, r * ts + ts / 2).unwrap();
            assert_eq!(px, Rgba8Premul::transparent(), "hole ({r},{c})");
        }
        // The single playable cell of the top rank did get its square.
        let px = canvas.pixel(3 * ts + ts / 2, ts / 2).unwrap();
        assert_ne!(px, Rgba8Premul::transparent());
    }

    #[test]
    fn hole_color_fills_holes_without_checkerboard() {
        let style = BoardStyle {
            hole_color: Some(Color::from_hex("#eeeeee").unwrap()),
            ..test_style()
        };
        let canvas = render("0p", &style, &Markers::default());
        let ts = style.tile_size;
        assert_eq!(
            canvas.pixel(ts / 2, ts / 2).unwrap(),
            style.hole_color.unwrap().to_rgba8_premul()
        );
    }

    #[test]
    fn pieces_paste_over_checkerboard() {
        let style = test_style();
        let canvas = render("p", &style, &Markers::default());
        let px = canvas.pixel(1, 1).unwrap();
        assert_eq!(
            px,
            Rgba8Premul {
                r: 0,
                g: 255,
                b: 0,
                a: 255
            }
        );
    }

    #[test]
    fn piece_pasting_can_be_disabled() {
        let style = BoardStyle {
            pieces: false,
            ..test_style()
        };
        let canvas = render("p", &style, &Markers::default());
        assert_eq!(
            canvas.pixel(1, 1).unwrap(),
            style.checkerboard_color1.to_rgba8_premul()
        );
    }

    #[test]
    fn crosses_draw_after_dots() {
        let style = BoardStyle {
            tile_size: 24,
            dot_color: Color::from_hex("#ff0000").unwrap(),
            cross_color: Color::from_hex("#0000ff").unwrap(),
            checkerboard: false,
            ..test_style()
        };
        let markers = Markers {
            dots: vec![Coord::parse("a1").unwrap()],
            crosses: vec![Coord::parse("a1").unwrap()],
        };
        let canvas = render("K", &style, &markers);

        // Both markers share the cell center; the cross must win there.
        let center = canvas.pixel(12, 12).unwrap();
        assert_eq!(center, style.cross_color.to_rgba8_premul());
    }

    #[test]
    fn markers_land_on_holes_too() {
        let style = BoardStyle {
            tile_size: 24,
            ..test_style()
        };
        let markers = Markers {
            dots: vec![Coord::parse("a2").unwrap()],
            crosses: vec![],
        };
        // Top rank is a hole; the dot still lands there.
        let canvas = render("0/K", &style, &markers);
        let center = canvas.pixel(12, 12).unwrap();
        assert_eq!(center, style.dot_color.to_rgba8_premul());
    }

    #[test]
    fn outer_outline_draws_last_at_canvas_edge() {
        let style = BoardStyle {
            outer_outline: true,
            ..test_style()
        };
        let canvas = render("K", &style, &Markers::default());
        assert_eq!(
            canvas.pixel(0, 0).unwrap(),
            style.outer_outline_color.to_rgba8_premul()
        );
        assert_eq!(
            canvas.pixel(canvas.width() - 1, canvas.height() - 1).unwrap(),
            style.outer_outline_color.to_rgba8_premul()
        );
    }
}
