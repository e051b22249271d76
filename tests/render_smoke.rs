use std::io::Cursor;

use tileboard::{BoardStyle, Markers, TileboardError};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "tileboard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_square_png(path: &std::path::Path, size: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(size, size, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

fn decode(path: &std::path::Path) -> image::RgbaImage {
    image::open(path).unwrap().to_rgba8()
}

#[test]
fn empty_board_renders_checkerboard_and_outlines() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let tmp = temp_dir("render_checkerboard");
    std::fs::create_dir_all(&tmp).unwrap();
    let out = tmp.join("board.png");

    let mut style = BoardStyle::default();
    style.border = false;
    style.pieces = false;

    tileboard::render_to_file(
        "8/8/8/8/8/8/8/8",
        &out,
        &Markers::default(),
        &style,
        &tmp,
        None,
    )
    .unwrap();

    let img = decode(&out);
    // 8 * 42 tiles plus a 1px outer and 1px inner outline on each side.
    assert_eq!(img.dimensions(), (340, 340));

    // Outer outline is drawn last and owns the canvas edge.
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);

    // Top-left cell is light, its right neighbor dark.
    assert_eq!(img.get_pixel(2, 2).0, [255, 206, 158, 255]);
    assert_eq!(img.get_pixel(2 + 42, 2).0, [209, 139, 71, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn piece_tile_is_pasted_over_its_cell() {
    let tmp = temp_dir("render_piece");
    std::fs::create_dir_all(&tmp).unwrap();
    write_square_png(&tmp.join("uk.png"), 8, [0, 0, 255, 255]);
    let out = tmp.join("board.png");

    let mut style = BoardStyle::default();
    style.border = false;

    tileboard::render_to_file("K", &out, &Markers::default(), &style, &tmp, None).unwrap();

    let img = decode(&out);
    assert_eq!(img.dimensions(), (46, 46));
    assert_eq!(img.get_pixel(23, 23).0, [0, 0, 255, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn holes_stay_transparent() {
    let tmp = temp_dir("render_hole");
    std::fs::create_dir_all(&tmp).unwrap();
    let out = tmp.join("board.png");

    let mut style = BoardStyle::default();
    style.border = false;
    style.pieces = false;

    tileboard::render_to_file("0", &out, &Markers::default(), &style, &tmp, None).unwrap();

    let img = decode(&out);
    assert_eq!(img.get_pixel(23, 23).0[3], 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn border_without_font_fails_before_writing_output() {
    let tmp = temp_dir("render_no_font");
    std::fs::create_dir_all(&tmp).unwrap();
    let out = tmp.join("board.png");

    // Default style wants a border, but no font is supplied.
    let result = tileboard::render_to_file(
        "8/8",
        &out,
        &Markers::default(),
        &BoardStyle::default(),
        &tmp,
        None,
    );

    assert!(matches!(result, Err(TileboardError::Config(_))));
    assert!(!out.exists());

    std::fs::remove_dir_all(&tmp).ok();
}
