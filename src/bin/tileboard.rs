use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use tileboard::{BoardStyle, Color, Coord, Markers};

#[derive(Parser, Debug)]
#[command(
    name = "tileboard",
    version,
    about = "Draw high quality board game diagrams",
    after_help = "example: tileboard rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR chess.png"
)]
struct Cli {
    /// Board position in (extended) FEN notation.
    position: String,

    /// Output PNG file.
    out: PathBuf,

    /// Board style JSON; individual flags below override its fields.
    #[arg(long, value_name = "file.json")]
    style: Option<PathBuf>,

    /// Color for the outer outline.
    #[arg(long, value_name = "color", help_heading = "outer outline options")]
    outer_outline_color: Option<Color>,

    /// Do not draw an outer outline.
    #[arg(long, help_heading = "outer outline options")]
    outer_outline_disable: bool,

    /// Color for the border background.
    #[arg(long, value_name = "color", help_heading = "border options")]
    border_color: Option<Color>,

    /// Do not draw the coordinates border.
    #[arg(long, help_heading = "border options")]
    border_disable: bool,

    /// Use uppercase letters in the border.
    #[arg(long, help_heading = "border options")]
    border_uppercase: bool,

    /// Font to use for border letters and numbers.
    #[arg(long, value_name = "file.ttf", help_heading = "border options")]
    border_font: Option<PathBuf>,

    /// Color to use for border letters and numbers.
    #[arg(long, value_name = "color", help_heading = "border options")]
    border_font_color: Option<Color>,

    /// Color for the inner outline.
    #[arg(long, value_name = "color", help_heading = "inner outline options")]
    inner_outline_color: Option<Color>,

    /// Do not draw an inner outline.
    #[arg(long, help_heading = "inner outline options")]
    inner_outline_disable: bool,

    /// Fill color for the holes in the board (holes stay transparent
    /// without it).
    #[arg(long, value_name = "color", help_heading = "checkerboard options")]
    checkerboard_color0: Option<Color>,

    /// First color for the checkerboard pattern.
    #[arg(long, value_name = "color", help_heading = "checkerboard options")]
    checkerboard_color1: Option<Color>,

    /// Second color for the checkerboard pattern.
    #[arg(long, value_name = "color", help_heading = "checkerboard options")]
    checkerboard_color2: Option<Color>,

    /// Do not draw a checkerboard pattern.
    #[arg(long, help_heading = "checkerboard options")]
    checkerboard_disable: bool,

    /// Folder to look for piece tiles.
    #[arg(
        long,
        value_name = "folder",
        default_value = "tiles",
        help_heading = "tileset options"
    )]
    tileset_folder: PathBuf,

    /// Board square size in pixels.
    #[arg(long, value_name = "int", help_heading = "tileset options")]
    tileset_size: Option<u32>,

    /// Do not draw piece tiles.
    #[arg(long, help_heading = "tileset options")]
    tileset_disable: bool,

    /// Draw a dot marker at a coordinate (repeatable), e.g. --dot e4.
    #[arg(long = "dot", value_name = "coord", help_heading = "marker options")]
    dots: Vec<Coord>,

    /// Draw a cross marker at a coordinate (repeatable), e.g. --cross e4.
    #[arg(long = "cross", value_name = "coord", help_heading = "marker options")]
    crosses: Vec<Coord>,

    /// Color for dot markers.
    #[arg(long, value_name = "color", help_heading = "marker options")]
    dot_color: Option<Color>,

    /// Color for cross markers.
    #[arg(long, value_name = "color", help_heading = "marker options")]
    cross_color: Option<Color>,
}

fn main() {
    if let Err(err) = run() {
        // One line on stderr; `:#` flattens the anyhow context chain.
        eprintln!("tileboard: error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let style = build_style(&cli)?;
    let markers = Markers {
        dots: cli.dots.clone(),
        crosses: cli.crosses.clone(),
    };

    tileboard::render_to_file(
        &cli.position,
        &cli.out,
        &markers,
        &style,
        &cli.tileset_folder,
        cli.border_font.as_deref(),
    )?;
    Ok(())
}

fn build_style(cli: &Cli) -> anyhow::Result<BoardStyle> {
    let mut style = match &cli.style {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open style '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse style JSON '{}'", path.display()))?
        }
        None => BoardStyle::default(),
    };

    if let Some(size) = cli.tileset_size {
        style.tile_size = size;
    }
    if let Some(c) = cli.outer_outline_color {
        style.outer_outline_color = c;
    }
    if cli.outer_outline_disable {
        style.outer_outline = false;
    }
    if let Some(c) = cli.border_color {
        style.border_color = c;
    }
    if cli.border_disable {
        style.border = false;
    }
    if cli.border_uppercase {
        style.border_uppercase = true;
    }
    if let Some(c) = cli.border_font_color {
        style.border_font_color = c;
    }
    if let Some(c) = cli.inner_outline_color {
        style.inner_outline_color = c;
    }
    if cli.inner_outline_disable {
        style.inner_outline = false;
    }
    if let Some(c) = cli.checkerboard_color0 {
        style.hole_color = Some(c);
    }
    if let Some(c) = cli.checkerboard_color1 {
        style.checkerboard_color1 = c;
    }
    if let Some(c) = cli.checkerboard_color2 {
        style.checkerboard_color2 = c;
    }
    if cli.checkerboard_disable {
        style.checkerboard = false;
    }
    if cli.tileset_disable {
        style.pieces = false;
    }
    if let Some(c) = cli.dot_color {
        style.dot_color = c;
    }
    if let Some(c) = cli.cross_color {
        style.cross_color = c;
    }

    Ok(style)
}
