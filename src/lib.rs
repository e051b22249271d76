//! Tileboard renders board game diagrams from extended FEN positions.
//!
//! The pipeline turns notation text into a PNG in four stages:
//!
//! 1. **Parse**: `&str -> Board` (ranks, holes, blanks, piece symbols)
//! 2. **Layout**: `Board + BoardStyle -> Layout` (every pixel offset)
//! 3. **Resolve**: tile/marker/fill lookups through a memoizing [`TileCache`]
//! 4. **Composite**: ordered pastes onto a single [`Canvas`], then PNG encode
//!
//! Data flows strictly forward; every render owns its own board, layout,
//! cache and canvas, and nothing survives past the call.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: compositing happens on
//!   premultiplied pixels; straight alpha only exists at the PNG boundary.
//! - **At-most-one decode per tile key**: render cost is bounded by distinct
//!   symbols and marker colors, not by cell count.
#![forbid(unsafe_code)]

pub mod assets;
pub mod canvas;
pub mod color;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod notation;
pub mod pipeline;
pub mod render;
pub mod text;

pub use assets::{FsTileSource, PreparedImage, TileCache, TileKey, TileSource, tile_filename};
pub use canvas::Canvas;
pub use color::{Color, Rgba8Premul};
pub use coords::{Coord, MarkerKind, Markers, from_base26, to_base26};
pub use error::{TileboardError, TileboardResult};
pub use geometry::{BoardStyle, Layout, MAX_CANVAS_DIM, layout};
pub use notation::{Board, Cell, PieceCase};
pub use pipeline::{encode_png, render_position, render_to_file};
pub use render::compose;
pub use text::BorderFont;
