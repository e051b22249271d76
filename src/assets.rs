pub mod decode;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::color::Rgba8Premul;
use crate::coords::MarkerKind;
use crate::error::{TileboardError, TileboardResult};
use crate::notation::PieceCase;

/// Prepared raster tile in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// External collaborator that loads the raw tile image for a piece symbol.
///
/// The cache front-loads all policy (memoization, square validation,
/// scaling); implementations only fetch and decode bytes.
pub trait TileSource {
    fn load(&mut self, symbol: char, case: PieceCase) -> TileboardResult<PreparedImage>;
}

/// Tile filename for a piece symbol: case prefix plus lowercased symbol.
///
/// ASCII letters get a `u`/`l` prefix because some filesystems fold
/// filename case; other symbols are used as-is.
pub fn tile_filename(symbol: char, case: PieceCase) -> String {
    let lower: String = symbol.to_lowercase().collect();
    match case {
        PieceCase::Upper => format!("u{lower}"),
        PieceCase::Lower => format!("l{lower}"),
        PieceCase::None => lower,
    }
}

/// Filesystem tile source rooted at a tileset folder.
///
/// The file extension is auto-detected: a bare `<prefix><symbol>` file is
/// tried first, then the usual raster extensions.
pub struct FsTileSource {
    root: PathBuf,
}

impl FsTileSource {
    const EXTENSIONS: [&'static str; 5] = ["png", "gif", "bmp", "jpg", "jpeg"];

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TileSource for FsTileSource {
    fn load(&mut self, symbol: char, case: PieceCase) -> TileboardResult<PreparedImage> {
        let stem = tile_filename(symbol, case);

        let mut candidates = vec![self.root.join(&stem)];
        for ext in Self::EXTENSIONS {
            candidates.push(self.root.join(format!("{stem}.{ext}")));
        }

        for path in &candidates {
            if let Ok(bytes) = std::fs::read(path) {
                return decode::decode_image(&bytes).map_err(|err| {
                    TileboardError::asset(format!("{}: {err}", path.display()))
                });
            }
        }

        Err(TileboardError::asset(format!(
            "no tile image for piece '{symbol}' (looked for \"{}\" in {})",
            stem,
            self.root.display()
        )))
    }
}

/// Cache key for one prepared tile.
///
/// The tile size is a property of the cache itself (one render uses exactly
/// one size), so it does not appear in the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKey {
    Piece { symbol: char, case: PieceCase },
    Marker { kind: MarkerKind, color: Rgba8Premul },
    Fill { color: Rgba8Premul },
}

/// Per-render tile cache.
///
/// Each key is materialized at most once: piece tiles are loaded, validated
/// and scaled on first reference; marker and fill tiles are drawn
/// procedurally on first reference. Lookups after that return the same
/// shared pixel buffer, which bounds render cost by distinct tile kinds
/// rather than cell count.
pub struct TileCache {
    tile_size: u32,
    source: Box<dyn TileSource>,
    entries: HashMap<TileKey, PreparedImage>,
    loads: HashMap<TileKey, u64>,
}

impl TileCache {
    pub fn new(tile_size: u32, source: Box<dyn TileSource>) -> Self {
        Self {
            tile_size,
            source,
            entries: HashMap::new(),
            loads: HashMap::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Times the tile behind `key` was actually built (not looked up).
    pub fn load_count(&self, key: &TileKey) -> u64 {
        self.loads.get(key).copied().unwrap_or(0)
    }

    /// Piece tile for `symbol`, scaled to the cache tile size.
    pub fn piece(&mut self, symbol: char, case: PieceCase) -> TileboardResult<PreparedImage> {
        let key = TileKey::Piece { symbol, case };
        if let Some(img) = self.entries.get(&key) {
            return Ok(img.clone());
        }

        let raw = self.source.load(symbol, case)?;
        if raw.width != raw.height {
            return Err(TileboardError::asset(format!(
                "tile image for piece '{symbol}' is not square ({}x{})",
                raw.width, raw.height
            )));
        }
        let tile = decode::scale_to(&raw, self.tile_size);

        *self.loads.entry(key).or_insert(0) += 1;
        self.entries.insert(key, tile.clone());
        Ok(tile)
    }

    /// Procedurally drawn dot or cross tile.
    pub fn marker(&mut self, kind: MarkerKind, color: Rgba8Premul) -> PreparedImage {
        let key = TileKey::Marker { kind, color };
        if let Some(img) = self.entries.get(&key) {
            return img.clone();
        }

        let tile = match kind {
            MarkerKind::Dot => dot_tile(self.tile_size, color),
            MarkerKind::Cross => cross_tile(self.tile_size, color),
        };

        *self.loads.entry(key).or_insert(0) += 1;
        self.entries.insert(key, tile.clone());
        tile
    }

    /// Flat filled square, used for checkerboard cells and hole fills.
    pub fn fill(&mut self, color: Rgba8Premul) -> PreparedImage {
        let key = TileKey::Fill { color };
        if let Some(img) = self.entries.get(&key) {
            return img.clone();
        }

        let tile = fill_tile(self.tile_size, color);
        *self.loads.entry(key).or_insert(0) += 1;
        self.entries.insert(key, tile.clone());
        tile
    }
}

fn shade(color: Rgba8Premul, coverage: f32) -> [u8; 4] {
    let v = coverage.clamp(0.0, 1.0);
    let scale = |c: u8| ((c as f32) * v + 0.5) as u8;
    [scale(color.r), scale(color.g), scale(color.b), scale(color.a)]
}

fn fill_tile(size: u32, color: Rgba8Premul) -> PreparedImage {
    let px = [color.r, color.g, color.b, color.a];
    let data = px.repeat((size as usize) * (size as usize));
    PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(data),
    }
}

/// Filled circle centered in the tile, radius `size / 6`, 1px soft edge.
fn dot_tile(size: u32, color: Rgba8Premul) -> PreparedImage {
    let mut data = vec![0u8; (size as usize) * (size as usize) * 4];
    let center = size as f32 / 2.0;
    let radius = size as f32 / 6.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = radius + 0.5 - dist;
            if coverage <= 0.0 {
                continue;
            }
            let idx = ((y as usize) * (size as usize) + (x as usize)) * 4;
            data[idx..idx + 4].copy_from_slice(&shade(color, coverage));
        }
    }

    PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(data),
    }
}

/// Diagonal cross spanning the central half of the tile, stroke width
/// `max(size / 12, 1)`.
fn cross_tile(size: u32, color: Rgba8Premul) -> PreparedImage {
    let mut data = vec![0u8; (size as usize) * (size as usize) * 4];
    let center = size as f32 / 2.0;
    let arm = size as f32 / 4.0;
    let half_width = (size / 12).max(1) as f32 / 2.0;

    let segments = [
        ((center - arm, center - arm), (center + arm, center + arm)),
        ((center - arm, center + arm), (center + arm, center - arm)),
    ];

    for y in 0..size {
        for x in 0..size {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let dist = segments
                .iter()
                .map(|&(a, b)| dist_to_segment(p, a, b))
                .fold(f32::INFINITY, f32::min);
            let coverage = half_width + 0.5 - dist;
            if coverage <= 0.0 {
                continue;
            }
            let idx = ((y as usize) * (size as usize) + (x as usize)) * 4;
            data[idx..idx + 4].copy_from_slice(&shade(color, coverage));
        }
    }

    PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(data),
    }
}

fn dist_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (px, py) = p;
    let (ax, ay) = a;
    let (bx, by) = b;
    let (abx, aby) = (bx - ax, by - ay);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * abx, ay + t * aby);
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}
