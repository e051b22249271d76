use crate::error::{TileboardError, TileboardResult};

/// Case tag recorded for occupied cells.
///
/// ASCII letters keep their case so the tile loader can prepend `u`/`l` on
/// filesystems that fold filename case; every other symbol has no tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceCase {
    Upper,
    Lower,
    None,
}

/// One cell of the parsed board grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// A hole in the board. Nothing is drawn under it, not even the
    /// checkerboard pattern.
    Hole,
    /// A playable empty square: checkerboard yes, piece no.
    Blank,
    /// A square holding a piece symbol.
    Occupied { symbol: char, case: PieceCase },
}

impl Cell {
    pub fn is_hole(self) -> bool {
        matches!(self, Cell::Hole)
    }

    pub fn piece(self) -> Option<(char, PieceCase)> {
        match self {
            Cell::Occupied { symbol, case } => Some((symbol, case)),
            _ => None,
        }
    }
}

/// Parsed extended-FEN position, normalized to a rectangular grid.
///
/// The grammar:
/// - `/` separates ranks (any rank count);
/// - digits `1`-`9` each expand to that many blank squares (`12` is three
///   blanks, not twelve);
/// - `0` is one hole;
/// - any other non-whitespace character is one piece symbol (Unicode is
///   fine; only ASCII letters carry a case tag).
///
/// Ranks may have different emitted lengths. The board width is the maximum
/// across ranks and shorter ranks are right-padded with holes, which is what
/// makes trailing zero runs optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Board {
    /// Parse and normalize a position.
    pub fn parse(position: &str) -> TileboardResult<Self> {
        let ranks = parse_ranks(position)?;
        Ok(Self::from_ranks(ranks))
    }

    /// Pad raw per-rank cell runs to a rectangular grid.
    ///
    /// Kept separate from [`parse_ranks`] so the trailing-hole padding rule
    /// is testable on its own.
    pub fn from_ranks(mut ranks: Vec<Vec<Cell>>) -> Self {
        let width = ranks.iter().map(Vec::len).max().unwrap_or(0);
        for rank in &mut ranks {
            rank.resize(width, Cell::Hole);
        }
        let height = ranks.len();
        Self {
            rows: ranks,
            width,
            height,
        }
    }

    /// Column count (maximum emitted rank width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rank count.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All cells in reading order: top rank first, left to right.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &cell)| (row, col, cell))
        })
    }

    /// Distinct piece symbols appearing on the board.
    pub fn piece_symbols(&self) -> Vec<(char, PieceCase)> {
        let mut seen = Vec::new();
        for (_, _, cell) in self.cells() {
            if let Some(piece) = cell.piece()
                && !seen.contains(&piece)
            {
                seen.push(piece);
            }
        }
        seen
    }
}

/// Scan the raw rank runs without padding.
pub fn parse_ranks(position: &str) -> TileboardResult<Vec<Vec<Cell>>> {
    let mut ranks = Vec::new();

    for (rank_idx, rank_text) in position.split('/').enumerate() {
        let mut cells = Vec::new();
        for ch in rank_text.chars() {
            match ch {
                '0' => cells.push(Cell::Hole),
                '1'..='9' => {
                    let n = ch as usize - '0' as usize;
                    cells.extend(std::iter::repeat_n(Cell::Blank, n));
                }
                c if c.is_whitespace() || c.is_control() => {
                    return Err(TileboardError::notation(format!(
                        "unsupported character {c:?} in rank {}",
                        rank_idx + 1
                    )));
                }
                c => {
                    let case = if c.is_ascii_uppercase() {
                        PieceCase::Upper
                    } else if c.is_ascii_lowercase() {
                        PieceCase::Lower
                    } else {
                        PieceCase::None
                    };
                    cells.push(Cell::Occupied { symbol: c, case });
                }
            }
        }
        ranks.push(cells);
    }

    if ranks.iter().all(Vec::is_empty) {
        return Err(TileboardError::notation("empty position"));
    }

    Ok(ranks)
}
