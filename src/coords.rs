use crate::error::{TileboardError, TileboardResult};
use crate::notation::Board;

/// Convert a zero-based column index to its border letter string.
///
/// Columns run `a`..`z`, then `aa`..`az`, `ba`.. and so on. This is not
/// plain base 26: past the first letter the scheme skips one value so that
/// `z` (25) is followed by `aa` (26).
pub fn to_base26(mut number: usize) -> String {
    let mut s = Vec::new();
    let mut first_letter = true;

    loop {
        let mut remainder = number % 26;
        if !first_letter && number < 25 {
            remainder -= 1;
        }

        s.insert(0, (b'a' + remainder as u8) as char);
        first_letter = false;

        number = (number - remainder) / 26;
        if number == 0 {
            return s.into_iter().collect();
        }
    }
}

/// Convert a border letter string back to its zero-based column index.
///
/// Accepts lowercase or uppercase letters. Exact inverse of [`to_base26`].
pub fn from_base26(letters: &str) -> TileboardResult<usize> {
    let letters = letters.to_lowercase();
    let bytes = letters.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(|b| b.is_ascii_lowercase()) {
        return Err(TileboardError::coordinate(format!(
            "invalid file letters \"{letters}\""
        )));
    }

    let mut number = (bytes[0] - b'a') as usize;
    if bytes.len() > 1 {
        if number < 25 {
            number += 1;
        }
        for &b in &bytes[1..] {
            number = number * 26 + (b - b'a') as usize;
        }
    }

    Ok(number)
}

/// A board-native marker coordinate: file letters plus a 1-based rank
/// counted from the bottom rank up (`a1` is bottom-left).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coord {
    /// Zero-based column index.
    pub col: usize,
    /// One-based rank, bottom rank = 1.
    pub rank: usize,
    text: String,
}

impl Coord {
    /// Parse a coordinate token such as `a1`, `h8` or `ab16`.
    pub fn parse(text: &str) -> TileboardResult<Self> {
        let split = text.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
            TileboardError::coordinate(format!("coordinate \"{text}\" has no rank number"))
        })?;
        let (letters, digits) = text.split_at(split);
        if letters.is_empty() {
            return Err(TileboardError::coordinate(format!(
                "coordinate \"{text}\" has no file letters"
            )));
        }

        let col = from_base26(letters)?;
        let rank: usize = digits.parse().map_err(|_| {
            TileboardError::coordinate(format!("invalid rank number in \"{text}\""))
        })?;
        if rank == 0 {
            return Err(TileboardError::coordinate(format!(
                "rank numbers start at 1 in \"{text}\""
            )));
        }

        Ok(Self {
            col,
            rank,
            text: text.to_string(),
        })
    }

    /// Resolve to a `(row, col)` grid position on `board`.
    ///
    /// Markers may target any cell kind (blank, occupied or hole), but a
    /// coordinate past the board's edge is fatal.
    pub fn resolve(&self, board: &Board) -> TileboardResult<(usize, usize)> {
        if self.col >= board.width() || self.rank > board.height() {
            return Err(TileboardError::coordinate(format!(
                "\"{}\" does not exist on a {}x{} board",
                self.text,
                board.width(),
                board.height()
            )));
        }
        Ok((board.height() - self.rank, self.col))
    }
}

impl std::str::FromStr for Coord {
    type Err = TileboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Dot,
    Cross,
}

/// Overlay marker coordinates, independent of board occupancy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markers {
    pub dots: Vec<Coord>,
    pub crosses: Vec<Coord>,
}

impl Markers {
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.crosses.is_empty()
    }

    /// Resolve every marker against `board`, dots first then crosses,
    /// preserving the draw order the compositor relies on.
    pub fn resolve(&self, board: &Board) -> TileboardResult<Vec<(usize, usize, MarkerKind)>> {
        let mut out = Vec::with_capacity(self.dots.len() + self.crosses.len());
        for coord in &self.dots {
            let (row, col) = coord.resolve(board)?;
            out.push((row, col, MarkerKind::Dot));
        }
        for coord in &self.crosses {
            let (row, col) = coord.resolve(board)?;
            out.push((row, col, MarkerKind::Cross));
        }
        Ok(out)
    }
}
