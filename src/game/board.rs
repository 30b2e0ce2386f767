use std::fmt;
use std::ops::Deref;

use super::Symbol;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Perspective-relative grid handed to players: row 0 is the top row,
/// `1` marks the observer's pieces, `-1` the opponent's, `0` empty.
pub type Observation = [[i8; COLS]; ROWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Empty,
    A,
    B,
}

impl Slot {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Slot::Empty => None,
            Slot::A => Some(Symbol::A),
            Slot::B => Some(Symbol::B),
        }
    }
}

/// A (column, row) pair. Row 0 is the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }

    pub fn is_valid(&self) -> bool {
        self.col < COLS && self.row < ROWS
    }

    /// Step by `(dc, dr)`; `None` once the result leaves the board.
    pub fn offset(&self, dc: isize, dr: isize) -> Option<Position> {
        let col = self.col.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        let pos = Position { col, row };
        pos.is_valid().then_some(pos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0..7)")]
    OutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Column-major grid: `cells[col][row]`, gravity fills each column from row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Slot; ROWS]; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Slot::Empty; ROWS]; COLS],
        }
    }

    /// Get the slot at a column and row. Panics if out of range.
    pub fn get(&self, col: usize, row: usize) -> Slot {
        self.cells[col][row]
    }

    /// Get the slot at a position, `None` if the position is off the board.
    pub fn at(&self, pos: Position) -> Option<Slot> {
        pos.is_valid().then(|| self.cells[pos.col][pos.row])
    }

    /// Lowest empty row in `col`, or `None` if the column is full or does not exist.
    pub fn available_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        self.cells[col].iter().position(|&slot| slot == Slot::Empty)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.available_row(col).is_none()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn place(&mut self, col: usize, symbol: Symbol) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange(col));
        }
        let row = self.available_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[col][row] = symbol.to_slot();
        Ok(row)
    }

    /// Drop a piece that is taken back when the returned guard is dropped.
    /// `None` if the column cannot take a piece.
    pub fn speculate(&mut self, col: usize, symbol: Symbol) -> Option<Speculation<'_>> {
        let row = self.place(col, symbol).ok()?;
        Some(Speculation {
            board: self,
            pos: Position::new(col, row),
        })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Clear every slot
    pub fn reset(&mut self) {
        self.cells = [[Slot::Empty; ROWS]; COLS];
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&slot| slot != Slot::Empty)
            .count()
    }

    /// Grid seen from `perspective`, top row first.
    pub fn observation(&self, perspective: Symbol) -> Observation {
        let mine = perspective.to_slot();
        let mut grid = [[0i8; COLS]; ROWS];
        for col in 0..COLS {
            for row in 0..ROWS {
                grid[ROWS - 1 - row][col] = match self.cells[col][row] {
                    Slot::Empty => 0,
                    slot if slot == mine => 1,
                    _ => -1,
                };
            }
        }
        grid
    }

    /// Rebuild a board from an observation made by `perspective`.
    pub fn from_observation(observation: &Observation, perspective: Symbol) -> Self {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                board.cells[col][row] = match observation[ROWS - 1 - row][col] {
                    1 => perspective.to_slot(),
                    -1 => perspective.other().to_slot(),
                    _ => Slot::Empty,
                };
            }
        }
        board
    }

    /// Text dump: rows top to bottom, `|`-delimited cells, `glyphs[0]` for A
    /// and `glyphs[1]` for B.
    pub fn render(&self, glyphs: [char; 2]) -> String {
        let rule = "-".repeat(COLS * 4 + 1);
        let mut out = String::with_capacity((ROWS + 2) * (rule.len() + 1));
        out.push_str(&rule);
        out.push('\n');
        for row in (0..ROWS).rev() {
            out.push('|');
            for col in 0..COLS {
                let glyph = match self.cells[col][row].symbol() {
                    Some(symbol) => glyphs[symbol.index()],
                    None => ' ',
                };
                out.push(' ');
                out.push(glyph);
                out.push_str(" |");
            }
            out.push('\n');
        }
        out.push_str(&rule);
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render([Symbol::A.glyph(), Symbol::B.glyph()]))
    }
}

/// A piece placed for lookahead. The piece is removed when this guard drops,
/// on every exit path.
pub struct Speculation<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl Speculation<'_> {
    /// Where the speculative piece landed
    pub fn position(&self) -> Position {
        self.pos
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.cells[self.pos.col][self.pos.row] = Slot::Empty;
    }
}
