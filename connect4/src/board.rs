use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Geometry, InvalidBoard, Line, WIN_LENGTH};

/// Number of rows of the standard board.
pub const ROWS: usize = 6;
/// Number of columns of the standard board.
pub const COLS: usize = 7;

/// One of the two players. The first player moves first in a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// 0 for the first player, 1 for the second.
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// The cell value of this player's checkers.
    pub fn checker(self) -> Cell {
        match self {
            Player::First => Cell::First,
            Player::Second => Cell::Second,
        }
    }
}

/// The content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = ".")]
    Empty,
    #[serde(rename = "X")]
    First,
    #[serde(rename = "O")]
    Second,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player whose checker occupies this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::First => Some(Player::First),
            Cell::Second => Some(Player::Second),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::First => 'X',
            Cell::Second => 'O',
        }
    }
}

/// The grid of cells, stored row-major with row 0 at the bottom.
///
/// Cell `(row, col)` lives at index `row * cols + col`. Occupied cells in a
/// column are always contiguous from row 0 upwards; the only way to place a
/// checker is [`Board::drop_checker()`].
#[derive(Clone, Debug)]
pub struct Board {
    geometry: Arc<Geometry>,
    cells: Vec<Cell>,
}

impl Board {
    /// An empty standard 6 x 7 board.
    pub fn new() -> Self {
        Self::with_geometry(Geometry::standard())
    }

    /// An empty board of the given size.
    ///
    /// Both dimensions must be at least [`WIN_LENGTH`].
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, InvalidBoard> {
        if rows < WIN_LENGTH || cols < WIN_LENGTH {
            return Err(InvalidBoard::TooSmall { rows, cols });
        }
        if (rows, cols) == (ROWS, COLS) {
            return Ok(Self::new());
        }
        Ok(Self::with_geometry(Arc::new(Geometry::new(rows, cols))))
    }

    pub fn with_geometry(geometry: Arc<Geometry>) -> Self {
        let cells = vec![Cell::Empty; geometry.num_cells()];
        Self { geometry, cells }
    }

    /// Creates a board from rows of cells, bottom row first.
    ///
    /// This is the inverse of [`Self::to_grid()`]. The grid must be
    /// rectangular, large enough, and obey gravity.
    pub fn from_grid(grid: &[Vec<Cell>]) -> Result<Self, InvalidBoard> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let mut board = Self::with_size(rows, cols)?;
        if grid.iter().any(|row| row.len() != cols) {
            return Err(InvalidBoard::Ragged);
        }
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if !cell.is_empty() && row > 0 && grid[row - 1][col].is_empty() {
                    return Err(InvalidBoard::FloatingChecker { row, col });
                }
                board.cells[row * cols + col] = cell;
            }
        }
        Ok(board)
    }

    /// The rows of the board, bottom row first, each from left to right.
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols())
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows()
    }

    pub fn cols(&self) -> usize {
        self.geometry.cols()
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// All lines of [`WIN_LENGTH`] cells on this board.
    pub fn lines(&self) -> &[Line] {
        self.geometry.lines()
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows() && col < self.cols());
        row * self.cols() + col
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether a checker can still be dropped into this column.
    pub fn column_has_space(&self, col: usize) -> bool {
        col < self.cols() && self.get(self.rows() - 1, col).is_empty()
    }

    /// The row a checker dropped into this column would land in.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows()).find(|&row| self.get(row, col).is_empty())
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| !self.column_has_space(col))
    }

    /// Whether the next checker dropped into this cell's column would land
    /// exactly on this cell.
    pub fn immediately_playable(&self, idx: usize) -> bool {
        if !self.cells[idx].is_empty() {
            return false;
        }
        idx < self.cols() || !self.cells[idx - self.cols()].is_empty()
    }

    /// The player owning a complete line, if there is one.
    pub fn line_owner(&self) -> Option<Player> {
        self.lines().iter().find_map(|line| {
            let owner = self.cells[line[0]].owner()?;
            line[1..]
                .iter()
                .all(|&idx| self.cells[idx] == self.cells[line[0]])
                .then_some(owner)
        })
    }

    pub fn num_checkers(&self, player: Player) -> usize {
        let checker = player.checker();
        self.cells.iter().filter(|&&cell| cell == checker).count()
    }

    /// Drops a checker into the column and returns the index it landed on.
    ///
    /// Returns `None` and leaves the board untouched if the column is full or
    /// out of range.
    pub fn drop_checker(&mut self, col: usize, player: Player) -> Option<usize> {
        let row = self.landing_row(col)?;
        let idx = self.index(row, col);
        self.cells[idx] = player.checker();
        Some(idx)
    }

    /// Removes the topmost checker of the column and returns its owner.
    pub fn lift_checker(&mut self, col: usize) -> Option<Player> {
        if col >= self.cols() {
            return None;
        }
        let row = (0..self.rows())
            .rev()
            .find(|&row| !self.get(row, col).is_empty())?;
        let idx = self.index(row, col);
        std::mem::take(&mut self.cells[idx]).owner()
    }

    /// The same position with the two players' checkers exchanged.
    #[must_use]
    pub fn with_players_swapped(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&cell| match cell.owner() {
                Some(player) => player.other().checker(),
                None => Cell::Empty,
            })
            .collect();
        Self {
            geometry: Arc::clone(&self.geometry),
            cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows() && self.cols() == other.cols() && self.cells == other.cells
    }
}

impl Eq for Board {}
