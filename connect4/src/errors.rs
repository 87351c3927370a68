use crate::WIN_LENGTH;

/// The error type for [`GameState::make_move()`](crate::GameState::make_move) and
/// [`GameState::undo_move()`](crate::GameState::undo_move).
///
/// The state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    ColumnOutOfRange { column: usize, cols: usize },
    ColumnFull { column: usize },
    ColumnEmpty { column: usize },
    /// The top checker of the column belongs to the player to move, so it
    /// cannot have been the last move.
    NotLastMove { column: usize },
    GameOver,
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::ColumnOutOfRange { column, cols } => write!(
                f,
                "Column {} does not exist, the board has columns 0 to {}",
                column,
                cols.saturating_sub(1)
            ),
            IllegalMove::ColumnFull { column } => write!(f, "Column {} is already full", column),
            IllegalMove::ColumnEmpty { column } => {
                write!(f, "Column {} has no checker to take back", column)
            }
            IllegalMove::NotLastMove { column } => write!(
                f,
                "The top checker of column {} was not dropped by the player who moved last",
                column
            ),
            IllegalMove::GameOver => write!(f, "The game is already over"),
        }
    }
}

/// The error type for [`best_move()`](crate::best_move).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// There is nothing to search in a finished game.
    GameAlreadyOver,
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::GameAlreadyOver => {
                write!(f, "Cannot search for a move, the game is already over")
            }
        }
    }
}

/// Describes why a board or game snapshot cannot be a real position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoard {
    TooSmall { rows: usize, cols: usize },
    Ragged,
    FloatingChecker { row: usize, col: usize },
    ImpossibleCounts { first: usize, second: usize },
}

impl std::error::Error for InvalidBoard {}

impl std::fmt::Display for InvalidBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBoard::TooSmall { rows, cols } => write!(
                f,
                "A {}x{} board is too small, both dimensions must be at least {}",
                rows, cols, WIN_LENGTH
            ),
            InvalidBoard::Ragged => write!(f, "The rows of the board differ in length"),
            InvalidBoard::FloatingChecker { row, col } => write!(
                f,
                "The checker at row {}, column {} has an empty cell below it",
                row, col
            ),
            InvalidBoard::ImpossibleCounts { first, second } => write!(
                f,
                "The first player has {} checkers and the second {}, which cannot happen with the given player to move",
                first, second
            ),
        }
    }
}
