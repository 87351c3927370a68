use crate::{Board, IllegalMove, InvalidBoard, Player};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// A board together with the player whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_move: Player,
}

impl GameState {
    /// A new game on the standard board, with the first player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::First,
        }
    }

    /// A new game on a board of the given size.
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, InvalidBoard> {
        Ok(Self {
            board: Board::with_size(rows, cols)?,
            to_move: Player::First,
        })
    }

    /// Resumes a game from a position.
    ///
    /// The number of checkers of each player must agree with whose turn it
    /// is, since the first player always moves first.
    pub fn from_board(board: Board, to_move: Player) -> Result<Self, InvalidBoard> {
        let first = board.num_checkers(Player::First);
        let second = board.num_checkers(Player::Second);
        let consistent = match to_move {
            Player::First => first == second,
            Player::Second => first == second + 1,
        };
        if !consistent {
            return Err(InvalidBoard::ImpossibleCounts { first, second });
        }
        Ok(Self { board, to_move })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_to_move(&self) -> Player {
        self.to_move
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        self.board.column_has_space(col)
    }

    /// The columns that still have space, from left to right.
    pub fn valid_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.board.cols()).filter(|&col| self.is_valid_move(col))
    }

    /// Drops a checker of the player to move into the column, and passes
    /// the turn to the other player.
    pub fn make_move(&mut self, col: usize) -> Result<(), IllegalMove> {
        if col >= self.board.cols() {
            return Err(IllegalMove::ColumnOutOfRange {
                column: col,
                cols: self.board.cols(),
            });
        }
        if !self.is_valid_move(col) {
            return Err(IllegalMove::ColumnFull { column: col });
        }
        if self.is_terminal() {
            return Err(IllegalMove::GameOver);
        }
        self.play(col);
        Ok(())
    }

    /// Takes back the last checker dropped into the column, and passes the
    /// turn back to the player who dropped it.
    ///
    /// The checker on top of the column must belong to the player who moved
    /// last.
    pub fn undo_move(&mut self, col: usize) -> Result<(), IllegalMove> {
        if col >= self.board.cols() {
            return Err(IllegalMove::ColumnOutOfRange {
                column: col,
                cols: self.board.cols(),
            });
        }
        let top_row = match self.board.landing_row(col) {
            Some(0) => return Err(IllegalMove::ColumnEmpty { column: col }),
            Some(row) => row - 1,
            None => self.board.rows() - 1,
        };
        if self.board.get(top_row, col).owner() != Some(self.to_move.other()) {
            return Err(IllegalMove::NotLastMove { column: col });
        }
        self.unplay(col);
        Ok(())
    }

    // Unvalidated versions of make_move() and undo_move() for the search,
    // which only plays valid columns and undoes its own moves.
    pub(crate) fn play(&mut self, col: usize) {
        let dropped = self.board.drop_checker(col, self.to_move);
        debug_assert!(dropped.is_some());
        self.to_move = self.to_move.other();
    }

    pub(crate) fn unplay(&mut self, col: usize) {
        if let Some(owner) = self.board.lift_checker(col) {
            self.to_move = owner;
        }
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.line_owner()
    }

    /// Whether no further moves can be made, because the board is full or
    /// one player has four in a row.
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// The outcome, or `None` while the game is still going on.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(player) => Some(Outcome::Winner(player)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{board_from_rows, Position};
    use crate::{Cell, COLS};

    quickcheck! {
        fn valid_move_iff_top_cell_empty(pos: Position, col: u8) -> bool {
            let col = usize::from(col % 10);
            let board = pos.state.board();
            let expected = col < board.cols() && board.get(board.rows() - 1, col) == Cell::Empty;
            pos.state.is_valid_move(col) == expected
        }

        fn invalid_moves_do_not_change_the_state(pos: Position, col: u8) -> bool {
            let col = usize::from(col % 10);
            let mut state = pos.state.clone();
            match state.make_move(col) {
                Ok(()) => pos.state.is_valid_move(col) && !pos.state.is_terminal(),
                Err(_) => state == pos.state,
            }
        }

        fn terminal_iff_full_or_line(pos: Position) -> bool {
            let board = pos.state.board();
            let has_line = board.lines().iter().any(|line| {
                let cell = board.cells()[line[0]];
                !cell.is_empty() && line.iter().all(|&idx| board.cells()[idx] == cell)
            });
            pos.state.is_terminal() == (pos.state.is_full() || has_line)
        }

        fn undo_restores_the_state(pos: Position) -> bool {
            let moves: Vec<usize> = pos.state.valid_moves().collect();
            pos.state.is_terminal() || moves.into_iter().all(|col| {
                let mut state = pos.state.clone();
                state.make_move(col).is_ok() && state.undo_move(col).is_ok() && state == pos.state
            })
        }
    }

    #[test]
    fn new_game_is_not_terminal() {
        let state = GameState::new();
        assert_eq!(state.player_to_move(), Player::First);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), None);
        assert_eq!(state.valid_moves().count(), COLS);
        let small = GameState::with_size(4, 4).unwrap();
        assert!(!small.is_terminal());
    }

    #[test]
    fn moves_alternate() {
        let mut state = GameState::new();
        state.make_move(3).unwrap();
        assert_eq!(state.player_to_move(), Player::Second);
        state.make_move(3).unwrap();
        assert_eq!(state.player_to_move(), Player::First);
        assert_eq!(state.board().get(0, 3), Cell::First);
        assert_eq!(state.board().get(1, 3), Cell::Second);
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let mut state = GameState::new();
        assert_eq!(
            state.make_move(7),
            Err(IllegalMove::ColumnOutOfRange { column: 7, cols: 7 })
        );
        for _ in 0..6 {
            state.make_move(0).unwrap();
        }
        assert!(!state.is_valid_move(0));
        assert_eq!(state.make_move(0), Err(IllegalMove::ColumnFull { column: 0 }));
        assert_eq!(state.undo_move(1), Err(IllegalMove::ColumnEmpty { column: 1 }));
    }

    #[test]
    fn only_the_last_mover_can_be_undone() {
        let mut state = GameState::new();
        state.make_move(0).unwrap();
        state.make_move(1).unwrap();
        let before = state.clone();
        assert_eq!(state.undo_move(0), Err(IllegalMove::NotLastMove { column: 0 }));
        assert_eq!(state, before);
        state.undo_move(1).unwrap();
        assert_eq!(state.player_to_move(), Player::Second);
        state.undo_move(0).unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn horizontal_win() {
        let mut state = GameState::new();
        for col in [1, 1, 2, 2, 3, 3] {
            state.make_move(col).unwrap();
        }
        assert!(!state.is_terminal());
        state.make_move(4).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::First));
        assert_eq!(state.outcome(), Some(Outcome::Winner(Player::First)));
        assert_eq!(state.make_move(5), Err(IllegalMove::GameOver));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = board_from_rows(&[
            "XOOXXOO", //
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "XXOOXXO",
        ]);
        let state = GameState::from_board(board, Player::First).unwrap();
        assert!(state.is_full());
        assert!(state.is_terminal());
        assert_eq!(state.winner(), None);
        assert_eq!(state.outcome(), Some(Outcome::Draw));
        assert_eq!(state.valid_moves().count(), 0);
    }

    #[test]
    fn from_board_checks_whose_turn_it_is() {
        let board = board_from_rows(&[
            ".......", //
            ".......",
            ".......",
            ".......",
            ".......",
            "X......",
        ]);
        assert!(GameState::from_board(board.clone(), Player::Second).is_ok());
        assert_eq!(
            GameState::from_board(board, Player::First),
            Err(InvalidBoard::ImpossibleCounts { first: 1, second: 0 })
        );
    }
}
