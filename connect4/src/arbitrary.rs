use quickcheck::{Arbitrary, Gen};

use crate::{Board, Cell, GameState};

/// A position reached by playing random moves from an empty board.
///
/// The game may or may not be over.
#[derive(Clone, Debug)]
pub struct Position {
    pub state: GameState,
}

impl Arbitrary for Position {
    fn arbitrary(g: &mut Gen) -> Self {
        let (rows, cols) = *g.choose(&[(6, 7), (6, 7), (4, 4), (4, 5), (5, 6)]).unwrap();
        let mut state = GameState::with_size(rows, cols).unwrap();
        let num_moves = usize::from(u8::arbitrary(g)) % (rows * cols + 1);
        for _ in 0..num_moves {
            if state.is_terminal() {
                break;
            }
            let valid: Vec<usize> = state.valid_moves().collect();
            let col = *g.choose(&valid).unwrap();
            state.make_move(col).unwrap();
        }
        Position { state }
    }
}

/// Builds a board from one string per row, top row first, as printed by
/// [`visualize_board()`](crate::visualize_board) (without the column numbers).
pub fn board_from_rows(rows: &[&str]) -> Board {
    let grid: Vec<Vec<Cell>> = rows
        .iter()
        .rev()
        .map(|row| {
            row.chars()
                .map(|ch| match ch {
                    'X' => Cell::First,
                    'O' => Cell::Second,
                    _ => Cell::Empty,
                })
                .collect()
        })
        .collect();
    Board::from_grid(&grid).unwrap()
}
