use crate::Board;

/// Draws the board as text, top row first, with the column numbers below.
///
/// ```
/// use connect4::{visualize_board, GameState};
/// let mut state = GameState::new();
/// state.make_move(3).unwrap();
/// state.make_move(3).unwrap();
/// assert_eq!(
///     visualize_board(state.board()).lines().rev().take(3).collect::<Vec<_>>(),
///     vec![" 0 1 2 3 4 5 6", " . . . X . . .", " . . . O . . ."],
/// );
/// ```
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::new();
    for row in board.to_grid().iter().rev() {
        for cell in row {
            result.push(' ');
            result.push(cell.symbol());
        }
        result.push('\n');
    }
    for col in 0..board.cols() {
        result += &format!("{:>2}", col);
    }
    result
}
