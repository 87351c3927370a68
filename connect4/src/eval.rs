use serde::{Deserialize, Serialize};

use crate::{Board, Cell, Line, Player};

/// The weights of the static evaluation.
///
/// A line that can still be completed by a player scores more the more of
/// that player's checkers it already holds. If all of its empty cells could
/// be filled right now, it scores `split_multiplier` times its weight on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Three checkers and one empty cell.
    pub three: i64,
    /// Two adjacent checkers and two empty cells.
    pub two: i64,
    /// One checker and three empty cells.
    pub one: i64,
    /// Four empty cells.
    pub zero: i64,
    pub split_multiplier: i64,
    /// Scales the evaluation of moves that end the game, so that a certain
    /// result is preferred over any speculative one.
    pub end_multiplier: i64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            three: 64,
            two: 16,
            one: 4,
            zero: 1,
            split_multiplier: 2,
            end_multiplier: 100,
        }
    }
}

impl EvalWeights {
    /// Scores the board from the perspective of `player`. Never negative
    /// for nonnegative weights.
    ///
    /// Saturates instead of overflowing, since the weights may come from a
    /// user's file.
    pub fn score(&self, board: &Board, player: Player) -> i64 {
        board
            .lines()
            .iter()
            .map(|line| self.score_line(board, line, player.checker()))
            .fold(0, i64::saturating_add)
    }

    fn score_line(&self, board: &Board, line: &Line, mine: Cell) -> i64 {
        let cells = line.map(|idx| board.cells()[idx]);
        if cells.iter().any(|&cell| !cell.is_empty() && cell != mine) {
            return 0;
        }
        let is_mine = cells.map(|cell| cell == mine);
        let num_mine = is_mine.iter().filter(|&&m| m).count();

        let weight = match (num_mine, is_mine) {
            (4, _) => return 0,
            (3, _) => self.three,
            // Only pairs next to each other count
            (2, [true, true, false, false])
            | (2, [false, true, true, false])
            | (2, [false, false, true, true]) => self.two,
            (2, _) => return 0,
            (1, _) => self.one,
            _ => return self.zero,
        };

        let all_empty_playable = line
            .iter()
            .filter(|&&idx| board.cells()[idx].is_empty())
            .all(|&idx| board.immediately_playable(idx));
        if all_empty_playable {
            weight.saturating_add(weight.saturating_mul(self.split_multiplier))
        } else {
            weight
        }
    }
}

/// Scores the board from the perspective of `player` with the default
/// weights.
pub fn score(board: &Board, player: Player) -> i64 {
    EvalWeights::default().score(board, player)
}
