use connect4::{visualize_board, GameState, IllegalMove, Outcome};
use rand::Rng;
use tracing::info;

use crate::player::Player;
use crate::Config;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Draw,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    config: &mut Config,
    player_1: &mut Player,
    player_2: &mut Player,
) -> anyhow::Result<GameResult> {
    let mut players = [player_1, player_2];

    let first_player_idx = starting_player_idx(config);
    let player_idx_of = |side: connect4::Player| match side {
        connect4::Player::First => first_player_idx,
        connect4::Player::Second => 1 - first_player_idx,
    };

    players[first_player_idx].new_game(connect4::Player::First)?;
    players[1 - first_player_idx].new_game(connect4::Player::Second)?;

    let mut state = GameState::with_size(config.rows, config.cols)?;
    if config.show_board {
        println!("{}", visualize_board(state.board()));
    }

    while !state.is_terminal() {
        let current_player_idx = player_idx_of(state.player_to_move());
        let current_player = &mut players[current_player_idx];
        let column = current_player.get_move(&state)?;
        if let Err(err) = state.make_move(column) {
            return Ok(GameResult::IllegalMoveByPlayer {
                player_idx: current_player_idx,
                err,
            });
        }
        info!(player = current_player.name, column, "Move");
        if config.show_board {
            println!("{}", visualize_board(state.board()));
        }
    }

    Ok(game_result(&state, first_player_idx))
}

/// The index of the player who drops the first checker.
pub fn starting_player_idx(config: &mut Config) -> usize {
    if config.random_start && config.rng.gen::<bool>() {
        1
    } else {
        0
    }
}

/// Converts the outcome of a finished game into a [`GameResult`].
pub fn game_result(state: &GameState, first_player_idx: usize) -> GameResult {
    match state.outcome() {
        Some(Outcome::Winner(side)) if side == connect4::Player::First => GameResult::WonByPlayer {
            player_idx: first_player_idx,
        },
        Some(Outcome::Winner(_)) => GameResult::WonByPlayer {
            player_idx: 1 - first_player_idx,
        },
        Some(Outcome::Draw) | None => GameResult::Draw,
    }
}

#[cfg(test)]
mod tests {
    use connect4::{Board, Cell, Searcher};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn config(seed: u64) -> Config {
        Config {
            rng: StdRng::seed_from_u64(seed),
            rows: connect4::ROWS,
            cols: connect4::COLS,
            random_start: true,
            show_board: false,
        }
    }

    #[test]
    fn computers_finish_a_game() {
        for seed in 0..4 {
            let mut config = config(seed);
            let mut player_1 = Player::computer("Computer 1", Searcher::new(1));
            let mut player_2 = Player::computer("Computer 2", Searcher::new(0));
            let result = play_game(&mut config, &mut player_1, &mut player_2).unwrap();
            assert!(!matches!(result, GameResult::IllegalMoveByPlayer { .. }));
        }
    }

    #[test]
    fn first_player_starts_unless_random() {
        let mut config = config(7);
        config.random_start = false;
        assert!((0..20).all(|_| starting_player_idx(&mut config) == 0));

        config.random_start = true;
        let starters: Vec<usize> = (0..64).map(|_| starting_player_idx(&mut config)).collect();
        assert!(starters.contains(&0) && starters.contains(&1));
    }

    #[test]
    fn full_board_is_reported_as_draw() {
        let rows = [
            "XOOXXOO", //
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "XXOOXXO",
        ];
        let grid: Vec<Vec<Cell>> = rows
            .iter()
            .rev()
            .map(|row| {
                row.chars()
                    .map(|ch| if ch == 'X' { Cell::First } else { Cell::Second })
                    .collect()
            })
            .collect();
        let board = Board::from_grid(&grid).unwrap();
        let state = GameState::from_board(board, connect4::Player::First).unwrap();
        assert!(state.is_terminal());
        assert!(matches!(game_result(&state, 1), GameResult::Draw));
    }

    #[test]
    fn winner_is_mapped_to_the_starting_player() {
        let mut state = GameState::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            state.make_move(col).unwrap();
        }
        assert!(matches!(
            game_result(&state, 1),
            GameResult::WonByPlayer { player_idx: 1 }
        ));
        assert!(matches!(
            game_result(&state, 0),
            GameResult::WonByPlayer { player_idx: 0 }
        ));
    }
}
