use serde::{Deserialize, Serialize};

use crate::{Board, Cell, GameState, InvalidBoard, Player};

/// Request for a bot to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { player: Player },
    /// Request to choose a column.
    ///
    /// The response should be a [`PlayTurnResponse`].
    PlayTurn {
        /// Whose turn it is.
        player: Player,
        /// The rows of the board, bottom row first, as produced by
        /// [`Board::to_grid()`].
        grid: Vec<Vec<Cell>>,
    },
    /// The bot should shut down.
    Bye,
}

impl Request {
    pub fn play_turn(state: &GameState) -> Self {
        Request::PlayTurn {
            player: state.player_to_move(),
            grid: state.board().to_grid(),
        }
    }
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// The column to drop a checker into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTurnResponse(pub usize);

/// Rebuilds the game state sent with a [`Request::PlayTurn`].
pub fn state_from_request(player: Player, grid: &[Vec<Cell>]) -> Result<GameState, InvalidBoard> {
    GameState::from_board(Board::from_grid(grid)?, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_turn_json() {
        let mut state = GameState::with_size(4, 4).unwrap();
        state.make_move(1).unwrap();
        let json = serde_json::to_string(&Request::play_turn(&state)).unwrap();
        assert_eq!(
            json,
            r#"{"type":"PlayTurn","player":"second","grid":[[".","X",".","."],[".",".",".","."],[".",".",".","."],[".",".",".","."]]}"#
        );
        match serde_json::from_str::<Request>(&json).unwrap() {
            Request::PlayTurn { player, grid } => {
                assert_eq!(state_from_request(player, &grid), Ok(state));
            }
            other => panic!("Unexpected request {:?}", other),
        }
    }

    #[test]
    fn other_messages() {
        assert_eq!(serde_json::to_string(&Request::Bye).unwrap(), r#"{"type":"Bye"}"#);
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"type":"NewGame","player":"first"}"#).unwrap(),
            Request::NewGame { player: Player::First }
        );
        assert_eq!(serde_json::to_string(&PlayTurnResponse(4)).unwrap(), "4");
    }
}
