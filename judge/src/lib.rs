mod error;
mod game;
mod player;
pub use error::*;
pub use game::*;
pub use player::*;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub rows: usize,
    pub cols: usize,
    /// Pick the player who drops the first checker at random, instead of
    /// always letting the first of the two begin
    pub random_start: bool,
    /// Print the board after every move
    pub show_board: bool,
}
