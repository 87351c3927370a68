pub use board::*;
pub use errors::*;
pub use eval::*;
pub use game::*;
pub use lines::*;
pub use protocol_types::*;
pub use search::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod eval;
mod game;
mod lines;
mod protocol_types;
mod search;
mod visualization;
