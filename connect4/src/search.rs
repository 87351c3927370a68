use crate::{EvalWeights, GameState, SearchError};

/// A bound larger than any evaluation, used in place of infinity for the
/// search window. Negating it cannot overflow.
pub const INFINITY: i64 = i64::MAX / 4;

/// A column to play, together with its value for the player to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub column: usize,
    pub value: i64,
}

/// The result of [`best_move()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Move,
    /// The number of positions that were visited.
    pub nodes: u64,
}

/// Finds the best move for the player to move, looking `depth` moves past
/// the immediate one.
///
/// Returns an error if the game is already over.
pub fn best_move(
    state: &GameState,
    depth: u32,
    weights: &EvalWeights,
) -> Result<SearchResult, SearchError> {
    if state.is_terminal() {
        return Err(SearchError::GameAlreadyOver);
    }
    let mut search = AlphaBeta::new(*weights);
    let mv = search.run(state, depth, -INFINITY, INFINITY);
    Ok(SearchResult {
        mv,
        nodes: search.nodes,
    })
}

/// Negamax search with alpha-beta pruning in the window `low..high`.
///
/// `low` is a value the player to move can already achieve by some other
/// line of play, `high` a value the opponent can hold them to. Columns are
/// tried from left to right, and the first of several equally good columns
/// wins. As soon as the best value reaches `high`, the remaining columns
/// are skipped.
///
/// The state must not be terminal, otherwise the returned move is not a
/// valid one.
pub fn pick_move(state: &GameState, depth: u32, low: i64, high: i64, weights: &EvalWeights) -> Move {
    AlphaBeta::new(*weights).run(state, depth, low, high)
}

/// An automated player: a fixed search horizon and evaluation weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Searcher {
    pub depth: u32,
    pub weights: EvalWeights,
}

impl Searcher {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            weights: EvalWeights::default(),
        }
    }

    pub fn with_weights(depth: u32, weights: EvalWeights) -> Self {
        Self { depth, weights }
    }

    pub fn best_move(&self, state: &GameState) -> Result<SearchResult, SearchError> {
        best_move(state, self.depth, &self.weights)
    }
}

// Evaluations stay inside the search window, so that they can be negated
// and always beat the placeholder of an unexplored position.
fn bounded(value: i64) -> i64 {
    value.clamp(-INFINITY, INFINITY)
}

struct AlphaBeta {
    weights: EvalWeights,
    nodes: u64,
}

impl AlphaBeta {
    fn new(weights: EvalWeights) -> Self {
        Self { weights, nodes: 0 }
    }

    fn run(&mut self, state: &GameState, depth: u32, low: i64, high: i64) -> Move {
        // All moves are made and taken back on this one copy
        let mut scratch = state.clone();
        let mv = self.negamax(&mut scratch, depth, low, high);
        debug_assert_eq!(&scratch, state);
        mv
    }

    fn negamax(&mut self, state: &mut GameState, depth: u32, mut low: i64, high: i64) -> Move {
        let weights = self.weights;
        let mover = state.player_to_move();
        // Evaluated lazily, since most positions have no move that ends the game
        let mut end_value = None;
        // Placeholder, replaced by the first valid column
        let mut best = Move {
            column: 0,
            value: -INFINITY - 1,
        };

        for col in 0..state.board().cols() {
            if best.value >= high {
                break;
            }
            if !state.is_valid_move(col) {
                continue;
            }
            self.nodes += 1;
            state.play(col);
            let value = if state.is_terminal() {
                // A game-ending move is valued by the position it was played from
                state.unplay(col);
                let value = *end_value.get_or_insert_with(|| {
                    bounded(
                        weights
                            .end_multiplier
                            .saturating_mul(weights.score(state.board(), mover)),
                    )
                });
                state.play(col);
                value
            } else if depth > 0 {
                -self.negamax(state, depth - 1, -high, -low).value
            } else {
                bounded(weights.score(state.board(), mover))
            };
            state.unplay(col);

            if value > best.value {
                best = Move { column: col, value };
                low = low.max(value);
            }
        }
        best
    }
}
