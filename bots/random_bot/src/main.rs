use clap::Parser;
use connect4::{GameState, Player};
use connect4_bot_utils::Bot;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _player: Player) {}

    fn play_turn(&mut self, state: GameState) -> anyhow::Result<usize> {
        state
            .valid_moves()
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("No column has space left"))
    }
}
