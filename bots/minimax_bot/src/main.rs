use std::path::PathBuf;

use clap::Parser;
use connect4::{EvalWeights, GameState, Player, Searcher};
use connect4_bot_utils::Bot;
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many moves to look ahead beyond the next one
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Path to a JSON file overriding the evaluation weights
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct MinimaxBot {
    searcher: Searcher,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let weights = match args.weights {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => EvalWeights::default(),
    };
    debug!(depth = args.depth, ?weights, "Starting");
    MinimaxBot {
        searcher: Searcher::with_weights(args.depth, weights),
    }
    .run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

impl Bot for MinimaxBot {
    fn new_game(&mut self, player: Player) {
        debug!(?player, "New game");
    }

    fn play_turn(&mut self, state: GameState) -> anyhow::Result<usize> {
        let result = self.searcher.best_move(&state)?;
        debug!(
            column = result.mv.column,
            value = result.mv.value,
            nodes = result.nodes,
            "Picked move"
        );
        Ok(result.mv.column)
    }
}
