use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use connect4::EvalWeights;
use itertools::Itertools;
use judge::{play_game, Config, GameResult, Player, PlayerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// The players: "bot:PATH" for a bot executable, a name containing
    /// "Computer" (optionally followed by ":DEPTH") for the built-in search,
    /// or any other name for a human
    #[clap(num_args(2..))]
    player_configs: Vec<PlayerConfig>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// Search depth of computer players that don't specify one
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Path to a JSON file overriding the evaluation weights of computer players
    #[arg(short, long)]
    weights: Option<PathBuf>,

    #[arg(long, default_value_t = connect4::ROWS)]
    rows: usize,

    #[arg(long, default_value_t = connect4::COLS)]
    cols: usize,

    /// Pick the starting player of each game at random. Otherwise the first
    /// player of each pairing always starts
    #[arg(short, long, default_value_t = false)]
    random_start: bool,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the tournament as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Print the board after every move
    #[arg(short = 'b', long, default_value_t = false)]
    show_board: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Results of the games between two players, indexed like the players.
#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    /// Games lost by playing an illegal move, also counted as a win for
    /// the opponent
    forfeits: [usize; 2],
    draws: usize,
}

fn play_matchup(
    players: [&mut Player; 2],
    num_games: usize,
    config: &mut Config,
    stop_on_illegal_move: bool,
) -> anyhow::Result<MatchScore> {
    let [player_1, player_2] = players;
    let mut score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(config, player_1, player_2)? {
            GameResult::WonByPlayer { player_idx } => {
                let winner = if player_idx == 0 { &player_1.name } else { &player_2.name };
                info!(winner, game_idx, "Four in a row");
                score.wins[player_idx] += 1;
            }
            GameResult::Draw => {
                info!(game_idx, "Board full, draw");
                score.draws += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                let offender = if player_idx == 0 { &player_1.name } else { &player_2.name };
                warn!(offender, game_idx, %err, "Illegal move");
                if stop_on_illegal_move {
                    break;
                }
                score.wins[1 - player_idx] += 1;
                score.forfeits[player_idx] += 1;
            }
        }
    }

    eprintln!("{} vs {}:", player_1.name, player_2.name);
    for (idx, name) in [&player_1.name, &player_2.name].into_iter().enumerate() {
        let forfeits_of_opponent = score.forfeits[1 - idx];
        if forfeits_of_opponent > 0 {
            eprintln!(
                "  {} won {} ({} by forfeit)",
                name, score.wins[idx], forfeits_of_opponent
            );
        } else {
            eprintln!("  {} won {}", name, score.wins[idx]);
        }
    }
    eprintln!("  {} draws", score.draws);

    Ok(score)
}

/// A player's record over all of their matchups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Record {
    wins: usize,
    draws: usize,
    losses: usize,
}

impl Record {
    /// A win is worth two points and a draw one.
    fn points(&self) -> usize {
        2 * self.wins + self.draws
    }
}

/// Player indices with their records, best first. Players with equal
/// points stay in the order they were given.
fn standings(
    num_players: usize,
    match_results: &HashMap<(usize, usize), MatchScore>,
) -> Vec<(usize, Record)> {
    let mut records = vec![Record::default(); num_players];
    for (&(i1, i2), score) in match_results {
        for (idx, side) in [(i1, 0), (i2, 1)] {
            records[idx].wins += score.wins[side];
            records[idx].draws += score.draws;
            records[idx].losses += score.wins[1 - side];
        }
    }
    records
        .into_iter()
        .enumerate()
        .sorted_by(|(i1, r1), (i2, r2)| r2.points().cmp(&r1.points()).then(i1.cmp(i2)))
        .collect()
}

fn print_standings(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    println!("\n{:<20} {:>6} {:>6} {:>6} {:>6}", "Player", "Won", "Drawn", "Lost", "Points");
    for (idx, record) in standings(player_configs.len(), match_results) {
        println!(
            "{:<20} {:>6} {:>6} {:>6} {:>6}",
            player_configs[idx].nick,
            record.wins,
            record.draws,
            record.losses,
            record.points()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let weights = match &args.weights {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => EvalWeights::default(),
    };
    debug!(?weights);

    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        rows: args.rows,
        cols: args.cols,
        random_start: args.random_start,
        show_board: args.show_board,
    };

    let matchups: Vec<(usize, usize)> = (0..args.player_configs.len())
        .tuple_combinations()
        .collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        let mut player_1 = Player::from_config(&args.player_configs[i1], args.depth, &weights)?;
        let mut player_2 = Player::from_config(&args.player_configs[i2], args.depth, &weights)?;

        let match_score = play_matchup(
            [&mut player_1, &mut player_2],
            args.num_games,
            &mut config,
            args.stop_on_illegal_move,
        )?;

        match_results.insert((i1, i2), match_score);
    }

    if args.player_configs.len() > 2 {
        print_standings(&args.player_configs, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
