use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::str::FromStr;
use std::time::{Duration, Instant};

use connect4::{EvalWeights, GameState, Okay, PlayTurnResponse, Request, Searcher};
use tracing::{debug, trace};

use crate::error::InvalidPlayerSpec;

/// How long a bot may take to exit after being told the tournament is over.
const BYE_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// How a player was specified on the command line.
///
/// - `bot:PATH` runs the executable at `PATH` and talks to it through the
///   bot protocol
/// - a name containing `Computer` is searched for by the judge itself, with
///   an optional depth as in `Computer:6`
/// - any other name is a human at the terminal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    pub nick: String,
    pub kind: PlayerKindConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerKindConfig {
    Computer { depth: Option<u32> },
    Human,
    External { executable: PathBuf },
}

impl FromStr for PlayerConfig {
    type Err = InvalidPlayerSpec;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        if let Some(path) = spec.strip_prefix("bot:") {
            if path.is_empty() {
                return Err(InvalidPlayerSpec::MissingExecutable);
            }
            let executable = PathBuf::from(path);
            let nick = executable
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| String::from(path));
            return Ok(PlayerConfig {
                nick,
                kind: PlayerKindConfig::External { executable },
            });
        }

        let (name, depth) = match spec.rsplit_once(':') {
            Some((name, depth)) => {
                let depth = depth.parse::<u32>().map_err(|_| InvalidPlayerSpec::InvalidDepth {
                    depth: String::from(depth),
                })?;
                (name, Some(depth))
            }
            None => (spec, None),
        };
        if name.trim().is_empty() {
            return Err(InvalidPlayerSpec::EmptyName);
        }
        let kind = if name.contains("Computer") {
            PlayerKindConfig::Computer { depth }
        } else if depth.is_some() {
            return Err(InvalidPlayerSpec::DepthForNonComputerPlayer {
                name: String::from(name),
            });
        } else {
            PlayerKindConfig::Human
        };
        Ok(PlayerConfig {
            nick: String::from(name),
            kind,
        })
    }
}

pub struct Player {
    pub name: String,
    kind: PlayerKind,
}

enum PlayerKind {
    Computer(Searcher),
    Human,
    External(BotProcess),
}

struct BotProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn from_config(
        config: &PlayerConfig,
        default_depth: u32,
        weights: &EvalWeights,
    ) -> anyhow::Result<Self> {
        let kind = match &config.kind {
            PlayerKindConfig::Computer { depth } => PlayerKind::Computer(Searcher::with_weights(
                depth.unwrap_or(default_depth),
                *weights,
            )),
            PlayerKindConfig::Human => PlayerKind::Human,
            PlayerKindConfig::External { executable } => {
                PlayerKind::External(BotProcess::spawn(executable)?)
            }
        };
        Ok(Self {
            name: config.nick.clone(),
            kind,
        })
    }

    pub fn computer(name: &str, searcher: Searcher) -> Self {
        Self {
            name: String::from(name),
            kind: PlayerKind::Computer(searcher),
        }
    }

    /// Tells the player that a new game starts, in which they play `side`.
    pub fn new_game(&mut self, side: connect4::Player) -> anyhow::Result<()> {
        if let PlayerKind::External(bot) = &mut self.kind {
            let _: Okay = bot.perform_request(&self.name, &Request::NewGame { player: side })?;
        }
        Ok(())
    }

    /// Asks the player for the column to play in. The state is never terminal.
    ///
    /// Returns an error only on communication failure. The column is not
    /// validated.
    pub fn get_move(&mut self, state: &GameState) -> anyhow::Result<usize> {
        match &mut self.kind {
            PlayerKind::Computer(searcher) => {
                let result = searcher.best_move(state)?;
                debug!(
                    player = self.name,
                    value = result.mv.value,
                    nodes = result.nodes,
                    "Search finished"
                );
                Ok(result.mv.column)
            }
            PlayerKind::Human => {
                let mut stdin = std::io::stdin().lock();
                let mut stdout = std::io::stdout().lock();
                ask_for_column(&mut stdin, &mut stdout, &self.name, state)
            }
            PlayerKind::External(bot) => {
                let PlayTurnResponse(column) =
                    bot.perform_request(&self.name, &Request::play_turn(state))?;
                Ok(column)
            }
        }
    }
}

/// Prompts until the answer is a column that has space.
pub fn ask_for_column(
    input: &mut impl BufRead,
    output: &mut impl Write,
    name: &str,
    state: &GameState,
) -> anyhow::Result<usize> {
    let mut line = String::new();
    write!(output, "\nColumn to drop in (indexed from 0), {}? ", name)?;
    loop {
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("Input ended while waiting for the move of {}", name);
        }
        match line.trim().parse::<usize>() {
            Ok(col) if state.is_valid_move(col) => return Ok(col),
            Ok(_) => write!(output, "Illegal move. Try again.\nColumn to drop in? ")?,
            Err(_) => write!(output, "That was not a valid column.\nColumn to drop in? ")?,
        }
    }
}

impl BotProcess {
    fn spawn(executable_path: &Path) -> anyhow::Result<Self> {
        let mut child = Command::new(executable_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdout"))?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        name: &str,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        self.stdout.read_line(&mut self.buf)?;
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = name, response = %serialized_response);
        self.buf.clear();
        Ok(response)
    }
}

impl BotProcess {
    fn say_bye(&mut self) -> anyhow::Result<()> {
        let mut bye = serde_json::to_string(&Request::Bye)?;
        bye.push('\n');
        self.stdin.write_all(bye.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn has_exited(&mut self) -> bool {
        let deadline = Instant::now() + BYE_GRACE_PERIOD;
        while Instant::now() < deadline {
            match self.child.try_wait() {
                Ok(Some(_)) => return true,
                Ok(None) => std::thread::sleep(Duration::from_millis(10)),
                Err(_) => return false,
            }
        }
        false
    }
}

impl Drop for BotProcess {
    fn drop(&mut self) {
        if self.say_bye().is_ok() && self.has_exited() {
            return;
        }
        debug!("Bot did not exit, killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
