use connect4::{state_from_request, GameState, Okay, Player, PlayTurnResponse, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player: Player);
    /// Chooses a column to play. The state is never terminal.
    fn play_turn(&mut self, state: GameState) -> anyhow::Result<usize>;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { player } => {
                    self.new_game(player);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn { player, grid } => {
                    let state = state_from_request(player, &grid)?;
                    if state.is_terminal() {
                        anyhow::bail!("Asked to play a turn in a finished game");
                    }
                    let column = self.play_turn(state)?;
                    serde_json::to_writer(&mut stdout, &PlayTurnResponse(column))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
