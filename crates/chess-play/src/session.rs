//! Interactive session: reads commands, applies moves, lets the engine
//! answer, and prints the board after every change.

use crate::config::{AiSide, PlayConfig};
use chess_core::{Move, Square};
use chess_engine::{GameError, GameResult, GameState, MoveOutcome, SearchConfig};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Coordinate move such as `e2e4`.
    Move(Square, Square),
    /// List legal moves from a square.
    Moves(Square),
    Undo,
    New,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("expected a square such as e2, got '{0}'")]
    BadSquare(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(CommandError::Empty);
        };
        match first.to_ascii_lowercase().as_str() {
            "quit" | "exit" => Ok(Command::Quit),
            "undo" => Ok(Command::Undo),
            "new" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "moves" => {
                let arg = words.next().unwrap_or_default();
                Square::from_algebraic(arg)
                    .map(Command::Moves)
                    .ok_or_else(|| CommandError::BadSquare(arg.to_string()))
            }
            _ => Move::parse_squares(first)
                .map(|(from, to)| Command::Move(from, to))
                .ok_or_else(|| CommandError::Unknown(first.to_string())),
        }
    }
}

const HELP: &str = "\
commands:
  e2e4        move a piece (promotion always makes a queen)
  moves e2    list legal moves from a square
  undo        take back the last move
  new         start over
  quit        leave";

/// A game between a human at the terminal and the engine.
pub struct Session {
    game: GameState,
    ai: AiSide,
    search: SearchConfig,
}

impl Session {
    pub fn new(config: &PlayConfig) -> Result<Self, GameError> {
        let game = match &config.fen {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new(),
        };
        Ok(Session {
            game,
            ai: config.ai,
            search: config.search_config(),
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Runs until `quit`, end of input, or (with no human side) the end
    /// of the game or the first repeated position.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> std::io::Result<()> {
        self.print_board(out)?;
        let mut lines = input.lines();
        loop {
            // Deterministic self-play cycles forever once a position recurs.
            if self.ai == AiSide::Both && self.position_repeated() {
                info!(ply = self.game.ply_count(), "position repeated, stopping");
                return writeln!(out, "position repeated, stopping");
            }
            if self.game.result().is_none() && self.ai.plays(self.game.side_to_move()) {
                if self.engine_move(out)? {
                    continue;
                }
                return Ok(());
            }
            if self.game.result().is_some() && self.ai == AiSide::Both {
                return Ok(());
            }

            write!(out, "{} to move> ", self.game.side_to_move())?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            match Command::parse(&line?) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.handle(command, out)?,
                Err(CommandError::Empty) => {}
                Err(e) => writeln!(out, "{}", e)?,
            }
        }
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> std::io::Result<()> {
        match command {
            Command::Move(from, to) => {
                if self.game.result().is_some() {
                    return writeln!(out, "the game is over; 'new' or 'undo'");
                }
                match self.game.apply_squares(from, to) {
                    Ok(outcome) => self.report(&outcome, out)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Command::Moves(sq) => {
                let targets: Vec<String> = self
                    .game
                    .legal_moves(sq)
                    .iter()
                    .map(|m| m.to.to_string())
                    .collect();
                if targets.is_empty() {
                    writeln!(out, "no legal moves from {}", sq)?;
                } else {
                    writeln!(out, "{}: {}", sq, targets.join(" "))?;
                }
            }
            Command::Undo => {
                // Against the engine, take back its reply too.
                let mut undone = 0;
                while self.game.undo().is_some() {
                    undone += 1;
                    if !self.ai.plays(self.game.side_to_move()) {
                        break;
                    }
                }
                if undone == 0 {
                    writeln!(out, "nothing to undo")?;
                } else {
                    self.print_board(out)?;
                }
            }
            Command::New => {
                self.game.reset();
                info!("new game");
                self.print_board(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn position_repeated(&self) -> bool {
        let current = self.game.position();
        self.game.history().iter().any(|entry| &entry.before == current)
    }

    /// Returns false when the engine could not move.
    fn engine_move<W: Write>(&mut self, out: &mut W) -> std::io::Result<bool> {
        let result = self.game.search(&self.search);
        debug!(nodes = result.nodes, score = result.score, "engine searched");
        let Some(mv) = result.best_move else {
            return Ok(false);
        };
        match self.game.apply_move(mv) {
            Ok(outcome) => {
                writeln!(out, "engine plays {}", mv)?;
                self.report(&outcome, out)?;
                Ok(true)
            }
            Err(e) => {
                writeln!(out, "engine error: {}", e)?;
                Ok(false)
            }
        }
    }

    fn report<W: Write>(&self, outcome: &MoveOutcome, out: &mut W) -> std::io::Result<()> {
        self.print_board(out)?;
        if let Some(captured) = outcome.captured {
            writeln!(out, "{} captures {}", outcome.moved, captured)?;
        }
        Ok(())
    }

    fn print_board<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.game.board())?;
        writeln!(out, "{}", status_line(&self.game))
    }
}

/// One-line summary of the game state.
pub fn status_line(game: &GameState) -> String {
    match game.result() {
        Some(GameResult::WhiteWins) => "checkmate, White wins".to_string(),
        Some(GameResult::BlackWins) => "checkmate, Black wins".to_string(),
        Some(GameResult::Stalemate) => "stalemate, draw".to_string(),
        None if game.is_check() => format!("{} to move, in check", game.side_to_move()),
        None => format!("{} to move", game.side_to_move()),
    }
}
