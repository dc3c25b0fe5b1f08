//! chess-play - play chess against the engine in a terminal.
//!
//! Moves are entered in coordinate form (`e2e4`). Settings are read from
//! `chess-play.toml` when present and overridden by command-line flags.
//! Logs go to stderr; set `RUST_LOG=chess_engine=debug` to follow the search.

mod config;
mod session;

use clap::Parser;
use config::{AiSide, PlayConfig, Terminal};
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Play chess against a minimax engine.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess against a minimax engine")]
struct Args {
    /// Path to a config file (default: chess-play.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Side played by the engine
    #[arg(long, value_enum)]
    ai: Option<AiSide>,

    /// Scoring of positions without legal moves
    #[arg(long, value_enum)]
    terminal: Option<Terminal>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,
}

impl Args {
    fn apply(self, mut config: PlayConfig) -> PlayConfig {
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(ai) = self.ai {
            config.ai = ai;
        }
        if let Some(terminal) = self.terminal {
            config.terminal = terminal;
        }
        if self.fen.is_some() {
            config.fen = self.fen;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PlayConfig::load(args.config.as_deref())?;
    let config = args.apply(config);

    tracing::info!(
        depth = config.depth,
        ai = ?config.ai,
        terminal = ?config.terminal,
        "starting chess-play"
    );

    let mut session = Session::new(&config)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    println!("{}", session::status_line(session.game()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["chess-play", "--depth", "5", "--ai", "white"]);
        let config = args.apply(PlayConfig {
            depth: 2,
            terminal: Terminal::Material,
            ..PlayConfig::default()
        });
        assert_eq!(config.depth, 5);
        assert_eq!(config.ai, AiSide::White);
        assert_eq!(config.terminal, Terminal::Material);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["chess-play"]);
        let config = args.apply(PlayConfig::default());
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn test_fen_flag() {
        let args = Args::parse_from(["chess-play", "--fen", "4k3/8/8/8/8/8/8/4K3 w - - 0 1"]);
        assert!(args.apply(PlayConfig::default()).fen.is_some());
    }
}
