//! Configuration file loading for the terminal driver.
//!
//! Settings come from an optional `chess-play.toml` in the current
//! directory (or a path given with `--config`). Every field has a
//! default, so an empty or missing file is valid.

use chess_core::Color;
use chess_engine::{SearchConfig, TerminalScoring, DEFAULT_DEPTH};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A config file named on the command line does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Which side the engine plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AiSide {
    White,
    #[default]
    Black,
    Both,
    /// Two humans at one keyboard.
    None,
}

impl AiSide {
    pub fn plays(self, color: Color) -> bool {
        matches!(
            (self, color),
            (AiSide::Both, _) | (AiSide::White, Color::White) | (AiSide::Black, Color::Black)
        )
    }
}

/// How the search scores positions with no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    /// Checkmate scores as a loss, stalemate as a draw.
    #[default]
    Exact,
    /// Terminal nodes score by material only.
    Material,
}

impl From<Terminal> for TerminalScoring {
    fn from(t: Terminal) -> Self {
        match t {
            Terminal::Exact => TerminalScoring::Exact,
            Terminal::Material => TerminalScoring::Material,
        }
    }
}

/// Driver settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Search depth in plies. Defaults to 3.
    pub depth: u32,
    /// Side played by the engine. Defaults to black.
    pub ai: AiSide,
    pub terminal: Terminal,
    /// Starting position; the standard one when absent.
    pub fen: Option<String>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            depth: DEFAULT_DEPTH,
            ai: AiSide::default(),
            terminal: Terminal::default(),
            fen: None,
        }
    }
}

impl PlayConfig {
    /// Default file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "chess-play.toml";

    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::FILE_NAME`] is read if present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing explicit path,
    /// [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::read(path),
            None => {
                let default_path = Path::new(Self::FILE_NAME);
                if default_path.exists() {
                    Self::read(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            terminal: self.terminal.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
depth = 4
ai = "white"
terminal = "material"
fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
"#;
        let config: PlayConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.depth, 4);
        assert_eq!(config.ai, AiSide::White);
        assert_eq!(config.terminal, Terminal::Material);
        assert_eq!(config.fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: PlayConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlayConfig::default());
        assert_eq!(config.depth, 3);
        assert_eq!(config.ai, AiSide::Black);
        assert_eq!(config.terminal, Terminal::Exact);
        assert!(config.fen.is_none());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: PlayConfig = toml::from_str("ai = \"both\"").unwrap();
        assert_eq!(config.ai, AiSide::Both);
        assert_eq!(config.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_invalid_side_rejected() {
        let result: Result<PlayConfig, _> = toml::from_str("ai = \"purple\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = PlayConfig::load(Some(Path::new("/nonexistent/chess-play.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("nonexistent"));
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_temp("depth = 2\nterminal = \"material\"\n");
        let config = PlayConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.depth, 2);
        assert_eq!(config.search_config().terminal, TerminalScoring::Material);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_temp("depth = [");
        let result = PlayConfig::load(Some(file.path()));

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ai_side_plays() {
        assert!(AiSide::Black.plays(Color::Black));
        assert!(!AiSide::Black.plays(Color::White));
        assert!(AiSide::Both.plays(Color::White));
        assert!(!AiSide::None.plays(Color::Black));
    }
}
