use std::fmt;
use std::path::PathBuf;

/// Startup failures.  The simulation itself never fails.
#[derive(Debug)]
pub enum GameError {
    /// Terminal setup or file access failed.
    Io(std::io::Error),
    /// The config file exists but is not valid JSON for `GameConfig`.
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The config parsed but describes an unplayable game.
    InvalidConfig(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "I/O error: {}", e),
            GameError::Config { path, source } => {
                write!(f, "bad config file {}: {}", path.display(), source)
            }
            GameError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Config { source, .. } => Some(source),
            GameError::InvalidConfig(_) => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
