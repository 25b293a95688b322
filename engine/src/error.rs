use crate::tictactoe::Position;

/// Errors raised by the board, the bots and the match driver.
///
/// Every variant is local to one match: the caller can always start a new one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("failed to allocate a board of {cells} cells")]
    AllocationFailure { cells: usize },

    #[error("illegal move at {position}")]
    IllegalMove { position: Position },

    #[error("no available move on the board")]
    NoAvailableMove,

    #[error("unsupported board size {0} (expected 3 or 5)")]
    UnsupportedBoardSize(usize),

    #[error("the match is already over")]
    MatchOver,

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("it is not a bot's turn")]
    NotBotTurn,
}

/// Errors raised while loading or storing configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("failed to deserialize config: {0}")]
    Deserialize(String),

    #[error("config validation error: {0}")]
    Validation(String),
}
