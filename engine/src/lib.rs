pub mod config;
pub mod error;
pub mod logger;
pub mod session_rng;
pub mod settings;
pub mod tictactoe;

pub use error::{ConfigError, GameError};
pub use session_rng::SessionRng;
pub use settings::SearchSettings;
