mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotType, calculate_move, choose_easy_move, choose_hard_move, minimax, terminal_score,
};
pub use game_state::{GameState, TicTacToeGameState};
pub use session::{Controller, GameMode, MatchStatus, TicTacToeSession};
pub use types::{BoardSize, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{check_win, check_win_with_line, evaluate_status, win_length};
