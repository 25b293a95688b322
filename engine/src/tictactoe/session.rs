use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::SearchSettings;
use super::bot_controller::{BotType, calculate_move};
use super::game_state::GameState;
use super::types::{BoardSize, GameStatus, Mark, Position, WinningLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    PlayerVsPlayer,
    VersusEasyBot,
    VersusHardBot,
}

impl GameMode {
    /// The hard bot plays on the large board, everything else on the classic one.
    pub fn board_size(self) -> BoardSize {
        match self {
            GameMode::VersusHardBot => BoardSize::Large,
            GameMode::PlayerVsPlayer | GameMode::VersusEasyBot => BoardSize::Classic,
        }
    }

    /// Controllers for X and O. The human always opens.
    pub fn controllers(self) -> (Controller, Controller) {
        match self {
            GameMode::PlayerVsPlayer => (Controller::Human, Controller::Human),
            GameMode::VersusEasyBot => (Controller::Human, Controller::Bot(BotType::Random)),
            GameMode::VersusHardBot => (Controller::Human, Controller::Bot(BotType::Minimax)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Bot(BotType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InProgress,
    Won(Mark),
    Draw,
    Abandoned,
}

impl MatchStatus {
    pub fn is_over(self) -> bool {
        self != MatchStatus::InProgress
    }
}

impl From<GameStatus> for MatchStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => MatchStatus::InProgress,
            GameStatus::XWon => MatchStatus::Won(Mark::X),
            GameStatus::OWon => MatchStatus::Won(Mark::O),
            GameStatus::Draw => MatchStatus::Draw,
        }
    }
}

/// One match from an empty board to a final outcome.
///
/// Once the status leaves `InProgress` it never changes again.
pub struct TicTacToeSession {
    state: GameState,
    player_x: Controller,
    player_o: Controller,
    settings: SearchSettings,
    status: MatchStatus,
    last_move: Option<Position>,
    move_count: usize,
}

impl TicTacToeSession {
    pub fn new(mode: GameMode, settings: SearchSettings) -> Result<Self, GameError> {
        let (player_x, player_o) = mode.controllers();
        Self::with_controllers(mode.board_size(), player_x, player_o, settings)
    }

    pub fn with_controllers(
        board_size: BoardSize,
        player_x: Controller,
        player_o: Controller,
        settings: SearchSettings,
    ) -> Result<Self, GameError> {
        let state = GameState::with_board_size(board_size)?;
        log!(
            "New {}x{} match: X={:?}, O={:?}",
            state.size(),
            state.size(),
            player_x,
            player_o
        );

        Ok(Self {
            state,
            player_x,
            player_o,
            settings,
            status: MatchStatus::InProgress,
            last_move: None,
            move_count: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn current_mark(&self) -> Mark {
        self.state.current_mark()
    }

    pub fn current_controller(&self) -> Controller {
        if self.state.current_mark() == Mark::X {
            self.player_x
        } else {
            self.player_o
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        matches!(self.current_controller(), Controller::Bot(_))
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            MatchStatus::Won(_) => self.state.winning_line(),
            _ => None,
        }
    }

    /// Human input. `None` means the player quit and the match is abandoned.
    pub fn submit_move(&mut self, input: Option<Position>) -> Result<MatchStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::MatchOver);
        }
        if self.is_bot_turn() {
            return Err(GameError::NotHumanTurn);
        }

        let Some(position) = input else {
            self.abandon();
            return Ok(self.status);
        };

        self.place(position)?;
        Ok(self.status)
    }

    /// Lets the bot on move play. Any bot failure abandons the match.
    pub fn play_bot_turn(&mut self, rng: &mut SessionRng) -> Result<Position, GameError> {
        if self.status.is_over() {
            return Err(GameError::MatchOver);
        }
        let Controller::Bot(bot_type) = self.current_controller() else {
            return Err(GameError::NotBotTurn);
        };

        let position = match calculate_move(bot_type, &self.state, &self.settings, rng) {
            Ok(Some(position)) => position,
            Ok(None) => {
                log!("{:?} bot could not move for {}", bot_type, self.state.current_mark());
                self.abandon();
                return Err(GameError::NoAvailableMove);
            }
            Err(e) => {
                log!("{:?} bot failed: {}", bot_type, e);
                self.abandon();
                return Err(e);
            }
        };

        self.place(position)?;
        Ok(position)
    }

    pub fn abandon(&mut self) {
        if self.status.is_over() {
            return;
        }
        self.status = MatchStatus::Abandoned;
        log!("Match abandoned after {} moves", self.move_count);
    }

    fn place(&mut self, position: Position) -> Result<(), GameError> {
        self.state.apply_move(position.row, position.col)?;
        self.last_move = Some(position);
        self.move_count += 1;
        self.status = MatchStatus::from(self.state.status());

        if self.status.is_over() {
            log!("Match over after {} moves: {:?}", self.move_count, self.status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvp() -> TicTacToeSession {
        TicTacToeSession::new(GameMode::PlayerVsPlayer, SearchSettings::default()).unwrap()
    }

    #[test]
    fn test_mode_board_sizes() {
        assert_eq!(GameMode::PlayerVsPlayer.board_size(), BoardSize::Classic);
        assert_eq!(GameMode::VersusEasyBot.board_size(), BoardSize::Classic);
        assert_eq!(GameMode::VersusHardBot.board_size(), BoardSize::Large);

        let session = TicTacToeSession::new(GameMode::VersusHardBot, SearchSettings::default()).unwrap();
        assert_eq!(session.state().size(), 5);
        assert_eq!(session.state().win_length(), 4);
    }

    #[test]
    fn test_player_vs_player_win() {
        let mut session = pvp();
        let moves = [(0, 0), (1, 0), (0, 1), (1, 1)];
        for (row, col) in moves {
            assert_eq!(
                session.submit_move(Some(Position::new(row, col))),
                Ok(MatchStatus::InProgress)
            );
        }
        assert_eq!(
            session.submit_move(Some(Position::new(0, 2))),
            Ok(MatchStatus::Won(Mark::X))
        );
        assert_eq!(session.move_count(), 5);
        assert_eq!(session.last_move(), Some(Position::new(0, 2)));
        let line = session.winning_line().unwrap();
        assert_eq!(line.start, Position::new(0, 0));
        assert_eq!(line.end, Position::new(0, 2));
    }

    #[test]
    fn test_moves_after_end_are_rejected() {
        let mut session = pvp();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            session.submit_move(Some(Position::new(row, col))).unwrap();
        }
        assert_eq!(
            session.submit_move(Some(Position::new(2, 2))),
            Err(GameError::MatchOver)
        );
        assert_eq!(session.status(), MatchStatus::Won(Mark::X));
    }

    #[test]
    fn test_quit_abandons_match() {
        let mut session = pvp();
        session.submit_move(Some(Position::new(1, 1))).unwrap();
        assert_eq!(session.submit_move(None), Ok(MatchStatus::Abandoned));
        assert!(session.winning_line().is_none());
        assert_eq!(session.submit_move(None), Err(GameError::MatchOver));
    }

    #[test]
    fn test_illegal_human_move_keeps_turn() {
        let mut session = pvp();
        session.submit_move(Some(Position::new(1, 1))).unwrap();
        let result = session.submit_move(Some(Position::new(1, 1)));
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
        assert_eq!(session.current_mark(), Mark::O);
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.status(), MatchStatus::InProgress);
    }

    #[test]
    fn test_turn_ownership() {
        let mut rng = SessionRng::new(1);
        let mut session = TicTacToeSession::new(GameMode::VersusEasyBot, SearchSettings::default()).unwrap();
        assert!(!session.is_bot_turn());
        assert_eq!(session.play_bot_turn(&mut rng), Err(GameError::NotBotTurn));

        session.submit_move(Some(Position::new(0, 0))).unwrap();
        assert!(session.is_bot_turn());
        assert_eq!(
            session.submit_move(Some(Position::new(1, 1))),
            Err(GameError::NotHumanTurn)
        );

        let position = session.play_bot_turn(&mut rng).unwrap();
        assert_ne!(position, Position::new(0, 0));
        assert_eq!(session.state().board().get(position.row, position.col), Some(Mark::O));
    }

    #[test]
    fn test_full_match_against_easy_bot_terminates() {
        let mut rng = SessionRng::new(2024);
        let mut session = TicTacToeSession::new(GameMode::VersusEasyBot, SearchSettings::default()).unwrap();
        while !session.status().is_over() {
            if session.is_bot_turn() {
                session.play_bot_turn(&mut rng).unwrap();
            } else {
                let first_free = session.state().board().available_moves()[0];
                session.submit_move(Some(first_free)).unwrap();
            }
        }
        assert!(session.move_count() >= 5 && session.move_count() <= 9);
        assert_ne!(session.status(), MatchStatus::Abandoned);
    }

    #[test]
    fn test_bot_vs_bot_classic_match_is_drawn() {
        let mut rng = SessionRng::new(0);
        let bot = Controller::Bot(BotType::Minimax);
        let mut session = TicTacToeSession::with_controllers(
            BoardSize::Classic,
            bot,
            bot,
            SearchSettings::default(),
        )
        .unwrap();
        while !session.status().is_over() {
            session.play_bot_turn(&mut rng).unwrap();
        }
        assert_eq!(session.status(), MatchStatus::Draw);
        assert_eq!(session.move_count(), 9);
    }

    #[test]
    fn test_hard_bot_answers_on_large_board() {
        let mut rng = SessionRng::new(0);
        let settings = SearchSettings {
            classic_depth: 6,
            large_depth: 2,
        };
        let mut session = TicTacToeSession::new(GameMode::VersusHardBot, settings).unwrap();
        session.submit_move(Some(Position::new(2, 2))).unwrap();
        let reply = session.play_bot_turn(&mut rng).unwrap();
        assert_ne!(reply, Position::new(2, 2));
        assert_eq!(session.current_mark(), Mark::X);
    }
}
