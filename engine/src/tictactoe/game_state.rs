use crate::error::GameError;
use super::board::Board;
use super::types::{BoardSize, GameStatus, Mark, Position, WinningLine};
use super::win_detector::{check_win_with_line, evaluate_status, win_length};

/// Grid plus side to move. `apply_move` is the only mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    board: Board,
    win_count: usize,
    current_mark: Mark,
}

pub type GameState = TicTacToeGameState;

impl TicTacToeGameState {
    /// Fresh empty board with X to move.
    pub fn new(size: usize) -> Result<Self, GameError> {
        Self::with_board_size(BoardSize::try_from(size)?)
    }

    pub fn with_board_size(board_size: BoardSize) -> Result<Self, GameError> {
        let side = board_size.side();
        Ok(Self {
            board: Board::try_new(side)?,
            win_count: win_length(side),
            current_mark: Mark::X,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn win_length(&self) -> usize {
        self.win_count
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn is_legal_move(&self, row: usize, col: usize) -> bool {
        self.board.is_empty_at(row, col)
    }

    /// Places the side-to-move's mark and passes the turn.
    ///
    /// An illegal target is rejected and leaves the state untouched.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        if !self.is_legal_move(row, col) {
            return Err(GameError::IllegalMove {
                position: Position::new(row, col),
            });
        }

        self.board.set(row, col, self.current_mark);
        self.switch_turn();
        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X {
            Mark::O
        } else {
            Mark::X
        };
    }

    pub fn status(&self) -> GameStatus {
        evaluate_status(&self.board, self.win_count)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board, self.win_count)
    }

    pub fn try_clone(&self) -> Result<Self, GameError> {
        Ok(Self {
            board: self.board.try_clone()?,
            win_count: self.win_count,
            current_mark: self.current_mark,
        })
    }

    /// Raw position for tests; the side to move follows from the mark counts.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let board = Board::from_rows(rows);
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);
        let current_mark = if x_count > o_count { Mark::O } else { Mark::X };
        Self {
            win_count: win_length(board.size()),
            board,
            current_mark,
        }
    }
}
