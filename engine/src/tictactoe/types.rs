use std::fmt;

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new(index / size, index % size)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(mark: Mark, start: Position, end: Position) -> Self {
        Self { mark, start, end }
    }

    /// Every cell of the line, from `start` to `end`.
    pub fn cells(&self) -> Vec<Position> {
        let step = |from: usize, to: usize| -> isize {
            match to.cmp(&from) {
                std::cmp::Ordering::Greater => 1,
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
            }
        };
        let dr = step(self.start.row, self.end.row);
        let dc = step(self.start.col, self.end.col);
        let len = self.start.row.abs_diff(self.end.row).max(self.start.col.abs_diff(self.end.col)) + 1;

        (0..len as isize)
            .map(|i| {
                Position::new(
                    self.start.row.wrapping_add_signed(dr * i),
                    self.start.col.wrapping_add_signed(dc * i),
                )
            })
            .collect()
    }
}

/// Outcome of a position as judged by the win detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn from_winner(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
            Mark::Empty => GameStatus::InProgress,
        }
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// The two built-in boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSize {
    Classic,
    Large,
}

impl BoardSize {
    pub fn side(self) -> usize {
        match self {
            BoardSize::Classic => 3,
            BoardSize::Large => 5,
        }
    }

    pub fn win_length(self) -> usize {
        super::win_detector::win_length(self.side())
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = GameError;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        match side {
            3 => Ok(BoardSize::Classic),
            5 => Ok(BoardSize::Large),
            other => Err(GameError::UnsupportedBoardSize(other)),
        }
    }
}
