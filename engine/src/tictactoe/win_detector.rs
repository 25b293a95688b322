use super::board::Board;
use super::types::{GameStatus, Mark, Position, WinningLine};

/// Side-by-side symbols needed to win.
///
/// Small boards must be filled edge to edge; from 5×5 upwards four in a row is
/// enough, otherwise the large board would almost never produce a winner.
pub fn win_length(size: usize) -> usize {
    if size < 5 { size } else { 4 }
}

#[derive(Clone, Copy)]
enum Direction {
    Right,
    Down,
    DownRight,
    DownLeft,
}

// Probe order matters when several lines exist at once.
const DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::DownRight,
    Direction::DownLeft,
];

pub fn check_win(board: &Board, win_count: usize) -> Option<Mark> {
    check_win_with_line(board, win_count).map(|line| line.mark)
}

/// First winning run in row-major order, probing each cell in `DIRECTIONS` order.
pub fn check_win_with_line(board: &Board, win_count: usize) -> Option<WinningLine> {
    let size = board.size();
    if win_count == 0 {
        return None;
    }

    for y in 0..size {
        for x in 0..size {
            let Some(mark) = board.get(y, x) else {
                continue;
            };
            if mark == Mark::Empty {
                continue;
            }

            for direction in DIRECTIONS {
                if let Some(end) = run_end(board, x, y, mark, win_count, direction) {
                    return Some(WinningLine::new(mark, Position::new(y, x), end));
                }
            }
        }
    }

    None
}

/// Winner if any, otherwise draw on a full board, otherwise still in progress.
pub fn evaluate_status(board: &Board, win_count: usize) -> GameStatus {
    if let Some(mark) = check_win(board, win_count) {
        return GameStatus::from_winner(mark);
    }
    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

fn run_end(
    board: &Board,
    x: usize,
    y: usize,
    mark: Mark,
    win_count: usize,
    direction: Direction,
) -> Option<Position> {
    match direction {
        Direction::Right => check_horizontal(board, x, y, mark, win_count)
            .then(|| Position::new(y, x + win_count - 1)),
        Direction::Down => check_vertical(board, x, y, mark, win_count)
            .then(|| Position::new(y + win_count - 1, x)),
        Direction::DownRight => check_diagonal_down_right(board, x, y, mark, win_count)
            .then(|| Position::new(y + win_count - 1, x + win_count - 1)),
        Direction::DownLeft => check_diagonal_down_left(board, x, y, mark, win_count)
            .then(|| Position::new(y + win_count - 1, x + 1 - win_count)),
    }
}

fn check_horizontal(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if x + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.get(y, x + i) == Some(mark))
}

fn check_vertical(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if y + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.get(y + i, x) == Some(mark))
}

fn check_diagonal_down_right(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    let size = board.size();
    if x + win_count > size || y + win_count > size {
        return false;
    }
    (0..win_count).all(|i| board.get(y + i, x + i) == Some(mark))
}

fn check_diagonal_down_left(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if x + 1 < win_count || y + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.get(y + i, x - i) == Some(mark))
}
