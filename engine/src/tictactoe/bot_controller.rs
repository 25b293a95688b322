use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::SearchSettings;
use super::board::Board;
use super::game_state::GameState;
use super::types::{GameStatus, Mark, Position};
use super::win_detector::evaluate_status;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    /// Uniformly random empty cell.
    Random,
    /// Depth-limited minimax.
    Minimax,
}

/// Move for the side to move, `None` when the bot has nothing to play.
pub fn calculate_move(
    bot_type: BotType,
    state: &GameState,
    settings: &SearchSettings,
    rng: &mut SessionRng,
) -> Result<Option<Position>, GameError> {
    match bot_type {
        BotType::Random => Ok(choose_easy_move(state, rng)),
        BotType::Minimax => choose_hard_move(state, settings, rng),
    }
}

/// Uniform pick among the empty cells; `None` only on a full board.
pub fn choose_easy_move(state: &GameState, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = state.board().available_moves();
    rng.choose(&available_moves).copied()
}

/// Best move for `state.current_mark()` by minimax search.
///
/// Ties go to the first cell in row-major order, so the result is reproducible.
/// The search runs on a private copy of the board; the caller's state is never
/// touched. Fails only when that copy cannot be allocated.
pub fn choose_hard_move(
    state: &GameState,
    settings: &SearchSettings,
    rng: &mut SessionRng,
) -> Result<Option<Position>, GameError> {
    let status = state.status();
    if status.is_terminal() {
        log!("Minimax bot asked to move in a finished game ({:?})", status);
        return Ok(None);
    }

    let bot_mark = state.current_mark();
    let win_count = state.win_length();
    let depth = settings.depth_for(state.size());
    let mut board = state.board().try_clone()?;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for position in state.board().available_moves() {
        board.set(position.row, position.col, bot_mark);
        let score = minimax(&mut board, win_count, depth.saturating_sub(1), false, bot_mark);
        board.set(position.row, position.col, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(position);
        }
    }

    if best_move.is_none() {
        log!(
            "Minimax bot found no move for {} on a {}x{} board, falling back to a random move",
            bot_mark,
            state.size(),
            state.size()
        );
        return Ok(choose_easy_move(state, rng));
    }

    Ok(best_move)
}

/// Score of `board` from `ai_mark`'s point of view, searching `depth` more plies.
///
/// Trial moves are written into `board` and erased again before the next sibling
/// is tried, so the board is unchanged when this returns.
pub fn minimax(
    board: &mut Board,
    win_count: usize,
    depth: usize,
    is_maximizing: bool,
    ai_mark: Mark,
) -> i32 {
    let status = evaluate_status(board, win_count);
    if depth == 0 || status.is_terminal() {
        return terminal_score(status, ai_mark, depth);
    }

    let Some(opponent_mark) = ai_mark.opponent() else {
        return 0;
    };
    let move_mark = if is_maximizing { ai_mark } else { opponent_mark };
    let size = board.size();
    let mut best: Option<i32> = None;

    for row in 0..size {
        for col in 0..size {
            if !board.is_empty_at(row, col) {
                continue;
            }

            board.set(row, col, move_mark);
            let eval = minimax(board, win_count, depth - 1, !is_maximizing, ai_mark);
            board.set(row, col, Mark::Empty);

            best = Some(match best {
                None => eval,
                Some(current) if is_maximizing => current.max(eval),
                Some(current) => current.min(eval),
            });
        }
    }

    best.unwrap_or_else(|| terminal_score(status, ai_mark, depth))
}

/// ±10 for a decided game, shifted by the remaining depth so that quicker wins
/// and slower losses rank higher. Draws and cut-offs score 0.
pub fn terminal_score(status: GameStatus, ai_mark: Mark, depth: usize) -> i32 {
    let depth = i32::try_from(depth).unwrap_or(i32::MAX - WIN_SCORE);
    match status.winner() {
        Some(winner) if winner == ai_mark => WIN_SCORE + depth,
        Some(_) => -WIN_SCORE - depth,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard_move(state: &GameState) -> Option<Position> {
        let mut rng = SessionRng::new(42);
        choose_hard_move(state, &SearchSettings::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_terminal_score_prefers_quick_wins_and_slow_losses() {
        for depth in 1..=6 {
            let win_now = terminal_score(GameStatus::XWon, Mark::X, depth);
            let win_later = terminal_score(GameStatus::XWon, Mark::X, depth - 1);
            assert!(win_now > win_later);

            let loss_now = terminal_score(GameStatus::OWon, Mark::X, depth);
            let loss_later = terminal_score(GameStatus::OWon, Mark::X, depth - 1);
            assert!(loss_now < loss_later);
        }
        assert_eq!(terminal_score(GameStatus::OWon, Mark::O, 0), 10);
        assert_eq!(terminal_score(GameStatus::XWon, Mark::O, 2), -12);
    }

    #[test]
    fn test_terminal_score_draw_and_cutoff_are_zero() {
        assert_eq!(terminal_score(GameStatus::Draw, Mark::X, 5), 0);
        assert_eq!(terminal_score(GameStatus::InProgress, Mark::O, 0), 0);
        assert_eq!(terminal_score(GameStatus::InProgress, Mark::O, 3), 0);
    }

    #[test]
    fn test_minimax_restores_board() {
        let mut board = Board::from_rows(&["X..", ".O.", "..."]);
        let before = board.clone();
        minimax(&mut board, 3, 4, true, Mark::X);
        assert_eq!(board, before);
    }

    #[test]
    fn test_minimax_on_decided_board() {
        let mut board = Board::from_rows(&["XXX", "OO.", "..."]);
        assert_eq!(minimax(&mut board, 3, 3, false, Mark::X), 13);
        assert_eq!(minimax(&mut board, 3, 3, true, Mark::O), -13);
    }

    #[test]
    fn test_easy_move_is_always_empty_cell() {
        let state = GameState::from_rows(&["XO.", ".X.", "O.."]);
        let mut rng = SessionRng::new(5);
        for _ in 0..100 {
            let position = choose_easy_move(&state, &mut rng).unwrap();
            assert!(state.is_legal_move(position.row, position.col));
        }
    }

    #[test]
    fn test_easy_move_single_cell_left() {
        let state = GameState::from_rows(&["XOX", "XOO", "OX."]);
        let mut rng = SessionRng::new(9);
        assert_eq!(choose_easy_move(&state, &mut rng), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_easy_move_full_board_is_none() {
        let state = GameState::from_rows(&["XOX", "XOX", "OXO"]);
        let mut rng = SessionRng::new(9);
        assert_eq!(choose_easy_move(&state, &mut rng), None);
    }

    #[test]
    fn test_easy_move_covers_all_cells() {
        let state = GameState::new(3).unwrap();
        let mut rng = SessionRng::new(11);
        let mut seen = [false; 9];
        for _ in 0..500 {
            let position = choose_easy_move(&state, &mut rng).unwrap();
            seen[position.to_index(3)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_hard_takes_immediate_win() {
        let state = GameState::from_rows(&["XX.", "OO.", "..."]);
        assert_eq!(hard_move(&state), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_hard_blocks_immediate_loss() {
        let state = GameState::from_rows(&["XX.", ".O.", "..."]);
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(hard_move(&state), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_hard_first_move_tie_breaks_row_major() {
        let state = GameState::new(3).unwrap();
        assert_eq!(hard_move(&state), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_hard_is_deterministic() {
        let state = GameState::from_rows(&["X..", "...", "..."]);
        let first = hard_move(&state);
        for seed in 0..3 {
            let mut rng = SessionRng::new(seed);
            let again = choose_hard_move(&state, &SearchSettings::default(), &mut rng).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_hard_does_not_touch_callers_state() {
        let state = GameState::from_rows(&["X..", ".O.", "..X"]);
        let before = state.clone();
        hard_move(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_hard_on_finished_game_is_none() {
        let won = GameState::from_rows(&["XXX", "OO.", "..."]);
        assert_eq!(hard_move(&won), None);
        let drawn = GameState::from_rows(&["XOX", "XOX", "OXO"]);
        assert_eq!(hard_move(&drawn), None);
    }

    #[test]
    fn test_hard_self_play_on_classic_board_is_a_draw() {
        let mut state = GameState::new(3).unwrap();
        while !state.status().is_terminal() {
            let position = hard_move(&state).unwrap();
            state.apply_move(position.row, position.col).unwrap();
        }
        assert_eq!(state.status(), GameStatus::Draw);
    }

    #[test]
    fn test_hard_as_first_player_never_loses_to_random() {
        let settings = SearchSettings::default();
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            let mut state = GameState::new(3).unwrap();
            while !state.status().is_terminal() {
                let position = if state.current_mark() == Mark::X {
                    choose_hard_move(&state, &settings, &mut rng).unwrap()
                } else {
                    choose_easy_move(&state, &mut rng)
                }
                .unwrap();
                state.apply_move(position.row, position.col).unwrap();
            }
            assert_ne!(state.status(), GameStatus::OWon, "seed {}", seed);
        }
    }

    #[test]
    fn test_hard_takes_four_in_a_row_on_large_board() {
        let state = GameState::from_rows(&[
            ".XXX.",
            "OO...",
            "O....",
            ".....",
            ".....",
        ]);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(hard_move(&state), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_hard_blocks_four_in_a_row_on_large_board() {
        let state = GameState::from_rows(&[
            "XXX..",
            "OO...",
            ".....",
            ".....",
            ".....",
        ]);
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(hard_move(&state), Some(Position::new(0, 3)));
    }

    #[test]
    fn test_shallow_settings_still_find_the_win() {
        let settings = SearchSettings {
            classic_depth: 1,
            large_depth: 1,
        };
        let mut rng = SessionRng::new(0);
        let state = GameState::from_rows(&["OO.", "XX.", "X.."]);
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(
            choose_hard_move(&state, &settings, &mut rng).unwrap(),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_calculate_move_dispatch() {
        let state = GameState::from_rows(&["XX.", "OO.", "..."]);
        let settings = SearchSettings::default();
        let mut rng = SessionRng::new(3);
        assert_eq!(
            calculate_move(BotType::Minimax, &state, &settings, &mut rng).unwrap(),
            Some(Position::new(0, 2))
        );
        let random = calculate_move(BotType::Random, &state, &settings, &mut rng)
            .unwrap()
            .unwrap();
        assert!(state.is_legal_move(random.row, random.col));
    }
}
