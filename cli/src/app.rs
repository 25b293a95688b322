use std::io::{BufRead, Write};

use morpion_engine::tictactoe::{GameMode, MatchStatus, TicTacToeSession};
use morpion_engine::{GameError, SearchSettings, SessionRng, log};

use crate::terminal::{MenuChoice, PlayerInput, Terminal};

/// Menu loop: one match per choice until the player quits.
pub fn run_menu<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    settings: &SearchSettings,
    rng: &mut SessionRng,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match terminal.prompt_menu()? {
            MenuChoice::Play(mode) => {
                run_match(terminal, mode, settings, rng)?;
            }
            MenuChoice::Quit => return Ok(()),
        }
    }
}

/// Plays one match to its end.
///
/// Engine failures end the match but not the program; only terminal I/O errors
/// are returned.
pub fn run_match<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    mode: GameMode,
    settings: &SearchSettings,
    rng: &mut SessionRng,
) -> Result<MatchStatus, std::io::Error> {
    let mut session = match TicTacToeSession::new(mode, *settings) {
        Ok(session) => session,
        Err(e) => {
            log!("Could not start {:?} match: {}", mode, e);
            terminal.message(&format!("Could not start the match: {}", e))?;
            return Ok(MatchStatus::Abandoned);
        }
    };

    while !session.status().is_over() {
        terminal.draw_board(&session)?;

        if session.is_bot_turn() {
            terminal.message("The computer is thinking...")?;
            if let Err(e) = session.play_bot_turn(rng) {
                terminal.message(&format!("The computer could not play: {}", e))?;
            }
            continue;
        }

        let input = match terminal.prompt_move(&session)? {
            PlayerInput::Move(position) => Some(position),
            PlayerInput::Quit => None,
        };
        match session.submit_move(input) {
            Ok(_) => {}
            Err(GameError::IllegalMove { .. }) => terminal.message("That cell is not free.")?,
            Err(e) => terminal.message(&e.to_string())?,
        }
    }

    terminal.draw_board(&session)?;
    terminal.show_outcome(session.status())?;
    Ok(session.status())
}
