use std::io::{self, BufRead, Write};

use morpion_engine::tictactoe::{GameMode, Mark, MatchStatus, Position, TicTacToeSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Move(Position),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(GameMode),
    Quit,
}

/// Parses `row col` (1-based) or `q`.
pub fn parse_move(line: &str, size: usize) -> Result<PlayerInput, String> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Ok(PlayerInput::Quit);
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Err(format!("Expected \"row column\", got {:?}", trimmed));
    };

    let parse = |value: &str| -> Result<usize, String> {
        match value.parse::<usize>() {
            Ok(n) if (1..=size).contains(&n) => Ok(n - 1),
            _ => Err(format!("{} is not a number between 1 and {}", value, size)),
        }
    };

    Ok(PlayerInput::Move(Position::new(parse(*row)?, parse(*col)?)))
}

pub fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Play(GameMode::PlayerVsPlayer)),
        "2" => Some(MenuChoice::Play(GameMode::VersusEasyBot)),
        "3" => Some(MenuChoice::Play(GameMode::VersusHardBot)),
        "4" | "q" | "Q" => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Line-oriented front-end over any reader and writer.
pub struct Terminal<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn prompt_menu(&mut self) -> io::Result<MenuChoice> {
        loop {
            writeln!(self.output, "== Morpion ==")?;
            writeln!(self.output, "1. Player vs Player")?;
            writeln!(self.output, "2. Player vs computer (easy)")?;
            writeln!(self.output, "3. Player vs computer (hard, 5x5)")?;
            writeln!(self.output, "4. Quit")?;
            write!(self.output, "Choice: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(MenuChoice::Quit);
            };
            match parse_menu_choice(&line) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "Unknown choice {:?}", line.trim())?,
            }
        }
    }

    pub fn prompt_move(&mut self, session: &TicTacToeSession) -> io::Result<PlayerInput> {
        let size = session.state().size();
        loop {
            write!(
                self.output,
                "Player {}, enter row and column (1-{}) or q to quit: ",
                session.current_mark(),
                size
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(PlayerInput::Quit);
            };
            match parse_move(&line, size) {
                Ok(input) => return Ok(input),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    pub fn draw_board(&mut self, session: &TicTacToeSession) -> io::Result<()> {
        let board = session.state().board();
        let size = board.size();
        let highlighted = session
            .winning_line()
            .map(|line| line.cells())
            .unwrap_or_default();
        let separator = format!("   {}+", "+---".repeat(size));

        write!(self.output, "    ")?;
        for col in 1..=size {
            write!(self.output, " {}  ", col)?;
        }
        writeln!(self.output)?;

        for row in 0..size {
            writeln!(self.output, "{}", separator)?;
            write!(self.output, " {} ", row + 1)?;
            for col in 0..size {
                let mark = board.get(row, col).unwrap_or(Mark::Empty);
                if highlighted.contains(&Position::new(row, col)) {
                    write!(self.output, "|[{}]", mark)?;
                } else {
                    write!(self.output, "| {} ", mark)?;
                }
            }
            writeln!(self.output, "|")?;
        }
        writeln!(self.output, "{}", separator)?;

        if !session.status().is_over() {
            writeln!(self.output, "Current player: {}", session.current_mark())?;
        }
        Ok(())
    }

    pub fn show_outcome(&mut self, status: MatchStatus) -> io::Result<()> {
        match status {
            MatchStatus::Won(mark) => writeln!(self.output, "The winner is {}!", mark),
            MatchStatus::Draw => writeln!(self.output, "It's a draw!"),
            MatchStatus::Abandoned => writeln!(self.output, "Match abandoned."),
            MatchStatus::InProgress => Ok(()),
        }
    }
}
