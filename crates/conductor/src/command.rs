//! Text commands for the terminal board surface.

use chess_core::{parse_coordinates, Square};
use thiserror::Error;

use crate::classify::MoveRequest;
use crate::orchestrator::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forwarded to the orchestrator.
    Send(Message),
    Board,
    History,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("not a square: {0:?}")]
    Square(String),

    #[error("unknown command {0:?}, try 'help'")]
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  e2e4, e7e8q   move (promotion letter optional, queen by default)
  click e2      click a square (select, deselect, or move the selection)
  new           start a new game
  switch        swap sides with the computer
  mute          toggle sound
  board         show the board
  history       show the moves so far
  quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "click" => {
            let arg = words.next().unwrap_or_default();
            let sq: Square = arg.parse().map_err(|_| CommandError::Square(arg.to_string()))?;
            Command::Send(Message::SquareClicked(sq))
        }
        "new" | "reset" => Command::Send(Message::NewGame),
        "switch" => Command::Send(Message::SwitchSides),
        "mute" => Command::Send(Message::ToggleMute),
        "board" => Command::Board,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match parse_coordinates(other) {
            Some((from, to, promotion)) => Command::Send(Message::MoveRequested(MoveRequest {
                from,
                to,
                promotion,
            })),
            None => return Err(CommandError::Unknown(head.to_string())),
        },
    };
    Ok(command)
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
