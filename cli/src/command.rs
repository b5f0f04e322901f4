use std::str::FromStr;

use sweeper_core::{Coord, Coord2, Powerup};

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Powerup(Powerup),
    Undo,
    Restart,
    Level(String),
    /// Redraw without acting, lets time pass for pending peeks
    Show,
    Scores,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r X Y      reveal, or use the active hint mode on a cell
  f X Y      toggle a flag
  hint       peek a cell and its neighbors
  mega       peek a rectangle between two clicked corners (once per game)
  safe       peek one random safe cell
  ext        remove some mines for good (once per game)
  manual     place every mine by hand before the first move
  undo       step back one action
  restart    new game on the same level
  level KEY  switch to beginner, medium or expert
  show       redraw the board
  scores     list best times
  quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl std::fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, try `help`", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Coord2, ParseCommandError> {
    let mut next = || -> Result<Coord, ParseCommandError> {
        let arg = args
            .next()
            .ok_or_else(|| ParseCommandError("Expected two coordinates".into()))?;
        arg.parse()
            .map_err(|_| ParseCommandError(format!("Bad coordinate `{}`", arg)))
    };
    let x = next()?;
    let y = next()?;
    Ok((x, y))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Show);
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Reveal(parse_coords(words)?),
            "f" | "flag" => Flag(parse_coords(words)?),
            "hint" => Powerup(sweeper_core::Powerup::Hint),
            "mega" => Powerup(sweeper_core::Powerup::MegaHint),
            "safe" => Powerup(sweeper_core::Powerup::SafeClick),
            "ext" | "exterminate" => Powerup(sweeper_core::Powerup::Exterminator),
            "manual" => Powerup(sweeper_core::Powerup::ManualPlacement),
            "u" | "undo" => Undo,
            "restart" | "new" => Restart,
            "level" => Level(
                words
                    .next()
                    .ok_or_else(|| ParseCommandError("Expected a level key".into()))?
                    .to_owned(),
            ),
            "show" => Show,
            "scores" => Scores,
            "h" | "help" | "?" => Help,
            "q" | "quit" | "exit" => Quit,
            other => return Err(ParseCommandError(format!("Unknown command `{}`", other))),
        })
    }
}
