use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseNameError;

/// One of the two token colors.
///
/// In the human-vs-computer modes the human plays [`Player::Red`] unless
/// configured otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// The other color.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Single character used when rendering a board.
    pub fn glyph(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Blue => 'B',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Red => write!(f, "red"),
            Player::Blue => write!(f, "blue"),
        }
    }
}

impl FromStr for Player {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Player::Red),
            "blue" | "b" => Ok(Player::Blue),
            _ => Err(ParseNameError {
                name: String::from(s),
                expected: &["red", "blue"],
            }),
        }
    }
}

/// A single slot of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}
