use crate::Player;

/// The error type for one call into a [`Session`](crate::Session).
///
/// A full column is not an error at this level, see
/// [`TurnOutcome::column_full`](crate::TurnOutcome::column_full).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// The column index is outside of `0..COLUMNS`.
    InvalidColumnIndex { column: i8 },
    /// The game has already ended; the session has to be reset first.
    GameOver { winner: Option<Player> },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::InvalidColumnIndex { column } => {
                write!(
                    f,
                    "Column {} does not exist, valid columns are 0 to {}",
                    column,
                    crate::COLUMNS - 1
                )
            }
            IllegalMove::GameOver { winner: Some(winner) } => {
                write!(f, "Tried to play after the game was won by {}", winner)
            }
            IllegalMove::GameOver { winner: None } => {
                write!(f, "Tried to play after the game ended in a draw")
            }
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instances of
/// [`Player`] and [`Opponent`](crate::Opponent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNameError {
    pub name: String,
    pub expected: &'static [&'static str],
}

impl std::error::Error for ParseNameError {}

impl std::fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown name '{}', expected one of: {}", self.name, self.expected.join(", "))
    }
}
