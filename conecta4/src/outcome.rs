use serde::Serialize;

use crate::Player;

/// A token that was successfully dropped into the board.
///
/// Only [`Board::insert()`](crate::Board::insert) creates these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    row: i8,
    column: i8,
    player: Player,
}

impl Move {
    pub(crate) fn new(row: i8, column: i8, player: Player) -> Self {
        Self {
            row,
            column,
            player,
        }
    }

    /// The row the token came to rest in, counted from the bottom.
    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn column(&self) -> i8 {
        self.column
    }

    pub fn player(&self) -> Player {
        self.player
    }
}

/// Four tokens of the same color in a straight line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WinResult {
    winner: Player,
    /// `(row, column)` pairs, ordered along the winning axis from its negative
    /// end to its positive end: bottom to top for vertical lines, left to right
    /// for horizontal ones, by increasing row for both diagonals.
    cells: [(i8, i8); 4],
}

impl WinResult {
    pub(crate) fn new(winner: Player, cells: [(i8, i8); 4]) -> Self {
        Self { winner, cells }
    }

    pub fn winner(&self) -> Player {
        self.winner
    }

    pub fn cells(&self) -> &[(i8, i8); 4] {
        &self.cells
    }

    pub fn contains(&self, row: i8, column: i8) -> bool {
        self.cells.contains(&(row, column))
    }
}

/// Summarizes one call of [`Session::play_human_move()`](crate::Session::play_human_move).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    /// Whether the human's token was placed.
    pub accepted: bool,
    /// The requested column was full; nothing changed and the same player
    /// should choose again.
    pub column_full: bool,
    /// The board has no empty cell left after this turn.
    pub board_full: bool,
    /// Present when this turn ended the game with four in a row.
    pub win: Option<WinResult>,
    /// The human's token, if it was accepted.
    pub human_move: Option<Move>,
    /// The computer's answer, if the game continued and the mode has one.
    pub reply: Option<Move>,
}

impl TurnOutcome {
    pub(crate) fn rejected(board_full: bool) -> Self {
        Self {
            accepted: false,
            column_full: true,
            board_full,
            ..Self::default()
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.win.as_ref().map(WinResult::winner)
    }

    /// Whether no further moves are accepted until the session is reset.
    pub fn is_game_over(&self) -> bool {
        self.accepted && (self.win.is_some() || self.board_full)
    }
}

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameOutcome {
    Won(WinResult),
    Draw,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Won(win) => Some(win.winner()),
            GameOutcome::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_outcome_does_not_end_the_game() {
        let outcome = TurnOutcome::rejected(false);
        assert!(!outcome.accepted);
        assert!(outcome.column_full);
        assert!(!outcome.is_game_over());
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn game_outcome_json() {
        let win = WinResult::new(Player::Red, [(0, 3), (1, 3), (2, 3), (3, 3)]);
        let json = serde_json::to_value(GameOutcome::Won(win)).unwrap();
        assert_eq!(json["type"], "won");
        assert_eq!(json["winner"], "red");
        assert_eq!(json["cells"][3][0], 3);
        let json = serde_json::to_value(GameOutcome::Draw).unwrap();
        assert_eq!(json["type"], "draw");
    }
}
