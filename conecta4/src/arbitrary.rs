use quickcheck::{Arbitrary, Gen};

use crate::{Board, Move, Player, COLUMNS};

/// A list of column choices, played with alternating colors starting with red.
#[derive(Clone, Debug)]
pub struct MoveSequence {
    // May contain full columns, which are skipped on replay.
    pub columns: Vec<i8>,
}

impl MoveSequence {
    /// Plays the sequence on an empty board, ignoring wins along the way.
    ///
    /// Returns the board and every token that was actually placed.
    pub fn replay(&self) -> (Board, Vec<Move>) {
        let mut board = Board::new();
        let mut played = Vec::with_capacity(self.columns.len());
        let mut player = Player::Red;
        for &column in &self.columns {
            if let Ok(mv) = board.insert(column, player) {
                played.push(mv);
                player = player.opponent();
            }
        }
        (board, played)
    }
}

impl Arbitrary for MoveSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        // Long enough to fill the board now and then
        let len = usize::arbitrary(g) % 70;
        let columns = (0..len)
            .map(|_| (u8::arbitrary(g) % COLUMNS as u8) as i8)
            .collect();
        MoveSequence { columns }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.columns
                .shrink()
                .map(|columns| MoveSequence { columns }),
        )
    }
}

impl Arbitrary for Player {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Player::Red, Player::Blue]).unwrap()
    }
}
