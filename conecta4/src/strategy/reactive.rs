use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::Strategy;
use crate::{Board, Player, COLUMNS};

/// The "easy" computer opponent: drops its token into a uniformly random
/// column that is not full. It neither blocks nor builds lines.
pub struct ReactiveStrategy<R = StdRng> {
    rng: R,
}

impl<R: Rng> ReactiveStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for ReactiveStrategy<R> {
    fn choose_column(&mut self, board: &Board, player: Player) -> Option<i8> {
        if board.is_full() {
            return None;
        }
        // Draw until a column with room comes up
        let mut draws = 1;
        let column = loop {
            let column = self.rng.gen_range(0..COLUMNS);
            if !board.is_column_full(column) {
                break column;
            }
            draws += 1;
        };
        debug!(%player, column, draws, "Reactive move");
        Some(column)
    }

    fn name(&self) -> &str {
        "reactive"
    }
}
