mod heuristic;
mod reactive;

pub use heuristic::*;
pub use reactive::*;

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{Board, ParseNameError, Player};

/// A computer opponent.
///
/// Strategies only read the board; the caller inserts the returned column.
pub trait Strategy {
    /// Picks a column for a token of `player`.
    ///
    /// Returns `None` only if the board is full.
    fn choose_column(&mut self, board: &Board, player: Player) -> Option<i8>;

    fn name(&self) -> &str;
}

/// Selects the computer opponent of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    /// Two humans take turns; there is no computer reply.
    Human,
    /// See [`HeuristicStrategy`].
    #[default]
    Heuristic,
    /// See [`ReactiveStrategy`].
    Reactive,
}

impl Opponent {
    /// Builds the strategy for this opponent, if it has one.
    pub fn build(self, seed: u64) -> Option<Box<dyn Strategy>> {
        self.build_with(StdRng::seed_from_u64(seed), HeuristicConfig::default())
    }

    /// Like [`Self::build()`], with an explicit random source and tuning.
    pub fn build_with(
        self,
        rng: StdRng,
        heuristic: HeuristicConfig,
    ) -> Option<Box<dyn Strategy>> {
        match self {
            Opponent::Human => None,
            Opponent::Heuristic => Some(Box::new(HeuristicStrategy::with_config(rng, heuristic))),
            Opponent::Reactive => Some(Box::new(ReactiveStrategy::new(rng))),
        }
    }
}

impl std::fmt::Display for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Opponent::Human => write!(f, "human"),
            Opponent::Heuristic => write!(f, "heuristic"),
            Opponent::Reactive => write!(f, "reactive"),
        }
    }
}

impl FromStr for Opponent {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "none" => Ok(Opponent::Human),
            "heuristic" | "hard" => Ok(Opponent::Heuristic),
            "reactive" | "easy" => Ok(Opponent::Reactive),
            _ => Err(ParseNameError {
                name: String::from(s),
                expected: &["human", "heuristic", "reactive"],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveSequence;

    quickcheck! {
        fn strategies_pick_legal_columns(moves: MoveSequence, seed: u64, player: Player) -> bool {
            let (board, _) = moves.replay();
            [Opponent::Heuristic, Opponent::Reactive].into_iter().all(|opponent| {
                let mut strategy = opponent.build(seed).unwrap();
                match strategy.choose_column(&board, player) {
                    Some(column) => !board.is_column_full(column),
                    None => board.is_full(),
                }
            })
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("hard".parse::<Opponent>(), Ok(Opponent::Heuristic));
        assert_eq!("Reactive".parse::<Opponent>(), Ok(Opponent::Reactive));
        assert_eq!("none".parse::<Opponent>(), Ok(Opponent::Human));
        let err = "minimax".parse::<Opponent>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown name 'minimax', expected one of: human, heuristic, reactive"
        );
    }

    #[test]
    fn human_opponent_has_no_strategy() {
        assert!(Opponent::Human.build(0).is_none());
        assert_eq!(Opponent::Heuristic.build(0).unwrap().name(), "heuristic");
        assert_eq!(Opponent::Reactive.build(0).unwrap().name(), "reactive");
    }
}
