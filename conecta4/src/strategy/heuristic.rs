use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Strategy;
use crate::{Board, Player, WIN_LENGTH};

/// Tuning for [`HeuristicStrategy`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// When the best own column scores exactly as high as the best column of
    /// the opponent, this is the probability of extending the own line
    /// instead of blocking.
    pub offense_tie_probability: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            offense_tie_probability: 0.33,
        }
    }
}

/// The adjacency scores of one legal column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnScore {
    pub column: i8,
    /// The row a token dropped into this column would land in.
    pub row: i8,
    /// [`Board::adjacency()`] for the player about to move.
    pub own: u8,
    /// [`Board::adjacency()`] for the opponent.
    pub opponent: u8,
}

/// Scores every legal column by what a token there would connect to, for
/// both colors. The board is not modified.
pub fn score_columns(board: &Board, player: Player) -> Vec<ColumnScore> {
    board
        .lowest_empty_rows()
        .into_iter()
        .zip(0..)
        .filter_map(|(row, column)| {
            row.map(|row| ColumnScore {
                column,
                row,
                own: board.adjacency(row, column, player),
                opponent: board.adjacency(row, column, player.opponent()),
            })
        })
        .collect()
}

/// The "hard" computer opponent.
///
/// It looks one move ahead: every legal column is scored by how many tokens a
/// token there would connect to, for itself and for the opponent. It then
///
/// 1. blocks if the opponent could complete four in a row with their next
///    token, even when it could complete four itself,
/// 2. otherwise plays the side (own line or block) with the higher score,
/// 3. and on equal scores flips a biased coin, see [`HeuristicConfig`].
///
/// Columns with equal scores on the same side are chosen between uniformly.
///
/// Because it never looks further ahead, it can walk into forced losses and
/// only blocks one of several simultaneous threats.
pub struct HeuristicStrategy<R = StdRng> {
    rng: R,
    config: HeuristicConfig,
}

impl<R: Rng> HeuristicStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, HeuristicConfig::default())
    }

    pub fn with_config(rng: R, mut config: HeuristicConfig) -> Self {
        if !(0.0..=1.0).contains(&config.offense_tie_probability) {
            warn!(
                offense_tie_probability = config.offense_tie_probability,
                "Probability out of range, using the default"
            );
            config = HeuristicConfig::default();
        }
        Self { rng, config }
    }

    // Internal helper to pick the column with the highest score,
    // breaking ties randomly.
    fn best_column(
        &mut self,
        scores: &[ColumnScore],
        key: impl Fn(&ColumnScore) -> u8,
    ) -> Option<(i8, u8)> {
        let mut top_choices: Vec<i8> = Vec::new();
        let mut top_score = 0;
        for score in scores {
            let value = key(score);
            match value.cmp(&top_score) {
                Ordering::Less => {}
                Ordering::Equal => {
                    top_choices.push(score.column);
                }
                Ordering::Greater => {
                    top_choices = vec![score.column];
                    top_score = value;
                }
            }
        }
        top_choices
            .choose(&mut self.rng)
            .map(|&column| (column, top_score))
    }
}

impl<R: Rng> Strategy for HeuristicStrategy<R> {
    fn choose_column(&mut self, board: &Board, player: Player) -> Option<i8> {
        let scores = score_columns(board, player);
        let (own_column, own_score) = self.best_column(&scores, |s| s.own)?;
        let (block_column, block_score) = self.best_column(&scores, |s| s.opponent)?;

        let column = if block_score == (WIN_LENGTH - 1) as u8 {
            block_column
        } else {
            match own_score.cmp(&block_score) {
                Ordering::Greater => own_column,
                Ordering::Less => block_column,
                Ordering::Equal => {
                    if self.rng.gen_bool(self.config.offense_tie_probability) {
                        own_column
                    } else {
                        block_column
                    }
                }
            }
        };
        debug!(
            %player,
            own_column,
            own_score,
            block_column,
            block_score,
            column,
            "Heuristic move"
        );
        Some(column)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    use super::*;
    use crate::board::tests::board_from;
    use crate::COLUMNS;

    // Always takes the first of several tied columns, and always goes on the
    // offense on a tie.
    fn first_choice_strategy() -> HeuristicStrategy<StepRng> {
        HeuristicStrategy::new(StepRng::new(0, 0))
    }

    #[test]
    fn scores_only_legal_columns() {
        let mut moves: Vec<(i8, Player)> = vec![(4, Player::Red); 6];
        moves.push((3, Player::Blue));
        let board = board_from(&moves);
        let scores = score_columns(&board, Player::Red);
        assert_eq!(scores.len(), COLUMNS as usize - 1);
        assert!(scores.iter().all(|s| s.column != 4));
        let next_to_blue = scores.iter().find(|s| s.column == 2).unwrap();
        assert_eq!((next_to_blue.row, next_to_blue.own, next_to_blue.opponent), (0, 0, 1));
        let on_top_of_blue = scores.iter().find(|s| s.column == 3).unwrap();
        // Diagonally and horizontally next to the red tower, on top of blue
        assert_eq!(
            (on_top_of_blue.row, on_top_of_blue.own, on_top_of_blue.opponent),
            (1, 1, 1)
        );
    }

    #[test]
    fn empty_board_uses_the_tie_break() {
        let board = Board::new();
        assert_eq!(first_choice_strategy().choose_column(&board, Player::Blue), Some(0));
    }

    #[test]
    fn blocks_an_immediate_threat() {
        // Blue threatens to complete the bottom row in column 3; red has a pair
        // in column 8.
        let board = board_from(&[
            (0, Player::Blue),
            (8, Player::Red),
            (1, Player::Blue),
            (8, Player::Red),
            (2, Player::Blue),
        ]);
        for seed in 0..20 {
            let mut strategy = HeuristicStrategy::new(StdRng::seed_from_u64(seed));
            assert_eq!(strategy.choose_column(&board, Player::Red), Some(3));
        }
    }

    #[test]
    fn blocking_beats_completing_own_four() {
        let board = board_from(&[
            (0, Player::Blue),
            (8, Player::Red),
            (1, Player::Blue),
            (8, Player::Red),
            (2, Player::Blue),
            (8, Player::Red),
        ]);
        assert_eq!(first_choice_strategy().choose_column(&board, Player::Red), Some(3));
    }

    #[test]
    fn completes_own_four_without_a_threat() {
        let board = board_from(&[
            (8, Player::Red),
            (0, Player::Blue),
            (8, Player::Red),
            (5, Player::Blue),
            (8, Player::Red),
        ]);
        for seed in 0..20 {
            let mut strategy = HeuristicStrategy::new(StdRng::seed_from_u64(seed));
            assert_eq!(strategy.choose_column(&board, Player::Red), Some(8));
        }
    }

    #[test]
    fn stronger_side_wins() {
        // Red can extend a pair, blue only has single tokens to build on
        let board = board_from(&[(6, Player::Red), (6, Player::Red), (0, Player::Blue)]);
        let mut strategy = HeuristicStrategy::new(StdRng::seed_from_u64(7));
        assert_eq!(strategy.choose_column(&board, Player::Red), Some(6));

        // Blue has the pair now, so red blocks
        let board = board_from(&[(6, Player::Blue), (6, Player::Blue), (0, Player::Red)]);
        assert_eq!(strategy.choose_column(&board, Player::Red), Some(6));
    }

    #[test]
    fn ties_lean_towards_blocking() {
        // Red's best columns are 0 and 1 (score 1), blue's are 7 and 8 (score 1)
        let board = board_from(&[(0, Player::Red), (8, Player::Blue)]);
        let mut offense = 0;
        let runs = 300;
        for seed in 0..runs {
            let mut strategy = HeuristicStrategy::new(StdRng::seed_from_u64(seed));
            match strategy.choose_column(&board, Player::Red) {
                Some(0 | 1) => offense += 1,
                Some(7 | 8) => {}
                other => panic!("Unexpected choice {:?}", other),
            }
        }
        assert!((60..=140).contains(&offense), "{} offensive moves", offense);
    }

    #[test]
    fn tie_probability_can_be_tuned() {
        let board = board_from(&[(0, Player::Red), (8, Player::Blue)]);
        let always_block = HeuristicConfig {
            offense_tie_probability: 0.0,
        };
        for seed in 0..20 {
            let mut strategy =
                HeuristicStrategy::with_config(StdRng::seed_from_u64(seed), always_block);
            let column = strategy.choose_column(&board, Player::Red).unwrap();
            assert!(column == 7 || column == 8);
        }
    }

    #[test]
    fn invalid_tie_probability_falls_back_to_default() {
        let strategy = HeuristicStrategy::with_config(
            StepRng::new(0, 0),
            HeuristicConfig {
                offense_tie_probability: 1.5,
            },
        );
        assert_eq!(strategy.config, HeuristicConfig::default());
    }

    #[test]
    fn only_one_of_two_threats_is_blocked() {
        // Blue can win in column 3 and in column 7
        let board = board_from(&[
            (0, Player::Blue),
            (1, Player::Blue),
            (2, Player::Blue),
            (7, Player::Blue),
            (7, Player::Blue),
            (7, Player::Blue),
        ]);
        let column = first_choice_strategy()
            .choose_column(&board, Player::Red)
            .unwrap();
        assert_eq!(column, 3);
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::new();
        for column in 0..COLUMNS {
            for _ in 0..crate::ROWS {
                board.insert(column, Player::Red).unwrap();
            }
        }
        assert_eq!(first_choice_strategy().choose_column(&board, Player::Blue), None);
    }
}
