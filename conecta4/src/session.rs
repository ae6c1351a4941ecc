use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Board, GameOutcome, HeuristicConfig, IllegalInsert, IllegalMove, Move, Opponent, Player,
    Strategy, TurnOutcome, COLUMNS,
};

/// How a session is set up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub opponent: Opponent,
    /// The color of the human. The computer plays the other color.
    ///
    /// Ignored when two humans play against each other.
    pub human: Player,
    /// The color that drops the first token.
    pub first: Player,
    /// Tuning for [`Opponent::Heuristic`].
    pub heuristic: HeuristicConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent: Opponent::default(),
            human: Player::Red,
            first: Player::Red,
            heuristic: HeuristicConfig::default(),
        }
    }
}

/// Where a session stands between two calls.
///
/// Evaluating a move happens entirely inside
/// [`Session::play_human_move()`], so it is never observed from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove,
    GameOver(GameOutcome),
}

/// One game between a human and a computer opponent, or between two humans.
///
/// The session owns its board. Strategies only get to read it while choosing
/// a column.
pub struct Session {
    board: Board,
    config: SessionConfig,
    strategy: Option<Box<dyn Strategy>>,
    state: SessionState,
    /// The color of the next token dropped by a human.
    to_move: Player,
    /// The computer's token if it opened the current game.
    opening: Option<Move>,
}

impl Session {
    /// Starts a session with the strategy selected by `config.opponent`,
    /// seeded with `seed`.
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let strategy = config
            .opponent
            .build_with(StdRng::seed_from_u64(seed), config.heuristic);
        Self::with_strategy(config, strategy)
    }

    /// Starts a session with a given computer opponent, or none for two
    /// human players. `config.opponent` is only informational here.
    pub fn with_strategy(config: SessionConfig, strategy: Option<Box<dyn Strategy>>) -> Self {
        let mut session = Self {
            board: Board::new(),
            config,
            strategy,
            state: SessionState::AwaitingMove,
            to_move: config.first,
            opening: None,
        };
        session.reset();
        session
    }

    /// Clears the board and starts a new game.
    ///
    /// If the computer moves first, its opening token is placed right away
    /// and returned.
    pub fn reset(&mut self) -> Option<Move> {
        self.board.reset();
        self.state = SessionState::AwaitingMove;
        self.opening = None;
        if self.strategy.is_none() {
            self.to_move = self.config.first;
            return None;
        }
        self.to_move = self.config.human;
        if self.config.first != self.config.human {
            self.opening = self.play_computer_move(self.config.human.opponent());
        }
        debug!(opponent = %self.config.opponent, opening = ?self.opening, "New game");
        self.opening
    }

    /// Drops a token of the current human player into `column`, and lets the
    /// computer answer if the game goes on.
    ///
    /// A full column is not an error: the outcome is not `accepted`, nothing
    /// changes, and the same player should pick another column.
    pub fn play_human_move(&mut self, column: i8) -> Result<TurnOutcome, IllegalMove> {
        if let SessionState::GameOver(outcome) = &self.state {
            return Err(IllegalMove::GameOver {
                winner: outcome.winner(),
            });
        }
        let player = self.to_move;
        let human_move = match self.board.insert(column, player) {
            Ok(mv) => mv,
            Err(IllegalInsert::ColumnFull { column }) => {
                debug!(column, %player, "Column is full");
                return Ok(TurnOutcome::rejected(self.board.is_full()));
            }
            Err(IllegalInsert::InvalidColumnIndex { column }) => {
                return Err(IllegalMove::InvalidColumnIndex { column });
            }
        };

        let mut outcome = TurnOutcome {
            accepted: true,
            human_move: Some(human_move),
            ..TurnOutcome::default()
        };
        if self.evaluate(human_move, &mut outcome) {
            return Ok(outcome);
        }

        if self.strategy.is_none() {
            self.to_move = player.opponent();
            return Ok(outcome);
        }
        if let Some(reply) = self.play_computer_move(player.opponent()) {
            outcome.reply = Some(reply);
            self.evaluate(reply, &mut outcome);
        }
        Ok(outcome)
    }

    /// Whether `column` can take another token.
    pub fn is_column_full(&self, column: i8) -> Result<bool, IllegalMove> {
        if !Board::is_valid_column(column) {
            return Err(IllegalMove::InvalidColumnIndex { column });
        }
        Ok(self.board.is_column_full(column))
    }

    /// See [`Board::lowest_empty_rows()`].
    pub fn lowest_empty_rows(&self) -> [Option<i8>; COLUMNS as usize] {
        self.board.lowest_empty_rows()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The color of the next token passed to [`Self::play_human_move()`].
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// The computer's opening token of the current game, if it moved first.
    pub fn opening_move(&self) -> Option<Move> {
        self.opening
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match &self.state {
            SessionState::AwaitingMove => None,
            SessionState::GameOver(outcome) => Some(outcome),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    // Internal helper that records the effects of a placed token.
    //
    // Returns whether the game is over.
    fn evaluate(&mut self, mv: Move, outcome: &mut TurnOutcome) -> bool {
        outcome.board_full = self.board.is_full();
        if let Some(win) = self.board.check_win(mv.row(), mv.column(), mv.player()) {
            debug!(winner = %win.winner(), cells = ?win.cells(), "Game won");
            outcome.win = Some(win.clone());
            self.state = SessionState::GameOver(GameOutcome::Won(win));
            true
        } else if outcome.board_full {
            debug!("Board is full, the game is a draw");
            self.state = SessionState::GameOver(GameOutcome::Draw);
            true
        } else {
            false
        }
    }

    // Internal helper to ask the strategy for a column and drop its token.
    //
    // Returns None if there is no strategy or the board is full.
    fn play_computer_move(&mut self, player: Player) -> Option<Move> {
        let strategy = self.strategy.as_mut()?;
        if self.board.is_full() {
            return None;
        }
        let chosen = strategy.choose_column(&self.board, player);
        let column = match chosen {
            Some(column) if !self.board.is_column_full(column) => column,
            _ => {
                warn!(
                    strategy = strategy.name(),
                    column = ?chosen,
                    "Strategy chose no legal column, using the leftmost open column"
                );
                self.board.legal_columns().next()?
            }
        };
        self.board.insert(column, player).ok()
    }
}
