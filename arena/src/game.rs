use conecta4::{GameOutcome, Move, Player, Session, SessionConfig, WinResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::player::PlayerConfig;
use crate::recording::Recorder;

#[derive(Debug, PartialEq)]
pub enum GameResult {
    WonByPlayer { player_idx: usize, win: WinResult },
    Draw,
}

/// Plays one game between two computer players.
///
/// The first player feeds its columns into a [`Session`] as if it were the
/// human, the second one is the session's opponent. `starting_player_idx`
/// selects who drops the first token. Returns an error if a strategy picks a
/// column the session doesn't accept.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &PlayerConfig,
    player_2: &PlayerConfig,
    starting_player_idx: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Assign one player the red tokens and the other the blue tokens randomly
    let [player_1_color, player_2_color] = {
        let mut arr = [Player::Red, Player::Blue];
        arr.shuffle(rng);
        arr
    };
    let first = if starting_player_idx == 0 {
        player_1_color
    } else {
        player_2_color
    };
    let nicks = [player_1.nick.as_str(), player_2.nick.as_str()];
    let nick_of = |mv: &Move| {
        if mv.player() == player_1_color {
            nicks[0]
        } else {
            nicks[1]
        }
    };

    let mut strategy_1 = player_1.build_strategy(rng.gen())?;
    let strategy_2 = player_2.build_strategy(rng.gen())?;
    let config = SessionConfig {
        opponent: player_2.strategy,
        human: player_1_color,
        first,
        heuristic: player_2.heuristic,
    };
    let mut session = Session::with_strategy(config, Some(strategy_2));

    if let (Some(rec), Some(opening)) = (recorder.as_mut(), session.opening_move()) {
        rec.store_move(nick_of(&opening), opening);
    }

    while !session.is_game_over() {
        let column = match strategy_1.choose_column(session.board(), player_1_color) {
            Some(column) => column,
            None => anyhow::bail!("{} found no column on a board that isn't full", nicks[0]),
        };
        trace!(player = nicks[0], column);
        let outcome = session.play_human_move(column)?;
        if !outcome.accepted {
            anyhow::bail!("{} chose the full column {}", nicks[0], column);
        }
        if let Some(rec) = recorder.as_mut() {
            for mv in outcome.human_move.iter().chain(outcome.reply.iter()) {
                rec.store_move(nick_of(mv), *mv);
            }
        }
    }

    let outcome = match session.outcome() {
        Some(outcome) => outcome.clone(),
        None => anyhow::bail!("The game ended without an outcome"),
    };
    if let Some(rec) = recorder {
        rec.write_game_recording(
            [(nicks[0], player_1_color), (nicks[1], player_2_color)],
            &outcome,
        )?;
    }

    // Report who won
    let game_result = match outcome {
        GameOutcome::Won(win) => GameResult::WonByPlayer {
            player_idx: if win.winner() == player_1_color { 0 } else { 1 },
            win,
        },
        GameOutcome::Draw => GameResult::Draw,
    };
    Ok(game_result)
}
