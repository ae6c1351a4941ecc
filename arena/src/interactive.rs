use std::io::{BufRead, Write};

use conecta4::{visualize_board, IllegalMove, Move, Session, TurnOutcome};
use tracing::debug;

/// Plays games on a text terminal until the input ends or the user quits.
///
/// Each input line is a column index, `r` to start a new game or `q` to
/// quit.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    if let Some(opening) = session.opening_move() {
        write_reply(output, &opening)?;
    }
    write_prompt(session, output)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => continue,
            "q" | "quit" => break,
            "r" | "reset" => {
                debug!("Starting a new game");
                writeln!(output, "New game.")?;
                if let Some(opening) = session.reset() {
                    write_reply(output, &opening)?;
                }
            }
            _ => match command.parse::<i8>() {
                Ok(column) => match session.play_human_move(column) {
                    Ok(outcome) => write_outcome(session, output, &outcome)?,
                    Err(err @ IllegalMove::InvalidColumnIndex { .. }) => {
                        writeln!(output, "{}.", err)?
                    }
                    Err(IllegalMove::GameOver { .. }) => {
                        writeln!(output, "The game is over, enter r for a new game.")?
                    }
                },
                Err(_) => writeln!(output, "'{}' is not a column.", command)?,
            },
        }
        write_prompt(session, output)?;
    }
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, reply: &Move) -> anyhow::Result<()> {
    writeln!(
        output,
        "The computer ({}) plays column {}.",
        reply.player(),
        reply.column()
    )?;
    Ok(())
}

fn write_outcome<W: Write>(
    session: &Session,
    output: &mut W,
    outcome: &TurnOutcome,
) -> anyhow::Result<()> {
    if outcome.column_full {
        writeln!(output, "That column is full, choose another one.")?;
        return Ok(());
    }
    if let Some(reply) = &outcome.reply {
        write_reply(output, reply)?;
    }
    if let Some(win) = &outcome.win {
        writeln!(output, "{}", visualize_board(session.board(), Some(win)))?;
        writeln!(output, "Four in a row, {} wins!", win.winner())?;
    } else if outcome.board_full {
        writeln!(output, "{}", session.board())?;
        writeln!(output, "The board is full, it's a draw.")?;
    }
    Ok(())
}

fn write_prompt<W: Write>(session: &Session, output: &mut W) -> anyhow::Result<()> {
    if session.is_game_over() {
        writeln!(output, "Enter r for a new game or q to quit.")?;
    } else {
        writeln!(output, "{}", session.board())?;
        writeln!(
            output,
            "{} to move, enter a column (r: new game, q: quit):",
            session.current_player()
        )?;
    }
    output.flush()?;
    Ok(())
}
