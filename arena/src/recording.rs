use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use conecta4::{GameOutcome, Move, Player};
use serde::Serialize;

/// Writes one JSON file per finished game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<RecordedMove>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    pub fn store_move(&mut self, nick: &str, mv: Move) {
        self.moves.push(RecordedMove {
            nick: String::from(nick),
            mv,
        });
    }

    /// Writes the moves stored since the last call, and returns the path of
    /// the new file.
    pub fn write_game_recording(
        &mut self,
        players: [(&str, Player); 2],
        outcome: &GameOutcome,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let moves = std::mem::take(&mut self.moves);
        let recording = GameRecording {
            players: players.map(|(nick, color)| RecordedPlayer { nick, color }),
            moves: &moves,
            outcome,
        };
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize)]
struct GameRecording<'a> {
    players: [RecordedPlayer<'a>; 2],
    moves: &'a [RecordedMove],
    outcome: &'a GameOutcome,
}

#[derive(Serialize)]
struct RecordedPlayer<'a> {
    nick: &'a str,
    color: Player,
}

#[derive(Serialize)]
struct RecordedMove {
    nick: String,
    #[serde(flatten)]
    mv: Move,
}
