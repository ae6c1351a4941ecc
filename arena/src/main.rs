use std::collections::HashMap;
use std::path::PathBuf;

use arena::{play_game, run_interactive, GameResult, PlayerConfig, Recorder};
use clap::{Parser, Subcommand};
use conecta4::{HeuristicConfig, Opponent, Player, Session, SessionConfig};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Play on the terminal against a strategy, or against another human
    Play {
        /// "heuristic", "reactive" or "human"
        #[arg(short, long, default_value = "heuristic")]
        opponent: Opponent,

        /// The color of the (first) human player
        #[arg(long, default_value = "red")]
        human: Player,

        /// The color that moves first
        #[arg(long, default_value = "red")]
        first: Player,

        /// How often the heuristic extends its own line instead of blocking
        /// when both are equally long
        #[arg(long)]
        offense_tie_probability: Option<f64>,
    },
    /// Let strategies play against each other
    Tournament {
        /// Paths to player config JSON files, or strategy names
        #[clap(num_args(2..), value_delimiter = ' ')]
        players: Vec<String>,

        /// How many games to play per pairing
        #[arg(short, long, default_value_t = 100)]
        num_games: usize,

        /// Record the games as JSON files into this directory
        #[arg(short, long)]
        record_games_to_directory: Option<PathBuf>,
    },
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    draws: usize,
}

fn play_matchup(
    player_1: &PlayerConfig,
    player_2: &PlayerConfig,
    num_games: usize,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        // Alternate who moves first
        match play_game(rng, player_1, player_2, game_idx % 2, recorder)? {
            GameResult::WonByPlayer { player_idx, win } => {
                let winner = if player_idx == 0 {
                    &player_1.nick
                } else {
                    &player_2.nick
                };
                debug!(winner, game_idx, cells = ?win.cells());
                match_score.wins[player_idx] += 1;
            }
            GameResult::Draw => {
                debug!(game_idx, "Draw");
                match_score.draws += 1;
            }
        }
    }

    eprintln!(
        "End result:\n- {} wins by {}\n- {} wins by {}\n- {} draws",
        match_score.wins[0], player_1.nick, match_score.wins[1], player_2.nick, match_score.draws
    );

    Ok(match_score)
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    println!("\nTournament results (p1 win %, p2 win %, draw %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for j in (0..player_configs.len()).rev() {
        print!(" {:19} |", player_configs[j].nick);
    }
    println!();
    for i in 0..player_configs.len() {
        for _ in 0..player_configs.len() - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", player_configs[i].nick);
        for j in (0..player_configs.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(score) = match_results.get(&(i, j)) {
                let num_games = (score.wins[0] + score.wins[1] + score.draws).max(1);
                let percentage = |count: usize| count as f32 / num_games as f32 * 100.0;
                print!(
                    "{:5.1}% {:5.1}% {:5.1}% |",
                    percentage(score.wins[0]),
                    percentage(score.wins[1]),
                    percentage(score.draws)
                );
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn run_tournament(
    rng: &mut StdRng,
    players: &[String],
    num_games: usize,
    record_games_to_directory: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut recorder = if let Some(dir_path) = record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let player_configs = players
        .iter()
        .map(|arg| PlayerConfig::resolve(arg))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        info!(
            player_1 = player_configs[i1].nick,
            player_2 = player_configs[i2].nick,
            "Starting matchup"
        );
        let match_score = play_matchup(
            &player_configs[i1],
            &player_configs[i2],
            num_games,
            rng,
            &mut recorder,
        )?;
        match_results.insert((i1, i2), match_score);
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    match args.command {
        Command::Play {
            opponent,
            human,
            first,
            offense_tie_probability,
        } => {
            let mut heuristic = HeuristicConfig::default();
            if let Some(probability) = offense_tie_probability {
                heuristic.offense_tie_probability = probability;
            }
            let config = SessionConfig {
                opponent,
                human,
                first,
                heuristic,
            };
            let mut session = Session::new(config, seed);
            let stdin = std::io::stdin();
            run_interactive(&mut session, stdin.lock(), &mut std::io::stdout())
        }
        Command::Tournament {
            players,
            num_games,
            record_games_to_directory,
        } => run_tournament(&mut rng, &players, num_games, record_games_to_directory),
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Logs go to stderr so they don't mix with the board on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
