use std::path::PathBuf;
use std::time::Instant;

use chess_search::config::{self, PROFILES_DIR};
use chess_search::game::search::{SearchConfig, Searcher};
use chess_search::game::GameState;
use chess_search::selfplay::{self, GameResult, SelfPlayOptions};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::Color;
use tracing::{info, Level};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every search iteration
    #[arg(long, global = true)]
    verbose: bool,

    /// Directory holding the saved search profiles
    #[arg(long, global = true, default_value = PROFILES_DIR)]
    profiles_dir: PathBuf,

    /// Search profile to load instead of the defaults
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a position and print the best move
    BestMove {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long)]
        time_ms: Option<u64>,
    },
    /// Print the static evaluation of a position for both sides
    Eval {
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
    /// Print the one-ply heuristic move
    QuickMove {
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
    /// Let the engine play against itself
    SelfPlay {
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[arg(long, default_value_t = 4)]
        random_plies: usize,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Save the current settings as a named profile
    SaveProfile { name: String },
    /// List the saved profiles
    Profiles,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let config = match &args.profile {
        Some(name) => {
            let config = config::load_profile(&args.profiles_dir, name)?;
            info!(profile = %name, "loaded search profile");
            config
        }
        None => SearchConfig::default(),
    };

    match args.command {
        Command::BestMove { fen, depth, time_ms } => {
            let mut config = config;
            if let Some(depth) = depth {
                config.max_depth = depth;
            }
            if let Some(time_ms) = time_ms {
                config.time_limit_ms = time_ms;
            }
            let mut game = GameState::from_fen(&fen)?;
            let mut searcher = Searcher::new(config);
            info!(
                max_depth = searcher.config().max_depth,
                time_limit_ms = searcher.config().time_limit_ms,
                "searching"
            );
            match searcher.search(&mut game) {
                Some(report) => println!(
                    "bestmove {} score {} depth {} nodes {} qnodes {} tthits {} cutoffs {} time {}ms ({:?})",
                    report.best_move,
                    report.score,
                    report.depth,
                    report.stats.nodes,
                    report.stats.qnodes,
                    report.stats.tt_hits,
                    report.stats.cutoffs,
                    report.elapsed.as_millis(),
                    report.source
                ),
                None => println!("bestmove (none)"),
            }
        }
        Command::Eval { fen } => {
            let game = GameState::from_fen(&fen)?;
            let searcher = Searcher::new(config);
            let evaluator = searcher.evaluator();
            println!("white {}", evaluator.evaluate(&game, Color::White));
            println!("black {}", evaluator.evaluate(&game, Color::Black));
        }
        Command::QuickMove { fen } => {
            let mut game = GameState::from_fen(&fen)?;
            match Searcher::new(config).get_quick_move(&mut game) {
                Some(mv) => println!("quickmove {mv}"),
                None => println!("quickmove (none)"),
            }
        }
        Command::SelfPlay { games, random_plies, max_plies, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let options = SelfPlayOptions { random_plies, max_plies };
            let mut white = Searcher::new(config.clone());
            let mut black = Searcher::new(config);
            let (mut white_wins, mut black_wins, mut draws) = (0, 0, 0);

            for index in 1..=games {
                let started = Instant::now();
                let mut game = GameState::new();
                let played = selfplay::play_game(&mut game, &mut white, &mut black, &options, &mut rng)?;
                match played.result {
                    GameResult::WhiteWin => white_wins += 1,
                    GameResult::BlackWin => black_wins += 1,
                    GameResult::Draw => draws += 1,
                }
                println!(
                    "game {index}: {} in {} plies ({}s)",
                    played.result,
                    played.moves.len(),
                    started.elapsed().as_secs()
                );
                println!("{} {}", played.movetext(), played.result);
            }
            println!("white {white_wins} black {black_wins} draws {draws}");
        }
        Command::SaveProfile { name } => {
            config::save_profile(&args.profiles_dir, &name, &config)?;
            println!("saved profile {name} in {}", args.profiles_dir.display());
        }
        Command::Profiles => {
            for name in config::get_profiles(&args.profiles_dir)? {
                println!("{name}");
            }
        }
    }

    Ok(())
}
