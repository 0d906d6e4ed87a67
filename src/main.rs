// Command-line front end: legal move listing, perft, best-move search, and
// playing a sequence of long-algebraic moves.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use plum_tactics::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_tactics::move_generation::legal_move_apply::apply_move_complete;
use plum_tactics::move_generation::legal_move_generator::generate_legal_moves;
use plum_tactics::move_generation::perft::{perft, perft_divide};
use plum_tactics::search::iterative_deepening::{level_to_depth, SearchConfig, Searcher};
use plum_tactics::search::transposition_table::tt_bytes_for_mb;
use plum_tactics::utils::long_algebraic::parse_long_algebraic;
use plum_tactics::utils::render_game_state::render_game_state;
use plum_tactics::GameState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct PositionArgs {
    /// Position in FEN; defaults to the standard starting position
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the legal moves of a position
    Moves {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[command(flatten)]
        position: PositionArgs,
        #[arg(short = 'D', long, default_value_t = 3)]
        depth: u8,
        /// Print per-move node counts
        #[arg(long)]
        divide: bool,
    },
    /// Search for the best move
    Bestmove {
        #[command(flatten)]
        position: PositionArgs,
        /// Base search depth
        #[arg(short = 'D', long)]
        depth: Option<u8>,
        /// Extra plies for check extensions and quiescence
        #[arg(long)]
        extended: Option<u8>,
        /// Playing level 0-5, used when no explicit depth is given
        #[arg(long)]
        level: Option<u8>,
        /// Transposition table size in MiB (clamped to 1-4096)
        #[arg(long, default_value_t = 16)]
        tt_mb: usize,
    },
    /// Apply long-algebraic moves and print the resulting position
    Play {
        #[command(flatten)]
        position: PositionArgs,
        /// Moves such as e2e4 or e7e8q
        moves: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(cli.command) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn load(position: &PositionArgs) -> Result<GameState> {
    GameState::from_fen(&position.fen).with_context(|| format!("cannot load position '{}'", position.fen))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Moves { position } => {
            let game = load(&position)?;
            let moves: Vec<String> = generate_legal_moves(&game).iter().map(ToString::to_string).collect();
            println!("{} legal moves: {}", moves.len(), moves.join(" "));
        }
        Command::Perft { position, depth, divide } => {
            let game = load(&position)?;
            let started = Instant::now();
            if divide {
                for (mv, nodes) in perft_divide(&game, depth) {
                    println!("{mv}: {nodes}");
                }
            }
            let counts = perft(&game, depth);
            let elapsed = started.elapsed();
            println!(
                "depth {depth}: nodes {} captures {} ep {} castles {} promotions {} checks {} mates {}",
                counts.nodes,
                counts.captures,
                counts.en_passant,
                counts.castles,
                counts.promotions,
                counts.checks,
                counts.checkmates
            );
            log::info!("perft finished in {:.3}s", elapsed.as_secs_f64());
        }
        Command::Bestmove {
            position,
            depth,
            extended,
            level,
            tt_mb,
        } => {
            let game = load(&position)?;
            let mut config = match level {
                Some(level) => SearchConfig::for_level(level),
                None => SearchConfig::default(),
            };
            if let Some(depth) = depth {
                config.base_depth = depth;
            }
            if let Some(extended) = extended {
                config.extended_depth = extended;
            }
            config.tt_size_bytes = tt_bytes_for_mb(tt_mb);
            log::debug!(
                "searching depth {} (+{}), level mapping {:?}",
                config.base_depth,
                config.extended_depth,
                level.map(level_to_depth)
            );

            let started = Instant::now();
            let mut searcher = Searcher::new(config.tt_size_bytes);
            match searcher.search(&game, &config) {
                Some(result) => {
                    println!(
                        "bestmove {} score {} depth {} nodes {}",
                        result.best_move, result.score, result.reached_depth, result.nodes_searched
                    );
                    log::info!(
                        "search took {:.3}s; tt probes {} hits {} cutoffs {} stores {}",
                        started.elapsed().as_secs_f64(),
                        result.tt_stats.probes,
                        result.tt_stats.hits,
                        result.tt_stats.cutoffs,
                        result.tt_stats.stores
                    );
                }
                None => println!("bestmove (none)"),
            }
        }
        Command::Play { position, moves } => {
            let mut game = load(&position)?;
            for text in &moves {
                let mv = parse_long_algebraic(&game, text).with_context(|| format!("cannot play '{text}'"))?;
                apply_move_complete(&mut game, mv);
            }
            println!("{}", render_game_state(&game));
            println!("{}", game.get_fen());
        }
    }
    Ok(())
}
