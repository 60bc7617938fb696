use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fh_world::Store;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "fh", about = "Far Horizons galaxy generator and turn processor")]
struct Cli {
    /// Galaxy directory holding game.json and the turn directories.
    #[arg(long, global = true, default_value = ".")]
    galaxy: PathBuf,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create things.
    Create {
        #[command(subcommand)]
        what: CreateCommand,
    },
    /// Process the current turn.
    Finish {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Render species reports and order templates.
    Report(ReportArgs),
    /// Turn bookkeeping.
    Run {
        #[command(subcommand)]
        what: RunCommand,
    },
}

#[derive(Subcommand)]
enum CreateCommand {
    /// Generate a new galaxy from a setup file and the galaxy's players.json.
    Galaxy {
        #[arg(long = "setup-file")]
        setup_file: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Report on the current turn (the default).
    #[arg(long, conflicts_with = "turn")]
    current_turn: bool,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=999_999))]
    turn: Option<u32>,
    /// Omit the order template.
    #[arg(long)]
    test: bool,
}

#[derive(Subcommand)]
enum RunCommand {
    /// Step the game back one turn without reprocessing.
    Discard,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// The given seed, or a fresh one that is logged so the run can be repeated.
fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "random generator seeded");
    ChaCha8Rng::seed_from_u64(seed)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let store = Store::new(cli.galaxy);
    match cli.command {
        Commands::Create {
            what: CreateCommand::Galaxy { setup_file, seed },
        } => {
            let created = fh_world::create_galaxy(&store, &setup_file, &mut seeded_rng(seed))?;
            println!(
                "Created galaxy {}: {} species, {} systems, radius {}, {} wormholes.",
                created.name, created.species, created.systems, created.radius, created.wormholes
            );
        }
        Commands::Finish { seed } => {
            let finished = fh_world::finish(&store, &mut seeded_rng(seed))?;
            println!("Finished turn {}; now on turn {}.", finished.old_turn, finished.new_turn);
        }
        Commands::Report(args) => {
            let turn = if args.current_turn { None } else { args.turn };
            for path in fh_world::write_reports(&store, turn, args.test)? {
                println!("{}", path.display());
            }
        }
        Commands::Run {
            what: RunCommand::Discard,
        } => {
            let (old, new) = fh_world::discard(&store)?;
            println!("Discarded turn {old}; now on turn {new}.");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
