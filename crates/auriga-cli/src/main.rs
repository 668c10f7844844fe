//! CLI frontend for the Auriga interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use commands::play::Ending;

#[derive(Parser)]
#[command(
    name = "auriga",
    about = "Auriga, a text adventure about a small robot in a big factory",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game, reading one command per line from stdin
    Play {
        /// World content file (default: the bundled Auriga factory)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Continue a saved game by name
        #[arg(short, long)]
        load: Option<String>,

        /// Directory holding saved games
        #[arg(short, long, default_value = "saves")]
        saves: PathBuf,
    },

    /// List saved games
    Saves {
        /// Directory holding saved games
        #[arg(short, long, default_value = "saves")]
        saves: PathBuf,
    },

    /// Validate a world content file
    Check {
        /// World content file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play { world, load, saves } => {
            commands::play::run(world.as_deref(), load.as_deref(), &saves)
        }
        Commands::Saves { saves } => commands::saves::run(&saves).map(|()| Ending::Quit),
        Commands::Check { file } => commands::check::run(&file).map(|()| Ending::Quit),
    };

    match result {
        Ok(Ending::Quit) => {}
        Ok(Ending::Exhausted) => process::exit(2),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Send logs to stderr so stdout carries only the story.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
