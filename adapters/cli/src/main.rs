#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lists, validates, imports and plays Pushbox
//! levels headlessly.

mod config;
mod library;
mod play;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pushbox_level::validate_level;
use pushbox_system_editor::EditorSession;
use pushbox_system_playlist::Playlist;
use tracing_subscriber::EnvFilter;

use crate::{config::CliConfig, library::LevelLibrary};

/// Pushbox level tooling.
#[derive(Parser, Debug)]
#[command(name = "pushbox")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: pushbox.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding custom levels, overriding the configuration file
    #[arg(long, global = true)]
    levels_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in and custom levels
    List,

    /// Check a level against the playability rules
    Validate {
        /// Built-in name, custom name or path to a level file
        level: String,
    },

    /// Play levels headlessly from move scripts
    Play {
        /// Levels to play in order
        #[arg(required_unless_present = "builtin")]
        levels: Vec<String>,

        /// Play every built-in level in bundle order
        #[arg(long, conflicts_with = "levels")]
        builtin: bool,

        /// Move script per level: U D L R, or numpad 9 7 3 1 for diagonals
        #[arg(short, long = "moves", required = true)]
        moves: Vec<String>,
    },

    /// Decode a level file and save it as a custom level
    Import {
        /// Path to the level file
        file: PathBuf,

        /// Name to save the level under instead of its own
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Entry point for the Pushbox command-line interface.
fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = CliConfig::load(args.config.as_deref())?;
    if let Some(levels_dir) = args.levels_dir {
        config.levels_dir = levels_dir;
    }
    let library = LevelLibrary::new(config.levels_dir.clone());

    match args.command {
        Commands::List => {
            for name in library.builtin_names() {
                println!("{name} (built-in)");
            }
            for name in library.custom_names()? {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { level } => {
            let level = library.load(&level)?;
            match validate_level(&level) {
                Ok(()) => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Err(violation) => {
                    println!("{violation}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Play {
            levels,
            builtin,
            moves,
        } => {
            let playlist = build_playlist(&library, builtin, levels);
            if playlist.len() != moves.len() {
                bail!(
                    "{} levels were queued but {} move scripts given",
                    playlist.len(),
                    moves.len()
                );
            }
            play_all(&library, &config, playlist, &moves)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Import { file, name } => {
            let mut session = EditorSession::new();
            session
                .load(&library::read_file(&file)?)
                .with_context(|| format!("failed to decode level at {}", file.display()))?;
            if let Some(name) = name {
                session.set_name(name);
            }
            let text = session
                .save()
                .with_context(|| format!("level `{}` cannot be saved", session.name()))?;
            let path = library.store(session.name(), &text)?;
            println!("saved {} to {}", session.name(), path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_playlist(library: &LevelLibrary, builtin: bool, levels: Vec<String>) -> Playlist {
    if builtin {
        return Playlist::from_names(library.builtin_names());
    }

    let mut playlist = Playlist::new();
    match <[String; 1]>::try_from(levels) {
        Ok([level]) => playlist.replace_with_single(level),
        Err(levels) => {
            for level in levels {
                playlist.add(level);
            }
        }
    }
    playlist
}

fn play_all(
    library: &LevelLibrary,
    config: &CliConfig,
    mut playlist: Playlist,
    scripts: &[String],
) -> Result<()> {
    for script in scripts {
        let Some(reference) = playlist.current() else {
            break;
        };
        let level = library.load(reference)?;
        let inputs = play::parse_script(script)?;
        let report = play::play_script(&level, config.timing(), &inputs)?;

        println!("level: {}", level.name());
        println!("moves: {}", report.progress.move_count());
        println!("pushes: {}", report.progress.push_count());
        println!("rejected: {}", report.rejected);
        println!("solved: {}", report.progress.is_solved());
        print!("{}", report.board);
        let _ = playlist.advance();
    }
    Ok(())
}
