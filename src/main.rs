//! tvi - a small modal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! tvi notes.txt
//! tvi -n src/main.rs src/lib.rs
//! tvi --record session.keys notes.txt
//! tvi --playback session.keys notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tvi::app::App;
use tvi::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A small modal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "tvi", version, about, long_about = None)]
struct Cli {
    /// Files to edit, one buffer each
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Show the line-number gutter
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Record every input byte to a file
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Read input from a recorded file instead of the keyboard
    #[arg(long, value_name = "PATH")]
    playback: Option<PathBuf>,

    /// Write log events to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::info!(files = cli.files.len(), ?effective, "starting");

    let mut app = App::new(cli.files)
        .with_line_numbers(effective.line_numbers)
        .with_highlight(!effective.no_highlight)
        .with_record(cli.record)
        .with_playback(cli.playback);

    app.run().context("Application error")
}
