use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use reel::agent::history::SessionHistory;
use reel::export::{export_history_gif, GifOutcome, GifSettings};
use reel::util;

#[derive(Parser)]
#[command(name = "reel", version, about = "Compile agent session screenshots into an animated GIF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a recorded session history (JSONL) into an animated GIF
    Render {
        /// Path to the session history JSONL file
        history: PathBuf,

        /// Destination path for the GIF
        #[arg(short, long)]
        output: PathBuf,

        /// Milliseconds each frame is shown
        #[arg(long, default_value_t = 1000)]
        frame_delay_ms: u32,

        /// Play the animation once instead of looping
        #[arg(long)]
        no_loop: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging to file (~/.agent-reel/logs/agent-reel.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            history,
            output,
            frame_delay_ms,
            no_loop,
        } => {
            let loaded = SessionHistory::read_jsonl(&history)
                .with_context(|| format!("failed to load history from {}", history.display()))?;

            let settings = GifSettings::default()
                .with_frame_delay_ms(frame_delay_ms)
                .with_repeat(!no_loop);

            match export_history_gif(&loaded, &output, &settings)? {
                GifOutcome::Written { frames } => {
                    println!("wrote {} ({} frames)", output.display(), frames);
                }
                GifOutcome::Skipped => {
                    println!("history has no real screenshots, nothing to render");
                }
            }
        }
    }

    Ok(())
}
