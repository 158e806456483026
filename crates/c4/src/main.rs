//! c4: terminal client for a live Connect Four game
//!
//! Subcommands:
//! - `watch`: follow the game's event stream and print board/score updates
//! - `theme`: inspect or change the stored light/dark theme preference

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod theme;
mod watch;

#[derive(Parser)]
#[command(name = "c4")]
#[command(about = "Live Connect Four client", long_about = None)]
struct Cli {
    /// Log level (debug, info, warn, error); overrides RUST_LOG
    #[arg(long, global = true, env = "C4_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the live game and print updates
    Watch {
        /// Game server origin
        #[arg(long, env = "C4_SERVER_URL", default_value = "http://localhost:8080")]
        server_url: String,

        /// Event stream path on the server
        #[arg(long, default_value = c4_stream::STREAM_PATH)]
        stream_path: String,

        /// Initial reconnection delay in milliseconds
        #[arg(long, default_value = "3000")]
        retry_ms: u64,

        /// OS color scheme poll interval in seconds
        #[arg(long, default_value = "5")]
        color_poll_secs: u64,

        /// Directory holding stored preferences
        #[arg(long, env = "C4_STATE_DIR")]
        state_dir: Option<PathBuf>,
    },

    /// Manage the theme preference
    Theme {
        #[command(subcommand)]
        action: theme::ThemeAction,

        /// Directory holding stored preferences
        #[arg(long, env = "C4_STATE_DIR")]
        state_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(config::log_filter(cli.log_level.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Watch {
            server_url,
            stream_path,
            retry_ms,
            color_poll_secs,
            state_dir,
        } => {
            watch::run(watch::WatchOptions {
                server_url,
                stream_path,
                retry: std::time::Duration::from_millis(retry_ms),
                color_poll: std::time::Duration::from_secs(color_poll_secs.max(1)),
                state_dir: config::state_dir(state_dir),
            })
            .await
        }

        Commands::Theme { action, state_dir } => {
            theme::run(action, &config::state_dir(state_dir))
        }
    }
}
