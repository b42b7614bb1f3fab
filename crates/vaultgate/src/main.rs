// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vaultgate - credential-gated application bootstrap.
//!
//! This is the binary entry point. It runs the bootstrap against the
//! file-backed device adapters.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod launch;
mod output;
mod reset;
mod status;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

/// Vaultgate - credential-gated application bootstrap.
#[derive(Parser, Debug)]
#[command(name = "vaultgate", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output switches shared by every subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Print machine-readable JSON.
    #[arg(long)]
    pub json: bool,
    /// Disable colors.
    #[arg(long)]
    pub plain: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bootstrap and report the landing screen.
    Launch {
        /// Wipe vault, credential, and preferences before bootstrapping.
        #[arg(long)]
        reset: bool,
        /// Mark the vault unlocked after landing and report the post-vault screens.
        #[arg(long)]
        unlock: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show vault, enrollment, credential, and preference state without changing it.
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Wipe vault, credential, and preferences, and report each step.
    Reset {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => vaultgate_config::load_and_validate_path(path),
        None => vaultgate_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            vaultgate_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);
    tracing::debug!(
        app = %config.app.name,
        data_dir = %config.device.data_dir,
        "vaultgate starting"
    );

    let result = match cli.command {
        Commands::Launch {
            reset,
            unlock,
            output,
        } => launch::run_launch(&config, reset, unlock, output).await,
        Commands::Status { output } => status::run_status(&config, output).await,
        Commands::Reset { output } => reset::run_reset(&config, output).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so `--json` output stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vaultgate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
