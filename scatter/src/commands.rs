use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scatter", version, about = "Single-slot scatter point generator")]
pub struct Cli {
    /// Print display updates as JSON lines
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the generator, poll for a while, then stop
    Run {
        #[command(flatten)]
        pipeline: PipelineArgs,
        #[arg(long, default_value_t = 3000)]
        duration_ms: u64,
    },
    /// Read start/pause/resume/stop/status/quit commands from stdin
    Interactive {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    Write {
        path: PathBuf,
    },
}

/// Settings file plus per-field overrides.
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub batch_size: Option<usize>,
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,
    #[arg(long)]
    pub poll_period_ms: Option<u64>,
}
