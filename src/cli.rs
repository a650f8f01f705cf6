//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use depsync::output::OutputConfig;

/// depsync - Resolve and install core and extension Python dependencies
#[derive(Parser, Debug)]
#[command(name = "depsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        env = "DEPSYNC_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve all requirements and install them into the current environment
    Sync(commands::sync::SyncArgs),

    /// Resolve all requirements into the lock file without installing
    Compile(commands::compile::CompileArgs),

    /// List the requirement files that would be resolved
    Discover(commands::discover::DiscoverArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let output = OutputConfig::from_env_and_flag(&self.color);
        console::set_colors_enabled(output.use_color);
        console::set_colors_enabled_stderr(output.use_color);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Compile(args) => commands::compile::execute(args, &output),
            Commands::Discover(args) => commands::discover::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr at `level`, unless `RUST_LOG` says otherwise.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(level)
        .format_timestamp(None)
        .format_target(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}
