//! CLI binary entrypoint.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::{
    ConfigOutputFormat, EmitCommandInput, parse_meta, run_config, run_emit, run_levels,
};
use error::{CliError, ExitCode};
use fanlog_facade::Level;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fanlog",
    version,
    about = "Structured logging with multiplexed handlers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit one record through the configured handlers.
    Emit {
        /// Record level.
        #[arg(long, default_value = "info")]
        level: Level,
        /// Logger label.
        #[arg(long, default_value = "fanlog")]
        label: String,
        /// Optional config file path (TOML or JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Call-site metadata as key=value (repeatable).
        #[arg(long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, String)>,
        /// Message text.
        message: String,
    },
    /// Print the effective config after env overrides.
    Config {
        /// Optional config file path (TOML or JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output serialization.
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigOutputFormat,
    },
    /// List level names from most to least verbose.
    Levels {
        /// Print a JSON array instead of one name per line.
        #[arg(long)]
        json: bool,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

/// Framework diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(filter)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands) -> Result<CliOutput, CliError> {
    match command {
        Commands::Emit {
            level,
            label,
            config,
            meta,
            message,
        } => run_emit(&EmitCommandInput {
            level: *level,
            label,
            config_path: config.as_deref(),
            meta,
            message,
        }),
        Commands::Config { config, format } => run_config(config.as_deref(), *format),
        Commands::Levels { json } => run_levels(*json),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    if !output.stdout.is_empty() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.stdout.as_bytes())?;
        stdout.flush()?;
    }
    if !output.stderr.is_empty() {
        io::stderr().write_all(output.stderr.as_bytes())?;
    }
    Ok(())
}
