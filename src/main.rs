//! well-known-bots - registry checker
//!
//! Gates edits to the well-known bots registry: the file must be in
//! canonical form and every record must be structurally sound with
//! patterns that agree with its example instances.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use well_known_bots::error::FormatError;
use well_known_bots::{ValidateOptions, format, validate_all};

/// Exit codes returned by the binary.
mod exit_codes {
    /// Registry is valid (or was rewritten).
    pub const SUCCESS: u8 = 0;
    /// Format or validation failure.
    pub const INVALID: u8 = 1;
    /// The file could not be read, written, or decoded.
    pub const ERROR: u8 = 2;
}

/// well-known-bots - registry checker
#[derive(Parser, Debug)]
#[command(name = "well-known-bots")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the registry file
    #[arg(
        short,
        long,
        env = "WELL_KNOWN_BOTS_FILE",
        default_value = "well-known-bots.json"
    )]
    file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check canonical formatting, record schema and pattern consistency
    Check {
        /// Stop at the first invalid record
        #[arg(long)]
        fail_fast: bool,

        /// Treat warnings as failures
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Rewrite the registry file in canonical form
    Generate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match &cli.command {
        Commands::Check {
            fail_fast,
            deny_warnings,
        } => run_check(
            &cli.file,
            &ValidateOptions {
                fail_fast: *fail_fast,
                deny_warnings: *deny_warnings,
            },
        ),
        Commands::Generate => run_generate(&cli.file),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run_check(path: &Path, options: &ValidateOptions) -> Result<u8> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let value = match format::check_format(&original) {
        Ok(value) => value,
        Err(FormatError::Parse(e)) => {
            return Err(e).with_context(|| format!("failed to parse {}", path.display()));
        }
        Err(e @ FormatError::NotCanonical { .. }) => {
            eprintln!("{}", e);
            return Ok(exit_codes::INVALID);
        }
    };

    let records = match value {
        serde_json::Value::Array(records) => records,
        _ => anyhow::bail!("{}: registry root must be an array of records", path.display()),
    };

    match validate_all(&records, options) {
        Ok(report) => {
            for warning in &report.warnings {
                eprintln!("warning: {}", warning);
            }
            tracing::info!(
                records = report.records,
                with_instances = report.with_instances,
                warnings = report.warnings.len(),
                "registry valid"
            );
            println!(
                "{}: {} records valid ({} with instances, {} warnings)",
                path.display(),
                report.records,
                report.with_instances,
                report.warnings.len()
            );
            Ok(exit_codes::SUCCESS)
        }
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprintln!("{}", diagnostic);
            }
            eprintln!("{} invalid record(s) in {}", diagnostics.len(), path.display());
            Ok(exit_codes::INVALID)
        }
    }
}

fn run_generate(path: &Path) -> Result<u8> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let updated = format::generate(&original)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if updated == original {
        tracing::info!(file = %path.display(), "already canonical");
    } else {
        std::fs::write(path, updated)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(file = %path.display(), "rewrote registry");
    }
    Ok(exit_codes::SUCCESS)
}
