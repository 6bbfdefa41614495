//! CLI module for the bootstrap generator
//!
//! This module provides the command-line interface.
//!
//! ## Commands
//!
//! - `generate <project.toml>` - Write the Ninja build file
//! - `check <project.toml>` - Verify an existing build file is up to date
//! - `rules` - Print the rule table
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::backend::EmitError;
use crate::project::ConfigError;
use crate::version::FAB_BOOTSTRAP_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The project description could not be loaded or is inconsistent.
    pub const CONFIG: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with its code and help text.
    fn diagnostic(err: impl miette::Diagnostic + Send + Sync + 'static, exit_code: ExitCode) -> Self {
        let report = miette::Report::new(err);
        Self::new(format!("{:?}", report), exit_code)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::diagnostic(err, ExitCode::CONFIG)
    }
}

impl From<EmitError> for CliError {
    fn from(err: EmitError) -> Self {
        let code = match &err {
            EmitError::Io(_) => ExitCode::FAILURE,
            _ => ExitCode::CONFIG,
        };
        Self::diagnostic(err, code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Bootstrap build-file generator for Fabrique
#[derive(Parser, Debug)]
#[command(name = "fab-bootstrap")]
#[command(version = FAB_BOOTSTRAP_VERSION)]
#[command(about = "Generate a Ninja build file from a resolved project description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the Ninja build file for a project
    Generate {
        /// Project description (TOML)
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
        /// Output path (default: the project's `build_file`)
        #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Print the build file instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Check that an existing build file matches what would be generated
    Check {
        /// Project description (TOML)
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
        /// Build file to compare (default: the project's `build_file`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Show a line diff of stale content
        #[arg(long)]
        diff: bool,
    },

    /// Print the rule table
    Rules,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            project,
            output,
            stdout,
        } => commands::generate(&project, output.as_deref(), stdout),
        Command::Check { project, output, diff } => commands::check(&project, output.as_deref(), diff),
        Command::Rules => commands::print_rules(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["fab-bootstrap", "generate", "fab.toml", "-o", "out/build.ninja"]).unwrap();
        if let Command::Generate { project, output, stdout } = cli.command {
            assert_eq!(project, PathBuf::from("fab.toml"));
            assert_eq!(output, Some(PathBuf::from("out/build.ninja")));
            assert!(!stdout);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_output_conflicts_with_stdout() {
        let res = Cli::try_parse_from(["fab-bootstrap", "generate", "fab.toml", "-o", "x", "--stdout"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["fab-bootstrap", "check", "fab.toml", "--diff"]).unwrap();
        assert!(matches!(cli.command, Command::Check { diff: true, .. }));
    }

    #[test]
    fn test_cli_parse_rules() {
        let cli = Cli::try_parse_from(["fab-bootstrap", "rules"]).unwrap();
        assert!(matches!(cli.command, Command::Rules));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["fab-bootstrap"]).is_err());
    }

    #[test]
    fn test_config_error_maps_to_config_exit_code() {
        let err: CliError = ConfigError::MissingField("binary".to_string()).into();
        assert_eq!(err.exit_code, ExitCode::CONFIG);
        assert!(err.message.contains("missing required field: binary"));
    }

    #[test]
    fn test_io_emit_error_maps_to_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError = EmitError::Io(io).into();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
