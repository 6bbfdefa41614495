//! Errors for loading and validating project description files.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur when loading or validating a project description.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read project description: {0}")]
    #[diagnostic(code(fab::config::io))]
    Io(#[from] std::io::Error),

    #[error("failed to parse project description: {0}")]
    #[diagnostic(code(fab::config::parse))]
    Parse(String),

    #[error("missing required field: {0}")]
    #[diagnostic(code(fab::config::missing_field))]
    MissingField(String),

    #[error("tool `{0}` is bound more than once")]
    #[diagnostic(code(fab::config::duplicate_tool), help("each tool name becomes one build-file variable"))]
    DuplicateTool(String),

    #[error("invalid name {name:?} for {what}")]
    #[diagnostic(
        code(fab::config::invalid_name),
        help("names may not contain whitespace, `$`, `:` or `=`")
    )]
    InvalidName { what: &'static str, name: String },
}
