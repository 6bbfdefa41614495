//! Define error types for build-file emission.
//!
//! These errors represent *configuration inconsistencies* found while planning the build graph, plus IO failures
//! of the output sink. Validation errors are always reported before any text reaches the sink.

use miette::Diagnostic;
use thiserror::Error;

/// Error during build-file emission.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    #[error("build edge for `{output}` references undeclared rule `{rule}`")]
    #[diagnostic(code(fab::emit::undeclared_rule))]
    UndeclaredRule { rule: String, output: String },

    #[error("rule `{rule}` uses `${tool}`, but no tool named `{tool}` is bound")]
    #[diagnostic(
        code(fab::emit::missing_tool),
        help("add a [[tools]] entry for it to the project description")
    )]
    MissingTool { tool: String, rule: String },

    #[error("`{output}` is produced by more than one build edge (rules `{first}` and `{second}`)")]
    #[diagnostic(
        code(fab::emit::duplicate_output),
        help("a source shared by the main program and a library, or two artifacts with one name, yields the same output twice")
    )]
    DuplicateOutput {
        output: String,
        first: String,
        second: String,
    },

    #[error("tool name {tool:?} is not a valid build-file variable name")]
    #[diagnostic(
        code(fab::emit::invalid_tool_name),
        help("tool names may only contain ASCII letters, digits, `_`, `.` and `-`")
    )]
    InvalidToolName { tool: String },

    #[error("tool name `{tool}` collides with a variable the generator binds itself")]
    #[diagnostic(
        code(fab::emit::reserved_tool_name),
        help("`in`, `out`, the flag variables and rule-bound variables such as `args` cannot name a tool")
    )]
    ReservedToolName { tool: String },

    #[error("tool `{tool}` is bound more than once")]
    #[diagnostic(code(fab::emit::duplicate_tool))]
    DuplicateTool { tool: String },

    #[error("path {path:?} cannot be written to a build file")]
    #[diagnostic(
        code(fab::emit::unrepresentable_path),
        help("paths may not contain newlines or `|`")
    )]
    UnrepresentablePath { path: String },

    #[error("value of `{name}` contains a newline")]
    #[diagnostic(code(fab::emit::unrepresentable_value))]
    UnrepresentableValue { name: String, value: String },

    #[error("failed to write build file: {0}")]
    #[diagnostic(code(fab::emit::io))]
    Io(#[from] std::io::Error),
}
