#![forbid(unsafe_code)]
//! Fabrique bootstrap build-file generator
//!
//! Takes a resolved project description (toolchain, flags, sources, libraries, regeneration hook) and emits a
//! Ninja build file that builds the Fabrique binary and its libraries, and regenerates itself when its inputs
//! change. It never runs builds itself.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli`, `backend` and
//!   `project` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod backend;
pub mod cli;
pub mod project;
pub mod version;

pub use backend::{EmitError, NinjaEmitter, emit};
pub use project::{ConfigError, ProjectDescription, load_project, load_project_from_str};
