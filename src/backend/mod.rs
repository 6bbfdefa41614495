//! Build-file backend
//!
//! This module turns a resolved project description into a Ninja build file.
//!
//! The pipeline is:
//! 1. `ProjectDescription` → `BuildGraph::plan` → ordered edges and default targets
//! 2. `validate` against the rule table (undeclared rules, unbound tools, duplicate outputs)
//! 3. Render header, variables, rules and the planned graph with `NinjaWriter`
//!
//! ## Module Organization
//!
//! - `graph.rs` - Build-graph planning (edges as data)
//! - `validate.rs` - Checks run before any text is produced
//! - `ninja.rs` - The emitter
//! - `writer.rs` - Low-level line writer with indentation
//! - `errors.rs` - `EmitError`

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod graph;
pub mod ninja;
pub mod validate;
pub mod writer;

pub use errors::EmitError;
pub use graph::{BuildGraph, Edge, PHONY, Statement};
pub use ninja::{NinjaEmitter, emit};
pub use writer::NinjaWriter;
