//! Generator version information.
//!
//! This module exposes the generator version as a single constant so all subsystems (CLI, build-file header)
//! agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - Prefer these constants over repeating `env!("CARGO_PKG_VERSION")` in multiple places.

/// The generator version string (for example, `0.1.0`).
pub const FAB_BOOTSTRAP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name and version written into the header of every generated build file.
pub const GENERATOR_ID: &str = concat!("fab-bootstrap ", env!("CARGO_PKG_VERSION"));
