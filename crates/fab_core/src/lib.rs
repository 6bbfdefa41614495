//! Provide the shared, pure vocabulary of the Fabrique bootstrap generator.
//!
//! This crate is intentionally small and dependency-free. It holds:
//! - the static rule registry ([`rules`]): how each class of artifact is built, and
//! - the syntax helpers for the Ninja build executor ([`ninja`]): escaping and `$name` reference scanning.
//!
//! ## Notes
//!
//! - No IO, no global state, and no knowledge of project descriptions. The emitter in the root crate decides which
//!   rules an edge uses; this crate only answers "what does that rule look like".

pub mod ninja;
pub mod rules;

pub use rules::{RULES, RuleId, RuleInfo};
