//! Define the static rule registry for bootstrap build files.
//!
//! This module is the single source of truth for build rules: a stable identifier ([`RuleId`]) plus a const
//! metadata table ([`RULES`]) recording each rule's name, command template, description template and auxiliary
//! declarations.
//!
//! ## Notes
//! - The table order is the declaration order in the emitted build file. It is part of the output contract.
//! - Templates use `$name` placeholders that the build executor resolves at build time, never the emitter.
//! - Rules cannot be registered at runtime; callers that need a restricted table pass a sub-slice of [`RULES`]
//!   to the emitter and use [`lookup_in`].
//!
//! ## Examples
//! ```rust
//! use fab_core::rules::{self, RuleId};
//!
//! assert_eq!(rules::from_str("cxx"), Some(RuleId::Cxx));
//! assert_eq!(rules::as_str(RuleId::Rebuild), "rebuild");
//! ```

/// Stable identifier for every build rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// Link the primary executable.
    Bin,
    /// Compile a C source file.
    Cc,
    /// Compile a C++ source file.
    Cxx,
    /// Link a shared library.
    Lib,
    /// Regenerate the build file itself.
    Rebuild,
}

/// Metadata for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: RuleId,
    /// Name used in `rule <name>` blocks and `build` edges.
    pub name: &'static str,
    pub command: &'static str,
    pub description: &'static str,
    /// Path of the dependency file the command generates, if any.
    pub depfile: Option<&'static str>,
    /// Outputs of generator rules do not trigger a rebuild cascade when the rule's own inputs change.
    pub generator: bool,
    /// Variables each edge using this rule must bind itself (e.g. `args` for `rebuild`).
    pub edge_variables: &'static [&'static str],
}

impl RuleInfo {
    /// Iterate over the `key = value` lines of this rule block, in emission order.
    pub fn bindings(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        [
            Some(("command", self.command)),
            Some(("description", self.description)),
            self.depfile.map(|d| ("depfile", d)),
            self.generator.then_some(("generator", "true")),
        ]
        .into_iter()
        .flatten()
    }
}

/// Registry of all rules, in declaration order.
pub const RULES: &[RuleInfo] = &[
    RuleInfo {
        id: RuleId::Bin,
        name: "bin",
        command: "$cxx $ldflags -o $out $in",
        description: "Linking $out",
        depfile: None,
        generator: false,
        edge_variables: &[],
    },
    RuleInfo {
        id: RuleId::Cc,
        name: "cc",
        command: "$cc -c $cflags -MMD -MT $out -MF $out.d -o $out $in",
        description: "Compiling $in",
        depfile: Some("$out.d"),
        generator: false,
        edge_variables: &[],
    },
    RuleInfo {
        id: RuleId::Cxx,
        name: "cxx",
        command: "$cxx -c $cxxflags -MMD -MT $out -MF $out.d -o $out $in",
        description: "Compiling $in",
        depfile: Some("$out.d"),
        generator: false,
        edge_variables: &[],
    },
    RuleInfo {
        id: RuleId::Lib,
        name: "lib",
        command: "$cxx -shared -o $out $ldflags $in",
        description: "Linking library $out",
        depfile: None,
        generator: false,
        edge_variables: &[],
    },
    RuleInfo {
        id: RuleId::Rebuild,
        name: "rebuild",
        command: "$python $in $args",
        description: "Regenerating $out",
        depfile: None,
        generator: true,
        edge_variables: &["args"],
    },
];

/// Canonical name of a rule.
pub fn as_str(id: RuleId) -> &'static str {
    info_for(id).name
}

/// Metadata for a rule id.
///
/// ## Panics
/// - If [`RULES`] has no entry for `id`. The registry guardrail tests keep every id covered.
pub fn info_for(id: RuleId) -> &'static RuleInfo {
    RULES.iter().find(|r| r.id == id).expect("INVARIANT: rule info missing")
}

/// Lookup by name in the full registry.
pub fn from_str(name: &str) -> Option<RuleId> {
    lookup_in(RULES, name).map(|r| r.id)
}

/// Lookup by name in an arbitrary rule table.
///
/// ## Returns
/// - `Some(&RuleInfo)` for the first rule in `table` named `name`.
/// - `None` if the table does not declare it.
pub fn lookup_in<'t>(table: &'t [RuleInfo], name: &str) -> Option<&'t RuleInfo> {
    table.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["bin", "cc", "cxx", "lib", "rebuild"]);
    }

    #[test]
    fn test_lookup_in_subset() {
        let table = &RULES[..2];
        assert!(lookup_in(table, "bin").is_some());
        assert!(lookup_in(table, "cxx").is_none());
    }

    #[test]
    fn test_from_str_unknown() {
        assert_eq!(from_str("link"), None);
        assert_eq!(from_str(""), None);
    }

    #[test]
    fn test_bindings_order_compile_rule() {
        let keys: Vec<_> = info_for(RuleId::Cxx).bindings().map(|(k, _)| k).collect();
        assert_eq!(keys, ["command", "description", "depfile"]);
    }

    #[test]
    fn test_bindings_generator_rule() {
        let bindings: Vec<_> = info_for(RuleId::Rebuild).bindings().collect();
        assert_eq!(bindings.last(), Some(&("generator", "true")));
        assert!(!bindings.iter().any(|(k, _)| *k == "depfile"));
    }
}
