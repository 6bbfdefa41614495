//! Ninja build-file emitter
//!
//! The emitter is a pure function of a [`ProjectDescription`]: the same description always yields byte-identical
//! text. Emission runs in three steps:
//!
//! ```text
//! ProjectDescription → BuildGraph::plan → validate → render (NinjaWriter) → sink
//! ```
//!
//! Section order is fixed: header, tool variables, flag variables, rule table, regeneration edge, primary binary,
//! libraries. The executor treats first-seen default targets specially, so reordering is observable.
//!
//! ## Usage
//!
//! ```rust
//! use fab_bootstrap::backend::NinjaEmitter;
//! use fab_bootstrap::project::ProjectDescription;
//!
//! let project = ProjectDescription::new("fab").with_tool("cxx", "c++").with_sources(["a.cc"]);
//! let text = NinjaEmitter::new(&project).try_emit().unwrap();
//! assert!(text.contains("build bin/a.cc.o: cxx src/a.cc\n"));
//! ```

use std::io::Write;

use fab_core::ninja::{self, CFLAGS, CXXFLAGS, LDFLAGS};
use fab_core::rules::{RULES, RuleInfo};

use super::errors::EmitError;
use super::graph::{BuildGraph, Statement};
use super::validate::validate;
use super::writer::NinjaWriter;
use crate::project::ProjectDescription;
use crate::version::GENERATOR_ID;

/// Emits a Ninja build file for one project description.
#[derive(Debug, Clone, Copy)]
pub struct NinjaEmitter<'a> {
    project: &'a ProjectDescription,
    rules: &'a [RuleInfo],
}

impl<'a> NinjaEmitter<'a> {
    /// Create an emitter using the full rule registry.
    pub fn new(project: &'a ProjectDescription) -> Self {
        Self { project, rules: RULES }
    }

    /// Create an emitter that declares (and resolves edges against) only `rules`.
    pub fn with_rules(project: &'a ProjectDescription, rules: &'a [RuleInfo]) -> Self {
        Self { project, rules }
    }

    /// Render the complete build file.
    ///
    /// ## Errors
    ///
    /// Returns a validation [`EmitError`] if the description is inconsistent with the rule table. No text is
    /// produced in that case.
    #[tracing::instrument(skip_all, fields(binary = %self.project.binary))]
    pub fn try_emit(&self) -> Result<String, EmitError> {
        let graph = BuildGraph::plan(self.project);
        validate(&graph, self.rules, self.project)?;

        let mut w = NinjaWriter::default();
        self.emit_header(&mut w);
        self.emit_variables(&mut w);
        self.emit_rules(&mut w);
        emit_statements(&mut w, &graph);

        let text = w.finish();
        tracing::debug!(bytes = text.len(), "emitted build file");
        Ok(text)
    }

    /// Render the build file and write it to `out` in one piece.
    ///
    /// Validation happens before the first byte is written. IO errors of the sink are propagated unchanged.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let text = self.try_emit()?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn emit_header(&self, w: &mut NinjaWriter) {
        w.comment(&format!("Generated by {}", GENERATOR_ID));
        w.blank_line();
    }

    fn emit_variables(&self, w: &mut NinjaWriter) {
        for tool in &self.project.tools {
            w.variable(&tool.name, &ninja::escape_value(&tool.path));
        }

        let flags = &self.project.flags;
        w.variable(CFLAGS, &join_values(flags.cflags.iter().map(String::as_str)));
        w.variable(CXXFLAGS, &join_values(flags.all_cxxflags()));
        w.variable(LDFLAGS, &join_values(flags.ldflags.iter().map(String::as_str)));
        w.blank_line();
    }

    fn emit_rules(&self, w: &mut NinjaWriter) {
        for rule in self.rules {
            w.rule(rule.name, rule.bindings());
            w.blank_line();
        }
    }
}

fn emit_statements(w: &mut NinjaWriter, graph: &BuildGraph) {
    // Suppress runs of breaks so empty groups do not leave stacked blank lines.
    let mut after_break = true;

    for statement in &graph.statements {
        match statement {
            Statement::Edge(edge) => {
                let bindings: Vec<(&str, String)> = edge
                    .bindings
                    .iter()
                    .map(|(name, value)| (*name, ninja::escape_value(value).into_owned()))
                    .collect();
                w.build(
                    edge.outputs.iter().map(|p| ninja::escape_path(p)),
                    edge.rule,
                    edge.inputs.iter().map(|p| ninja::escape_path(p)),
                    &bindings,
                );
                after_break = false;
            }
            Statement::Default(target) => {
                w.default_target(&ninja::escape_path(target));
                after_break = false;
            }
            Statement::Break => {
                if !after_break {
                    w.blank_line();
                    after_break = true;
                }
            }
        }
    }
}

fn join_values<'s>(values: impl Iterator<Item = &'s str>) -> String {
    values
        .map(ninja::escape_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emit the build file for `project` with the full rule registry.
pub fn emit(project: &ProjectDescription) -> Result<String, EmitError> {
    NinjaEmitter::new(project).try_emit()
}
