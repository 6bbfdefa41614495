//! Build-graph planning
//!
//! Turns a [`ProjectDescription`] into an ordered list of statements (edges, default targets and section breaks)
//! before anything is rendered. Keeping the plan as data lets the emitter validate the whole graph first and only
//! then produce text, so an invalid description never yields a partial build file.

use fab_core::rules::{self, RuleId};

use crate::project::{ProjectDescription, SourceFile};

/// Pseudo-rule producing a name alias with no command.
pub const PHONY: &str = "phony";

/// One `build` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub outputs: Vec<String>,
    /// Rule name. Either [`PHONY`] or a name from the rule table.
    pub rule: &'static str,
    pub inputs: Vec<String>,
    /// Edge-scoped variable bindings (e.g. `args` for regeneration).
    pub bindings: Vec<(&'static str, String)>,
}

impl Edge {
    fn new(output: impl Into<String>, rule: &'static str, inputs: Vec<String>) -> Self {
        Self {
            outputs: vec![output.into()],
            rule,
            inputs,
            bindings: Vec::new(),
        }
    }

    fn with_binding(mut self, name: &'static str, value: String) -> Self {
        self.bindings.push((name, value));
        self
    }

    pub fn is_phony(&self) -> bool {
        self.rule == PHONY
    }
}

/// A statement of the build section, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Edge(Edge),
    Default(String),
    /// Blank line between groups of statements.
    Break,
}

/// The planned build section of a build file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildGraph {
    pub statements: Vec<Statement>,
}

impl BuildGraph {
    /// Plan the regeneration, primary binary and library edges of `project`, in that order.
    #[tracing::instrument(skip_all, fields(sources = project.sources.len(), libraries = project.libraries.len()))]
    pub fn plan(project: &ProjectDescription) -> Self {
        let mut graph = Self::default();

        if let Some(regen) = &project.regen {
            graph.edge(
                Edge::new(
                    project.build_file.clone(),
                    rules::as_str(RuleId::Rebuild),
                    vec![regen.script.clone()],
                )
                .with_binding("args", regen.args.join(" ")),
            );
            graph.statements.push(Statement::Break);
        }

        let binary = project.binary_path();
        graph.edge(Edge::new(project.binary.clone(), PHONY, vec![binary.clone()]));
        graph.edge(Edge::new(
            binary,
            rules::as_str(RuleId::Bin),
            object_paths(project, &project.sources),
        ));
        graph.statements.push(Statement::Default(project.binary.clone()));
        graph.statements.push(Statement::Break);
        graph.compile_edges(project, &project.sources);

        for library in &project.libraries {
            graph.edge(Edge::new(
                library.name.clone(),
                rules::as_str(RuleId::Lib),
                object_paths(project, &library.sources),
            ));
            graph.statements.push(Statement::Default(library.name.clone()));
            graph.statements.push(Statement::Break);
            graph.compile_edges(project, &library.sources);
        }

        tracing::debug!(statements = graph.statements.len(), "planned build graph");
        graph
    }

    fn edge(&mut self, edge: Edge) {
        self.statements.push(Statement::Edge(edge));
    }

    fn compile_edges(&mut self, project: &ProjectDescription, sources: &[SourceFile]) {
        for source in sources {
            self.edge(Edge::new(
                source.object(&project.layout).to_string(),
                rules::as_str(RuleId::Cxx),
                vec![source.resolve(&project.layout)],
            ));
        }
        self.statements.push(Statement::Break);
    }

    /// All edges, in emission order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Edge(edge) => Some(edge),
            _ => None,
        })
    }

    /// All default targets, in emission order.
    pub fn defaults(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Default(target) => Some(target.as_str()),
            _ => None,
        })
    }
}

fn object_paths(project: &ProjectDescription, sources: &[SourceFile]) -> Vec<String> {
    sources
        .iter()
        .map(|s| s.object(&project.layout).to_string())
        .collect()
}
