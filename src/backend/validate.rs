//! Graph validation run before any text is rendered.

use std::collections::{HashMap, HashSet};

use fab_core::ninja;
use fab_core::rules::{self, RuleInfo};

use super::errors::EmitError;
use super::graph::BuildGraph;
use crate::project::ProjectDescription;

/// Check that `graph` can be rendered against `table` for `project`.
///
/// ## Errors
///
/// - [`EmitError::UndeclaredRule`] if an edge names a rule missing from `table`.
/// - [`EmitError::MissingTool`] if a used rule's command references a variable that is neither built in, a flag
///   variable, bound by the edge, nor a configured tool.
/// - [`EmitError::DuplicateOutput`] if two edges produce the same output.
/// - [`EmitError::InvalidToolName`], [`EmitError::ReservedToolName`] or [`EmitError::DuplicateTool`] if a tool
///   binding cannot be emitted as its own top-level variable.
/// - [`EmitError::UnrepresentablePath`] or [`EmitError::UnrepresentableValue`] if an edge path or a bound value
///   contains text the build-file syntax cannot express.
pub fn validate(graph: &BuildGraph, table: &[RuleInfo], project: &ProjectDescription) -> Result<(), EmitError> {
    check_variables(table, project)?;

    let mut used: Vec<&RuleInfo> = Vec::new();
    let mut producers: HashMap<&str, &str> = HashMap::new();

    for edge in graph.edges() {
        for path in edge.outputs.iter().chain(&edge.inputs) {
            if !ninja::is_representable_path(path) {
                return Err(EmitError::UnrepresentablePath { path: path.clone() });
            }
        }
        for (name, value) in &edge.bindings {
            check_value(name, value)?;
        }

        if !edge.is_phony() {
            let Some(rule) = rules::lookup_in(table, edge.rule) else {
                return Err(EmitError::UndeclaredRule {
                    rule: edge.rule.to_string(),
                    output: edge.outputs.join(" "),
                });
            };
            if !used.iter().any(|r| r.name == rule.name) {
                used.push(rule);
            }
        }

        for output in &edge.outputs {
            if let Some(first) = producers.insert(output.as_str(), edge.rule) {
                return Err(EmitError::DuplicateOutput {
                    output: output.clone(),
                    first: first.to_string(),
                    second: edge.rule.to_string(),
                });
            }
        }
    }

    for rule in used {
        for var in ninja::variable_refs(rule.command) {
            let bound = ninja::BUILTIN_VARIABLES.contains(&var)
                || ninja::FLAG_VARIABLES.contains(&var)
                || rule.edge_variables.contains(&var)
                || project.tool(var).is_some();
            if !bound {
                return Err(EmitError::MissingTool {
                    tool: var.to_string(),
                    rule: rule.name.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Tool bindings and flag values become top-level `name = value` lines.
fn check_variables(table: &[RuleInfo], project: &ProjectDescription) -> Result<(), EmitError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for tool in &project.tools {
        let name = tool.name.as_str();
        if !ninja::is_variable_name(name) {
            return Err(EmitError::InvalidToolName { tool: tool.name.clone() });
        }
        let reserved = ninja::BUILTIN_VARIABLES.contains(&name)
            || ninja::FLAG_VARIABLES.contains(&name)
            || table.iter().any(|r| r.edge_variables.contains(&name));
        if reserved {
            return Err(EmitError::ReservedToolName { tool: tool.name.clone() });
        }
        if !seen.insert(name) {
            return Err(EmitError::DuplicateTool { tool: tool.name.clone() });
        }
        check_value(name, &tool.path)?;
    }

    let flags = &project.flags;
    let sets = [
        (ninja::CFLAGS, &flags.cflags),
        (ninja::CXXFLAGS, &flags.cxxflags),
        (ninja::CXXFLAGS, &flags.features),
        (ninja::LDFLAGS, &flags.ldflags),
    ];
    for (name, values) in sets {
        for value in values {
            check_value(name, value)?;
        }
    }

    Ok(())
}

fn check_value(name: &str, value: &str) -> Result<(), EmitError> {
    if ninja::is_representable_value(value) {
        Ok(())
    } else {
        Err(EmitError::UnrepresentableValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::project::Library;
    use fab_core::RULES;

    fn toolchain(name: &str) -> ProjectDescription {
        ProjectDescription::new(name).with_tool("cxx", "c++")
    }

    #[test]
    fn test_valid_project() {
        let project = toolchain("fab").with_sources(["a.cc"]);
        let graph = BuildGraph::plan(&project);
        assert!(validate(&graph, RULES, &project).is_ok());
    }

    #[test]
    fn test_undeclared_rule() {
        let project = toolchain("fab").with_sources(["a.cc"]);
        let graph = BuildGraph::plan(&project);
        let err = validate(&graph, &RULES[..2], &project).unwrap_err();
        assert!(matches!(err, EmitError::UndeclaredRule { ref rule, .. } if rule == "cxx"));
    }

    #[test]
    fn test_missing_compiler() {
        let project = ProjectDescription::new("fab").with_sources(["a.cc"]);
        let graph = BuildGraph::plan(&project);
        let err = validate(&graph, RULES, &project).unwrap_err();
        assert!(matches!(err, EmitError::MissingTool { ref tool, ref rule } if tool == "cxx" && rule == "bin"));
    }

    #[test]
    fn test_python_only_needed_with_regen() {
        let project = toolchain("fab");
        assert!(validate(&BuildGraph::plan(&project), RULES, &project).is_ok());

        let project = project.with_regen("bootstrap.py", Vec::<String>::new());
        let err = validate(&BuildGraph::plan(&project), RULES, &project).unwrap_err();
        assert!(matches!(err, EmitError::MissingTool { ref tool, .. } if tool == "python"));
    }

    #[test]
    fn test_cc_tool_not_required() {
        // `cc` is declared in the table but no edge uses it.
        let project = toolchain("fab").with_sources(["a.c"]);
        assert!(validate(&BuildGraph::plan(&project), RULES, &project).is_ok());
    }

    #[test]
    fn test_source_shared_with_library() {
        let project = toolchain("fab")
            .with_sources(["util.cc"])
            .with_library(Library::new("libutil", ["util.cc"]));
        let err = validate(&BuildGraph::plan(&project), RULES, &project).unwrap_err();
        assert!(matches!(err, EmitError::DuplicateOutput { ref output, .. } if output == "bin/util.cc.o"));
    }

    #[test]
    fn test_library_named_like_binary_alias() {
        let project = toolchain("fab").with_library(Library::new("fab", Vec::<String>::new()));
        let err = validate(&BuildGraph::plan(&project), RULES, &project).unwrap_err();
        assert!(matches!(
            err,
            EmitError::DuplicateOutput { ref first, ref second, .. } if first == "phony" && second == "lib"
        ));
    }

    #[test]
    fn test_alias_equal_to_binary_path() {
        let layout = crate::project::OutputLayout {
            bin: String::new(),
            ..Default::default()
        };
        let project = toolchain("fab").with_layout(layout);
        let err = validate(&BuildGraph::plan(&project), RULES, &project).unwrap_err();
        assert!(matches!(err, EmitError::DuplicateOutput { ref output, .. } if output == "fab"));
    }

    fn check(project: &ProjectDescription) -> Result<(), EmitError> {
        validate(&BuildGraph::plan(project), RULES, project)
    }

    #[test]
    fn test_tool_name_not_a_variable() {
        let project = toolchain("fab").with_tool("c++", "g++");
        let err = check(&project).unwrap_err();
        assert!(matches!(err, EmitError::InvalidToolName { ref tool } if tool == "c++"));
    }

    #[test]
    fn test_tool_name_with_dot_accepted() {
        let project = toolchain("fab").with_tool("clang.cl", "clang-cl");
        assert!(check(&project).is_ok());
    }

    #[test]
    fn test_tool_named_like_flag_variable() {
        for name in ["cflags", "cxxflags", "ldflags"] {
            let err = check(&toolchain("fab").with_tool(name, "-O3")).unwrap_err();
            assert!(matches!(err, EmitError::ReservedToolName { ref tool } if tool == name));
        }
    }

    #[test]
    fn test_tool_named_like_builtin_variable() {
        for name in ["in", "out"] {
            let err = check(&toolchain("fab").with_tool(name, "x")).unwrap_err();
            assert!(matches!(err, EmitError::ReservedToolName { ref tool } if tool == name));
        }
    }

    #[test]
    fn test_tool_named_like_edge_variable() {
        let err = check(&toolchain("fab").with_tool("args", "--debug")).unwrap_err();
        assert!(matches!(err, EmitError::ReservedToolName { ref tool } if tool == "args"));
    }

    #[test]
    fn test_tool_bound_twice() {
        let err = check(&toolchain("fab").with_tool("cxx", "clang++")).unwrap_err();
        assert!(matches!(err, EmitError::DuplicateTool { ref tool } if tool == "cxx"));
    }

    #[test]
    fn test_tool_path_with_newline() {
        let err = check(&toolchain("fab").with_tool("cc", "cc\ngcc")).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentableValue { ref name, .. } if name == "cc"));
    }

    #[test]
    fn test_flag_with_newline() {
        let flags = crate::project::FlagSets {
            features: vec!["-DA\n-DB".to_string()],
            ..Default::default()
        };
        let err = check(&toolchain("fab").with_flags(flags)).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentableValue { ref name, .. } if name == "cxxflags"));
    }

    #[test]
    fn test_source_with_newline() {
        let err = check(&toolchain("fab").with_sources(["a\nb.cc"])).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentablePath { ref path } if path == "bin/a\nb.cc.o"));
    }

    #[test]
    fn test_source_with_pipe() {
        let err = check(&toolchain("fab").with_sources(["x|y.cc"])).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentablePath { ref path } if path == "bin/x|y.cc.o"));
    }

    #[test]
    fn test_library_name_with_pipe() {
        let project = toolchain("fab").with_library(Library::new("lib|foo", Vec::<String>::new()));
        let err = check(&project).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentablePath { ref path } if path == "lib|foo"));
    }

    #[test]
    fn test_regen_script_and_args() {
        let project = toolchain("fab").with_tool("python", "python3");

        let err = check(&project.clone().with_regen("boot|strap.py", Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentablePath { ref path } if path == "boot|strap.py"));

        let err = check(&project.with_regen("bootstrap.py", ["--a\n--b"])).unwrap_err();
        assert!(matches!(err, EmitError::UnrepresentableValue { ref name, .. } if name == "args"));
    }
}
