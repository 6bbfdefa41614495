//! Project description file loading and validation.

use std::collections::HashSet;
use std::path::Path;

use super::{ConfigError, ProjectDescription};

/// Load and validate a project description from a TOML file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_project(path: &Path) -> Result<ProjectDescription, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_project_from_str(&content)
}

/// Parse and validate a project description from a TOML string.
///
/// ## Examples
/// ```rust
/// use fab_bootstrap::project::load_project_from_str;
///
/// let project = load_project_from_str(r#"
/// sources = ["a.cc"]
///
/// [[tools]]
/// name = "cxx"
/// path = "c++"
/// "#).unwrap();
/// assert_eq!(project.binary, "fab");
/// assert_eq!(project.sources.len(), 1);
/// ```
pub fn load_project_from_str(content: &str) -> Result<ProjectDescription, ConfigError> {
    let project: ProjectDescription = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_project(&project)?;
    tracing::debug!(
        tools = project.tools.len(),
        sources = project.sources.len(),
        libraries = project.libraries.len(),
        regen = project.regen.is_some(),
        "loaded project description"
    );
    Ok(project)
}

/// Structural checks that do not depend on the rule table.
fn validate_project(project: &ProjectDescription) -> Result<(), ConfigError> {
    if project.binary.is_empty() {
        return Err(ConfigError::MissingField("binary".to_string()));
    }
    check_name("binary", &project.binary)?;

    if project.build_file.is_empty() {
        return Err(ConfigError::MissingField("build_file".to_string()));
    }

    let mut tools = HashSet::new();
    for tool in &project.tools {
        check_name("tool", &tool.name)?;
        if !tools.insert(tool.name.as_str()) {
            return Err(ConfigError::DuplicateTool(tool.name.clone()));
        }
    }

    for library in &project.libraries {
        check_name("library", &library.name)?;
    }

    if let Some(regen) = &project.regen {
        if regen.script.is_empty() {
            return Err(ConfigError::MissingField("regen.script".to_string()));
        }
    }

    Ok(())
}

fn check_name(what: &'static str, name: &str) -> Result<(), ConfigError> {
    let bad = name.is_empty() || name.chars().any(|c| c.is_whitespace() || matches!(c, '$' | ':' | '='));
    if bad {
        return Err(ConfigError::InvalidName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}
