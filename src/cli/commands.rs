//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fab_core::rules::RULES;

use crate::backend::NinjaEmitter;
use crate::project::{ProjectDescription, load_project};

use super::{CliError, CliResult, ExitCode};

/// Load the project description and render its build file.
fn render(project_path: &Path) -> CliResult<(ProjectDescription, String)> {
    let project = load_project(project_path)?;
    let text = NinjaEmitter::new(&project).try_emit()?;
    Ok((project, text))
}

fn output_path(project: &ProjectDescription, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&project.build_file))
}

/// Write the build file for a project.
///
/// The text is fully rendered and validated before the output file is created, so a failing description never
/// truncates an existing build file.
pub fn generate(project_path: &Path, output: Option<&Path>, to_stdout: bool) -> CliResult<ExitCode> {
    let (project, text) = render(project_path)?;

    if to_stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| CliError::failure(format!("Error writing to stdout: {}", e)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let out = output_path(&project, output);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::failure(format!("Cannot create directory '{}': {}", parent.display(), e)))?;
    }
    fs::write(&out, &text).map_err(|e| CliError::failure(format!("Error writing '{}': {}", out.display(), e)))?;

    tracing::info!(
        path = %out.display(),
        sources = project.sources.len(),
        libraries = project.libraries.len(),
        "wrote build file"
    );
    Ok(ExitCode::SUCCESS)
}

/// Compare an existing build file with what would be generated.
pub fn check(project_path: &Path, output: Option<&Path>, show_diff: bool) -> CliResult<ExitCode> {
    let (project, text) = render(project_path)?;
    let out = output_path(&project, output);

    let existing = match fs::read_to_string(&out) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CliError::failure(format!("{} does not exist", out.display())));
        }
        Err(e) => return Err(CliError::failure(format!("Error reading '{}': {}", out.display(), e))),
    };

    match line_diff(&existing, &text) {
        None => {
            println!("✓ {} is up to date", out.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(diff) => {
            if show_diff {
                println!("--- {}", out.display());
                print!("{}", diff);
            }
            tracing::warn!(path = %out.display(), "build file is stale");
            Err(CliError::failure(format!("{} is out of date", out.display())))
        }
    }
}

/// Print the rule table in build-file syntax.
pub fn print_rules() -> CliResult<ExitCode> {
    for rule in RULES {
        println!("rule {}", rule.name);
        for (key, value) in rule.bindings() {
            println!("  {} = {}", key, value);
        }
        if !rule.edge_variables.is_empty() {
            println!("  # edge variables: {}", rule.edge_variables.join(", "));
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

/// Line-by-line diff between the current and the expected text, or `None` if they are identical.
pub fn line_diff(current: &str, expected: &str) -> Option<String> {
    if current == expected {
        return None;
    }

    let mut diff = String::new();
    let current_lines: Vec<&str> = current.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    let max_lines = current_lines.len().max(expected_lines.len());

    for i in 0..max_lines {
        let cur = current_lines.get(i).copied();
        let exp = expected_lines.get(i).copied();

        if cur != exp {
            if let Some(cur) = cur {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, cur));
            }
            if let Some(exp) = exp {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, exp));
            }
        }
    }

    // `lines()` drops the final newline, so a difference there needs its own note.
    let current_terminated = current.is_empty() || current.ends_with('\n');
    let expected_terminated = expected.is_empty() || expected.ends_with('\n');
    if current_terminated != expected_terminated {
        let side = if current_terminated { '+' } else { '-' };
        diff.push_str(&format!("{}{:4} | \\ No newline at end of file\n", side, ""));
    }
    if diff.is_empty() {
        diff.push_str("line endings differ\n");
    }

    Some(diff)
}
