//! Golden snapshot tests for emitted build files
//!
//! Run with: `cargo test --test emit_snapshot_tests`
//! Review changes: `cargo insta review`

use std::path::Path;

use fab_bootstrap::emit;
use fab_bootstrap::project::{ProjectDescription, load_project};
use fab_bootstrap::version::GENERATOR_ID;

/// Emit and pin the version in the header so snapshots survive releases.
fn emit_stable(project: &ProjectDescription) -> String {
    let text = emit(project).expect("emission failed");
    text.replacen(GENERATOR_ID, "fab-bootstrap [version]", 1)
}

#[test]
fn test_two_sources_snapshot() {
    let project = ProjectDescription::new("fab")
        .with_tool("cxx", "c++")
        .with_sources(["a.cc", "b.cc"]);
    let text = emit_stable(&project);
    insta::assert_snapshot!("two_sources", text);
}

#[test]
fn test_demo_project_snapshot() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/fab.toml");
    let project = load_project(&path).expect("demo project failed to load");
    let text = emit_stable(&project);
    insta::assert_snapshot!("demo_project", text);
}
