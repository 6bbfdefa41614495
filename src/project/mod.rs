//! Resolved project description consumed by the emitter.
//!
//! A [`ProjectDescription`] is built once (from a TOML file via [`load_project`], or in code with the `with_*`
//! builders), handed to the emitter as an immutable snapshot, and dropped after one emission pass.
//!
//! ## Paths
//!
//! Paths are plain `/`-separated strings, as they appear in the build file:
//! - object file: `<bin>/<source>.o`
//! - compiler input: `<src>/<source>`
//! - primary binary: `<bin>/<binary><exe_suffix>`
//!
//! An empty directory means "no prefix".

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{load_project, load_project_from_str};

use std::fmt;

use serde::Deserialize;

/// Suffix appended to a source path to name its object file.
pub const OBJECT_SUFFIX: &str = ".o";

/// Default logical name (and file stem) of the primary binary.
pub const DEFAULT_BINARY: &str = "fab";

/// Default name of the generated build file.
pub const DEFAULT_BUILD_FILE: &str = "build.ninja";

/// Logical tool name bound to an invocation path (e.g. `cxx = clang++`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolBinding {
    pub name: String,
    pub path: String,
}

/// Compiler and linker flags. Order is preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlagSets {
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub ldflags: Vec<String>,
    /// C++ flags contributed by feature toggles resolved upstream; appended after `cxxflags`.
    pub features: Vec<String>,
}

impl FlagSets {
    /// The full C++ flag list: `cxxflags` followed by feature flags.
    pub fn all_cxxflags(&self) -> impl Iterator<Item = &str> {
        self.cxxflags.iter().chain(&self.features).map(String::as_str)
    }
}

/// A source path relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct SourceFile(String);

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The object file this source compiles to.
    pub fn object(&self, layout: &OutputLayout) -> ObjectFile {
        ObjectFile(join_path(&layout.bin, &format!("{}{}", self.0, OBJECT_SUFFIX)))
    }

    /// The source path as the compiler sees it (resolved against the source root).
    pub fn resolve(&self, layout: &OutputLayout) -> String {
        join_path(&layout.src, &self.0)
    }
}

impl From<&str> for SourceFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object file derived from exactly one [`SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectFile(String);

impl ObjectFile {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A secondary artifact linked separately from the primary binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<SourceFile>,
}

impl Library {
    pub fn new<I, S>(name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            sources: sources.into_iter().map(SourceFile::new).collect(),
        }
    }
}

/// Script that regenerates the build file when its inputs change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegenerationHook {
    pub script: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Where artifacts go and what executables are called.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputLayout {
    /// Directory for binaries and object files.
    pub bin: String,
    /// Source root.
    pub src: String,
    /// Platform executable suffix (`""` on Unix, `".exe"` on Windows).
    pub exe_suffix: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            bin: "bin".to_string(),
            src: "src".to_string(),
            exe_suffix: String::new(),
        }
    }
}

impl OutputLayout {
    /// Final path of an executable named `name`.
    pub fn binary_path(&self, name: &str) -> String {
        join_path(&self.bin, &format!("{}{}", name, self.exe_suffix))
    }
}

/// The complete, resolved description of a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectDescription {
    /// Logical name of the primary binary; also its phony alias and file stem.
    pub binary: String,
    /// Path of the build file itself (the regeneration edge's output).
    pub build_file: String,
    pub layout: OutputLayout,
    /// Tool bindings, in emission order.
    pub tools: Vec<ToolBinding>,
    pub flags: FlagSets,
    /// Sources of the primary binary.
    pub sources: Vec<SourceFile>,
    pub libraries: Vec<Library>,
    pub regen: Option<RegenerationHook>,
}

impl Default for ProjectDescription {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            build_file: DEFAULT_BUILD_FILE.to_string(),
            layout: OutputLayout::default(),
            tools: Vec::new(),
            flags: FlagSets::default(),
            sources: Vec::new(),
            libraries: Vec::new(),
            regen: None,
        }
    }
}

impl ProjectDescription {
    /// Create a description with default layout and the given binary name.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_build_file(mut self, path: impl Into<String>) -> Self {
        self.build_file = path.into();
        self
    }

    /// Bind a tool. Bindings are emitted in the order they are added.
    pub fn with_tool(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.tools.push(ToolBinding {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    pub fn with_flags(mut self, flags: FlagSets) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources.into_iter().map(SourceFile::new));
        self
    }

    pub fn with_library(mut self, library: Library) -> Self {
        self.libraries.push(library);
        self
    }

    pub fn with_regen<I, S>(mut self, script: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regen = Some(RegenerationHook {
            script: script.into(),
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Look up a tool binding by name.
    pub fn tool(&self, name: &str) -> Option<&ToolBinding> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Final path of the primary binary.
    pub fn binary_path(&self) -> String {
        self.layout.binary_path(&self.binary)
    }
}

/// Join a directory and a relative path with exactly one `/`.
pub fn join_path(dir: &str, rel: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        rel.to_string()
    } else {
        format!("{}/{}", dir, rel)
    }
}
