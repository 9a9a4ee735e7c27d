//! Inputs of one generation pass.

use ciscript_build::Build;

/// The helper binary that archives, extracts and transfers files at script
/// run time. Executors that cannot provide it leave the path empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionExecutable {
    path: Option<String>,
}

impl CompanionExecutable {
    /// Create from a path; an empty path means the executable is unavailable.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: (!path.is_empty()).then_some(path),
        }
    }

    /// An executor without the companion executable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Everything needed to generate the scripts of one build.
#[derive(Debug, Clone)]
pub struct ScriptRequest<'a> {
    pub build: &'a Build,
    pub companion: CompanionExecutable,
}

impl<'a> ScriptRequest<'a> {
    pub fn new(build: &'a Build, companion: CompanionExecutable) -> Self {
        Self { build, companion }
    }
}
