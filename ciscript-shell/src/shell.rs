//! Shell backends and the scripts they produce.

use crate::{ScriptGenerator, ScriptRequest, ShellWriter};

/// Options a generator can render into instructions.
pub const SUPPORTED_OPTIONS: &[&str] = &["artifacts", "cache"];

/// Features a shell backend supports as first-class options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub artifacts: bool,
    pub cache: bool,
}

impl Features {
    /// The features every generated script supports.
    pub fn supported() -> Self {
        Self {
            artifacts: true,
            cache: true,
        }
    }
}

/// The three stages of a build script, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PreBuild,
    Build,
    PostBuild,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::PreBuild, Stage::Build, Stage::PostBuild];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreBuild => "pre-build",
            Self::Build => "build",
            Self::PostBuild => "post-build",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an executor launches a script of this dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfiguration {
    pub command: String,
    pub arguments: Vec<String>,
}

/// Rendered scripts of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellScript {
    pub pre_build: String,
    pub build: String,
    pub post_build: String,
}

impl ShellScript {
    pub fn stage(&self, stage: Stage) -> &str {
        match stage {
            Stage::PreBuild => &self.pre_build,
            Stage::Build => &self.build,
            Stage::PostBuild => &self.post_build,
        }
    }
}

/// A shell dialect that renders build scripts.
///
/// Implementors provide a [`ShellWriter`] through [`Shell::writer`] and turn a
/// finished writer into text with [`Shell::finish`]; [`Shell::generate`]
/// drives the [`ScriptGenerator`] over all three stages.
pub trait Shell {
    /// The writer type for this dialect.
    type Writer: ShellWriter;

    /// Dialect identifier (e.g., "bash", "powershell")
    fn name(&self) -> &'static str;

    /// File extension for generated scripts (e.g., "sh", "ps1")
    fn extension(&self) -> &'static str;

    /// How to launch a generated script.
    fn configuration(&self) -> ShellConfiguration;

    /// Create an empty writer for one stage of `request`.
    fn writer(&self, request: &ScriptRequest<'_>) -> Self::Writer;

    /// Render a writer's instructions into script text.
    fn finish(&self, writer: Self::Writer) -> String;

    /// Render one stage.
    fn generate_stage(&self, request: &ScriptRequest<'_>, stage: Stage) -> String {
        let mut writer = self.writer(request);
        ScriptGenerator.stage(&mut writer, request, stage);
        self.finish(writer)
    }

    /// Render all three stages.
    fn generate(&self, request: &ScriptRequest<'_>) -> ShellScript {
        ShellScript {
            pre_build: self.generate_stage(request, Stage::PreBuild),
            build: self.generate_stage(request, Stage::Build),
            post_build: self.generate_stage(request, Stage::PostBuild),
        }
    }

    fn features(&self) -> Features {
        Features::supported()
    }

    fn supported_options(&self) -> &'static [&'static str] {
        SUPPORTED_OPTIONS
    }
}
