use std::path::{Path, PathBuf};

use ciscript_build::Build;
use ciscript_shell::{CompanionExecutable, ScriptRequest, Stage};
use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use tracing::info;

use super::UnwrapOrExit;
use crate::dialect::Dialect;

/// Which stages to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    All,
    PreBuild,
    Build,
    PostBuild,
}

impl StageArg {
    fn stages(self) -> &'static [Stage] {
        match self {
            Self::All => &Stage::ALL,
            Self::PreBuild => &[Stage::PreBuild],
            Self::Build => &[Stage::Build],
            Self::PostBuild => &[Stage::PostBuild],
        }
    }
}

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the build description (defaults to ./build.toml)
    #[arg(short, long, default_value = "build.toml")]
    pub build: PathBuf,

    /// Shell dialect to render
    #[arg(short, long, value_enum, default_value = "bash")]
    pub shell: Dialect,

    /// Path of the companion executable; empty if the executor has none
    #[arg(long, default_value = "")]
    pub companion: String,

    /// Stage to render
    #[arg(long, value_enum, default_value = "all")]
    pub stage: StageArg,

    /// Write each stage to `<dir>/<stage>.<ext>` instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let build = Build::from_file(&self.build).unwrap_or_exit();
        let request = ScriptRequest::new(&build, CompanionExecutable::new(self.companion.as_str()));

        info!(
            build = build.id,
            shell = self.shell.name(),
            companion = request.companion.is_available(),
            "rendering build scripts"
        );

        let rendered: Vec<(Stage, String)> = self
            .stage
            .stages()
            .iter()
            .map(|&stage| (stage, self.shell.generate_stage(&request, stage)))
            .collect();

        match &self.output {
            Some(dir) => write_scripts(dir, self.shell, &rendered),
            None => {
                print_scripts(&rendered);
                Ok(())
            }
        }
    }
}

fn print_scripts(rendered: &[(Stage, String)]) {
    let multiple = rendered.len() > 1;
    for (index, (stage, script)) in rendered.iter().enumerate() {
        if multiple {
            if index > 0 {
                println!();
            }
            println!("# ---- {stage} ----");
        }
        print!("{script}");
    }
}

fn write_scripts(dir: &Path, shell: Dialect, rendered: &[(Stage, String)]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create '{}'", dir.display()))?;

    for (stage, script) in rendered {
        let path = dir.join(format!("{stage}.{}", shell.extension()));
        std::fs::write(&path, script)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "wrote script");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_stage_selection() {
        assert_eq!(StageArg::All.stages(), &Stage::ALL);
        assert_eq!(StageArg::PostBuild.stages(), &[Stage::PostBuild]);
    }

    #[test]
    fn test_write_scripts() {
        let build = Build::from_str(
            r#"
            id = 1
            repo_url = "https://example.com/app.git"
            sha = "deadbeefdeadbeef"
            project_dir = "/builds/app"
            commands = "make"
            "#,
        )
        .unwrap();
        let request = ScriptRequest::new(&build, CompanionExecutable::unavailable());
        let rendered: Vec<_> = Stage::ALL
            .iter()
            .map(|&stage| (stage, Dialect::Bash.generate_stage(&request, stage)))
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scripts");
        write_scripts(&out, Dialect::Bash, &rendered).unwrap();

        let build_script = std::fs::read_to_string(out.join("build.sh")).unwrap();
        assert!(build_script.ends_with("cd /builds/app\necho $'\\e[32;1m$ make\\e[0;m'\nmake\n"));
        assert!(out.join("pre-build.sh").exists());
        assert!(out.join("post-build.sh").exists());
    }
}
