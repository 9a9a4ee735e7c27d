mod completions;
mod features;
mod render;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use features::FeaturesCommand;
use render::RenderCommand;

/// Extension trait for exiting on build description errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for ciscript_build::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "ciscript")]
#[command(version)]
#[command(about = "Generate CI build scripts from a build description")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Features(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the pre-build, build and post-build scripts of a build
    Render(RenderCommand),

    /// List the build options a shell dialect supports
    Features(FeaturesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
