//! Build description model for ciscript.
//!
//! A [`Build`] is the read-only description of one CI build: where the
//! repository lives, which commit to check out, the user's commands, the
//! cache and artifact feature options, and the builds it depends on.
//! Script generators consume it without ever mutating it.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod archive;
mod build;
mod cache;
mod error;
mod parse;
mod variable;

pub use archive::ArchiveConfig;
pub use build::{ArtifactsFile, Build, DependencyBuild, RunnerConfig};
pub use cache::{CachePaths, FALLBACK_CACHE_REF};
pub use error::{Error, Result, SourceContext};
pub use variable::BuildVariable;
