//! Shell-agnostic build script generation.
//!
//! This crate turns a [`Build`](ciscript_build::Build) into an ordered
//! sequence of abstract shell instructions. Concrete dialects (e.g.
//! `ciscript-bash`) implement [`ShellWriter`] to turn those instructions
//! into script text, and [`Shell`] to package the three stages.
//!
//! # Module Organization
//!
//! - [`builder`] - Line buffer with block indentation for writer implementations
//! - [`generator`] - The pre-build, build and post-build stage generators
//! - [`shell`] - Backend trait, stages and feature flags
//! - [`writer`] - The [`ShellWriter`] instruction capability
//! - [`testing`] - Instruction recorder (feature-gated)

pub mod builder;
pub mod generator;
pub mod shell;
pub mod writer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use generator::{CompanionExecutable, ScriptGenerator, ScriptRequest};
pub use shell::{Features, SUPPORTED_OPTIONS, Shell, ShellConfiguration, ShellScript, Stage};
pub use writer::ShellWriter;
