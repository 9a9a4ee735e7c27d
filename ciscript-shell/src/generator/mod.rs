//! Build script generation.
//!
//! [`ScriptGenerator`] decides *what* a build needs and emits it through a
//! [`ShellWriter`]; the writer decides *how* it looks in a given dialect.
//! Checks that depend on the build host's filesystem (an existing checkout,
//! a cache archive) are emitted as conditionals, never evaluated here.

mod repository;
mod request;
mod transfer;

use ciscript_build::{Build, BuildVariable, CachePaths};
use tracing::debug;

pub use request::{CompanionExecutable, ScriptRequest};
use repository::{write_checkout, write_clone, write_fetch};
use transfer::{archive_files, download_artifacts, extract_files, upload_artifacts};

use crate::{ShellWriter, Stage};

/// Trust anchor variable read by git.
pub const GIT_SSL_CAINFO: &str = "GIT_SSL_CAINFO";
/// Trust anchor variable read by the companion executable's server client.
pub const CI_SERVER_TLS_CA_FILE: &str = "CI_SERVER_TLS_CA_FILE";
/// Archive the artifacts are collected into before upload.
pub const ARTIFACTS_ARCHIVE: &str = "artifacts.zip";

/// Generates the pre-build, build and post-build stages of a build script.
///
/// The generator is stateless; the three stages are expected to be rendered
/// in order by the caller, each through its own writer or one shared writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptGenerator;

impl ScriptGenerator {
    /// Emit the given stage.
    pub fn stage<W: ShellWriter + ?Sized>(
        &self,
        w: &mut W,
        request: &ScriptRequest<'_>,
        stage: Stage,
    ) {
        match stage {
            Stage::PreBuild => self.pre_build(w, request),
            Stage::Build => self.commands(w, request),
            Stage::PostBuild => self.post_build(w, request),
        }
    }

    /// Prepare the workspace: variables, repository, cache and dependency artifacts.
    pub fn pre_build<W: ShellWriter + ?Sized>(&self, w: &mut W, request: &ScriptRequest<'_>) {
        let build = request.build;
        debug!(build = build.id, "generating pre-build stage");

        write_exports(w, build);
        write_tls_ca_info(w, build, GIT_SSL_CAINFO);
        write_tls_ca_info(w, build, CI_SERVER_TLS_CA_FILE);

        if build.allow_git_fetch {
            write_fetch(w, build);
        } else {
            write_clone(w, build);
        }
        write_checkout(w, build);

        write_cache_restore(w, request);
        write_dependency_artifacts(w, request);
    }

    /// Run the user's commands line by line from the project directory.
    pub fn commands<W: ShellWriter + ?Sized>(&self, w: &mut W, request: &ScriptRequest<'_>) {
        let build = request.build;
        debug!(build = build.id, "generating build stage");

        write_exports(w, build);
        w.cd(&build.project_dir);

        let verbose = build.runner.verbose();
        for command in build.commands.trim().split('\n') {
            let command = command.trim();
            if verbose {
                if command.is_empty() {
                    w.empty_line();
                } else {
                    w.notice(&format!("$ {command}"));
                }
            }
            w.line(command);
        }
    }

    /// Archive the cache and upload the artifacts.
    pub fn post_build<W: ShellWriter + ?Sized>(&self, w: &mut W, request: &ScriptRequest<'_>) {
        let build = request.build;
        debug!(build = build.id, "generating post-build stage");

        write_exports(w, build);
        w.cd(&build.project_dir);
        write_tls_ca_info(w, build, CI_SERVER_TLS_CA_FILE);

        if let Some(cache_file) = build.cache_file() {
            archive_files(
                w,
                build.archive_config("cache").as_ref(),
                &request.companion,
                "cache",
                &cache_file,
            );
        }

        // Without a controlling server there is nobody to upload to
        if build.network {
            archive_files(
                w,
                build.archive_config("artifacts").as_ref(),
                &request.companion,
                "artifacts",
                ARTIFACTS_ARCHIVE,
            );

            w.if_file(ARTIFACTS_ARCHIVE);
            upload_artifacts(w, build, &request.companion, ARTIFACTS_ARCHIVE);
            w.rm_file(ARTIFACTS_ARCHIVE);
            w.end_if();
        }
    }
}

fn write_exports<W: ShellWriter + ?Sized>(w: &mut W, build: &Build) {
    for variable in build.all_variables() {
        w.variable(&variable);
    }
}

fn write_tls_ca_info<W: ShellWriter + ?Sized>(w: &mut W, build: &Build, key: &str) {
    if build.tls_ca_chain.is_empty() {
        return;
    }
    w.variable(&BuildVariable::internal_file(key, &build.tls_ca_chain));
}

/// Restore the own-ref cache, falling back to the fallback-ref cache.
fn write_cache_restore<W: ShellWriter + ?Sized>(w: &mut W, request: &ScriptRequest<'_>) {
    let CachePaths { primary, secondary } = request.build.cache_paths();
    let Some(primary) = primary else {
        return;
    };

    w.if_file(&primary);
    extract_files(w, &request.companion, "cache", &primary);
    if let Some(secondary) = secondary {
        w.otherwise();
        w.if_file(&secondary);
        extract_files(w, &request.companion, "cache", &secondary);
        w.end_if();
    }
    w.end_if();
}

fn write_dependency_artifacts<W: ShellWriter + ?Sized>(w: &mut W, request: &ScriptRequest<'_>) {
    let build = request.build;
    for dependency in &build.depends_on_builds {
        let Some(filename) = dependency.artifacts_filename() else {
            continue;
        };

        download_artifacts(w, &build.runner, dependency, &request.companion, filename);
        extract_files(w, &request.companion, &dependency.name, filename);
        w.rm_file(filename);
    }
}
