//! Companion executable invocations: archive, extract, download and upload.
//!
//! Every helper degrades to a warning in the script when the companion
//! executable is unavailable. The build itself never fails because of it.

use ciscript_build::{ArchiveConfig, Build, DependencyBuild, RunnerConfig};
use tracing::debug;

use super::CompanionExecutable;
use crate::ShellWriter;

/// Archive the files selected by `config` into `archive_path`.
///
/// Nothing is emitted when the feature is not configured or selects no files.
pub(super) fn archive_files<W: ShellWriter + ?Sized>(
    w: &mut W,
    config: Option<&ArchiveConfig>,
    companion: &CompanionExecutable,
    archive_type: &str,
    archive_path: &str,
) {
    let Some(config) = config else {
        return;
    };
    // Checked before the companion: an empty selection stays silent even without one
    if config.is_empty() {
        return;
    }
    let Some(executable) = companion.path() else {
        debug!(archive_type, "companion executable unavailable, skipping archive");
        w.warning(&format!(
            "The {archive_type} is not supported in this executor."
        ));
        return;
    };

    let selection = config.selection_args();
    let mut args = vec!["archive", "--file", archive_path];
    args.extend(selection.iter().map(String::as_str));

    w.notice(&format!("Archiving {archive_type}..."));
    w.command(executable, &args);
}

pub(super) fn extract_files<W: ShellWriter + ?Sized>(
    w: &mut W,
    companion: &CompanionExecutable,
    archive_type: &str,
    archive_path: &str,
) {
    let Some(executable) = companion.path() else {
        debug!(archive_type, "companion executable unavailable, skipping extract");
        w.warning(&format!(
            "The {archive_type} is not supported in this executor."
        ));
        return;
    };

    w.notice(&format!("Restoring {archive_type}..."));
    w.command(executable, &["extract", "--file", archive_path]);
}

pub(super) fn download_artifacts<W: ShellWriter + ?Sized>(
    w: &mut W,
    runner: &RunnerConfig,
    dependency: &DependencyBuild,
    companion: &CompanionExecutable,
    archive_path: &str,
) {
    let Some(executable) = companion.path() else {
        debug!(dependency = dependency.id, "companion executable unavailable, skipping download");
        w.warning("The artifacts downloading is not supported in this executor.");
        return;
    };

    let id = dependency.id.to_string();
    w.notice(&format!(
        "Downloading artifacts for {} ({})...",
        dependency.name, dependency.id
    ));
    w.command(
        executable,
        &[
            "artifacts",
            "--download",
            "--url",
            runner.url.as_str(),
            "--token",
            dependency.token.as_str(),
            "--id",
            id.as_str(),
            "--file",
            archive_path,
        ],
    );
}

pub(super) fn upload_artifacts<W: ShellWriter + ?Sized>(
    w: &mut W,
    build: &Build,
    companion: &CompanionExecutable,
    archive_path: &str,
) {
    let Some(executable) = companion.path() else {
        debug!(build = build.id, "companion executable unavailable, skipping upload");
        w.warning("The artifacts uploading is not supported in this executor.");
        return;
    };

    let id = build.id.to_string();
    w.notice("Uploading artifacts...");
    w.command(
        executable,
        &[
            "artifacts",
            "--url",
            build.runner.url.as_str(),
            "--token",
            build.token.as_str(),
            "--id",
            id.as_str(),
            "--file",
            archive_path,
        ],
    );
}
