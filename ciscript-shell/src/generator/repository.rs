//! Repository synchronization: clone, fetch and checkout.

use ciscript_build::Build;

use crate::ShellWriter;

pub(super) fn write_clone<W: ShellWriter + ?Sized>(w: &mut W, build: &Build) {
    w.notice("Cloning repository...");
    w.rm_dir(&build.project_dir);
    w.command("git", &["clone", build.repo_url.as_str(), build.project_dir.as_str()]);
    w.cd(&build.project_dir);
}

/// Fetch into an existing checkout, falling back to a clone at run time.
pub(super) fn write_fetch<W: ShellWriter + ?Sized>(w: &mut W, build: &Build) {
    w.if_directory(&build.git_dir());
    w.notice("Fetching changes...");
    w.cd(&build.project_dir);
    w.command("git", &["clean", "-ffdx"]);
    w.command("git", &["reset", "--hard"]);
    w.command("git", &["remote", "set-url", "origin", build.repo_url.as_str()]);
    w.command("git", &["fetch", "origin"]);
    w.otherwise();
    write_clone(w, build);
    w.end_if();
}

pub(super) fn write_checkout<W: ShellWriter + ?Sized>(w: &mut W, build: &Build) {
    w.notice(&format!(
        "Checking out {} as {}...",
        build.short_sha(),
        build.ref_name
    ));
    w.command("git", &["checkout", build.sha.as_str()]);
}
