//! Snapshot tests for generated bash scripts.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use ciscript_bash::{BashShell, Shell, ShellScript, Stage};
use ciscript_build::Build;
use ciscript_shell::{CompanionExecutable, ScriptRequest};

const BUILD: &str = r#"
id = 42
name = "rspec"
token = "build-token"
repo_url = "https://example.com/group/app.git"
sha = "0123456789abcdef0123456789abcdef01234567"
ref_name = "main"
allow_git_fetch = true
project_dir = "/builds/app"
cache_dir = "/cache"
network = true
tls_ca_chain = "CERT"
commands = """
bundle install

bundle exec rspec
"""

[runner]
url = "https://ci.example.com/"

[[variables]]
key = "RAILS_ENV"
value = "test"
public = true

[options.cache]
paths = ["vendor/bundle"]

[options.artifacts]
paths = ["coverage"]
untracked = true

[[depends_on_builds]]
id = 41
name = "compile"
token = "dep-token"
artifacts = { filename = "compile.zip" }
"#;

fn generate(build_toml: &str, companion: &str) -> ShellScript {
    let build = Build::from_str(build_toml).expect("Failed to parse build");
    let request = ScriptRequest::new(&build, CompanionExecutable::new(companion));
    BashShell.generate(&request)
}

#[test]
fn test_pre_build_script() {
    let script = generate(BUILD, "ci-helper");
    insta::assert_snapshot!("pre_build", script.pre_build);
}

#[test]
fn test_build_script() {
    let script = generate(BUILD, "ci-helper");
    insta::assert_snapshot!("build", script.build);
}

#[test]
fn test_post_build_script() {
    let script = generate(BUILD, "ci-helper");
    insta::assert_snapshot!("post_build", script.post_build);
}

#[test]
fn test_stage_matches_generate() {
    let build = Build::from_str(BUILD).unwrap();
    let request = ScriptRequest::new(&build, CompanionExecutable::new("ci-helper"));
    let script = BashShell.generate(&request);

    for stage in Stage::ALL {
        assert_eq!(BashShell.generate_stage(&request, stage), script.stage(stage));
    }
}

#[test]
fn test_without_companion_degrades_to_warnings() {
    let script = generate(BUILD, "");

    assert!(!script.pre_build.contains("extract"));
    assert!(
        script
            .pre_build
            .contains(r"echo $'\e[0;33mThe artifacts downloading is not supported in this executor.\e[0;m'")
    );
    assert!(
        script
            .post_build
            .contains(r"echo $'\e[0;33mThe cache is not supported in this executor.\e[0;m'")
    );
    assert!(!script.post_build.contains("archive --file"));
}

#[test]
fn test_clone_only() {
    let build = BUILD.replace("allow_git_fetch = true", "allow_git_fetch = false");
    let script = generate(&build, "ci-helper");

    assert!(!script.pre_build.contains("if [[ -d"));
    assert!(
        script
            .pre_build
            .contains("rm -r -f /builds/app\ngit clone https://example.com/group/app.git /builds/app\ncd /builds/app\n")
    );
}

#[test]
fn test_post_build_ca_file_stays_outside_checkout() {
    let script = generate(BUILD, "ci-helper").post_build;

    let cd = script.find("cd /builds/app\n").unwrap();
    let ca = script
        .find("echo -n CERT > \"/builds/app.tmp/CI_SERVER_TLS_CA_FILE\"\n")
        .unwrap();
    let archive = script.find("ci-helper archive --file artifacts.zip").unwrap();
    assert!(cd < ca && ca < archive);
    assert!(!script.contains("$PWD"));
}

#[test]
fn test_relative_project_dir_is_rejected() {
    let build = BUILD.replace("project_dir = \"/builds/app\"", "project_dir = \"builds/app\"");
    assert!(Build::from_str(&build).is_err());
}

#[test]
fn test_shell_metadata() {
    assert_eq!(BashShell.name(), "bash");
    assert_eq!(BashShell.extension(), "sh");
    assert_eq!(BashShell.configuration().command, "bash");
    assert_eq!(BashShell.supported_options(), &["artifacts", "cache"]);
    assert!(BashShell.features().cache);
}
