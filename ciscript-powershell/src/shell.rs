use ciscript_shell::{ScriptRequest, Shell, ShellConfiguration};

use crate::PowerShellWriter;

/// Renders build scripts for PowerShell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShellShell;

impl Shell for PowerShellShell {
    type Writer = PowerShellWriter;

    fn name(&self) -> &'static str {
        "powershell"
    }

    fn extension(&self) -> &'static str {
        "ps1"
    }

    fn configuration(&self) -> ShellConfiguration {
        ShellConfiguration {
            command: "powershell".to_string(),
            arguments: ["-noprofile", "-noninteractive", "-executionpolicy", "Bypass", "-command"]
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        }
    }

    fn writer(&self, request: &ScriptRequest<'_>) -> PowerShellWriter {
        PowerShellWriter::new(request.build.temporary_dir())
    }

    fn finish(&self, writer: PowerShellWriter) -> String {
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ciscript_build::Build;
    use ciscript_shell::CompanionExecutable;

    use super::*;

    fn build(extra: &str) -> Build {
        Build::from_str(&format!(
            r#"
            id = 5
            name = "test"
            token = "tok"
            repo_url = "https://example.com/app.git"
            sha = "cafebabecafebabecafebabe"
            ref_name = "main"
            project_dir = "C:/builds/app"
            {extra}
            "#
        ))
        .unwrap()
    }

    #[test]
    fn test_pre_build_clone() {
        let build = build("");
        let request = ScriptRequest::new(&build, CompanionExecutable::new("helper.exe"));
        let script = PowerShellShell.generate(&request);

        assert!(script.pre_build.starts_with("$ErrorActionPreference = \"Stop\"\n\n"));
        assert!(script.pre_build.contains("$CI=\"true\"\n$env:CI=$CI\n"));
        assert!(script.pre_build.contains(
            "& \"git\" \"clone\" \"https://example.com/app.git\" \"C:/builds/app\"\n\
             if(!$?) { Exit $LASTEXITCODE }\n"
        ));
        assert!(
            script
                .pre_build
                .contains("Write-Host \"Checking out cafebabe as main...\" -ForegroundColor Green\n")
        );
    }

    #[test]
    fn test_fetch_conditional() {
        let build = build("allow_git_fetch = true");
        let request = ScriptRequest::new(&build, CompanionExecutable::new("helper.exe"));
        let script = PowerShellShell.generate(&request);

        assert!(
            script
                .pre_build
                .contains("if(Test-Path \"C:/builds/app/.git\" -PathType Container) {\n")
        );
        assert!(script.pre_build.contains("} else {\n"));
    }

    #[test]
    fn test_post_build_ca_file_is_absolute() {
        let build = build("tls_ca_chain = \"CERT\"");
        let request = ScriptRequest::new(&build, CompanionExecutable::new("helper.exe"));
        let script = PowerShellShell.generate_stage(&request, ciscript_shell::Stage::PostBuild);

        let cd = script.find("cd \"C:/builds/app\"\n").unwrap();
        let ca = script
            .find("Set-Content \"C:/builds/app.tmp/CI_SERVER_TLS_CA_FILE\"")
            .unwrap();
        assert!(cd < ca);
        assert!(!script.contains("$pwd"));
    }

    #[test]
    fn test_build_stage_echoes_commands() {
        let build = build("commands = \"make test\"");
        let request = ScriptRequest::new(&build, CompanionExecutable::unavailable());
        let script = PowerShellShell.generate_stage(&request, ciscript_shell::Stage::Build);

        assert!(script.ends_with(
            "Write-Host \"`$ make test\" -ForegroundColor Green\nmake test\n"
        ));
    }
}
