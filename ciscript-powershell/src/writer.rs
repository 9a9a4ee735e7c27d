//! PowerShell rendering of shell instructions.

use ciscript_build::BuildVariable;
use ciscript_shell::{ShellWriter, builder::ScriptBuilder};

const HEADER: &str = "$ErrorActionPreference = \"Stop\"\n\n";
const CHECK_EXIT: &str = "if(!$?) { Exit $LASTEXITCODE }";

/// Writes instructions as a PowerShell script.
#[derive(Debug, Clone)]
pub struct PowerShellWriter {
    builder: ScriptBuilder,
    temporary_dir: String,
}

impl PowerShellWriter {
    pub fn new(temporary_dir: impl Into<String>) -> Self {
        Self {
            builder: ScriptBuilder::default(),
            temporary_dir: temporary_dir.into(),
        }
    }

    /// The script body written so far, without the header.
    pub fn body(&self) -> &str {
        self.builder.as_str()
    }

    /// Consume the writer and return the complete script.
    pub fn finish(self) -> String {
        let mut script = String::from(HEADER);
        script.push_str(&self.builder.build());
        script
    }

    fn check_exit(&mut self) {
        self.line(CHECK_EXIT);
    }

    fn write_host(&mut self, text: &str, color: &str) {
        self.line(&format!(
            "Write-Host {} -ForegroundColor {color}",
            quote(text)
        ));
    }
}

/// Double-quote a literal, escaping everything PowerShell would expand.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '`' | '"' | '$') {
            quoted.push('`');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Double-quote a path that may start with a `$pwd` expansion.
fn quote_path(path: &str) -> String {
    match path.strip_prefix("$pwd") {
        Some(rest) => format!("\"$pwd{}", &quote(rest)[1..]),
        None => quote(path),
    }
}

impl ShellWriter for PowerShellWriter {
    fn variable(&mut self, variable: &BuildVariable) {
        let key = &variable.key;
        if variable.file {
            let file = self.absolute(&format!("{}/{}", self.temporary_dir, key));
            let temporary_dir = quote(&self.temporary_dir);
            self.line(&format!("md {temporary_dir} -Force | out-null"));
            self.line(&format!(
                "Set-Content {} -Value {} -Encoding UTF8 -Force",
                quote_path(&file),
                quote(&variable.value)
            ));
            self.line(&format!("${key}={}", quote_path(&file)));
        } else {
            self.line(&format!("${key}={}", quote(&variable.value)));
        }
        self.line(&format!("$env:{key}=${key}"));
    }

    fn command(&mut self, command: &str, arguments: &[&str]) {
        let mut words = vec!["&".to_string(), quote(command)];
        words.extend(arguments.iter().map(|argument| quote(argument)));
        self.line(&words.join(" "));
        self.check_exit();
    }

    fn line(&mut self, text: &str) {
        self.builder.push_line(text);
    }

    fn if_directory(&mut self, path: &str) {
        self.line(&format!("if(Test-Path {} -PathType Container) {{", quote(path)));
        self.builder.push_indent();
    }

    fn if_file(&mut self, path: &str) {
        self.line(&format!("if(Test-Path {} -PathType Leaf) {{", quote(path)));
        self.builder.push_indent();
    }

    fn otherwise(&mut self) {
        self.builder.push_dedent();
        self.line("} else {");
        self.builder.push_indent();
    }

    fn end_if(&mut self) {
        self.builder.push_dedent();
        self.line("}");
    }

    fn cd(&mut self, path: &str) {
        self.line(&format!("cd {}", quote(path)));
        self.check_exit();
    }

    fn rm_dir(&mut self, path: &str) {
        self.line(&format!(
            "Remove-Item -Force -Recurse -ErrorAction SilentlyContinue {}",
            quote(path)
        ));
    }

    fn rm_file(&mut self, path: &str) {
        self.line(&format!(
            "Remove-Item -Force -ErrorAction SilentlyContinue {}",
            quote(path)
        ));
    }

    fn absolute(&self, path: &str) -> String {
        let bytes = path.as_bytes();
        let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
        if drive || path.starts_with('/') || path.starts_with('\\') {
            path.to_string()
        } else {
            format!("$pwd/{path}")
        }
    }

    fn print(&mut self, text: &str) {
        self.line(&format!("echo {}", quote(text)));
    }

    fn notice(&mut self, text: &str) {
        self.write_host(text, "Green");
    }

    fn warning(&mut self, text: &str) {
        self.write_host(text, "Yellow");
    }

    fn error(&mut self, text: &str) {
        self.write_host(text, "Red");
    }

    fn empty_line(&mut self) {
        self.line("echo \"\"");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("$HOME \"x\" `y`"), "\"`$HOME `\"x`\" ``y``\"");
    }

    #[test]
    fn test_plain_variable() {
        let mut w = PowerShellWriter::new("app.tmp");
        w.variable(&BuildVariable::public("NAME", "value"));
        assert_eq!(w.body(), "$NAME=\"value\"\n$env:NAME=$NAME\n");
    }

    #[test]
    fn test_file_variable_relative() {
        let mut w = PowerShellWriter::new("app.tmp");
        w.variable(&BuildVariable::internal_file("CA", "CERT"));
        assert_eq!(
            w.body(),
            "md \"app.tmp\" -Force | out-null\n\
             Set-Content \"$pwd/app.tmp/CA\" -Value \"CERT\" -Encoding UTF8 -Force\n\
             $CA=\"$pwd/app.tmp/CA\"\n\
             $env:CA=$CA\n"
        );
    }

    #[test]
    fn test_file_variable_drive_path() {
        let mut w = PowerShellWriter::new("C:/builds/app.tmp");
        w.variable(&BuildVariable::internal_file("CA", "CERT"));
        assert!(w.body().contains("$CA=\"C:/builds/app.tmp/CA\"\n"));
    }

    #[test]
    fn test_command_checks_exit_code() {
        let mut w = PowerShellWriter::new("app.tmp");
        w.command("git", &["fetch", "origin"]);
        assert_eq!(
            w.body(),
            "& \"git\" \"fetch\" \"origin\"\nif(!$?) { Exit $LASTEXITCODE }\n"
        );
    }

    #[test]
    fn test_conditionals() {
        let mut w = PowerShellWriter::new("app.tmp");
        w.if_file("cache.zip");
        w.notice("found");
        w.otherwise();
        w.warning("missing");
        w.end_if();
        assert_eq!(
            w.body(),
            "if(Test-Path \"cache.zip\" -PathType Leaf) {\n  \
             Write-Host \"found\" -ForegroundColor Green\n\
             } else {\n  \
             Write-Host \"missing\" -ForegroundColor Yellow\n\
             }\n"
        );
    }

    #[test]
    fn test_messages() {
        let mut w = PowerShellWriter::new("app.tmp");
        w.print("plain");
        w.error("boom");
        w.empty_line();
        assert_eq!(
            w.body(),
            "echo \"plain\"\nWrite-Host \"boom\" -ForegroundColor Red\necho \"\"\n"
        );
    }
}
