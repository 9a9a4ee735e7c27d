//! Bash rendering of shell instructions.

use ciscript_build::BuildVariable;
use ciscript_shell::{ShellWriter, builder::ScriptBuilder};

use crate::quote::{ansi_c_escape, double_quote, quote};

const HEADER: &str = "#!/usr/bin/env bash\n\nset -eo pipefail\nset +o noclobber\n\n";

const ANSI_RESET: &str = r"\e[0;m";
const ANSI_BOLD_GREEN: &str = r"\e[32;1m";
const ANSI_YELLOW: &str = r"\e[0;33m";
const ANSI_BOLD_RED: &str = r"\e[31;1m";

/// Writes instructions as a bash script.
///
/// File variables are materialized under `temporary_dir`.
#[derive(Debug, Clone)]
pub struct BashWriter {
    builder: ScriptBuilder,
    temporary_dir: String,
}

impl BashWriter {
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

    fn echo(&mut self, color: &str, text: &str) {
        self.line(&format!(
            "echo $'{color}{}{ANSI_RESET}'",
            ansi_c_escape(text)
        ));
    }
}

impl ShellWriter for BashWriter {
    fn variable(&mut self, variable: &BuildVariable) {
        if variable.file {
            let file = self.absolute(&format!("{}/{}", self.temporary_dir, variable.key));
            let temporary_dir = double_quote(&self.temporary_dir);
            self.line(&format!("mkdir -p {temporary_dir}"));
            self.line(&format!(
                "echo -n {} > {}",
                quote(&variable.value),
                double_quote(&file)
            ));
            self.line(&format!("export {}={}", quote(&variable.key), double_quote(&file)));
        } else {
            self.line(&format!(
                "export {}={}",
                quote(&variable.key),
                quote(&variable.value)
            ));
        }
    }

    fn command(&mut self, command: &str, arguments: &[&str]) {
        let mut words = vec![quote(command)];
        words.extend(arguments.iter().map(|argument| quote(argument)));
        self.line(&words.join(" "));
    }

    fn line(&mut self, text: &str) {
        self.builder.push_line(text);
    }

    fn if_directory(&mut self, path: &str) {
        self.line(&format!("if [[ -d {} ]]; then", double_quote(path)));
        self.builder.push_indent();
    }

    fn if_file(&mut self, path: &str) {
        self.line(&format!("if [[ -e {} ]]; then", double_quote(path)));
        self.builder.push_indent();
    }

    fn otherwise(&mut self) {
        self.builder.push_dedent();
        self.line("else");
        self.builder.push_indent();
    }

    fn end_if(&mut self) {
        self.builder.push_dedent();
        self.line("fi");
    }

    fn cd(&mut self, path: &str) {
        self.command("cd", &[path]);
    }

    fn rm_dir(&mut self, path: &str) {
        self.command("rm", &["-r", "-f", path]);
    }

    fn rm_file(&mut self, path: &str) {
        self.command("rm", &["-f", path]);
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("$PWD/{path}")
        }
    }

    fn print(&mut self, text: &str) {
        self.line(&format!("echo $'{ANSI_RESET}{}'", ansi_c_escape(text)));
    }

    fn notice(&mut self, text: &str) {
        self.echo(ANSI_BOLD_GREEN, text);
    }

    fn warning(&mut self, text: &str) {
        self.echo(ANSI_YELLOW, text);
    }

    fn error(&mut self, text: &str) {
        self.echo(ANSI_BOLD_RED, text);
    }

    fn empty_line(&mut self) {
        self.line("echo");
    }
}
