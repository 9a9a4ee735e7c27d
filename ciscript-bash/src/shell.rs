use ciscript_shell::{Shell, ShellConfiguration, ScriptRequest};

use crate::BashWriter;

/// Renders build scripts for bash.
#[derive(Debug, Clone, Copy, Default)]
pub struct BashShell;

impl Shell for BashShell {
    type Writer = BashWriter;

    fn name(&self) -> &'static str {
        "bash"
    }

    fn extension(&self) -> &'static str {
        "sh"
    }

    fn configuration(&self) -> ShellConfiguration {
        ShellConfiguration {
            command: "bash".to_string(),
            arguments: vec!["--login".to_string()],
        }
    }

    fn writer(&self, request: &ScriptRequest<'_>) -> BashWriter {
        BashWriter::new(request.build.temporary_dir())
    }

    fn finish(&self, writer: BashWriter) -> String {
        writer.finish()
    }
}
