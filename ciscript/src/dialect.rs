//! Unified shell dialect dispatch.

use ciscript_bash::BashShell;
use ciscript_powershell::PowerShellShell;
use ciscript_shell::{ScriptRequest, Shell, ShellScript, Stage};
use clap::ValueEnum;

/// Shell dialects scripts can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    Bash,
    #[value(name = "powershell")]
    PowerShell,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bash => BashShell.name(),
            Self::PowerShell => PowerShellShell.name(),
        }
    }

    /// File extension without dot (e.g., "sh").
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bash => BashShell.extension(),
            Self::PowerShell => PowerShellShell.extension(),
        }
    }

    pub fn supported_options(self) -> &'static [&'static str] {
        match self {
            Self::Bash => BashShell.supported_options(),
            Self::PowerShell => PowerShellShell.supported_options(),
        }
    }

    pub fn generate(self, request: &ScriptRequest<'_>) -> ShellScript {
        match self {
            Self::Bash => BashShell.generate(request),
            Self::PowerShell => PowerShellShell.generate(request),
        }
    }

    pub fn generate_stage(self, request: &ScriptRequest<'_>, stage: Stage) -> String {
        match self {
            Self::Bash => BashShell.generate_stage(request, stage),
            Self::PowerShell => PowerShellShell.generate_stage(request, stage),
        }
    }
}
