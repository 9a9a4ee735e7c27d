//! PowerShell dialect for ciscript build scripts.

mod shell;
mod writer;

pub use ciscript_shell::{Shell, ShellScript, Stage};
pub use shell::PowerShellShell;
pub use writer::PowerShellWriter;
