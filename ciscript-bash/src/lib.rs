//! Bash dialect for ciscript build scripts.

mod quote;
mod shell;
mod writer;

pub use ciscript_shell::{Shell, ShellScript, Stage};
pub use shell::BashShell;
pub use writer::BashWriter;
