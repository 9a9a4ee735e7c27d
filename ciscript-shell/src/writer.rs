//! The instruction capability every shell dialect provides.

use ciscript_build::BuildVariable;

/// Receives abstract instructions and renders them in one shell dialect.
///
/// Instructions arrive in script order. Conditional blocks are always
/// balanced: every `if_directory`/`if_file` is closed by exactly one
/// `end_if`, with at most one `otherwise` in between.
pub trait ShellWriter {
    /// Export a variable to every subsequent command.
    fn variable(&mut self, variable: &BuildVariable);

    /// Run an external command with arguments.
    fn command(&mut self, command: &str, arguments: &[&str]);

    /// Emit a line verbatim.
    fn line(&mut self, text: &str);

    /// Open a block that runs only if `path` is an existing directory.
    fn if_directory(&mut self, path: &str);

    /// Open a block that runs only if `path` is an existing file.
    fn if_file(&mut self, path: &str);

    /// Switch to the alternative branch of the innermost open block.
    fn otherwise(&mut self);

    /// Close the innermost open block.
    fn end_if(&mut self);

    fn cd(&mut self, path: &str);
    fn rm_dir(&mut self, path: &str);
    fn rm_file(&mut self, path: &str);

    /// Resolve `path` against the script's working directory.
    fn absolute(&self, path: &str) -> String;

    fn print(&mut self, text: &str);
    fn notice(&mut self, text: &str);
    fn warning(&mut self, text: &str);
    fn error(&mut self, text: &str);

    /// Print an empty line.
    fn empty_line(&mut self);
}
