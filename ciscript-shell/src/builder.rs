//! Line buffer used by shell writers.

/// One level of block nesting.
const INDENT: &str = "  ";

/// Accumulates script lines, indenting nested blocks by two spaces per level.
///
/// # Example
///
/// ```
/// use ciscript_shell::builder::ScriptBuilder;
///
/// let mut builder = ScriptBuilder::default();
/// builder
///     .push_line("if [[ -e cache.zip ]]; then")
///     .push_indent()
///     .push_line("echo found")
///     .push_dedent()
///     .push_line("fi");
///
/// assert_eq!(builder.build(), "if [[ -e cache.zip ]]; then\n  echo found\nfi\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    indent_level: usize,
    buffer: String,
}

impl ScriptBuilder {
    /// Add a line with current indentation.
    ///
    /// Empty lines are written without indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated script.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }
}
