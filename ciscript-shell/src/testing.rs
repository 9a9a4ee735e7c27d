//! Test utilities for script generation.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use ciscript_build::BuildVariable;

use crate::ShellWriter;

/// A single recorded [`ShellWriter`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Variable(BuildVariable),
    Command { command: String, arguments: Vec<String> },
    Line(String),
    IfDirectory(String),
    IfFile(String),
    Else,
    EndIf,
    Cd(String),
    RmDir(String),
    RmFile(String),
    Print(String),
    Notice(String),
    Warning(String),
    Error(String),
    EmptyLine,
}

impl Instruction {
    /// Shorthand for a command instruction.
    pub fn command(command: &str, arguments: &[&str]) -> Self {
        Self::Command {
            command: command.to_string(),
            arguments: arguments.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// A [`ShellWriter`] that records every instruction it receives.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub instructions: Vec<Instruction>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exported variables, in order.
    pub fn variables(&self) -> Vec<&BuildVariable> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Variable(variable) => Some(variable),
                _ => None,
            })
            .collect()
    }

    /// Commands as `name arg arg...` strings, in order.
    pub fn commands(&self) -> Vec<String> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Command { command, arguments } => {
                    let mut parts = vec![command.clone()];
                    parts.extend(arguments.iter().cloned());
                    Some(parts.join(" "))
                }
                _ => None,
            })
            .collect()
    }

    /// Text of every warning, in order.
    pub fn warnings(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Warning(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first instruction equal to `instruction`.
    pub fn position(&self, instruction: &Instruction) -> Option<usize> {
        self.instructions.iter().position(|i| i == instruction)
    }

    /// Instructions after the first `cd`, i.e. past the shared preamble.
    pub fn after_cd(&self) -> &[Instruction] {
        let start = self
            .instructions
            .iter()
            .position(|i| matches!(i, Instruction::Cd(_)))
            .map_or(0, |index| index + 1);
        &self.instructions[start..]
    }
}

impl ShellWriter for Recorder {
    fn variable(&mut self, variable: &BuildVariable) {
        self.instructions
            .push(Instruction::Variable(variable.clone()));
    }

    fn command(&mut self, command: &str, arguments: &[&str]) {
        self.instructions
            .push(Instruction::command(command, arguments));
    }

    fn line(&mut self, text: &str) {
        self.instructions.push(Instruction::Line(text.to_string()));
    }

    fn if_directory(&mut self, path: &str) {
        self.instructions
            .push(Instruction::IfDirectory(path.to_string()));
    }

    fn if_file(&mut self, path: &str) {
        self.instructions.push(Instruction::IfFile(path.to_string()));
    }

    fn otherwise(&mut self) {
        self.instructions.push(Instruction::Else);
    }

    fn end_if(&mut self) {
        self.instructions.push(Instruction::EndIf);
    }

    fn cd(&mut self, path: &str) {
        self.instructions.push(Instruction::Cd(path.to_string()));
    }

    fn rm_dir(&mut self, path: &str) {
        self.instructions.push(Instruction::RmDir(path.to_string()));
    }

    fn rm_file(&mut self, path: &str) {
        self.instructions.push(Instruction::RmFile(path.to_string()));
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("$PWD/{path}")
        }
    }

    fn print(&mut self, text: &str) {
        self.instructions.push(Instruction::Print(text.to_string()));
    }

    fn notice(&mut self, text: &str) {
        self.instructions.push(Instruction::Notice(text.to_string()));
    }

    fn warning(&mut self, text: &str) {
        self.instructions.push(Instruction::Warning(text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.instructions.push(Instruction::Error(text.to_string()));
    }

    fn empty_line(&mut self) {
        self.instructions.push(Instruction::EmptyLine);
    }
}
