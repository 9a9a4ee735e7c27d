//! Build description parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{Build, Error, Result, SourceContext};

const DEFAULT_FILENAME: &str = "build.toml";

impl FromStr for Build {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_build(s, DEFAULT_FILENAME)
    }
}

impl Build {
    /// Parse a build description file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_build(&content, &path.display().to_string())
    }

    /// Parse a build description with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_build(content, filename)
    }
}

/// Parse a build description from content with the given filename for error reporting.
pub fn parse_build(content: &str, filename: &str) -> Result<Build> {
    let ctx = SourceContext::new(content, filename);
    let build: Build = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_build(&build, &ctx)?;
    Ok(build)
}

fn validate_build(build: &Build, ctx: &SourceContext) -> Result<()> {
    let required = [
        ("repo_url", &build.repo_url),
        ("sha", &build.sha),
        ("project_dir", &build.project_dir),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ctx.validation_error(format!("'{key}' must not be empty"), key));
        }
    }
    // File variables land in `<project_dir>.tmp`, which must not move with `cd`
    if !is_absolute_path(&build.project_dir) {
        return Err(ctx.validation_error(
            format!("'project_dir' must be an absolute path, got '{}'", build.project_dir),
            "project_dir",
        ));
    }
    Ok(())
}

/// Absolute in either dialect: `/x`, `\\x` or a drive letter like `C:/x`.
fn is_absolute_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    drive || path.starts_with('/') || path.starts_with('\\')
}
