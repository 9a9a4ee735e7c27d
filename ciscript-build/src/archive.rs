//! Archive options for the `cache` and `artifacts` features.

use toml::Value;

/// What to put into a cache or artifacts archive.
///
/// Feature options arrive as free-form values; [`ArchiveConfig::from_value`]
/// is the single place where their shape is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Path patterns, in declared order.
    pub paths: Vec<String>,
    /// Whether untracked files are archived too.
    pub untracked: bool,
}

impl ArchiveConfig {
    /// Interpret a feature option value.
    ///
    /// Returns `None` when the value is not a table, meaning the feature is
    /// not configured. Non-string path entries and a non-boolean `untracked`
    /// are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let table = value.as_table()?;

        let paths = table
            .get("paths")
            .and_then(Value::as_array)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let untracked = table
            .get("untracked")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(Self { paths, untracked })
    }

    /// Returns true if archiving with this config would select nothing.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && !self.untracked
    }

    /// Companion executable arguments selecting the archive contents.
    pub fn selection_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for path in &self.paths {
            args.push("--path".to_string());
            args.push(path.clone());
        }
        if self.untracked {
            args.push("--untracked".to_string());
        }
        args
    }
}
