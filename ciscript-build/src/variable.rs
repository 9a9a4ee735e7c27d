use serde::Deserialize;

/// A variable exported into the generated script.
///
/// `file` means the value has to be materialized on disk and the variable
/// holds the file's path instead of its content. `internal` variables are
/// exported but kept out of any user-facing variable listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildVariable {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub file: bool,
}

impl BuildVariable {
    /// A plain public variable.
    pub fn public(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            public: true,
            internal: false,
            file: false,
        }
    }

    /// A public, internal variable whose value is written to a file.
    pub fn internal_file(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            public: true,
            internal: true,
            file: true,
        }
    }
}
