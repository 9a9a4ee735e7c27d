//! The build aggregate.

use indexmap::IndexMap;
use serde::Deserialize;
use toml::Value;

use crate::{
    ArchiveConfig, BuildVariable, CachePaths,
    cache::{CACHE_ARCHIVE, FALLBACK_CACHE_REF, join_clean},
};

/// Connection details of the runner executing the build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    /// URL of the controlling server
    #[serde(default)]
    pub url: String,
    /// Disables echoing of each command before it runs
    #[serde(default)]
    pub disable_verbose: Option<bool>,
}

impl RunnerConfig {
    /// Whether commands are echoed before they run (on unless disabled).
    pub fn verbose(&self) -> bool {
        !self.disable_verbose.unwrap_or(false)
    }
}

/// Artifact archive produced by a dependency.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactsFile {
    #[serde(default)]
    pub filename: String,
}

/// A build whose artifacts this build consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyBuild {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub artifacts: Option<ArtifactsFile>,
}

impl DependencyBuild {
    /// The artifact archive filename, if the dependency produced one.
    pub fn artifacts_filename(&self) -> Option<&str> {
        self.artifacts
            .as_ref()
            .map(|artifacts| artifacts.filename.as_str())
            .filter(|filename| !filename.is_empty())
    }
}

/// Read-only description of a single build.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Build token, used to authenticate artifact uploads
    #[serde(default)]
    pub token: String,
    pub repo_url: String,
    /// Full commit hash to check out
    pub sha: String,
    /// Branch or tag name, for display and cache keys only
    #[serde(default)]
    pub ref_name: String,
    #[serde(default)]
    pub tag: bool,
    /// Reuse an existing checkout by fetching instead of cloning
    #[serde(default)]
    pub allow_git_fetch: bool,
    /// The user's commands, one per line
    #[serde(default)]
    pub commands: String,
    /// Directory the repository is checked out into
    pub project_dir: String,
    #[serde(default)]
    pub cache_dir: Option<String>,
    /// Whether results are reported back to a controlling server
    #[serde(default)]
    pub network: bool,
    /// PEM bundle of trusted certificates, possibly empty
    #[serde(default)]
    pub tls_ca_chain: String,
    #[serde(default)]
    pub variables: Vec<BuildVariable>,
    /// Per-feature options such as `cache` and `artifacts`
    #[serde(default)]
    pub options: IndexMap<String, Value>,
    #[serde(default)]
    pub depends_on_builds: Vec<DependencyBuild>,
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl Build {
    /// The abbreviated commit hash shown in messages.
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(8) {
            Some((end, _)) => &self.sha[..end],
            None => &self.sha,
        }
    }

    /// The repository metadata directory inside the project directory.
    pub fn git_dir(&self) -> String {
        join_clean(&[&self.project_dir, ".git"])
    }

    /// Scratch directory for file variables, next to the project directory.
    pub fn temporary_dir(&self) -> String {
        format!("{}.tmp", self.project_dir.trim_end_matches('/'))
    }

    /// Predefined variables followed by the declared ones, in order.
    pub fn all_variables(&self) -> Vec<BuildVariable> {
        let mut variables = vec![
            BuildVariable::public("CI", "true"),
            BuildVariable::public("CI_BUILD_REF", &self.sha),
            BuildVariable::public("CI_BUILD_REF_NAME", &self.ref_name),
            BuildVariable::public("CI_BUILD_ID", self.id.to_string()),
            BuildVariable::public("CI_BUILD_REPO", &self.repo_url),
            BuildVariable::public("CI_BUILD_NAME", &self.name),
        ];
        if self.tag {
            variables.push(BuildVariable::public("CI_BUILD_TAG", &self.ref_name));
        }
        variables.push(BuildVariable::public("CI_PROJECT_DIR", &self.project_dir));
        variables.push(BuildVariable::public("CI_SERVER", "yes"));

        variables.extend(self.variables.iter().cloned());
        variables
    }

    /// Archive options of a feature, `None` when it is not configured.
    pub fn archive_config(&self, feature: &str) -> Option<ArchiveConfig> {
        self.options.get(feature).and_then(ArchiveConfig::from_value)
    }

    /// The cache archive path for builds of `ref_name`.
    ///
    /// Returns `None` when no cache directory is configured.
    pub fn cache_file_for_ref(&self, ref_name: &str) -> Option<String> {
        let cache_dir = self.cache_dir.as_deref().filter(|dir| !dir.is_empty())?;

        let key = self
            .options
            .get("cache")
            .and_then(Value::as_table)
            .and_then(|cache| cache.get("key"))
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/{}", self.name, ref_name));

        Some(join_clean(&[cache_dir, &key, CACHE_ARCHIVE]))
    }

    /// The cache archive path for this build. Tag builds have no cache.
    pub fn cache_file(&self) -> Option<String> {
        if self.tag {
            return None;
        }
        self.cache_file_for_ref(&self.ref_name)
    }

    /// Cache archives to restore from, own ref first.
    pub fn cache_paths(&self) -> CachePaths {
        CachePaths::new(
            self.cache_file(),
            self.cache_file_for_ref(FALLBACK_CACHE_REF),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const BASE: &str = r#"
        id = 7
        name = "rspec"
        repo_url = "https://example.com/group/app.git"
        sha = "1234567890abcdef1234567890abcdef12345678"
        ref_name = "feature"
        project_dir = "/builds/app"
    "#;

    fn build(extra: &str) -> Build {
        Build::from_str(&format!("{BASE}\n{extra}")).unwrap()
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(build("").short_sha(), "12345678");

        let mut short = build("");
        short.sha = "abc".to_string();
        assert_eq!(short.short_sha(), "abc");
    }

    #[test]
    fn test_verbose_default() {
        assert!(build("").runner.verbose());
        assert!(!build("[runner]\ndisable_verbose = true").runner.verbose());
        assert!(build("[runner]\ndisable_verbose = false").runner.verbose());
    }

    #[test]
    fn test_dirs() {
        let build = build("");
        assert_eq!(build.git_dir(), "/builds/app/.git");
        assert_eq!(build.temporary_dir(), "/builds/app.tmp");
    }

    #[test]
    fn test_all_variables_order() {
        let build = build(
            r#"
            [[variables]]
            key = "B"
            value = "2"

            [[variables]]
            key = "A"
            value = "1"
            public = true
            "#,
        );
        let keys: Vec<_> = build
            .all_variables()
            .into_iter()
            .map(|variable| variable.key)
            .collect();

        assert_eq!(
            keys,
            vec![
                "CI",
                "CI_BUILD_REF",
                "CI_BUILD_REF_NAME",
                "CI_BUILD_ID",
                "CI_BUILD_REPO",
                "CI_BUILD_NAME",
                "CI_PROJECT_DIR",
                "CI_SERVER",
                "B",
                "A",
            ]
        );
    }

    #[test]
    fn test_tag_variable() {
        let build = build("tag = true");
        assert!(
            build
                .all_variables()
                .iter()
                .any(|variable| variable.key == "CI_BUILD_TAG" && variable.value == "feature")
        );
    }

    #[test]
    fn test_no_cache_dir() {
        assert!(build("").cache_paths().is_empty());
        assert!(build("cache_dir = \"\"").cache_paths().is_empty());
    }

    #[test]
    fn test_cache_paths() {
        let paths = build("cache_dir = \"/cache\"").cache_paths();
        assert_eq!(
            paths.primary.as_deref(),
            Some("/cache/rspec/feature/cache.zip")
        );
        assert_eq!(
            paths.secondary.as_deref(),
            Some("/cache/rspec/master/cache.zip")
        );
    }

    #[test]
    fn test_tag_build_only_uses_fallback() {
        let paths = build("tag = true\ncache_dir = \"/cache\"").cache_paths();
        assert_eq!(
            paths.primary.as_deref(),
            Some("/cache/rspec/master/cache.zip")
        );
        assert_eq!(paths.secondary, None);
    }

    #[test]
    fn test_cache_key_option() {
        let paths = build("cache_dir = \"/cache\"\n[options.cache]\nkey = \"shared\"").cache_paths();
        assert_eq!(paths.primary.as_deref(), Some("/cache/shared/cache.zip"));
        assert_eq!(paths.secondary, None);
    }

    #[test]
    fn test_archive_config_lookup() {
        let build = build("[options]\ncache = \"vendor\"\nartifacts = { paths = [\"dist\"] }");
        assert_eq!(build.archive_config("cache"), None);
        assert_eq!(build.archive_config("missing"), None);
        assert_eq!(
            build.archive_config("artifacts"),
            Some(ArchiveConfig {
                paths: vec!["dist".to_string()],
                untracked: false,
            })
        );
    }

    #[test]
    fn test_dependency_filename() {
        let build = build(
            r#"
            [[depends_on_builds]]
            id = 1
            artifacts = { filename = "a.zip" }

            [[depends_on_builds]]
            id = 2
            artifacts = { filename = "" }

            [[depends_on_builds]]
            id = 3
            "#,
        );
        let filenames: Vec<_> = build
            .depends_on_builds
            .iter()
            .map(DependencyBuild::artifacts_filename)
            .collect();
        assert_eq!(filenames, vec![Some("a.zip"), None, None]);
    }
}
