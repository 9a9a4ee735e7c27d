//! Cache archive location.

/// Ref whose cache is used as a fallback when the build's own ref has none.
pub const FALLBACK_CACHE_REF: &str = "master";

/// Name of the cache archive inside a cache key directory.
pub(crate) const CACHE_ARCHIVE: &str = "cache.zip";

/// The cache archives a build may restore from.
///
/// `primary` is always tried first. `secondary` is only ever set together
/// with `primary`, and never equal to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachePaths {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl CachePaths {
    /// Order the build's own cache and the fallback-ref cache.
    pub fn new(own: Option<String>, fallback: Option<String>) -> Self {
        match (own, fallback) {
            (Some(own), Some(fallback)) if own == fallback => Self {
                primary: Some(own),
                secondary: None,
            },
            (Some(own), fallback) => Self {
                primary: Some(own),
                secondary: fallback,
            },
            (None, fallback) => Self {
                primary: fallback,
                secondary: None,
            },
        }
    }

    /// Returns true if there is nothing to restore.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}

/// Join path segments with `/`, dropping empty and `.` segments.
pub(crate) fn join_clean(parts: &[&str]) -> String {
    let absolute = parts.first().is_some_and(|first| first.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();
    for part in parts {
        for segment in part.split('/') {
            match segment {
                "" | "." => {}
                ".." if segments.last().is_some_and(|last| *last != "..") => {
                    segments.pop();
                }
                _ => segments.push(segment),
            }
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_paths() {
        let paths = CachePaths::new(Some("a".into()), Some("b".into()));
        assert_eq!(paths.primary.as_deref(), Some("a"));
        assert_eq!(paths.secondary.as_deref(), Some("b"));
    }

    #[test]
    fn test_fallback_is_promoted() {
        let paths = CachePaths::new(None, Some("b".into()));
        assert_eq!(paths.primary.as_deref(), Some("b"));
        assert_eq!(paths.secondary, None);
    }

    #[test]
    fn test_identical_paths_collapse() {
        let paths = CachePaths::new(Some("a".into()), Some("a".into()));
        assert_eq!(paths.primary.as_deref(), Some("a"));
        assert_eq!(paths.secondary, None);
    }

    #[test]
    fn test_neither() {
        assert!(CachePaths::new(None, None).is_empty());
    }

    #[test]
    fn test_join_clean() {
        assert_eq!(join_clean(&["cache/", "./app", "main", "cache.zip"]), "cache/app/main/cache.zip");
        assert_eq!(join_clean(&["/cache", "a/../b", "cache.zip"]), "/cache/b/cache.zip");
        assert_eq!(join_clean(&["cache", "feature//x", "cache.zip"]), "cache/feature/x/cache.zip");
    }
}
