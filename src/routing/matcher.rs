//! Path prefix matching.
//!
//! A prefix matches whole path segments only: `/api/payload` matches
//! `/api/payload` and `/api/payload/abc`, never `/api/payloads`.

#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        Self {
            prefix: if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() },
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }

    /// The part of `path` after the prefix: empty or starting with `/`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix == "/" {
            return path.starts_with('/').then_some(path);
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_boundaries() {
        let matcher = PathPrefixMatcher::new("/api/payload");
        assert!(matcher.matches("/api/payload"));
        assert!(matcher.matches("/api/payload/abc"));
        assert!(!matcher.matches("/api/payloads"));
        assert!(!matcher.matches("/api"));
    }

    #[test]
    fn test_strip() {
        let matcher = PathPrefixMatcher::new("/api/platform/");
        assert_eq!(matcher.prefix(), "/api/platform");
        assert_eq!(matcher.strip("/api/platform"), Some(""));
        assert_eq!(matcher.strip("/api/platform/ping"), Some("/ping"));
        assert_eq!(matcher.strip("/other"), None);
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let matcher = PathPrefixMatcher::new("/");
        assert_eq!(matcher.strip("/anything"), Some("/anything"));
    }
}
