use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{MatchedPath, Request};

/// Route templates that may be called without a token.
///
/// Keyed by the full matched path (e.g. `/api/v1/authentication/sign-in`),
/// as reported by axum's [`MatchedPath`]. A request that matched no route is
/// never anonymous.
#[derive(Clone, Debug, Default)]
pub struct AnonymousRoutes(Arc<HashSet<String>>);

impl AnonymousRoutes {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self(Arc::new(paths.into_iter().map(Into::into).collect()))
    }

    /// Joins module-relative paths onto the prefix the module is nested at.
    pub fn nested(prefix: &str, paths: &[&str]) -> Self {
        Self::new(paths.iter().map(|path| format!("{prefix}{path}")))
    }

    /// Union of two route sets.
    pub fn merge(&self, other: &AnonymousRoutes) -> Self {
        Self::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn is_anonymous(&self, req: &Request) -> bool {
        req.extensions()
            .get::<MatchedPath>()
            .is_some_and(|path| self.contains(path.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_prefixes_paths() {
        let routes = AnonymousRoutes::nested("/api/v1/authentication", &["/sign-in", "/sign-up-owner"]);

        assert!(routes.contains("/api/v1/authentication/sign-in"));
        assert!(routes.contains("/api/v1/authentication/sign-up-owner"));
        assert!(!routes.contains("/sign-in"));
    }

    #[test]
    fn test_merge_keeps_both_sides() {
        let a = AnonymousRoutes::new(["/a"]);
        let b = AnonymousRoutes::new(["/b"]);

        let merged = a.merge(&b);
        assert!(merged.contains("/a"));
        assert!(merged.contains("/b"));
    }

    #[test]
    fn test_unmatched_request_is_not_anonymous() {
        let routes = AnonymousRoutes::new(["/open"]);
        let req = axum::http::Request::builder()
            .uri("/open")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(!routes.is_anonymous(&req));
    }
}
