//! Route lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (acceptable for typical route counts)
//! - Highest priority wins; ties go to the longest prefix, then config order
//! - Explicit None rather than a silent default route

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub upstream: String,
    pub priority: u32,
    pub matcher: PathPrefixMatcher,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let mut routes: Vec<Route> = routes
            .iter()
            .map(|r| Route {
                name: r.name.clone(),
                upstream: r.upstream.clone(),
                priority: r.priority,
                matcher: PathPrefixMatcher::new(r.path_prefix.as_str()),
            })
            .collect();
        // Stable sort keeps config order for full ties.
        routes.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.matcher.prefix().len().cmp(&a.matcher.prefix().len()))
        });
        Self { routes }
    }

    /// Find the route for `path`, with the path remainder after its prefix.
    pub fn match_path<'a, 'p>(&'a self, path: &'p str) -> Option<(&'a Route, &'p str)> {
        self.routes
            .iter()
            .find_map(|route| route.matcher.strip(path).map(|rest| (route, rest)))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
