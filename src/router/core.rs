//! Router core module - hot path for request routing.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::radix::RadixRouter;

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Names are `Arc<str>` because path parameter names come from the route tree
/// built at startup; values are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A registered route: method, path pattern and the `"METHOD /path"` key that
/// names its handler in the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    pub path_pattern: String,
    pub endpoint: Arc<str>,
}

impl RouteEntry {
    #[must_use]
    pub fn new(method: Method, path_pattern: &str) -> Self {
        let endpoint: Arc<str> = Arc::from(format!("{} {}", method.as_str(), path_pattern));
        Self {
            method,
            path_pattern: path_pattern.to_string(),
            endpoint,
        }
    }
}

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteEntry>,
    /// Path parameters extracted from the URL (`:id` → `("id", "123")`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name.
    ///
    /// Last write wins when a name repeats at different depths.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Method + path router backed by a radix tree.
///
/// Routes are added one at a time as endpoints are implemented. The router is
/// cheap to clone so that registration can build a new copy and publish it
/// atomically while requests keep reading the old one.
#[derive(Clone, Default)]
pub struct Router {
    radix_router: RadixRouter,
    routes: Vec<Arc<RouteEntry>>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from a list of routes; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_routes(routes: Vec<RouteEntry>) -> Self {
        let mut router = Self::new();
        for route in routes {
            router.insert(route);
        }
        info!(
            routes_count = router.routes.len(),
            routing_algorithm = "radix_tree",
            "Routing table loaded"
        );
        router
    }

    /// Add a route. An existing route for the same method + path is replaced
    /// and `true` is returned.
    pub fn insert(&mut self, route: RouteEntry) -> bool {
        let route = Arc::new(route);
        let replaced = self.radix_router.insert(Arc::clone(&route)).is_some();
        if replaced {
            self.routes.retain(|r| r.endpoint != route.endpoint);
            warn!(
                endpoint = %route.endpoint,
                "Route already registered - replacing previous registration"
            );
        } else {
            debug!(endpoint = %route.endpoint, "Route registered");
        }
        self.routes.push(route);
        replaced
    }

    /// Number of distinct method + path routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered `"METHOD /path"` keys in registration order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Arc<str>> {
        self.routes.iter().map(|r| Arc::clone(&r.endpoint)).collect()
    }

    /// Match an HTTP request to a route.
    ///
    /// Returns `None` when nothing matches (answered with 404).
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let match_start = Instant::now();
        let result = self.radix_router.route(method, path);
        let match_duration = match_start.elapsed();

        if let Some((route, path_params)) = result {
            if match_duration > Duration::from_millis(1) {
                warn!(
                    method = %method,
                    path = %path,
                    endpoint = %route.endpoint,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                debug!(
                    method = %method,
                    path = %path,
                    endpoint = %route.endpoint,
                    path_params = ?path_params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            return Some(RouteMatch { route, path_params });
        }

        debug!(
            method = %method,
            path = %path,
            duration_us = match_duration.as_micros(),
            "No route matched"
        );
        None
    }
}
