//! Radix tree for route matching.
//!
//! Paths are split into `/`-separated segments. Static segments match exactly;
//! parameter segments (`:id` or `{id}`) match any single segment. Each terminal
//! node stores at most one route per HTTP method, so inserting the same
//! method + path twice replaces the earlier route. Captured parameter values
//! are percent-decoded; static segments are compared as sent.

use http::Method;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use super::core::{ParamVec, RouteEntry};

/// Parameter name of a segment, if it is a `:name` or `{name}` placeholder.
pub(crate) fn param_name(segment: &str) -> Option<&str> {
    if let Some(name) = segment.strip_prefix(':') {
        return Some(name);
    }
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
}

pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    path.trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[derive(Clone)]
struct RadixNode {
    segment: Cow<'static, str>,
    routes: HashMap<Method, Arc<RouteEntry>>,
    param_name: Option<Arc<str>>,
    children: Vec<RadixNode>,
    /// One child per distinct parameter name at this position
    /// (`/users/:id/posts` and `/users/:user_id/comments` do not share a node).
    param_children: Vec<RadixNode>,
}

impl RadixNode {
    fn new(segment: Cow<'static, str>) -> Self {
        Self {
            segment,
            routes: HashMap::new(),
            param_name: None,
            children: Vec::new(),
            param_children: Vec::new(),
        }
    }

    fn new_param(param_name: &str) -> Self {
        Self {
            param_name: Some(Arc::from(param_name)),
            ..Self::new(Cow::Borrowed(""))
        }
    }

    /// Returns the route that was replaced, if any.
    fn insert(
        &mut self,
        segments: &[&str],
        method: Method,
        route: Arc<RouteEntry>,
    ) -> Option<Arc<RouteEntry>> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.routes.insert(method, route);
        };

        if let Some(name) = param_name(segment) {
            if let Some(child) = self
                .param_children
                .iter_mut()
                .find(|c| c.param_name.as_deref() == Some(name))
            {
                return child.insert(remaining, method, route);
            }
            let mut child = RadixNode::new_param(name);
            let replaced = child.insert(remaining, method, route);
            self.param_children.push(child);
            return replaced;
        }

        if let Some(child) = self.children.iter_mut().find(|c| c.segment == *segment) {
            return child.insert(remaining, method, route);
        }
        let mut child = RadixNode::new(Cow::Owned((*segment).to_string()));
        let replaced = child.insert(remaining, method, route);
        self.children.push(child);
        replaced
    }

    fn search(
        &self,
        segments: &[&str],
        method: &Method,
        params: &mut ParamVec,
    ) -> Option<Arc<RouteEntry>> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.routes.get(method).cloned();
        };

        // Static children win over parameters.
        for child in &self.children {
            if child.segment == *segment {
                if let Some(route) = child.search(remaining, method, params) {
                    return Some(route);
                }
            }
        }

        for child in &self.param_children {
            if let Some(name) = &child.param_name {
                params.push((Arc::clone(name), decode_segment(segment)));
                if let Some(route) = child.search(remaining, method, params) {
                    return Some(route);
                }
                // backtrack
                params.pop();
            }
        }

        None
    }
}

/// Radix tree router: lookup cost depends on path length, not route count.
#[derive(Clone)]
pub struct RadixRouter {
    root: RadixNode,
}

impl Default for RadixRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RadixNode::new(Cow::Borrowed("")),
        }
    }

    /// Insert a route, returning the route it replaced for the same method + path.
    pub fn insert(&mut self, route: Arc<RouteEntry>) -> Option<Arc<RouteEntry>> {
        let path = route.path_pattern.clone();
        let segments = split_segments(&path);
        self.root.insert(&segments, route.method.clone(), route)
    }

    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<(Arc<RouteEntry>, ParamVec)> {
        let segments = split_segments(path);
        let mut params = ParamVec::new();
        let route = self.root.search(&segments, method, &mut params)?;
        Some((route, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: Method, path: &str) -> Arc<RouteEntry> {
        Arc::new(RouteEntry::new(method, path))
    }

    fn param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
        params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_radix_router_simple_route() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/health"));

        let (route, params) = router.route(&Method::GET, "/health").unwrap();
        assert_eq!(&*route.endpoint, "GET /health");
        assert!(params.is_empty());
    }

    #[test]
    fn test_radix_router_colon_and_brace_parameters() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/user/:id"));
        router.insert(entry(Method::GET, "/org/{org}/team"));

        let (_, params) = router.route(&Method::GET, "/user/42").unwrap();
        assert_eq!(param(&params, "id"), Some("42"));

        let (_, params) = router.route(&Method::GET, "/org/acme/team").unwrap();
        assert_eq!(param(&params, "org"), Some("acme"));
    }

    #[test]
    fn test_radix_router_method_filtering() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/items"));
        router.insert(entry(Method::POST, "/items"));

        assert_eq!(
            &*router.route(&Method::POST, "/items").unwrap().0.endpoint,
            "POST /items"
        );
        assert!(router.route(&Method::PUT, "/items").is_none());
    }

    #[test]
    fn test_static_segment_preferred_over_parameter() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/user/:id"));
        router.insert(entry(Method::GET, "/user/me"));

        let (route, params) = router.route(&Method::GET, "/user/me").unwrap();
        assert_eq!(&*route.endpoint, "GET /user/me");
        assert!(params.is_empty());
    }

    #[test]
    fn test_different_param_names_same_position() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/users/:user_id/posts"));
        router.insert(entry(Method::GET, "/users/:id/comments"));

        let (_, params) = router.route(&Method::GET, "/users/123/posts").unwrap();
        assert_eq!(param(&params, "user_id"), Some("123"));
        assert!(param(&params, "id").is_none());

        let (_, params) = router.route(&Method::GET, "/users/456/comments").unwrap();
        assert_eq!(param(&params, "id"), Some("456"));
        assert!(param(&params, "user_id").is_none());
    }

    #[test]
    fn test_insert_same_method_and_path_replaces() {
        let mut router = RadixRouter::new();
        assert!(router.insert(entry(Method::GET, "/a/:x")).is_none());
        assert!(router.insert(entry(Method::GET, "/a/:x")).is_some());
    }

    #[test]
    fn test_parameter_values_are_percent_decoded() {
        let mut router = RadixRouter::new();
        router.insert(entry(Method::GET, "/user/:id"));

        let (_, params) = router.route(&Method::GET, "/user/%37").unwrap();
        assert_eq!(param(&params, "id"), Some("7"));

        let (_, params) = router.route(&Method::GET, "/user/a%20b").unwrap();
        assert_eq!(param(&params, "id"), Some("a b"));

        let (_, params) = router.route(&Method::GET, "/user/100%").unwrap();
        assert_eq!(param(&params, "id"), Some("100%"));
    }
}
