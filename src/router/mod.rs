//! # Router Module
//!
//! Method + path matching for the runtime server.
//!
//! Routes are keyed by HTTP method and a path pattern whose parameter segments
//! are written `:name` (or `{name}`). Matching walks a radix tree, so lookup
//! cost grows with path length rather than with the number of routes. Each
//! match yields the route's `"METHOD /path"` endpoint key, which the
//! dispatcher uses to find the handler, plus the extracted path parameters.
//!
//! ```rust
//! use abstractapi::router::{RouteEntry, Router};
//! use http::Method;
//!
//! let router = Router::from_routes(vec![RouteEntry::new(Method::GET, "/user/:id")]);
//! let m = router.route(&Method::GET, "/user/42").unwrap();
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! ```

mod core;
mod radix;

pub use core::{ParamVec, RouteEntry, RouteMatch, Router, MAX_INLINE_PARAMS};
