//! Radix-tree request router.
//!
//! One [`matchit`] tree per HTTP method, exact-match lookup. The relay's
//! whole surface is four GET paths, but the table is built at startup like
//! any other service: register a path, get a handler back at request time.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router. Build once at startup; pass to
/// [`Server::serve`](crate::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registers a handler for a GET path. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics at startup on an invalid or duplicate path — a routing table
    /// typo should never survive to serving traffic.
    pub fn get(mut self, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(Method::GET)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Option<BoxedHandler> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::request::Request;
    use crate::response::Response;

    use super::*;

    async fn ok(_req: Request) -> Response {
        Response::relay("{}".to_owned())
    }

    #[test]
    fn registered_path_resolves() {
        let router = Router::new().get("/historic", ok);
        assert!(router.lookup(&Method::GET, "/historic").is_some());
    }

    #[test]
    fn unknown_path_misses() {
        let router = Router::new().get("/", ok);
        assert!(router.lookup(&Method::GET, "/unknown").is_none());
    }

    #[test]
    fn wrong_method_misses() {
        let router = Router::new().get("/", ok);
        assert!(router.lookup(&Method::POST, "/").is_none());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_route_panics_at_startup() {
        let _ = Router::new().get("/", ok).get("/", ok);
    }
}
