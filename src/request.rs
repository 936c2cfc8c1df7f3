//! Incoming HTTP request type.

use http::Method;

/// An inbound request, reduced to what the relay routes on.
///
/// The relay never reads inbound bodies or headers — every route is a plain
/// GET whose entire meaning is its path — so neither is carried here.
pub struct Request {
    method: Method,
    path: String,
}

impl Request {
    pub(crate) fn new(method: Method, path: String) -> Self {
        Self { method, path }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_routing_inputs() {
        let req = Request::new(Method::GET, "/historic".to_owned());
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/historic");
    }
}
