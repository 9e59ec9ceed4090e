use std::sync::Arc;

use http::Method;

use routecore::handler::{HandlerRequest, HandlerResponse, Request, RequestHandler};

/// Handler that echoes its name; routing tests only care about identity.
pub struct NamedHandler {
    pub name: &'static str,
}

impl RequestHandler for NamedHandler {
    fn handle(&self, _req: HandlerRequest) -> HandlerResponse {
        HandlerResponse::text(200, self.name)
    }
}

pub fn named(name: &'static str) -> Arc<dyn RequestHandler> {
    Arc::new(NamedHandler { name })
}

/// Minimal request stand-in for dispatch-from-request and absolute URL tests.
pub struct FakeRequest {
    pub method: Method,
    pub path: String,
    pub scheme: String,
    pub authority: String,
}

impl FakeRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            scheme: "https".to_string(),
            authority: "user:password@localhost".to_string(),
        }
    }
}

impl Request for FakeRequest {
    fn method(&self) -> Method {
        self.method.clone()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn authority(&self) -> &str {
        &self.authority
    }
}
