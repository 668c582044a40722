use super::args::Args;
use super::handler::{BoxHandler, Handler};
use super::recovery::catch_panics;
use super::response::std_text_handler;
use super::{BoxError, BoxFuture, Response};
use crate::router::{Dispatch, Router, RouterError};

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use http::{Request, StatusCode};
use hyper::service::Service;
use tracing::trace;

/// A hyper [`Service`] dispatching every request through a shared, read-only
/// [`Router`].
pub struct RouterService<B> {
    router: Arc<Router<BoxHandler<B>>>,
    not_found: Arc<BoxHandler<B>>,
    method_not_allowed: Arc<BoxHandler<B>>,
    recovery: bool,
}

impl<B> Service<Request<B>> for RouterService<B>
where
    B: Send + 'static,
{
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        if self.recovery {
            catch_panics(|| self.dispatch(req))
        } else {
            self.dispatch(req)
        }
    }
}

impl<B: 'static> RouterService<B> {
    pub fn new(router: Router<BoxHandler<B>>) -> Self {
        Self {
            router: Arc::new(router),
            not_found: shared(std_text_handler(StatusCode::NOT_FOUND)),
            method_not_allowed: shared(std_text_handler(StatusCode::METHOD_NOT_ALLOWED)),
            recovery: false,
        }
    }

    /// Replaces the handler called when no route matches the path.
    pub fn not_found(mut self, h: impl Handler<B>) -> Self {
        self.not_found = shared(h);
        self
    }

    /// Replaces the handler called when some route matches the path but none
    /// accepts the method.
    pub fn method_not_allowed(mut self, h: impl Handler<B>) -> Self {
        self.method_not_allowed = shared(h);
        self
    }

    /// Turns panics raised anywhere during dispatch, fallbacks included, into
    /// `500 Internal Server Error` responses.
    pub fn with_recovery(mut self) -> Self {
        self.recovery = true;
        self
    }

    pub fn router(&self) -> &Router<BoxHandler<B>> {
        &self.router
    }

    fn dispatch(&self, req: Request<B>) -> BoxFuture<'static, Result<Response, BoxError>> {
        let (handler, args) = self.resolve(&req);
        Handler::call(handler, req, args)
    }

    fn resolve(&self, req: &Request<B>) -> (&BoxHandler<B>, Args) {
        let path = decode_path(req.uri().path());
        let resolved = match self.router.find(req.method(), &path) {
            Dispatch::Found(h, caps) => (h, Args::new(&path, &caps)),
            Dispatch::MethodNotAllowed => (&*self.method_not_allowed, Args::empty()),
            Dispatch::NotFound => (&*self.not_found, Args::empty()),
        };
        resolved
    }
}

/// Percent-decodes the request path. A path that does not decode to UTF-8 is
/// matched as is.
fn decode_path(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(path) => path,
        Err(_) => {
            trace!(path = raw, "path is not valid UTF-8 once decoded");
            Cow::Borrowed(raw)
        }
    }
}

fn shared<B: 'static>(h: impl Handler<B>) -> Arc<BoxHandler<B>> {
    let h: BoxHandler<B> = Box::new(h);
    Arc::new(h)
}

impl<B> Clone for RouterService<B> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            not_found: Arc::clone(&self.not_found),
            method_not_allowed: Arc::clone(&self.method_not_allowed),
            recovery: self.recovery,
        }
    }
}

impl<B> fmt::Debug for RouterService<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterService")
            .field("routes", &self.router.len())
            .field("recovery", &self.recovery)
            .finish()
    }
}

impl<B: 'static> Router<BoxHandler<B>> {
    /// Registers a handler, see [`Router::insert`].
    pub fn route(&mut self, pattern: &str, methods: &str, h: impl Handler<B>) -> &mut Self {
        self.insert(pattern, methods, Box::new(h))
    }

    pub fn try_route(
        &mut self,
        pattern: &str,
        methods: &str,
        h: impl Handler<B>,
    ) -> Result<&mut Self, RouterError> {
        self.try_insert(pattern, methods, Box::new(h))
    }

    pub fn into_service(self) -> RouterService<B> {
        RouterService::new(self)
    }
}

macro_rules! define_method {
    ($name:ident, $methods:expr) => {
        pub fn $name(&mut self, pattern: &str, h: impl Handler<B>) -> &mut Self {
            self.route(pattern, $methods, h)
        }
    };
}

impl<B: 'static> Router<BoxHandler<B>> {
    define_method!(get, "GET");
    define_method!(post, "POST");
    define_method!(put, "PUT");
    define_method!(delete, "DELETE");
    define_method!(head, "HEAD");
    define_method!(options, "OPTIONS");
    define_method!(connect, "CONNECT");
    define_method!(patch, "PATCH");
    define_method!(trace, "TRACE");
    define_method!(any, "*");
}
