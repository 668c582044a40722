use super::args::Args;
use super::handler::Handler;
use super::response::std_text_response;
use super::{BoxError, BoxFuture, Response};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use futures_util::future::{self, FutureExt};
use http::{Request, StatusCode};
use tracing::error;

/// Wraps `handler` so that a panic inside it becomes a plain text
/// `500 Internal Server Error` response instead of tearing down the
/// connection task.
pub fn recover<H>(handler: H) -> Recovery<H> {
    Recovery { inner: handler }
}

#[derive(Debug, Clone)]
pub struct Recovery<H> {
    inner: H,
}

impl<H> Recovery<H> {
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<B, H> Handler<B> for Recovery<H>
where
    B: 'static,
    H: Handler<B>,
{
    fn call(&self, req: Request<B>, args: Args) -> BoxFuture<'static, Result<Response, BoxError>> {
        catch_panics(|| self.inner.call(req, args))
    }
}

/// Runs `f` and polls the future it returns, turning any panic along the way
/// into an internal server error response.
pub(super) fn catch_panics<F>(f: F) -> BoxFuture<'static, Result<Response, BoxError>>
where
    F: FnOnce() -> BoxFuture<'static, Result<Response, BoxError>>,
{
    let fut = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(fut) => fut,
        Err(payload) => return Box::pin(future::ready(Ok(recovered(payload)))),
    };

    Box::pin(async move {
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(ret) => ret,
            Err(payload) => Ok(recovered(payload)),
        }
    })
}

fn recovered(payload: Box<dyn Any + Send>) -> Response {
    let msg = match payload.downcast_ref::<&'static str>() {
        Some(s) => *s,
        None => match payload.downcast_ref::<String>() {
            Some(s) => s.as_str(),
            None => "<non-string panic payload>",
        },
    };
    error!(panic = msg, "handler panicked");
    std_text_response(StatusCode::INTERNAL_SERVER_ERROR)
}
