use super::args::Args;
use super::{BoxError, BoxFuture, Response, StdError};

use std::future::Future;

use http::Request;

/// The single call signature every route handler is adapted into.
///
/// Async functions and closures of the shape
/// `Fn(Request<B>, Args) -> impl Future<Output = Result<Response, E>>`
/// implement it directly.
pub trait Handler<B>: Send + Sync + 'static {
    fn call(&self, req: Request<B>, args: Args) -> BoxFuture<'static, Result<Response, BoxError>>;
}

pub type BoxHandler<B> = Box<dyn Handler<B>>;

impl<B: 'static> Handler<B> for BoxHandler<B> {
    fn call(&self, req: Request<B>, args: Args) -> BoxFuture<'static, Result<Response, BoxError>> {
        Handler::call(&**self, req, args)
    }
}

impl<B, F, E, Fut> Handler<B> for F
where
    F: Fn(Request<B>, Args) -> Fut + Send + Sync + 'static,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request<B>, args: Args) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, args);
        Box::pin(async move {
            match fut.await {
                Ok(r) => Ok(r),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}
