#![forbid(unsafe_code)]

mod args;
mod handler;
mod recovery;
mod response;
mod service;
mod service_macro;

pub use self::args::{Args, Iter};
pub use self::handler::{BoxHandler, Handler};
pub use self::recovery::{recover, Recovery};
pub use self::response::{modified, std_text_handler, std_text_response, text_response};
pub use self::service::RouterService;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http_body_util::Full;

pub type Response = http::Response<Full<Bytes>>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;
