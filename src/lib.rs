//! An HTTP request router.
//!
//! Routes are matched in declaration order against the whole request path.
//! A route is a path template, a method list and a value:
//!
//! ```
//! use regex_router::{Dispatch, Method, Router};
//!
//! let mut router: Router<u32> = Router::new();
//! router
//!     .insert("/fruits", "*", 1)
//!     .insert("/fruits/{name}", "GET", 2)
//!     .insert("/fruits/{name}", "DELETE", 3)
//!     .insert(r"/fruits/{name}/{n:\d+}", "GET", 4);
//!
//! match router.find(&Method::DELETE, "/fruits/apple") {
//!     Dispatch::Found(&id, caps) => {
//!         assert_eq!(id, 3);
//!         assert_eq!(caps.get("name"), Some("apple"));
//!     }
//!     _ => unreachable!(),
//! }
//!
//! assert!(matches!(
//!     router.find(&Method::PUT, "/fruits/apple"),
//!     Dispatch::MethodNotAllowed
//! ));
//! assert!(matches!(
//!     router.find(&Method::GET, "/cars"),
//!     Dispatch::NotFound
//! ));
//! ```

#![deny(unsafe_code)]

mod router;

pub use crate::router::{Captures, Dispatch, MethodSet, Router, RouterError, Strictness};

pub use http::Method;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

#[cfg(feature = "hyper-service")]
pub use crate::hyper_service::{
    recover, std_text_handler, Args, BoxError, BoxHandler, Handler, Recovery, Response,
    RouterService,
};

#[cfg(feature = "json")]
pub mod json;
