mod captures;
mod core;
mod error;
mod imp;
mod methods;
mod pattern;

pub use self::captures::Captures;
pub use self::error::RouterError;
pub use self::methods::MethodSet;

use self::pattern::Pattern;

/// An ordered table of routes. The first route whose path and method both
/// match wins.
#[derive(Debug)]
pub struct Router<T> {
    strictness: Strictness,
    routes: Vec<Route<T>>,
}

/// How much [`Router`] validates on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Accept everything that compiles.
    #[default]
    Permissive,
    /// Also reject duplicate method tokens and routes that an earlier route
    /// with the same template always shadows.
    Strict,
}

/// Outcome of [`Router::find`].
#[derive(Debug)]
pub enum Dispatch<'s, 'p, T> {
    Found(&'s T, Captures<'p>),
    /// Some route matched the path, none of them accepted the method.
    MethodNotAllowed,
    NotFound,
}

#[derive(Debug)]
struct Route<T> {
    template: Box<str>,
    pattern: Pattern,
    methods: MethodSet,
    data: T,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
