use super::error::RouterError;
use super::methods::MethodSet;
use super::{Dispatch, Router, Strictness};

use http::Method;
use tracing::warn;

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            strictness: Strictness::Permissive,
            routes: Vec::new(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Builds a router from `(pattern, methods, data)` triples in order.
    pub fn from_routes<'a, I>(routes: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, T)>,
    {
        let mut router = Self::new();
        router.try_extend(routes)?;
        Ok(router)
    }

    pub fn try_extend<'a, I>(&mut self, routes: I) -> Result<&mut Self, RouterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, T)>,
    {
        for (pattern, methods, data) in routes {
            self.try_insert(pattern, methods, data)?;
        }
        Ok(self)
    }

    /// Registers `data` for requests whose whole path matches `pattern` and
    /// whose method is listed in `methods`.
    ///
    /// `{name}` matches one path segment, `{name:regex}` matches `regex`.
    /// Braces in `regex` must balance; write a literal `}` as `\}`.
    /// `methods` is a comma separated list, `*` accepts any method.
    ///
    /// # Panics
    ///
    /// Panics if the pattern or the method list is invalid.
    pub fn insert(&mut self, pattern: &str, methods: &str, data: T) -> &mut Self {
        if let Err(e) = self.insert_route(pattern, methods, data) {
            panic!("{}", e);
        }
        self
    }

    pub fn try_insert(
        &mut self,
        pattern: &str,
        methods: &str,
        data: T,
    ) -> Result<&mut Self, RouterError> {
        match self.insert_route(pattern, methods, data) {
            Ok(()) => Ok(self),
            Err(e) => {
                warn!(error = %e, "route rejected");
                Err(e)
            }
        }
    }

    pub fn find<'s, 'p>(&'s self, method: &Method, path: &'p str) -> Dispatch<'s, 'p, T>
    where
        's: 'p,
    {
        self.find_route(method, path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over `(pattern, methods, data)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodSet, &T)> + '_ {
        self.routes
            .iter()
            .map(|r| (&*r.template, &r.methods, &r.data))
    }
}

impl<'s, 'p, T> Dispatch<'s, 'p, T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(..))
    }

    pub fn data(&self) -> Option<&'s T> {
        match *self {
            Self::Found(data, _) => Some(data),
            _ => None,
        }
    }
}
