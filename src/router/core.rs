use super::captures::Captures;
use super::error::RouterError;
use super::methods::MethodSet;
use super::pattern::Pattern;
use super::{Dispatch, Route, Router, Strictness};

use http::Method;
use tracing::{debug, trace};

impl<T> Router<T> {
    pub(super) fn insert_route(
        &mut self,
        template: &str,
        methods: &str,
        data: T,
    ) -> Result<(), RouterError> {
        let pattern = Pattern::compile(template)?;
        let method_set = MethodSet::parse_with(methods, self.strictness)?;

        if self.strictness == Strictness::Strict {
            let shadowed_by = self
                .routes
                .iter()
                .position(|r| &*r.template == template && r.methods.overlaps(&method_set));
            if let Some(shadowed_by) = shadowed_by {
                return Err(RouterError::UnreachableRoute {
                    pattern: template.into(),
                    methods: methods.into(),
                    shadowed_by,
                });
            }
        }

        debug!(
            index = self.routes.len(),
            pattern = template,
            methods = %method_set,
            placeholders = pattern.names().len(),
            "route registered"
        );

        self.routes.push(Route {
            template: template.into(),
            pattern,
            methods: method_set,
            data,
        });

        Ok(())
    }

    pub(super) fn find_route<'s, 'p>(
        &'s self,
        method: &Method,
        path: &'p str,
    ) -> Dispatch<'s, 'p, T>
    where
        's: 'p,
    {
        let mut path_matched = false;
        let mut captures = Captures::new();

        for (index, route) in self.routes.iter().enumerate() {
            if route.methods.contains(method) {
                if route.pattern.captures(path, &mut captures.values) {
                    captures.names = Some(route.pattern.names());
                    trace!(%method, path, index, "route matched");
                    return Dispatch::Found(&route.data, captures);
                }
            } else if !path_matched && route.pattern.is_match(path) {
                path_matched = true;
            }
        }

        if path_matched {
            trace!(%method, path, "method not allowed");
            Dispatch::MethodNotAllowed
        } else {
            trace!(%method, path, "no route matched");
            Dispatch::NotFound
        }
    }
}
