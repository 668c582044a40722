use crate::router::Captures;

use std::iter::FusedIterator;
use std::str::FromStr;
use std::sync::Arc;

/// Path arguments of one dispatched request.
///
/// Built fresh for every request from the router's captures and handed to the
/// handler next to the request. Values come from the percent-decoded path. Fallback handlers receive [`Args::empty`].
#[derive(Debug, Clone, Default)]
pub struct Args {
    path: Option<Box<str>>,
    names: Option<Arc<[Box<str>]>>,
    spans: Vec<(usize, usize)>,
}

impl Args {
    pub const fn empty() -> Self {
        Self {
            path: None,
            names: None,
            spans: Vec::new(),
        }
    }

    /// Returns the value of the first placeholder called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        let pos = self.names.as_ref()?.iter().position(|n| &**n == name)?;
        self.index(pos)
    }

    /// Returns the value of the placeholder at `index`, in declaration order.
    pub fn index(&self, index: usize) -> Option<&str> {
        let path = self.path.as_deref()?;
        let &(start, end) = self.spans.get(index)?;
        path.get(start..end)
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            args: self,
            pos: 0,
        }
    }
}

impl Args {
    pub(super) fn new(path: &str, caps: &Captures<'_>) -> Self {
        let names = match caps.shared_names() {
            Some(names) if !caps.is_empty() => Arc::clone(names),
            _ => return Self::empty(),
        };

        let base = path.as_ptr() as usize;
        let spans = caps
            .iter()
            .map(|(_, value)| {
                let start = (value.as_ptr() as usize).wrapping_sub(base);
                let end = start.wrapping_add(value.len());
                if end <= path.len() && start <= end {
                    (start, end)
                } else {
                    (0, 0)
                }
            })
            .collect();

        Self {
            path: Some(path.into()),
            names: Some(names),
            spans,
        }
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over `(name, value)` pairs of [`Args`].
pub struct Iter<'a> {
    args: &'a Args,
    pos: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.args.names.as_ref()?.get(self.pos)?;
        let value = self.args.index(self.pos)?;
        self.pos += 1;
        Some((&**name, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.args.len() - self.pos;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}
