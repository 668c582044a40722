use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

/// Values extracted from a matched path, borrowed from the path itself.
#[derive(Debug, Clone)]
pub struct Captures<'p> {
    pub(super) names: Option<&'p Arc<[Box<str>]>>,
    pub(super) values: SmallVec<[&'p str; 8]>,
}

impl<'p> Captures<'p> {
    /// Returns the value of the first placeholder called `name`.
    pub fn get(&self, name: &str) -> Option<&'p str> {
        let pos = self.names?.iter().position(|n| &**n == name)?;
        self.values.get(pos).copied()
    }

    pub fn index(&self, index: usize) -> Option<&'p str> {
        self.values.get(index).copied()
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn names(&self) -> &'p [Box<str>] {
        match self.names {
            Some(names) => &names[..],
            None => &[],
        }
    }

    pub(crate) fn shared_names(&self) -> Option<&'p Arc<[Box<str>]>> {
        self.names
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p str, &'p str)> + '_ {
        self.names()
            .iter()
            .map(|n| &**n)
            .zip(self.values.iter().copied())
    }
}

impl<'p> Deref for Captures<'p> {
    type Target = [&'p str];
    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl Captures<'_> {
    pub(super) fn new() -> Self {
        Self {
            names: None,
            values: SmallVec::new(),
        }
    }
}
