use super::error::RouterError;
use super::Strictness;

use std::fmt;
use std::str::FromStr;

use http::Method;
use smallvec::SmallVec;

const ANY: &str = "*";
const SEPARATOR: char = ',';

/// The methods accepted by a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSet {
    /// Written as `*`. Accepts every method, including extension methods.
    Any,
    Only(SmallVec<[Method; 4]>),
}

impl MethodSet {
    /// Parses a comma separated method list such as `"GET, head"`.
    ///
    /// Tokens are trimmed and uppercased. A `*` token anywhere in the list
    /// turns the whole set into [`MethodSet::Any`].
    pub fn parse(methods: &str) -> Result<Self, RouterError> {
        Self::parse_with(methods, Strictness::Permissive)
    }

    pub(super) fn parse_with(methods: &str, strictness: Strictness) -> Result<Self, RouterError> {
        let mut set: SmallVec<[Method; 4]> = SmallVec::new();
        let mut any = false;

        for token in methods.split(SEPARATOR).map(str::trim) {
            if token == ANY {
                any = true;
                continue;
            }

            let method = match Method::from_bytes(token.to_ascii_uppercase().as_bytes()) {
                Ok(m) if !token.is_empty() => m,
                _ => {
                    return Err(RouterError::InvalidMethod {
                        methods: methods.into(),
                        token: token.into(),
                    })
                }
            };

            if set.contains(&method) {
                if strictness == Strictness::Strict {
                    return Err(RouterError::DuplicateMethod {
                        methods: methods.into(),
                        token: token.into(),
                    });
                }
                continue;
            }
            set.push(method);
        }

        if any {
            Ok(Self::Any)
        } else {
            Ok(Self::Only(set))
        }
    }

    #[inline]
    pub fn contains(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => set.contains(method),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns `true` if some method is accepted by both sets.
    pub fn overlaps(&self, other: &MethodSet) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Only(lhs), Self::Only(_)) => lhs.iter().any(|m| other.contains(m)),
        }
    }
}

impl FromStr for MethodSet {
    type Err = RouterError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ANY),
            Self::Only(set) => {
                for (i, m) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(m.as_str())?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_uppercases() {
        let set = MethodSet::parse(" get ,Delete").unwrap();
        assert!(set.contains(&Method::GET));
        assert!(set.contains(&Method::DELETE));
        assert!(!set.contains(&Method::POST));
        assert_eq!(set.to_string(), "GET,DELETE");
    }

    #[test]
    fn star_accepts_everything() {
        let set = MethodSet::parse("*").unwrap();
        assert!(set.is_any());
        assert!(set.contains(&Method::PATCH));
        assert!(set.contains(&Method::from_bytes(b"PURGE").unwrap()));

        assert!(MethodSet::parse("GET, *").unwrap().is_any());
    }

    #[test]
    fn extension_methods() {
        let set = MethodSet::parse("purge").unwrap();
        assert!(set.contains(&Method::from_bytes(b"PURGE").unwrap()));
    }

    #[test]
    fn invalid_tokens() {
        assert!(matches!(
            MethodSet::parse(""),
            Err(RouterError::InvalidMethod { .. })
        ));
        assert!(matches!(
            MethodSet::parse("GET,"),
            Err(RouterError::InvalidMethod { .. })
        ));
        assert!(matches!(
            MethodSet::parse("GE T"),
            Err(RouterError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn duplicates() {
        let set = MethodSet::parse("GET,get").unwrap();
        assert_eq!(set.to_string(), "GET");

        assert!(matches!(
            MethodSet::parse_with("GET,get", Strictness::Strict),
            Err(RouterError::DuplicateMethod { .. })
        ));
    }

    #[test]
    fn overlaps() {
        let get: MethodSet = "GET".parse().unwrap();
        let get_post: MethodSet = "POST,GET".parse().unwrap();
        let delete: MethodSet = "DELETE".parse().unwrap();
        let any: MethodSet = "*".parse().unwrap();

        assert!(get.overlaps(&get_post));
        assert!(!get.overlaps(&delete));
        assert!(delete.overlaps(&any));
    }
}
