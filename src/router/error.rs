#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid routing path {pattern:?}: {source}")]
    InvalidPattern {
        pattern: Box<str>,
        #[source]
        source: regex::Error,
    },

    #[error("unclosed placeholder at byte {at} in routing path {pattern:?}")]
    UnclosedPlaceholder { pattern: Box<str>, at: usize },

    #[error("unexpected '}}' at byte {at} in routing path {pattern:?}")]
    UnexpectedBrace { pattern: Box<str>, at: usize },

    #[error("placeholder {name:?} in routing path {pattern:?} contains a capturing group, use (?:...) instead")]
    NestedCapture { pattern: Box<str>, name: Box<str> },

    #[error("invalid method {token:?} in method list {methods:?}")]
    InvalidMethod { methods: Box<str>, token: Box<str> },

    #[error("duplicate method {token:?} in method list {methods:?}")]
    DuplicateMethod { methods: Box<str>, token: Box<str> },

    #[error("routing path {pattern:?} with methods {methods:?} is shadowed by route #{shadowed_by}")]
    UnreachableRoute {
        pattern: Box<str>,
        methods: Box<str>,
        shadowed_by: usize,
    },
}
