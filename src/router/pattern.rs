use super::error::RouterError;

use std::sync::Arc;

use regex::Regex;

const DEFAULT_SUBPATTERN: &str = "[^/]+";

const OPEN: u8 = b'{';
const CLOSE: u8 = b'}';
const ESCAPE: u8 = b'\\';
const BRACES: [char; 2] = ['{', '}'];

/// A routing path compiled into an anchored regex.
///
/// Every placeholder owns exactly one capture group, so the group at `i + 1`
/// holds the value of `names[i]`.
#[derive(Debug)]
pub(super) struct Pattern {
    regex: Regex,
    names: Arc<[Box<str>]>,
}

impl Pattern {
    pub(super) fn compile(template: &str) -> Result<Self, RouterError> {
        let mut raw = String::with_capacity(template.len() + 16);
        let mut names: Vec<Box<str>> = Vec::new();

        raw.push('^');

        let mut pos = 0;
        while let Some(rel) = template[pos..].find(BRACES) {
            let at = pos + rel;
            raw.push_str(&regex::escape(&template[pos..at]));

            if template.as_bytes()[at] == CLOSE {
                return Err(RouterError::UnexpectedBrace {
                    pattern: template.into(),
                    at,
                });
            }

            let end = match closing_brace(template.as_bytes(), at) {
                Some(end) => end,
                None => {
                    return Err(RouterError::UnclosedPlaceholder {
                        pattern: template.into(),
                        at,
                    })
                }
            };

            let body = &template[at + 1..end];
            let (name, sub) = match body.split_once(':') {
                Some((name, sub)) => {
                    check_subpattern(template, name, sub)?;
                    (name, sub)
                }
                None => (body, DEFAULT_SUBPATTERN),
            };

            raw.push('(');
            raw.push_str(sub);
            raw.push(')');
            names.push(name.into());

            pos = end + 1;
        }

        raw.push_str(&regex::escape(&template[pos..]));
        raw.push('$');

        let regex = Regex::new(&raw).map_err(|source| RouterError::InvalidPattern {
            pattern: template.into(),
            source,
        })?;

        debug_assert_eq!(regex.captures_len(), names.len() + 1);

        Ok(Self {
            regex,
            names: names.into(),
        })
    }

    pub(super) fn names(&self) -> &Arc<[Box<str>]> {
        &self.names
    }

    pub(super) fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Pushes one value per placeholder into `values` if the whole path matches.
    pub(super) fn captures<'p>(&self, path: &'p str, values: &mut impl Extend<&'p str>) -> bool {
        let caps = match self.regex.captures(path) {
            Some(caps) => caps,
            None => return false,
        };
        let groups = 1..=self.names.len();
        values.extend(groups.map(|i| caps.get(i).map_or("", |m| m.as_str())));
        true
    }
}

/// Finds the `}` closing the placeholder opened at `open`. Braces are counted
/// inside character classes too, so a literal `}` must be written `\}`.
fn closing_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth: usize = 0;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            ESCAPE => i += 1,
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn check_subpattern(template: &str, name: &str, sub: &str) -> Result<(), RouterError> {
    let regex = Regex::new(sub).map_err(|source| RouterError::InvalidPattern {
        pattern: template.into(),
        source,
    })?;
    if regex.captures_len() > 1 {
        return Err(RouterError::NestedCapture {
            pattern: template.into(),
            name: name.into(),
        });
    }
    Ok(())
}
