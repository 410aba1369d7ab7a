//! A small CSS selector subset for querying element trees.
//!
//! Supported: `*`, `#id`, `.class`, `[attr]`, `[attr=value]` (value bare or
//! quoted), compounds such as `.a.b[x]`, descendant (` `) and child (`>`)
//! combinators, and comma separated groups.

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at {position} in selector {selector:?}")]
    Unexpected {
        selector: String,
        found: char,
        position: usize,
    },
    #[error("selector {0:?} ends unexpectedly")]
    UnexpectedEnd(String),
    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
    #[error("combinator without a following compound in {0:?}")]
    DanglingCombinator(String),
}

/// A parsed selector: one or more alternative groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Vec<Part>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    /// Relationship to the previous part. Ignored on the first part.
    combinator: Combinator,
    compound: Compound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists(String),
    Equals(String, String),
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(id) = &self.id {
            if element.get_id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|cond| match cond {
            AttrCondition::Exists(name) => element.get_attr(name).is_some(),
            AttrCondition::Equals(name, value) => element.get_attr(name) == Some(value.as_str()),
        })
    }
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parser = Parser {
            source: trimmed,
            chars: trimmed.char_indices().peekable(),
        };
        let mut groups = vec![parser.group()?];
        while parser.eat(',') {
            groups.push(parser.group()?);
        }

        Ok(Self {
            source: trimmed.to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match the last element of `path` against the selector.
    /// `path` runs from the tree root down to the candidate element; the
    /// leading elements are the ancestors used by combinators.
    pub fn matches_path(&self, path: &[&Element]) -> bool {
        self.groups.iter().any(|parts| matches_parts(parts, path))
    }

    /// Match a lone element, ignoring ancestry. Selectors with combinators
    /// never match.
    pub fn matches(&self, element: &Element) -> bool {
        self.matches_path(&[element])
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn matches_parts(parts: &[Part], path: &[&Element]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    let Some((element, ancestors)) = path.split_last() else {
        return false;
    };
    if !last.compound.matches(element) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match last.combinator {
        Combinator::Child => matches_parts(rest, ancestors),
        Combinator::Descendant => (1..=ancestors.len())
            .rev()
            .any(|end| matches_parts(rest, &ancestors[..end])),
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    fn unexpected(&mut self) -> SelectorError {
        match self.chars.peek() {
            Some(&(position, found)) => SelectorError::Unexpected {
                selector: self.source.to_string(),
                found,
                position,
            },
            None => SelectorError::UnexpectedEnd(self.source.to_string()),
        }
    }

    /// One comma separated group, stopping before `,` or at the end.
    fn group(&mut self) -> Result<Vec<Part>, SelectorError> {
        let mut parts: Vec<Part> = Vec::new();
        let mut combinator = Combinator::Descendant;
        let mut explicit = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(',') => {
                    if explicit {
                        return Err(SelectorError::DanglingCombinator(self.source.to_string()));
                    }
                    if parts.is_empty() {
                        return Err(self.unexpected());
                    }
                    return Ok(parts);
                }
                Some('>') => {
                    if parts.is_empty() || explicit {
                        return Err(SelectorError::DanglingCombinator(self.source.to_string()));
                    }
                    self.chars.next();
                    combinator = Combinator::Child;
                    explicit = true;
                }
                Some(_) => {
                    let compound = self.compound()?;
                    parts.push(Part {
                        combinator,
                        compound,
                    });
                    combinator = Combinator::Descendant;
                    explicit = false;
                }
            }
        }
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        loop {
            match self.peek() {
                Some('*') => {
                    self.chars.next();
                    compound.universal = true;
                }
                Some('#') => {
                    self.chars.next();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.chars.next();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.chars.next();
                    compound.attrs.push(self.attribute()?);
                }
                Some(c) if c.is_whitespace() || c == '>' || c == ',' => break,
                None => break,
                Some(_) => return Err(self.unexpected()),
            }
        }

        if compound.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrCondition, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();

        let condition = if self.eat('=') {
            self.skip_whitespace();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.chars.next();
                    self.quoted(quote)?
                }
                _ => self.ident()?,
            };
            self.skip_whitespace();
            AttrCondition::Equals(name, value)
        } else {
            AttrCondition::Exists(name)
        };

        match self.peek() {
            Some(']') => {
                self.chars.next();
                Ok(condition)
            }
            None => Err(SelectorError::UnterminatedAttribute(self.source.to_string())),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == quote {
                return Ok(value);
            }
            value.push(c);
        }
        Err(SelectorError::UnterminatedAttribute(self.source.to_string()))
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }
}
