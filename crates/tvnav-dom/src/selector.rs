//! A small CSS selector subset.
//!
//! Supported: type selectors (`a`, `*`), classes (`.card`), attribute
//! presence/equality/substring (`[href]`, `[type="text"]`, `[href*="/tv/"]`),
//! negated attribute tests (`:not([tabindex="-1"])`), the descendant
//! combinator and comma-separated lists. Matching walks parents through
//! [`HostPage`], so it works against any host.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::dom_node::ElementId;
use crate::error::DomError;
use crate::page::HostPage;

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

/// Compounds joined by descendant combinators; the last one is the subject.
#[derive(Debug, Clone, PartialEq)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct CompoundSelector {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
    negations: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeSelector {
    name: String,
    op: AttributeOp,
}

#[derive(Debug, Clone, PartialEq)]
enum AttributeOp {
    Exists,
    Equals(String),
    Contains(String),
}

impl SelectorList {
    /// Parse a comma-separated selector list.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let mut selectors = Vec::new();
        for part in split_top_level(source, |c| c == ',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(DomError::selector(source, "empty selector in list"));
            }
            selectors.push(parse_complex(part)?);
        }
        if selectors.is_empty() {
            return Err(DomError::selector(source, "empty selector list"));
        }
        Ok(Self {
            source: source.trim().to_string(),
            selectors,
        })
    }

    /// Parse each entry and merge them into one list.
    pub fn from_list<S: AsRef<str>>(items: &[S]) -> Result<Self, DomError> {
        let joined = items
            .iter()
            .map(|s| s.as_ref().trim())
            .collect::<Vec<_>>()
            .join(", ");
        Self::parse(&joined)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// True if any selector of the list matches `id`.
    pub fn matches<P: HostPage + ?Sized>(&self, page: &P, id: ElementId) -> bool {
        self.selectors.iter().any(|s| s.matches(page, id))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl ComplexSelector {
    fn matches<P: HostPage + ?Sized>(&self, page: &P, id: ElementId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(page, id) {
            return false;
        }

        // Descendant-only chains can be matched greedily from the nearest ancestor.
        // A host page may hand out cyclic parent links; stop at the first repeat.
        let mut visited = HashSet::from([id]);
        let mut current = page.parent(id);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = current else {
                    return false;
                };
                if !visited.insert(ancestor) {
                    return false;
                }
                current = page.parent(ancestor);
                if compound.matches(page, ancestor) {
                    break;
                }
            }
        }
        true
    }
}

impl CompoundSelector {
    fn matches<P: HostPage + ?Sized>(&self, page: &P, id: ElementId) -> bool {
        if let Some(tag) = &self.tag {
            match page.tag_name(id) {
                Some(actual) if actual.eq_ignore_ascii_case(tag) => {}
                _ => return false,
            }
        } else if page.tag_name(id).is_none() {
            return false;
        }

        self.classes.iter().all(|c| page.has_class(id, c))
            && self.attributes.iter().all(|a| a.matches(page, id))
            && !self.negations.iter().any(|a| a.matches(page, id))
    }
}

impl AttributeSelector {
    fn matches<P: HostPage + ?Sized>(&self, page: &P, id: ElementId) -> bool {
        let Some(value) = page.attribute(id, &self.name) else {
            return false;
        };
        match &self.op {
            AttributeOp::Exists => true,
            AttributeOp::Equals(expected) => value == *expected,
            AttributeOp::Contains(needle) => !needle.is_empty() && value.contains(needle.as_str()),
        }
    }
}

/// Split on `is_sep` outside brackets, parentheses and quotes.
fn split_top_level(source: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && is_sep(c) => {
                parts.push(&source[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

fn parse_complex(source: &str) -> Result<ComplexSelector, DomError> {
    let mut compounds = Vec::new();
    for token in split_top_level(source, char::is_whitespace) {
        if token.is_empty() {
            continue;
        }
        if matches!(token, ">" | "+" | "~") || token.starts_with(['>', '+', '~']) {
            return Err(DomError::selector(source, "only the descendant combinator is supported"));
        }
        compounds.push(parse_compound(source, token)?);
    }
    if compounds.is_empty() {
        return Err(DomError::selector(source, "empty selector"));
    }
    Ok(ComplexSelector { compounds })
}

struct Cursor<'a> {
    selector: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(selector: &'a str, token: &str) -> Self {
        Self {
            selector,
            chars: token.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: &str) -> bool {
        let end = self.pos + expected.chars().count();
        if end > self.chars.len() {
            return false;
        }
        let matched = self.chars[self.pos..end].iter().copied().eq(expected.chars());
        if matched {
            self.pos = end;
        }
        matched
    }

    fn expect(&mut self, expected: char) -> Result<(), DomError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}'", expected))),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn ident(&mut self) -> Result<String, DomError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn value(&mut self) -> Result<String, DomError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != q) {
                    self.pos += 1;
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.expect(q)?;
                Ok(value)
            }
            _ => self.ident(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::selector(self.selector, reason)
    }
}

fn parse_compound(selector: &str, token: &str) -> Result<CompoundSelector, DomError> {
    let mut cursor = Cursor::new(selector, token);
    let mut compound = CompoundSelector::default();

    if cursor.peek() == Some('*') {
        cursor.bump();
    } else if cursor.peek().is_some_and(char::is_alphabetic) {
        compound.tag = Some(cursor.ident()?.to_ascii_lowercase());
    }

    while let Some(c) = cursor.peek() {
        match c {
            '.' => {
                cursor.bump();
                compound.classes.push(cursor.ident()?);
            }
            '[' => compound.attributes.push(parse_attribute(&mut cursor)?),
            ':' => {
                if !cursor.eat(":not(") {
                    return Err(cursor.error("only :not([attr]) pseudo-classes are supported"));
                }
                compound.negations.push(parse_attribute(&mut cursor)?);
                cursor.expect(')')?;
            }
            other => return Err(cursor.error(format!("unexpected character '{}'", other))),
        }
    }

    Ok(compound)
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<AttributeSelector, DomError> {
    cursor.expect('[')?;
    cursor.skip_whitespace();
    let name = cursor.ident()?.to_ascii_lowercase();
    cursor.skip_whitespace();

    let op = if cursor.eat("]") {
        return Ok(AttributeSelector {
            name,
            op: AttributeOp::Exists,
        });
    } else if cursor.eat("*=") {
        cursor.skip_whitespace();
        AttributeOp::Contains(cursor.value()?)
    } else if cursor.eat("=") {
        cursor.skip_whitespace();
        AttributeOp::Equals(cursor.value()?)
    } else {
        return Err(cursor.error("unsupported attribute operator"));
    };

    cursor.skip_whitespace();
    cursor.expect(']')?;
    Ok(AttributeSelector { name, op })
}
