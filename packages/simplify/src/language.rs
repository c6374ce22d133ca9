use std::{fmt::Display, sync::Arc};

use derive_more::Display;
use itertools::Itertools;

pub const EPSILON: &str = "ε";

/// An opaque grammar token. Cloning only bumps a reference count, so words and
/// production sets can share symbols freely across grammars and threads.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        let s = s.as_ref();
        assert!(!s.is_empty(), "symbols cannot be empty");
        Symbol(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_single_char(&self) -> bool {
        self.0.chars().nth(1).is_none()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(Arc::from(c.to_string()))
    }
}

/// A sequence of symbols, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(pub Vec<Symbol>);

impl Word {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Word(symbols.into_iter().collect())
    }

    pub fn epsilon() -> Self {
        Word(Vec::new())
    }

    /// Splits `s` into one symbol per character. `""` yields the empty word.
    pub fn from_chars(s: &str) -> Self {
        Word(s.chars().map(Symbol::from).collect())
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }

    /// Returns the only symbol of a one-symbol word.
    pub fn single(&self) -> Option<&Symbol> {
        match self.0.as_slice() {
            [symbol] => Some(symbol),
            _ => None,
        }
    }

    /// Whether every symbol is one character long, i.e. the word can be
    /// written as a plain string without losing symbol boundaries.
    pub fn is_char_word(&self) -> bool {
        self.0.iter().all(Symbol::is_single_char)
    }
}

impl FromIterator<Symbol> for Word {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Word(iter.into_iter().collect())
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "{EPSILON}")
        } else if self.is_char_word() {
            write!(f, "{}", self.0.iter().join(""))
        } else {
            write!(f, "{}", self.0.iter().join(" "))
        }
    }
}
