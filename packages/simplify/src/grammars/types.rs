use derive_more::Display;
use indexmap::{IndexMap, IndexSet};

use crate::language::{Symbol, Word};

/// Production sets keyed by their left-hand variable.
///
/// Every declared variable is a key, mapped to a possibly empty set, so
/// looking a variable up never has to create an entry.
pub type Productions = IndexMap<Symbol, IndexSet<Word>>;

/// How a grammar classifies a symbol appearing in one of its productions.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    #[display("variable")]
    Variable,
    #[display("terminal")]
    Terminal,
    /// Declared neither as a variable nor as a terminal. Such symbols never
    /// generate anything and productions using them are dropped when useless
    /// symbols are eliminated.
    #[display("undefined")]
    Undefined,
}
