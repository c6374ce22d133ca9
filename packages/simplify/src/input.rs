//! JSON batches of named grammars.
//!
//! ```json
//! {
//!   "1": {
//!     "V": ["S", "A"],
//!     "T": ["a"],
//!     "P": { "S": ["aA", ""], "A": ["a"] },
//!     "S": "S"
//!   }
//! }
//! ```
//!
//! A production is either a string, split into one symbol per character, or
//! an array of tokens for multi-character symbols. The same shape is used when
//! writing grammars back out.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{GrammarError, Result},
    grammars::context_free::ContextFreeGrammar,
    language::{Symbol, Word},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductionRecord {
    Chars(String),
    Tokens(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRecord {
    #[serde(rename = "V")]
    pub variables: Vec<String>,
    #[serde(rename = "T")]
    pub terminals: Vec<String>,
    #[serde(rename = "P")]
    pub productions: IndexMap<String, Vec<ProductionRecord>>,
    #[serde(rename = "S")]
    pub start_symbol: String,
}

fn symbol(s: &str, context: &'static str) -> Result<Symbol> {
    if s.is_empty() {
        Err(GrammarError::EmptySymbol(context))
    } else {
        Ok(Symbol::new(s))
    }
}

impl ProductionRecord {
    fn to_word(&self) -> Result<Word> {
        match self {
            ProductionRecord::Chars(s) => Ok(Word::from_chars(s)),
            ProductionRecord::Tokens(tokens) => tokens
                .iter()
                .map(|token| symbol(token, "production"))
                .collect::<Result<Word>>(),
        }
    }
}

impl From<&Word> for ProductionRecord {
    fn from(word: &Word) -> Self {
        if word.is_char_word() {
            ProductionRecord::Chars(word.symbols().map(Symbol::as_str).collect())
        } else {
            ProductionRecord::Tokens(word.symbols().map(ToString::to_string).collect())
        }
    }
}

impl TryFrom<&GrammarRecord> for ContextFreeGrammar {
    type Error = GrammarError;

    fn try_from(record: &GrammarRecord) -> Result<Self> {
        let variables = record
            .variables
            .iter()
            .map(|v| symbol(v, "V"))
            .collect::<Result<Vec<_>>>()?;
        let terminals = record
            .terminals
            .iter()
            .map(|t| symbol(t, "T"))
            .collect::<Result<Vec<_>>>()?;

        let mut productions = Vec::new();
        for (lhs, rhs) in &record.productions {
            let lhs = symbol(lhs, "P")?;
            for production in rhs {
                productions.push((lhs.clone(), production.to_word()?));
            }
        }

        let start_symbol = symbol(&record.start_symbol, "S")?;

        ContextFreeGrammar::new(variables, terminals, productions, start_symbol)
    }
}

impl From<&ContextFreeGrammar> for GrammarRecord {
    fn from(grammar: &ContextFreeGrammar) -> Self {
        GrammarRecord {
            variables: grammar.variables().iter().map(ToString::to_string).collect(),
            terminals: grammar.terminals().iter().map(ToString::to_string).collect(),
            productions: grammar
                .productions()
                .iter()
                .map(|(lhs, rhs)| {
                    (
                        lhs.to_string(),
                        rhs.iter().map(ProductionRecord::from).collect(),
                    )
                })
                .collect(),
            start_symbol: grammar.start_symbol().to_string(),
        }
    }
}

/// Reads a batch of named grammars.
///
/// Only a document that is not a JSON object fails as a whole. Every case is
/// converted on its own, so one malformed case leaves the others usable.
pub fn load_batch(json: &str) -> Result<IndexMap<String, Result<ContextFreeGrammar>>> {
    let cases = serde_json::from_str::<IndexMap<String, Value>>(json).map_err(GrammarError::Document)?;

    Ok(cases
        .into_iter()
        .map(|(case, value)| {
            let grammar = serde_json::from_value::<GrammarRecord>(value)
                .map_err(|source| GrammarError::Format {
                    case: case.clone(),
                    source,
                })
                .and_then(|record| ContextFreeGrammar::try_from(&record));

            (case, grammar)
        })
        .collect())
}

/// Writes grammars in the batch format read by [`load_batch`].
pub fn to_batch_json<'a>(
    cases: impl IntoIterator<Item = (&'a str, &'a ContextFreeGrammar)>,
) -> serde_json::Result<String> {
    let records = cases
        .into_iter()
        .map(|(case, grammar)| (case, GrammarRecord::from(grammar)))
        .collect::<IndexMap<_, _>>();

    serde_json::to_string_pretty(&records)
}
