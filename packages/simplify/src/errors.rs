//! Errors raised while turning external input into a grammar.
//!
//! The simplification stages themselves never fail: once a grammar has been
//! constructed every stage is a total function over it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    /// The batch document is not a JSON object of named cases.
    #[error("invalid grammar batch: {0}")]
    Document(#[source] serde_json::Error),

    /// A required field is missing or has the wrong shape.
    #[error("case '{case}': {source}")]
    Format {
        case: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty symbol in {0}")]
    EmptySymbol(&'static str),

    #[error("start symbol '{0}' is not a declared variable")]
    UndeclaredStart(String),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("no productions given")]
    NoProductions,
}

pub type Result<T> = std::result::Result<T, GrammarError>;
