pub use crate::{
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Productions, SymbolKind},
    },
    language::{Symbol, Word, EPSILON},
    pipeline::{Pipeline, Simplification, Stage},
};
