//! Parser for grammars written as production lists, e.g.
//!
//! ```text
//! S → AB | aS | ε
//! A -> a
//! ```
//!
//! Every symbol is one character. Uppercase letters are variables, all other
//! non-blank characters are terminals and an alternative consisting of `ε`
//! alone is the empty word.

use indexmap::IndexSet;
use winnow::{
    ascii::space0,
    combinator::{alt, preceded, repeat, separated, terminated},
    prelude::*,
    token::{any, one_of},
};

use crate::{
    errors::{GrammarError, Result},
    grammars::context_free::ContextFreeGrammar,
    language::{Symbol, Word, EPSILON},
};

type ProductionLine = (char, Vec<Vec<char>>);

fn arrow(input: &mut &str) -> ModalResult<()> {
    alt(("→", "->")).void().parse_next(input)
}

fn alternative(input: &mut &str) -> ModalResult<Vec<char>> {
    repeat(
        0..,
        preceded(space0, any.verify(|c: &char| !c.is_whitespace() && *c != '|')),
    )
    .parse_next(input)
}

fn is_variable(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn production_line(input: &mut &str) -> ModalResult<ProductionLine> {
    let lhs = preceded(space0, one_of(is_variable));
    let alternatives = separated(1.., alternative, (space0, '|'));

    (
        terminated(lhs, (space0, arrow)),
        terminated(alternatives, space0),
    )
        .parse_next(input)
}

fn is_epsilon(c: &char) -> bool {
    EPSILON.starts_with(*c)
}

/// `ε` stands for the empty word only when it is the whole alternative.
fn to_word(alternative: &[char]) -> Option<Word> {
    match alternative {
        [c] if is_epsilon(c) => Some(Word::epsilon()),
        _ if alternative.iter().any(is_epsilon) => None,
        _ => Some(alternative.iter().map(|&c| Symbol::from(c)).collect()),
    }
}

/// Builds a grammar from production lines. Blank lines and lines starting
/// with `#` are skipped.
pub fn parse_productions<S: AsRef<str>>(
    start_symbol: Option<&str>,
    lines: impl IntoIterator<Item = S>,
) -> Result<ContextFreeGrammar> {
    let mut parsed = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (lhs, alternatives) =
            production_line.parse(line).map_err(|e| GrammarError::Syntax {
                line: index + 1,
                message: e.to_string(),
            })?;

        let words = alternatives
            .iter()
            .map(|alternative| {
                to_word(alternative).ok_or_else(|| GrammarError::Syntax {
                    line: index + 1,
                    message: format!(
                        "{EPSILON} must stand alone in \"{}\"",
                        alternative.iter().collect::<String>()
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        parsed.push((lhs, words));
    }

    let start_symbol = match start_symbol {
        Some(start_symbol) if start_symbol.is_empty() => {
            return Err(GrammarError::EmptySymbol("start symbol"))
        }
        Some(start_symbol) => Symbol::new(start_symbol),
        None => match parsed.first() {
            Some((lhs, _)) => Symbol::from(*lhs),
            None => return Err(GrammarError::NoProductions),
        },
    };

    let mut variables = IndexSet::new();
    let mut terminals = IndexSet::new();
    let mut productions = Vec::new();

    for (lhs, _) in &parsed {
        variables.insert(Symbol::from(*lhs));
    }

    for (lhs, words) in parsed {
        for word in words {
            for symbol in word.symbols() {
                if symbol.as_str().starts_with(is_variable) {
                    variables.insert(symbol.clone());
                } else {
                    terminals.insert(symbol.clone());
                }
            }

            productions.push((Symbol::from(lhs), word));
        }
    }

    ContextFreeGrammar::new(variables, terminals, productions, start_symbol)
}

/// Parses a whole grammar text, one production group per line.
pub fn parse_grammar(text: &str, start_symbol: Option<&str>) -> Result<ContextFreeGrammar> {
    parse_productions(start_symbol, text.lines())
}

impl ContextFreeGrammar {
    pub fn from_productions(
        start_symbol: impl AsRef<str>,
        productions: &[impl AsRef<str>],
    ) -> Result<Self> {
        parse_productions(Some(start_symbol.as_ref()), productions)
    }
}
