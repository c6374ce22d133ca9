use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    grammars::{context_free::ContextFreeGrammar, types::Productions},
    language::{Symbol, Word},
};

/// Variables deriving at least one string of terminals.
///
/// Undefined symbols are never generating, so any word using one cannot make
/// its left-hand side generating.
pub fn generating_variables(grammar: &ContextFreeGrammar) -> IndexSet<Symbol> {
    let mut generating = IndexSet::new();

    loop {
        let mut changed = false;

        for (lhs, rhs) in &grammar.productions {
            if generating.contains(lhs) {
                continue;
            }

            let is_generating = rhs.iter().any(|word| {
                word.symbols()
                    .all(|symbol| grammar.is_terminal(symbol) || generating.contains(symbol))
            });

            if is_generating {
                trace!("{lhs} is generating");
                generating.insert(lhs.clone());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    generating
}

/// Variables appearing in some sentential form derived from the start symbol.
pub fn reachable_variables(grammar: &ContextFreeGrammar) -> IndexSet<Symbol> {
    let mut reachable = IndexSet::from([grammar.start_symbol.clone()]);
    let mut index = 0;

    while let Some(variable) = reachable.get_index(index).cloned() {
        if let Some(rhs) = grammar.productions.get(&variable) {
            for symbol in rhs.iter().flat_map(Word::symbols) {
                if grammar.is_variable(symbol) && reachable.insert(symbol.clone()) {
                    trace!("{symbol} is reachable from {variable}");
                }
            }
        }

        index += 1;
    }

    reachable
}

/// Keeps only the variables that are both generating and reachable.
///
/// Generating symbols have to be computed first: a variable reachable only
/// through a non-generating one would otherwise survive.
pub fn eliminate_useless_symbols(grammar: &ContextFreeGrammar) -> ContextFreeGrammar {
    debug!("Eliminating useless symbols");

    let generating = generating_variables(grammar);
    let grammar = retain_variables(grammar, &generating);

    let reachable = reachable_variables(&grammar);
    retain_variables(&grammar, &reachable)
}

/// Restricts the variables to `keep` and drops every word using a symbol that
/// is neither a kept variable nor a terminal.
///
/// The start symbol is never removed. If it is not in `keep` it stays with an
/// empty production set, meaning the grammar generates nothing.
fn retain_variables(grammar: &ContextFreeGrammar, keep: &IndexSet<Symbol>) -> ContextFreeGrammar {
    let kept = grammar
        .variables
        .iter()
        .filter(|variable| keep.contains(*variable))
        .cloned()
        .collect::<IndexSet<_>>();

    let removed = grammar
        .variables
        .iter()
        .filter(|variable| !kept.contains(*variable))
        .collect::<Vec<_>>();
    if !removed.is_empty() {
        debug!("Removing {}", removed.iter().join(", "));
    }

    let is_useful = |word: &Word| {
        word.symbols()
            .all(|symbol| kept.contains(symbol) || grammar.is_terminal(symbol))
    };

    let mut variables = kept.clone();
    let mut productions = kept
        .iter()
        .map(|variable| {
            let rhs: IndexSet<Word> = grammar
                .productions
                .get(variable)
                .map(|rhs| rhs.iter().filter(|&word| is_useful(word)).cloned().collect())
                .unwrap_or_default();

            (variable.clone(), rhs)
        })
        .collect::<Productions>();

    if !kept.contains(&grammar.start_symbol) {
        debug!("{} generates no string", grammar.start_symbol);
        variables.insert(grammar.start_symbol.clone());
        productions.insert(grammar.start_symbol.clone(), IndexSet::new());
    }

    grammar.with_parts(variables, productions)
}
