use std::collections::VecDeque;

use indexmap::IndexSet;
use log::{debug, trace};

use crate::{
    grammars::types::Productions,
    language::{Symbol, Word},
};

/// Replaces every unit production `A → B` by the productions of `B`.
///
/// Only symbols that own a production set are inlined; a one-symbol word
/// naming a terminal or an undefined symbol is an ordinary production.
///
/// `productions` must already be free of ε-productions apart from
/// `start → ε`, as left by [`eliminate_erasing_productions`].
///
/// [`eliminate_erasing_productions`]: crate::grammars::erasing::eliminate_erasing_productions
pub fn eliminate_unit_productions(productions: &Productions) -> Productions {
    debug!("Eliminating unit productions");

    productions
        .iter()
        .map(|(lhs, rhs)| (lhs.clone(), inline_units(lhs, rhs, productions)))
        .collect()
}

/// Works through `rhs` with a queue. Each variable is inlined into `lhs` at
/// most once and `lhs → lhs` is dropped outright, so cyclic unit chains
/// terminate. Inlined ε-productions are skipped: only the start symbol may
/// keep one, and it was put there on purpose.
fn inline_units(lhs: &Symbol, rhs: &IndexSet<Word>, productions: &Productions) -> IndexSet<Word> {
    let mut inlined = IndexSet::from([lhs.clone()]);
    let mut queue = rhs.iter().cloned().collect::<VecDeque<_>>();
    let mut next_rhs = IndexSet::new();

    while let Some(word) = queue.pop_front() {
        let unit = word
            .single()
            .and_then(|symbol| productions.get_key_value(symbol));

        match unit {
            Some((target, target_rhs)) => {
                if inlined.insert(target.clone()) {
                    trace!("Inlining {target} into {lhs}");
                    queue.extend(target_rhs.iter().filter(|w| !w.is_epsilon()).cloned());
                }
            }
            None => {
                next_rhs.insert(word);
            }
        }
    }

    next_rhs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(words: &[&str]) -> IndexSet<Word> {
        words.iter().map(|word| Word::from_chars(word)).collect()
    }

    fn productions(groups: &[(&str, &[&str])]) -> Productions {
        groups
            .iter()
            .map(|(lhs, rhs)| (Symbol::new(lhs), words(rhs)))
            .collect()
    }

    #[test]
    fn unit_chain_collapses() {
        let p = productions(&[("S", &["A"]), ("A", &["B"]), ("B", &["b"])]);

        let result = eliminate_unit_productions(&p);

        assert_eq!(
            result,
            productions(&[("S", &["b"]), ("A", &["b"]), ("B", &["b"])])
        );
    }

    #[test]
    fn unit_cycles_terminate() {
        let p = productions(&[("A", &["B", "a"]), ("B", &["C", "b"]), ("C", &["A", "B", "c"])]);

        let result = eliminate_unit_productions(&p);

        for variable in ["A", "B", "C"] {
            assert_eq!(result[&Symbol::new(variable)], words(&["a", "b", "c"]));
        }
    }

    #[test]
    fn self_loops_are_dropped() {
        let p = productions(&[("S", &["S", "aS", "a"])]);

        let result = eliminate_unit_productions(&p);

        assert_eq!(result[&Symbol::new("S")], words(&["aS", "a"]));
    }

    #[test]
    fn single_terminals_and_unknown_symbols_are_kept() {
        let p = productions(&[("S", &["a", "X", "AB"]), ("A", &["a"]), ("B", &["b"])]);

        let result = eliminate_unit_productions(&p);

        assert_eq!(result[&Symbol::new("S")], words(&["a", "X", "AB"]));
    }

    #[test]
    fn inlining_skips_the_start_epsilon() {
        let p = productions(&[("S", &["aA", ""]), ("A", &["S", "b"])]);

        let result = eliminate_unit_productions(&p);

        assert_eq!(result[&Symbol::new("S")], words(&["aA", ""]));
        assert_eq!(result[&Symbol::new("A")], words(&["b", "aA"]));
    }

    #[test]
    fn inlined_words_keep_their_units_resolved() {
        let p = productions(&[("S", &["A", "B"]), ("A", &["B", "aa"]), ("B", &["A", "bb"])]);

        let result = eliminate_unit_productions(&p);

        assert_eq!(result[&Symbol::new("S")], words(&["aa", "bb"]));
        assert_eq!(result[&Symbol::new("A")], words(&["aa", "bb"]));
        assert_eq!(result[&Symbol::new("B")], words(&["aa", "bb"]));
    }
}
