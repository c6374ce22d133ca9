//! Invariants of simplified grammars, checked over small random grammars.

use enumflags2::BitFlags;
use proptest::prelude::*;
use simplify::{
    grammar::{ContextFreeGrammar, Pipeline, Stage, Symbol, Word},
    grammars::useless::{generating_variables, reachable_variables},
};
mod common;

const VARIABLES: [&str; 4] = ["S", "A", "B", "C"];
const TERMINALS: [&str; 2] = ["a", "b"];

fn word() -> impl Strategy<Value = Vec<&'static str>> {
    let symbols = VARIABLES.iter().chain(TERMINALS.iter()).copied().collect::<Vec<_>>();
    prop::collection::vec(prop::sample::select(symbols), 0..=3)
}

fn grammar() -> impl Strategy<Value = ContextFreeGrammar> {
    prop::collection::vec((prop::sample::select(VARIABLES.to_vec()), word()), 1..10).prop_map(
        |productions| {
            ContextFreeGrammar::new(
                VARIABLES.map(Symbol::new),
                TERMINALS.map(Symbol::new),
                productions
                    .into_iter()
                    .map(|(lhs, rhs)| (Symbol::new(lhs), Word::new(rhs.into_iter().map(Symbol::new)))),
                Symbol::new("S"),
            )
            .unwrap()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn epsilon_only_on_a_nullable_start(g in grammar()) {
        let simplified = g.simplify();
        let start = simplified.start_symbol();

        for (lhs, rhs) in simplified.productions() {
            if lhs != start {
                prop_assert!(!rhs.contains(&Word::epsilon()), "{lhs} → ε in\n{simplified}");
            }
        }

        let start_has_epsilon = simplified
            .productions_of(start)
            .is_some_and(|rhs| rhs.contains(&Word::epsilon()));
        prop_assert_eq!(start_has_epsilon, g.nullable_variables().contains(start));
    }

    #[test]
    fn no_unit_productions_remain(g in grammar()) {
        let simplified = g.simplify();

        for word in simplified.productions().values().flatten() {
            let is_unit = word.single().is_some_and(|symbol| simplified.is_variable(symbol));
            prop_assert!(!is_unit, "unit production {word} in\n{simplified}");
        }
    }

    #[test]
    fn every_variable_is_useful(g in grammar()) {
        let simplified = g.simplify();
        let start = simplified.start_symbol();
        let generating = generating_variables(&simplified);
        let reachable = reachable_variables(&simplified);
        let empty_language = simplified.productions_of(start).is_some_and(|rhs| rhs.is_empty());

        for variable in simplified.variables() {
            if empty_language && variable == start {
                continue;
            }
            prop_assert!(generating.contains(variable), "{variable} generates nothing");
            prop_assert!(reachable.contains(variable), "{variable} is unreachable");
        }

        for symbol in simplified.productions().values().flatten().flat_map(Word::symbols) {
            prop_assert!(simplified.is_variable(symbol) || simplified.is_terminal(symbol));
        }
    }

    #[test]
    fn simplification_is_idempotent(g in grammar()) {
        let once = g.simplify();
        let twice = once.simplify();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn language_is_preserved(g in grammar()) {
        let simplified = g.simplify();

        prop_assert_eq!(
            common::language_up_to(&g, 4),
            common::language_up_to(&simplified, 4)
        );
    }

    #[test]
    fn every_stage_selection_preserves_the_language(g in grammar(), bits in 0u8..8) {
        let stages = BitFlags::<Stage>::from_bits_truncate(bits);
        let result = Pipeline::new(stages).run(&g);

        prop_assert_eq!(
            common::language_up_to(&g, 4),
            common::language_up_to(&result.grammar, 4),
            "stages {:?}", stages
        );
    }
}
