use std::collections::{HashMap, HashSet};

use simplify::grammar::{ContextFreeGrammar, Symbol};

/// Helper function to read in an entire test data file
#[allow(dead_code)]
pub fn read_test_file(filename: &str) -> String {
    std::fs::read_to_string(test_file_path(filename)).expect("failed to read test file")
}

/// Helper function to get a valid path to a test file in the testdata directory
pub fn test_file_path(filename: &str) -> String {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push(format!("tests/testdata/{}", filename));

    p.into_os_string()
        .into_string()
        .expect("failed to build filename")
}

/// Every terminal string of at most `max_len` symbols derivable from the start
/// symbol. Strings longer than the bound never help to build shorter ones, so
/// truncating while iterating to the fixpoint gives the exact answer.
#[allow(dead_code)]
pub fn language_up_to(grammar: &ContextFreeGrammar, max_len: usize) -> HashSet<Vec<Symbol>> {
    let mut derived = grammar
        .variables()
        .iter()
        .map(|variable| (variable.clone(), HashSet::<Vec<Symbol>>::new()))
        .collect::<HashMap<_, _>>();

    loop {
        let mut changed = false;

        for (lhs, rhs) in grammar.productions() {
            for word in rhs {
                let mut strings = HashSet::from([Vec::new()]);

                for symbol in word.symbols() {
                    let options = if grammar.is_variable(symbol) {
                        derived[symbol].iter().cloned().collect::<Vec<_>>()
                    } else if grammar.is_terminal(symbol) {
                        vec![vec![symbol.clone()]]
                    } else {
                        Vec::new()
                    };

                    strings = strings
                        .iter()
                        .flat_map(|prefix| {
                            options
                                .iter()
                                .filter(move |suffix| prefix.len() + suffix.len() <= max_len)
                                .map(move |suffix| [prefix.as_slice(), suffix.as_slice()].concat())
                        })
                        .collect();
                }

                let target = derived.get_mut(lhs).expect("production of an unknown variable");
                for string in strings {
                    changed |= target.insert(string);
                }
            }
        }

        if !changed {
            break;
        }
    }

    derived.remove(grammar.start_symbol()).unwrap_or_default()
}
