use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    grammars::types::Productions,
    language::{Symbol, Word},
};

/// Variables that derive the empty word in zero or more steps.
pub fn nullable_variables(productions: &Productions) -> IndexSet<Symbol> {
    let mut nullables = productions
        .iter()
        .filter(|(_, rhs)| rhs.iter().any(Word::is_epsilon))
        .map(|(lhs, _)| lhs.clone())
        .collect::<IndexSet<_>>();

    loop {
        let mut changed = false;

        for (lhs, rhs) in productions {
            if nullables.contains(lhs) {
                continue;
            }

            let is_nullable = rhs
                .iter()
                .any(|word| word.symbols().all(|symbol| nullables.contains(symbol)));

            if is_nullable {
                trace!("{lhs} is nullable");
                nullables.insert(lhs.clone());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    debug!("Nullable variables: {{{}}}", nullables.iter().join(", "));

    nullables
}
