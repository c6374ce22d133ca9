use indexmap::IndexSet;
use log::{debug, trace};

use crate::{
    grammars::types::Productions,
    language::{Symbol, Word},
};

/// Removes every ε-production. When the start symbol is nullable it keeps a
/// single `start → ε` so the language still contains the empty word.
///
/// Each word is replaced by all the non-empty words obtained by deleting some
/// of its nullable occurrences. A variable whose only production was ε ends
/// up with an empty set; it is left for the useless symbol pass to remove.
pub fn eliminate_erasing_productions(
    productions: &Productions,
    nullables: &IndexSet<Symbol>,
    start_symbol: &Symbol,
) -> Productions {
    debug!("Eliminating ε-productions");

    let mut next_productions = productions
        .iter()
        .map(|(lhs, rhs)| {
            let mut next_rhs = IndexSet::new();

            for word in rhs {
                let variants = erased_variants(word, nullables);
                trace!("{lhs} → {word} expands to {} productions", variants.len());
                next_rhs.extend(variants);
            }

            (lhs.clone(), next_rhs)
        })
        .collect::<Productions>();

    if nullables.contains(start_symbol) {
        if let Some(rhs) = next_productions.get_mut(start_symbol) {
            rhs.insert(Word::epsilon());
        }
    }

    next_productions
}

/// Walks the word once, branching on every nullable occurrence: one branch
/// keeps it, the other deletes it. Partial words are deduplicated as they
/// grow, so the work is bounded by the number of distinct variants rather
/// than by `2^k` for `k` nullable occurrences. The all-kept branch comes
/// first, so the original word leads the result.
fn erased_variants(word: &Word, nullables: &IndexSet<Symbol>) -> IndexSet<Word> {
    let mut partials = IndexSet::from([Vec::new()]);

    for symbol in word.symbols() {
        let is_nullable = nullables.contains(symbol);

        partials = partials
            .into_iter()
            .flat_map(|partial: Vec<Symbol>| {
                let mut kept = partial.clone();
                kept.push(symbol.clone());

                if is_nullable {
                    vec![kept, partial]
                } else {
                    vec![kept]
                }
            })
            .collect();
    }

    partials
        .into_iter()
        .filter(|partial| !partial.is_empty())
        .map(Word)
        .collect()
}
