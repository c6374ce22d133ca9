use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;
use log::warn;
use tabled::{builder::Builder, settings::Style};

use crate::{
    errors::{GrammarError, Result},
    grammars::{
        erasing, nullable,
        types::{Productions, SymbolKind},
        unit, useless,
    },
    language::{Symbol, Word},
    pipeline::Pipeline,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    pub(super) variables: IndexSet<Symbol>,
    pub(super) terminals: IndexSet<Symbol>,
    pub(super) productions: Productions,
    pub(super) start_symbol: Symbol,
}

impl ContextFreeGrammar {
    /// Builds a grammar from its four components.
    ///
    /// Every variable gets a production set, empty if nothing was given for
    /// it. Productions whose left-hand side is not a declared variable are
    /// dropped with a warning. Right-hand sides are taken as they are; undeclared
    /// symbols in them are only reported.
    pub fn new(
        variables: impl IntoIterator<Item = Symbol>,
        terminals: impl IntoIterator<Item = Symbol>,
        productions: impl IntoIterator<Item = (Symbol, Word)>,
        start_symbol: Symbol,
    ) -> Result<Self> {
        let variables = variables.into_iter().collect::<IndexSet<_>>();
        let terminals = terminals.into_iter().collect::<IndexSet<_>>();

        if !variables.contains(&start_symbol) {
            return Err(GrammarError::UndeclaredStart(start_symbol.to_string()));
        }

        let mut grouped = variables
            .iter()
            .map(|variable| (variable.clone(), IndexSet::new()))
            .collect::<Productions>();
        let mut undeclared = IndexSet::new();

        for (lhs, rhs) in productions {
            match grouped.get_mut(&lhs) {
                Some(words) => {
                    words.insert(rhs);
                }
                None => {
                    if undeclared.insert(lhs.clone()) {
                        warn!("Dropping productions of undeclared variable {lhs}");
                    }
                }
            }
        }

        let grammar = Self {
            variables,
            terminals,
            productions: grouped,
            start_symbol,
        };

        for symbol in grammar.undefined_symbols() {
            warn!("{symbol} is declared neither as a variable nor as a terminal");
        }

        Ok(grammar)
    }

    /// Same terminals and start symbol, new variables and productions.
    pub(crate) fn with_parts(&self, variables: IndexSet<Symbol>, productions: Productions) -> Self {
        Self {
            variables,
            terminals: self.terminals.clone(),
            productions,
            start_symbol: self.start_symbol.clone(),
        }
    }

    pub(crate) fn with_productions(&self, productions: Productions) -> Self {
        self.with_parts(self.variables.clone(), productions)
    }

    pub fn variables(&self) -> &IndexSet<Symbol> {
        &self.variables
    }

    pub fn terminals(&self) -> &IndexSet<Symbol> {
        &self.terminals
    }

    pub fn productions(&self) -> &Productions {
        &self.productions
    }

    pub fn productions_of(&self, variable: &Symbol) -> Option<&IndexSet<Word>> {
        self.productions.get(variable)
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn is_variable(&self, symbol: &Symbol) -> bool {
        self.variables.contains(symbol)
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    /// Variables win over terminals for symbols declared as both.
    pub fn classify(&self, symbol: &Symbol) -> SymbolKind {
        if self.is_variable(symbol) {
            SymbolKind::Variable
        } else if self.is_terminal(symbol) {
            SymbolKind::Terminal
        } else {
            SymbolKind::Undefined
        }
    }

    /// Symbols used on some right-hand side that are declared neither as
    /// variables nor as terminals.
    pub fn undefined_symbols(&self) -> IndexSet<Symbol> {
        self.productions
            .values()
            .flatten()
            .flat_map(Word::symbols)
            .filter(|symbol| self.classify(symbol) == SymbolKind::Undefined)
            .cloned()
            .collect()
    }

    pub fn nullable_variables(&self) -> IndexSet<Symbol> {
        nullable::nullable_variables(&self.productions)
    }

    pub fn without_erasing_productions(&self) -> Self {
        let nullables = self.nullable_variables();

        self.with_productions(erasing::eliminate_erasing_productions(
            &self.productions,
            &nullables,
            &self.start_symbol,
        ))
    }

    /// Eliminates ε-productions first, see [`Pipeline::new`].
    pub fn without_unit_productions(&self) -> Self {
        let erased = self.without_erasing_productions();

        erased.with_productions(unit::eliminate_unit_productions(&erased.productions))
    }

    pub fn without_useless_symbols(&self) -> Self {
        useless::eliminate_useless_symbols(self)
    }

    /// Runs every simplification stage in order.
    pub fn simplify(&self) -> Self {
        Pipeline::default().run(self).grammar
    }

    /// The start symbol first, then the other variables in sorted order.
    fn ordered_variables(&self) -> Vec<&Symbol> {
        std::iter::once(&self.start_symbol)
            .chain(
                self.variables
                    .iter()
                    .filter(|variable| **variable != self.start_symbol)
                    .sorted(),
            )
            .collect()
    }

    fn alternatives(&self, variable: &Symbol) -> String {
        match self.productions_of(variable) {
            Some(words) if !words.is_empty() => words.iter().join(" | "),
            _ => "∅".to_string(),
        }
    }

    fn signature(&self) -> String {
        format!(
            "G = ({{{}}}, {{{}}}, P, {})",
            self.ordered_variables().iter().join(", "),
            self.terminals.iter().sorted().join(", "),
            self.start_symbol
        )
    }

    pub fn definition(&self) -> String {
        let mut definition = format!("{}\n\n", self.signature());

        definition += "P = {\n";

        for variable in self.ordered_variables() {
            definition += &format!("  {} → {}\n", variable, self.alternatives(variable));
        }

        definition += "}\n";

        definition
    }

    pub fn production_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Variable", "Productions"]);
        for variable in self.ordered_variables() {
            builder.push_record([variable.to_string(), self.alternatives(variable)]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        format!("{}\n{}", self.signature(), table)
    }

    /// Number of productions, counting every alternative separately.
    pub fn production_count(&self) -> usize {
        self.productions.values().map(IndexSet::len).sum()
    }
}

impl Display for ContextFreeGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.definition())
    }
}
