use derive_more::Display;
use enumflags2::{bitflags, BitFlags};
use indexmap::IndexSet;
use log::debug;

use crate::{
    grammars::{context_free::ContextFreeGrammar, erasing, unit},
    language::Symbol,
};

/// A simplification stage. Selected stages always run in declaration order.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    #[display("ε-production elimination")]
    Erasing = 0b001,
    #[display("unit production elimination")]
    Unit = 0b010,
    #[display("useless symbol elimination")]
    Useless = 0b100,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    stages: BitFlags<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stages: BitFlags::all(),
        }
    }
}

/// The outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct Simplification {
    /// Nullable variables of the input grammar.
    pub nullable: IndexSet<Symbol>,
    /// The grammar after each executed stage.
    pub steps: Vec<(Stage, ContextFreeGrammar)>,
    pub grammar: ContextFreeGrammar,
}

impl Pipeline {
    /// Selecting [`Stage::Unit`] also selects [`Stage::Erasing`]. Unit
    /// elimination never inlines ε-productions, which only preserves the
    /// language once every ε-production other than `start → ε` is gone.
    pub fn new(stages: impl Into<BitFlags<Stage>>) -> Self {
        let mut stages = stages.into();
        if stages.contains(Stage::Unit) {
            stages |= Stage::Erasing;
        }

        Self { stages }
    }

    pub fn stages(&self) -> BitFlags<Stage> {
        self.stages
    }

    pub fn run(&self, grammar: &ContextFreeGrammar) -> Simplification {
        let nullable = grammar.nullable_variables();
        let mut current = grammar.clone();
        let mut steps = Vec::with_capacity(self.stages.len());

        for stage in self.stages.iter() {
            current = match stage {
                Stage::Erasing => current.with_productions(erasing::eliminate_erasing_productions(
                    current.productions(),
                    &nullable,
                    current.start_symbol(),
                )),
                Stage::Unit => {
                    current.with_productions(unit::eliminate_unit_productions(current.productions()))
                }
                Stage::Useless => current.without_useless_symbols(),
            };

            debug!(
                "After {}: {} variables, {} productions",
                stage,
                current.variables().len(),
                current.production_count()
            );

            steps.push((stage, current.clone()));
        }

        Simplification {
            nullable,
            steps,
            grammar: current,
        }
    }
}
