//! Simplification of context-free grammars.
//!
//! A grammar is rewritten into an equivalent one without ε-productions (other
//! than a possible `S → ε`), without unit productions and without useless
//! symbols:
//!
//! ```
//! use simplify::grammar::{ContextFreeGrammar, Symbol};
//!
//! let cfg = ContextFreeGrammar::from_productions(
//!     "S",
//!     &["S → AB", "A → a | ε", "B → b | C", "C → Cc"],
//! )
//! .unwrap();
//!
//! let simplified = cfg.simplify();
//! assert!(!simplified.variables().contains(&Symbol::new("C")));
//! ```

pub mod errors;
pub mod grammar;
pub mod grammars;
pub mod input;
pub mod language;
pub mod parser;
pub mod pipeline;
