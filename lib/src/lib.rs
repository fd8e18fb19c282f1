//! A rule engine for Life-like cellular automata.
//!
//! Rule strings such as `B3/S23`, `B2-a/S12`, `B2/S34H` or `W110` are
//! parsed and built into transition tables by [`LifeRules`]. Rules with
//! more states are loaded from rule trees by [`TreeRules`].

mod config;
mod error;
mod grid;
pub mod rules;
mod states;
pub mod tree;

pub use config::Config;
pub use error::{Error, ParseRuleError, TreeError};
pub use grid::{GridSize, VerbatimGrid};
pub use rules::{LifeRule, LifeRules};
pub use states::{State, ALIVE, DEAD};
pub use tree::{RuleTree, TreeRules};
