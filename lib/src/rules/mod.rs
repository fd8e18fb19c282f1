//! Rules of Life-like cellular automata.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).
//!
//! A rule string is parsed into a [`RuleSpec`], then built into a
//! [`LifeRule`]: a 3×3 transition table, the 4×4 lookup tables compiled
//! from it, and the canonical rule string.

mod b0;
mod build;
mod canon;
mod engine;
mod hensel;
mod parse;
mod spec;
mod table;

pub use b0::B0Emulation;
pub use build::{RuleBits, SURVIVAL_OFFSET};
pub use engine::{LifeRule, LifeRules, Maps, DEFAULT_RULE};
pub use hensel::{Letters, ALPHABET};
pub use spec::{BsRule, Counts, Neighborhood, RuleKind, RuleSpec, Term};
pub use table::{flip, rotate90, Table3x3, Table4x4, ALL_3X3, ALL_4X4, CENTER};
