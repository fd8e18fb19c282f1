//! Emulating rules with `B0`.
//!
//! Under a rule with `B0`, an empty universe becomes full after one
//! generation. Such a rule is run as a rule without `B0`, whose
//! generations alternate between the original pattern and its
//! complement.

use super::spec::{BsRule, Counts};

/// How a rule with `B0` is emulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum B0Emulation {
    /// The rule also has `S` with every neighbor alive, so the full
    /// universe stays full. Every generation uses the same rule on
    /// the complement.
    Inverted(BsRule),
    /// The full universe becomes empty again. Even generations and odd
    /// generations use different rules.
    Alternating {
        /// The rule for even generations.
        even: BsRule,
        /// The rule for odd generations.
        odd: BsRule,
    },
}

impl BsRule {
    /// How to emulate this rule without `B0`.
    ///
    /// `None` unless the rule is totalistic and contains `B0`.
    pub fn b0_emulation(&self) -> Option<B0Emulation> {
        let birth = self.birth_counts();
        if !self.totalistic || !birth.contains(0) {
            return None;
        }
        let survival = self.survival_counts();
        let neighborhood = self.neighborhood;
        let max = neighborhood.neighbors();

        let select =
            |keep: &dyn Fn(u8) -> bool| -> Counts { (0..=max).filter(|&i| keep(i)).collect() };
        let mirror = |keep: &dyn Fn(u8) -> bool| -> Counts {
            (0..=max).filter(|&i| keep(i)).map(|i| max - i).collect()
        };

        let emulation = if survival.contains(max) {
            B0Emulation::Inverted(BsRule::totalistic(
                neighborhood,
                mirror(&|i| !survival.contains(i)),
                mirror(&|i| !birth.contains(i)),
            ))
        } else {
            B0Emulation::Alternating {
                even: BsRule::totalistic(
                    neighborhood,
                    select(&|i| !birth.contains(i)),
                    select(&|i| !survival.contains(i)),
                ),
                odd: BsRule::totalistic(
                    neighborhood,
                    mirror(&|i| survival.contains(i)),
                    mirror(&|i| birth.contains(i)),
                ),
            }
        };
        Some(emulation)
    }
}
