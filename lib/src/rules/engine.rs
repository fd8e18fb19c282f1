//! Compiled rules and the engine which installs them.

use super::{
    b0::B0Emulation,
    build::{slot, Builder, RuleBits},
    canon::Canonical,
    hensel::Letters,
    spec::{BsRule, Counts, Neighborhood, RuleKind, RuleSpec},
    table::{Table3x3, Table4x4},
};
use crate::{
    error::{Error, ParseRuleError},
    grid::GridSize,
};
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The rule installed before any other.
pub const DEFAULT_RULE: &str = "B3/S23";

/// The 4×4 lookup tables of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Maps {
    /// The same table for every generation.
    Single(Box<Table4x4>),
    /// A rule with `B0` but without `S` for every neighbor alive.
    Alternate {
        /// For even generations.
        even: Box<Table4x4>,
        /// For odd generations.
        odd: Box<Table4x4>,
    },
}

/// A rule compiled into lookup tables, with its canonical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeRule {
    name: String,
    wolfram: Option<u8>,
    neighborhood: Neighborhood,
    totalistic: bool,
    bits: RuleBits,
    letters: [Letters; 18],
    negated: [Letters; 18],
    table: Box<Table3x3>,
    maps: Maps,
}

impl LifeRule {
    /// Builds a rule, appending `bounds` to its canonical name.
    pub fn new(kind: &RuleKind, bounds: Option<&str>) -> Self {
        let (builder, wolfram, neighborhood, totalistic, maps) = match kind {
            RuleKind::Wolfram(code) => {
                let builder = Builder {
                    table: Table3x3::wolfram(*code),
                    ..Builder::default()
                };
                let maps = Maps::Single(builder.table.to_4x4());
                (builder, Some(*code), Neighborhood::Moore, true, maps)
            }
            RuleKind::Life(rule) => {
                let builder = Builder::new(rule);
                let maps = match rule.b0_emulation() {
                    None => Maps::Single(builder.table.to_4x4()),
                    Some(B0Emulation::Inverted(inverted)) => {
                        Maps::Single(Builder::new(&inverted).table.to_4x4())
                    }
                    Some(B0Emulation::Alternating { even, odd }) => Maps::Alternate {
                        even: Builder::new(&even).table.to_4x4(),
                        odd: Builder::new(&odd).table.to_4x4(),
                    },
                };
                (builder, None, rule.neighborhood, rule.totalistic, maps)
            }
        };

        let name = Canonical {
            wolfram,
            neighborhood,
            bits: builder.bits,
            letters: &builder.letters,
            negated: &builder.negated,
            bounds,
        }
        .to_string();

        LifeRule {
            name,
            wolfram,
            neighborhood,
            totalistic,
            bits: builder.bits,
            letters: builder.letters,
            negated: builder.negated,
            table: Box::new(builder.table),
            maps,
        }
    }

    /// The canonical rule string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Wolfram code, if this is a Wolfram rule.
    pub fn wolfram(&self) -> Option<u8> {
        self.wolfram
    }

    /// The neighborhood. Wolfram rules use [`Neighborhood::Moore`].
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Whether the rule depends only on neighbor counts.
    pub fn is_totalistic(&self) -> bool {
        self.totalistic
    }

    /// The birth and survival counts which appear in the rule.
    pub fn rule_bits(&self) -> RuleBits {
        self.bits
    }

    /// The letters following `count` in the birth or survival part
    /// of the canonical name, and the letters after its `-`.
    pub fn letters(&self, count: u8, survival: bool) -> (Letters, Letters) {
        let slot = slot(count, survival);
        match (self.letters.get(slot), self.negated.get(slot)) {
            (Some(&letters), Some(&negated)) => (letters, negated),
            _ => (Letters::empty(), Letters::empty()),
        }
    }

    /// Whether the rule has `B0`.
    pub fn has_b0(&self) -> bool {
        self.wolfram.is_none() && self.bits.contains(0, false)
    }

    /// Whether this is Conway's Game of Life, on an unbounded or bounded grid.
    pub fn is_regular_life(&self) -> bool {
        self.wolfram.is_none()
            && self.neighborhood == Neighborhood::Moore
            && self.totalistic
            && self.bits == RuleBits::LIFE
    }

    /// The transition table of the rule as written, even when it has `B0`.
    pub fn table3x3(&self) -> &Table3x3 {
        &self.table
    }

    /// The compiled lookup tables.
    pub fn maps(&self) -> &Maps {
        &self.maps
    }

    /// Whether even and odd generations use different tables.
    pub fn alternate_rules(&self) -> bool {
        matches!(self.maps, Maps::Alternate { .. })
    }

    /// The lookup table for a generation.
    pub fn map(&self, generation: u64) -> &Table4x4 {
        match &self.maps {
            Maps::Single(map) => map,
            Maps::Alternate { even, odd } => {
                if generation % 2 == 0 {
                    even
                } else {
                    odd
                }
            }
        }
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        let birth: Counts = [3].iter().copied().collect();
        let survival: Counts = [2, 3].iter().copied().collect();
        let rule = BsRule::totalistic(Neighborhood::Moore, birth, survival);
        LifeRule::new(&RuleKind::Life(rule), None)
    }
}

impl FromStr for LifeRule {
    type Err = ParseRuleError;

    /// Parses and builds a rule. The bounded-grid suffix is kept as given.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let spec: RuleSpec = input.parse()?;
        Ok(LifeRule::new(&spec.kind, spec.bounds.as_deref()))
    }
}

impl Display for LifeRule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Keeps the current rule, replacing it only when a new one is
/// completely built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifeRules {
    rule: LifeRule,
}

impl LifeRules {
    /// An engine running [`DEFAULT_RULE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and installs a rule.
    ///
    /// A bounded-grid suffix is passed to `grid`, whose answer ends the
    /// canonical name; without one the grid is made unbounded. On error
    /// the previous rule stays installed.
    pub fn set_rule<G: GridSize + ?Sized>(
        &mut self,
        input: &str,
        grid: &mut G,
    ) -> Result<(), Error> {
        let spec: RuleSpec = input.parse()?;
        let bounds = match &spec.bounds {
            Some(suffix) => grid.set_grid_size(suffix).map_err(Error::GridSize)?,
            None => {
                grid.set_unbounded();
                None
            }
        };
        let rule = LifeRule::new(&spec.kind, bounds.as_deref());
        debug!("Installed rule {}", rule.name());
        self.rule = rule;
        Ok(())
    }

    /// The current rule.
    pub fn rule(&self) -> &LifeRule {
        &self.rule
    }

    /// The canonical name of the current rule.
    pub fn get_rule(&self) -> &str {
        self.rule.name()
    }

    /// The default rule name.
    pub fn default_rule(&self) -> &'static str {
        DEFAULT_RULE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::VerbatimGrid, rules::table::CENTER};

    #[test]
    fn default_is_life() {
        let rules = LifeRules::new();
        assert_eq!(rules.get_rule(), DEFAULT_RULE);
        assert!(rules.rule().is_regular_life());
        assert_eq!(rules.rule(), &"b3s23".parse::<LifeRule>().unwrap());
    }

    #[test]
    fn regular_life() {
        let life = |s: &str| s.parse::<LifeRule>().unwrap().is_regular_life();
        assert!(life("23/3"));
        assert!(life("B3/S23:T30,30"));
        assert!(!life("B3/S23H"));
        assert!(!life("B3/S236"));
        assert!(!life("W110"));
    }

    #[test]
    fn failed_rule_keeps_previous() {
        let mut rules = LifeRules::new();
        let mut grid = VerbatimGrid::new();
        rules.set_rule("B36/S23", &mut grid).unwrap();
        assert_eq!(
            rules.set_rule("B36/S2x", &mut grid),
            Err(Error::ParseRule(ParseRuleError::BadChar('x')))
        );
        assert_eq!(rules.get_rule(), "B36/S23");
    }

    #[test]
    fn grid_errors_keep_previous() {
        let mut rules = LifeRules::new();
        let mut grid = VerbatimGrid::new();
        assert!(matches!(
            rules.set_rule("B36/S23:", &mut grid),
            Err(Error::GridSize(_))
        ));
        assert_eq!(rules.get_rule(), DEFAULT_RULE);
    }

    #[test]
    fn bounds_come_from_the_grid() {
        let mut rules = LifeRules::new();
        let mut grid = VerbatimGrid::new();
        rules.set_rule("b3s23:T20,20", &mut grid).unwrap();
        assert_eq!(rules.get_rule(), "B3/S23:T20,20");
        assert_eq!(grid.suffix(), Some(":T20,20"));
        rules.set_rule("B2/S", &mut grid).unwrap();
        assert_eq!(grid.suffix(), None);
    }

    #[test]
    fn b0_maps() {
        let rule: LifeRule = "B03/S23".parse().unwrap();
        assert!(rule.alternate_rules());
        assert!(rule.has_b0());
        assert_eq!(rule.name(), "B03/S23");
        assert!(rule.table3x3()[0]);
        // Nothing is born from an empty block in either generation.
        assert_eq!(rule.map(0).lookup(0), 0);
        assert_eq!(rule.map(1).lookup(0), 0);
        assert_ne!(rule.map(0), rule.map(1));

        let rule: LifeRule = "B03/S238".parse().unwrap();
        assert!(!rule.alternate_rules());
        assert_eq!(rule.map(0), rule.map(1));
        assert_eq!(rule.map(0).lookup(0), 0);
    }

    #[test]
    fn wolfram_rule() {
        let rule: LifeRule = "w110".parse().unwrap();
        assert_eq!(rule.name(), "W110");
        assert_eq!(rule.wolfram(), Some(110));
        assert!(!rule.has_b0());
        assert!(rule.table3x3()[CENTER]);
    }

    #[test]
    fn letters_of_counts() {
        let rule: LifeRule = "B2-a/S2ak3".parse().unwrap();
        assert_eq!(rule.name(), "B2-a/S2ak3");
        assert_eq!(rule.letters(2, false), (Letters::empty(), Letters::A));
        assert_eq!(rule.letters(2, true), (Letters::A | Letters::K, Letters::empty()));
        assert_eq!(rule.letters(30, true), (Letters::empty(), Letters::empty()));
    }
}
