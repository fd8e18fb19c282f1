//! Parsed rule strings.

use super::hensel::Letters;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The neighborhood of a Life-like rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// The 8 surrounding cells.
    Moore,
    /// The 4 orthogonally adjacent cells. Suffix `V`.
    VonNeumann,
    /// 6 of the 8 surrounding cells, leaving out two opposite corners
    /// (bits 2 and 6 of a 9-bit neighborhood). Suffix `H`.
    Hexagonal,
}

impl Default for Neighborhood {
    fn default() -> Self {
        Neighborhood::Moore
    }
}

impl Neighborhood {
    /// The neighbor bits of a 9-bit neighborhood which count.
    pub fn mask(self) -> usize {
        match self {
            Neighborhood::Moore => 0x1ef,
            Neighborhood::VonNeumann => 0x0aa,
            Neighborhood::Hexagonal => 0x1ab,
        }
    }

    /// Number of neighbors.
    pub fn neighbors(self) -> u8 {
        match self {
            Neighborhood::Moore => 8,
            Neighborhood::VonNeumann => 4,
            Neighborhood::Hexagonal => 6,
        }
    }

    /// The letter ending a rule string with this neighborhood.
    pub fn suffix(self) -> Option<char> {
        match self {
            Neighborhood::Moore => None,
            Neighborhood::VonNeumann => Some('V'),
            Neighborhood::Hexagonal => Some('H'),
        }
    }
}

/// A neighbor count in the birth or survival part, with its letters.
///
/// `3` is `Term { count: 3, letters: empty, negated: empty }`;
/// `2ak-c` has both sets non-empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Term {
    /// Number of living neighbors.
    pub count: u8,
    /// Letters following the digit.
    pub letters: Letters,
    /// Letters following a `-` after the digit.
    pub negated: Letters,
}

impl Term {
    /// A term without letters.
    pub fn digit(count: u8) -> Self {
        Term {
            count,
            ..Term::default()
        }
    }

    /// Whether the term covers every arrangement of `count` neighbors.
    pub fn is_totalistic(&self) -> bool {
        self.letters.is_empty() && self.negated.is_empty()
    }
}

/// A set of neighbor counts from 0 to 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Counts(u16);

impl Counts {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a count.
    pub fn insert(&mut self, count: u8) {
        self.0 |= 1 << count;
    }

    /// Whether the set contains `count`.
    pub fn contains(self, count: u8) -> bool {
        self.0 & 1 << count != 0
    }

    /// The counts in the set, in increasing order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=8).filter(move |&c| self.contains(c))
    }
}

impl std::iter::FromIterator<u8> for Counts {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for count in iter {
            counts.insert(count);
        }
        counts
    }
}

/// A Life-like rule given by birth and survival conditions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BsRule {
    /// The neighborhood.
    pub neighborhood: Neighborhood,
    /// Whether no letters appear anywhere in the rule.
    pub totalistic: bool,
    /// Conditions for a dead cell to become alive.
    pub birth: Vec<Term>,
    /// Conditions for a living cell to stay alive.
    pub survival: Vec<Term>,
}

impl BsRule {
    /// A totalistic rule from two sets of counts.
    pub fn totalistic(neighborhood: Neighborhood, birth: Counts, survival: Counts) -> Self {
        BsRule {
            neighborhood,
            totalistic: true,
            birth: birth.iter().map(Term::digit).collect(),
            survival: survival.iter().map(Term::digit).collect(),
        }
    }

    /// The counts appearing in the birth part.
    pub fn birth_counts(&self) -> Counts {
        self.birth.iter().map(|t| t.count).collect()
    }

    /// The counts appearing in the survival part.
    pub fn survival_counts(&self) -> Counts {
        self.survival.iter().map(|t| t.count).collect()
    }
}

/// What a rule string describes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// An elementary one-dimensional rule, `W` followed by an even
    /// number from 0 to 254.
    Wolfram(u8),
    /// A Life-like rule.
    Life(BsRule),
}

/// A parsed rule string.
///
/// Produced by [`str::parse`]; building the tables is left to
/// [`LifeRule`](super::LifeRule).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleSpec {
    /// The rule itself.
    pub kind: RuleKind,
    /// The bounded-grid suffix, starting with `:`, exactly as given.
    pub bounds: Option<String>,
}
