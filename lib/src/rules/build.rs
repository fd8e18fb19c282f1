//! Building the 3×3 table of a Life-like rule.

use super::{
    hensel::{canonical_pattern, Letters, RING},
    spec::{BsRule, Counts, Term},
    table::{Table3x3, CENTER},
};

/// Bit offset of the survival counts in [`RuleBits`].
pub const SURVIVAL_OFFSET: usize = 9;

/// Birth and survival counts packed into 18 bits.
///
/// Bit `i` means `Bi`, bit `9 + i` means `Si`. A count with letters
/// counts as present even if only some arrangements are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuleBits(pub u32);

impl RuleBits {
    /// The bits of `B3/S23`.
    pub const LIFE: RuleBits = RuleBits(0x1808);

    #[inline]
    fn bit(count: u8, survival: bool) -> u32 {
        1 << slot(count, survival)
    }

    /// Whether `Bcount` (or `Scount`) is present.
    pub fn contains(self, count: u8, survival: bool) -> bool {
        self.0 & Self::bit(count, survival) != 0
    }

    pub(crate) fn insert(&mut self, count: u8, survival: bool) {
        self.0 |= Self::bit(count, survival);
    }

    pub(crate) fn remove(&mut self, count: u8, survival: bool) {
        self.0 &= !Self::bit(count, survival);
    }

    /// The birth counts.
    pub fn birth(self) -> Counts {
        (0..=8).filter(|&i| self.contains(i, false)).collect()
    }

    /// The survival counts.
    pub fn survival(self) -> Counts {
        (0..=8).filter(|&i| self.contains(i, true)).collect()
    }
}

/// Index of a count in [`RuleBits`] and in the letter arrays.
#[inline]
pub(crate) fn slot(count: u8, survival: bool) -> usize {
    count as usize + if survival { SURVIVAL_OFFSET } else { 0 }
}

/// A 3×3 table under construction, together with the data needed to
/// name the rule it implements.
#[derive(Clone, Debug, Default)]
pub(crate) struct Builder {
    pub(crate) table: Table3x3,
    pub(crate) bits: RuleBits,
    pub(crate) letters: [Letters; 18],
    pub(crate) negated: [Letters; 18],
}

impl Builder {
    /// Builds the table of a birth/survival rule.
    pub(crate) fn new(rule: &BsRule) -> Self {
        let mut builder = Builder::default();
        let mask = rule.neighborhood.mask();
        for term in rule.birth.iter() {
            builder.term(term, false, mask);
        }
        for term in rule.survival.iter() {
            builder.term(term, true, mask);
        }
        if !rule.totalistic {
            builder.canonicalize_letters();
        }
        builder
    }

    /// Sets every arrangement of `count` neighbors.
    fn totalistic(&mut self, count: u8, survival: bool, mask: usize) {
        self.bits.insert(count, survival);
        self.table.set_totalistic(count, survival, mask);
    }

    /// Sets (or clears) the arrangements of `count` neighbors
    /// named by letter number `letter`.
    fn symmetrical(&mut self, count: u8, survival: bool, letter: usize, alive: bool) {
        if count == 0 || count == 8 {
            self.totalistic(count, survival, RING as usize);
            return;
        }
        self.bits.insert(count, survival);
        let slot = slot(count, survival);
        let flag = Letters::from_bits_truncate(1 << letter);
        if alive {
            self.letters[slot] |= flag;
        } else {
            self.negated[slot] |= flag;
        }
        let mut x = canonical_pattern(count, letter) as usize;
        if survival {
            x |= CENTER;
        }
        self.table.set_symmetrical(x, alive);
    }

    /// Applies one term: its letters first, then its negated letters
    /// on top of the full count.
    fn term(&mut self, term: &Term, survival: bool, mask: usize) {
        if term.is_totalistic() {
            self.totalistic(term.count, survival, mask);
            return;
        }
        for letter in term.letters.indices() {
            self.symmetrical(term.count, survival, letter, true);
        }
        if !term.negated.is_empty() {
            self.totalistic(term.count, survival, mask);
            for letter in term.negated.indices() {
                self.symmetrical(term.count, survival, letter, false);
            }
        }
    }

    /// Recomputes the letters of every count from the table,
    /// choosing the shorter of the plain and the negated form.
    fn canonicalize_letters(&mut self) {
        for &survival in [false, true].iter() {
            for count in 1..=7 {
                if !self.bits.contains(count, survival) {
                    continue;
                }
                let center = if survival { CENTER } else { 0 };
                let valid = Letters::valid_for(count);
                let present = valid
                    .indices()
                    .filter(|&l| self.table[canonical_pattern(count, l) as usize | center])
                    .fold(Letters::empty(), |acc, l| {
                        acc | Letters::from_bits_truncate(1 << l)
                    });
                let absent = valid - present;

                let slot = slot(count, survival);
                self.letters[slot] = Letters::empty();
                self.negated[slot] = Letters::empty();
                if present.is_empty() {
                    self.bits.remove(count, survival);
                } else if absent.is_empty() {
                    // Every arrangement: a bare digit.
                } else if present.bits().count_ones() <= absent.bits().count_ones() {
                    self.letters[slot] = present;
                } else {
                    self.negated[slot] = absent;
                }
            }
        }
    }
}
