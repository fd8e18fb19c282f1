//! Hensel notation for isotropic non-totalistic rules.
//!
//! See [this article on LifeWiki](https://conwaylife.com/wiki/Isotropic_non-totalistic_rule).

use bitflags::bitflags;

/// All Hensel letters, in the order they appear in canonical rule strings.
pub const ALPHABET: &str = "ceaiknjqrytwz";

bitflags! {
    /// A set of Hensel letters for a single neighbor count.
    ///
    /// Bit `i` stands for the `i`-th letter of [`ALPHABET`].
    #[derive(Default)]
    pub struct Letters: u16 {
        const C = 1 << 0;
        const E = 1 << 1;
        const A = 1 << 2;
        const I = 1 << 3;
        const K = 1 << 4;
        const N = 1 << 5;
        const J = 1 << 6;
        const Q = 1 << 7;
        const R = 1 << 8;
        const Y = 1 << 9;
        const T = 1 << 10;
        const W = 1 << 11;
        const Z = 1 << 12;
    }
}

/// Number of letters defined for each neighbor count from 0 to 8.
const LETTER_COUNTS: [usize; 9] = [0, 2, 6, 10, 13, 10, 6, 2, 0];

/// One 9-bit neighborhood per letter, for neighbor counts 1 to 4.
///
/// The center bit (`0x10`) is never set. Counts 5 to 7 are the
/// complements of counts 3 to 1.
const NEIGHBORHOODS: [&[u16]; 4] = [
    &[1, 2],
    &[5, 10, 3, 40, 33, 68],
    &[69, 42, 11, 7, 98, 13, 14, 70, 41, 97],
    &[325, 170, 15, 45, 99, 71, 106, 102, 43, 101, 105, 78, 108],
];

/// All eight neighbor bits of a 9-bit neighborhood.
pub(crate) const RING: u16 = 0x1ef;

impl Letters {
    /// The letter for a character, if it is one of [`ALPHABET`].
    pub fn from_char(c: char) -> Option<Self> {
        ALPHABET
            .find(c.to_ascii_lowercase())
            .map(|i| Self::from_bits_truncate(1 << i))
    }

    /// The letters which are meaningful for `count` live neighbors.
    ///
    /// Empty for 0, 8 and anything larger.
    pub fn valid_for(count: u8) -> Self {
        let n = LETTER_COUNTS.get(count as usize).copied().unwrap_or(0);
        Self::from_bits_truncate((1 << n) - 1)
    }

    /// Positions in [`ALPHABET`] of the letters in this set.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..ALPHABET.len()).filter(move |&i| self.bits() & 1 << i != 0)
    }

    /// The letters in this set, in canonical order.
    pub fn chars(self) -> impl Iterator<Item = char> {
        self.indices().filter_map(|i| ALPHABET[i..].chars().next())
    }
}

/// The 9-bit neighborhood standing for letter number `letter`
/// with `count` live neighbors, with a dead center.
///
/// `count` must be from 1 to 7, and `letter` valid for it.
pub(crate) fn canonical_pattern(count: u8, letter: usize) -> u16 {
    debug_assert!((1..=7).contains(&count));
    let index = count as usize - 1;
    if index > 3 {
        NEIGHBORHOODS[6 - index][letter] ^ RING
    } else {
        NEIGHBORHOODS[index][letter]
    }
}
