//! Canonical rule strings.

use super::{
    build::{slot, RuleBits},
    hensel::Letters,
    spec::Neighborhood,
};
use std::fmt::{self, Display, Formatter, Write};

/// The canonical string of a rule, written by its [`Display`] impl.
///
/// Life-like rules are written as `B…/S…`, counts in increasing order,
/// each followed by its letters, or by `-` and the letters it lacks.
/// Then come the neighborhood suffix and the bounded-grid suffix.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Canonical<'a> {
    pub(crate) wolfram: Option<u8>,
    pub(crate) neighborhood: Neighborhood,
    pub(crate) bits: RuleBits,
    pub(crate) letters: &'a [Letters; 18],
    pub(crate) negated: &'a [Letters; 18],
    pub(crate) bounds: Option<&'a str>,
}

impl Canonical<'_> {
    fn write_part(&self, f: &mut Formatter, survival: bool) -> fmt::Result {
        for count in (0..=8).filter(|&c| self.bits.contains(c, survival)) {
            write!(f, "{}", count)?;
            let slot = slot(count, survival);
            for c in self.letters[slot].chars() {
                f.write_char(c)?;
            }
            if !self.negated[slot].is_empty() {
                f.write_char('-')?;
                for c in self.negated[slot].chars() {
                    f.write_char(c)?;
                }
            }
        }
        Ok(())
    }
}

impl Display for Canonical<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.wolfram {
            Some(code) => write!(f, "W{}", code)?,
            None => {
                f.write_char('B')?;
                self.write_part(f, false)?;
                f.write_str("/S")?;
                self.write_part(f, true)?;
                if let Some(suffix) = self.neighborhood.suffix() {
                    f.write_char(suffix)?;
                }
            }
        }
        if let Some(bounds) = self.bounds {
            f.write_str(bounds)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [Letters; 18] = [Letters::empty(); 18];

    #[test]
    fn totalistic() {
        let name = Canonical {
            wolfram: None,
            neighborhood: Neighborhood::Hexagonal,
            bits: RuleBits(1 << 2 | 1 << 9 | 1 << 13),
            letters: &NONE,
            negated: &NONE,
            bounds: Some(":T20,30"),
        };
        assert_eq!(name.to_string(), "B2/S04H:T20,30");
    }

    #[test]
    fn letters_and_negation() {
        let mut letters = NONE;
        let mut negated = NONE;
        letters[3] = Letters::K | Letters::C;
        negated[9 + 2] = Letters::A;
        let name = Canonical {
            wolfram: None,
            neighborhood: Neighborhood::Moore,
            bits: RuleBits(1 << 3 | 1 << 11),
            letters: &letters,
            negated: &negated,
            bounds: None,
        };
        assert_eq!(name.to_string(), "B3ck/S2-a");
    }

    #[test]
    fn wolfram() {
        let name = Canonical {
            wolfram: Some(30),
            neighborhood: Neighborhood::Moore,
            bits: RuleBits::default(),
            letters: &NONE,
            negated: &NONE,
            bounds: None,
        };
        assert_eq!(name.to_string(), "W30");
    }
}
