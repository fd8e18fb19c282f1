//! Parsing rule strings.
//!
//! Supports `B3/S23`, `b3s23`, `23/3`, Hensel notation such as
//! `B2-a/S12`, the `H` and `V` neighborhood suffixes, and Wolfram rules
//! such as `W110`. Anything after the first `:` is kept as the
//! bounded-grid suffix. Case and whitespace are ignored.

use super::{
    hensel::Letters,
    spec::{BsRule, Neighborhood, RuleKind, RuleSpec, Term},
};
use crate::error::ParseRuleError;
use std::{iter::Peekable, slice::Iter, str::FromStr};

/// A single meaningful character of a rule string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Birth,
    Survival,
    Slash,
    Underscore,
    Neighborhood(Neighborhood),
    Digit(u8),
    Letter(Letters, char),
    Minus,
}

/// Tokens of a rule string, with the positions of the unique markers.
#[derive(Debug, Default)]
struct Scan {
    tokens: Vec<Token>,
    birth: Option<usize>,
    survival: Option<usize>,
    slash: Option<usize>,
    underscore: Option<usize>,
    neighborhood: Option<Neighborhood>,
    wolfram: bool,
    totalistic: bool,
    max_digit: u8,
}

/// Records the position of a marker which may only appear once.
fn mark(slot: &mut Option<usize>, pos: usize, err: ParseRuleError) -> Result<(), ParseRuleError> {
    if slot.is_some() {
        return Err(err);
    }
    *slot = Some(pos);
    Ok(())
}

impl Scan {
    /// Splits the rule part of a rule string into tokens.
    fn new(input: &str) -> Result<Self, ParseRuleError> {
        let mut scan = Scan {
            totalistic: true,
            ..Scan::default()
        };
        let chars = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase());
        for c in chars {
            let pos = scan.tokens.len();
            let token = match c {
                'b' => {
                    mark(&mut scan.birth, pos, ParseRuleError::DuplicateBirth)?;
                    Token::Birth
                }
                's' => {
                    mark(&mut scan.survival, pos, ParseRuleError::DuplicateSurvival)?;
                    Token::Survival
                }
                '/' => {
                    mark(&mut scan.slash, pos, ParseRuleError::DuplicateSlash)?;
                    Token::Slash
                }
                '_' => {
                    mark(&mut scan.underscore, pos, ParseRuleError::DuplicateUnderscore)?;
                    Token::Underscore
                }
                'h' | 'v' => {
                    if scan.neighborhood.is_some() || scan.wolfram {
                        return Err(ParseRuleError::DuplicateNeighborhood);
                    }
                    let neighborhood = if c == 'h' {
                        Neighborhood::Hexagonal
                    } else {
                        Neighborhood::VonNeumann
                    };
                    scan.neighborhood = Some(neighborhood);
                    Token::Neighborhood(neighborhood)
                }
                // Only a leading `w` starts a Wolfram rule; elsewhere it is a letter.
                'w' if pos == 0 => {
                    if scan.wolfram {
                        return Err(ParseRuleError::DuplicateNeighborhood);
                    }
                    scan.wolfram = true;
                    continue;
                }
                '0'..='9' => {
                    let digit = c as u8 - b'0';
                    scan.max_digit = scan.max_digit.max(digit);
                    Token::Digit(digit)
                }
                '-' => {
                    scan.totalistic = false;
                    Token::Minus
                }
                _ => {
                    let letter = Letters::from_char(c).ok_or(ParseRuleError::BadChar(c))?;
                    scan.totalistic = false;
                    Token::Letter(letter, c)
                }
            };
            scan.tokens.push(token);
        }
        Ok(scan)
    }

    /// Reads the number of a Wolfram rule.
    fn wolfram(&self) -> Result<u8, ParseRuleError> {
        let digits = self
            .tokens
            .iter()
            .take_while(|t| matches!(t, Token::Digit(_)))
            .count();
        let value = self.tokens[..digits].iter().fold(0u32, |value, t| match t {
            Token::Digit(d) => value.saturating_mul(10).saturating_add(*d as u32),
            _ => value,
        });
        if digits == 0 || value > 254 || value & 1 != 0 {
            return Err(ParseRuleError::BadWolfram);
        }
        if digits < self.tokens.len() {
            return Err(ParseRuleError::WolframBadChar);
        }
        Ok(value as u8)
    }

    /// Splits a B/S rule into its birth and survival parts.
    fn life(mut self) -> Result<BsRule, ParseRuleError> {
        let neighborhood = self.neighborhood.unwrap_or_default();
        if self.neighborhood.is_some() {
            match self.tokens.last() {
                Some(Token::Neighborhood(_)) => {
                    self.tokens.pop();
                }
                _ => return Err(ParseRuleError::NeighborhoodNotAtEnd),
            }
        }

        let separator = self.slash.or(self.underscore);
        let marker_first = self.birth == Some(0) || self.survival == Some(0);
        let both = self.birth.is_some() && self.survival.is_some();
        if separator.is_none() && !(both && marker_first) {
            return Err(ParseRuleError::MissingSeparator);
        }

        if self.max_digit > neighborhood.neighbors() {
            return Err(ParseRuleError::DigitOutOfRange);
        }

        let tokens = &self.tokens;
        let (birth, survival) = match (separator, self.birth, self.survival) {
            (Some(p), Some(b), Some(s)) if (b < p) == (s < p) => {
                return Err(ParseRuleError::SameSide);
            }
            (Some(p), b, s) => {
                let (left, right) = (&tokens[..p], &tokens[p + 1..]);
                let birth_left = b.map_or(false, |b| b < p) || s.map_or(false, |s| s > p);
                let (birth, survival) = if birth_left {
                    (left, right)
                } else {
                    (right, left)
                };
                (
                    strip_marker(birth, Token::Birth)?,
                    strip_marker(survival, Token::Survival)?,
                )
            }
            (None, Some(b), Some(s)) if b < s => (&tokens[b + 1..s], &tokens[s + 1..]),
            (None, Some(b), Some(s)) => (&tokens[b + 1..], &tokens[s + 1..b]),
            _ => return Err(ParseRuleError::MissingSeparator),
        };

        if !self.totalistic {
            if !matches!(birth.first(), None | Some(Token::Digit(_))) {
                return Err(ParseRuleError::BirthStart);
            }
            if !matches!(survival.first(), None | Some(Token::Digit(_))) {
                return Err(ParseRuleError::SurvivalStart);
            }
            if neighborhood != Neighborhood::Moore {
                return Err(ParseRuleError::NonMoore);
            }
        }

        let birth = terms(birth)?;
        if !self.totalistic && birth.iter().any(|t| t.count == 0) {
            return Err(ParseRuleError::NonTotalisticB0);
        }
        let survival = terms(survival)?;

        Ok(BsRule {
            neighborhood,
            totalistic: self.totalistic,
            birth,
            survival,
        })
    }
}

/// Removes a leading `B` or `S` from one side of the separator.
///
/// The marker may only appear as the first token of its own side.
fn strip_marker(part: &[Token], marker: Token) -> Result<&[Token], ParseRuleError> {
    let other = if marker == Token::Birth {
        Token::Survival
    } else {
        Token::Birth
    };
    let part = match part.split_first() {
        Some((first, rest)) if *first == marker => rest,
        _ => part,
    };
    if part.iter().any(|&t| t == marker || t == other) {
        Err(ParseRuleError::MisplacedMarker)
    } else {
        Ok(part)
    }
}

/// Reads the letters following a digit.
fn letters(iter: &mut Peekable<Iter<Token>>, count: u8) -> Result<Letters, ParseRuleError> {
    let valid = Letters::valid_for(count);
    let mut result = Letters::empty();
    while let Some(&&Token::Letter(letter, c)) = iter.peek() {
        if !valid.contains(letter) {
            return Err(ParseRuleError::BadLetter { count, letter: c });
        }
        result |= letter;
        iter.next();
    }
    Ok(result)
}

/// Reads the terms of a birth or survival part.
fn terms(part: &[Token]) -> Result<Vec<Term>, ParseRuleError> {
    let mut result = Vec::new();
    let mut iter = part.iter().peekable();
    while let Some(&token) = iter.next() {
        let count = match token {
            Token::Digit(count) => count,
            Token::Minus => return Err(ParseRuleError::BadMinus),
            Token::Letter(_, c) => return Err(ParseRuleError::BadChar(c)),
            _ => return Err(ParseRuleError::MisplacedMarker),
        };
        let mut term = Term::digit(count);
        term.letters = letters(&mut iter, count)?;
        if iter.peek() == Some(&&Token::Minus) {
            iter.next();
            term.negated = letters(&mut iter, count)?;
            if term.negated.is_empty() {
                return Err(ParseRuleError::BadMinus);
            }
        }
        result.push(term);
    }
    Ok(result)
}

impl FromStr for RuleSpec {
    type Err = ParseRuleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (rule, bounds) = match input.find(':') {
            Some(pos) => (&input[..pos], Some(input[pos..].to_owned())),
            None => (input, None),
        };

        let scan = Scan::new(rule)?;
        if scan.tokens.is_empty() && !scan.wolfram {
            return Err(ParseRuleError::Empty);
        }
        if scan.slash.is_some() && scan.underscore.is_some() {
            return Err(ParseRuleError::SlashAndUnderscore);
        }
        if scan.underscore.is_some() && scan.totalistic {
            return Err(ParseRuleError::TotalisticUnderscore);
        }

        let kind = if scan.wolfram {
            RuleKind::Wolfram(scan.wolfram()?)
        } else {
            RuleKind::Life(scan.life()?)
        };
        Ok(RuleSpec { kind, bounds })
    }
}
