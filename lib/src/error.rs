//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// Errors when parsing a rule string.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseRuleError {
    /// Rule cannot be empty string.
    Empty,
    /// Bad character found: {0:?}.
    BadChar(char),
    /// Only one B allowed.
    DuplicateBirth,
    /// Only one S allowed.
    DuplicateSurvival,
    /// Only one slash allowed.
    DuplicateSlash,
    /// Only one underscore allowed.
    DuplicateUnderscore,
    /// Only one neighborhood allowed.
    DuplicateNeighborhood,
    /// Can't have slash and underscore.
    SlashAndUnderscore,
    /// Underscore not valid for totalistic rules, use slash.
    TotalisticUnderscore,
    /// Wolfram rule must be an even number from 0 to 254.
    BadWolfram,
    /// Bad character in Wolfram rule.
    WolframBadChar,
    /// Neighborhood must be at end of rule.
    NeighborhoodNotAtEnd,
    /// Rule must contain a slash or both B and S.
    MissingSeparator,
    /// Digit greater than neighborhood allows.
    DigitOutOfRange,
    /// B and S must be either side of slash.
    SameSide,
    /// B and S must be at the start of their part of the rule.
    MisplacedMarker,
    /// Non-totalistic birth must start with a digit.
    BirthStart,
    /// Non-totalistic survival must start with a digit.
    SurvivalStart,
    /// Non-totalistic only supported with Moore neighborhood.
    NonMoore,
    /// B0 is not supported for non-totalistic rules.
    NonTotalisticB0,
    /// Letter {letter:?} is not valid for {count} neighbors.
    BadLetter { count: u8, letter: char },
    /// A minus must follow a digit and be followed by letters.
    BadMinus,
}

/// Errors when loading a rule tree.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum TreeError {
    /// Rule length too long.
    NameTooLong,
    /// File not found: {0}.tree.
    FileNotFound(String),
    /// Unable to read rule tree: {0}.
    Io(String),
    /// Bad basic values.
    BadBasicValues,
    /// Header at line {line} after node lines.
    HeaderAfterNodes { line: usize },
    /// Bad level at line {line} of rule tree.
    BadLevel { line: usize },
    /// Bad value at line {line} of rule tree.
    BadValue { line: usize },
    /// Bad state value at line {line} of rule tree.
    BadState { line: usize },
    /// Bad node value at line {line} of rule tree.
    BadNode { line: usize },
    /// Line {line} of rule tree has {found} values, expected {expected}.
    BadValueCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Rule tree has {found} values in total, expected {expected}.
    BadTotalCount { expected: usize, found: usize },
    /// Bad last node: level {found}, expected {expected}.
    WrongLastLevel { expected: usize, found: usize },
    /// Out of memory in rule tree allocation.
    OutOfMemory,
}

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Invalid rule: {0}
    ParseRule(#[from] ParseRuleError),
    /// Invalid rule tree: {0}
    Tree(#[from] TreeError),
    /// Invalid bounded grid: {0}
    GridSize(String),
}
