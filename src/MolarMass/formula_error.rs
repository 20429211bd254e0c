//! # Error types of the formula interpreter
//!
//! `FormulaError` is the only error the calculation path can produce. Every variant carries
//! enough context (0-based character position, offending symbol) for a caller to render a
//! precise message. `GroupError` is raised while building chemical group abbreviations.
use serde::Serialize;
use thiserror::Error;

/// error returned by tokenizer, parser, evaluator and mass aggregator
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum FormulaError {
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { position: usize, character: char },
    #[error("Group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },
    #[error("Unexpected ')' at position {position}")]
    UnexpectedCloseParen { position: usize },
    #[error("Empty group '()' at position {position}")]
    EmptyGroup { position: usize },
    #[error("Formula may contain only one hydration clause '.'")]
    MultipleHydrationClauses,
    #[error("Unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
    #[error("Unexpected end of formula: element symbol or '(' expected")]
    UnexpectedEndOfInput,
    #[error("Unexpected '{found}' at position {position}: element symbol or '(' expected")]
    UnexpectedToken { position: usize, found: String },
    #[error("Invalid count or multiplier at position {position}")]
    InvalidMultiplier { position: usize },
    #[error("Groups nested too deeply at position {position}")]
    NestingTooDeep { position: usize },
    #[error("Unknown element: {symbol}")]
    UnknownElement { symbol: String },
    #[error("Atom count of {symbol} is too large")]
    CountOverflow { symbol: String },
    #[error("Formula contains no atoms")]
    EmptyFormula,
}

/// error types for user defined chemical groups (Me, Et, Ph ...)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("Invalid group abbreviation '{0}': must look like an element symbol")]
    InvalidAbbreviation(String),
    #[error("Group abbreviation '{0}' is already an element symbol")]
    ShadowsElement(String),
    #[error("Group '{0}' has no atoms")]
    EmptyComposition(String),
    #[error("Group '{abbreviation}' refers to unknown element {symbol}")]
    UnknownElement {
        abbreviation: String,
        symbol: String,
    },
    #[error("Group '{abbreviation}' has zero atoms of {symbol}")]
    ZeroCount {
        abbreviation: String,
        symbol: String,
    },
    #[error("Group '{abbreviation}' has too many atoms of {symbol}")]
    CountOverflow {
        abbreviation: String,
        symbol: String,
    },
}
