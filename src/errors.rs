//! Structured failure types for the parsing engine and the formula validator.
//!
//! Engine failures carry the 0-based index of the token where the problem was
//! detected; every user-visible message renders that index 1-based ("token #N").
//! There is no recovery anywhere: the first error aborts the parse and the
//! caller decides what to do with the corrected input.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque failure channel for dialect callbacks and operator build functions.
///
/// The engine never inspects these; it attaches the current token position and
/// propagates them via [`ParseError::Term`] or [`ParseError::Build`].
pub type DialectError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure raised by [`Parser::parse`](crate::engine::Parser::parse).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The token sequence contained no term at all.
    #[error("cannot parse an empty stream")]
    EmptyInput,

    /// The sequence ended while a value was still expected.
    #[error("token #{}: unexpected end of input; expecting a value", .position + 1)]
    MissingOperand { position: usize },

    /// The sequence ended with at least one circumfix construct never closed.
    #[error("token #{}: unexpected end of input; a bracket is not closed", .position + 1)]
    UnclosedBracket { position: usize },

    /// A token in operator position was neither an operator nor a
    /// juxtaposition trigger.
    #[error("token #{}: expected an operator, found {}", .position + 1, .found)]
    MissingOperator { position: usize, found: String },

    /// Two operators of equal precedence met at a reduction boundary.
    #[error("token #{}: operator `{}` is non-associative", .position + 1, .operator)]
    NonAssociativeTie { position: usize, operator: String },

    /// The dialect rejected a token during term construction.
    #[error("token #{}: {}", .position + 1, .source)]
    Term {
        position: usize,
        #[source]
        source: DialectError,
    },

    /// An operator build function rejected its operand(s).
    #[error("token #{}: {}", .position + 1, .source)]
    Build {
        position: usize,
        #[source]
        source: DialectError,
    },
}

impl ParseError {
    /// The 0-based token index where the failure was detected.
    ///
    /// End-of-input failures report the index one past the last token;
    /// [`ParseError::EmptyInput`] has no meaningful position.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::MissingOperand { position }
            | ParseError::UnclosedBracket { position }
            | ParseError::MissingOperator { position, .. }
            | ParseError::NonAssociativeTie { position, .. }
            | ParseError::Term { position, .. }
            | ParseError::Build { position, .. } => Some(*position),
        }
    }

    /// Stable machine-readable identifier, independent of message wording.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "empty_input",
            ParseError::MissingOperand { .. } => "missing_operand",
            ParseError::UnclosedBracket { .. } => "unclosed_bracket",
            ParseError::MissingOperator { .. } => "missing_operator",
            ParseError::NonAssociativeTie { .. } => "non_associative_tie",
            ParseError::Term { .. } => "term",
            ParseError::Build { .. } => "build",
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("precept::parse::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            ParseError::NonAssociativeTie { .. } => {
                "give the colliding operators distinct left and right precedences \
                 to define an associativity"
            }
            ParseError::UnclosedBracket { .. } => {
                "a circumfix opener was never matched by its closing token"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A failure raised by
/// [`FormulaValidator::validate`](crate::validation::FormulaValidator::validate).
///
/// Each variant carries the offending token verbatim; pairwise violations also
/// carry the token that preceded it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// An operand token embeds a bracket character.
    #[error("token '{token}' is invalid")]
    InvalidToken { token: String },

    /// The running bracket balance went negative or ended non-zero.
    #[error("brackets error at token '{token}'")]
    UnbalancedBrackets { token: String },

    /// The final token is an operator.
    #[error("the last token '{token}' cannot be an operator")]
    TrailingOperator { token: String },

    /// Two adjacent tokens form a forbidden pair.
    #[error("inappropriate token '{token}' after '{previous}'")]
    InappropriatePair { token: String, previous: String },
}

impl ValidationError {
    /// The token the validator stopped on.
    pub fn token(&self) -> &str {
        match self {
            ValidationError::InvalidToken { token }
            | ValidationError::UnbalancedBrackets { token }
            | ValidationError::TrailingOperator { token }
            | ValidationError::InappropriatePair { token, .. } => token,
        }
    }
}

impl Diagnostic for ValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let suffix = match self {
            ValidationError::InvalidToken { .. } => "invalid_token",
            ValidationError::UnbalancedBrackets { .. } => "unbalanced_brackets",
            ValidationError::TrailingOperator { .. } => "trailing_operator",
            ValidationError::InappropriatePair { .. } => "inappropriate_pair",
        };
        Some(Box::new(format!("precept::validate::{suffix}")))
    }
}
