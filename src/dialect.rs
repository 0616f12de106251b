//! The capability set a grammar implementation provides to the engine.
//!
//! The engine never interprets tokens itself: it forwards every token to the
//! dialect for classification and delegates all value construction to the
//! operators and terms the dialect returns. A dialect only classifies — it
//! never mutates engine state.

use crate::engine::Cursor;
use crate::op::{InfixOp, LeadingOp, TrailingOp};

pub use crate::errors::DialectError;

/// A pluggable grammar description.
///
/// The four callbacks correspond to the four points where the engine consults
/// the grammar. `cursor` exposes the 0-based position of the token currently
/// being processed, for position-aware terms and errors.
///
/// Dialects are expected to be stateless or synchronized by the caller; the
/// engine itself holds no parse state between calls.
pub trait Dialect {
    type Token;
    type Output;

    /// Classify a token seen while the engine expects a term. `None` means
    /// "treat this token as a term" and routes it to [`Dialect::parse_term`].
    fn leading_op(
        &self,
        token: &Self::Token,
        cursor: &Cursor,
    ) -> Option<LeadingOp<Self::Token, Self::Output>>;

    /// Turn a non-operator token into a value. Failures propagate verbatim,
    /// wrapped with the current position.
    fn parse_term(
        &self,
        token: Self::Token,
        cursor: &Cursor,
    ) -> Result<Self::Output, DialectError>;

    /// Classify a token seen while the engine expects an operator. `None`
    /// triggers the juxtaposition fallback.
    fn trailing_op(
        &self,
        token: &Self::Token,
        cursor: &Cursor,
    ) -> Option<TrailingOp<Self::Token, Self::Output>>;

    /// The implicit infix operator inserted between two adjacent terms when
    /// no explicit operator separates them (e.g. implicit multiplication).
    /// `None` (the default) makes adjacent terms a syntax error.
    fn juxtaposition_op(&self, _cursor: &Cursor) -> Option<InfixOp<Self::Output>> {
        None
    }
}
