//! Precept: a pluggable operator-precedence parsing engine.
//!
//! The engine turns a finite token sequence into a single value by applying
//! prefix, postfix, infix, and circumfix (bracket-like) operators in correct
//! precedence and associativity order. Token and result types are opaque;
//! the operator set comes entirely from a caller-supplied [`Dialect`].
//!
//! The crate also ships an independent [`FormulaValidator`], a flat-rule
//! checker for boolean-formula token sequences that uses no precedence at
//! all.

pub use crate::dialect::{Dialect, DialectError};
pub use crate::engine::{Cursor, Parser};
pub use crate::errors::{ParseError, ValidationError};
pub use crate::op::{
    closed_by, pair_closed_by, BinaryBuild, BindingPower, CircumfixCloser, CircumfixOp, InfixOp,
    LeadingOp, PostCircumfixCloser, PostCircumfixOp, PostfixOp, PrefixOp, TrailingOp, UnaryBuild,
};
pub use crate::validation::FormulaValidator;

pub mod dialect;
pub mod engine;
pub mod errors;
pub mod op;
pub mod validation;
