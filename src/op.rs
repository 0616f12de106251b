//! The operator data model: binding powers, the five operator shapes a dialect
//! can hand back to the engine, and the acceptor probes that recognize the
//! closing half of a circumfix construct.
//!
//! Everything here is plain data plus construction closures; all behavior
//! lives in [`crate::engine`].

use serde::{Deserialize, Serialize};

use crate::errors::DialectError;

/// How strongly an operator binds the operands on each side of it.
/// Higher binds tighter.
///
/// Associativity is encoded by offsetting the two halves rather than by a
/// separate flag: an operator whose `right` exceeds its `left` by one reduces
/// an earlier instance of itself before stacking (left-associative), and the
/// mirror offset stacks first (right-associative). Equal halves make chained
/// uses a hard error, surfaced as
/// [`ParseError::NonAssociativeTie`](crate::errors::ParseError::NonAssociativeTie).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingPower {
    pub left: i32,
    pub right: i32,
}

impl BindingPower {
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// `a ~ b ~ c` groups as `(a ~ b) ~ c`.
    pub const fn left_assoc(power: i32) -> Self {
        Self { left: power, right: power + 1 }
    }

    /// `a ~ b ~ c` groups as `a ~ (b ~ c)`.
    pub const fn right_assoc(power: i32) -> Self {
        Self { left: power + 1, right: power }
    }

    /// `a ~ b ~ c` is rejected as ambiguous.
    pub const fn non_assoc(power: i32) -> Self {
        Self { left: power, right: power }
    }
}

/// Builds one result from one operand. May reject its input.
pub type UnaryBuild<R> = Box<dyn FnOnce(R) -> Result<R, DialectError>>;

/// Builds one result from a left and a right operand. May reject its inputs.
pub type BinaryBuild<R> = Box<dyn FnOnce(R, R) -> Result<R, DialectError>>;

/// An operator written before its operand, e.g. negation.
///
/// Only the `right` half of the power is meaningful: it binds the operand
/// that follows and decides when the operator is applied. A prefix operator
/// must bind at least as tightly as any operator it can directly follow;
/// stacking a looser prefix under a tighter pending operator would ask the
/// engine to reduce operands that have not been parsed yet.
pub struct PrefixOp<R> {
    pub name: String,
    pub power: BindingPower,
    pub build: UnaryBuild<R>,
}

impl<R> PrefixOp<R> {
    pub fn new(
        name: impl Into<String>,
        power: BindingPower,
        build: impl FnOnce(R) -> Result<R, DialectError> + 'static,
    ) -> Self {
        Self { name: name.into(), power, build: Box::new(build) }
    }
}

/// An operator written after its operand, e.g. factorial.
pub struct PostfixOp<R> {
    pub name: String,
    pub power: BindingPower,
    pub build: UnaryBuild<R>,
}

impl<R> PostfixOp<R> {
    pub fn new(
        name: impl Into<String>,
        power: BindingPower,
        build: impl FnOnce(R) -> Result<R, DialectError> + 'static,
    ) -> Self {
        Self { name: name.into(), power, build: Box::new(build) }
    }
}

/// An operator written between two operands.
pub struct InfixOp<R> {
    pub name: String,
    pub power: BindingPower,
    pub build: BinaryBuild<R>,
}

impl<R> InfixOp<R> {
    pub fn new(
        name: impl Into<String>,
        power: BindingPower,
        build: impl FnOnce(R, R) -> Result<R, DialectError> + 'static,
    ) -> Self {
        Self { name: name.into(), power, build: Box::new(build) }
    }
}

/// Recognizes the closing token of a pure circumfix construct (e.g. the `)`
/// matching an already-seen `(`) and, on a match, yields the build function
/// that wraps the enclosed operand.
///
/// Returning `None` means "not my closer"; the engine then falls back to
/// ordinary operator classification. Probes are stateful and only the
/// innermost open one is ever consulted.
pub trait CircumfixCloser<T, R> {
    fn accept(&mut self, token: &T) -> Option<UnaryBuild<R>>;
}

/// Recognizes the closing token of a post-circumfix construct (e.g. the `]`
/// of an indexing bracket) and yields the build function combining the
/// left-hand operand with the enclosed one.
pub trait PostCircumfixCloser<T, R> {
    fn accept(&mut self, token: &T) -> Option<BinaryBuild<R>>;
}

/// A bracket pair wrapping a single operand, e.g. grouping parentheses.
///
/// A pure circumfix operator has no precedence of its own; its content is
/// fully reduced before the bracket closes, and the bracket is transparent to
/// the operators around it.
pub struct CircumfixOp<T, R> {
    pub name: String,
    pub closer: Box<dyn CircumfixCloser<T, R>>,
}

impl<T, R> CircumfixOp<T, R> {
    pub fn new(name: impl Into<String>, closer: Box<dyn CircumfixCloser<T, R>>) -> Self {
        Self { name: name.into(), closer }
    }
}

/// A bracket pair with an operand on its left, e.g. indexing syntax. Combines
/// the left operand with the bracketed content once both are known.
pub struct PostCircumfixOp<T, R> {
    pub name: String,
    pub power: BindingPower,
    pub closer: Box<dyn PostCircumfixCloser<T, R>>,
}

impl<T, R> PostCircumfixOp<T, R> {
    pub fn new(
        name: impl Into<String>,
        power: BindingPower,
        closer: Box<dyn PostCircumfixCloser<T, R>>,
    ) -> Self {
        Self { name: name.into(), power, closer }
    }
}

/// What a token can be while the engine expects a term.
pub enum LeadingOp<T, R> {
    Prefix(PrefixOp<R>),
    Circumfix(CircumfixOp<T, R>),
}

/// What a token can be while the engine expects an operator.
pub enum TrailingOp<T, R> {
    Postfix(PostfixOp<R>),
    Infix(InfixOp<R>),
    PostCircumfix(PostCircumfixOp<T, R>),
}

struct TokenCloser<T, R> {
    closing: T,
    build: Option<UnaryBuild<R>>,
}

impl<T: PartialEq, R> CircumfixCloser<T, R> for TokenCloser<T, R> {
    fn accept(&mut self, token: &T) -> Option<UnaryBuild<R>> {
        if *token == self.closing {
            self.build.take()
        } else {
            None
        }
    }
}

struct PairTokenCloser<T, R> {
    closing: T,
    build: Option<BinaryBuild<R>>,
}

impl<T: PartialEq, R> PostCircumfixCloser<T, R> for PairTokenCloser<T, R> {
    fn accept(&mut self, token: &T) -> Option<BinaryBuild<R>> {
        if *token == self.closing {
            self.build.take()
        } else {
            None
        }
    }
}

/// Convenience acceptor matching a single closing token by equality.
pub fn closed_by<T, R>(
    closing: T,
    build: impl FnOnce(R) -> Result<R, DialectError> + 'static,
) -> Box<dyn CircumfixCloser<T, R>>
where
    T: PartialEq + 'static,
    R: 'static,
{
    Box::new(TokenCloser { closing, build: Some(Box::new(build)) })
}

/// Convenience acceptor for post-circumfix brackets closed by a single token.
pub fn pair_closed_by<T, R>(
    closing: T,
    build: impl FnOnce(R, R) -> Result<R, DialectError> + 'static,
) -> Box<dyn PostCircumfixCloser<T, R>>
where
    T: PartialEq + 'static,
    R: 'static,
{
    Box::new(PairTokenCloser { closing, build: Some(Box::new(build)) })
}
