//! The shift/reduce state machine at the heart of the crate.
//!
//! [`Parser`] drives a token sequence through two alternating expectations
//! (term, operator), maintaining three stacks: pending results, pending
//! operators, and the indices of currently-open circumfix acceptors. All
//! three live in a call-local [`Run`], so a parser may be shared freely and
//! reused across parses; a failed parse leaves nothing behind.
//!
//! The one subtle piece is circumfix resolution: when a post-circumfix
//! bracket closes, the combination of its left operand with the bracketed
//! content cannot be performed yet — a following operator might bind the
//! left operand tighter. The close therefore pushes a deferred binary
//! operator carrying only the opener's right precedence, and ordinary
//! reduction decides later.

use std::fmt;

use crate::dialect::Dialect;
use crate::errors::ParseError;
use crate::op::{
    BinaryBuild, BindingPower, CircumfixCloser, LeadingOp, PostCircumfixCloser, TrailingOp,
    UnaryBuild,
};

/// Sentinel precedence that outranks nothing, used to flush every reducible
/// operator (the enclosed operand of a bracket, or the whole stack at the
/// end of input).
const FLUSH: i32 = i32::MIN;

/// Read-only view of the engine handed to dialect callbacks.
pub struct Cursor {
    position: usize,
}

impl Cursor {
    /// 0-based index of the token currently being processed.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// What the engine is waiting for next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Expectation {
    Term,
    Operator,
}

/// An entry on the operator stack.
///
/// Reducible entries carry only their right precedence: the left half has
/// already been spent when the entry was pushed, so its absence here is
/// structural. `Deferred` is a binary operator synthesized at post-circumfix
/// close time; it behaves like `Binary` under reduction but never had a
/// stored left precedence at all.
enum PendingOp<T, R> {
    Unary {
        name: String,
        right: i32,
        build: UnaryBuild<R>,
    },
    Binary {
        name: String,
        right: i32,
        build: BinaryBuild<R>,
    },
    Deferred {
        name: String,
        right: i32,
        build: BinaryBuild<R>,
    },
    OpenCircumfix {
        name: String,
        closer: Box<dyn CircumfixCloser<T, R>>,
    },
    OpenPostCircumfix {
        name: String,
        power: BindingPower,
        closer: Box<dyn PostCircumfixCloser<T, R>>,
    },
}

impl<T, R> PendingOp<T, R> {
    /// `None` for a still-open circumfix entry, which blocks reduction.
    fn right_power(&self) -> Option<i32> {
        match self {
            PendingOp::Unary { right, .. }
            | PendingOp::Binary { right, .. }
            | PendingOp::Deferred { right, .. } => Some(*right),
            PendingOp::OpenCircumfix { .. } | PendingOp::OpenPostCircumfix { .. } => None,
        }
    }

    fn name(&self) -> &str {
        match self {
            PendingOp::Unary { name, .. }
            | PendingOp::Binary { name, .. }
            | PendingOp::Deferred { name, .. }
            | PendingOp::OpenCircumfix { name, .. }
            | PendingOp::OpenPostCircumfix { name, .. } => name,
        }
    }
}

/// What a matched closing token produced, extracted from the acceptor before
/// the stacks are touched.
enum Closed<R> {
    Grouping(UnaryBuild<R>),
    Combining(String, BindingPower, BinaryBuild<R>),
}

/// The mutable state of one `parse` call.
struct Run<T, R> {
    cursor: Cursor,
    results: Vec<R>,
    ops: Vec<PendingOp<T, R>>,
    /// Indices into `ops` of the open circumfix entries, innermost last.
    open: Vec<usize>,
}

impl<T, R> Run<T, R> {
    fn new() -> Self {
        Self {
            cursor: Cursor { position: 0 },
            results: Vec::new(),
            ops: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Pop and apply stacked operators that bind tighter than whatever
    /// follows. A tie in precedence has no defined resolution and is an
    /// error; a still-open circumfix entry is a hard floor.
    fn reduce(&mut self, following: i32) -> Result<(), ParseError> {
        while let Some(op) = self.ops.pop() {
            let Some(right) = op.right_power() else {
                // Cannot reduce through an unmatched opener.
                self.ops.push(op);
                return Ok(());
            };
            if right == following {
                return Err(ParseError::NonAssociativeTie {
                    position: self.cursor.position,
                    operator: op.name().to_string(),
                });
            }
            if right < following {
                self.ops.push(op);
                return Ok(());
            }
            self.apply(op)?;
        }
        Ok(())
    }

    /// One step of reduction: consume the operator's operand(s) from the
    /// result stack and push the built value in their place.
    fn apply(&mut self, op: PendingOp<T, R>) -> Result<(), ParseError> {
        let position = self.cursor.position;
        match op {
            PendingOp::Unary { build, .. } => {
                let operand = self.pop_operand();
                let value = build(operand)
                    .map_err(|source| ParseError::Build { position, source })?;
                self.results.push(value);
            }
            PendingOp::Binary { build, .. } | PendingOp::Deferred { build, .. } => {
                let rhs = self.pop_operand();
                let lhs = self.pop_operand();
                let value = build(lhs, rhs)
                    .map_err(|source| ParseError::Build { position, source })?;
                self.results.push(value);
            }
            PendingOp::OpenCircumfix { .. } | PendingOp::OpenPostCircumfix { .. } => {
                unreachable!("open circumfix entries are never reduced")
            }
        }
        Ok(())
    }

    /// Operand presence at reduction time is a state-machine invariant; it
    /// only breaks when a dialect assigns a prefix operator a looser binding
    /// than an operator already waiting for its operand.
    fn pop_operand(&mut self) -> R {
        self.results
            .pop()
            .expect("operand stack underflow during reduction")
    }
}

/// The operator-precedence parsing engine.
///
/// Holds nothing but the dialect; every `parse` call owns its own stacks, so
/// one parser may run any number of parses, including from `&self` borrows
/// held in several places.
pub struct Parser<D> {
    dialect: D,
}

impl<D> Parser<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn dialect_mut(&mut self) -> &mut D {
        &mut self.dialect
    }

    /// Replace the grammar between parses.
    pub fn set_dialect(&mut self, dialect: D) {
        self.dialect = dialect;
    }
}

impl<D> Parser<D>
where
    D: Dialect,
    D::Token: fmt::Debug,
{
    /// Parse a finite token sequence into a single value.
    ///
    /// Tokens are consumed exactly once, in order, with no look-ahead. Any
    /// failure aborts the whole parse; there is no partial result.
    pub fn parse<I>(&self, tokens: I) -> Result<D::Output, ParseError>
    where
        I: IntoIterator<Item = D::Token>,
    {
        let mut run = Run::new();
        let mut expecting = Expectation::Term;
        let mut count = 0;

        for (position, token) in tokens.into_iter().enumerate() {
            run.cursor.position = position;
            count = position + 1;
            expecting = match expecting {
                Expectation::Term => self.accept_term(&mut run, token)?,
                Expectation::Operator => self.accept_operator(&mut run, token)?,
            };
        }

        if expecting == Expectation::Term {
            return Err(if run.results.is_empty() {
                ParseError::EmptyInput
            } else {
                ParseError::MissingOperand { position: count }
            });
        }

        run.reduce(FLUSH)?;
        if !run.ops.is_empty() {
            return Err(ParseError::UnclosedBracket { position: count });
        }

        debug_assert_eq!(run.results.len(), 1);
        Ok(run
            .results
            .pop()
            .expect("reduction flushed without leaving a result"))
    }

    /// Handle one token while a term is expected. Returns what the engine
    /// should expect next: a consumed term flips to operator mode, a prefix
    /// or opener keeps waiting for the term.
    fn accept_term(
        &self,
        run: &mut Run<D::Token, D::Output>,
        token: D::Token,
    ) -> Result<Expectation, ParseError> {
        match self.dialect.leading_op(&token, &run.cursor) {
            None => {
                let position = run.cursor.position;
                let term = self
                    .dialect
                    .parse_term(token, &run.cursor)
                    .map_err(|source| ParseError::Term { position, source })?;
                run.results.push(term);
                Ok(Expectation::Operator)
            }
            Some(LeadingOp::Prefix(op)) => {
                // Resolve any stacked prefix that binds tighter; two stacked
                // prefixes of equal precedence trip the tie error here.
                run.reduce(op.power.right)?;
                run.ops.push(PendingOp::Unary {
                    name: op.name,
                    right: op.power.right,
                    build: op.build,
                });
                Ok(Expectation::Term)
            }
            Some(LeadingOp::Circumfix(op)) => {
                run.open.push(run.ops.len());
                run.ops.push(PendingOp::OpenCircumfix {
                    name: op.name,
                    closer: op.closer,
                });
                Ok(Expectation::Term)
            }
        }
    }

    /// Handle one token while an operator is expected.
    fn accept_operator(
        &self,
        run: &mut Run<D::Token, D::Output>,
        token: D::Token,
    ) -> Result<Expectation, ParseError> {
        // A closing token must win over ordinary operator classification,
        // otherwise the construct it closes would be irreducible.
        if self.close_circumfix(run, &token)? {
            return Ok(Expectation::Operator);
        }

        if let Some(op) = self.dialect.trailing_op(&token, &run.cursor) {
            return match op {
                TrailingOp::Postfix(op) => {
                    run.reduce(op.power.left)?;
                    run.ops.push(PendingOp::Unary {
                        name: op.name,
                        right: op.power.right,
                        build: op.build,
                    });
                    Ok(Expectation::Operator)
                }
                TrailingOp::Infix(op) => {
                    run.reduce(op.power.left)?;
                    run.ops.push(PendingOp::Binary {
                        name: op.name,
                        right: op.power.right,
                        build: op.build,
                    });
                    Ok(Expectation::Term)
                }
                TrailingOp::PostCircumfix(op) => {
                    run.reduce(op.power.left)?;
                    run.open.push(run.ops.len());
                    run.ops.push(PendingOp::OpenPostCircumfix {
                        name: op.name,
                        power: op.power,
                        closer: op.closer,
                    });
                    Ok(Expectation::Term)
                }
            };
        }

        if let Some(op) = self.dialect.juxtaposition_op(&run.cursor) {
            run.reduce(op.power.left)?;
            run.ops.push(PendingOp::Binary {
                name: op.name,
                right: op.power.right,
                build: op.build,
            });
            // The unclassified token starts the next operand; whatever it
            // turns out to be decides what the engine expects after it.
            return self.accept_term(run, token);
        }

        Err(ParseError::MissingOperator {
            position: run.cursor.position,
            found: format!("{token:?}"),
        })
    }

    /// Offer the token to the innermost open circumfix acceptor. Returns
    /// `true` when the token closed the construct and was consumed.
    fn close_circumfix(
        &self,
        run: &mut Run<D::Token, D::Output>,
        token: &D::Token,
    ) -> Result<bool, ParseError> {
        let Some(&innermost) = run.open.last() else {
            return Ok(false);
        };
        let closed = match &mut run.ops[innermost] {
            PendingOp::OpenCircumfix { closer, .. } => {
                closer.accept(token).map(Closed::Grouping)
            }
            PendingOp::OpenPostCircumfix { name, power, closer } => {
                let (name, power) = (name.clone(), *power);
                closer
                    .accept(token)
                    .map(|build| Closed::Combining(name, power, build))
            }
            _ => unreachable!("open-acceptor index points at a reducible operator"),
        };
        let Some(closed) = closed else {
            return Ok(false);
        };

        // Fully resolve the enclosed operand; the opener is now on top.
        run.reduce(FLUSH)?;
        debug_assert_eq!(run.ops.len(), innermost + 1);
        run.ops.pop();
        run.open.pop();

        let position = run.cursor.position;
        match closed {
            Closed::Grouping(build) => {
                // A pure bracket has no precedence; wrap the operand now.
                let inner = run.pop_operand();
                let value =
                    build(inner).map_err(|source| ParseError::Build { position, source })?;
                run.results.push(value);
            }
            Closed::Combining(name, power, build) => {
                let rhs = run.pop_operand();
                run.reduce(power.left)?;
                // The combination itself must wait: a following operator may
                // yet bind the left operand tighter. Remember the content and
                // the opener's right precedence, and let reduction decide.
                run.results.push(rhs);
                run.ops.push(PendingOp::Deferred {
                    name,
                    right: power.right,
                    build,
                });
            }
        }
        Ok(true)
    }
}
