//! A flat-rule validator for boolean-formula token sequences.
//!
//! This is deliberately not the precedence engine: it knows nothing about
//! binding powers or associativity. It checks bracket balance and the
//! legality of every adjacent token pair against fixed lists of unary and
//! binary operator symbols, and reports the first violation with the
//! offending token attached.

use std::collections::HashSet;

use crate::errors::ValidationError;

const OPENING_BRACKET: &str = "(";
const CLOSING_BRACKET: &str = ")";

/// Validates formula token sequences against fixed operator symbol sets.
///
/// Brackets are always `(` and `)`. Any token that is neither a bracket nor a
/// listed operator counts as an operand.
pub struct FormulaValidator {
    unary_operators: HashSet<String>,
    binary_operators: HashSet<String>,
}

impl FormulaValidator {
    pub fn new<U, B>(unary_operators: U, binary_operators: B) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            unary_operators: unary_operators.into_iter().map(Into::into).collect(),
            binary_operators: binary_operators.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a whole token sequence. An empty sequence is trivially valid.
    pub fn validate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<(), ValidationError> {
        if tokens.is_empty() {
            return Ok(());
        }

        let mut depth = 0i64;
        for token in tokens {
            let token = token.as_ref();
            if is_opening_bracket(token) {
                depth += 1;
            } else if is_closing_bracket(token) {
                depth -= 1;
            } else if !self.is_valid_token(token) {
                return Err(ValidationError::InvalidToken { token: token.into() });
            }

            if depth < 0 {
                return Err(ValidationError::UnbalancedBrackets { token: token.into() });
            }
        }

        let last = tokens[tokens.len() - 1].as_ref();
        if depth != 0 {
            return Err(ValidationError::UnbalancedBrackets { token: last.into() });
        }
        if self.is_operator(last) {
            return Err(ValidationError::TrailingOperator { token: last.into() });
        }

        for pair in tokens.windows(2) {
            let (lhs, rhs) = (pair[0].as_ref(), pair[1].as_ref());
            if self.is_forbidden_pair(lhs, rhs) {
                return Err(ValidationError::InappropriatePair {
                    token: rhs.into(),
                    previous: lhs.into(),
                });
            }
        }

        Ok(())
    }

    fn is_forbidden_pair(&self, lhs: &str, rhs: &str) -> bool {
        if self.is_operand(lhs) {
            return self.is_operand(rhs) || is_opening_bracket(rhs) || self.is_unary_operator(rhs);
        }
        if is_opening_bracket(lhs) {
            return is_closing_bracket(rhs) || self.is_binary_operator(rhs);
        }
        if is_closing_bracket(lhs) {
            return is_opening_bracket(rhs) || self.is_operand(rhs) || self.is_unary_operator(rhs);
        }
        if self.is_unary_operator(lhs) {
            return self.is_operator(rhs) || is_closing_bracket(rhs);
        }
        if self.is_binary_operator(lhs) {
            return self.is_binary_operator(rhs) || is_closing_bracket(rhs);
        }
        false
    }

    fn is_operator(&self, token: &str) -> bool {
        self.is_unary_operator(token) || self.is_binary_operator(token)
    }

    fn is_unary_operator(&self, token: &str) -> bool {
        self.unary_operators.contains(token)
    }

    fn is_binary_operator(&self, token: &str) -> bool {
        self.binary_operators.contains(token)
    }

    fn is_operand(&self, token: &str) -> bool {
        !is_bracket(token) && !self.is_operator(token)
    }

    // An operand must not embed bracket characters.
    fn is_valid_token(&self, token: &str) -> bool {
        is_bracket(token) || !token.contains(['(', ')'])
    }
}

fn is_bracket(token: &str) -> bool {
    is_opening_bracket(token) || is_closing_bracket(token)
}

fn is_opening_bracket(token: &str) -> bool {
    token == OPENING_BRACKET
}

fn is_closing_bracket(token: &str) -> bool {
    token == CLOSING_BRACKET
}
