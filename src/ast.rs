//! Syntax tree produced by [`crate::parser::parse`].
//!
//! Every node owns its children outright; there is no sharing and no
//! back‑reference, so a [`Program`] can be moved or dropped as a unit once
//! the token buffer is gone.

use serde::Serialize;

use crate::token::Token;

/// Root of the tree: the body of `int main() { … }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    /// Statements in source order (possibly empty).
    pub statements: Vec<Statement>,
}

/// A single statement inside `main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    /// `"return" expression ";"`
    Return(Expression),
}

/// An expression.  Only integer literals exist so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    /// Integer literal; keeps the originating token for later diagnostics.
    Number(Token),
}

impl Expression {
    /// Numeric value of a literal, or `None` if it does not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        match self {
            Expression::Number(token) => token.content.parse().ok(),
        }
    }
}
