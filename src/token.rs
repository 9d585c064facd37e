use log::{debug, trace};
use serde::Serialize;
use std::fmt;

use crate::error::Location;

/// The different kinds of tokens recognized by the scanner.
///
/// Only the handful of kinds the bootstrap grammar needs exist.  The literal
/// value of a `NUMBER` lives in the token's `content`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// 'int'
    INT,

    /// 'main'
    MAIN,

    /// 'return'
    RETURN,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ';'
    SEMICOLON,

    /// A decimal integer literal
    NUMBER,

    /// Any other name
    IDENTIFIER,
}

impl TokenKind {
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::INT => "INT",
            TokenKind::MAIN => "MAIN",
            TokenKind::RETURN => "RETURN",
            TokenKind::LEFT_PAREN => "LEFT_PAREN",
            TokenKind::RIGHT_PAREN => "RIGHT_PAREN",
            TokenKind::LEFT_BRACE => "LEFT_BRACE",
            TokenKind::RIGHT_BRACE => "RIGHT_BRACE",
            TokenKind::SEMICOLON => "SEMICOLON",
            TokenKind::NUMBER => "NUMBER",
            TokenKind::IDENTIFIER => "IDENTIFIER",
        }
    }
}

/// A scanned token: its kind, the exact source text, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The category of this token.
    pub kind: TokenKind,

    /// The exact substring from the source that produced this token.
    pub content: String,

    /// File the token was read from.
    pub file_name: String,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    /// Create a new Token with the given kind, content, and position.
    pub fn new<C, F>(kind: TokenKind, content: C, file_name: F, line: usize) -> Self
    where
        C: Into<String>,
        F: Into<String>,
    {
        let token = Self {
            kind,
            content: content.into(),
            file_name: file_name.into(),
            line,
        };

        trace!(
            "Creating new token: kind={:?}, content={}, line={}",
            token.kind,
            token.content,
            token.line
        );

        token
    }

    /// Does this token have kind `kind`?
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        let same: bool = self.kind == kind;

        trace!("Comparing token kind: self={:?}, other={:?} -> {}", self.kind, kind, same);

        same
    }

    pub fn location(&self) -> Location {
        Location::new(self.file_name.as_str(), self.line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug!(
            "Formatting token: kind={:?}, content={}, line={}",
            self.kind, self.content, self.line
        );

        write!(
            f,
            "{} '{}' {}:{}",
            self.kind.name(),
            self.content,
            self.file_name,
            self.line
        )
    }
}
