//! Centralised error hierarchy for the **minic front end**.
//!
//! The scanner and parser convert their failure modes into one of the
//! variants defined here.  This gives a uniform `Result<T>` alias throughout
//! the crate and ergonomic inter‑operation with `anyhow` in the binary.
//!
//! The module **does not** print diagnostics itself.

use std::fmt;

use log::info;
use serde::Serialize;
use thiserror::Error;

/// Source position of the token an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Name of the file the token was read from.
    pub file_name: String,

    /// 1‑based line number.
    pub line: usize,
}

impl Location {
    pub fn new<S: Into<String>>(file_name: S, line: usize) -> Self {
        Self {
            file_name: file_name.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line)
    }
}

/// Canonical error type used throughout the front end.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Lexical (scanner) error.
    #[error("{}", render(.message, .location))]
    Lex {
        /// Human‑readable description.
        message: String,

        /// Where the offending byte was found.
        location: Option<Location>,
    },

    /// Syntactic (parser) error.  `location` is `None` only when the token
    /// stream was empty.
    #[error("{}", render(.message, .location))]
    Syntax {
        message: String,
        location: Option<Location>,
    },
}

fn render(message: &str, location: &Option<Location>) -> String {
    match location {
        Some(location) => format!("{}: error: {}", location, message),
        None => format!("error: {}", message),
    }
}

impl CompilerError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(location: Location, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: location={}, msg={}", location, message);

        CompilerError::Lex {
            message,
            location: Some(location),
        }
    }

    /// Helper constructor for the **parser**.
    pub fn syntax<S: Into<String>>(location: Option<Location>, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Syntax error: location={:?}, msg={}",
            location, message
        );

        CompilerError::Syntax { message, location }
    }

    /// The bare message, without the location prefix.
    pub fn message(&self) -> String {
        match self {
            CompilerError::Lex { message, .. } | CompilerError::Syntax { message, .. } => {
                message.clone()
            }
        }
    }

    /// Source location, if the error carries one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            CompilerError::Lex { location, .. } | CompilerError::Syntax { location, .. } => {
                location.as_ref()
            }
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, CompilerError>;
