/*!
Backtracking recursive‑descent parser for the minic bootstrap grammar.

Grammar
-------

```text
program     → "int" "main" "(" ")" "{" statement* "}" ;
statement   → return_stmt ;
return_stmt → "return" expression ";" ;
expression  → NUMBER ;
```

Every non‑terminal has one `expect_*` matcher.  A matcher is handed the
shared token slice (through `self`) plus a start index and returns
`Some((node, next))`, where `next` is one past the last token it consumed,
or `None` when the rule does not match here.  Before returning `None` a
matcher records *why* it failed, together with the index it failed at, in
the [`AttemptLog`] threaded through the call.  A matcher that fails only
because a sub‑matcher failed propagates the `None` without recording again.

Error selection
---------------

Speculative paths fail all the time (the statement loop in `main` always
ends with one failed statement).  When the whole parse fails, the record
with the **greatest failure index** is reported; among equal indices the one
recorded **last** wins.

Message phrasing
----------------

| Phrasing | Shape                          | Use when a token should be… |
|----------|--------------------------------|-----------------------------|
| `At`     | `expected X at 'tok'`          | removed                     |
| `Got`    | `expected X, got 'tok'`        | changed                     |
| `After`  | `expected X after 'prev'`      | inserted                    |

### Logging Policy

| Location                 | Level   | Purpose                                 |
|--------------------------|---------|-----------------------------------------|
| `Parser::new`, `parse`   | `info`  | Lifecycle milestones.                   |
| `expect_*`               | `debug` | Descent into grammar branches.          |
| `AttemptLog::record`     | `debug` | Every failed attempt and its index.     |
*/

use crate::ast::{Expression, Program, Statement};
use crate::error::{CompilerError, Result};
use crate::token::{Token, TokenKind};

use log::{debug, info, trace};

/// Result of one matcher: the node plus the next unconsumed index, or `None`.
type Attempt<T> = Option<(T, usize)>;

/// Token kinds that open the program, in order.
const MAIN_PROLOGUE: [TokenKind; 5] = [
    TokenKind::INT,
    TokenKind::MAIN,
    TokenKind::LEFT_PAREN,
    TokenKind::RIGHT_PAREN,
    TokenKind::LEFT_BRACE,
];

/// How a synthesized message points at the offending position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phrasing {
    /// `"<message> at '<token>'"`
    At,

    /// `"<message>, got '<token>'"`
    Got,

    /// `"<message> after '<previous token>'"`
    After,
}

/// One failed parse attempt.
#[derive(Debug)]
struct ErrorRecord {
    error: CompilerError,

    /// Index of the token the attempt failed at.
    index: usize,
}

/// Failed attempts of a single [`Parser::parse`] call, in recording order.
#[derive(Debug, Default)]
struct AttemptLog {
    records: Vec<ErrorRecord>,
}

impl AttemptLog {
    /// Store `error` as failing at `index`.  Returns `None` so a matcher can
    /// `return log.record(..)` directly.
    fn record<T>(&mut self, error: CompilerError, index: usize) -> Attempt<T> {
        debug!("Recording failed attempt at {}: {}", index, error.message());

        self.records.push(ErrorRecord { error, index });

        None
    }

    /// The error that got furthest.  `max_by_key` yields the last of several
    /// equal maxima, so later records win ties.
    fn furthest(self) -> Option<CompilerError> {
        self.records
            .into_iter()
            .max_by_key(|record| record.index)
            .map(|record| {
                debug!(
                    "Selected error at {}: {}",
                    record.index,
                    record.error.message()
                );

                record.error
            })
    }
}

/// Parser over an immutable slice of tokens.
///
/// The parser keeps no state between calls; each [`parse`](Parser::parse)
/// starts with an empty [`AttemptLog`].
pub struct Parser<'a> {
    tokens: &'a [Token],
}

impl<'a> Parser<'a> {
    /// Construct a new parser.
    pub fn new(tokens: &'a [Token]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self { tokens }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse the whole token slice as one program.
    pub fn parse(&self) -> Result<Program> {
        info!("Beginning parse phase");

        let mut log = AttemptLog::default();

        let (program, index) = match self.expect_main(&mut log, 0) {
            Some(matched) => matched,
            None => {
                return log
                    .furthest()
                    .map_or_else(|| unreachable!("failed parse recorded no error"), Err);
            }
        };

        if index < self.tokens.len() {
            debug!("{} tokens left after main", self.tokens.len() - index);

            return Err(self.make_error("unexpected token", index, Phrasing::At));
        }

        info!(
            "Parse completed with {} statements",
            program.statements.len()
        );

        Ok(program)
    }

    // ──────────────────────── grammar rules ───────────────────────

    /// Ex: `int main() { return 4; }`
    fn expect_main(&self, log: &mut AttemptLog, mut index: usize) -> Attempt<Program> {
        debug!("Entering main at {}", index);

        match self.match_tokens(index, &MAIN_PROLOGUE) {
            Some(matched) => index += matched,
            None => {
                let err = self.make_error("expected main function starting", index, Phrasing::At);
                return log.record(err, index);
            }
        }

        let mut statements: Vec<Statement> = Vec::new();

        // A failed statement leaves `index` at its checkpoint; the failure
        // stays in the log.
        while let Some((stmt, next)) = self.expect_statement(log, index) {
            statements.push(stmt);
            index = next;
        }

        if !self.check(index, TokenKind::RIGHT_BRACE) {
            let err = self.make_error("expected closing brace", index, Phrasing::Got);
            return log.record(err, index);
        }

        Some((Program { statements }, index + 1))
    }

    fn expect_statement(&self, log: &mut AttemptLog, index: usize) -> Attempt<Statement> {
        debug!("Entering statement at {}", index);

        self.expect_return(log, index)
    }

    fn expect_return(&self, log: &mut AttemptLog, index: usize) -> Attempt<Statement> {
        if !self.check(index, TokenKind::RETURN) {
            let err = self.make_error("expected return keyword", index, Phrasing::Got);
            return log.record(err, index);
        }

        // The expression matcher has already logged its own failure.
        let (expr, index) = self.expect_expression(log, index + 1)?;

        if !self.check(index, TokenKind::SEMICOLON) {
            let err = self.make_error("expected semicolon", index, Phrasing::After);
            return log.record(err, index);
        }

        Some((Statement::Return(expr), index + 1))
    }

    /// Ex: `5`.  Only integer literals for now.
    fn expect_expression(&self, log: &mut AttemptLog, index: usize) -> Attempt<Expression> {
        debug!("Entering expression at {}", index);

        match self.tokens.get(index) {
            Some(token) if token.is(TokenKind::NUMBER) => {
                Some((Expression::Number(token.clone()), index + 1))
            }
            _ => {
                let err = self.make_error("expected number", index, Phrasing::Got);
                log.record(err, index)
            }
        }
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn check(&self, index: usize, kind: TokenKind) -> bool {
        self.tokens.get(index).is_some_and(|token| token.is(kind))
    }

    /// All‑or‑nothing match of `kinds` against the tokens starting at
    /// `index`.  Returns how many tokens matched, or `None`.
    fn match_tokens(&self, index: usize, kinds: &[TokenKind]) -> Option<usize> {
        let tokens: &[Token] = self.tokens.get(index..).unwrap_or(&[]);

        if tokens.len() < kinds.len() {
            trace!("Only {} tokens left for {} kinds", tokens.len(), kinds.len());

            return None;
        }

        let all_match: bool = kinds
            .iter()
            .zip(tokens)
            .all(|(&kind, token)| token.is(kind));

        all_match.then_some(kinds.len())
    }

    /// Build a syntax error pointing at `index`.
    ///
    /// An empty token stream yields `"<message> at beginning of source"` with
    /// no location.  An index at or past the end always uses [`Phrasing::After`]
    /// on the last token; at index 0 `After` falls back to `Got`, since there
    /// is no previous token.
    fn make_error(&self, message: &str, index: usize, phrasing: Phrasing) -> CompilerError {
        let tokens: &[Token] = self.tokens;

        if tokens.is_empty() {
            return CompilerError::syntax(None, format!("{} at beginning of source", message));
        }

        let (index, phrasing) = if index >= tokens.len() {
            (tokens.len(), Phrasing::After)
        } else if index == 0 && phrasing == Phrasing::After {
            (0, Phrasing::Got)
        } else {
            (index, phrasing)
        };

        let (text, token) = match phrasing {
            Phrasing::At => {
                let token: &Token = &tokens[index];
                (format!("{} at '{}'", message, token.content), token)
            }

            Phrasing::Got => {
                let token: &Token = &tokens[index];
                (format!("{}, got '{}'", message, token.content), token)
            }

            Phrasing::After => {
                let token: &Token = &tokens[index - 1];
                (format!("{} after '{}'", message, token.content), token)
            }
        };

        CompilerError::syntax(Some(token.location()), text)
    }
}

/// Parse `tokens` into a [`Program`] with a fresh [`Parser`].
pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse()
}
