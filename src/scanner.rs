//! Module `scanner` implements a one‑pass, streaming lexer for the minic
//! subset of C.
//!
//! It transforms a byte slice (`&[u8]`) into a sequence of [`Token`]s, skipping
//! whitespace and comments.  Designed as a `FusedIterator`, it can be chained
//! safely with other iterator adapters.  Unlike many lexers it emits **no**
//! end‑of‑file token: the parser treats the end of the token slice as the end
//! of input.
//!
//! # Public API
//!
//! - `Scanner::new(src, file_name) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, CompilerError>` on each `.next()`.  A lex error does
//!   not stop the iterator; scanning resumes after the offending byte.
//!
//! - `tokenize(src, file_name) -> Result<Vec<Token>>`
//!   Collect every token, stopping at the first lex error.
//!
//! # Token Recognition
//!
//! - Punctuators: `(`, `)`, `{`, `}`, `;`.
//! - Decimal integer literals.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a
//!   perfect‑hash `KEYWORDS` map.
//! - `//` line comments (skipped with `memchr`) and `/* … */` block comments
//!   (closing delimiter located with `memchr::memmem`).

use std::iter::FusedIterator;

use log::{debug, info};
use memchr::{memchr, memchr_iter, memmem};
use phf::phf_map;

use crate::error::{CompilerError, Location, Result};
use crate::token::{Token, TokenKind};

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenKind> = phf_map! {
    b"int"    => TokenKind::INT,
    b"main"   => TokenKind::MAIN,
    b"return" => TokenKind::RETURN,
};

/// A single pass **scanner / lexer** that converts raw bytes into a sequence
/// of [`Token`]s tagged with `file_name` and a line number.
pub struct Scanner<'a> {
    src: &'a [u8],              // entire source file
    file_name: String,          // copied into every token
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenKind>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new<F: Into<String>>(src: &'a [u8], file_name: F) -> Self {
        let file_name: String = file_name.into();

        info!("Scanner created over {} bytes of {}", src.len(), file_name);

        Self {
            src,
            file_name,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn here(&self) -> Location {
        Location::new(self.file_name.as_str(), self.line)
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`.  If it produces a token
    /// the kind is stored in `self.pending`; whitespace and comments return
    /// `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            // ── punctuators ──────────────────────────────────────────────
            b'(' => self.pending = Some(TokenKind::LEFT_PAREN),
            b')' => self.pending = Some(TokenKind::RIGHT_PAREN),
            b'{' => self.pending = Some(TokenKind::LEFT_BRACE),
            b'}' => self.pending = Some(TokenKind::RIGHT_BRACE),
            b';' => self.pending = Some(TokenKind::SEMICOLON),

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {}

            b'\n' => {
                self.line += 1;
            }

            // ── comments ─────────────────────────────────────────────────
            b'/' if self.match_byte(b'/') => {
                if let Some(pos) = memchr(b'\n', &self.src[self.curr..]) {
                    self.curr += pos;
                } else {
                    self.curr = self.len();
                }
            }

            b'/' if self.match_byte(b'*') => {
                return self.skip_block_comment();
            }

            // ── number literal ───────────────────────────────────────────
            b'0'..=b'9' => {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }

                self.pending = Some(TokenKind::NUMBER);
            }

            // ── identifiers / keywords ───────────────────────────────────
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_identifier();
            }

            _ => {
                let c: char = if b.is_ascii() {
                    b as char
                } else {
                    self.multibyte_char(b)
                };

                return Err(CompilerError::lex(
                    self.here(),
                    format!("Unexpected character: {}", c),
                ));
            }
        }

        Ok(())
    }

    /// Decode the UTF‑8 character whose lead byte `b` was just consumed and
    /// step past its continuation bytes.  Invalid sequences consume only the
    /// lead byte and decode as U+FFFD.
    fn multibyte_char(&mut self, b: u8) -> char {
        let width: usize = match b {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };

        let end: usize = (self.start + width).min(self.len());

        match std::str::from_utf8(&self.src[self.start..end])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(c) => {
                self.curr = end;
                c
            }
            None => char::REPLACEMENT_CHARACTER,
        }
    }

    /// Skip to just past the next `*/`, counting the newlines crossed.
    fn skip_block_comment(&mut self) -> Result<()> {
        let rest: &[u8] = &self.src[self.curr..];

        match memmem::find(rest, b"*/") {
            Some(pos) => {
                self.line += memchr_iter(b'\n', &rest[..pos]).count();
                self.curr += pos + 2;

                Ok(())
            }

            None => {
                let location = self.here();

                self.line += memchr_iter(b'\n', rest).count();
                self.curr = self.len();

                Err(CompilerError::lex(location, "Unterminated comment."))
            }
        }
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        let kind: TokenKind = KEYWORDS
            .get(slice)
            .copied()
            .unwrap_or(TokenKind::IDENTIFIER);

        self.pending = Some(kind);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_at_end() {
            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(kind) = self.pending.take() {
                // Every byte of a recognised lexeme is ASCII.
                let content = String::from_utf8_lossy(&self.src[self.start..self.curr]);

                debug!("Scanned token ({:?}) on line {}", kind, self.line);

                return Some(Ok(Token::new(
                    kind,
                    content,
                    self.file_name.as_str(),
                    self.line,
                )));
            }
        }

        None
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan `src` completely, failing on the first lex error.
pub fn tokenize<F: Into<String>>(src: &[u8], file_name: F) -> Result<Vec<Token>> {
    let tokens: Vec<Token> = Scanner::new(src, file_name).collect::<Result<_>>()?;

    info!("Tokenized {} tokens", tokens.len());

    Ok(tokens)
}
