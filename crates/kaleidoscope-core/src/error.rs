// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the Kaleidoscope front end.
//!
//! Lexical and syntactic failures are separate taxonomies. A [`LexError`] is
//! recoverable: the lexer has already skipped the malformed span and can keep
//! producing tokens. A [`ParseError`] ends the current parse attempt.

use thiserror::Error;

use crate::lexer::{Span, TokenKind};

/// Result type for lexer operations.
pub type LexResult = std::result::Result<crate::lexer::Token, LexError>;

/// Result type for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong while scanning a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LexErrorKind {
    /// A byte that cannot start or continue any token here
    UnexpectedSymbol,
    /// A decimal literal such as `01` while octal literals are disabled
    LeadingZeroInDecimalLiteral,
    /// `1e`, `2.5E+` and friends
    ZeroLengthExponentInScientificNotation,
    /// A `.` with no digit on either side
    NeedAtLeastOneDigitAroundDotInFloatLiteral,
    /// `0..`, `1.2.3`
    MultipleDotsInFloatingPointLiteral,
    /// `/*` without a closing `*/`
    UnterminatedBlockComment,
}

impl LexErrorKind {
    /// A short human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            LexErrorKind::UnexpectedSymbol => "unexpected symbol",
            LexErrorKind::LeadingZeroInDecimalLiteral => "leading zero in decimal literal",
            LexErrorKind::ZeroLengthExponentInScientificNotation => {
                "missing exponent digits in scientific notation"
            }
            LexErrorKind::NeedAtLeastOneDigitAroundDotInFloatLiteral => {
                "float literal needs at least one digit around the dot"
            }
            LexErrorKind::MultipleDotsInFloatingPointLiteral => {
                "multiple dots in floating point literal"
            }
            LexErrorKind::UnterminatedBlockComment => "unterminated block comment",
        }
    }
}

/// A malformed span of input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{} at {span}", .kind.message())]
pub struct LexError {
    /// The kind of error
    pub kind: LexErrorKind,
    /// The skipped span
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParserErrorKind {
    /// The next token cannot appear at this position
    UnexpectedToken,
}

/// What the parser found where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Found {
    /// A well-formed token of the wrong kind
    Token(TokenKind),
    /// A slot holding a lexical error
    LexError(LexErrorKind),
}

impl std::fmt::Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Found::Token(kind) => write!(f, "{kind}"),
            Found::LexError(kind) => write!(f, "invalid input ({})", kind.message()),
        }
    }
}

/// A failed parse attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("unexpected {found} at {span}")]
pub struct ParseError {
    /// The kind of error
    pub kind: ParserErrorKind,
    /// Span of the offending token
    pub span: Span,
    /// The token or lexical error found at `span`
    pub found: Found,
}

impl ParseError {
    /// Builds an `UnexpectedToken` error from the offending lexer result.
    pub fn unexpected(result: &LexResult) -> Self {
        let (span, found) = match result {
            Ok(token) => (token.span, Found::Token(token.kind)),
            Err(err) => (err.span, Found::LexError(err.kind)),
        };
        Self {
            kind: ParserErrorKind::UnexpectedToken,
            span,
            found,
        }
    }
}

/// Errors from running an external process.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The stdio pipes could not be set up or drained
    #[error("failed to create pipes: {0}")]
    FailedToCreatePipes(#[source] std::io::Error),

    /// The child process could not be started
    #[error("failed to start process: {0}")]
    ForkFailed(#[source] std::io::Error),

    /// The child terminated without an exit status (killed by a signal)
    #[error("process exited abnormally")]
    ExitedAbnormally,
}

impl ProcessError {
    /// The kind of failure, without its payload.
    pub fn kind(&self) -> ProcessErrorKind {
        match self {
            ProcessError::FailedToCreatePipes(_) => ProcessErrorKind::FailedToCreatePipes,
            ProcessError::ForkFailed(_) => ProcessErrorKind::ForkFailed,
            ProcessError::ExitedAbnormally => ProcessErrorKind::ExitedAbnormally,
        }
    }
}

/// Payload-free mirror of [`ProcessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessErrorKind {
    /// See [`ProcessError::FailedToCreatePipes`]
    FailedToCreatePipes,
    /// See [`ProcessError::ForkFailed`]
    ForkFailed,
    /// See [`ProcessError::ExitedAbnormally`]
    ExitedAbnormally,
}

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Lexical error
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    /// Syntax error
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// Process execution error
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(LexErrorKind::UnexpectedSymbol, Span::new(0, 4));
        assert_eq!(err.to_string(), "unexpected symbol at [0, 4)");
    }

    #[test]
    fn test_parse_error_from_token() {
        let result: LexResult = Ok(Token::new(TokenKind::Plus, Span::new(0, 1)));
        let err = ParseError::unexpected(&result);
        assert_eq!(err.kind, ParserErrorKind::UnexpectedToken);
        assert_eq!(err.found, Found::Token(TokenKind::Plus));
        assert_eq!(err.to_string(), "unexpected `+` at [0, 1)");
    }

    #[test]
    fn test_parse_error_from_lex_error() {
        let result: LexResult = Err(LexError::new(
            LexErrorKind::MultipleDotsInFloatingPointLiteral,
            Span::new(3, 6),
        ));
        let err = ParseError::unexpected(&result);
        assert_eq!(err.span, Span::new(3, 6));
        assert_eq!(
            err.found,
            Found::LexError(LexErrorKind::MultipleDotsInFloatingPointLiteral)
        );
    }

    #[test]
    fn test_error_conversions() {
        let lex = LexError::new(LexErrorKind::UnterminatedBlockComment, Span::new(0, 2));
        let err: Error = lex.into();
        assert!(matches!(err, Error::Lex(_)));
        let err: Error = ProcessError::ExitedAbnormally.into();
        assert_eq!(err.to_string(), "process exited abnormally");
    }
}
