// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Token definitions for the Kaleidoscope lexer.

use std::fmt;

/// A half-open byte range `[begin, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Start byte offset (inclusive)
    pub begin: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end);
        Self { begin, end }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The bytes of `source` covered by this span.
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.begin..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true for the end-of-file token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Keyword {
    /// `def`
    Def,
    /// `extern`
    Extern,
}

impl Keyword {
    /// Looks up an identifier in the keyword table.
    pub fn from_ident(ident: &[u8]) -> Option<Keyword> {
        match ident {
            b"def" => Some(Keyword::Def),
            b"extern" => Some(Keyword::Extern),
            _ => None,
        }
    }

    /// The source spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Def => "def",
            Keyword::Extern => "extern",
        }
    }
}

/// The different kinds of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// A name that is not a keyword
    Identifier,
    /// A reserved word
    Keyword(Keyword),

    // Literals
    /// `0`, `42`
    DecimalLiteral,
    /// `00`, `017`
    OctalLiteral,
    /// `0x8a`, `0XFF`
    HexadecimalLiteral,
    /// `0b1010`
    BinaryLiteral,
    /// `1.5`, `.5`, `2.`, `1e-3`
    FloatLiteral,

    // Comments
    /// `// ...` up to, not including, the end of the line
    Comment,
    /// `/* ... */`
    BlockComment,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Asterisk,
    /// /
    Slash,

    /// End of input
    EndOfFile,
}

impl TokenKind {
    /// Returns true for the integer and float literal kinds.
    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::DecimalLiteral
                | TokenKind::OctalLiteral
                | TokenKind::HexadecimalLiteral
                | TokenKind::BinaryLiteral
                | TokenKind::FloatLiteral
        )
    }

    /// Returns true for line and block comments.
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::BlockComment)
    }

    /// Maps a single operator byte to its token kind.
    pub fn from_operator(byte: u8) -> Option<TokenKind> {
        match byte {
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Asterisk),
            b'/' => Some(TokenKind::Slash),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::Keyword(kw) => write!(f, "keyword `{}`", kw.as_str()),
            TokenKind::DecimalLiteral => f.write_str("decimal literal"),
            TokenKind::OctalLiteral => f.write_str("octal literal"),
            TokenKind::HexadecimalLiteral => f.write_str("hexadecimal literal"),
            TokenKind::BinaryLiteral => f.write_str("binary literal"),
            TokenKind::FloatLiteral => f.write_str("float literal"),
            TokenKind::Comment => f.write_str("comment"),
            TokenKind::BlockComment => f.write_str("block comment"),
            TokenKind::Plus => f.write_str("`+`"),
            TokenKind::Minus => f.write_str("`-`"),
            TokenKind::Asterisk => f.write_str("`*`"),
            TokenKind::Slash => f.write_str("`/`"),
            TokenKind::EndOfFile => f.write_str("end of file"),
        }
    }
}
