// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The lexer that produces tokens from source text.

use std::borrow::Cow;
use std::iter::FusedIterator;

use tracing::trace;

use super::char_class::{
    BINARY_DIGITS, ByteSet, HEX_DIGITS, IDENTIFIER_HEAD, IDENTIFIER_TAIL, OCTAL_DIGITS, is_digit,
    is_space,
};
use super::{Keyword, LexerConfig, Span, Token, TokenKind};
use crate::error::{LexError, LexErrorKind, LexResult};

/// A lexer that tokenizes Kaleidoscope source code.
///
/// The input is a byte sequence and does not have to be valid UTF-8. Bytes
/// outside the ASCII alphabet of the language are reported as
/// [`LexErrorKind::UnexpectedSymbol`].
///
/// Each call to [`Lexer::next_token`] skips whitespace and scans exactly one
/// token or one malformed span. After an error the lexer has already moved
/// past the bad input, so scanning can continue.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    config: LexerConfig,
    emitted_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new<S: AsRef<[u8]> + ?Sized>(source: &'a S) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Creates a new lexer with explicit options.
    pub fn with_config<S: AsRef<[u8]> + ?Sized>(source: &'a S, config: LexerConfig) -> Self {
        Self {
            source: source.as_ref(),
            pos: 0,
            config,
            emitted_eof: false,
        }
    }

    /// Lexes `source` to completion. The last element is the end-of-file token.
    pub fn tokenize<S: AsRef<[u8]> + ?Sized>(source: &'a S) -> Vec<LexResult> {
        Lexer::new(source).collect()
    }

    /// The bytes being scanned.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Byte offset of the scan cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The options this lexer was created with.
    pub fn config(&self) -> LexerConfig {
        self.config
    }

    /// The source bytes covered by `token`.
    pub fn bytes(&self, token: &Token) -> &'a [u8] {
        token.span.slice(self.source)
    }

    /// The source text covered by `token`, with invalid UTF-8 replaced.
    pub fn text(&self, token: &Token) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes(token))
    }

    /// Returns the next token from the source.
    ///
    /// Once the input is exhausted every call returns an `EndOfFile` token
    /// with an empty span at the end of the text.
    pub fn next_token(&mut self) -> LexResult {
        self.skip_whitespace();

        let start = self.pos;
        let Some(first) = self.peek() else {
            self.emitted_eof = true;
            return Ok(Token::new(TokenKind::EndOfFile, Span::new(start, start)));
        };

        let result = if IDENTIFIER_HEAD.contains(first) {
            Ok(self.scan_identifier())
        } else if is_digit(first) || first == b'.' {
            self.scan_number()
        } else if self.starts_with(b"//") {
            Ok(self.scan_line_comment())
        } else if self.starts_with(b"/*") {
            self.scan_block_comment()
        } else if let Some(kind) = TokenKind::from_operator(first) {
            self.pos += 1;
            Ok(Token::new(kind, Span::new(start, self.pos)))
        } else {
            Err(self.skip_as_error(start, LexErrorKind::UnexpectedSymbol))
        };

        assert!(self.pos > start, "lexer failed to advance at offset {start}");
        trace!(?result, "scanned");
        result
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, pos: usize) -> Option<u8> {
        self.source.get(pos).copied()
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(is_space);
    }

    /// Skips to the next whitespace boundary and reports `[begin, pos)`.
    fn skip_as_error(&mut self, begin: usize, kind: LexErrorKind) -> LexError {
        self.eat_while(|b| !is_space(b));
        LexError::new(kind, Span::new(begin, self.pos))
    }

    fn scan_identifier(&mut self) -> Token {
        let begin = self.pos;
        self.pos += 1;
        self.eat_while(|b| IDENTIFIER_TAIL.contains(b));

        let span = Span::new(begin, self.pos);
        let kind = match Keyword::from_ident(span.slice(self.source)) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        Token::new(kind, span)
    }

    fn scan_line_comment(&mut self) -> Token {
        let begin = self.pos;
        self.pos += 2;
        self.eat_while(|b| b != b'\n');
        Token::new(TokenKind::Comment, Span::new(begin, self.pos))
    }

    fn scan_block_comment(&mut self) -> LexResult {
        let begin = self.pos;
        self.pos += 2;
        loop {
            if self.pos >= self.source.len() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedBlockComment,
                    Span::new(begin, self.pos),
                ));
            }
            if self.starts_with(b"*/") {
                self.pos += 2;
                return Ok(Token::new(TokenKind::BlockComment, Span::new(begin, self.pos)));
            }
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) -> LexResult {
        let begin = self.pos;
        let lead = self.source[begin];

        if lead == b'0' {
            match self.peek_at(begin + 1) {
                Some(b'x' | b'X') => {
                    return self.scan_prefixed(begin, HEX_DIGITS, TokenKind::HexadecimalLiteral);
                }
                Some(b'b' | b'B') => {
                    return self.scan_prefixed(begin, BINARY_DIGITS, TokenKind::BinaryLiteral);
                }
                Some(b) if is_digit(b) => {
                    if !self.config.octal_literals {
                        return Err(
                            self.skip_as_error(begin, LexErrorKind::LeadingZeroInDecimalLiteral)
                        );
                    }
                    return self.scan_octal(begin);
                }
                _ => {}
            }
        }

        if is_digit(lead) {
            self.eat_while(is_digit);
            match self.peek() {
                // The digit run is the integer part of a float.
                Some(b'.' | b'e' | b'E') => self.pos = begin,
                _ => return self.finish_literal(begin, TokenKind::DecimalLiteral),
            }
        }

        self.scan_float(begin)
    }

    fn scan_octal(&mut self, begin: usize) -> LexResult {
        self.eat_while(|b| OCTAL_DIGITS.contains(b));
        self.finish_literal(begin, TokenKind::OctalLiteral)
    }

    /// Scans `0x...` and `0b...` literals; at least one digit must follow the prefix.
    fn scan_prefixed(&mut self, begin: usize, digits: ByteSet, kind: TokenKind) -> LexResult {
        self.pos = begin + 2;
        self.eat_while(|b| digits.contains(b));
        if self.pos == begin + 2 {
            return Err(self.skip_as_error(begin, LexErrorKind::UnexpectedSymbol));
        }
        self.finish_literal(begin, kind)
    }

    fn scan_float(&mut self, begin: usize) -> LexResult {
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            if b == b'.' {
                if seen_dot {
                    return Err(self.skip_as_error(
                        begin,
                        LexErrorKind::MultipleDotsInFloatingPointLiteral,
                    ));
                }
                seen_dot = true;
            } else if !is_digit(b) {
                break;
            }
            self.pos += 1;
        }

        if seen_dot && self.pos - begin == 1 {
            return Err(self.skip_as_error(
                begin,
                LexErrorKind::NeedAtLeastOneDigitAroundDotInFloatLiteral,
            ));
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exponent = self.pos;
            self.eat_while(is_digit);
            if self.pos == exponent {
                return Err(self.skip_as_error(
                    begin,
                    LexErrorKind::ZeroLengthExponentInScientificNotation,
                ));
            }
        }

        self.finish_literal(begin, TokenKind::FloatLiteral)
    }

    /// A numeric literal must be followed by whitespace, `_` or end of input.
    fn finish_literal(&mut self, begin: usize, kind: TokenKind) -> LexResult {
        match self.peek() {
            Some(b) if !is_space(b) && b != b'_' => {
                Err(self.skip_as_error(begin, LexErrorKind::UnexpectedSymbol))
            }
            _ => Ok(Token::new(kind, Span::new(begin, self.pos))),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult;

    /// Yields every result up to and including the single `EndOfFile` token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof {
            None
        } else {
            Some(self.next_token())
        }
    }
}

impl FusedIterator for Lexer<'_> {}
