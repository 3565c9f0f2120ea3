// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bounded lookahead over a [`Lexer`].

use std::borrow::Cow;

use super::{Lexer, Token};
use crate::error::LexResult;

/// Lookahead depth used by [`crate::parse`] and the command-line tool.
pub const DEFAULT_LOOKAHEAD: usize = 5;

/// A fixed ring of the next `N` lexer results.
///
/// The ring always holds exactly the next `N` results that have not been
/// taken, in order. Peeking never calls the lexer, so it cannot change what
/// later calls to [`take`](Lookahead::take) return.
#[derive(Debug)]
pub struct Lookahead<'l, 'a, const N: usize> {
    lexer: &'l mut Lexer<'a>,
    ring: [LexResult; N],
    start: usize,
}

impl<'l, 'a, const N: usize> Lookahead<'l, 'a, N> {
    /// Wraps `lexer` and immediately scans the first `N` results.
    pub fn new(lexer: &'l mut Lexer<'a>) -> Self {
        const { assert!(N >= 2, "lookahead needs at least two slots") };
        let ring = std::array::from_fn(|_| lexer.next_token());
        Self {
            lexer,
            ring,
            start: 0,
        }
    }

    /// Returns the result `offset` positions ahead without consuming it.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= N`.
    pub fn peek(&self, offset: usize) -> &LexResult {
        assert!(offset < N, "peek offset {offset} out of range for lookahead of {N}");
        &self.ring[(self.start + offset) % N]
    }

    /// Consumes the oldest result and refills its slot from the lexer.
    pub fn take(&mut self) -> LexResult {
        let fresh = self.lexer.next_token();
        let taken = std::mem::replace(&mut self.ring[self.start], fresh);
        self.start = (self.start + 1) % N;
        taken
    }

    /// The source bytes covered by `token`.
    pub fn bytes(&self, token: &Token) -> &'a [u8] {
        self.lexer.bytes(token)
    }

    /// The source text covered by `token`, with invalid UTF-8 replaced.
    pub fn text(&self, token: &Token) -> Cow<'a, str> {
        self.lexer.text(token)
    }

    /// Lookahead depth.
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn kinds(results: &[LexResult]) -> Vec<Option<TokenKind>> {
        results.iter().map(|r| r.as_ref().ok().map(|t| t.kind)).collect()
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a + 1");
        let lookahead = Lookahead::<2>::new(&mut lexer);
        let kind = |k: usize| lookahead.peek(k).as_ref().map(|t| t.kind);
        assert_eq!(kind(0), Ok(TokenKind::Identifier));
        assert_eq!(kind(1), Ok(TokenKind::Plus));
        assert_eq!(kind(0), Ok(TokenKind::Identifier));
    }

    #[test]
    fn test_take_in_order() {
        let source = "def x 0x1 0x / * ";
        let expected = Lexer::tokenize(source);

        let mut lexer = Lexer::new(source);
        let mut lookahead = Lookahead::<3>::new(&mut lexer);
        let taken: Vec<_> = (0..expected.len()).map(|_| lookahead.take()).collect();
        assert_eq!(kinds(&taken), kinds(&expected));
        assert_eq!(taken, expected);
    }

    #[test]
    fn test_holds_eof_after_exhaustion() {
        let mut lexer = Lexer::new("x");
        let mut lookahead = Lookahead::<4>::new(&mut lexer);
        assert!(lookahead.peek(1).as_ref().is_ok_and(Token::is_eof));
        assert!(lookahead.peek(3).as_ref().is_ok_and(Token::is_eof));
        lookahead.take();
        for _ in 0..10 {
            assert!(lookahead.take().is_ok_and(|t| t.is_eof()));
        }
    }

    #[test]
    fn test_replay_equivalence() {
        let source = "1 - 02 0b2 .5e3 /* c */ extern";
        let mut lexer = Lexer::new(source);
        let peeker = Lookahead::<5>::new(&mut lexer);
        let peeked: Vec<LexResult> = (0..5).map(|k| peeker.peek(k).clone()).collect();

        for (k, expected) in peeked.iter().enumerate() {
            let mut lexer = Lexer::new(source);
            let mut taker = Lookahead::<5>::new(&mut lexer);
            let mut last = taker.take();
            for _ in 0..k {
                last = taker.take();
            }
            assert_eq!(&last, expected, "offset {k}");
        }
    }

    #[test]
    fn test_interleaved_peek_and_take() {
        let mut lexer = Lexer::new("a b c d e f");
        let mut lookahead = Lookahead::<3>::new(&mut lexer);
        let mut seen = Vec::new();
        while let Ok(token) = lookahead.peek(0).clone() {
            if token.is_eof() {
                break;
            }
            let _ = lookahead.peek(2);
            let taken = lookahead.take().expect("identifier");
            assert_eq!(taken, token);
            seen.push(lookahead.text(&taken));
        }
        assert_eq!(seen, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_peek_past_capacity_panics() {
        let mut lexer = Lexer::new("a");
        let lookahead = Lookahead::<2>::new(&mut lexer);
        let _ = lookahead.peek(2);
    }

    #[test]
    fn test_capacity() {
        let mut lexer = Lexer::new("");
        assert_eq!(Lookahead::<DEFAULT_LOOKAHEAD>::new(&mut lexer).capacity(), 5);
    }
}
