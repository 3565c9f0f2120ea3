// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The main parser implementation.

use tracing::{debug, warn};

use crate::ast::{Ast, BinaryOp, BinaryOperator, ExprId, IntegralLiteral};
use crate::error::{LexResult, ParseError};
use crate::lexer::literals::decimal_value;
use crate::lexer::{Lookahead, Token, TokenKind};

/// A successfully parsed expression together with the arenas that hold it.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// Every node allocated during the parse
    pub ast: Ast,
    /// The root expression
    pub root: ExprId,
}

/// A recursive descent parser for Kaleidoscope expressions.
///
/// A parser is good for one parse: [`Parser::parse`] consumes it and hands
/// back the arenas it filled, so nodes from different inputs never share an
/// [`Ast`]. On failure the arenas are dropped with the parser.
#[derive(Debug, Default)]
pub struct Parser {
    ast: Ast,
}

impl Parser {
    /// Creates a parser with empty arenas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one expression that spans the whole token stream.
    pub fn parse<const N: usize>(
        mut self,
        tokens: &mut Lookahead<'_, '_, N>,
    ) -> Result<Parsed, ParseError> {
        let root = self.parse_expression(tokens)?;
        Ok(Parsed {
            ast: self.ast,
            root,
        })
    }

    /// Parses one decimal literal into an integral literal node.
    fn parse_decimal_literal<const N: usize>(
        &mut self,
        tokens: &mut Lookahead<'_, '_, N>,
    ) -> Result<ExprId, ParseError> {
        let token = match tokens.peek(0) {
            Ok(token) if token.kind == TokenKind::DecimalLiteral => *token,
            other => return Err(Self::unexpected(other)),
        };
        let taken = tokens.take();
        debug_assert_eq!(taken, Ok(token));

        let decimal = decimal_value(tokens.bytes(&token));
        if decimal.overflowed {
            warn!(
                literal = %tokens.text(&token),
                value = decimal.value,
                "decimal literal overflows 64 bits, value wrapped"
            );
        }

        Ok(self.ast.push_integral_literal(IntegralLiteral {
            value: decimal.value,
            bit_width: decimal.bit_width(),
            signed: false,
        }))
    }

    /// Parses `literal (('+' | '-') literal)*` up to end of input.
    ///
    /// Operators are right-associative with equal precedence, so `1 - 2 - 3`
    /// is `1 - (2 - 3)`. Literals are allocated left to right and binary nodes
    /// from the rightmost operator outward.
    fn parse_expression<const N: usize>(
        &mut self,
        tokens: &mut Lookahead<'_, '_, N>,
    ) -> Result<ExprId, ParseError> {
        let first = self.parse_decimal_literal(tokens)?;
        let mut rest: Vec<(BinaryOp, ExprId)> = Vec::new();

        loop {
            let next = tokens.peek(0);
            if next.as_ref().is_ok_and(Token::is_eof) {
                break;
            }
            let (token, op) = match next {
                Ok(token) => match BinaryOp::from_token(token.kind) {
                    Some(op) => (*token, op),
                    None => return Err(Self::unexpected(next)),
                },
                Err(_) => return Err(Self::unexpected(next)),
            };
            let taken = tokens.take();
            debug_assert_eq!(taken, Ok(token));
            rest.push((op, self.parse_decimal_literal(tokens)?));
        }

        // Fold from the right without recursing. `pending` is an operator
        // together with the subtree on its right, waiting for a left operand.
        let mut pending: Option<(BinaryOp, ExprId)> = None;
        for &(op, operand) in rest.iter().rev() {
            pending = Some(match pending {
                None => (op, operand),
                Some((right_op, right)) => (op, self.binary(operand, right, right_op)),
            });
        }
        Ok(match pending {
            None => first,
            Some((op, right)) => self.binary(first, right, op),
        })
    }

    fn binary(&mut self, left: ExprId, right: ExprId, op: BinaryOp) -> ExprId {
        self.ast.push_binary_operator(BinaryOperator { left, right, op })
    }

    fn unexpected(result: &LexResult) -> ParseError {
        let err = ParseError::unexpected(result);
        debug!(found = %err.found, span = %err.span, "parse failed");
        err
    }
}
