// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for Kaleidoscope.
//!
//! Nodes live in one append-only [`Arena`] per node kind and refer to each
//! other through [`ExprId`], a kind tag plus an index into the matching arena.
//! An `ExprId` is only meaningful for the [`Ast`] that produced it.

mod arena;

use std::fmt;

pub use arena::Arena;

use crate::lexer::TokenKind;

/// Which arena an [`ExprId`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExprKind {
    /// An integer literal
    IntegralLiteral,
    /// A binary operation
    BinaryOperator,
}

/// A tagged reference to an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExprId {
    /// Selects the arena
    pub kind: ExprKind,
    /// Position within that arena
    pub index: u32,
}

impl ExprId {
    /// Creates a new expression reference.
    pub fn new(kind: ExprKind, index: u32) -> Self {
        Self { kind, index }
    }
}

/// An integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegralLiteral {
    /// The literal value
    pub value: u64,
    /// 32 or 64
    pub bit_width: u8,
    /// Whether the literal is signed
    pub signed: bool,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    /// +
    Plus,
    /// -
    Minus,
}

impl BinaryOp {
    /// Maps an operator token to a binary operator, if it is one.
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Plus),
            TokenKind::Minus => Some(BinaryOp::Minus),
            _ => None,
        }
    }

    /// The operator's source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
        }
    }
}

/// A binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryOperator {
    /// Left operand
    pub left: ExprId,
    /// Right operand
    pub right: ExprId,
    /// The operator
    pub op: BinaryOp,
}

/// A borrowed view of one node, resolved from an [`ExprId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprRef<'a> {
    /// An integer literal
    IntegralLiteral(&'a IntegralLiteral),
    /// A binary operation
    BinaryOperator(&'a BinaryOperator),
}

/// The node arenas for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ast {
    integral_literals: Arena<IntegralLiteral>,
    binary_operators: Arena<BinaryOperator>,
}

impl Ast {
    /// Creates an empty AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an integer literal.
    pub fn push_integral_literal(&mut self, node: IntegralLiteral) -> ExprId {
        let index = self.integral_literals.alloc(node);
        ExprId::new(ExprKind::IntegralLiteral, index)
    }

    /// Appends a binary operation.
    pub fn push_binary_operator(&mut self, node: BinaryOperator) -> ExprId {
        let index = self.binary_operators.alloc(node);
        ExprId::new(ExprKind::BinaryOperator, index)
    }

    /// Resolves `id` to its node.
    pub fn get(&self, id: ExprId) -> Option<ExprRef<'_>> {
        match id.kind {
            ExprKind::IntegralLiteral => {
                self.integral_literals.get(id.index).map(ExprRef::IntegralLiteral)
            }
            ExprKind::BinaryOperator => {
                self.binary_operators.get(id.index).map(ExprRef::BinaryOperator)
            }
        }
    }

    /// The integer literal at `id`, or `None` if `id` names another kind.
    pub fn integral_literal(&self, id: ExprId) -> Option<&IntegralLiteral> {
        match id.kind {
            ExprKind::IntegralLiteral => self.integral_literals.get(id.index),
            ExprKind::BinaryOperator => None,
        }
    }

    /// The binary operation at `id`, or `None` if `id` names another kind.
    pub fn binary_operator(&self, id: ExprId) -> Option<&BinaryOperator> {
        match id.kind {
            ExprKind::BinaryOperator => self.binary_operators.get(id.index),
            ExprKind::IntegralLiteral => None,
        }
    }

    /// All integer literals in allocation order.
    pub fn integral_literals(&self) -> &Arena<IntegralLiteral> {
        &self.integral_literals
    }

    /// All binary operations in allocation order.
    pub fn binary_operators(&self) -> &Arena<BinaryOperator> {
        &self.binary_operators
    }

    /// Total number of nodes across all arenas.
    pub fn len(&self) -> usize {
        self.integral_literals.len() + self.binary_operators.len()
    }

    /// Returns true if no node has been allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the tree rooted at `id` as an s-expression, e.g. `(+ 1 (- 2 3))`.
    pub fn display(&self, id: ExprId) -> ExprDisplay<'_> {
        ExprDisplay { ast: self, id }
    }
}

/// S-expression rendering of a subtree; see [`Ast::display`].
#[derive(Debug, Clone, Copy)]
pub struct ExprDisplay<'a> {
    ast: &'a Ast,
    id: ExprId,
}

enum Frame {
    Expr(ExprId),
    Text(&'static str),
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Right-nested chains can be arbitrarily deep; walk with an explicit stack.
        let mut stack = vec![Frame::Expr(self.id)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Text(text) => f.write_str(text)?,
                Frame::Expr(id) => match self.ast.get(id) {
                    None => f.write_str("<invalid>")?,
                    Some(ExprRef::IntegralLiteral(lit)) => write!(f, "{}", lit.value)?,
                    Some(ExprRef::BinaryOperator(bin)) => {
                        write!(f, "({} ", bin.op.symbol())?;
                        stack.push(Frame::Text(")"));
                        stack.push(Frame::Expr(bin.right));
                        stack.push(Frame::Text(" "));
                        stack.push(Frame::Expr(bin.left));
                    }
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: u64) -> IntegralLiteral {
        IntegralLiteral {
            value,
            bit_width: 32,
            signed: false,
        }
    }

    #[test]
    fn test_push_and_get() {
        let mut ast = Ast::new();
        let one = ast.push_integral_literal(lit(1));
        let two = ast.push_integral_literal(lit(2));
        let sum = ast.push_binary_operator(BinaryOperator {
            left: one,
            right: two,
            op: BinaryOp::Plus,
        });

        assert_eq!(one, ExprId::new(ExprKind::IntegralLiteral, 0));
        assert_eq!(two, ExprId::new(ExprKind::IntegralLiteral, 1));
        assert_eq!(sum, ExprId::new(ExprKind::BinaryOperator, 0));
        assert_eq!(ast.len(), 3);

        match ast.get(sum) {
            Some(ExprRef::BinaryOperator(bin)) => {
                assert_eq!(bin.op, BinaryOp::Plus);
                assert_eq!(ast.integral_literal(bin.left).map(|l| l.value), Some(1));
                assert_eq!(ast.integral_literal(bin.right).map(|l| l.value), Some(2));
            }
            other => panic!("expected binary operator, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_getters_reject_mismatch() {
        let mut ast = Ast::new();
        let one = ast.push_integral_literal(lit(1));
        assert!(ast.binary_operator(one).is_none());
        assert!(ast.integral_literal(ExprId::new(ExprKind::IntegralLiteral, 7)).is_none());
        assert!(ast.get(ExprId::new(ExprKind::BinaryOperator, 0)).is_none());
    }

    #[test]
    fn test_display() {
        let mut ast = Ast::new();
        let a = ast.push_integral_literal(lit(1));
        let b = ast.push_integral_literal(lit(2));
        let c = ast.push_integral_literal(lit(3));
        let inner = ast.push_binary_operator(BinaryOperator {
            left: b,
            right: c,
            op: BinaryOp::Minus,
        });
        let outer = ast.push_binary_operator(BinaryOperator {
            left: a,
            right: inner,
            op: BinaryOp::Plus,
        });
        assert_eq!(ast.display(outer).to_string(), "(+ 1 (- 2 3))");
        assert_eq!(ast.display(c).to_string(), "3");
        assert_eq!(
            ast.display(ExprId::new(ExprKind::BinaryOperator, 9)).to_string(),
            "<invalid>"
        );
    }

    #[test]
    fn test_binary_op_from_token() {
        assert_eq!(BinaryOp::from_token(TokenKind::Plus), Some(BinaryOp::Plus));
        assert_eq!(BinaryOp::from_token(TokenKind::Minus), Some(BinaryOp::Minus));
        assert_eq!(BinaryOp::from_token(TokenKind::Asterisk), None);
    }
}
