// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # kaleidoscope-core
//!
//! The front end of the Kaleidoscope expression language.
//!
//! ## Overview
//!
//! This crate turns source text into a token stream and then into an
//! arena-allocated syntax tree:
//! - Byte classification tables and a hand-written lexer with a full
//!   taxonomy of recoverable lexical errors
//! - A fixed-size lookahead ring over the lexer
//! - A recursive descent parser for right-associative `+`/`-` chains
//! - An AST stored in append-only arenas addressed by tagged indices
//!
//! ## Quick Start
//!
//! ```rust
//! use kaleidoscope_core::parse;
//!
//! let parsed = parse("1 + 2 - 3")?;
//! assert_eq!(parsed.ast.display(parsed.root).to_string(), "(+ 1 (- 2 3))");
//! # Ok::<(), kaleidoscope_core::ParseError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod process;

// Re-exports for convenience
pub use ast::{Ast, ExprId};
pub use error::{Error, LexError, LexErrorKind, LexResult, ParseError, ParserErrorKind, Result};
pub use lexer::{DEFAULT_LOOKAHEAD, Lexer, LexerConfig, Lookahead, Token, TokenKind};
pub use parser::{Parsed, Parser};

/// Parses `source` as one expression with the default lexer options.
///
/// # Examples
///
/// ```rust
/// let err = kaleidoscope_core::parse("+ 1").unwrap_err();
/// assert_eq!(err.kind, kaleidoscope_core::ParserErrorKind::UnexpectedToken);
/// ```
pub fn parse<S: AsRef<[u8]> + ?Sized>(source: &S) -> std::result::Result<Parsed, ParseError> {
    parse_with_config(source, LexerConfig::default())
}

/// Parses `source` as one expression with explicit lexer options.
pub fn parse_with_config<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    config: LexerConfig,
) -> std::result::Result<Parsed, ParseError> {
    let mut lexer = Lexer::with_config(source, config);
    let mut tokens = Lookahead::<DEFAULT_LOOKAHEAD>::new(&mut lexer);
    Parser::new().parse(&mut tokens)
}
