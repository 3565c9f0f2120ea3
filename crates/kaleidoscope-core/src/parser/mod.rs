// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for Kaleidoscope source code.
//!
//! Consumes lexer results through a [`Lookahead`](crate::lexer::Lookahead)
//! and appends nodes to the parser's [`Ast`](crate::ast::Ast).
//!
//! ## Structure
//!
//! - `parser` - Main recursive descent parser implementation
//!
//! ## Documentation Submodules
//!
//! - `expressions` - Expression grammar and shape tests
//!
//! ## Usage
//!
//! ```rust
//! use kaleidoscope_core::lexer::{Lexer, Lookahead};
//! use kaleidoscope_core::parser::Parser;
//!
//! let mut lexer = Lexer::new("1 + 2");
//! let mut tokens = Lookahead::<2>::new(&mut lexer);
//! let parsed = Parser::new().parse(&mut tokens).expect("Should parse");
//! assert_eq!(parsed.ast.display(parsed.root).to_string(), "(+ 1 2)");
//! ```

mod parser;

// Documentation and test submodules
pub mod expressions;

pub use parser::{Parsed, Parser};
