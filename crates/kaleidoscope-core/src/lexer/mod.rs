// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical analysis (tokenization) for Kaleidoscope source code.
//!
//! The lexer transforms source text into a stream of tokens and recoverable
//! lexical errors that can be consumed by the parser.
//!
//! ## Structure
//!
//! - `char_class.rs` - Byte classification tables
//! - `scanner.rs` - Main `Lexer` struct that produces tokens
//! - `lookahead.rs` - `Lookahead` ring for bounded peeking
//! - `token.rs` - `Token` and `TokenKind` definitions
//! - `config.rs` - `LexerConfig`
//!
//! ## Documentation Submodules
//!
//! - `literals` - Numeric literal forms and decimal values
//!
//! ## Usage
//!
//! ```rust
//! use kaleidoscope_core::lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("def f 0x1F // hex");
//!
//! loop {
//!     match lexer.next_token() {
//!         Ok(token) if token.kind == TokenKind::EndOfFile => break,
//!         Ok(token) => println!("{:?} {:?}", token.kind, lexer.text(&token)),
//!         Err(err) => println!("error: {err}"),
//!     }
//! }
//! ```

mod char_class;
mod config;
mod lookahead;
mod scanner;
mod token;

pub mod literals;

pub use char_class::{ByteSet, CharClass, is_member};
pub use config::LexerConfig;
pub use lookahead::{DEFAULT_LOOKAHEAD, Lookahead};
pub use scanner::Lexer;
pub use token::{Keyword, Span, Token, TokenKind};
