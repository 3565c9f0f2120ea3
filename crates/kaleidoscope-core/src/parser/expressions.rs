// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression grammar.
//!
//! This module documents the expression parsing logic found in `parser.rs`.
//!
//! ## Grammar
//!
//! ```text
//! Expression :
//!     DecimalLiteral
//!     DecimalLiteral AdditiveOperator Expression
//!
//! AdditiveOperator : one of
//!     +  -
//! ```
//!
//! The recursion on the right makes both operators right-associative with
//! equal precedence:
//!
//! | Source | Tree |
//! |--------|------|
//! | `1 + 2` | `(+ 1 2)` |
//! | `1 - 2 - 3` | `(- 1 (- 2 3))` |
//! | `1 + 2 - 3 + 4` | `(+ 1 (- 2 (+ 3 4)))` |
//!
//! An expression must span the whole input. Comments, `*`, `/`, identifiers,
//! keywords, non-decimal literals and lexical errors are all rejected with
//! `UnexpectedToken` at the first position they appear.
