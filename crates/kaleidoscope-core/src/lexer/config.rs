// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexer configuration.

/// Options that change how the lexer classifies input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Lex a leading `0` followed by more digits as an octal literal.
    ///
    /// When disabled, such a literal is reported as
    /// [`LexErrorKind::LeadingZeroInDecimalLiteral`](crate::error::LexErrorKind).
    pub octal_literals: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            octal_literals: true,
        }
    }
}

impl LexerConfig {
    /// Configuration with octal literals disabled.
    pub fn without_octal() -> Self {
        Self {
            octal_literals: false,
        }
    }
}
