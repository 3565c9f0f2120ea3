// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Numeric literal forms and their values.
//!
//! ## Forms
//!
//! | Form | Example | Token kind |
//! |------|---------|------------|
//! | Decimal | `0`, `42` | `DecimalLiteral` |
//! | Octal | `00`, `017` | `OctalLiteral` |
//! | Hexadecimal | `0x8a`, `0XFF` | `HexadecimalLiteral` |
//! | Binary | `0b1010` | `BinaryLiteral` |
//! | Float | `1.5`, `.5`, `2.`, `1e-3`, `0.E+2` | `FloatLiteral` |
//!
//! A leading `0` picks the form from the next byte: `x`/`X` is hexadecimal,
//! `b`/`B` is binary and another digit is octal. Otherwise the literal is
//! decimal, or a float when the digit run continues with `.`, `e` or `E`.
//!
//! Hexadecimal and binary literals need at least one digit after the prefix.
//! A float needs a digit on at least one side of its dot, and an exponent
//! marker must be followed by at least one digit (after an optional sign).
//!
//! Every literal must end at whitespace, `_` or end of input. Anything else
//! makes the whole run up to the next whitespace an `UnexpectedSymbol` error.
//!
//! ## Values
//!
//! Only decimal literals are evaluated. [`decimal_value`] accumulates digits
//! into a `u64` and wraps on overflow; the parser reports the wrap.

/// The result of evaluating a decimal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalValue {
    /// The value modulo 2^64
    pub value: u64,
    /// True if the literal did not fit in 64 bits
    pub overflowed: bool,
}

impl DecimalValue {
    /// Smallest unsigned width, 32 or 64 bits, that holds the value.
    pub fn bit_width(&self) -> u8 {
        if u32::try_from(self.value).is_ok() { 32 } else { 64 }
    }
}

/// Evaluates the digits of a decimal literal.
///
/// `digits` is expected to hold only ASCII digits, as produced for a
/// `DecimalLiteral` token.
pub fn decimal_value(digits: &[u8]) -> DecimalValue {
    let mut value = 0u64;
    let mut overflowed = false;
    for &b in digits {
        debug_assert!(b.is_ascii_digit());
        let digit = u64::from(b - b'0');
        let (shifted, o1) = value.overflowing_mul(10);
        let (sum, o2) = shifted.overflowing_add(digit);
        overflowed |= o1 | o2;
        value = sum;
    }
    DecimalValue { value, overflowed }
}
