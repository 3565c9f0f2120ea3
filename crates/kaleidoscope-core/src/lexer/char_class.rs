// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Byte classification tables for the lexer.
//!
//! Every class is a 256-bit set with one bit per byte value, built at compile
//! time from ranges and explicit byte lists. Membership tests are a shift and a
//! mask; there is no allocation and no runtime initialization.
//!
//! Only ASCII bytes are ever members. Non-ASCII bytes fall through every class
//! and the lexer reports them as unexpected symbols.

/// A fixed set of byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSet {
    words: [u64; 4],
}

impl ByteSet {
    /// The set with no members.
    pub const EMPTY: ByteSet = ByteSet { words: [0; 4] };

    /// Builds a set containing every byte in `first..=last`.
    pub const fn from_range(first: u8, last: u8) -> Self {
        assert!(first <= last);
        let mut set = Self::EMPTY;
        let mut b = first;
        loop {
            set = set.with(b);
            if b == last {
                break;
            }
            b += 1;
        }
        set
    }

    /// Builds a set containing exactly the given bytes.
    ///
    /// Each byte may be listed once; duplicates fail const evaluation.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < bytes.len() {
            assert!(!set.contains(bytes[i]));
            set = set.with(bytes[i]);
            i += 1;
        }
        set
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: ByteSet) -> Self {
        ByteSet {
            words: [
                self.words[0] | other.words[0],
                self.words[1] | other.words[1],
                self.words[2] | other.words[2],
                self.words[3] | other.words[3],
            ],
        }
    }

    /// Returns true if `byte` is a member of the set.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.words[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    /// Number of members.
    pub const fn len(&self) -> u32 {
        self.words[0].count_ones()
            + self.words[1].count_ones()
            + self.words[2].count_ones()
            + self.words[3].count_ones()
    }

    /// Returns true if the set has no members.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn with(mut self, byte: u8) -> Self {
        self.words[(byte >> 6) as usize] |= 1u64 << (byte & 63);
        self
    }
}

pub const LOWERCASE_LETTERS: ByteSet = ByteSet::from_range(b'a', b'z');
pub const UPPERCASE_LETTERS: ByteSet = ByteSet::from_range(b'A', b'Z');
pub const LETTERS: ByteSet = LOWERCASE_LETTERS.union(UPPERCASE_LETTERS);
pub const DIGITS: ByteSet = ByteSet::from_range(b'0', b'9');
pub const OCTAL_DIGITS: ByteSet = ByteSet::from_range(b'0', b'7');
pub const BINARY_DIGITS: ByteSet = ByteSet::from_bytes(b"01");
pub const HEX_DIGITS: ByteSet = DIGITS
    .union(ByteSet::from_range(b'a', b'f'))
    .union(ByteSet::from_range(b'A', b'F'));
pub const IDENTIFIER_HEAD: ByteSet = LETTERS.union(ByteSet::from_bytes(b"_"));
pub const IDENTIFIER_TAIL: ByteSet = IDENTIFIER_HEAD.union(DIGITS);
pub const SPACE: ByteSet = ByteSet::from_bytes(b" \t\r\n\x0b\x0c");
pub const OPERATORS: ByteSet = ByteSet::from_bytes(b"+-*/");

/// The named byte classes the lexer dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `a-z` and `A-Z`
    Letter,
    /// `0-9`
    Digit,
    /// `0-7`
    OctalDigit,
    /// `0` and `1`
    BinaryDigit,
    /// `0-9`, `a-f`, `A-F`
    HexDigit,
    /// A letter or `_`
    IdentifierHead,
    /// An identifier head byte or a digit
    IdentifierTail,
    /// Space, tab, CR, LF, vertical tab and form feed
    Space,
    /// One of `+ - * /`
    Operator,
}

impl CharClass {
    /// The table backing this class.
    pub const fn table(self) -> ByteSet {
        match self {
            CharClass::Letter => LETTERS,
            CharClass::Digit => DIGITS,
            CharClass::OctalDigit => OCTAL_DIGITS,
            CharClass::BinaryDigit => BINARY_DIGITS,
            CharClass::HexDigit => HEX_DIGITS,
            CharClass::IdentifierHead => IDENTIFIER_HEAD,
            CharClass::IdentifierTail => IDENTIFIER_TAIL,
            CharClass::Space => SPACE,
            CharClass::Operator => OPERATORS,
        }
    }
}

/// Returns true if `byte` belongs to `class`.
#[inline]
pub const fn is_member(byte: u8, class: CharClass) -> bool {
    class.table().contains(byte)
}

#[inline]
pub(crate) const fn is_space(byte: u8) -> bool {
    SPACE.contains(byte)
}

#[inline]
pub(crate) const fn is_digit(byte: u8) -> bool {
    DIGITS.contains(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let set = ByteSet::from_bytes(b"abc");
        assert!(set.contains(b'a'));
        assert!(set.contains(b'b'));
        assert!(set.contains(b'c'));
        assert!(!set.contains(b'd'));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_from_range() {
        let set = ByteSet::from_range(b'a', b'c');
        assert_eq!(set, ByteSet::from_bytes(b"abc"));
        assert_eq!(ByteSet::from_range(0, 255).len(), 256);
        assert_eq!(ByteSet::from_range(b'x', b'x').len(), 1);
    }

    #[test]
    fn test_class_sizes() {
        assert_eq!(LETTERS.len(), 52);
        assert_eq!(DIGITS.len(), 10);
        assert_eq!(HEX_DIGITS.len(), 22);
        assert_eq!(IDENTIFIER_HEAD.len(), 53);
        assert_eq!(IDENTIFIER_TAIL.len(), 63);
        assert_eq!(SPACE.len(), 6);
        assert!(ByteSet::EMPTY.is_empty());
    }

    #[test]
    fn test_composite_classes() {
        for b in 0..=255u8 {
            let head = is_member(b, CharClass::IdentifierHead);
            assert_eq!(head, is_member(b, CharClass::Letter) || b == b'_');
            assert_eq!(
                is_member(b, CharClass::IdentifierTail),
                head || is_member(b, CharClass::Digit)
            );
            if is_member(b, CharClass::BinaryDigit) {
                assert!(is_member(b, CharClass::OctalDigit));
            }
            if is_member(b, CharClass::OctalDigit) {
                assert!(is_member(b, CharClass::Digit));
            }
        }
    }

    #[test]
    fn test_non_ascii_is_never_a_member() {
        let classes = [
            CharClass::Letter,
            CharClass::Digit,
            CharClass::OctalDigit,
            CharClass::BinaryDigit,
            CharClass::HexDigit,
            CharClass::IdentifierHead,
            CharClass::IdentifierTail,
            CharClass::Space,
            CharClass::Operator,
        ];
        for b in 128..=255u8 {
            for class in classes {
                assert!(!is_member(b, class), "{b:#x} in {class:?}");
            }
        }
    }

    #[test]
    fn test_space() {
        for b in [b' ', b'\t', b'\r', b'\n', 0x0b, 0x0c] {
            assert!(is_space(b));
        }
        assert!(!is_space(b'_'));
        assert!(!is_space(0));
    }
}
