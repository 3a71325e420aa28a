//! Byte classification tables.
//!
//! Three constant lookup tables drive string decoding, escape emission,
//! and hex digit conversion. They are pure functions of the byte value,
//! precomputed so the string state machine is a single indexed dispatch
//! per input byte. The unit tests rebuild each table from its
//! classification rules to keep the literals honest.

/// Classification of a byte encountered inside a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Plain printable byte, copied through (includes DEL).
    Ascii,
    /// C0 control code, must be escaped.
    C0,
    /// Closing quote.
    Dquote,
    /// Escape introducer.
    Backslash,
    /// Lead byte of a two-byte UTF-8 sequence.
    Utf8Two,
    /// Lead byte of a three-byte UTF-8 sequence.
    Utf8Three,
    /// Lead byte of a four-byte UTF-8 sequence.
    Utf8Four,
    /// C1 control code, must be escaped.
    C1,
    /// 0xE0 lead, needs an overlong check.
    Utf8ThreeE0,
    /// 0xED lead, needs a surrogate / CESU-8 check.
    Utf8ThreeEd,
    /// 0xF0 lead, needs an overlong check.
    Utf8FourF0,
    /// Byte that can never appear in well-formed UTF-8.
    BadUtf8,
    /// Overlong-ASCII lead (0xC0/0xC1).
    EvilUtf8,
}

/// String byte classifier, indexed by the raw input byte.
pub(crate) static CHAR_CLASS: [CharClass; 256] = {
    use CharClass::{
        Ascii as A, BadUtf8 as BAD, Backslash as B, Dquote as Q, EvilUtf8 as EV, Utf8Four as U4,
        Utf8FourF0 as F0, Utf8Three as U3, Utf8ThreeE0 as E0, Utf8ThreeEd as ED, Utf8Two as U2,
        C0, C1,
    };
    [
        C0, C0, C0, C0, C0, C0, C0, C0, // 0x00
        C0, C0, C0, C0, C0, C0, C0, C0, // 0x08
        C0, C0, C0, C0, C0, C0, C0, C0, // 0x10
        C0, C0, C0, C0, C0, C0, C0, C0, // 0x18
        A, A, Q, A, A, A, A, A, //         0x20 dquote
        A, A, A, A, A, A, A, A, //         0x28
        A, A, A, A, A, A, A, A, //         0x30
        A, A, A, A, A, A, A, A, //         0x38
        A, A, A, A, A, A, A, A, //         0x40
        A, A, A, A, A, A, A, A, //         0x48
        A, A, A, A, A, A, A, A, //         0x50
        A, A, A, A, B, A, A, A, //         0x58 backslash
        A, A, A, A, A, A, A, A, //         0x60
        A, A, A, A, A, A, A, A, //         0x68
        A, A, A, A, A, A, A, A, //         0x70
        A, A, A, A, A, A, A, A, //         0x78 DEL is a plain byte
        C1, C1, C1, C1, C1, C1, C1, C1, // 0x80
        C1, C1, C1, C1, C1, C1, C1, C1, // 0x88
        C1, C1, C1, C1, C1, C1, C1, C1, // 0x90
        C1, C1, C1, C1, C1, C1, C1, C1, // 0x98
        BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD, // 0xA0
        BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD, // 0xA8
        BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD, // 0xB0
        BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD, // 0xB8
        EV, EV, U2, U2, U2, U2, U2, U2, //       0xC0 overlong-ascii leads
        U2, U2, U2, U2, U2, U2, U2, U2, //       0xC8
        U2, U2, U2, U2, U2, U2, U2, U2, //       0xD0
        U2, U2, U2, U2, U2, U2, U2, U2, //       0xD8
        E0, U3, U3, U3, U3, U3, U3, U3, //       0xE0
        U3, U3, U3, U3, U3, ED, U3, U3, //       0xE8 0xED surrogate lead
        F0, U4, U4, U4, U4, BAD, BAD, BAD, //    0xF0 0xF5.. out of range
        BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD, // 0xF8
    ]
};

/// Escape classes for serializer output, indexed by an ASCII byte.
///
/// 0 copies the byte through; 1..=7 select the two-character escapes
/// `\t \n \r \f \\ \/ \"`; 9 forces a `\uXXXX` escape. The `\u` set
/// covers the remaining controls, DEL, and the HTML-sensitive
/// `&` `'` `<` `=` `>`.
pub(crate) static ESCAPE_LITERAL: [u8; 128] = [
    9, 9, 9, 9, 9, 9, 9, 9, 9, 1, 2, 9, 4, 3, 9, 9, // 0x00
    9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, // 0x10
    0, 0, 7, 0, 0, 0, 9, 9, 0, 0, 0, 0, 0, 0, 0, 6, // 0x20
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 9, 9, 0, // 0x30
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x40
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, // 0x50
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x60
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, // 0x70
];

const fn build_hex_to_int() -> [i8; 256] {
    let mut table = [-1i8; 256];
    let mut b = 0usize;
    while b < 256 {
        let c = b as u8;
        table[b] = match c {
            b'0'..=b'9' => (c - b'0') as i8,
            b'a'..=b'f' => (c - b'a' + 10) as i8,
            b'A'..=b'F' => (c - b'A' + 10) as i8,
            _ => -1,
        };
        b += 1;
    }
    table
}

/// Hex digit decoder: 0..15 for `[0-9a-fA-F]`, -1 otherwise.
pub(crate) static HEX_TO_INT: [i8; 256] = build_hex_to_int();
