//! Code point classification.
//!
//! https://www.w3.org/TR/css-syntax-3/#tokenizer-definitions

use crate::token::Sign;

/// Code point returned by the tokenizer's cursor past the end of the input.
///
/// It lies outside every class below.
pub const EOF_CODE_POINT: u32 = u32::MAX;

macro_rules! definition {
    (digit) => {
        0x30..=0x39
    };
    (uppercase_letter) => {
        0x41..=0x5A
    };
    (lowercase_letter) => {
        0x61..=0x7A
    };
    (letter) => {
        definition!(uppercase_letter) | definition!(lowercase_letter)
    };
    (hex_digit) => {
        definition!(digit) | 0x41..=0x46 | 0x61..=0x66
    };
    (non_ascii_code_point) => {
        0x80..=0x10FFFF
    };
    (name_start_code_point) => {
        definition!(letter) | definition!(non_ascii_code_point) | 0x5F
    };
    (name_code_point) => {
        definition!(name_start_code_point) | definition!(digit) | 0x2D
    };
    (non_printable_code_point) => {
        0x00..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F
    };
    (whitespace) => {
        0x09 | 0x0A | 0x20
    };
    (sign) => {
        0x2B | 0x2D
    };
}

pub(crate) use definition;

pub fn is_whitespace(code_point: u32) -> bool {
    matches!(code_point, definition!(whitespace))
}

pub fn is_digit(code_point: u32) -> bool {
    matches!(code_point, definition!(digit))
}

pub fn is_sign(code_point: u32) -> bool {
    matches!(code_point, definition!(sign))
}

pub fn is_hex_digit(code_point: u32) -> bool {
    matches!(code_point, definition!(hex_digit))
}

pub fn is_letter(code_point: u32) -> bool {
    matches!(code_point, definition!(letter))
}

pub fn is_non_ascii_code_point(code_point: u32) -> bool {
    matches!(code_point, definition!(non_ascii_code_point))
}

pub fn is_name_start_code_point(code_point: u32) -> bool {
    matches!(code_point, definition!(name_start_code_point))
}

pub fn is_name_code_point(code_point: u32) -> bool {
    matches!(code_point, definition!(name_code_point))
}

pub fn is_non_printable_code_point(code_point: u32) -> bool {
    matches!(code_point, definition!(non_printable_code_point))
}

pub fn sign_of(code_point: u32) -> Sign {
    match code_point {
        0x2B => Sign::Plus,
        0x2D => Sign::Minus,
        _ => Sign::None,
    }
}
