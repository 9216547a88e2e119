use css_tokenizer::definitions::{is_hex_digit, EOF_CODE_POINT};
use css_tokenizer::unicode::{code_points_from_str, number_from_hex_code_points, MAX_UNICODE};
use css_tokenizer::Cursor;

use crate::types::UnicodeRange;
use crate::{Result, SyntaxError};

const MAX_DIGITS: usize = 6;

/// Parses `input` as a `<urange>`, such as `U+0-7F` or `u+4??`.
///
/// Returns `Ok(None)` when the text does not have the shape of a unicode
/// range, and an error when it does but describes an impossible range.
///
/// https://drafts.csswg.org/css-syntax-3/#urange-syntax
pub fn parse_urange(input: &str) -> Result<Option<UnicodeRange>> {
    let mut input = Cursor::with_preprocess(input, code_points_from_str, EOF_CODE_POINT);

    if !input.consume_if(|&c| c == 0x55 || c == 0x75) {
        return Ok(None);
    }
    if !input.consume_if_equal(&0x2B) {
        return Ok(None);
    }

    let digits = input.consume_while(|&c| is_hex_digit(c));
    let wildcards = input.consume_while(|&c| c == 0x3F).len();

    let length = digits.len() + wildcards;
    if length == 0 || length > MAX_DIGITS {
        return Ok(None);
    }

    // Question marks end the range.
    if wildcards > 0 {
        if !input.consume_if_eof() {
            return Ok(None);
        }
        let shift = 4 * wildcards;
        let start = number_from_hex_code_points(&digits) << shift;
        let end = ((number_from_hex_code_points(&digits) + 1) << shift) - 1;
        return checked_range(start, end).map(Some);
    }

    let start = number_from_hex_code_points(&digits);
    if input.consume_if_eof() {
        return checked_range(start, start).map(Some);
    }

    if !input.consume_if_equal(&0x2D) {
        return Ok(None);
    }

    let digits = input.consume_while(|&c| is_hex_digit(c));
    if digits.is_empty() || digits.len() > MAX_DIGITS || !input.consume_if_eof() {
        return Ok(None);
    }

    checked_range(start, number_from_hex_code_points(&digits)).map(Some)
}

fn checked_range(start: u32, end: u32) -> Result<UnicodeRange> {
    if end > MAX_UNICODE {
        return Err(SyntaxError::UnicodeRangeOutOfBounds { start, end });
    }
    if start > end {
        return Err(SyntaxError::InvertedUnicodeRange { start, end });
    }
    Ok(UnicodeRange { start, end })
}
