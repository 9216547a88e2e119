//! Conversions between text and the code points the tokenizer works on.

pub const MAX_UNICODE: u32 = 0x10FFFF;
pub const REPLACEMENT_CODE_POINT: u32 = 0xFFFD;
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

const LEADING_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const TRAILING_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

pub fn code_points_from_str(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Decodes UTF-16 code units, combining surrogate pairs.
///
/// A surrogate without its partner is kept as is; it is replaced only when it
/// is turned back into text.
pub fn code_points_from_utf16(units: &[u16]) -> Vec<u32> {
    let mut code_points = Vec::with_capacity(units.len());
    let mut index = 0;
    while index < units.len() {
        let unit = u32::from(units[index]);
        let next = units.get(index + 1).copied().map(u32::from);
        match next {
            Some(low) if LEADING_SURROGATES.contains(&unit) && TRAILING_SURROGATES.contains(&low) => {
                code_points.push((unit - 0xD800) * 0x400 + (low - 0xDC00) + 0x10000);
                index += 2;
            }
            _ => {
                code_points.push(unit);
                index += 1;
            }
        }
    }
    code_points
}

/// Returns U+FFFD for NUL, surrogates, and anything above [`MAX_UNICODE`].
pub fn char_from_code_point(code_point: u32) -> char {
    if code_point == 0 {
        return REPLACEMENT_CHARACTER;
    }
    char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER)
}

pub fn string_from_code_points(code_points: &[u32]) -> String {
    code_points
        .iter()
        .map(|code_point| char_from_code_point(*code_point))
        .collect()
}

/// Interprets hex digit code points as one big-endian number.
///
/// Callers pass at most six digits, so the result always fits.
pub fn number_from_hex_code_points(code_points: &[u32]) -> u32 {
    code_points.iter().fold(0, |result, code_point| {
        let digit = char::from_u32(*code_point)
            .and_then(|c| c.to_digit(16))
            .unwrap_or(0);
        (result << 4) + digit
    })
}
