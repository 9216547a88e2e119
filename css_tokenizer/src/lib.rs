pub use cursor::Cursor;
pub use token::{BlockKind, HashType, NumberType, Sign, Token};

use definitions::{
    definition, is_digit, is_hex_digit, is_name_code_point, is_name_start_code_point,
    is_non_printable_code_point, is_sign, is_whitespace, sign_of, EOF_CODE_POINT,
};
use unicode::{
    char_from_code_point, code_points_from_str, code_points_from_utf16,
    number_from_hex_code_points, string_from_code_points, REPLACEMENT_CODE_POINT,
};

pub mod cursor;
pub mod definitions;
pub mod token;
pub mod unicode;

macro_rules! log_current_token {
    ($token:expr) => {{
        tracing::trace!(target: "css_tokenizer", token = ?$token, "emitted token")
    }};
}

macro_rules! log_parse_error {
    ($message:expr) => {{
        tracing::debug!(target: "css_tokenizer", "parse error: {}", $message)
    }};
}

/// Tokenizes `input` into every token before the end of the input.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).tokenize()
}

/// https://www.w3.org/TR/css-syntax-3/#tokenization
///
/// The tokenizer is also an [`Iterator`] that ends before the
/// `<EOF-token>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenizer {
    input: Cursor<u32>,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self::from_code_points(code_points_from_str(input))
    }

    pub fn from_utf16(input: &[u16]) -> Self {
        Self::from_code_points(code_points_from_utf16(input))
    }

    fn from_code_points(code_points: Vec<u32>) -> Self {
        Self {
            input: Cursor::with_preprocess(code_points, preprocess, EOF_CODE_POINT),
        }
    }

    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn peek(&self, offset: isize) -> u32 {
        *self.input.peek(offset)
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-token
    fn consume_a_token(&mut self) -> Token {
        // Consume comments.
        self.consume_a_comment();

        if self.input.consume_if_eof() {
            return Token::EndOfFile;
        }
        if self.input.consume_if(|&c| is_whitespace(c)) {
            self.consume_as_much_whitespace_as_possible();
            return Token::Whitespace;
        }
        if self.input.consume_if(|&c| is_digit(c)) {
            self.input.reconsume();
            return self.consume_a_numeric_token();
        }
        if self.input.consume_if(|&c| is_name_start_code_point(c)) {
            self.input.reconsume();
            return self.consume_an_ident_like_token();
        }

        let code_point = self.input.consume_any();
        match code_point {
            0x22 | 0x27 => return self.consume_a_string_token(code_point),
            // Hash: the next code point is a name code point or the next two are a valid escape.
            0x23 if is_name_code_point(self.peek(0)) || self.starts_with_valid_escape(0) => {
                let hash_type = match self.starts_with_ident_sequence(0) {
                    true => HashType::Id,
                    false => HashType::Unrestricted,
                };
                return Token::Hash {
                    value: self.consume_an_ident_sequence(),
                    hash_type,
                };
            }
            0x28 => return Token::LeftParenthesis,
            0x29 => return Token::RightParenthesis,
            0x2B | 0x2E if self.starts_with_a_number(-1) => {
                self.input.reconsume();
                return self.consume_a_numeric_token();
            }
            0x2C => return Token::Comma,
            0x2D => {
                if self.starts_with_a_number(-1) {
                    self.input.reconsume();
                    return self.consume_a_numeric_token();
                }
                if self.peek(0) == 0x2D && self.peek(1) == 0x3E {
                    self.input.advance(2);
                    return Token::Cdc;
                }
                if self.starts_with_ident_sequence(-1) {
                    self.input.reconsume();
                    return self.consume_an_ident_like_token();
                }
            }
            0x3A => return Token::Colon,
            0x3B => return Token::Semicolon,
            0x3C if self.peek(0) == 0x21 && self.peek(1) == 0x2D && self.peek(2) == 0x2D => {
                self.input.advance(3);
                return Token::Cdo;
            }
            0x40 if self.starts_with_ident_sequence(0) => {
                return Token::AtKeyword {
                    value: self.consume_an_ident_sequence(),
                };
            }
            0x5B => return Token::LeftSquareBracket,
            0x5C if self.starts_with_valid_escape(-1) => {
                self.input.reconsume();
                return self.consume_an_ident_like_token();
            }
            0x5C => {
                log_parse_error!("invalid escape");
            }
            0x5D => return Token::RightSquareBracket,
            0x7B => return Token::LeftCurlyBracket,
            0x7D => return Token::RightCurlyBracket,
            _ => {}
        }

        // Otherwise, return a <delim-token> with its value set to the current input code point.
        Token::Delim {
            value: char_from_code_point(code_point),
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-comment
    //
    // Only one comment is skipped per token, so a second comment directly
    // after the first is read as delims.
    fn consume_a_comment(&mut self) {
        if self.peek(0) == 0x2F && self.peek(1) == 0x2A {
            self.input.advance(2);
            loop {
                self.input.consume_while(|&c| c != 0x2A);
                if self.input.consume_if_eof() {
                    log_parse_error!("EOF in comment");
                    return;
                }
                if self.input.consume_if_equal(&0x2A) && self.input.consume_if_equal(&0x2F) {
                    break;
                }
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
    fn consume_a_numeric_token(&mut self) -> Token {
        let number = self.consume_a_number();

        if self.input.consume_if_equal(&0x25) {
            return Token::Percentage {
                value: number.value,
                number_type: number.number_type,
            };
        }

        if self.starts_with_ident_sequence(0) {
            return Token::Dimension {
                value: number.value,
                number_type: number.number_type,
                unit: self.consume_an_ident_sequence(),
            };
        }

        Token::Number {
            value: number.value,
            number_type: number.number_type,
            sign: number.sign,
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
    fn consume_an_ident_like_token(&mut self) -> Token {
        let string = self.consume_an_ident_sequence();

        if self.input.consume_if_equal(&0x28) {
            if string.eq_ignore_ascii_case("url") {
                return self.consume_a_url_token();
            }
            return Token::Function { value: string };
        }

        Token::Ident { value: string }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-string-token
    fn consume_a_string_token(&mut self, ending_code_point: u32) -> Token {
        let mut value = vec![];

        loop {
            if self.input.consume_if_equal(&ending_code_point) {
                break;
            }
            if self.input.consume_if_eof() {
                log_parse_error!("EOF in string token");
                break;
            }
            if self.input.consume_if_equal(&0x0A) {
                log_parse_error!("newline in string token");
                self.input.reconsume();
                return Token::BadString;
            }
            if self.input.consume_if_equal(&0x5C) {
                // A backslash before EOF or a newline is a line continuation.
                if self.input.consume_if_eof() || self.input.consume_if_equal(&0x0A) {
                    continue;
                }
                value.push(self.consume_an_escaped_code_point());
                continue;
            }
            value.push(self.input.consume_any());
        }

        Token::String {
            value: string_from_code_points(&value),
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-url-token
    fn consume_a_url_token(&mut self) -> Token {
        self.consume_as_much_whitespace_as_possible();

        if self.input.consume_if_eof() {
            log_parse_error!("EOF in url token");
            return Token::Url {
                value: String::new(),
            };
        }
        if matches!(self.peek(0), 0x22 | 0x27) {
            return Token::Function {
                value: "url".to_string(),
            };
        }

        let mut value = vec![];
        loop {
            let code_point = self.input.consume_any();
            if code_point == 0x29 {
                break;
            }
            if self.input.is_eof(-1) {
                log_parse_error!("EOF in url token");
                break;
            }
            match code_point {
                definition!(whitespace) => {
                    self.consume_as_much_whitespace_as_possible();
                    if self.input.consume_if_equal(&0x29) || self.input.consume_if_eof() {
                        break;
                    }
                    return self.consume_the_remnants_of_a_bad_url();
                }
                0x22 | 0x27 | 0x28 => {
                    log_parse_error!("unexpected quote or parenthesis in url token");
                    return self.consume_the_remnants_of_a_bad_url();
                }
                c if is_non_printable_code_point(c) => {
                    log_parse_error!("non-printable code point in url token");
                    return self.consume_the_remnants_of_a_bad_url();
                }
                0x5C if self.starts_with_valid_escape(-1) => {
                    value.push(self.consume_an_escaped_code_point());
                }
                0x5C => {
                    log_parse_error!("invalid escape in url token");
                    return self.consume_the_remnants_of_a_bad_url();
                }
                _ => value.push(code_point),
            }
        }

        Token::Url {
            value: string_from_code_points(&value),
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url
    fn consume_the_remnants_of_a_bad_url(&mut self) -> Token {
        loop {
            let code_point = self.input.consume_any();
            if code_point == 0x29 || self.input.is_eof(-1) {
                return Token::BadUrl;
            }
            if self.starts_with_valid_escape(-1) {
                // Consumed only so that an escaped ')' does not end the url.
                self.consume_an_escaped_code_point();
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point
    //
    // Assumes the U+005C REVERSE SOLIDUS (\) has already been consumed.
    fn consume_an_escaped_code_point(&mut self) -> u32 {
        let digits = self.input.consume_while_at_most(|&c| is_hex_digit(c), 6);
        if !digits.is_empty() {
            self.input.consume_if(|&c| is_whitespace(c));
            return number_from_hex_code_points(&digits);
        }
        if self.input.consume_if_eof() {
            log_parse_error!("EOF in escape");
            return REPLACEMENT_CODE_POINT;
        }
        self.input.consume_any()
    }

    // https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape
    fn starts_with_valid_escape(&self, offset: isize) -> bool {
        self.peek(offset) == 0x5C && self.peek(offset + 1) != 0x0A
    }

    fn starts_with_name(&self, offset: isize) -> bool {
        is_name_start_code_point(self.peek(offset)) || self.starts_with_valid_escape(offset)
    }

    // https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier
    fn starts_with_ident_sequence(&self, offset: isize) -> bool {
        if self.starts_with_name(offset) {
            return true;
        }
        self.peek(offset) == 0x2D
            && (self.starts_with_name(offset + 1) || self.peek(offset + 1) == 0x2D)
    }

    fn starts_with_a_signless_number(&self, offset: isize) -> bool {
        is_digit(self.peek(offset)) || (self.peek(offset) == 0x2E && is_digit(self.peek(offset + 1)))
    }

    // https://www.w3.org/TR/css-syntax-3/#starts-with-a-number
    fn starts_with_a_number(&self, offset: isize) -> bool {
        self.starts_with_a_signless_number(offset)
            || (is_sign(self.peek(offset)) && self.starts_with_a_signless_number(offset + 1))
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-name
    fn consume_an_ident_sequence(&mut self) -> String {
        let mut result = vec![];

        loop {
            let code_point = self.input.consume_any();
            if is_name_code_point(code_point) {
                result.push(code_point);
            } else if self.starts_with_valid_escape(-1) {
                result.push(self.consume_an_escaped_code_point());
            } else {
                self.input.reconsume();
                return string_from_code_points(&result);
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-number
    fn consume_a_number(&mut self) -> CssNumber {
        let mut number_type = NumberType::Integer;
        let mut sign = Sign::None;

        let repr = self.input.slice_consumed_during(|input| {
            if input.consume_if(|&c| is_sign(c)) {
                sign = sign_of(*input.peek(-1));
            }

            // 0: integer part, 1: after the fraction, 2: after the exponent.
            let mut stage = 0;
            loop {
                let next = *input.peek(0);
                let second = *input.peek(1);
                if is_digit(next) {
                    input.advance(1);
                } else if stage < 1 && next == 0x2E && is_digit(second) {
                    input.advance(2);
                    number_type = NumberType::Number;
                    stage = 1;
                } else if stage < 2
                    && matches!(next, 0x45 | 0x65)
                    && (is_digit(second) || (is_sign(second) && is_digit(*input.peek(2))))
                {
                    input.advance(if is_sign(second) { 3 } else { 2 });
                    number_type = NumberType::Number;
                    stage = 2;
                } else {
                    break;
                }
            }
        });

        // The consumed code points always form a valid float literal.
        let value = string_from_code_points(&repr)
            .parse::<f64>()
            .unwrap_or_default();

        CssNumber {
            value,
            number_type,
            sign,
        }
    }

    fn consume_as_much_whitespace_as_possible(&mut self) {
        self.input.consume_while(|&c| is_whitespace(c));
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.consume_a_token();
        log_current_token!(token);
        match token {
            Token::EndOfFile => None,
            token => Some(token),
        }
    }
}

// https://www.w3.org/TR/css-syntax-3/#input-preprocessing
fn preprocess(code_points: Vec<u32>) -> Vec<u32> {
    let mut result = Vec::with_capacity(code_points.len());
    let mut code_points = code_points.into_iter().peekable();

    while let Some(code_point) = code_points.next() {
        match code_point {
            0x00 => result.push(REPLACEMENT_CODE_POINT),
            0x0C => result.push(0x0A),
            0x0D => {
                result.push(0x0A);
                code_points.next_if_eq(&0x0A);
            }
            _ => result.push(code_point),
        }
    }

    result
}

#[derive(Debug, Clone, PartialEq)]
struct CssNumber {
    value: f64,
    number_type: NumberType,
    sign: Sign,
}
