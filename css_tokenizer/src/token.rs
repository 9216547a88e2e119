use std::fmt::{self, Write};

/// https://www.w3.org/TR/css-syntax-3/#tokenization
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EndOfFile,

    Ident {
        value: String,
    },
    Function {
        value: String,
    },
    AtKeyword {
        value: String,
    },
    Hash {
        value: String,
        hash_type: HashType,
    },
    String {
        value: String,
    },
    BadString,
    Url {
        value: String,
    },
    BadUrl,
    Delim {
        value: char,
    },
    Number {
        value: f64,
        number_type: NumberType,
        sign: Sign,
    },
    Percentage {
        value: f64,
        number_type: NumberType,
    },
    Dimension {
        value: f64,
        number_type: NumberType,
        unit: String,
    },
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftSquareBracket,
    RightSquareBracket,
    LeftParenthesis,
    RightParenthesis,
    LeftCurlyBracket,
    RightCurlyBracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    Integer,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    Id,
    Unrestricted,
}

/// The sign a number was written with. Already part of the number's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    None,
    Plus,
    Minus,
}

/// The bracket pair that delimits a simple block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    CurlyBracket,
    SquareBracket,
    Parenthesis,
}

impl BlockKind {
    pub fn ending_token(self) -> Token {
        match self {
            BlockKind::CurlyBracket => Token::RightCurlyBracket,
            BlockKind::SquareBracket => Token::RightSquareBracket,
            BlockKind::Parenthesis => Token::RightParenthesis,
        }
    }

    pub fn is_ending_token(self, token: &Token) -> bool {
        *token == self.ending_token()
    }
}

impl Token {
    /// The kind of block this token opens, if it opens one.
    pub fn block_kind(&self) -> Option<BlockKind> {
        match self {
            Token::LeftCurlyBracket => Some(BlockKind::CurlyBracket),
            Token::LeftSquareBracket => Some(BlockKind::SquareBracket),
            Token::LeftParenthesis => Some(BlockKind::Parenthesis),
            _ => None,
        }
    }

    /// Whether this is an `<ident-token>` whose value is an ASCII
    /// case-insensitive match for `value`.
    pub fn is_ident_matching(&self, value: &str) -> bool {
        matches!(self, Token::Ident { value: ident } if ident.eq_ignore_ascii_case(value))
    }

    pub fn is_delim_matching(&self, value: char) -> bool {
        matches!(self, Token::Delim { value: delim } if *delim == value)
    }
}

/// Writes the token back as CSS source text.
///
/// Tokenizing the output yields the same token, except that whitespace runs
/// collapse, a `\` delim reads back as an escape, a bad string leaves its
/// newline behind as whitespace, and a `url` function reads back as a url.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfFile => Ok(()),
            Token::Ident { value } => write_identifier(f, value),
            Token::Function { value } => {
                write_identifier(f, value)?;
                f.write_char('(')
            }
            Token::AtKeyword { value } => {
                f.write_char('@')?;
                write_identifier(f, value)
            }
            Token::Hash { value, .. } => {
                f.write_char('#')?;
                write_name(f, value)
            }
            Token::String { value } => write_string(f, value),
            Token::BadString => f.write_str("\"\n"),
            Token::Url { value } => write_url(f, value),
            Token::BadUrl => f.write_str("url(bad url)"),
            Token::Delim { value } => f.write_char(*value),
            Token::Number {
                value,
                number_type,
                sign,
            } => write_number(f, *value, *number_type, *sign),
            Token::Percentage { value, number_type } => {
                write_number(f, *value, *number_type, Sign::None)?;
                f.write_char('%')
            }
            Token::Dimension {
                value,
                number_type,
                unit,
            } => {
                write_number(f, *value, *number_type, Sign::None)?;
                write_unit(f, unit)
            }
            Token::Whitespace => f.write_char(' '),
            Token::Cdo => f.write_str("<!--"),
            Token::Cdc => f.write_str("-->"),
            Token::Colon => f.write_char(':'),
            Token::Semicolon => f.write_char(';'),
            Token::Comma => f.write_char(','),
            Token::LeftSquareBracket => f.write_char('['),
            Token::RightSquareBracket => f.write_char(']'),
            Token::LeftParenthesis => f.write_char('('),
            Token::RightParenthesis => f.write_char(')'),
            Token::LeftCurlyBracket => f.write_char('{'),
            Token::RightCurlyBracket => f.write_char('}'),
        }
    }
}

fn write_escaped_code_point(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    write!(f, "\\{:x} ", c as u32)
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{1f}' | '\u{7f}')
}

// https://drafts.csswg.org/cssom/#serialize-an-identifier, minus the rules for
// the first two characters.
fn write_name_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\0' => f.write_char('\u{FFFD}'),
        c if is_control(c) => write_escaped_code_point(f, c),
        c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => f.write_char(c),
        c => {
            f.write_char('\\')?;
            f.write_char(c)
        }
    }
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    name.chars().try_for_each(|c| write_name_char(f, c))
}

fn write_identifier(f: &mut fmt::Formatter<'_>, identifier: &str) -> fmt::Result {
    if identifier == "-" {
        return f.write_str("\\-");
    }
    let starts_with_hyphen = identifier.starts_with('-');
    for (index, c) in identifier.chars().enumerate() {
        let leading_digit = c.is_ascii_digit() && (index == 0 || (index == 1 && starts_with_hyphen));
        if leading_digit {
            write_escaped_code_point(f, c)?;
        } else {
            write_name_char(f, c)?;
        }
    }
    Ok(())
}

/// A unit directly follows a number, so a leading `e` that looks like an
/// exponent must be escaped.
fn write_unit(f: &mut fmt::Formatter<'_>, unit: &str) -> fmt::Result {
    let mut chars = unit.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(e @ ('e' | 'E')), Some(second), third)
            if second.is_ascii_digit()
                || (matches!(second, '+' | '-') && third.is_some_and(|c| c.is_ascii_digit())) =>
        {
            write_escaped_code_point(f, e)?;
            write_name(f, &unit[1..])
        }
        _ => write_identifier(f, unit),
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '\0' => f.write_char('\u{FFFD}')?,
            c if is_control(c) => write_escaped_code_point(f, c)?,
            '"' | '\\' => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_url(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("url(")?;
    for c in value.chars() {
        match c {
            '\0' => f.write_char('\u{FFFD}')?,
            c if is_control(c) => write_escaped_code_point(f, c)?,
            ' ' | '"' | '\'' | '(' | ')' | '\\' => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(')')
}

fn write_number(
    f: &mut fmt::Formatter<'_>,
    value: f64,
    number_type: NumberType,
    sign: Sign,
) -> fmt::Result {
    let mut repr = if !value.is_infinite() {
        value.abs().to_string()
    } else if number_type == NumberType::Integer {
        // More digits than an f64 holds, so the literal reads back as infinity.
        format!("1{}", "0".repeat(f64::MAX_10_EXP as usize + 1))
    } else {
        "1e999".to_string()
    };
    if value.is_sign_negative() {
        repr.insert(0, '-');
    } else if sign == Sign::Plus {
        repr.insert(0, '+');
    }
    if number_type == NumberType::Number && !repr.contains('.') && !repr.contains('e') {
        repr.push_str(".0");
    }
    f.write_str(&repr)
}
