use css_tokenizer::{Cursor, Token, Tokenizer};

use crate::types::ComponentValue;

/// 5.3. Token Streams
///
/// The parser reads component values rather than plain tokens, so that an
/// already-consumed run of values (for example a buffered declaration) can be
/// parsed again. Past the end it yields an `<EOF-token>`.
///
/// https://drafts.csswg.org/css-syntax-3/#parser-definitions
pub type TokenStream = Cursor<ComponentValue>;

fn end_of_file() -> ComponentValue {
    ComponentValue::PreservedToken(Token::EndOfFile)
}

pub fn tokenize_to_stream(input: &str) -> TokenStream {
    TokenStream::with_preprocess(
        input,
        |input| Tokenizer::new(input).map(ComponentValue::from).collect(),
        end_of_file(),
    )
}

pub fn stream_from_component_values(values: Vec<ComponentValue>) -> TokenStream {
    TokenStream::new(values, end_of_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenized_stream_ends_with_end_of_file() {
        let mut stream = tokenize_to_stream("a b");
        assert_eq!(
            stream.consume_any(),
            ComponentValue::PreservedToken(Token::Ident { value: "a".into() })
        );
        stream.advance(2);
        assert!(stream.consume_if_eof());
        assert_eq!(*stream.peek(0), end_of_file());
    }

    #[test]
    fn stream_from_values_keeps_them_in_order() {
        let stream = stream_from_component_values(vec![Token::Comma.into(), Token::Colon.into()]);
        assert!(stream.peek(0).is_token(&Token::Comma));
        assert!(stream.peek(1).is_token(&Token::Colon));
        assert!(stream.is_eof(2));
    }
}
