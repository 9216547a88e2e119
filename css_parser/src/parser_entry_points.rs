use css_tokenizer::Token;

use crate::types::{ComponentValue, Declaration, DeclarationOrAtRule, Rule, StyleSheet};
use crate::{Parser, Result, SyntaxError};

impl Parser {
    /// 5.3.3. Parse a stylesheet
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-stylesheet
    pub fn parse_a_stylesheet(&mut self) -> Result<StyleSheet> {
        tracing::trace!(target: "css_parser", "parsing a stylesheet");

        // Consume a list of rules from the stream of tokens, with the top-level flag set.
        let rules = self.consume_a_list_of_rules(true)?;
        Ok(StyleSheet { rules })
    }

    /// 5.3.4. Parse a list of rules
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-list-of-rules
    pub fn parse_a_list_of_rules(&mut self) -> Result<Vec<Rule>> {
        tracing::trace!(target: "css_parser", "parsing a list of rules");

        self.consume_a_list_of_rules(false)
    }

    /// 5.3.5. Parse a rule
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-rule
    pub fn parse_a_rule(&mut self) -> Result<Rule> {
        tracing::trace!(target: "css_parser", "parsing a rule");

        self.discard_whitespace();

        // If the next input token is an <EOF-token>, return a syntax error.
        if self.input.consume_if_eof() {
            return Err(SyntaxError::EmptyInput);
        }

        // Otherwise, if the next input token is an <at-keyword-token>, consume an at-rule.
        // Otherwise, consume a qualified rule. If nothing was returned, return a syntax error.
        let rule = self.consume_a_rule()?.ok_or(SyntaxError::MissingRule)?;

        self.discard_whitespace();

        // If the next input token is an <EOF-token>, return rule. Otherwise, return a syntax error.
        if !self.input.consume_if_eof() {
            return Err(SyntaxError::TrailingInput);
        }

        Ok(rule)
    }

    /// 5.3.6. Parse a declaration
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-declaration
    pub fn parse_a_declaration(&mut self) -> Result<Declaration> {
        tracing::trace!(target: "css_parser", "parsing a declaration");

        self.discard_whitespace();

        if self.input.consume_if_eof() {
            return Err(SyntaxError::EmptyInput);
        }

        // If the next input token is not an <ident-token>, return a syntax error.
        if !self.next_is_ident() {
            return Err(SyntaxError::ExpectedIdent);
        }

        // Consume a declaration. If anything was returned, return it. Otherwise, return a
        // syntax error.
        self.consume_a_declaration()?
            .ok_or(SyntaxError::MissingDeclaration)
    }

    /// 5.3.7. Parse a list of declarations
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations
    pub fn parse_a_list_of_declarations(&mut self) -> Result<Vec<DeclarationOrAtRule>> {
        tracing::trace!(target: "css_parser", "parsing a list of declarations");

        self.consume_a_list_of_declarations()
    }

    /// 5.3.8. Parse a component value
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-component-value
    pub fn parse_a_component_value(&mut self) -> Result<ComponentValue> {
        tracing::trace!(target: "css_parser", "parsing a component value");

        self.discard_whitespace();

        if self.input.consume_if_eof() {
            return Err(SyntaxError::EmptyInput);
        }

        let value = self.consume_a_component_value()?;

        self.discard_whitespace();

        if !self.input.consume_if_eof() {
            return Err(SyntaxError::TrailingInput);
        }

        Ok(value)
    }

    /// 5.3.9. Parse a list of component values
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values
    pub fn parse_a_list_of_component_values(&mut self) -> Result<Vec<ComponentValue>> {
        tracing::trace!(target: "css_parser", "parsing a list of component values");

        let mut values = vec![];
        while !self.input.consume_if_eof() {
            values.push(self.consume_a_component_value()?);
        }
        Ok(values)
    }

    /// 5.3.10. Parse a comma-separated list of component values
    ///
    /// The result always holds at least one list. A trailing comma produces an
    /// empty last list.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-comma-separated-list-of-component-values
    pub fn parse_a_comma_separated_list_of_component_values(
        &mut self,
    ) -> Result<Vec<Vec<ComponentValue>>> {
        tracing::trace!(target: "css_parser", "parsing a comma-separated list of component values");

        let mut lists = vec![];
        let mut values = vec![];

        loop {
            if self.input.consume_if_eof() {
                lists.push(values);
                return Ok(lists);
            }

            if self
                .input
                .consume_if(|value| value.is_token(&Token::Comma))
            {
                lists.push(std::mem::take(&mut values));
                continue;
            }

            values.push(self.consume_a_component_value()?);
        }
    }
}

#[cfg(test)]
mod tests {
    use css_tokenizer::{BlockKind, NumberType, Sign, Token};

    use crate::*;

    fn ident(value: &str) -> ComponentValue {
        Token::Ident {
            value: value.into(),
        }
        .into()
    }

    fn string(value: &str) -> ComponentValue {
        Token::String {
            value: value.into(),
        }
        .into()
    }

    fn url(value: &str) -> ComponentValue {
        Token::Url {
            value: value.into(),
        }
        .into()
    }

    fn delim(value: char) -> ComponentValue {
        Token::Delim { value }.into()
    }

    fn ws() -> ComponentValue {
        Token::Whitespace.into()
    }

    fn percentage(value: f64) -> ComponentValue {
        Token::Percentage {
            value,
            number_type: NumberType::Integer,
        }
        .into()
    }

    fn dimension(value: f64, unit: &str) -> ComponentValue {
        Token::Dimension {
            value,
            number_type: NumberType::Integer,
            unit: unit.into(),
        }
        .into()
    }

    fn function(name: &str, value: Vec<ComponentValue>) -> ComponentValue {
        ComponentValue::Function(Function {
            name: name.into(),
            value,
        })
    }

    fn block(kind: BlockKind, value: Vec<ComponentValue>) -> SimpleBlock {
        SimpleBlock { kind, value }
    }

    fn declaration(name: &str, value: Vec<ComponentValue>, important: bool) -> Declaration {
        Declaration {
            name: name.into(),
            value,
            important,
        }
    }

    const QUALIFIED_RULE: &str = "p > a {
  color: blue;
  background-image: url( https://example.com/background );
  content: \"some text\";
  transform: translate( 50% );
}";

    const IMPORT_RULE: &str = "@import 'my-styles.css';";

    fn qualified_rule_body() -> Vec<DeclarationOrAtRule> {
        parse_list_of_declarations(
            "color: blue;
  background-image: url( https://example.com/background );
  content: \"some text\";
  transform: translate( 50% );",
        )
        .unwrap()
    }

    fn import_rule() -> Rule {
        Rule::AtRule(AtRule {
            name: "import".into(),
            prelude: vec![ws(), string("my-styles.css")],
            value: None,
        })
    }

    #[test]
    fn stylesheet_of_nothing_is_empty() {
        assert_eq!(parse_stylesheet("").unwrap(), StyleSheet::default());
        assert_eq!(parse_stylesheet("  \n ").unwrap(), StyleSheet::default());
    }

    #[test]
    fn stylesheet_with_a_qualified_rule() {
        let stylesheet = parse_stylesheet(QUALIFIED_RULE).unwrap();
        let [Rule::QualifiedRule(rule)] = stylesheet.rules.as_slice() else {
            panic!("expected one qualified rule, got {stylesheet:?}");
        };
        assert_eq!(
            rule.prelude,
            vec![ident("p"), ws(), delim('>'), ws(), ident("a"), ws()]
        );
        assert_eq!(rule.value.kind, BlockKind::CurlyBracket);

        let body = Parser::from_component_values(rule.value.value.clone(), ParserConfig::default())
            .parse_a_list_of_declarations()
            .unwrap();
        assert_eq!(body, qualified_rule_body());
    }

    #[test]
    fn stylesheet_with_at_rules() {
        let stylesheet = parse_stylesheet(&format!("{IMPORT_RULE}\n{IMPORT_RULE}")).unwrap();
        assert_eq!(stylesheet.rules, vec![import_rule(), import_rule()]);
    }

    #[test]
    fn stylesheet_with_a_nested_media_rule() {
        let stylesheet = parse_stylesheet("@media print {\n  body {\n    color: blue;\n  }\n}")
            .unwrap();
        let [Rule::AtRule(media)] = stylesheet.rules.as_slice() else {
            panic!("expected one at-rule, got {stylesheet:?}");
        };
        assert_eq!(media.name, "media");
        assert_eq!(media.prelude, vec![ws(), ident("print"), ws()]);

        let inner = Parser::from_component_values(
            media.value.clone().unwrap().value,
            ParserConfig::default(),
        )
        .parse_a_list_of_rules()
        .unwrap();
        let [Rule::QualifiedRule(body)] = inner.as_slice() else {
            panic!("expected one qualified rule, got {inner:?}");
        };
        assert_eq!(body.prelude, vec![ident("body"), ws()]);
    }

    #[test]
    fn stylesheet_skips_cdo_and_cdc() {
        let stylesheet = parse_stylesheet("<!-- whatever -->").unwrap();
        assert_eq!(
            stylesheet.rules,
            vec![],
            "a rule needs a block, so `whatever` alone is dropped"
        );

        let stylesheet =
            parse_stylesheet(&format!("{IMPORT_RULE}\n<!-- whatever -->\np > a {{ color: blue; }}"))
                .unwrap();
        assert_eq!(stylesheet.rules.len(), 2);
        assert_eq!(stylesheet.rules[0], import_rule());
        let Rule::QualifiedRule(rule) = &stylesheet.rules[1] else {
            panic!("expected a qualified rule, got {:?}", stylesheet.rules[1]);
        };
        assert_eq!(
            rule.prelude,
            vec![
                ident("whatever"),
                ws(),
                Token::Cdc.into(),
                ws(),
                ident("p"),
                ws(),
                delim('>'),
                ws(),
                ident("a"),
                ws()
            ]
        );
    }

    #[test]
    fn list_of_rules_keeps_cdo_in_the_prelude() {
        let rules = parse_list_of_rules("<!-- --> p {}").unwrap();
        let [Rule::QualifiedRule(rule)] = rules.as_slice() else {
            panic!("expected one qualified rule, got {rules:?}");
        };
        assert_eq!(rule.prelude[0], Token::Cdo.into());
        assert!(rule.prelude.contains(&Token::Cdc.into()));
    }

    #[test]
    fn list_of_rules_matches_the_stylesheet_without_cdo() {
        assert_eq!(parse_list_of_rules("").unwrap(), vec![]);
        let source = format!("{IMPORT_RULE}\n{QUALIFIED_RULE}");
        assert_eq!(
            parse_list_of_rules(&source).unwrap(),
            parse_stylesheet(&source).unwrap().rules
        );
    }

    #[test]
    fn rule_is_parsed_alone() {
        assert_eq!(parse_rule(IMPORT_RULE).unwrap(), import_rule());
        assert_eq!(parse_rule(&format!("  {IMPORT_RULE}\n ")).unwrap(), import_rule());
        assert!(matches!(
            parse_rule(QUALIFIED_RULE).unwrap(),
            Rule::QualifiedRule(_)
        ));
        assert!(matches!(
            parse_rule("@page :left { color: blue; }").unwrap(),
            Rule::AtRule(AtRule { value: Some(_), .. })
        ));
    }

    #[test]
    fn rule_that_looks_like_a_unicode_range() {
        assert_eq!(
            parse_rule("u+a{color:green;}").unwrap(),
            Rule::QualifiedRule(QualifiedRule {
                prelude: vec![ident("u"), delim('+'), ident("a")],
                value: block(
                    BlockKind::CurlyBracket,
                    vec![
                        ident("color"),
                        Token::Colon.into(),
                        ident("green"),
                        Token::Semicolon.into()
                    ]
                ),
            })
        );
    }

    #[test]
    fn rule_errors() {
        assert_eq!(parse_rule(""), Err(SyntaxError::EmptyInput));
        assert_eq!(parse_rule("   "), Err(SyntaxError::EmptyInput));
        assert_eq!(parse_rule("p > a"), Err(SyntaxError::MissingRule));
        assert_eq!(
            parse_rule(&format!("{IMPORT_RULE}\n{IMPORT_RULE}")),
            Err(SyntaxError::TrailingInput)
        );
        assert_eq!(
            parse_rule("p > a {\n  color: blue;\n}\np > a {\n  color: blue;\n}"),
            Err(SyntaxError::TrailingInput)
        );
    }

    #[test]
    fn declaration_values() {
        assert_eq!(
            parse_declaration("color: blue").unwrap(),
            declaration("color", vec![ident("blue")], false)
        );
        assert_eq!(
            parse_declaration("background-image: url( https://example.com/background )").unwrap(),
            declaration(
                "background-image",
                vec![url("https://example.com/background")],
                false
            )
        );
        assert_eq!(
            parse_declaration("content: \"some text\"").unwrap(),
            declaration("content", vec![string("some text")], false)
        );
        assert_eq!(
            parse_declaration("transform: translate( 50% )").unwrap(),
            declaration(
                "transform",
                vec![function("translate", vec![ws(), percentage(50.0), ws()])],
                false
            )
        );
    }

    #[test]
    fn important_declarations() {
        assert_eq!(
            parse_declaration("color: blue !important").unwrap(),
            declaration("color", vec![ident("blue")], true)
        );
        assert_eq!(
            parse_declaration("content: \"some text\" !important").unwrap(),
            declaration("content", vec![string("some text")], true)
        );
        assert_eq!(
            parse_declaration("transform: translate( 50% ) !important").unwrap(),
            declaration(
                "transform",
                vec![function("translate", vec![ws(), percentage(50.0), ws()])],
                true
            )
        );
    }

    #[test]
    fn declaration_errors() {
        assert_eq!(parse_declaration(""), Err(SyntaxError::EmptyInput));
        assert_eq!(parse_declaration(" "), Err(SyntaxError::EmptyInput));
        assert_eq!(parse_declaration("42px"), Err(SyntaxError::ExpectedIdent));
        assert_eq!(
            parse_declaration("left 42px"),
            Err(SyntaxError::MissingDeclaration)
        );
        assert_eq!(
            parse_declaration("left 42px !important"),
            Err(SyntaxError::MissingDeclaration)
        );
    }

    #[test]
    fn list_of_declarations_skips_separators() {
        assert_eq!(parse_list_of_declarations("").unwrap(), vec![]);
        assert_eq!(parse_list_of_declarations(" ").unwrap(), vec![]);
        assert_eq!(parse_list_of_declarations(";").unwrap(), vec![]);

        let expected = vec![DeclarationOrAtRule::Declaration(declaration(
            "color",
            vec![ident("blue")],
            false,
        ))];
        assert_eq!(parse_list_of_declarations("color: blue").unwrap(), expected);
        assert_eq!(parse_list_of_declarations(" ; color: blue").unwrap(), expected);
        assert_eq!(parse_list_of_declarations("color: blue; ").unwrap(), expected);
    }

    #[test]
    fn list_of_declarations_drops_invalid_ones() {
        assert_eq!(parse_list_of_declarations("left 42px").unwrap(), vec![]);

        let list = parse_list_of_declarations(
            "color: blue;\nleft 42px;\ncontent: \"some text\";\n",
        )
        .unwrap();
        assert_eq!(
            list,
            vec![
                DeclarationOrAtRule::Declaration(declaration("color", vec![ident("blue")], false)),
                DeclarationOrAtRule::Declaration(declaration(
                    "content",
                    vec![string("some text")],
                    false
                )),
            ]
        );
        assert_eq!(qualified_rule_body().len(), 4);
    }

    #[test]
    fn list_of_declarations_with_an_at_rule() {
        let list = parse_list_of_declarations(
            "color: blue;\n\n@media (max-width: 420px) {\n  content: \"other text\";\n  left 42px;\n  right: 42px;\n}",
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        let DeclarationOrAtRule::AtRule(media) = &list[1] else {
            panic!("expected an at-rule, got {:?}", list[1]);
        };
        assert_eq!(media.name, "media");
        assert_eq!(
            media.prelude,
            vec![
                ws(),
                ComponentValue::SimpleBlock(block(
                    BlockKind::Parenthesis,
                    vec![
                        ident("max-width"),
                        Token::Colon.into(),
                        ws(),
                        dimension(420.0, "px")
                    ]
                )),
                ws()
            ]
        );

        let body = Parser::from_component_values(
            media.value.clone().unwrap().value,
            ParserConfig::default(),
        )
        .parse_a_list_of_declarations()
        .unwrap();
        assert_eq!(
            body,
            vec![
                DeclarationOrAtRule::Declaration(declaration(
                    "content",
                    vec![string("other text")],
                    false
                )),
                DeclarationOrAtRule::Declaration(declaration(
                    "right",
                    vec![dimension(42.0, "px")],
                    false
                )),
            ]
        );
    }

    #[test]
    fn semicolons_inside_blocks_do_not_end_a_declaration() {
        let expected = vec![DeclarationOrAtRule::Declaration(declaration(
            "a",
            vec![ComponentValue::SimpleBlock(block(
                BlockKind::Parenthesis,
                vec![Token::Semicolon.into()],
            ))],
            false,
        ))];
        assert_eq!(parse_list_of_declarations("a: (;)").unwrap(), expected);
        assert_eq!(parse_list_of_declarations("a: (;").unwrap(), expected);
    }

    #[test]
    fn list_of_declarations_recovers_after_junk() {
        assert_eq!(
            parse_list_of_declarations("#deadbeef color: blue").unwrap(),
            vec![]
        );
        assert_eq!(
            parse_list_of_declarations("#deadbeef color: blue; border: none").unwrap(),
            vec![DeclarationOrAtRule::Declaration(declaration(
                "border",
                vec![ident("none")],
                false
            ))]
        );
        assert_eq!(parse_list_of_declarations("{ border: none").unwrap(), vec![]);
        assert_eq!(parse_list_of_declarations("{ border: none }").unwrap(), vec![]);
    }

    #[test]
    fn component_value_alone() {
        assert_eq!(parse_component_value("blue").unwrap(), ident("blue"));
        assert_eq!(
            parse_component_value(" url( https://example.com/background ) ").unwrap(),
            url("https://example.com/background")
        );
        assert_eq!(parse_component_value("\"some text\"").unwrap(), string("some text"));
        assert_eq!(
            parse_component_value("translate( 50% )").unwrap(),
            function("translate", vec![ws(), percentage(50.0), ws()])
        );
    }

    #[test]
    fn component_value_errors() {
        assert_eq!(parse_component_value(""), Err(SyntaxError::EmptyInput));
        assert_eq!(parse_component_value(" "), Err(SyntaxError::EmptyInput));
        assert_eq!(
            parse_component_value("blue red"),
            Err(SyntaxError::TrailingInput)
        );
    }

    #[test]
    fn list_of_component_values() {
        assert_eq!(parse_list_of_component_values("").unwrap(), vec![]);
        assert_eq!(parse_list_of_component_values(" ").unwrap(), vec![ws()]);
        assert_eq!(
            parse_list_of_component_values(":").unwrap(),
            vec![Token::Colon.into()]
        );
        assert_eq!(
            parse_list_of_component_values("blue red").unwrap(),
            vec![ident("blue"), ws(), ident("red")]
        );
        assert_eq!(
            parse_list_of_component_values(
                "blue url( https://example.com/background ) \"some text\" translate( 50% )"
            )
            .unwrap(),
            vec![
                ident("blue"),
                ws(),
                url("https://example.com/background"),
                ws(),
                string("some text"),
                ws(),
                function("translate", vec![ws(), percentage(50.0), ws()]),
            ]
        );
    }

    #[test]
    fn comma_separated_lists() {
        assert_eq!(
            parse_comma_separated_list_of_component_values("").unwrap(),
            vec![vec![]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values(" ").unwrap(),
            vec![vec![ws()]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values(",").unwrap(),
            vec![vec![], vec![]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values("blue red").unwrap(),
            vec![vec![ident("blue"), ws(), ident("red")]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values("blue,red").unwrap(),
            vec![vec![ident("blue")], vec![ident("red")]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values(",blue,red").unwrap(),
            vec![vec![], vec![ident("blue")], vec![ident("red")]]
        );
        assert_eq!(
            parse_comma_separated_list_of_component_values("blue,red,").unwrap(),
            vec![vec![ident("blue")], vec![ident("red")], vec![]]
        );
    }

    #[test]
    fn commas_inside_functions_do_not_split() {
        assert_eq!(
            parse_comma_separated_list_of_component_values("rgb(1,2), a").unwrap(),
            vec![
                vec![function(
                    "rgb",
                    vec![
                        Token::Number {
                            value: 1.0,
                            number_type: NumberType::Integer,
                            sign: Sign::None,
                        }
                        .into(),
                        Token::Comma.into(),
                        Token::Number {
                            value: 2.0,
                            number_type: NumberType::Integer,
                            sign: Sign::None,
                        }
                        .into(),
                    ]
                )],
                vec![ws(), ident("a")],
            ]
        );
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let shallow = "(".repeat(ParserConfig::DEFAULT_MAX_NESTING_DEPTH);
        assert!(parse_list_of_component_values(&shallow).is_ok());

        let deep = "(".repeat(ParserConfig::DEFAULT_MAX_NESTING_DEPTH + 1);
        let limit = ParserConfig::DEFAULT_MAX_NESTING_DEPTH;
        assert_eq!(
            parse_list_of_component_values(&deep),
            Err(SyntaxError::NestingTooDeep { limit })
        );
        assert_eq!(
            parse_stylesheet(&format!("a {{ b: {deep} }}")),
            Err(SyntaxError::NestingTooDeep { limit })
        );
        assert_eq!(
            parse_list_of_declarations(&format!("b: {deep}")),
            Err(SyntaxError::NestingTooDeep { limit })
        );
    }

    #[test]
    fn parser_from_tokens() {
        let tokens = css_tokenizer::tokenize("color: red");
        let declaration = Parser::from_tokens(tokens, ParserConfig::default())
            .parse_a_declaration()
            .unwrap();
        assert_eq!(declaration.name, "color");
        assert_eq!(declaration.value, vec![ident("red")]);
    }
}
