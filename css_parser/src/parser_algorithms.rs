use css_tokenizer::{BlockKind, Token};

use crate::types::{
    AtRule, ComponentValue, Declaration, DeclarationOrAtRule, Function, QualifiedRule, Rule,
    SimpleBlock,
};
use crate::{log_parse_error, Parser, Result, SyntaxError};

impl Parser {
    /// 5.5.1. Consume a list of rules
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules
    pub(crate) fn consume_a_list_of_rules(&mut self, top_level: bool) -> Result<Vec<Rule>> {
        // Create an initially empty list of rules.
        let mut rules = vec![];

        loop {
            self.discard_whitespace();

            if self.input.consume_if_eof() {
                return Ok(rules);
            }

            if self
                .input
                .consume_if(|value| value.is_token(&Token::Cdo) || value.is_token(&Token::Cdc))
            {
                // If the top-level flag is set, do nothing.
                if top_level {
                    continue;
                }

                // Otherwise, reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules.
                self.input.reconsume();
                if let Some(rule) = self.consume_a_qualified_rule()? {
                    rules.push(Rule::QualifiedRule(rule));
                }
                continue;
            }

            if let Some(rule) = self.consume_a_rule()? {
                rules.push(rule);
            }
        }
    }

    /// Consumes an at-rule when the next value is an `<at-keyword-token>`,
    /// and a qualified rule otherwise.
    pub(crate) fn consume_a_rule(&mut self) -> Result<Option<Rule>> {
        match self.consume_an_at_keyword() {
            Some(name) => Ok(Some(Rule::AtRule(self.consume_an_at_rule(name)?))),
            None => Ok(self.consume_a_qualified_rule()?.map(Rule::QualifiedRule)),
        }
    }

    /// 5.5.2. Consume an at-rule
    ///
    /// `name` is the value of the `<at-keyword-token>` that was just consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-at-rule
    pub(crate) fn consume_an_at_rule(&mut self, name: String) -> Result<AtRule> {
        let mut prelude = vec![];

        loop {
            if self.input.consume_if(|value| value.is_token(&Token::Semicolon)) {
                return Ok(AtRule {
                    name,
                    prelude,
                    value: None,
                });
            }

            if self.input.consume_if_eof() {
                log_parse_error!("unexpected EOF while parsing the at-rule @{name}");
                return Ok(AtRule {
                    name,
                    prelude,
                    value: None,
                });
            }

            if self
                .input
                .consume_if(|value| value.is_token(&Token::LeftCurlyBracket))
            {
                let block = self.consume_a_simple_block(BlockKind::CurlyBracket)?;
                return Ok(AtRule {
                    name,
                    prelude,
                    value: Some(block),
                });
            }

            prelude.push(self.consume_a_component_value()?);
        }
    }

    /// 5.5.3. Consume a qualified rule
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule
    pub(crate) fn consume_a_qualified_rule(&mut self) -> Result<Option<QualifiedRule>> {
        let mut prelude = vec![];

        loop {
            if self.input.consume_if_eof() {
                // This is a parse error. Return nothing.
                log_parse_error!("unexpected EOF while parsing a qualified rule");
                return Ok(None);
            }

            if self
                .input
                .consume_if(|value| value.is_token(&Token::LeftCurlyBracket))
            {
                let value = self.consume_a_simple_block(BlockKind::CurlyBracket)?;
                return Ok(Some(QualifiedRule { prelude, value }));
            }

            prelude.push(self.consume_a_component_value()?);
        }
    }

    /// 5.5.4. Consume a list of declarations
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations
    pub(crate) fn consume_a_list_of_declarations(
        &mut self,
    ) -> Result<Vec<DeclarationOrAtRule>> {
        let mut declarations = vec![];

        loop {
            self.input
                .consume_while(|value| value.is_whitespace() || value.is_token(&Token::Semicolon));

            if self.input.consume_if_eof() {
                return Ok(declarations);
            }

            if let Some(name) = self.consume_an_at_keyword() {
                let rule = self.consume_an_at_rule(name)?;
                declarations.push(DeclarationOrAtRule::AtRule(rule));
                continue;
            }

            if self.next_is_ident() {
                // Initialize a temporary list initially filled with the current input token. As
                // long as the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and append it to the temporary list.
                let mut buffer = vec![self.input.consume_any()];
                while !self.next_is(&Token::Semicolon) && !self.input.consume_if_eof() {
                    buffer.push(self.consume_a_component_value()?);
                }

                // Consume a declaration from the temporary list. If anything was returned,
                // append it to the list of declarations.
                let mut parser = Parser::from_component_values(buffer, self.config);
                parser.depth = self.depth;
                match parser.consume_a_declaration()? {
                    Some(declaration) => {
                        declarations.push(DeclarationOrAtRule::Declaration(declaration))
                    }
                    None => log_parse_error!("dropped an invalid declaration"),
                }
                continue;
            }

            // This is a parse error. Throw away component values up to the next
            // <semicolon-token> or <EOF-token>.
            log_parse_error!(
                "unexpected {:?} at the start of a declaration",
                self.input.peek(0)
            );
            while !self.next_is(&Token::Semicolon) && !self.input.consume_if_eof() {
                self.consume_a_component_value()?;
            }
        }
    }

    /// 5.5.5. Consume a declaration
    ///
    /// Expects the next value to be the declaration's `<ident-token>`, and
    /// everything up to the end of the input to belong to the declaration.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-declaration
    pub(crate) fn consume_a_declaration(&mut self) -> Result<Option<Declaration>> {
        let Some(name) = self.consume_an_ident() else {
            return Ok(None);
        };

        self.discard_whitespace();

        // If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing.
        if !self.input.consume_if(|value| value.is_token(&Token::Colon)) {
            log_parse_error!("expected ':' after the declaration name {name:?}");
            return Ok(None);
        }

        self.discard_whitespace();

        let mut value = vec![];
        while !self.input.consume_if_eof() {
            value.push(self.consume_a_component_value()?);
        }
        remove_trailing_whitespace(&mut value);

        // If the last two non-<whitespace-token>s are a <delim-token> with the value "!"
        // followed by an <ident-token> with a value that is an ASCII case-insensitive match
        // for "important", remove them and set the declaration's important flag to true.
        let important = matches!(
            value.as_slice(),
            [.., bang, flag] if is_delim(bang, '!') && is_ident(flag, "important")
        );
        if important {
            value.truncate(value.len() - 2);
            remove_trailing_whitespace(&mut value);
        }

        Ok(Some(Declaration {
            name,
            value,
            important,
        }))
    }

    /// 5.5.7. Consume a component value
    ///
    /// Blocks and functions that were already built pass through unchanged.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-component-value
    pub(crate) fn consume_a_component_value(&mut self) -> Result<ComponentValue> {
        let value = self.input.consume_any();

        if let Some(token) = value.as_token() {
            // If the current input token is a {-token, [-token, or (-token, consume a simple
            // block and return it.
            if let Some(kind) = token.block_kind() {
                return Ok(ComponentValue::SimpleBlock(self.consume_a_simple_block(kind)?));
            }

            // Otherwise, if the current input token is a <function-token>, consume a function
            // and return it.
            if let Token::Function { value: name } = token {
                let name = name.clone();
                return Ok(ComponentValue::Function(self.consume_a_function(name)?));
            }
        }

        Ok(value)
    }

    /// 5.5.8. Consume a simple block
    ///
    /// The block's opening token has already been consumed.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-simple-block
    pub(crate) fn consume_a_simple_block(&mut self, kind: BlockKind) -> Result<SimpleBlock> {
        self.enter_nested()?;

        let mut value = vec![];
        loop {
            if self.input.consume_if(|value| {
                value
                    .as_token()
                    .is_some_and(|token| kind.is_ending_token(token))
            }) {
                break;
            }

            if self.input.consume_if_eof() {
                log_parse_error!("unexpected EOF while parsing a simple block");
                break;
            }

            value.push(self.consume_a_component_value()?);
        }

        self.leave_nested();
        Ok(SimpleBlock { kind, value })
    }

    /// 5.5.9. Consume a function
    ///
    /// https://www.w3.org/TR/css-syntax-3/#consume-function
    pub(crate) fn consume_a_function(&mut self, name: String) -> Result<Function> {
        self.enter_nested()?;

        let mut value = vec![];
        loop {
            if self
                .input
                .consume_if(|value| value.is_token(&Token::RightParenthesis))
            {
                break;
            }

            if self.input.consume_if_eof() {
                log_parse_error!("unexpected EOF while parsing the function {name}()");
                break;
            }

            value.push(self.consume_a_component_value()?);
        }

        self.leave_nested();
        Ok(Function { name, value })
    }

    pub(crate) fn discard_whitespace(&mut self) {
        self.input.consume_while(ComponentValue::is_whitespace);
    }

    pub(crate) fn next_is(&self, token: &Token) -> bool {
        self.input.peek(0).is_token(token)
    }

    pub(crate) fn next_is_ident(&self) -> bool {
        matches!(self.input.peek(0).as_token(), Some(Token::Ident { .. }))
    }

    fn consume_an_at_keyword(&mut self) -> Option<String> {
        match self.input.peek(0).as_token() {
            Some(Token::AtKeyword { value }) => {
                let name = value.clone();
                self.input.advance(1);
                Some(name)
            }
            _ => None,
        }
    }

    fn consume_an_ident(&mut self) -> Option<String> {
        match self.input.peek(0).as_token() {
            Some(Token::Ident { value }) => {
                let name = value.clone();
                self.input.advance(1);
                Some(name)
            }
            _ => None,
        }
    }

    fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= self.config.max_nesting_depth {
            log_parse_error!("nesting limit of {} reached", self.config.max_nesting_depth);
            return Err(SyntaxError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

fn remove_trailing_whitespace(values: &mut Vec<ComponentValue>) {
    while values.last().is_some_and(ComponentValue::is_whitespace) {
        values.pop();
    }
}

fn is_delim(value: &ComponentValue, expected: char) -> bool {
    value
        .as_token()
        .is_some_and(|token| token.is_delim_matching(expected))
}

fn is_ident(value: &ComponentValue, expected: &str) -> bool {
    value
        .as_token()
        .is_some_and(|token| token.is_ident_matching(expected))
}
