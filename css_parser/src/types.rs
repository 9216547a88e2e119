use css_tokenizer::{BlockKind, Token};

/// https://drafts.csswg.org/css-syntax-3/#css-stylesheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

/// https://drafts.csswg.org/css-syntax-3/#css-rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    AtRule(AtRule),
    QualifiedRule(QualifiedRule),
}

/// https://drafts.csswg.org/css-syntax-3/#at-rule
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    /// The `{}` block, or `None` when the rule ended at a `;` or the end of the input.
    pub value: Option<SimpleBlock>,
}

/// https://www.w3.org/TR/css-syntax-3/#qualified-rule
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub value: SimpleBlock,
}

/// https://drafts.csswg.org/css-syntax-3/#declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

/// An item of a list of declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationOrAtRule {
    Declaration(Declaration),
    AtRule(AtRule),
}

/// https://www.w3.org/TR/css-syntax-3/#component-value
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// https://www.w3.org/TR/css-syntax-3/#preserved-tokens
    PreservedToken(Token),
    /// https://www.w3.org/TR/css-syntax-3/#function
    Function(Function),
    SimpleBlock(SimpleBlock),
}

impl ComponentValue {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ComponentValue::PreservedToken(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_token(&self, token: &Token) -> bool {
        self.as_token() == Some(token)
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_token(&Token::Whitespace)
    }
}

impl From<Token> for ComponentValue {
    fn from(token: Token) -> Self {
        ComponentValue::PreservedToken(token)
    }
}

/// https://drafts.csswg.org/css-syntax-3/#function
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub value: Vec<ComponentValue>,
}

/// https://www.w3.org/TR/css-syntax-3/#simple-block
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
    pub kind: BlockKind,
    pub value: Vec<ComponentValue>,
}

/// An inclusive range of code points, as written in a `unicode-range` descriptor.
///
/// https://drafts.csswg.org/css-syntax-3/#urange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeRange {
    pub start: u32,
    pub end: u32,
}
