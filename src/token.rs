use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen, RightParen,
    LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus,
    Semicolon, Slash, Star,

    // One or two character tokens.
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    // Literals.
    Identifier, String_, Number,

    // Keywords.
    And, Class, Else, False,
    Fun, For, If, Nil, Or, Print,
    Return, Super, This, True, Var, While,

    Eof,
}

/// Reserved words. Only looked up once a whole identifier has been consumed, so `forest` stays an identifier.
const KEYWORDS: [(&str, TokenType); 16] = [
    ("and", TokenType::And),
    ("class", TokenType::Class),
    ("else", TokenType::Else),
    ("false", TokenType::False),
    ("for", TokenType::For),
    ("fun", TokenType::Fun),
    ("if", TokenType::If),
    ("nil", TokenType::Nil),
    ("or", TokenType::Or),
    ("print", TokenType::Print),
    ("return", TokenType::Return),
    ("super", TokenType::Super),
    ("this", TokenType::This),
    ("true", TokenType::True),
    ("var", TokenType::Var),
    ("while", TokenType::While),
];

impl TokenType {
    /// Returns the keyword type for `text`, or `None` if it is not a reserved word.
    pub fn keyword(text: &str) -> Option<TokenType> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, type_)| *type_)
    }
}

/// `Literal` represents 'front-end' values from the source code.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    String_(String),
    Bool(bool),
    Nil,  // Also used for tokens that carry no value.
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{}", x),
            Self::String_(x) => write!(f, "{}", x),
            Self::Bool(x) => write!(f, "{}", x),
            Self::Nil => write!(f, "nil"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub type_: TokenType,  // Type of token.
    pub lexeme: String,  // The exact text from the source code.
    pub literal: Literal,  // The literal value the token represents, `Nil` if N/A.
    pub line: usize,  // The line number the lexeme started on.
}

impl Token {
    pub fn new(type_: TokenType, lexeme: &str, literal: Literal, line: usize) -> Self {
        Self {
            type_,
            lexeme: String::from(lexeme),
            literal,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} {}", self.type_, self.lexeme, self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, Token, TokenType};

    #[test]
    fn keyword_lookup() {
        assert_eq!(Some(TokenType::For), TokenType::keyword("for"));
        assert_eq!(Some(TokenType::Nil), TokenType::keyword("nil"));
        assert_eq!(None, TokenType::keyword("forest"));
        assert_eq!(None, TokenType::keyword("For"));
    }

    #[test]
    fn literal_display() {
        assert_eq!("123", Literal::Number(123.0).to_string());
        assert_eq!("45.67", Literal::Number(45.67).to_string());
        assert_eq!("abc", Literal::String_(String::from("abc")).to_string());
        assert_eq!("false", Literal::Bool(false).to_string());
        assert_eq!("nil", Literal::Nil.to_string());
    }

    #[test]
    fn token_display() {
        let token = Token::new(TokenType::Number, "1.5", Literal::Number(1.5), 3);
        assert_eq!("Number 1.5 1.5", token.to_string());
    }
}
