// Cell expression tokens for lexical analysis

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    Number(String),
    String(String),

    // Keywords
    True,
    False,
    And,
    Or,
    Not,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    DotDot,

    // Special
    Illegal(char),
    UnterminatedString,
    Eof,
}

/// A token together with the character offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

impl Token {
    /// Convert a string to a keyword token if it matches.
    ///
    /// Keywords are case sensitive.
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s {
            "true" => Some(Token::True),
            "false" => Some(Token::False),
            "and" => Some(Token::And),
            "or" => Some(Token::Or),
            "not" => Some(Token::Not),
            _ => None,
        }
    }

    /// Short human-readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::Number(n) => format!("number {}", n),
            Token::String(s) => format!("string \"{}\"", s),
            Token::Illegal(c) => format!("character '{}'", c),
            Token::UnterminatedString => "unterminated string".to_string(),
            Token::Eof => "end of input".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::True => "true",
            Token::False => "false",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::StarStar => "**",
            Token::Slash => "/",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Comma => ",",
            Token::DotDot => "..",
            _ => "?",
        }
    }
}
