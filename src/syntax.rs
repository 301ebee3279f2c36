// Syntax module - cell text lexing and parsing

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{ParseError, ParseResult};
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use token::{Spanned, Token};
