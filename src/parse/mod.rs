mod closure;
mod error;
mod parser;
mod scanner;
mod token;

pub use closure::Closure;
pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use scanner::Scanner;
pub use token::{Position, Token, TokenKind};

use crate::roll::Operation;

/// Parses a roll expression into an executable [`Operation`] tree.
pub fn parse(source: &str) -> Result<Operation, ParseError> {
    Parser::new().parse(source)
}
