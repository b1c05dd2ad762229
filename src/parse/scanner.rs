use super::error::{PResult, ParseError, ParseErrorKind};
use super::token::{Position, Token, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
enum Lexeme {
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Multiply,
    #[token("/")]
    Divide,

    #[token("d")]
    #[token("D")]
    Die,

    #[regex(r"[0-9]+")]
    Integer,

    // Exactly one character that nothing above can start with.
    #[regex(r"[^\s()+\-*/dD0-9]")]
    Unknown,

    #[regex(r"\s+", logos::skip)]
    #[error]
    Error,
}

impl Lexeme {
    fn kind(self) -> Option<TokenKind> {
        Some(match self {
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Multiply => TokenKind::Multiply,
            Self::Divide => TokenKind::Divide,
            Self::Die => TokenKind::Die,
            Self::Integer => TokenKind::Integer,
            Self::Unknown | Self::Error => return None,
        })
    }
}

#[derive(Debug, Copy, Clone)]
struct Cursor {
    index: usize,
    position: Position,
}

impl Cursor {
    const START: Self = Self {
        index: 0,
        position: Position::START,
    };

    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.index += text.len();
    }
}

/// Turns a roll expression into tokens, one call at a time.
///
/// Once the source is exhausted every call yields an [`TokenKind::End`] token.
pub struct Scanner<'a> {
    source: &'a str,
    lexer: logos::Lexer<'a, Lexeme>,
    cursor: Cursor,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexeme::lexer(source),
            cursor: Cursor::START,
        }
    }

    /// Binds a new source and rewinds to line 1, column 1.
    pub fn reset(&mut self, source: &'a str) {
        *self = Self::new(source);
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.cursor.position
    }

    pub fn next_token(&mut self) -> PResult<Token<'a>> {
        let lexeme = match self.lexer.next() {
            Some(lexeme) => lexeme,
            None => {
                self.skip_to(self.source.len());
                return Ok(Token::end(self.cursor.position));
            }
        };

        let span = self.lexer.span();
        self.skip_to(span.start);
        let position = self.cursor.position;
        self.skip_to(span.end);

        let slice = self.lexer.slice();
        match lexeme.kind() {
            Some(kind) => {
                let token = Token::new(kind, slice, position);
                log::trace!("scanned {} at {}", token, position);
                Ok(token)
            }
            None => {
                let symbol = slice.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                Err(ParseError::new(
                    ParseErrorKind::UnexpectedSymbol { symbol },
                    position,
                ))
            }
        }
    }

    fn skip_to(&mut self, index: usize) {
        if let Some(text) = self.source.get(self.cursor.index..index) {
            self.cursor.advance(text);
        }
    }
}
