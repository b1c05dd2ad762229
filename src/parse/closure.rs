use super::token::{Position, TokenKind};
use std::fmt;

/// A pair of tokens that encloses a sub-expression and must nest correctly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Closure {
    pub begin: TokenKind,
    pub end: TokenKind,
}

impl Closure {
    pub const PARENTHESES: Self = Self::new(TokenKind::LeftParen, TokenKind::RightParen);

    /// Every closure the parser knows about, looked up when diagnosing stray end tokens.
    pub const ALL: &'static [Self] = &[Self::PARENTHESES];

    pub const fn new(begin: TokenKind, end: TokenKind) -> Self {
        Self { begin, end }
    }

    pub fn ending_with(kind: TokenKind) -> Option<Self> {
        Self::ALL.iter().copied().find(|closure| closure.end == kind)
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.begin, self.end)
    }
}

/// An opened closure waiting for its end token.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct ClosureFrame {
    pub closure: Closure,
    pub opened_at: Position,
}
