use super::closure::Closure;
use super::token::{Position, TokenKind};
use std::fmt;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// A failure to scan or parse a roll expression, along with where it happened.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{position}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// No token starts with this character.
    UnexpectedSymbol { symbol: char },
    /// Input ran out while the grammar still needed a token.
    EndOfInput,
    UnexpectedToken {
        found: TokenKind,
        lexeme: String,
        expected: Vec<TokenKind>,
    },
    /// Positioned at the opening token.
    OrphanClosureBegin { closure: Closure },
    /// Positioned at the closing token.
    OrphanClosureEnd { closure: Closure },
    /// Positioned at the opening token of the innermost open closure.
    IncompleteEnclosedExpression { closure: Closure },
    /// Too many open closures, or an operation tree taller than the parser allows.
    NestingTooDeep { max: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedSymbol { symbol } => write!(f, "unknown symbol {:?}", symbol),
            Self::EndOfInput => f.write_str("the end of the expression was reached"),
            Self::UnexpectedToken {
                found,
                lexeme,
                expected,
            } => {
                if lexeme.is_empty() {
                    write!(f, "unexpected token {}", found)?;
                } else {
                    write!(f, "unexpected token {:?}", lexeme)?;
                }
                if expected.is_empty() {
                    Ok(())
                } else {
                    f.write_str("; expected ")?;
                    fmt_expected(expected, f)
                }
            }
            Self::OrphanClosureBegin { closure } => write!(
                f,
                "orphan closure begin: {} has no matching {}",
                closure.begin, closure.end
            ),
            Self::OrphanClosureEnd { closure } => write!(
                f,
                "orphan closure end: {} has no matching {} before it",
                closure.end, closure.begin
            ),
            Self::IncompleteEnclosedExpression { closure } => write!(
                f,
                "the expression enclosed by {} is incomplete",
                closure
            ),
            Self::NestingTooDeep { max } => {
                write!(f, "the expression nests more than {} levels deep", max)
            }
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a.as_str()),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => {
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}
