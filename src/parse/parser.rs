use super::closure::{Closure, ClosureFrame};
use super::error::{PResult, ParseError, ParseErrorKind};
use super::scanner::Scanner;
use super::token::{Position, Token, TokenKind};
use crate::common::*;
use crate::roll::{Number, Operation};

type Rule<'a> = fn(&mut Parser<'a>) -> PResult<Option<Operation>>;

/// Recursive-descent parser for roll expressions.
///
/// ```text
/// roll_expr     := add_sub
/// add_sub       := mul_div (('+' | '-') mul_div)*
/// mul_div       := signed (('*' | '/') signed)*
/// signed        := ('+' | '-')? dice_or_value
/// dice_or_value := value die? | die
/// die           := 'd' value
/// value         := '(' roll_expr ')' | integer
/// ```
///
/// Each rule yields `Ok(None)` when the current token cannot start it, so the caller decides
/// whether that is an error.
///
/// Trees are evaluated, rendered and dropped recursively, so both the number of open closures and
/// the height of the resulting tree are capped.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token<'a>,
    closures: Vec<ClosureFrame>,
    // height of the operation most recently built
    height: usize,
}

impl<'a> Parser<'a> {
    /// Most closures that may be open at once.
    pub const MAX_NESTING: usize = 256;

    /// Tallest operation tree a parse may produce, counting the root and the leaves.
    pub const MAX_DEPTH: usize = 512;

    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Multiply, TokenKind::Divide];

    const SIGNS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const VALUE_START: &'static [TokenKind] = &[TokenKind::LeftParen, TokenKind::Integer];

    const DICE_OR_VALUE_START: &'static [TokenKind] =
        &[TokenKind::LeftParen, TokenKind::Integer, TokenKind::Die];

    const SIGNED_START: &'static [TokenKind] = &[
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::LeftParen,
        TokenKind::Integer,
        TokenKind::Die,
    ];

    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(""),
            current: Token::end(Default::default()),
            closures: Vec::new(),
            height: 0,
        }
    }

    /// Parses `source` from scratch; nothing carries over from earlier calls.
    pub fn parse(&mut self, source: &'a str) -> PResult<Operation> {
        self.ready(source)?;

        let root = self.require(Self::parse_roll_expression, Self::SIGNED_START)?;
        if !self.current.is_end() {
            return self.unexpected(&[TokenKind::End]);
        }

        log::debug!("parsed {:?} as {}", source, root);
        Ok(root)
    }

    fn ready(&mut self, source: &'a str) -> PResult<()> {
        self.scanner.reset(source);
        self.closures.clear();
        self.height = 0;
        self.current = Token::end(self.scanner.position());
        self.advance()
    }

    fn advance(&mut self) -> PResult<()> {
        self.current = self.scanner.next_token()?;
        Ok(())
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn matches_any(&self, options: &[TokenKind]) -> bool {
        options.contains(&self.current.kind)
    }

    /// Consumes the current token, returning its kind.
    fn advance_kind(&mut self) -> PResult<TokenKind> {
        let kind = self.current.kind;
        self.advance()?;
        Ok(kind)
    }

    fn require(&mut self, rule: Rule<'a>, expected: &[TokenKind]) -> PResult<Operation> {
        match rule(self)? {
            Some(op) => Ok(op),
            None => self.unexpected(expected),
        }
    }

    fn grow(&mut self, height: usize, at: Position) -> PResult<()> {
        if height > Self::MAX_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    max: Self::MAX_DEPTH,
                },
                at,
            ));
        }
        self.height = height;
        Ok(())
    }

    fn error<T>(&self, kind: ParseErrorKind, token: &Token<'_>) -> PResult<T> {
        Err(ParseError::new(kind, token.position))
    }

    /// Reports the current token as out of place, preferring a closure-based explanation.
    fn unexpected<T>(&mut self, expected: &[TokenKind]) -> PResult<T> {
        let current = self.current;

        if current.is_end() {
            return match self.closures.pop() {
                Some(frame) => Err(ParseError::new(
                    ParseErrorKind::OrphanClosureBegin {
                        closure: frame.closure,
                    },
                    frame.opened_at,
                )),
                None => self.error(ParseErrorKind::EndOfInput, &current),
            };
        }

        if let Some(closure) = Closure::ending_with(current.kind) {
            return match self.closures.last() {
                Some(frame) => Err(ParseError::new(
                    ParseErrorKind::IncompleteEnclosedExpression {
                        closure: frame.closure,
                    },
                    frame.opened_at,
                )),
                None => self.error(ParseErrorKind::OrphanClosureEnd { closure }, &current),
            };
        }

        self.error(
            ParseErrorKind::UnexpectedToken {
                found: current.kind,
                lexeme: current.lexeme.to_string(),
                expected: expected.to_vec(),
            },
            &current,
        )
    }

    fn begin_closure(&mut self, closure: Closure) -> PResult<bool> {
        if !self.matches(closure.begin) {
            return Ok(false);
        }
        if self.closures.len() >= Self::MAX_NESTING {
            return self.error(
                ParseErrorKind::NestingTooDeep {
                    max: Self::MAX_NESTING,
                },
                &self.current,
            );
        }

        self.closures.push(ClosureFrame {
            closure,
            opened_at: self.current.position,
        });
        self.advance()?;
        Ok(true)
    }

    fn end_closure(&mut self, closure: Closure) -> PResult<bool> {
        if !self.matches(closure.end) {
            return Ok(false);
        }

        let current = self.current;
        match self.closures.pop() {
            Some(frame) if frame.closure == closure => {}
            Some(frame) => {
                return Err(ParseError::new(
                    ParseErrorKind::OrphanClosureBegin {
                        closure: frame.closure,
                    },
                    frame.opened_at,
                ))
            }
            None => return self.error(ParseErrorKind::OrphanClosureEnd { closure }, &current),
        }
        self.advance()?;
        Ok(true)
    }

    fn parse_roll_expression(&mut self) -> PResult<Option<Operation>> {
        self.parse_addition()
    }

    fn parse_addition(&mut self) -> PResult<Option<Operation>> {
        let mut lhs = match self.parse_multiplication()? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };

        while self.matches_any(Self::ADDITION_OPS) {
            let (at, lhs_height) = (self.current.position, self.height);
            let op = self.advance_kind()?;
            let rhs = self.require(Self::parse_multiplication, Self::SIGNED_START)?;
            self.grow(lhs_height.max(self.height) + 1, at)?;

            lhs = match op {
                TokenKind::Plus => Operation::sum(lhs, rhs),
                _ => Operation::subtract(lhs, rhs),
            };
        }

        Ok(Some(lhs))
    }

    fn parse_multiplication(&mut self) -> PResult<Option<Operation>> {
        let mut lhs = match self.parse_signed()? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };

        while self.matches_any(Self::MULTIPLICATION_OPS) {
            let (at, lhs_height) = (self.current.position, self.height);
            let op = self.advance_kind()?;
            let rhs = self.require(Self::parse_signed, Self::SIGNED_START)?;
            self.grow(lhs_height.max(self.height) + 1, at)?;

            lhs = match op {
                TokenKind::Multiply => Operation::multiply(lhs, rhs),
                _ => Operation::divide(lhs, rhs),
            };
        }

        Ok(Some(lhs))
    }

    fn parse_signed(&mut self) -> PResult<Option<Operation>> {
        if !self.matches_any(Self::SIGNS) {
            return self.parse_dice_or_value();
        }

        let at = self.current.position;
        let sign = self.advance_kind()?;
        let operand = self.require(Self::parse_dice_or_value, Self::DICE_OR_VALUE_START)?;

        Ok(Some(match sign {
            TokenKind::Minus => {
                self.grow(self.height + 1, at)?;
                Operation::negate(operand)
            }
            _ => operand,
        }))
    }

    fn parse_dice_or_value(&mut self) -> PResult<Option<Operation>> {
        let at = self.current.position;
        let value = self.parse_value()?;
        let count_height = self.height;
        let die = self.parse_die()?;

        Ok(match (value, die) {
            (Some(count), Some(die)) => {
                self.grow(count_height.max(self.height) + 1, at)?;
                Some(Operation::dice_roll(count, die))
            }
            (Some(value), None) => Some(value),
            (None, die) => die,
        })
    }

    fn parse_die(&mut self) -> PResult<Option<Operation>> {
        if !self.matches(TokenKind::Die) {
            return Ok(None);
        }

        let at = self.current.position;
        self.advance()?;
        let faces = self.require(Self::parse_value, Self::VALUE_START)?;
        self.grow(self.height + 1, at)?;
        Ok(Some(Operation::die(faces)))
    }

    fn parse_value(&mut self) -> PResult<Option<Operation>> {
        match self.parse_parenthesized()? {
            Some(op) => Ok(Some(op)),
            None => self.parse_integer(),
        }
    }

    fn parse_parenthesized(&mut self) -> PResult<Option<Operation>> {
        if !self.begin_closure(Closure::PARENTHESES)? {
            return Ok(None);
        }

        let inner = self.require(Self::parse_roll_expression, Self::SIGNED_START)?;

        if self.end_closure(Closure::PARENTHESES)? {
            Ok(Some(inner))
        } else {
            self.unexpected(&[TokenKind::RightParen])
        }
    }

    fn parse_integer(&mut self) -> PResult<Option<Operation>> {
        if !self.matches(TokenKind::Integer) {
            return Ok(None);
        }

        let value = parse_integer_literal(self.current.lexeme);
        self.height = 1;
        self.advance()?;
        Ok(Some(Operation::literal(value)))
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// Digit runs too long for `Int` are kept as floats.
fn parse_integer_literal(digits: &str) -> Number {
    match digits.parse::<Int>() {
        Ok(x) => Number::Int(x),
        Err(_) => Number::Float(digits.parse::<Float>().unwrap_or(Float::INFINITY)),
    }
}
