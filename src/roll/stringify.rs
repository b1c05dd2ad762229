use super::num::Number;
use super::tree::Operation;
use std::fmt::{self, Write};

impl Operation {
    /// Binding strength when rendered, higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Self::Sum(_) | Self::Subtract(_) => 1,
            Self::Multiply(_) | Self::Divide(_) => 2,
            Self::Negate(_) => 3,
            Self::LiteralValue(lit) if lit.value < Number::ZERO => 3,
            Self::LiteralValue(_) | Self::Die(_) | Self::DiceRoll(_) => 4,
        }
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, op: &Operation, min_precedence: u8) -> fmt::Result {
    if op.precedence() < min_precedence {
        write!(f, "({})", op)
    } else {
        fmt::Display::fmt(op, f)
    }
}

// Dice counts and faces only accept a bare integer or a parenthesised expression.
fn fmt_value(f: &mut fmt::Formatter<'_>, op: &Operation) -> fmt::Result {
    match op {
        Operation::LiteralValue(lit) if matches!(lit.value, Number::Int(x) if x >= 0) => {
            fmt::Display::fmt(&lit.value, f)
        }
        _ => write!(f, "({})", op),
    }
}

fn fmt_binary(
    f: &mut fmt::Formatter<'_>,
    lhs: &Operation,
    op: char,
    rhs: &Operation,
    precedence: u8,
) -> fmt::Result {
    fmt_operand(f, lhs, precedence)?;
    write!(f, " {} ", op)?;
    fmt_operand(f, rhs, precedence + 1)
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiteralValue(lit) => fmt::Display::fmt(&lit.value, f),
            Self::Die(die) => {
                f.write_char('d')?;
                fmt_value(f, &die.faces)
            }
            Self::DiceRoll(roll) => {
                fmt_value(f, &roll.count)?;
                match &*roll.die {
                    die @ Self::Die(_) => fmt::Display::fmt(die, f),
                    other => write!(f, "({})", other),
                }
            }
            Self::Negate(neg) => {
                f.write_char('-')?;
                fmt_operand(f, &neg.operand, 4)
            }
            Self::Sum(op) => fmt_binary(f, &op.lhs, '+', &op.rhs, 1),
            Self::Subtract(op) => fmt_binary(f, &op.lhs, '-', &op.rhs, 1),
            Self::Multiply(op) => fmt_binary(f, &op.lhs, '*', &op.rhs, 2),
            Self::Divide(op) => fmt_binary(f, &op.lhs, '/', &op.rhs, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;

    fn check(s: &str, expected: &str) {
        let op = parse(s).unwrap();
        let rendered = op.to_string();
        assert_eq!(rendered, expected);
        assert_eq!(parse(&rendered).unwrap(), op);
    }

    #[test]
    fn test_stringify() {
        check("2d6+3", "2d6 + 3");
        check("d20", "d20");
        check("(1+2)*3", "(1 + 2) * 3");
        check("1-(2-3)", "1 - (2 - 3)");
        check("1-2-3", "1 - 2 - 3");
        check("8 / (4 / 2)", "8 / (4 / 2)");
        check("(d4)d8", "(d4)d8");
        check("D(2d6)", "d(2d6)");
        check("(1d4)d(2d6)", "(1d4)d(2d6)");
        check("-(1+2)", "-(1 + 2)");
        check("3 * +1 / 2d6", "3 * 1 / 2d6");
        check("10 * (1d10 - 1) + 1d10", "10 * (1d10 - 1) + 1d10");
        check("2 * -3", "2 * -3");
        check("-(-3)", "-(-3)");
    }
}
