use crate::common::*;
use std::fmt;

/// Result of evaluating an arithmetic node.
///
/// Integer arithmetic stays integral until a float gets involved or the result would overflow,
/// in which case it is carried out on floats instead.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    Int(Int),
    Float(Float),
}

impl Number {
    pub(crate) const ZERO: Self = Self::Int(0);

    /// Truncates toward zero; out of range floats saturate and NaN becomes 0.
    pub fn as_int(self) -> Int {
        match self {
            Self::Int(x) => x,
            Self::Float(x) => x as Int,
        }
    }

    pub fn as_float(self) -> Float {
        match self {
            Self::Int(x) => x as Float,
            Self::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(x) => x == 0,
            Self::Float(x) => x == 0.0,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl std::ops::Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(x) => x
                .checked_neg()
                .map_or_else(|| Self::Float(-(x as Float)), Self::Int),
            Self::Float(x) => Self::Float(-x),
        }
    }
}

macro_rules! num_impl_bin_op {
    ($Name:ident, $fn_name:ident, $checked:ident) => {
        impl std::ops::$Name for Number {
            type Output = Self;

            fn $fn_name(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(x), Self::Int(y)) => x.$checked(y).map_or_else(
                        || Self::Float(std::ops::$Name::$fn_name(x as Float, y as Float)),
                        Self::Int,
                    ),
                    (x, y) => Self::Float(std::ops::$Name::$fn_name(x.as_float(), y.as_float())),
                }
            }
        }
    };
}

num_impl_bin_op!(Add, add, checked_add);
num_impl_bin_op!(Sub, sub, checked_sub);
num_impl_bin_op!(Mul, mul, checked_mul);

impl std::ops::Div for Number {
    type Output = Self;

    /// True division; the result is always a float.
    fn div(self, rhs: Self) -> Self::Output {
        Self::Float(self.as_float() / rhs.as_float())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (x, y) => x.as_float().eq(&y.as_float()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x.partial_cmp(y),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<Float> for Number {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Float(x) => fmt::Debug::fmt(x, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion() {
        assert!((Number::Int(2) + Number::Int(3)).is_int());
        assert_eq!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert!(!(Number::Int(2) + Number::Float(0.5)).is_int());
        assert_eq!(Number::Int(2) * Number::Float(0.5), Number::Float(1.0));
        assert_eq!(Number::Float(1.5) - Number::Int(2), Number::Float(-0.5));
    }

    #[test]
    fn test_division_is_true_division() {
        let q = Number::Int(3) / Number::Int(2);
        assert!(!q.is_int());
        assert_eq!(q, Number::Float(1.5));
        assert_eq!(Number::Int(6) / Number::Int(3), Number::Float(2.0));
    }

    #[test]
    fn test_overflow_promotes() {
        let big = Number::Int(Int::MAX);
        assert_eq!(big + Number::Int(1), Number::Float(Int::MAX as Float + 1.0));
        assert_eq!(-Number::Int(Int::MIN), Number::Float(-(Int::MIN as Float)));
        assert!((-Number::Int(4)).is_int());
    }

    #[test]
    fn test_as_int_truncates() {
        assert_eq!(Number::Float(2.9).as_int(), 2);
        assert_eq!(Number::Float(-2.9).as_int(), -2);
        assert_eq!(Number::Float(Float::NAN).as_int(), 0);
    }

    #[test]
    fn test_is_zero() {
        assert!(Number::Int(0).is_zero());
        assert!(Number::Float(-0.0).is_zero());
        assert!(!Number::Float(0.25).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(-3).to_string(), "-3");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(0.75).to_string(), "0.75");
    }
}
